use std::fmt;
use std::str::FromStr;

use anstream::ColorChoice;
use anyhow::Context;
use owo_colors::OwoColorize;
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};
use tracing_tree::HierarchicalLayer;
use tracing_tree::time::Uptime;

/// How much internal logging to show, from the number of `--verbose` flags.
///
/// `RUST_LOG` overrides the default filter at every level.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Level {
    /// `wheelgrid`: no logging.
    #[default]
    Off,
    /// `wheelgrid -v`: what was scanned and checked.
    Debug,
    /// `wheelgrid -vv`: how each tag was classified, with targets and uptimes.
    Trace,
}

impl From<u8> for Level {
    fn from(verbose: u8) -> Self {
        match verbose {
            0 => Self::Off,
            1 => Self::Debug,
            _ => Self::Trace,
        }
    }
}

impl Level {
    fn directive(self) -> anyhow::Result<Directive> {
        Ok(match self {
            Self::Off => LevelFilter::OFF.into(),
            Self::Debug => Directive::from_str("wheelgrid=debug")?,
            Self::Trace => Directive::from_str("wheelgrid=trace")?,
        })
    }
}

/// Prefixes each message with its level, colored when stderr supports it.
struct LevelPrefix;

impl<S, N> FormatEvent<S, N> for LevelPrefix
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let level = *event.metadata().level();
        if writer.has_ansi_escapes() {
            match level {
                tracing::Level::TRACE => write!(writer, "{} ", level.purple())?,
                tracing::Level::DEBUG => write!(writer, "{} ", level.blue())?,
                tracing::Level::INFO => write!(writer, "{} ", level.green())?,
                tracing::Level::WARN => write!(writer, "{} ", level.yellow())?,
                tracing::Level::ERROR => write!(writer, "{} ", level.red())?,
            }
        } else {
            write!(writer, "{level} ")?;
        }
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Install the global `tracing` subscriber, writing to stderr.
pub(crate) fn setup_logging(level: Level) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.directive()?)
        .from_env()
        .context("Invalid RUST_LOG directives")?;

    if level == Level::Trace {
        tracing_subscriber::registry()
            .with(
                HierarchicalLayer::default()
                    .with_targets(true)
                    .with_timer(Uptime::default())
                    .with_writer(std::io::stderr)
                    .with_filter(filter),
            )
            .init();
        return Ok(());
    }

    let ansi = matches!(
        anstream::Stderr::choice(&std::io::stderr()),
        ColorChoice::Always | ColorChoice::AlwaysAnsi
    );
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(LevelPrefix)
                .with_writer(std::io::stderr)
                .with_ansi(ansi)
                .with_filter(filter),
        )
        .init();
    Ok(())
}
