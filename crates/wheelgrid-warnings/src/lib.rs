use std::error::Error;
use std::iter;
use std::sync::atomic::AtomicBool;

// macro hygiene: The user might not have direct dependencies on those crates
#[doc(hidden)]
pub use anstream;
#[doc(hidden)]
pub use owo_colors;
use owo_colors::DynColor;
use wheelgrid_static::EnvVars;

/// Whether user-facing warnings are enabled.
pub static ENABLED: AtomicBool = AtomicBool::new(false);

/// Enable user-facing warnings.
pub fn enable() {
    ENABLED.store(true, std::sync::atomic::Ordering::Relaxed);
}

/// Warn a user, if warnings are enabled.
#[macro_export]
macro_rules! warn_user {
    ($($arg:tt)*) => {{
        use $crate::anstream::eprintln;
        use $crate::owo_colors::OwoColorize;

        if $crate::ENABLED.load(std::sync::atomic::Ordering::Relaxed) {
            let message = format!("{}", format_args!($($arg)*));
            let formatted = message.bold();
            eprintln!("{}{} {formatted}", "warning".yellow().bold(), ":".bold());
        }
    }};
}

/// The width to wrap diagnostics at, if any.
///
/// An explicit override wins, then `COLUMNS`. Wrapping is off when `WHEELGRID_NO_WRAP` is set or
/// no width is known.
fn wrap_width(width_override: Option<usize>) -> Option<usize> {
    if std::env::var_os(EnvVars::WHEELGRID_NO_WRAP).is_some() {
        return None;
    }
    width_override.or_else(|| {
        std::env::var(EnvVars::COLUMNS)
            .ok()
            .and_then(|columns| columns.parse::<usize>().ok())
    })
}

/// Wrap text at ASCII spaces, never splitting words.
fn wrap_text(text: &str, width: Option<usize>, subsequent_indent: &str) -> String {
    if let Some(width) = width {
        let options = textwrap::Options::new(width)
            .subsequent_indent(subsequent_indent)
            .break_words(false)
            .word_separator(textwrap::WordSeparator::AsciiSpace)
            .word_splitter(textwrap::WordSplitter::NoHyphenation);
        return textwrap::fill(text, options);
    }

    let mut result = String::with_capacity(2 * text.len());
    for (idx, line) in text.split_terminator('\n').enumerate() {
        if idx > 0 {
            result.push('\n');
            // No trailing whitespace on blank lines.
            if !line.is_empty() {
                result.push_str(subsequent_indent);
            }
        }
        result.push_str(line);
    }
    result
}

/// Format an error chain, one `Caused by` line per source.
///
/// ```text
/// error: Failed to read `wheelgrid.toml`
///   Caused by: TOML parse error at line 1, column 1
/// ```
pub fn write_error_chain_with_options(
    err: &dyn Error,
    mut stream: impl std::fmt::Write,
    level: impl AsRef<str>,
    color: impl DynColor + Copy,
    width_override: Option<usize>,
) -> std::fmt::Result {
    use owo_colors::OwoColorize;

    let width = wrap_width(width_override);

    let message = wrap_text(&err.to_string(), width, "");
    writeln!(
        &mut stream,
        "{}{} {}",
        level.as_ref().color(color).bold(),
        ":".bold(),
        message.trim()
    )?;

    let padding = "  ";
    let cause = "Caused by";
    let child_padding = " ".repeat(padding.len() + cause.len() + 2);
    for source in iter::successors(err.source(), |&err| err.source()) {
        let wrapped = wrap_text(&source.to_string(), width, &child_padding);
        let mut lines = wrapped.lines();
        if let Some(first) = lines.next() {
            writeln!(
                &mut stream,
                "{padding}{}: {}",
                cause.color(color).bold(),
                first.trim()
            )?;
            for line in lines {
                let line = line.trim_end();
                if line.is_empty() {
                    writeln!(&mut stream)?;
                } else {
                    writeln!(&mut stream, "{line}")?;
                }
            }
        }
    }

    Ok(())
}

/// Format an error chain (error level, red).
pub fn write_error_chain(err: &dyn Error, stream: impl std::fmt::Write) -> std::fmt::Result {
    write_error_chain_with_options(err, stream, "error", owo_colors::AnsiColors::Red, None)
}
