/// The ways in which the digits of a compressed Python version (e.g., `312`) can be malformed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum DigitsError {
    MissingMajor,
    InvalidMajor,
    MissingMinor,
    InvalidMinor,
}

/// Parse a compressed Python version (e.g., convert `39` into `(3, 9)` and `312` into `(3, 12)`).
///
/// The first digit is always the major version; the remaining digits are the minor version.
pub(crate) fn parse_compressed_version(digits: &str) -> Result<(u8, u8), DigitsError> {
    let major = parse_major(digits)?;
    let minor = digits
        .get(1..)
        .filter(|minor| !minor.is_empty())
        .ok_or(DigitsError::MissingMinor)?;
    if !minor.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DigitsError::InvalidMinor);
    }
    let minor = minor.parse::<u8>().map_err(|_| DigitsError::InvalidMinor)?;
    Ok((major, minor))
}

/// Parse the leading major digit of a compressed Python version.
pub(crate) fn parse_major(digits: &str) -> Result<u8, DigitsError> {
    digits
        .as_bytes()
        .first()
        .ok_or(DigitsError::MissingMajor)?
        .checked_sub(b'0')
        .filter(|digit| *digit < 10)
        .ok_or(DigitsError::InvalidMajor)
}

/// Parse a dotted `major.minor` Python version, e.g., `3.12`.
///
/// Returns `None` for anything other than two dot-separated decimal components.
pub fn parse_dotted_version(version: &str) -> Option<(u8, u8)> {
    let (major, minor) = version.split_once('.')?;
    if major.is_empty()
        || minor.is_empty()
        || !major.bytes().all(|b| b.is_ascii_digit())
        || !minor.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    Some((major.parse().ok()?, minor.parse().ok()?))
}
