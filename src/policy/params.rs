//! Policy configuration strings: `key=value[,key=value...]`.
//!
//! Keys are matched case-insensitively and whitespace after a `,` is
//! tolerated, so `"n-sample=10, print"` scans as two entries.  Empty
//! segments are skipped.  Value validation is left to each policy; this
//! module only provides the shared scanning and numeric helpers.

use crate::error::ConfigError;

/// Splits a configuration string into `(key, value)` pairs.
///
/// A segment without `=` yields an empty value — valueless keys such as
/// `print` are a policy-level concern.
pub fn split_pairs(config: &str) -> impl Iterator<Item = (&str, &str)> {
    config
        .split(',')
        .map(|segment| segment.trim_start_matches(' '))
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.split_once('=').unwrap_or((segment, "")))
}

/// Parses a positive integer value for `key`.
///
/// Any non-digit characters after the number are a fatal
/// [`ConfigError::TrailingGarbage`]; an empty, non-numeric, or zero value is
/// a fatal [`ConfigError::InvalidValue`].
pub fn parse_positive(key: &str, value: &str) -> Result<usize, ConfigError> {
    let digits_end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (digits, trailing) = value.split_at(digits_end);

    if digits.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: key.to_owned(),
            value: value.to_owned(),
        });
    }
    if !trailing.is_empty() {
        return Err(ConfigError::TrailingGarbage {
            key: key.to_owned(),
            value: value.to_owned(),
            trailing: trailing.to_owned(),
        });
    }

    match digits.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_owned(),
            value: value.to_owned(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_comma_and_equals() {
        let pairs: Vec<_> = split_pairs("a=1,b=2").collect();
        assert_eq!(pairs, vec![("a", "1"), ("b", "2")]);
    }

    #[test]
    fn whitespace_after_comma_is_tolerated() {
        let pairs: Vec<_> = split_pairs("a=1, b=2").collect();
        assert_eq!(pairs, vec![("a", "1"), ("b", "2")]);
    }

    #[test]
    fn valueless_key_yields_empty_value() {
        let pairs: Vec<_> = split_pairs("print").collect();
        assert_eq!(pairs, vec![("print", "")]);
    }

    #[test]
    fn empty_segments_are_skipped() {
        let pairs: Vec<_> = split_pairs("a=1,,b=2,").collect();
        assert_eq!(pairs, vec![("a", "1"), ("b", "2")]);
    }

    #[test]
    fn positive_integer_parses() {
        assert_eq!(parse_positive("n-sample", "64"), Ok(64));
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        assert!(matches!(
            parse_positive("n-sample", "10x"),
            Err(ConfigError::TrailingGarbage { trailing, .. }) if trailing == "x"
        ));
    }

    #[test]
    fn zero_and_empty_are_rejected() {
        assert!(matches!(
            parse_positive("n-sample", "0"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_positive("n-sample", ""),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
