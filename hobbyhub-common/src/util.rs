use thiserror::Error;
use time::{
    OffsetDateTime, PrimitiveDateTime, UtcDateTime,
    format_description::well_known::{Iso8601, Rfc3339},
};

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("The timestamp could not be parsed: {0}")]
pub struct InvalidTimestampError(String);

/// Parses a `created_at` column. Offset-less values are taken to be UTC.
pub fn parse_timestamp(value: &str) -> Result<UtcDateTime, InvalidTimestampError> {
    if let Ok(with_offset) = OffsetDateTime::parse(value, &Rfc3339) {
        return Ok(UtcDateTime::from(with_offset));
    }

    PrimitiveDateTime::parse(value, &Iso8601::DEFAULT)
        .map(PrimitiveDateTime::as_utc)
        .map_err(|_| InvalidTimestampError(value.to_owned()))
}

/// Trims a form field, mapping an empty result to `None`.
#[must_use]
pub fn trimmed_or_none(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use crate::util::{parse_timestamp, trimmed_or_none};
    use time::macros::utc_datetime;

    #[test]
    fn timestamps_with_and_without_offset() {
        assert_eq!(
            parse_timestamp("2024-05-01T12:34:56+00:00").unwrap(),
            utc_datetime!(2024-05-01 12:34:56)
        );
        assert_eq!(
            parse_timestamp("2024-05-01T14:34:56+02:00").unwrap(),
            utc_datetime!(2024-05-01 12:34:56)
        );
        assert_eq!(
            parse_timestamp("2024-05-01T12:34:56.5").unwrap(),
            utc_datetime!(2024-05-01 12:34:56.5)
        );
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn blank_fields_become_none() {
        assert_eq!(trimmed_or_none(""), None);
        assert_eq!(trimmed_or_none("  "), None);
        assert_eq!(trimmed_or_none(" x "), Some("x".to_owned()));
    }
}
