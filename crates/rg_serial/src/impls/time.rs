use core::time::Duration;

use crate::info::{FieldKind, TypePath};
use crate::{DecodeError, Decoder, EncodeError, Encoder, Field};

impl TypePath for Duration {
    #[inline]
    fn type_path() -> &'static str {
        "core::time::Duration"
    }

    #[inline]
    fn type_name() -> &'static str {
        "Duration"
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Duration"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("core::time")
    }
}

const NANOS_DIGITS: usize = 9;

// `secs.nnnnnnnnn`, with exactly nine fractional digits.
fn parse_duration(literal: &str) -> Option<Duration> {
    let (secs, nanos) = literal.split_once('.')?;
    if nanos.len() != NANOS_DIGITS || !nanos.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(Duration::new(secs.parse().ok()?, nanos.parse().ok()?))
}

/// Written as whole seconds and nanoseconds, `secs.nnnnnnnnn`.
impl Field for Duration {
    #[inline]
    fn kind() -> FieldKind {
        FieldKind::Duration
    }

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.write_scalar(format_args!(
            "{}.{:09}",
            self.as_secs(),
            self.subsec_nanos()
        ));
        Ok(())
    }

    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        decoder.read_with("duration", parse_duration)
    }
}

#[cfg(feature = "chrono")]
mod chrono_impls {
    use chrono::{DateTime, SecondsFormat, Utc};

    use crate::info::{FieldKind, TypePath};
    use crate::{DecodeError, Decoder, EncodeError, Encoder, Field};

    impl TypePath for DateTime<Utc> {
        #[inline]
        fn type_path() -> &'static str {
            "chrono::DateTime<chrono::Utc>"
        }

        #[inline]
        fn type_name() -> &'static str {
            "DateTime<Utc>"
        }

        #[inline]
        fn type_ident() -> &'static str {
            "DateTime"
        }

        #[inline]
        fn module_path() -> Option<&'static str> {
            Some("chrono")
        }
    }

    /// Written as RFC 3339 in UTC, with as many fractional digits as needed.
    impl Field for DateTime<Utc> {
        #[inline]
        fn kind() -> FieldKind {
            FieldKind::DateTime
        }

        fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
            encoder.write_scalar(self.to_rfc3339_opts(SecondsFormat::AutoSi, true));
            Ok(())
        }

        fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
            decoder.read_with("datetime", |literal| {
                DateTime::parse_from_rfc3339(literal)
                    .ok()
                    .map(|time| time.with_timezone(&Utc))
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse_duration;
    use core::time::Duration;

    #[test]
    fn duration_literals() {
        assert_eq!(parse_duration("3.000000500"), Some(Duration::new(3, 500)));
        assert_eq!(parse_duration("0.999999999"), Some(Duration::new(0, 999_999_999)));
        assert_eq!(parse_duration("3.5"), None);
        assert_eq!(parse_duration("3"), None);
        assert_eq!(parse_duration("-1.000000000"), None);
        assert_eq!(parse_duration("1.+00000000"), None);
    }
}
