use strum::IntoStaticStr;
use thiserror::Error;

use crate::checksum::{PeselChecksum, Validator, PESEL_LENGTH};
use crate::decoder::decode_birth_date;
use crate::stats::record_validation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum PeselValidationError {
    #[error("PESEL cannot be null")]
    Missing,

    #[error("PESEL length is invalid, should be 11 digits")]
    InvalidLength,

    #[error("PESEL contains invalid characters, should contain only digits 0-9")]
    InvalidCharacters,

    #[error("PESEL control digit is invalid")]
    InvalidChecksum,

    #[error("PESEL birth date is invalid")]
    InvalidBirthDate,
}

impl PeselValidationError {
    /// Length and character failures, as opposed to checksum or date failures.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            PeselValidationError::InvalidLength | PeselValidationError::InvalidCharacters
        )
    }
}

/// Checks a PESEL, returning the first failed check: length, characters, control
/// digit, then birth date.
pub fn assert_valid(pesel: &str) -> Result<(), PeselValidationError> {
    let result = check(pesel);
    record_validation(&result);
    result
}

/// Same as [assert_valid], for input that may be absent.
pub fn assert_valid_optional(pesel: Option<&str>) -> Result<(), PeselValidationError> {
    match pesel {
        Some(pesel) => assert_valid(pesel),
        None => {
            let result = Err(PeselValidationError::Missing);
            record_validation(&result);
            result
        }
    }
}

pub fn is_valid(pesel: &str) -> bool {
    assert_valid(pesel).is_ok()
}

pub fn is_valid_optional(pesel: Option<&str>) -> bool {
    assert_valid_optional(pesel).is_ok()
}

fn check(pesel: &str) -> Result<(), PeselValidationError> {
    if pesel.chars().count() != PESEL_LENGTH {
        return Err(PeselValidationError::InvalidLength);
    }
    if !pesel.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PeselValidationError::InvalidCharacters);
    }
    if !PeselChecksum.is_valid_match(pesel) {
        return Err(PeselValidationError::InvalidChecksum);
    }
    decode_birth_date(pesel).map_err(|_| PeselValidationError::InvalidBirthDate)?;
    Ok(())
}

#[cfg(test)]
mod test {
    use crate::validation::{
        assert_valid, assert_valid_optional, is_valid, is_valid_optional, PeselValidationError,
    };
    use metrics::{Key, Label};
    use metrics_util::debugging::{DebugValue, DebuggingRecorder};
    use metrics_util::CompositeKey;
    use metrics_util::MetricKind::Counter;

    #[test]
    fn valid_pesels_pass() {
        for pesel in ["78010469227", "73673198930", "58883175997", "04242625931"] {
            assert!(is_valid(pesel), "{pesel}");
            assert_eq!(assert_valid(pesel), Ok(()));
        }
    }

    #[test]
    fn absent_input_is_reported_separately() {
        assert_eq!(
            assert_valid_optional(None),
            Err(PeselValidationError::Missing)
        );
        assert!(!is_valid_optional(None));
        assert!(is_valid_optional(Some("78010469227")));
        assert!(!PeselValidationError::Missing.is_format_error());
    }

    #[test]
    fn wrong_length_is_a_format_error() {
        for pesel in ["", "string", "85122496612s", "7801046922", "780104692277"] {
            let err = assert_valid(pesel).unwrap_err();
            assert_eq!(err, PeselValidationError::InvalidLength, "{pesel}");
            assert!(err.is_format_error());
        }
    }

    #[test]
    fn non_digits_are_a_format_error() {
        // length is measured in characters, so multibyte input reaches the character check
        for pesel in ["8512249661S", "7801046922 ", "-7801046922", "780104692é7"] {
            let err = assert_valid(pesel).unwrap_err();
            assert_eq!(err, PeselValidationError::InvalidCharacters, "{pesel}");
            assert!(err.is_format_error());
        }
    }

    #[test]
    fn checksum_is_checked_before_birth_date() {
        assert_eq!(
            assert_valid("78010469225"),
            Err(PeselValidationError::InvalidChecksum)
        );
        assert_eq!(
            assert_valid("11111111111"),
            Err(PeselValidationError::InvalidChecksum)
        );
        // raw month 14 and a bad checksum
        assert_eq!(
            assert_valid("12345678901"),
            Err(PeselValidationError::InvalidChecksum)
        );
    }

    #[test]
    fn impossible_birth_dates_fail() {
        for pesel in ["00000000000", "01016000019", "12345678903"] {
            assert_eq!(
                assert_valid(pesel),
                Err(PeselValidationError::InvalidBirthDate),
                "{pesel}"
            );
        }
    }

    #[test]
    fn flipping_the_control_digit_invalidates() {
        let valid = "68060266493";
        for digit in '0'..='9' {
            let mutated = format!("{}{}", &valid[..10], digit);
            assert_eq!(is_valid(&mutated), mutated == valid);
        }
    }

    #[test]
    fn should_submit_validation_metrics() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            assert!(is_valid("78010469227"));
            assert!(is_valid("74040152795"));
            assert!(!is_valid("78010469225"));
            assert!(!is_valid_optional(None));
        });

        let snapshot = snapshotter.snapshot().into_hashmap();
        let key = |result: &'static str| {
            CompositeKey::new(
                Counter,
                Key::from_parts("pesel.validations", vec![Label::new("result", result)]),
            )
        };

        let metric_value = snapshot.get(&key("valid")).expect("metric not found");
        assert_eq!(metric_value, &(None, None, DebugValue::Counter(2)));

        let metric_value = snapshot
            .get(&key("invalid_checksum"))
            .expect("metric not found");
        assert_eq!(metric_value, &(None, None, DebugValue::Counter(1)));

        let metric_value = snapshot.get(&key("missing")).expect("metric not found");
        assert_eq!(metric_value, &(None, None, DebugValue::Counter(1)));
    }
}
