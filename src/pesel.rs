use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decoder::{decode_birth_date, Gender};
use crate::validation::{assert_valid, PeselValidationError};

/// A validated PESEL number.
///
/// The layout is `YYMMDD ZZZ X Q`: the birth date with the century folded into the
/// month, three serial digits, a gender digit (odd for males, even for females) and
/// the control digit.
///
/// ```
/// use pesel::{Gender, Pesel};
///
/// let pesel = Pesel::new("92082683499").unwrap();
/// assert_eq!(pesel.gender(), Gender::Male);
/// assert_eq!(pesel.birth_date().to_string(), "1992-08-26");
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Pesel(String);

impl Pesel {
    pub fn new(pesel: &str) -> Result<Self, PeselValidationError> {
        assert_valid(pesel)?;
        Ok(Pesel(pesel.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn birth_date(&self) -> NaiveDate {
        // The date was checked on construction, this can only fail on a broken invariant.
        decode_birth_date(&self.0).unwrap_or(NaiveDate::MIN)
    }

    pub fn gender(&self) -> Gender {
        Gender::from_digit(self.gender_digit())
    }

    /// The first 6 digits (YYMMDD, month carrying the century offset) as a number.
    pub fn birth_date_digits(&self) -> u32 {
        self.number(0..6)
    }

    pub fn serial_digits(&self) -> u32 {
        self.number(6..9)
    }

    pub fn gender_digit(&self) -> u32 {
        self.number(9..10)
    }

    pub fn control_digit(&self) -> u32 {
        self.number(10..11)
    }

    fn number(&self, range: std::ops::Range<usize>) -> u32 {
        self.0.as_bytes()[range]
            .iter()
            .fold(0, |acc, byte| acc * 10 + u32::from(byte - b'0'))
    }
}

impl FromStr for Pesel {
    type Err = PeselValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pesel::new(s)
    }
}

impl TryFrom<String> for Pesel {
    type Error = PeselValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        assert_valid(&value)?;
        Ok(Pesel(value))
    }
}

impl From<Pesel> for String {
    fn from(value: Pesel) -> String {
        value.0
    }
}

impl AsRef<str> for Pesel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pesel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_test::{assert_de_tokens_error, assert_tokens, Token};

    #[test]
    fn test_digit_groups() {
        let pesel = Pesel::new("74040152795").unwrap();

        assert_eq!(pesel.birth_date_digits(), 740401);
        assert_eq!(pesel.serial_digits(), 527);
        assert_eq!(pesel.gender_digit(), 9);
        assert_eq!(pesel.control_digit(), 5);
    }

    #[test]
    fn test_leading_zeros_in_digit_groups() {
        let pesel = Pesel::new("04242625931").unwrap();

        assert_eq!(pesel.birth_date_digits(), 42426);
        assert_eq!(pesel.serial_digits(), 259);
        assert_eq!(pesel.gender_digit(), 3);
        assert_eq!(pesel.control_digit(), 1);
        assert_eq!(pesel.birth_date(), NaiveDate::from_ymd_opt(2004, 4, 26).unwrap());
    }

    #[test]
    fn test_decoded_values() {
        let pesel: Pesel = "58883175997".parse().unwrap();
        assert_eq!(pesel.birth_date(), NaiveDate::from_ymd_opt(1858, 8, 31).unwrap());
        assert_eq!(pesel.gender(), Gender::Male);

        let pesel: Pesel = "78010469227".parse().unwrap();
        assert_eq!(pesel.gender(), Gender::Female);
        assert_eq!(pesel.to_string(), "78010469227");
        assert_eq!(AsRef::<str>::as_ref(&pesel), pesel.as_str());
    }

    #[test]
    fn test_invalid_pesels_are_rejected() {
        let invalid = vec![
            ("string", PeselValidationError::InvalidLength),
            ("85122496612s", PeselValidationError::InvalidLength),
            ("8512249661S", PeselValidationError::InvalidCharacters),
            ("00000000000", PeselValidationError::InvalidBirthDate),
            ("11111111111", PeselValidationError::InvalidChecksum),
            ("01016000019", PeselValidationError::InvalidBirthDate),
        ];
        for (input, expected) in invalid {
            assert_eq!(Pesel::new(input), Err(expected), "{input}");
            assert_eq!(Pesel::try_from(input.to_string()), Err(expected));
        }
    }

    #[test]
    fn test_serde_as_string() {
        let pesel = Pesel::new("68060266493").unwrap();
        assert_tokens(&pesel, &[Token::Str("68060266493")]);
        assert_de_tokens_error::<Pesel>(
            &[Token::Str("68060266490")],
            "PESEL control digit is invalid",
        );
    }
}
