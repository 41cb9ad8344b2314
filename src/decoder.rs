use chrono::{Datelike, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use thiserror::Error;

use crate::checksum::parse_digits;

/// First birth date a PESEL can encode.
pub const MIN_BIRTH_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1800, 1, 1) {
    Some(date) => date,
    None => panic!("invalid minimum birth date"),
};

/// Last birth date a PESEL can encode.
pub const MAX_BIRTH_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2299, 12, 31) {
    Some(date) => date,
    None => panic!("invalid maximum birth date"),
};

#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Odd digits belong to males, even digits to females.
    pub fn from_digit(digit: u32) -> Self {
        if digit % 2 == 0 {
            Gender::Female
        } else {
            Gender::Male
        }
    }

    /// Draws one of the five digits with this gender's parity.
    pub fn random_digit<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        let parity = match self {
            Gender::Female => 0,
            Gender::Male => 1,
        };
        rng.gen_range(0..5) * 2 + parity
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Gender::Female
        } else {
            Gender::Male
        }
    }
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("A PESEL must be exactly 11 ASCII digits")]
    Malformed,

    #[error("Encoded birth date {year:04}-{month:02}-{day:02} is not a calendar date")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("Birth date {0} is outside of the range a PESEL can encode")]
    OutOfRange(NaiveDate),
}

/// Decodes the birth date stored in the first 6 digits.
///
/// The century lives in the month field: 1-12 is the 1900s, and every block of 20
/// above it moves the century (20 -> 2000s, 40 -> 2100s, 60 -> 2200s, 80 -> 1800s).
pub fn decode_birth_date(pesel: &str) -> Result<NaiveDate, DecodeError> {
    let digits = parse_digits(pesel).ok_or(DecodeError::Malformed)?;

    let short_year = (digits[0] * 10 + digits[1]) as i32;
    let raw_month = digits[2] * 10 + digits[3];
    let day = digits[4] * 10 + digits[5];

    let century = match raw_month / 20 {
        0 => 1900,
        1 => 2000,
        2 => 2100,
        3 => 2200,
        _ => 1800,
    };
    let year = century + short_year;
    let month = raw_month % 20;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(DecodeError::InvalidDate { year, month, day })
}

/// Decodes the gender from the 10th digit. Any digit is a valid gender digit.
pub fn decode_gender(pesel: &str) -> Result<Gender, DecodeError> {
    let digits = parse_digits(pesel).ok_or(DecodeError::Malformed)?;
    Ok(Gender::from_digit(digits[9]))
}

/// Encodes a birth date into the 6 digit YYMMDD field, with the century folded into
/// the month.
pub fn encode_birth_date(date: NaiveDate) -> Result<String, DecodeError> {
    if date < MIN_BIRTH_DATE || date > MAX_BIRTH_DATE {
        return Err(DecodeError::OutOfRange(date));
    }
    Ok(encode_in_range(date))
}

/// Callers guarantee `date` is within [MIN_BIRTH_DATE, MAX_BIRTH_DATE].
pub(crate) fn encode_in_range(date: NaiveDate) -> String {
    let year = date.year();
    let month_offset = match year / 100 {
        18 => 80,
        20 => 20,
        21 => 40,
        22 => 60,
        _ => 0,
    };
    format!(
        "{:02}{:02}{:02}",
        year % 100,
        date.month() + month_offset,
        date.day()
    )
}
