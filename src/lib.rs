// This blocks accidental use of `println`. If one is actually needed, you can
// override with `#[allow(clippy::print_stdout)]`.
#![deny(clippy::print_stdout)]

mod checksum;
mod decoder;
mod generator;
mod observability;
mod pesel;
mod stats;
mod validation;

// This is the public API of the PESEL library
pub use checksum::{control_digit, PeselChecksum, Validator, PESEL_LENGTH};
pub use decoder::{
    decode_birth_date, decode_gender, encode_birth_date, DecodeError, Gender, MAX_BIRTH_DATE,
    MIN_BIRTH_DATE,
};
pub use generator::params::GenerationParams;
pub use generator::{generate, Generator};
pub use observability::labels::Labels;
pub use pesel::Pesel;
pub use validation::{
    assert_valid, assert_valid_optional, is_valid, is_valid_optional, PeselValidationError,
};
