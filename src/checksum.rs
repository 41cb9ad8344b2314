pub const PESEL_LENGTH: usize = 11;

const MULTIPLIERS: [u32; 10] = [1, 3, 7, 9, 1, 3, 7, 9, 1, 3];

pub trait Validator: Send + Sync {
    fn is_valid_match(&self, input: &str) -> bool;
}

/// Checks only the length, the digits and the control digit of a PESEL.
pub struct PeselChecksum;

impl Validator for PeselChecksum {
    fn is_valid_match(&self, input: &str) -> bool {
        match parse_digits(input) {
            Some(digits) => digits[10] == control_digit(&digits[..10]),
            None => false,
        }
    }
}

/// Converts an 11 character ASCII digit string into its digit values.
pub(crate) fn parse_digits(input: &str) -> Option<[u32; PESEL_LENGTH]> {
    if input.len() != PESEL_LENGTH {
        return None;
    }
    let mut digits = [0; PESEL_LENGTH];
    for (slot, byte) in digits.iter_mut().zip(input.bytes()) {
        if !byte.is_ascii_digit() {
            return None;
        }
        *slot = u32::from(byte - b'0');
    }
    Some(digits)
}

/// Computes the control digit from the first 10 digits of a PESEL.
///
/// Each weighted product contributes only its last decimal digit to the sum.
/// Extra trailing digits are ignored.
pub fn control_digit(digits: &[u32]) -> u32 {
    let sum: u32 = digits
        .iter()
        .zip(MULTIPLIERS.iter())
        .map(|(digit, weight)| (digit * weight) % 10)
        .sum();

    // the control digit is the last digit of (10 - last digit of the sum)
    (10 - (sum % 10)) % 10
}
