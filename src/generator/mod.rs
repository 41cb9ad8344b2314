pub mod params;

use chrono::{Days, NaiveDate};
use rand::Rng;

use crate::checksum::control_digit;
use crate::decoder::{encode_in_range, Gender};
use crate::generator::params::GenerationParams;
use crate::observability::labels::{Labels, NO_LABEL};
use crate::stats::GeneratorMetrics;

/// Produces random valid PESEL numbers within a birth date range and, optionally,
/// for a single gender.
///
/// The configuration is fixed at construction, so one generator can be shared
/// between threads.
pub struct Generator {
    gender: Option<Gender>,
    min_date: NaiveDate,
    max_date: NaiveDate,
    metrics: GeneratorMetrics,
}

impl Generator {
    pub fn new(params: &GenerationParams) -> Self {
        Self::with_labels(params, &NO_LABEL)
    }

    pub fn with_labels(params: &GenerationParams, labels: &Labels) -> Self {
        let (min_date, max_date) = params.date_range();
        Generator {
            gender: params.gender,
            min_date,
            max_date,
            metrics: GeneratorMetrics::new(labels),
        }
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    pub fn min_date(&self) -> NaiveDate {
        self.min_date
    }

    pub fn max_date(&self) -> NaiveDate {
        self.max_date
    }

    pub fn generate(&self) -> String {
        self.generate_with_rng(&mut rand::thread_rng())
    }

    pub fn generate_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let birth_date = self.random_birth_date(rng);

        let gender = match self.gender {
            Some(gender) => gender,
            None => Gender::random(rng),
        };

        let mut pesel = encode_in_range(birth_date);
        let mut digits: Vec<u32> = pesel.bytes().map(|b| u32::from(b - b'0')).collect();
        for _ in 0..3 {
            digits.push(rng.gen_range(0..10));
        }
        digits.push(gender.random_digit(rng));

        for digit in &digits[6..] {
            pesel.push(digit_char(*digit));
        }
        pesel.push(digit_char(control_digit(&digits)));

        self.metrics.record(gender);
        pesel
    }

    /// Uniform over the days of the inclusive range.
    fn random_birth_date<R: Rng + ?Sized>(&self, rng: &mut R) -> NaiveDate {
        let days = (self.max_date - self.min_date).num_days() as u64;
        let offset = rng.gen_range(0..=days);
        self.min_date
            .checked_add_days(Days::new(offset))
            .unwrap_or(self.max_date)
    }
}

/// Generates a single PESEL without keeping a [Generator] around.
pub fn generate(params: &GenerationParams) -> String {
    Generator::new(params).generate()
}

fn digit_char(digit: u32) -> char {
    char::from_digit(digit, 10).unwrap_or('0')
}
