use metrics::{counter, Counter};

use crate::decoder::Gender;
use crate::observability::labels::Labels;
use crate::validation::PeselValidationError;

const GENDER: &str = "gender";
const RESULT: &str = "result";

pub struct GeneratorMetrics {
    generated_male: Counter,
    generated_female: Counter,
}

impl GeneratorMetrics {
    pub fn new(labels: &Labels) -> Self {
        GeneratorMetrics {
            generated_male: counter!(
                "pesel.generated",
                labels.clone_with_labels(&[(GENDER, Gender::Male.to_string())])
            ),
            generated_female: counter!(
                "pesel.generated",
                labels.clone_with_labels(&[(GENDER, Gender::Female.to_string())])
            ),
        }
    }

    pub fn record(&self, gender: Gender) {
        match gender {
            Gender::Male => self.generated_male.increment(1),
            Gender::Female => self.generated_female.increment(1),
        }
    }
}

/// Counts one validation, tagged with `valid` or the kind of failure.
pub fn record_validation(result: &Result<(), PeselValidationError>) {
    let outcome: &'static str = match result {
        Ok(()) => "valid",
        Err(err) => err.into(),
    };
    counter!("pesel.validations", RESULT => outcome).increment(1);
}
