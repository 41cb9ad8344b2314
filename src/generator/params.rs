use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decoder::{Gender, MAX_BIRTH_DATE, MIN_BIRTH_DATE};

/// What a [crate::Generator] is allowed to produce. Every field is optional.
///
/// Dates outside of 1800-01-01..=2299-12-31 are clamped into that range and an
/// inverted range is swapped when the generator is built, so any combination of
/// values is accepted.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationParams {
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub min_date: Option<NaiveDate>,
    #[serde(default)]
    pub max_date: Option<NaiveDate>,
}

impl GenerationParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gender(&self, gender: Gender) -> Self {
        self.mutate_clone(|x| x.gender = Some(gender))
    }

    pub fn min_date(&self, min_date: NaiveDate) -> Self {
        self.mutate_clone(|x| x.min_date = Some(min_date))
    }

    pub fn max_date(&self, max_date: NaiveDate) -> Self {
        self.mutate_clone(|x| x.max_date = Some(max_date))
    }

    /// The inclusive birth date range to draw from: defaulted, clamped, then ordered.
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        let min = clamp(self.min_date.unwrap_or(MIN_BIRTH_DATE));
        let max = clamp(self.max_date.unwrap_or(MAX_BIRTH_DATE));
        if min > max {
            (max, min)
        } else {
            (min, max)
        }
    }

    fn mutate_clone(&self, modify: impl FnOnce(&mut Self)) -> Self {
        let mut clone = self.clone();
        modify(&mut clone);
        clone
    }
}

fn clamp(date: NaiveDate) -> NaiveDate {
    date.clamp(MIN_BIRTH_DATE, MAX_BIRTH_DATE)
}
