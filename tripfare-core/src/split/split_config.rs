use serde::{Deserialize, Serialize};

use crate::PreprocessError;

/// controls the two-stage train/validation/test split.
///
/// `test_fraction` is taken from the validation pool and not from the whole
/// dataset, so the final proportions are:
///   - train:      1 - val_fraction
///   - validation: val_fraction * (1 - test_fraction)
///   - test:       val_fraction * test_fraction
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct SplitConfig {
    #[serde(default = "default_val_fraction")]
    pub val_fraction: f64,
    #[serde(default = "default_test_fraction")]
    pub test_fraction: f64,
    /// shared by both split stages
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            val_fraction: default_val_fraction(),
            test_fraction: default_test_fraction(),
            seed: default_seed(),
        }
    }
}

impl SplitConfig {
    pub fn validate(&self) -> Result<(), PreprocessError> {
        for (name, value) in [
            ("val_fraction", self.val_fraction),
            ("test_fraction", self.test_fraction),
        ] {
            if !(0.0..1.0).contains(&value) {
                return Err(PreprocessError::InvalidConfiguration(format!(
                    "{name} must be in range [0, 1), found {value}"
                )));
            }
        }
        Ok(())
    }
}

fn default_val_fraction() -> f64 {
    0.2
}

fn default_test_fraction() -> f64 {
    0.05
}

fn default_seed() -> u64 {
    42
}
