//! Lab panel input and timestamped series entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for submitted values.
///
/// A rejected value blocks the whole panel; nothing is persisted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} is not a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} is outside the representable range: {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("Patient name must not be empty")]
    EmptyName,

    #[error("Age is outside 0-120: {0}")]
    AgeOutOfRange(u32),

    #[error("Weight must be positive: {0} kg")]
    InvalidWeight(f64),
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// One lab draw: all six values arrive together and are appended atomically.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LabPanel {
    /// Sodium (mmol/L)
    pub sodium: f64,
    /// Potassium (mmol/L)
    pub potassium: f64,
    /// Chloride (mmol/L)
    pub chloride: f64,
    /// Bicarbonate (mmol/L)
    pub bicarbonate: f64,
    /// Blood pH (unitless; the input form constrains the clinical range)
    pub ph: f64,
    /// Glucose (mg/dL)
    pub glucose: f64,
}

impl LabPanel {
    /// Validate the whole panel before anything is stored.
    ///
    /// The core only rejects physiologically impossible numbers (NaN,
    /// infinities, non-positive electrolytes, negative glucose). Clinical
    /// display ranges are the input form's concern.
    pub fn validate(&self) -> ValidationResult<()> {
        require_positive("sodium", self.sodium)?;
        require_positive("potassium", self.potassium)?;
        require_positive("chloride", self.chloride)?;
        require_positive("bicarbonate", self.bicarbonate)?;
        require_positive("pH", self.ph)?;
        require_finite("glucose", self.glucose)?;
        if self.glucose < 0.0 {
            return Err(ValidationError::OutOfRange {
                field: "glucose",
                value: self.glucose,
            });
        }
        Ok(())
    }
}

fn require_finite(field: &'static str, value: f64) -> ValidationResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite { field })
    }
}

fn require_positive(field: &'static str, value: f64) -> ValidationResult<()> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange { field, value })
    }
}

/// One electrolyte draw stored on the patient record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ElectrolyteReading {
    /// When the panel was recorded
    pub at: DateTime<Utc>,
    /// Sodium (mmol/L)
    pub sodium: f64,
    /// Potassium (mmol/L)
    pub potassium: f64,
    /// Chloride (mmol/L)
    pub chloride: f64,
    /// Bicarbonate (mmol/L)
    pub bicarbonate: f64,
}

/// A single timestamped value in a scalar series (glucose, pH, anion gap,
/// corrected sodium).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    /// When the value was recorded or computed
    pub at: DateTime<Utc>,
    pub value: f64,
}
