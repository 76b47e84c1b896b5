//! Patient record: demographics plus append-only timestamped lab series.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::evaluation::DkaSeverity;
use super::labs::{ElectrolyteReading, LabPanel, Observation, ValidationError, ValidationResult};

/// Upper bound on patient age accepted at creation.
pub const MAX_AGE_YEARS: u32 = 120;

/// Corrected-sodium slope: mmol/L of sodium per mg/dL of glucose above the
/// reference value (additive Katz correction).
pub const SODIUM_CORRECTION_FACTOR: f64 = 0.016;

/// Glucose reference point for the sodium correction (mg/dL).
pub const GLUCOSE_REFERENCE_MG_DL: f64 = 100.0;

/// Patient gender as captured on the intake form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// A patient under DKA treatment for one clinical episode.
///
/// The series only grow: entries are never mutated, reordered, or removed,
/// and every timestamp is generated at append time, clamped so the sequence
/// is monotonically non-decreasing. "Latest" of any series is its last
/// element, or `None` while the series is still empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Opaque unique ID, generated at creation
    pub patient_id: String,
    /// Patient name
    pub name: String,
    /// Age in years (0-120)
    pub age: u32,
    /// Weight in kg (used for insulin dosing by the clinician)
    pub weight_kg: f64,
    /// Gender
    pub gender: Gender,
    /// Severity classified from the admission panel; fixed thereafter
    admission_severity: Option<DkaSeverity>,
    /// Whether a continuous insulin infusion has been started
    insulin_drip_active: bool,
    electrolytes: Vec<ElectrolyteReading>,
    glucose_levels: Vec<Observation>,
    ph_levels: Vec<Observation>,
    anion_gap: Vec<Observation>,
    corrected_sodium: Vec<Observation>,
    /// High-water mark for timestamp generation
    last_stamp: DateTime<Utc>,
}

impl Patient {
    /// Create a new patient with validated demographics.
    pub fn new(name: String, age: u32, weight_kg: f64, gender: Gender) -> ValidationResult<Self> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if age > MAX_AGE_YEARS {
            return Err(ValidationError::AgeOutOfRange(age));
        }
        if !weight_kg.is_finite() || weight_kg <= 0.0 {
            return Err(ValidationError::InvalidWeight(weight_kg));
        }

        Ok(Self {
            patient_id: uuid::Uuid::new_v4().to_string(),
            name,
            age,
            weight_kg,
            gender,
            admission_severity: None,
            insulin_drip_active: false,
            electrolytes: Vec::new(),
            glucose_levels: Vec::new(),
            ph_levels: Vec::new(),
            anion_gap: Vec::new(),
            corrected_sodium: Vec::new(),
            last_stamp: Utc::now(),
        })
    }

    /// Record one lab panel atomically under a single timestamp.
    ///
    /// The panel is validated in full before anything is appended, so a bad
    /// value never leaves a partial panel behind.
    pub fn record_lab_panel(&mut self, panel: &LabPanel) -> ValidationResult<DateTime<Utc>> {
        panel.validate()?;
        let at = self.next_timestamp();
        self.electrolytes.push(ElectrolyteReading {
            at,
            sodium: panel.sodium,
            potassium: panel.potassium,
            chloride: panel.chloride,
            bicarbonate: panel.bicarbonate,
        });
        self.ph_levels.push(Observation {
            at,
            value: panel.ph,
        });
        self.glucose_levels.push(Observation {
            at,
            value: panel.glucose,
        });
        Ok(at)
    }

    /// Anion gap formula: `(Na + K) - (Cl + HCO3)`. Pure arithmetic.
    pub fn anion_gap_value(sodium: f64, potassium: f64, chloride: f64, bicarbonate: f64) -> f64 {
        (sodium + potassium) - (chloride + bicarbonate)
    }

    /// Compute the anion gap from the given values and append it to the
    /// derived series. The primary series are untouched.
    pub fn compute_anion_gap(
        &mut self,
        sodium: f64,
        potassium: f64,
        chloride: f64,
        bicarbonate: f64,
    ) -> (DateTime<Utc>, f64) {
        let value = Self::anion_gap_value(sodium, potassium, chloride, bicarbonate);
        let at = self.next_timestamp();
        self.anion_gap.push(Observation { at, value });
        (at, value)
    }

    /// Corrected sodium formula: `Na + 0.016 * (glucose - 100)`.
    pub fn corrected_sodium_value(sodium: f64, glucose: f64) -> f64 {
        sodium + SODIUM_CORRECTION_FACTOR * (glucose - GLUCOSE_REFERENCE_MG_DL)
    }

    /// Compute corrected sodium and append it to the derived series.
    ///
    /// Unlike [`compute_anion_gap`](Self::compute_anion_gap), the most
    /// recently recorded electrolytes and glucose win over the passed
    /// arguments; the arguments only apply while the corresponding series is
    /// still empty. This mirrors the protocol's worksheet, which always
    /// corrects the current chart values.
    pub fn compute_corrected_sodium(
        &mut self,
        sodium: f64,
        glucose: f64,
    ) -> (DateTime<Utc>, f64) {
        let sodium = self.latest_electrolytes().map_or(sodium, |e| e.sodium);
        let glucose = self.latest_glucose().map_or(glucose, |g| g.value);
        let value = Self::corrected_sodium_value(sodium, glucose);
        let at = self.next_timestamp();
        self.corrected_sodium.push(Observation { at, value });
        (at, value)
    }

    /// Latest electrolyte draw, or `None` before the first panel.
    pub fn latest_electrolytes(&self) -> Option<&ElectrolyteReading> {
        self.electrolytes.last()
    }

    /// Latest glucose reading.
    pub fn latest_glucose(&self) -> Option<&Observation> {
        self.glucose_levels.last()
    }

    /// Latest pH reading.
    pub fn latest_ph(&self) -> Option<&Observation> {
        self.ph_levels.last()
    }

    /// Latest computed anion gap.
    pub fn latest_anion_gap(&self) -> Option<&Observation> {
        self.anion_gap.last()
    }

    /// Latest computed corrected sodium.
    pub fn latest_corrected_sodium(&self) -> Option<&Observation> {
        self.corrected_sodium.last()
    }

    /// Full electrolyte history, oldest first.
    pub fn electrolytes(&self) -> &[ElectrolyteReading] {
        &self.electrolytes
    }

    /// Full glucose history, oldest first.
    pub fn glucose_levels(&self) -> &[Observation] {
        &self.glucose_levels
    }

    /// Full pH history, oldest first.
    pub fn ph_levels(&self) -> &[Observation] {
        &self.ph_levels
    }

    /// Full anion gap history, oldest first.
    pub fn anion_gap(&self) -> &[Observation] {
        &self.anion_gap
    }

    /// Full corrected sodium history, oldest first.
    pub fn corrected_sodium(&self) -> &[Observation] {
        &self.corrected_sodium
    }

    /// Set the insulin drip flag. Idempotent.
    pub fn set_insulin_drip(&mut self, active: bool) {
        self.insulin_drip_active = active;
    }

    /// Whether a continuous insulin infusion is running.
    pub fn insulin_drip_active(&self) -> bool {
        self.insulin_drip_active
    }

    /// Severity classified at admission, if the patient has been admitted.
    pub fn admission_severity(&self) -> Option<DkaSeverity> {
        self.admission_severity
    }

    /// Fix the admission severity. The first classification wins; later
    /// calls are ignored because severity is not revisited after admission.
    pub fn set_admission_severity(&mut self, severity: DkaSeverity) {
        if self.admission_severity.is_none() {
            self.admission_severity = Some(severity);
        }
    }

    /// Next append timestamp, clamped so the sequence never goes backwards
    /// even if the wall clock does.
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let at = if now < self.last_stamp {
            self.last_stamp
        } else {
            now
        };
        self.last_stamp = at;
        at
    }
}
