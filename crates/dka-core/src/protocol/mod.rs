//! Recommendation engine for the DKA treatment protocol.
//!
//! Pipeline per panel: Anion Gap Check → Insulin Drip → Corrected Sodium →
//! Fluid Order → Recheck
//!
//! The engine is stateless across calls; its only decision memory is the
//! patient's insulin-drip flag, which it reads and writes during step 2.

mod fluids;
mod severity;

pub use fluids::*;
pub use severity::*;

use thiserror::Error;

use crate::models::{Patient, Recommendation};

/// Anion gap below this means the ketoacidosis has cleared (mmol/L).
pub const ANION_GAP_RESOLVED_MMOL_L: f64 = 12.0;

/// Engine errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Missing data: no {0} recorded for this patient")]
    MissingData(&'static str),
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Stateless evaluator mapping the patient's latest derived state to an
/// ordered recommendation list.
#[derive(Debug, Default)]
pub struct Engine;

impl Engine {
    /// Create a new engine.
    pub fn new() -> Self {
        Self
    }

    /// Evaluate the patient's latest values against the protocol.
    ///
    /// Fails with [`ProtocolError::MissingData`] unless at least one panel
    /// has been recorded and its anion gap computed. Once the gap is below
    /// the resolution threshold the result is exactly `[DkaResolved]`;
    /// otherwise the list is the insulin-drip advisory (first unresolved
    /// evaluation only), one fluid order, and the one-hour recheck, in that
    /// order.
    pub fn evaluate(&self, patient: &mut Patient) -> ProtocolResult<Vec<Recommendation>> {
        let anion_gap = patient
            .latest_anion_gap()
            .ok_or(ProtocolError::MissingData("anion gap"))?
            .value;
        let electrolytes = *patient
            .latest_electrolytes()
            .ok_or(ProtocolError::MissingData("electrolytes"))?;
        let glucose = patient
            .latest_glucose()
            .ok_or(ProtocolError::MissingData("glucose"))?
            .value;

        let mut recommendations = Vec::new();

        if anion_gap < ANION_GAP_RESOLVED_MMOL_L {
            recommendations.push(Recommendation::DkaResolved);
            return Ok(recommendations);
        }

        if !patient.insulin_drip_active() {
            recommendations.push(Recommendation::StartInsulinDrip);
            patient.set_insulin_drip(true);
        }

        let (_, corrected_sodium) =
            patient.compute_corrected_sodium(electrolytes.sodium, glucose);
        recommendations.push(Recommendation::Fluids(select_fluid_order(
            glucose,
            corrected_sodium,
            electrolytes.potassium,
        )));
        recommendations.push(Recommendation::RecheckInOneHour);

        Ok(recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, LabPanel};

    fn admitted_patient(panel: &LabPanel) -> Patient {
        let mut patient = Patient::new("Jane Roe".into(), 60, 80.0, Gender::Female).unwrap();
        patient.record_lab_panel(panel).unwrap();
        patient.compute_anion_gap(
            panel.sodium,
            panel.potassium,
            panel.chloride,
            panel.bicarbonate,
        );
        patient
    }

    fn dka_panel() -> LabPanel {
        // Gap: (140 + 4) - (100 + 22) = 22
        LabPanel {
            sodium: 140.0,
            potassium: 4.0,
            chloride: 100.0,
            bicarbonate: 22.0,
            ph: 7.3,
            glucose: 100.0,
        }
    }

    #[test]
    fn test_evaluate_without_data_fails() {
        let engine = Engine::new();
        let mut patient = Patient::new("Empty".into(), 30, 60.0, Gender::Other).unwrap();
        assert_eq!(
            engine.evaluate(&mut patient),
            Err(ProtocolError::MissingData("anion gap"))
        );
    }

    #[test]
    fn test_resolved_returns_only_resolution() {
        let engine = Engine::new();
        // Gap: (138 + 4) - (106 + 28) = 8
        let panel = LabPanel {
            sodium: 138.0,
            potassium: 4.0,
            chloride: 106.0,
            bicarbonate: 28.0,
            ph: 7.38,
            glucose: 110.0,
        };
        let mut patient = admitted_patient(&panel);

        let recommendations = engine.evaluate(&mut patient).unwrap();
        assert_eq!(recommendations, vec![Recommendation::DkaResolved]);
        // Early return: the correction step never ran.
        assert!(patient.latest_corrected_sodium().is_none());
        assert!(!patient.insulin_drip_active());
    }

    #[test]
    fn test_unresolved_starts_drip_once() {
        let engine = Engine::new();
        let mut patient = admitted_patient(&dka_panel());

        let first = engine.evaluate(&mut patient).unwrap();
        assert_eq!(first[0], Recommendation::StartInsulinDrip);
        assert!(patient.insulin_drip_active());

        // Same gap next round: fluids and recheck only.
        let second = engine.evaluate(&mut patient).unwrap();
        assert!(!second.contains(&Recommendation::StartInsulinDrip));
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn test_unresolved_ends_with_recheck() {
        let engine = Engine::new();
        let mut patient = admitted_patient(&dka_panel());
        let recommendations = engine.evaluate(&mut patient).unwrap();
        assert_eq!(
            recommendations.last(),
            Some(&Recommendation::RecheckInOneHour)
        );
    }

    #[test]
    fn test_gap_of_exactly_twelve_stays_active() {
        let engine = Engine::new();
        // Gap: (140 + 4) - (104 + 28) = 12
        let panel = LabPanel {
            sodium: 140.0,
            potassium: 4.0,
            chloride: 104.0,
            bicarbonate: 28.0,
            ph: 7.3,
            glucose: 100.0,
        };
        let mut patient = admitted_patient(&panel);
        let recommendations = engine.evaluate(&mut patient).unwrap();
        assert_eq!(recommendations[0], Recommendation::StartInsulinDrip);
    }
}
