//! Session orchestrator: one patient episode plus its evaluation history.
//!
//! Owns what the presentation layer used to keep as ambient session state:
//! the current patient and the append-only list of evaluations. Single
//! clinician, single thread; callers sharing a session across threads must
//! serialize access themselves, because the drip-flag read/write inside
//! evaluation is not atomic.

use crate::models::{DerivedSnapshot, Evaluation, LabPanel, Patient, Recommendation};
use crate::protocol::{classify_severity, Engine};
use crate::DkaError;

/// One clinical episode: the patient record, the engine, and every
/// evaluation performed so far.
#[derive(Debug)]
pub struct DkaSession {
    patient: Patient,
    engine: Engine,
    history: Vec<Evaluation>,
}

impl DkaSession {
    /// Start a session for a newly created patient.
    pub fn new(patient: Patient) -> Self {
        Self {
            patient,
            engine: Engine::new(),
            history: Vec::new(),
        }
    }

    /// Submit one lab panel: record it, derive the anion gap, classify
    /// severity on the first panel, run the protocol, and append the typed
    /// [`Evaluation`] to the history.
    pub fn submit_panel(&mut self, panel: LabPanel) -> Result<Evaluation, DkaError> {
        let recorded_at = self.patient.record_lab_panel(&panel)?;
        let (_, anion_gap) = self.patient.compute_anion_gap(
            panel.sodium,
            panel.potassium,
            panel.chloride,
            panel.bicarbonate,
        );

        // Severity is fixed at admission; the first panel's pH decides it.
        let severity = match self.patient.admission_severity() {
            Some(severity) => severity,
            None => {
                let severity = classify_severity(panel.ph);
                self.patient.set_admission_severity(severity);
                severity
            }
        };

        let recommendations = self.engine.evaluate(&mut self.patient)?;

        let corrected_sodium = if matches!(
            recommendations.first(),
            Some(Recommendation::DkaResolved)
        ) {
            None
        } else {
            self.patient.latest_corrected_sodium().map(|o| o.value)
        };

        let evaluation = Evaluation {
            evaluated_at: recorded_at,
            panel,
            severity,
            derived: DerivedSnapshot {
                anion_gap,
                corrected_sodium,
            },
            recommendations,
        };
        self.history.push(evaluation.clone());
        Ok(evaluation)
    }

    /// The patient under treatment.
    pub fn patient(&self) -> &Patient {
        &self.patient
    }

    /// Every evaluation so far, oldest first.
    pub fn history(&self) -> &[Evaluation] {
        &self.history
    }

    /// Whether the most recent evaluation declared the DKA resolved.
    pub fn is_resolved(&self) -> bool {
        self.history.last().is_some_and(|e| e.is_resolved())
    }
}
