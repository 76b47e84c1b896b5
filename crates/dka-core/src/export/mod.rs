//! Flowsheet export of a session's evaluation history.
//!
//! The presentation layer renders history tables itself; this module gives
//! it the same data as machine-readable JSON or a one-row-per-evaluation
//! CSV flowsheet.

use serde::{Deserialize, Serialize};

use crate::models::{DkaSeverity, Evaluation};
use crate::session::DkaSession;

/// Exportable view of one treatment episode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowsheetExport {
    /// Patient ID
    pub patient_id: String,
    /// Patient name
    pub patient_name: String,
    /// Severity classified at admission, if any panel was submitted
    pub admission_severity: Option<DkaSeverity>,
    /// Export timestamp (RFC 3339)
    pub exported_at: String,
    /// Every evaluation, oldest first
    pub evaluations: Vec<Evaluation>,
}

impl FlowsheetExport {
    /// Snapshot the session's history for export.
    pub fn from_session(session: &DkaSession) -> Self {
        Self {
            patient_id: session.patient().patient_id.clone(),
            patient_name: session.patient().name.clone(),
            admission_severity: session.patient().admission_severity(),
            exported_at: chrono::Utc::now().to_rfc3339(),
            evaluations: session.history().to_vec(),
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV, one row per evaluation.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        csv.push_str(
            "time,sodium,potassium,chloride,bicarbonate,ph,glucose,anion_gap,corrected_sodium,severity,recommendations\n",
        );

        for evaluation in &self.evaluations {
            let corrected = evaluation
                .derived
                .corrected_sodium
                .map(|v| v.to_string())
                .unwrap_or_default();
            let recommendations = evaluation.recommendation_texts().join("; ");
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{},{},{},{}\n",
                evaluation.evaluated_at.to_rfc3339(),
                evaluation.panel.sodium,
                evaluation.panel.potassium,
                evaluation.panel.chloride,
                evaluation.panel.bicarbonate,
                evaluation.panel.ph,
                evaluation.panel.glucose,
                evaluation.derived.anion_gap,
                corrected,
                escape_csv(evaluation.severity.label()),
                escape_csv(&recommendations),
            ));
        }

        csv
    }
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, LabPanel, Patient};

    fn session_with_one_panel() -> DkaSession {
        let patient = Patient::new("John Doe".into(), 45, 70.0, Gender::Male).unwrap();
        let mut session = DkaSession::new(patient);
        session
            .submit_panel(LabPanel {
                sodium: 140.0,
                potassium: 4.0,
                chloride: 100.0,
                bicarbonate: 22.0,
                ph: 7.3,
                glucose: 100.0,
            })
            .unwrap();
        session
    }

    #[test]
    fn test_json_round_trips() {
        let export = FlowsheetExport::from_session(&session_with_one_panel());
        let json = export.to_json().unwrap();
        let parsed: FlowsheetExport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.patient_name, "John Doe");
        assert_eq!(parsed.evaluations.len(), 1);
        assert_eq!(parsed.evaluations[0].derived.anion_gap, 22.0);
    }

    #[test]
    fn test_csv_has_header_and_one_row() {
        let export = FlowsheetExport::from_session(&session_with_one_panel());
        let csv = export.to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("time,sodium"));
        assert!(lines[1].contains(",22,")); // anion gap column
        // The joined recommendations contain no comma, so no quoting.
        assert!(lines[1].contains("Start insulin drip at 0.1 units/kg/hr; "));
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
