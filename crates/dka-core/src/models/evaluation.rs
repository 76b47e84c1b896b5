//! Severity classification, recommendations, and the evaluation record.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::labs::LabPanel;

/// DKA severity classified from the admission pH.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DkaSeverity {
    Severe,
    MildModerate,
    Mild,
}

impl DkaSeverity {
    /// Clinician-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            DkaSeverity::Severe => "Severe DKA",
            DkaSeverity::MildModerate => "Mild to Moderate DKA",
            DkaSeverity::Mild => "Mild DKA",
        }
    }
}

impl fmt::Display for DkaSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Saline strength of an IV fluid order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Tonicity {
    /// Normal saline ("NS")
    Isotonic,
    /// Half-normal saline ("0.45 NS")
    HalfNormal,
}

/// Structured IV fluid order selected by the protocol's decision table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FluidOrder {
    /// Add dextrose (D5) once glucose is below the high threshold
    pub dextrose: bool,
    /// Saline strength from the corrected-sodium axis
    pub tonicity: Tonicity,
    /// Add 20 meq KCl when potassium is not above 4 mmol/L
    pub kcl: bool,
}

impl FluidOrder {
    /// Render the order exactly as the protocol sheet words it.
    pub fn text(&self) -> String {
        let mut out = String::from("Run IV fluids ");
        if self.dextrose {
            out.push_str("D5 ");
        }
        match self.tonicity {
            Tonicity::HalfNormal => out.push_str("0.45 NS"),
            Tonicity::Isotonic => out.push_str("NS"),
        }
        if self.kcl {
            out.push_str(" w 20 meq KCl");
        }
        out.push_str(" @ 250 cc / hr");
        out
    }
}

impl fmt::Display for FluidOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// One advisory produced by an evaluation: a tagged kind plus its rendered
/// text, so the presentation layer can format without string-matching.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Recommendation {
    /// Anion gap closed; the episode is over
    DkaResolved,
    /// Begin the continuous insulin infusion (emitted at most once)
    StartInsulinDrip,
    /// The fluid order selected this round
    Fluids(FluidOrder),
    /// Standing instruction to redraw labs in an hour
    RecheckInOneHour,
}

impl Recommendation {
    /// Clinician-facing text for this recommendation.
    pub fn text(&self) -> String {
        match self {
            Recommendation::DkaResolved => "DKA Resolved".into(),
            Recommendation::StartInsulinDrip => "Start insulin drip at 0.1 units/kg/hr".into(),
            Recommendation::Fluids(order) => order.text(),
            Recommendation::RecheckInOneHour => {
                "Come back in 1 hour with electrolytes and blood sugar reading".into()
            }
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Derived values computed while evaluating one panel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DerivedSnapshot {
    /// Anion gap from the just-submitted panel (mmol/L)
    pub anion_gap: f64,
    /// Corrected sodium (mmol/L); `None` when evaluation stopped at
    /// "DKA Resolved" before the correction step ran
    pub corrected_sodium: Option<f64>,
}

/// One completed evaluation: the submitted panel, what was derived from it,
/// and the recommendations produced. Stored in the session's append-only
/// history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Evaluation {
    /// When the panel was recorded
    pub evaluated_at: DateTime<Utc>,
    /// The submitted panel
    pub panel: LabPanel,
    /// Admission severity (constant across the episode)
    pub severity: DkaSeverity,
    /// Values derived this round
    pub derived: DerivedSnapshot,
    /// Ordered recommendations
    pub recommendations: Vec<Recommendation>,
}

impl Evaluation {
    /// Whether this evaluation declared the DKA resolved.
    pub fn is_resolved(&self) -> bool {
        matches!(
            self.recommendations.first(),
            Some(Recommendation::DkaResolved)
        )
    }

    /// Rendered recommendation strings, in order.
    pub fn recommendation_texts(&self) -> Vec<String> {
        self.recommendations.iter().map(|r| r.text()).collect()
    }
}
