//! IV fluid selection: the protocol's two-axis decision table.
//!
//! Axes:
//! - Glucose vs 250 mg/dL picks dextrose (D5) in or out.
//! - Corrected sodium vs 135 mmol/L picks saline strength.
//! - Potassium vs 4 mmol/L picks KCl supplementation.
//!
//! The 250 and 135 boundaries are inclusive on the high side, so the table
//! is total.

use crate::models::{FluidOrder, Tonicity};

/// Glucose at or above this runs dextrose-free fluids (mg/dL).
pub const GLUCOSE_HIGH_MG_DL: f64 = 250.0;

/// Corrected sodium at or above this runs half-normal saline (mmol/L).
pub const CORRECTED_SODIUM_HIGH_MMOL_L: f64 = 135.0;

/// Potassium above this omits KCl from the fluids (mmol/L).
pub const POTASSIUM_REPLETE_MMOL_L: f64 = 4.0;

/// Select exactly one fluid order for the current values.
pub fn select_fluid_order(glucose: f64, corrected_sodium: f64, potassium: f64) -> FluidOrder {
    FluidOrder {
        dextrose: glucose < GLUCOSE_HIGH_MG_DL,
        tonicity: if corrected_sodium >= CORRECTED_SODIUM_HIGH_MMOL_L {
            Tonicity::HalfNormal
        } else {
            Tonicity::Isotonic
        },
        kcl: potassium <= POTASSIUM_REPLETE_MMOL_L,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_eight_combinations() {
        let cases = [
            (300.0, 140.0, 5.0, "Run IV fluids 0.45 NS @ 250 cc / hr"),
            (300.0, 140.0, 3.5, "Run IV fluids 0.45 NS w 20 meq KCl @ 250 cc / hr"),
            (300.0, 128.0, 5.0, "Run IV fluids NS @ 250 cc / hr"),
            (300.0, 128.0, 3.5, "Run IV fluids NS w 20 meq KCl @ 250 cc / hr"),
            (100.0, 140.0, 5.0, "Run IV fluids D5 0.45 NS @ 250 cc / hr"),
            (100.0, 140.0, 3.5, "Run IV fluids D5 0.45 NS w 20 meq KCl @ 250 cc / hr"),
            (100.0, 128.0, 5.0, "Run IV fluids D5 NS @ 250 cc / hr"),
            (100.0, 128.0, 3.5, "Run IV fluids D5 NS w 20 meq KCl @ 250 cc / hr"),
        ];

        for (glucose, corrected_sodium, potassium, expected) in cases {
            let order = select_fluid_order(glucose, corrected_sodium, potassium);
            assert_eq!(
                order.text(),
                expected,
                "glucose={} corrected_sodium={} potassium={}",
                glucose,
                corrected_sodium,
                potassium
            );
        }
    }

    #[test]
    fn test_glucose_boundary_inclusive_high() {
        // Exactly 250 takes the dextrose-free branch.
        assert!(!select_fluid_order(250.0, 140.0, 5.0).dextrose);
        assert!(select_fluid_order(249.9, 140.0, 5.0).dextrose);
    }

    #[test]
    fn test_sodium_boundary_inclusive_high() {
        // Exactly 135 takes the half-normal branch.
        assert_eq!(
            select_fluid_order(300.0, 135.0, 5.0).tonicity,
            Tonicity::HalfNormal
        );
        assert_eq!(
            select_fluid_order(300.0, 134.9, 5.0).tonicity,
            Tonicity::Isotonic
        );
    }

    #[test]
    fn test_potassium_boundary() {
        // Exactly 4 is not above 4, so KCl goes in.
        assert!(select_fluid_order(300.0, 140.0, 4.0).kcl);
        assert!(!select_fluid_order(300.0, 140.0, 4.1).kcl);
    }
}
