use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::VerificationError;
use crate::table::Quantity;

#[derive(Debug)]
pub struct CaseConfig {
    pub name: String,
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub p_range: Vec<u32>,
    pub p_reference: u32,
    pub drag_anchors: BTreeMap<u32, (f64, f64)>,
    pub lift_anchors: BTreeMap<u32, (f64, f64)>,
}

impl CaseConfig {
    pub fn anchors(&self, quantity: Quantity) -> &BTreeMap<u32, (f64, f64)> {
        match quantity {
            Quantity::Drag => &self.drag_anchors,
            Quantity::Lift => &self.lift_anchors,
        }
    }

    pub fn anchor(&self, quantity: Quantity, order: u32) -> Result<(f64, f64), VerificationError> {
        self.anchors(quantity).get(&order).copied().ok_or(
            VerificationError::MissingAnchor {
                quantity: quantity.column(),
                order,
            },
        )
    }

    // every plotted order must have a triangle anchor for both quantities
    pub fn validate(&self) -> Result<(), VerificationError> {
        for &order in &self.p_range {
            for quantity in Quantity::ALL {
                self.anchor(quantity, order)?;
            }
        }
        Ok(())
    }
}

pub fn builtin_cases() -> Vec<CaseConfig> {
    vec![
        CaseConfig {
            name: "naca0012_M050_A200".to_string(),
            input_file: PathBuf::from("naca0012_subsonic.data"),
            output_file: PathBuf::from("naca0012_subsonic_verification.svg"),
            p_range: (0..4).collect(),
            p_reference: 3,
            drag_anchors: BTreeMap::from([
                (0, (6.5e-3, 2.0e-2)),
                (1, (4.5e-3, 3.0e-3)),
                (2, (2.5e-3, 3.0e-4)),
                (3, (1.5e-3, 5.0e-5)),
                (4, (1.5e-3, 1.0e-5)),
            ]),
            lift_anchors: BTreeMap::from([
                (0, (6.5e-3, 4.0e-2)),
                (1, (3.5e-3, 9.0e-3)),
                (2, (2.5e-3, 5.0e-4)),
                (3, (1.9e-3, 2.0e-5)),
                (4, (1.5e-3, 1.0e-5)),
            ]),
        },
        CaseConfig {
            name: "naca0012_M085_A125".to_string(),
            input_file: PathBuf::from("naca0012_transonic.data"),
            output_file: PathBuf::from("naca0012_transonic_verification.svg"),
            p_range: (0..4).collect(),
            p_reference: 3,
            drag_anchors: BTreeMap::from([
                (0, (6.5e-3, 2.0e-2)),
                (1, (4.5e-3, 3.0e-3)),
                (2, (2.5e-3, 3.0e-4)),
                (3, (1.5e-3, 5.0e-5)),
                (4, (1.5e-3, 1.0e-5)),
            ]),
            lift_anchors: BTreeMap::from([
                (0, (6.5e-3, 1.0e-2)),
                (1, (3.5e-3, 9.0e-2)),
                (2, (2.5e-3, 5.0e-3)),
                (3, (1.9e-3, 2.0e-3)),
                (4, (1.5e-3, 1.0e-5)),
            ]),
        },
    ]
}

pub fn select(name: &str) -> Result<CaseConfig, VerificationError> {
    builtin_cases()
        .into_iter()
        .find(|case| case.name == name)
        .ok_or_else(|| VerificationError::UnknownCase(name.to_string()))
}
