use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use approx::assert_relative_eq;
use tempfile::TempDir;

use pp_naca0012::case::CaseConfig;
use pp_naca0012::error::VerificationError;
use pp_naca0012::verification::{run, RunOptions};

const DRAG_LIMIT: f64 = 0.3;
const LIFT_LIMIT: f64 = 1.1;

// drag and lift follow C + D * h^(p+1) exactly, four resolution levels
// per order
fn synthetic_rows() -> String {
    let mut rows = String::from("p  one_sqrt_dof  drag  lift\n");
    for order in 0..4u32 {
        for level in 0..4 {
            let h = 0.5 / f64::from(1u32 << level);
            let drag = DRAG_LIMIT + (1.0 + f64::from(order)) * h.powi(order as i32 + 1);
            let lift = LIFT_LIMIT + 2.0 * h.powi(order as i32 + 1);
            rows.push_str(&format!("{order}  {h}  {drag:.17e}  {lift:.17e}\n"));
        }
    }
    rows
}

fn study_case(dir: &Path) -> CaseConfig {
    let anchors: BTreeMap<u32, (f64, f64)> = BTreeMap::from([
        (0, (0.2, 5.0e-2)),
        (1, (0.2, 1.0e-2)),
        (2, (0.15, 1.0e-3)),
        (3, (0.12, 1.0e-4)),
    ]);
    CaseConfig {
        name: "synthetic".to_string(),
        input_file: dir.join("synthetic.data"),
        output_file: dir.join("synthetic_verification.svg"),
        p_range: (0..4).collect(),
        p_reference: 3,
        drag_anchors: anchors.clone(),
        lift_anchors: anchors,
    }
}

#[test]
fn renders_both_quantities_and_recovers_formal_rates() {
    let dir = TempDir::new().unwrap();
    let case = study_case(dir.path());
    fs::write(&case.input_file, synthetic_rows()).unwrap();

    let rates_csv = dir.path().join("rates.csv");
    let options = RunOptions {
        rate_panels: true,
        rates_csv: Some(rates_csv.clone()),
    };
    let written = run(&case, &options).unwrap();
    assert_eq!(written, case.output_file);

    let document = fs::read_to_string(&written).unwrap();
    assert!(document.contains("<svg"));
    assert!(document.contains("Drag Error"));
    assert!(document.contains("Lift Error"));

    let table = fs::read_to_string(&rates_csv).unwrap();
    let mut lines = table.lines();
    assert_eq!(lines.next(), Some("quantity,p,one_sqrt_dof,rate,reference"));
    let mut rows = 0;
    for line in lines {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 5);
        let p: u32 = fields[1].parse().unwrap();
        let rate: f64 = fields[3].parse().unwrap();
        let reference: f64 = fields[4].parse().unwrap();
        assert_relative_eq!(rate, f64::from(p + 1), max_relative = 1e-6);
        let limit = if fields[0] == "drag" {
            DRAG_LIMIT
        } else {
            LIFT_LIMIT
        };
        assert_relative_eq!(reference, limit, max_relative = 1e-10);
        rows += 1;
    }
    // four orders, three interior segments each, two quantities
    assert_eq!(rows, 24);
}

#[test]
fn missing_lift_column_aborts_before_any_document_exists() {
    let dir = TempDir::new().unwrap();
    let case = study_case(dir.path());
    fs::write(
        &case.input_file,
        "p one_sqrt_dof drag\n0 8.0e-3 1.0e-2\n0 4.0e-3 5.0e-3\n",
    )
    .unwrap();

    let err = run(&case, &RunOptions::default()).unwrap_err();
    assert!(matches!(err, VerificationError::MissingColumn("lift")));
    assert!(!case.output_file.exists());
}

#[test]
fn duplicate_reference_resolutions_are_a_degeneracy_error() {
    let dir = TempDir::new().unwrap();
    let case = study_case(dir.path());
    fs::write(
        &case.input_file,
        "p one_sqrt_dof drag lift\n3 4.0e-3 1.0e-2 2.0e-2\n3 4.0e-3 9.0e-3 1.9e-2\n",
    )
    .unwrap();

    let err = run(&case, &RunOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        VerificationError::DegenerateExtrapolation { order: 3, .. }
    ));
    assert!(!case.output_file.exists());
}

#[test]
fn anchor_gaps_are_caught_before_loading_data() {
    let dir = TempDir::new().unwrap();
    let mut case = study_case(dir.path());
    case.drag_anchors.remove(&1);
    // no input file on disk: validation must fail first

    let err = run(&case, &RunOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        VerificationError::MissingAnchor {
            quantity: "drag",
            order: 1
        }
    ));
}
