use std::path::Path;

use csv::Writer;
use serde::Serialize;

use crate::error::VerificationError;
use crate::plot::FigurePage;

#[derive(Serialize)]
struct RateRow {
    quantity: &'static str,
    p: u32,
    one_sqrt_dof: f64,
    rate: f64,
    reference: f64,
}

// One row per local rate sample, each carrying the quantity's
// Richardson-extrapolated reference value.
pub fn write_rate_table(path: &Path, pages: &[FigurePage]) -> Result<(), VerificationError> {
    let wrap = |source: csv::Error| VerificationError::RateTable {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = Writer::from_path(path).map_err(wrap)?;
    for page in pages {
        for series in &page.series {
            for &(one_sqrt_dof, rate) in &series.rates {
                writer
                    .serialize(RateRow {
                        quantity: page.quantity.column(),
                        p: series.order,
                        one_sqrt_dof,
                        rate,
                        reference: page.reference,
                    })
                    .map_err(wrap)?;
            }
        }
    }
    writer.flush().map_err(|e| wrap(csv::Error::from(e)))?;
    Ok(())
}
