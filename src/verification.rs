use std::path::PathBuf;

use tracing::{debug, info};

use crate::case::CaseConfig;
use crate::error::VerificationError;
use crate::plot::{FigurePage, Report};
use crate::summary;
use crate::table::{Quantity, SampleTable};

// page sizes matching the original 15x8 / 8x6 inch study figures
pub const WIDE_PAGE: (u32, u32) = (1500, 800);
pub const NARROW_PAGE: (u32, u32) = (800, 600);

pub struct RunOptions {
    pub rate_panels: bool,
    pub rates_csv: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            rate_panels: true,
            rates_csv: None,
        }
    }
}

// One verification run: load the table, build the drag page then the lift
// page, then flush the document.
pub fn run(case: &CaseConfig, options: &RunOptions) -> Result<PathBuf, VerificationError> {
    case.validate()?;

    let table = SampleTable::from_path(&case.input_file)?;
    debug!(
        samples = table.len(),
        orders = ?table.orders(),
        "loaded sample table"
    );

    let page_size = if options.rate_panels {
        WIDE_PAGE
    } else {
        NARROW_PAGE
    };
    let mut report = Report::create(&case.output_file, page_size);
    for quantity in Quantity::ALL {
        let page = FigurePage::build(&table, case, quantity, options.rate_panels)?;
        info!(
            quantity = quantity.column(),
            reference = page.reference,
            "extrapolated reference value"
        );
        report.append(page);
    }

    if let Some(path) = &options.rates_csv {
        summary::write_rate_table(path, report.pages())?;
        info!(path = %path.display(), "wrote rate table");
    }

    report.close()
}
