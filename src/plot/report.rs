use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::error::VerificationError;
use crate::plot::figure::FigurePage;
use crate::plot::render_err;

// Paginated output document. Pages accumulate in call order and nothing
// touches the filesystem until `close`, which renders every page onto one
// vertically stacked SVG canvas. Closing consumes the report, so a closed
// document cannot be reopened.
pub struct Report {
    path: PathBuf,
    page_width: u32,
    page_height: u32,
    pages: Vec<FigurePage>,
}

impl Report {
    pub fn create(path: impl Into<PathBuf>, (page_width, page_height): (u32, u32)) -> Self {
        Report {
            path: path.into(),
            page_width,
            page_height,
            pages: Vec::new(),
        }
    }

    pub fn append(&mut self, page: FigurePage) {
        self.pages.push(page);
    }

    pub fn pages(&self) -> &[FigurePage] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn close(self) -> Result<PathBuf, VerificationError> {
        let rows = self.pages.len().max(1);
        let canvas = (self.page_width, self.page_height * rows as u32);
        let root = SVGBackend::new(&self.path, canvas).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;
        let panels = root.split_evenly((rows, 1));
        for (page, panel) in self.pages.iter().zip(panels.iter()) {
            page.render(panel)?;
        }
        root.present().map_err(render_err)?;
        Ok(self.path.clone())
    }
}
