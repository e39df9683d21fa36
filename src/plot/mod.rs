pub mod figure;
pub mod palette;
pub mod report;
pub mod triangle;

pub use figure::FigurePage;
pub use report::Report;

use crate::error::VerificationError;

pub(crate) fn render_err<E: std::fmt::Display>(err: E) -> VerificationError {
    VerificationError::Render(err.to_string())
}
