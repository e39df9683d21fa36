use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("failed to read input table {path}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("input table is missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("malformed record on line {line} of input table")]
    MalformedRecord {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("unknown case `{0}`, see --list-cases")]
    UnknownCase(String),

    #[error("no slope-triangle anchor configured for {quantity} at order p = {order}")]
    MissingAnchor {
        quantity: &'static str,
        order: u32,
    },

    #[error("need at least two samples at reference order p = {order}, found {found}")]
    InsufficientSamples { order: u32, found: usize },

    #[error("degenerate Richardson extrapolation: resolution ratio {ratio} at order {order}")]
    DegenerateExtrapolation { ratio: f64, order: u32 },

    #[error("failed to write rate table {path}")]
    RateTable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to render document: {0}")]
    Render(String),
}
