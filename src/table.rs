use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use serde::Deserialize;

use crate::error::VerificationError;

pub const REQUIRED_COLUMNS: [&str; 4] = ["p", "one_sqrt_dof", "drag", "lift"];

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Sample {
    pub p: u32,
    pub one_sqrt_dof: f64,
    pub drag: f64,
    pub lift: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Drag,
    Lift,
}

impl Quantity {
    pub const ALL: [Quantity; 2] = [Quantity::Drag, Quantity::Lift];

    pub fn column(self) -> &'static str {
        match self {
            Quantity::Drag => "drag",
            Quantity::Lift => "lift",
        }
    }

    pub fn axis_label(self) -> &'static str {
        match self {
            Quantity::Drag => "Drag Error",
            Quantity::Lift => "Lift Error",
        }
    }

    pub fn value(self, sample: &Sample) -> f64 {
        match self {
            Quantity::Drag => sample.drag,
            Quantity::Lift => sample.lift,
        }
    }
}

#[derive(Debug)]
pub struct SampleTable {
    samples: Vec<Sample>,
}

impl SampleTable {
    pub fn from_path(path: &Path) -> Result<Self, VerificationError> {
        let raw = fs::read_to_string(path).map_err(|source| VerificationError::ReadInput {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, VerificationError> {
        // collapse runs of whitespace so the csv reader sees one delimiter
        let normalized: Vec<String> = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .collect();
        let normalized = normalized.join("\n");

        let mut reader = ReaderBuilder::new()
            .delimiter(b' ')
            .from_reader(normalized.as_bytes());

        let headers = reader
            .headers()
            .map_err(|source| VerificationError::MalformedRecord { line: 1, source })?
            .clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|header| header == column) {
                return Err(VerificationError::MissingColumn(column));
            }
        }

        let mut samples = Vec::new();
        for record in reader.deserialize::<Sample>() {
            let sample = record.map_err(|source| {
                let line = source.position().map(|pos| pos.line()).unwrap_or(0);
                VerificationError::MalformedRecord { line, source }
            })?;
            samples.push(sample);
        }
        Ok(SampleTable { samples })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn orders(&self) -> Vec<u32> {
        let mut orders: Vec<u32> = self.samples.iter().map(|sample| sample.p).collect();
        orders.sort_unstable();
        orders.dedup();
        orders
    }

    // samples at one order, coarsest first (decreasing 1/sqrt(DoF), finest last)
    pub fn order_samples(&self, order: u32) -> Vec<Sample> {
        let mut group: Vec<Sample> = self
            .samples
            .iter()
            .copied()
            .filter(|sample| sample.p == order)
            .collect();
        group.sort_by(|a, b| {
            b.one_sqrt_dof
                .partial_cmp(&a.one_sqrt_dof)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        group
    }

    // the two finest (value, resolution) pairs at one order, finest first
    pub fn finest_pair(
        &self,
        order: u32,
        quantity: Quantity,
    ) -> Result<[(f64, f64); 2], VerificationError> {
        let group = self.order_samples(order);
        if group.len() < 2 {
            return Err(VerificationError::InsufficientSamples {
                order,
                found: group.len(),
            });
        }
        let finest = group[group.len() - 1];
        let next = group[group.len() - 2];
        Ok([
            (quantity.value(&finest), finest.one_sqrt_dof),
            (quantity.value(&next), next.one_sqrt_dof),
        ])
    }
}
