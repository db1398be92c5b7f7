//! Error types for dM/dE table loading and sampling.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DmdeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: cannot parse {token:?} as a number")]
    Parse { line: usize, token: String },

    #[error("cannot parse penetration factor from file name {0:?}")]
    FileName(String),

    #[error("table is missing line {0}")]
    MissingLine(usize),

    #[error("energy and density arrays differ in length ({energies} vs {densities})")]
    LengthMismatch { energies: usize, densities: usize },

    #[error("interpolant has {xs} x knots but {ys} y knots")]
    KnotMismatch { xs: usize, ys: usize },

    #[error("degenerate distribution: {0}")]
    Degenerate(String),

    #[error("no distribution tables were provided")]
    NoTables,

    #[error("at least two tables are required for interpolation in beta, found {0}")]
    TooFewTables(usize),

    #[error("query {x} outside interpolation range [{min}, {max}]")]
    OutOfRange { x: f64, min: f64, max: f64 },

    #[error("energy spread needs at least one fragment")]
    NoFragments,
}

pub type Result<T> = std::result::Result<T, DmdeError>;
