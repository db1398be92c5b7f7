//! A single tabulated dM/dE distribution for one penetration factor.
//!
//! # File format
//!
//! Plain text, whitespace separated, read by line position:
//!
//! | line | content                                              |
//! |------|------------------------------------------------------|
//! | 2    | reference mass token (first token, stored halved)    |
//! | 4    | specific binding energies, (cm/s)²                   |
//! | 5    | mass densities dM/dE, paired with line 4 by position |
//!
//! All other lines are ignored.

use crate::error::{DmdeError, Result};
use crate::interpolate::LinearInterpolant;

/// Number of raw samples averaged into one coarse point
pub const COARSEN_STEP: usize = 10;

const MASS_LINE: usize = 1;
const ENERGY_LINE: usize = 3;
const DENSITY_LINE: usize = 4;

/// Energy spectrum of the debris for one penetration factor
///
/// Holds the inverse cumulative distribution: cumulative mass fraction in
/// `[0, 1]` → specific energy.
#[derive(Debug, Clone, PartialEq)]
pub struct DmdeTable {
    beta: f64,
    reference_mass: f64,
    inverse_cdf: LinearInterpolant,
}

impl DmdeTable {
    /// Parses a table in the tabulated text format
    ///
    /// # Arguments
    ///
    /// * `beta` - Penetration factor this table was computed for
    /// * `text` - Full contents of the table file
    ///
    /// # Errors
    ///
    /// Missing lines, unparsable tokens, mismatched array lengths and
    /// distributions that collapse to fewer than two distinct cumulative
    /// values are all rejected.
    pub fn parse(beta: f64, text: &str) -> Result<Self> {
        let lines: Vec<&str> = text.lines().collect();
        let line = |idx: usize| lines.get(idx).copied().ok_or(DmdeError::MissingLine(idx + 1));

        let mass_token = line(MASS_LINE)?
            .split_whitespace()
            .next()
            .ok_or(DmdeError::MissingLine(MASS_LINE + 1))?;
        let reference_mass = parse_token(mass_token, MASS_LINE)? / 2.0;

        let energies = parse_row(line(ENERGY_LINE)?, ENERGY_LINE)?;
        let densities = parse_row(line(DENSITY_LINE)?, DENSITY_LINE)?;

        Self::from_samples(beta, reference_mass, &energies, &densities)
    }

    /// Builds a table from raw paired samples
    ///
    /// Keeps samples with positive energy, averages blocks of
    /// [`COARSEN_STEP`] samples (a trailing partial block is dropped), adds
    /// the zero-energy zero-mass point, reverses the order and normalizes the
    /// cumulative density to `[0, 1]`.
    pub fn from_samples(
        beta: f64,
        reference_mass: f64,
        energies: &[f64],
        densities: &[f64],
    ) -> Result<Self> {
        if energies.len() != densities.len() {
            return Err(DmdeError::LengthMismatch {
                energies: energies.len(),
                densities: densities.len(),
            });
        }

        let (e_kept, d_kept): (Vec<f64>, Vec<f64>) = energies
            .iter()
            .zip(densities)
            .filter(|(e, _)| **e > 0.0)
            .map(|(e, d)| (*e, *d))
            .unzip();

        if d_kept.iter().any(|d| *d < 0.0 || !d.is_finite()) {
            return Err(DmdeError::Degenerate(
                "mass densities must be finite and non-negative".to_string(),
            ));
        }

        let mut coarse_e = block_average(&e_kept, COARSEN_STEP);
        let mut coarse_d = block_average(&d_kept, COARSEN_STEP);
        coarse_e.push(0.0);
        coarse_d.push(0.0);
        coarse_e.reverse();
        coarse_d.reverse();

        let cdf = cumulative_fraction(&coarse_d)?;

        // Blocks with zero density add no probability; keep the first knot of
        // each flat run so the interpolant stays strictly monotone.
        let mut xs = Vec::with_capacity(cdf.len());
        let mut ys = Vec::with_capacity(cdf.len());
        for (c, e) in cdf.into_iter().zip(coarse_e) {
            if xs.last().is_some_and(|last| c <= *last) {
                continue;
            }
            xs.push(c);
            ys.push(e);
        }

        let inverse_cdf = LinearInterpolant::new(xs, ys)?;
        log::debug!(
            "dM/dE table beta={} built with {} knots",
            beta,
            inverse_cdf.knots_x().len()
        );

        Ok(Self {
            beta,
            reference_mass,
            inverse_cdf,
        })
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Reference stellar mass of the hydrodynamic run, in solar masses
    pub fn reference_mass(&self) -> f64 {
        self.reference_mass
    }

    /// Specific energy below which a mass fraction `fraction` of the debris lies
    pub fn energy_at(&self, fraction: f64) -> Result<f64> {
        self.inverse_cdf.eval(fraction)
    }

    /// Cumulative mass fraction at each knot, from 0 to 1
    pub fn cumulative(&self) -> &[f64] {
        self.inverse_cdf.knots_x()
    }

    /// Coarsened energies matching [`DmdeTable::cumulative`]
    pub fn energies(&self) -> &[f64] {
        self.inverse_cdf.knots_y()
    }

    /// Smallest and largest tabulated energy
    pub fn energy_range(&self) -> (f64, f64) {
        self.inverse_cdf.range()
    }
}

fn parse_token(token: &str, line: usize) -> Result<f64> {
    token.parse::<f64>().map_err(|_| DmdeError::Parse {
        line: line + 1,
        token: token.to_string(),
    })
}

fn parse_row(row: &str, line: usize) -> Result<Vec<f64>> {
    row.split_whitespace()
        .map(|token| parse_token(token, line))
        .collect()
}

/// Mean of each complete block of `step` consecutive values
pub(crate) fn block_average(values: &[f64], step: usize) -> Vec<f64> {
    values
        .chunks_exact(step)
        .map(|block| block.iter().sum::<f64>() / step as f64)
        .collect()
}

/// Running sum of `weights` divided by its maximum
pub(crate) fn cumulative_fraction(weights: &[f64]) -> Result<Vec<f64>> {
    let cumulative: Vec<f64> = weights
        .iter()
        .scan(0.0, |acc, w| {
            *acc += w;
            Some(*acc)
        })
        .collect();

    let total = cumulative.iter().copied().fold(0.0, f64::max);
    if total <= 0.0 {
        return Err(DmdeError::Degenerate(
            "distribution carries no mass".to_string(),
        ));
    }

    Ok(cumulative.into_iter().map(|c| c / total).collect())
}
