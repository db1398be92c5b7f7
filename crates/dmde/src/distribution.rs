//! The full set of dM/dE tables and the queries built on top of it.

use std::fs;
use std::path::Path;

use crate::error::{DmdeError, Result};
use crate::interpolate::LinearInterpolant;
use crate::table::DmdeTable;

/// Immutable collection of dM/dE tables, one per penetration factor
///
/// Built once and shared by reference with everything that needs energy
/// spectra.
#[derive(Debug, Clone, PartialEq)]
pub struct DmdeDistribution {
    tables: Vec<DmdeTable>,
}

/// Convex blend of the two tables nearest to a requested β
///
/// Weights are inversely proportional to the distance in β, so the nearer
/// table dominates and an exact match uses that table alone.
#[derive(Debug, Clone, Copy)]
pub struct BetaBlend<'a> {
    nearest: &'a DmdeTable,
    second: &'a DmdeTable,
    nearest_weight: f64,
    second_weight: f64,
}

impl<'a> BetaBlend<'a> {
    /// Blended specific energy at cumulative mass fraction `fraction`
    pub fn eval(&self, fraction: f64) -> Result<f64> {
        let e1 = self.nearest.energy_at(fraction)?;
        if self.second_weight == 0.0 {
            return Ok(e1);
        }
        let e2 = self.second.energy_at(fraction)?;
        Ok(self.nearest_weight * e1 + self.second_weight * e2)
    }

    /// β of the nearest and second-nearest tables
    pub fn bracketing_betas(&self) -> (f64, f64) {
        (self.nearest.beta(), self.second.beta())
    }

    /// Weights of the nearest and second-nearest tables; they sum to one
    pub fn weights(&self) -> (f64, f64) {
        (self.nearest_weight, self.second_weight)
    }

    /// Energy interval spanned by both bracketing tables
    pub fn energy_bounds(&self) -> (f64, f64) {
        let (lo1, hi1) = self.nearest.energy_range();
        let (lo2, hi2) = self.second.energy_range();
        (lo1.min(lo2), hi1.max(hi2))
    }
}

impl DmdeDistribution {
    /// Wraps already-built tables
    ///
    /// Table order is kept; ties in β distance resolve to the earlier table.
    pub fn from_tables(tables: Vec<DmdeTable>) -> Result<Self> {
        if tables.is_empty() {
            return Err(DmdeError::NoTables);
        }
        Ok(Self { tables })
    }

    /// Loads every `*.dat` table in `dir`
    ///
    /// β is read from the file-name prefix before the first underscore, so
    /// `1.500_dmde.dat` holds the β = 1.5 table. Tables are ordered by β.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let mut tables = Vec::new();
        for entry in fs::read_dir(dir.as_ref())? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("dat") {
                continue;
            }
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();
            let beta = beta_from_file_name(&name)?;
            let text = fs::read_to_string(&path)?;
            tables.push(DmdeTable::parse(beta, &text)?);
        }

        tables.sort_by(|a, b| a.beta().total_cmp(&b.beta()));
        log::info!(
            "loaded {} dM/dE tables from {}",
            tables.len(),
            dir.as_ref().display()
        );
        Self::from_tables(tables)
    }

    pub fn tables(&self) -> &[DmdeTable] {
        &self.tables
    }

    pub fn betas(&self) -> Vec<f64> {
        self.tables.iter().map(|t| t.beta()).collect()
    }

    /// Blend of the two tables nearest to `beta`
    ///
    /// # Errors
    ///
    /// Fewer than two tables make the blend undefined.
    pub fn beta_interp(&self, beta: f64) -> Result<BetaBlend<'_>> {
        if self.tables.len() < 2 {
            return Err(DmdeError::TooFewTables(self.tables.len()));
        }

        let mut order: Vec<(usize, f64)> = self
            .tables
            .iter()
            .enumerate()
            .map(|(i, t)| (i, (t.beta() - beta).abs()))
            .collect();
        order.sort_by(|a, b| a.1.total_cmp(&b.1));
        let (i, d1) = order[0];
        let (j, d2) = order[1];

        let d = d1 + d2;
        let (nearest_weight, second_weight) = if d > 0.0 {
            (d2 / d, d1 / d)
        } else {
            (1.0, 0.0)
        };

        Ok(BetaBlend {
            nearest: &self.tables[i],
            second: &self.tables[j],
            nearest_weight,
            second_weight,
        })
    }

    /// Normalized debris energies for a disruption with `n_fragments` fragments
    ///
    /// The unit interval is split into `n_fragments` bins of width `1/N` and the
    /// blended spectrum is sampled at `N - 1` evenly spaced points running from
    /// the first bin midpoint to the last one. The result therefore holds one
    /// value fewer than the fragment count; callers decide which fragment goes
    /// without a sampled energy.
    ///
    /// # Examples
    ///
    /// ```
    /// use dmde::{DmdeDistribution, DmdeTable};
    ///
    /// let energies: Vec<f64> = (0..40).map(|i| 40.0 - i as f64).collect();
    /// let densities = vec![1.0; 40];
    /// let low = DmdeTable::from_samples(0.5, 1.0, &energies, &densities).unwrap();
    /// let high = DmdeTable::from_samples(1.5, 1.0, &energies, &densities).unwrap();
    /// let dist = DmdeDistribution::from_tables(vec![low, high]).unwrap();
    ///
    /// let spread = dist.energy_spread(1.0, 5).unwrap();
    /// assert_eq!(spread.len(), 4);
    /// ```
    pub fn energy_spread(&self, beta: f64, n_fragments: usize) -> Result<Vec<f64>> {
        if n_fragments == 0 {
            return Err(DmdeError::NoFragments);
        }

        let blend = self.beta_interp(beta)?;
        let bin_size = 1.0 / n_fragments as f64;
        let half = 0.5 * bin_size;

        linspace(half, 1.0 - half, n_fragments - 1)
            .into_iter()
            .map(|x| blend.eval(x))
            .collect()
    }

    /// Interpolant mapping β to the tables' reference stellar masses
    ///
    /// # Errors
    ///
    /// Needs at least two tables with distinct β.
    pub fn beta_mass_interp(&self) -> Result<LinearInterpolant> {
        let mut pairs: Vec<(f64, f64)> = self
            .tables
            .iter()
            .map(|t| (t.beta(), t.reference_mass()))
            .collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (betas, masses) = pairs.into_iter().unzip();
        LinearInterpolant::new(betas, masses)
    }
}

/// `n` evenly spaced values from `start` to `stop` inclusive
pub(crate) fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

fn beta_from_file_name(name: &str) -> Result<f64> {
    name.split('_')
        .next()
        .and_then(|prefix| prefix.parse::<f64>().ok())
        .ok_or_else(|| DmdeError::FileName(name.to_string()))
}
