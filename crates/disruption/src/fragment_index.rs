//! Mapping between integrator particle indices and (star, fragment) identities.
//!
//! Particle 0 is the central body. Fragments of one disruption occupy a
//! contiguous index range, and stars appear in disruption order. The boundary
//! sequence starts at 0 and holds, for every represented star, the highest
//! particle index it owns, so star `k` (1-based) owns
//! `(boundaries[k-1], boundaries[k]]`.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

/// Stable identity of a fragment, independent of its current particle index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FragmentId {
    /// Disruption number, starting at 0
    pub star: usize,
    /// Slot within the disruption, starting at 0 for the innermost fragment
    pub fragment: usize,
}

/// Where a particle index falls in the boundary sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// 1-based position of the owning star's boundary
    pub interval: usize,
    /// Offset within the owning star's current range
    pub offset: usize,
    pub id: FragmentId,
}

/// Bidirectional particle-index ↔ [`FragmentId`] map
///
/// # Examples
///
/// ```
/// use disruption::FragmentIndex;
///
/// let mut index = FragmentIndex::new();
/// index.push_star(0, 3).unwrap();
/// index.push_star(1, 2).unwrap();
/// assert_eq!(index.boundaries(), &[0, 3, 5]);
///
/// // Particle 2 is the second fragment of the first star
/// let removed = index.remove(2).unwrap();
/// assert_eq!((removed.star, removed.fragment), (0, 1));
/// assert_eq!(index.boundaries(), &[0, 2, 4]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentIndex {
    boundaries: Vec<usize>,
    /// Disruption number owning each boundary after the first
    stars: Vec<usize>,
    /// Identity of particle `p` at `slots[p - 1]`
    slots: Vec<FragmentId>,
}

impl Default for FragmentIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl FragmentIndex {
    pub fn new() -> Self {
        Self {
            boundaries: vec![0],
            stars: Vec::new(),
            slots: Vec::new(),
        }
    }

    /// The boundary sequence
    pub fn boundaries(&self) -> &[usize] {
        &self.boundaries
    }

    /// Stars with at least one fragment left
    pub fn represented_stars(&self) -> usize {
        self.stars.len()
    }

    /// Highest fragment particle index, 0 when no fragment exists
    pub fn last_particle(&self) -> usize {
        self.boundaries.last().copied().unwrap_or(0)
    }

    pub fn fragment_count(&self) -> usize {
        self.slots.len()
    }

    /// Registers `n_fragments` new particles at the end of the index range
    ///
    /// Returns the particle index range the star now owns.
    pub fn push_star(&mut self, star: usize, n_fragments: usize) -> Result<(usize, usize)> {
        if n_fragments == 0 {
            return Err(SimulationError::InvariantViolation(format!(
                "star {star} registered without fragments"
            )));
        }
        if self.stars.contains(&star) {
            return Err(SimulationError::InvariantViolation(format!(
                "star {star} registered twice"
            )));
        }

        let first = self.last_particle() + 1;
        let last = self.last_particle() + n_fragments;
        self.boundaries.push(last);
        self.stars.push(star);
        self.slots
            .extend((0..n_fragments).map(|fragment| FragmentId { star, fragment }));
        Ok((first, last))
    }

    /// Finds the star interval and offset of `particle`
    ///
    /// The owning interval is the first boundary at or above the index.
    pub fn locate(&self, particle: usize) -> Result<Location> {
        if particle == 0 {
            return Err(SimulationError::InvariantViolation(
                "particle 0 is the central body, not a fragment".to_string(),
            ));
        }
        let interval = self
            .boundaries
            .iter()
            .position(|b| *b >= particle)
            .ok_or_else(|| {
                SimulationError::InvariantViolation(format!(
                    "particle {particle} lies beyond the last star boundary {}",
                    self.last_particle()
                ))
            })?;

        let offset = particle - self.boundaries[interval - 1] - 1;
        Ok(Location {
            interval,
            offset,
            id: self.slots[particle - 1],
        })
    }

    pub fn id_of(&self, particle: usize) -> Result<FragmentId> {
        self.locate(particle).map(|l| l.id)
    }

    /// Current particle index of `id`, if the fragment is still present
    pub fn particle_of(&self, id: FragmentId) -> Option<usize> {
        self.slots.iter().position(|s| *s == id).map(|p| p + 1)
    }

    /// Disruption number owning `particle`
    pub fn star_of(&self, particle: usize) -> Result<usize> {
        self.locate(particle).map(|l| l.id.star)
    }

    /// Every fragment with its current particle index, in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, FragmentId)> + '_ {
        self.slots.iter().enumerate().map(|(p, id)| (p + 1, *id))
    }

    /// Forgets `particle` and shifts later indices down by one
    ///
    /// A star losing its last fragment drops its boundary.
    pub fn remove(&mut self, particle: usize) -> Result<FragmentId> {
        let location = self.locate(particle)?;

        self.boundaries[location.interval..]
            .iter_mut()
            .for_each(|b| *b -= 1);
        self.slots.remove(particle - 1);

        if self.boundaries[location.interval] == self.boundaries[location.interval - 1] {
            self.boundaries.remove(location.interval);
            self.stars.remove(location.interval - 1);
        }

        Ok(location.id)
    }

    /// Checks the structural invariants
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| Err(SimulationError::InvariantViolation(msg));

        if self.boundaries.first() != Some(&0) {
            return fail("boundary sequence must start at 0".to_string());
        }
        if let Some(w) = self.boundaries.windows(2).find(|w| w[0] >= w[1]) {
            return fail(format!("boundaries not strictly increasing at {w:?}"));
        }
        if self.stars.len() + 1 != self.boundaries.len() {
            return fail(format!(
                "{} stars for {} boundaries",
                self.stars.len(),
                self.boundaries.len()
            ));
        }
        if self.slots.len() != self.last_particle() {
            return fail(format!(
                "{} fragment slots but last boundary is {}",
                self.slots.len(),
                self.last_particle()
            ));
        }
        for (k, star) in self.stars.iter().enumerate() {
            let range = self.boundaries[k]..self.boundaries[k + 1];
            if self.slots[range].iter().any(|id| id.star != *star) {
                return fail(format!("interval {} mixes fragments of other stars", k + 1));
            }
        }
        Ok(())
    }
}
