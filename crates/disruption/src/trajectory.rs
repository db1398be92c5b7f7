//! Recorded fragment positions.
//!
//! One buffer per disruption, sized to its fragment count when the star is
//! added. Fragments are addressed by [`FragmentId`], so removals never
//! renumber anything; a removed fragment is retired and keeps its history.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};
use crate::fragment_index::FragmentId;

/// Position history of one fragment, in kpc
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FragmentTrack {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    /// Simulation time at which the fragment was removed
    pub retired_at: Option<f64>,
}

impl FragmentTrack {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn is_active(&self) -> bool {
        self.retired_at.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct StarTracks {
    fragments: Vec<FragmentTrack>,
    active: usize,
}

/// Nested `[star][fragment][timestep]` coordinates of the active fragments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryExport {
    pub x: Vec<Vec<Vec<f64>>>,
    pub y: Vec<Vec<Vec<f64>>>,
    pub z: Vec<Vec<Vec<f64>>>,
}

impl TrajectoryExport {
    /// Fragment count per exported star
    pub fn shape(&self) -> Vec<usize> {
        self.x.iter().map(|star| star.len()).collect()
    }
}

/// Arena of per-star fragment tracks
///
/// # Examples
///
/// ```
/// use disruption::{FragmentId, TrajectoryRecord};
///
/// let mut record = TrajectoryRecord::new();
/// let star = record.add_star(2);
/// let inner = FragmentId { star, fragment: 0 };
///
/// record.record(inner, [1.0, 2.0, 3.0]).unwrap();
/// record.retire(inner, 5.0).unwrap();
///
/// assert_eq!(record.active_fragments(star), 1);
/// assert_eq!(record.track(inner).unwrap().x, vec![1.0]);
/// assert_eq!(record.export().shape(), vec![1]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRecord {
    stars: Vec<StarTracks>,
}

impl TrajectoryRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates tracks for a new disruption and returns its star number
    pub fn add_star(&mut self, n_fragments: usize) -> usize {
        self.stars.push(StarTracks {
            fragments: vec![FragmentTrack::default(); n_fragments],
            active: n_fragments,
        });
        self.stars.len() - 1
    }

    /// Disruptions recorded so far, including fully retired ones
    pub fn star_count(&self) -> usize {
        self.stars.len()
    }

    /// Fragments of `star` that are still tracked
    pub fn active_fragments(&self, star: usize) -> usize {
        self.stars.get(star).map_or(0, |s| s.active)
    }

    pub fn track(&self, id: FragmentId) -> Option<&FragmentTrack> {
        self.stars.get(id.star)?.fragments.get(id.fragment)
    }

    /// All tracks of `star`, retired ones included
    pub fn tracks(&self, star: usize) -> &[FragmentTrack] {
        self.stars
            .get(star)
            .map(|s| s.fragments.as_slice())
            .unwrap_or_default()
    }

    fn track_mut(&mut self, id: FragmentId) -> Result<&mut FragmentTrack> {
        self.stars
            .get_mut(id.star)
            .and_then(|s| s.fragments.get_mut(id.fragment))
            .ok_or_else(|| {
                SimulationError::InvariantViolation(format!("no trajectory for fragment {id:?}"))
            })
    }

    /// Appends one position, in kpc, to an active fragment
    pub fn record(&mut self, id: FragmentId, position: [f64; 3]) -> Result<()> {
        let track = self.track_mut(id)?;
        if !track.is_active() {
            return Err(SimulationError::InvariantViolation(format!(
                "fragment {id:?} recorded after removal"
            )));
        }
        track.x.push(position[0]);
        track.y.push(position[1]);
        track.z.push(position[2]);
        Ok(())
    }

    /// Marks a fragment as removed at `time`
    pub fn retire(&mut self, id: FragmentId, time: f64) -> Result<()> {
        let track = self.track_mut(id)?;
        if !track.is_active() {
            return Err(SimulationError::InvariantViolation(format!(
                "fragment {id:?} removed twice"
            )));
        }
        track.retired_at = Some(time);
        self.stars[id.star].active -= 1;
        Ok(())
    }

    /// Nested coordinates of every active fragment, grouped by star
    ///
    /// Stars without active fragments are left out, mirroring the boundary
    /// sequence of the particle index.
    pub fn export(&self) -> TrajectoryExport {
        let mut out = TrajectoryExport::default();
        for star in self.stars.iter().filter(|s| s.active > 0) {
            let active: Vec<&FragmentTrack> =
                star.fragments.iter().filter(|t| t.is_active()).collect();
            out.x.push(active.iter().map(|t| t.x.clone()).collect());
            out.y.push(active.iter().map(|t| t.y.clone()).collect());
            out.z.push(active.iter().map(|t| t.z.clone()).collect());
        }
        out
    }
}
