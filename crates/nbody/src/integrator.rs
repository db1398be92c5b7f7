//! Time integration for test-particle systems
//!
//! The integrator is an embedded Dormand–Prince 5(4) Runge–Kutta method with
//! adaptive step-size control. Close pericentre passages and the slow outward
//! drift of the debris differ in timescale by many orders of magnitude, so a
//! fixed step is not an option here.

use crate::error::{IntegrationError, Result};
use crate::forces::ForceModel;
use crate::state::SystemState;
use nalgebra::{Point3, Vector3};

/// Result of one accepted step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// Step actually taken, possibly smaller than requested after rejections
    pub dt_taken: f64,
    /// Suggested size of the next step
    pub dt_next: f64,
    /// Attempts rejected before this step was accepted
    pub rejected: usize,
}

/// A time integrator for test-particle systems
///
/// Integrators advance the system state forward in time by evaluating the
/// force model and updating positions and velocities. On return the
/// acceleration accumulators hold the accelerations at the new time.
pub trait Integrator: Send + Sync {
    /// Advance the system by one accepted step of at most `dt`
    ///
    /// # Arguments
    ///
    /// * `state` - Current system state (modified in place)
    /// * `dt` - Requested timestep in yr/2π
    /// * `force` - Force model to compute accelerations
    fn step(&self, state: &mut SystemState, dt: f64, force: &dyn ForceModel)
        -> Result<StepOutcome>;
}

/// Per-particle time derivative: (dx/dt, dv/dt)
type Derivative = Vec<(Vector3<f64>, Vector3<f64>)>;

const C: [f64; 7] = [0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0, 1.0];

const A: [[f64; 6]; 7] = [
    [0.0; 6],
    [1.0 / 5.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [3.0 / 40.0, 9.0 / 40.0, 0.0, 0.0, 0.0, 0.0],
    [44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0, 0.0, 0.0, 0.0],
    [
        19372.0 / 6561.0,
        -25360.0 / 2187.0,
        64448.0 / 6561.0,
        -212.0 / 729.0,
        0.0,
        0.0,
    ],
    [
        9017.0 / 3168.0,
        -355.0 / 33.0,
        46732.0 / 5247.0,
        49.0 / 176.0,
        -5103.0 / 18656.0,
        0.0,
    ],
    [
        35.0 / 384.0,
        0.0,
        500.0 / 1113.0,
        125.0 / 192.0,
        -2187.0 / 6784.0,
        11.0 / 84.0,
    ],
];

/// Fifth-order weights (equal to the last row of `A`)
const B5: [f64; 7] = [
    35.0 / 384.0,
    0.0,
    500.0 / 1113.0,
    125.0 / 192.0,
    -2187.0 / 6784.0,
    11.0 / 84.0,
    0.0,
];

/// Difference between the fifth- and fourth-order weights
const E: [f64; 7] = [
    71.0 / 57600.0,
    0.0,
    -71.0 / 16695.0,
    71.0 / 1920.0,
    -17253.0 / 339200.0,
    22.0 / 525.0,
    -1.0 / 40.0,
];

/// Adaptive Dormand–Prince 5(4) integrator
///
/// The local error of each particle's position and velocity is compared with
/// `tolerance` times the larger of its old and new magnitudes; the worst
/// particle decides whether the step is accepted.
///
/// # Examples
///
/// ```
/// use nalgebra::{Point3, Vector3};
/// use nbody::forces::ActiveGravity;
/// use nbody::integrator::{DormandPrince, Integrator};
/// use nbody::{Particle, SystemState};
///
/// let mut system = SystemState::new();
/// system.add_particle(Particle::at_rest(1.0));
/// system.n_active = 1;
/// system.add_particle(Particle::test_particle(
///     Point3::new(1.0, 0.0, 0.0),
///     Vector3::new(0.0, 1.0, 0.0),
/// ));
///
/// let integrator = DormandPrince::new(1e-10);
/// let outcome = integrator.step(&mut system, 0.01, &ActiveGravity::new()).unwrap();
///
/// assert_eq!(system.time, outcome.dt_taken);
/// assert!(outcome.dt_next > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DormandPrince {
    /// Relative error allowed per step
    pub tolerance: f64,
    /// Safety factor applied to the optimal step estimate
    pub safety: f64,
    /// Smallest allowed change of the step size per attempt
    pub min_factor: f64,
    /// Largest allowed growth of the step size per step
    pub max_factor: f64,
}

impl DormandPrince {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            safety: 0.9,
            min_factor: 0.2,
            max_factor: 5.0,
        }
    }

    /// Step-size multiplier for a scaled error estimate
    fn factor(&self, err: f64) -> f64 {
        if err == 0.0 {
            return self.max_factor;
        }
        if !err.is_finite() {
            return self.min_factor;
        }
        (self.safety * err.powf(-0.2)).clamp(self.min_factor, self.max_factor)
    }

    /// Evaluate accelerations of `scratch` as currently positioned
    fn derivative(scratch: &mut SystemState, force: &dyn ForceModel) -> Derivative {
        scratch.zero_accelerations();
        force.accumulate(scratch);
        scratch
            .particles
            .iter()
            .map(|p| (p.velocity, p.acceleration))
            .collect()
    }

    /// One trial step; returns the fifth-order solution and its scaled error
    fn attempt(
        &self,
        state: &SystemState,
        k1: &Derivative,
        dt: f64,
        force: &dyn ForceModel,
    ) -> (Derivative, f64) {
        let mut scratch = state.clone();
        let mut stages: Vec<Derivative> = Vec::with_capacity(7);
        stages.push(k1.clone());

        for s in 1..7 {
            for (j, p) in scratch.particles.iter_mut().enumerate() {
                let base = &state.particles[j];
                let (dx, dv) = stages
                    .iter()
                    .zip(A[s].iter())
                    .fold((Vector3::zeros(), Vector3::zeros()), |(x, v), (k, a)| {
                        (x + k[j].0 * *a, v + k[j].1 * *a)
                    });
                p.position = base.position + dx * dt;
                p.velocity = base.velocity + dv * dt;
            }
            scratch.time = state.time + C[s] * dt;
            stages.push(Self::derivative(&mut scratch, force));
        }

        let mut err: f64 = 0.0;
        let solution = state
            .particles
            .iter()
            .enumerate()
            .map(|(j, base)| {
                let weighted = |w: &[f64; 7]| {
                    stages.iter().zip(w.iter()).fold(
                        (Vector3::zeros(), Vector3::zeros()),
                        |(x, v), (k, c)| (x + k[j].0 * *c, v + k[j].1 * *c),
                    )
                };
                let (dx, dv) = weighted(&B5);
                let (ex, ev) = weighted(&E);

                let new_pos = base.position.coords + dx * dt;
                let new_vel = base.velocity + dv * dt;

                let pos_scale =
                    self.tolerance * base.position.coords.magnitude().max(new_pos.magnitude());
                let vel_scale = self.tolerance * base.velocity.magnitude().max(new_vel.magnitude());
                err = err
                    .max(scaled(ex.magnitude() * dt.abs(), pos_scale))
                    .max(scaled(ev.magnitude() * dt.abs(), vel_scale));

                (new_pos, new_vel)
            })
            .collect();

        (solution, err)
    }
}

impl Default for DormandPrince {
    fn default() -> Self {
        Self::new(1e-10)
    }
}

impl Integrator for DormandPrince {
    fn step(
        &self,
        state: &mut SystemState,
        dt: f64,
        force: &dyn ForceModel,
    ) -> Result<StepOutcome> {
        let mut scratch = state.clone();
        let k1 = Self::derivative(&mut scratch, force);

        let mut dt = dt;
        let mut rejected = 0;
        loop {
            if dt == 0.0 || !dt.is_finite() || state.time + dt == state.time {
                return Err(IntegrationError::StepSizeUnderflow {
                    time: state.time,
                    dt,
                });
            }

            let (solution, err) = self.attempt(state, &k1, dt, force);
            if err <= 1.0 {
                for (p, (x, v)) in state.particles.iter_mut().zip(solution) {
                    p.position = Point3::from(x);
                    p.velocity = v;
                }
                state.time += dt;
                state.zero_accelerations();
                force.accumulate(state);

                return Ok(StepOutcome {
                    dt_taken: dt,
                    dt_next: dt * self.factor(err),
                    rejected,
                });
            }

            rejected += 1;
            dt *= self.factor(err).min(1.0);
        }
    }
}

/// Error magnitude relative to its allowed scale
fn scaled(error: f64, scale: f64) -> f64 {
    if error == 0.0 {
        0.0
    } else {
        error / scale
    }
}
