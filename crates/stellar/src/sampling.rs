use std::f64::consts::TAU;

use rand::Rng;
use rand_chacha::ChaChaRng;

/// Break mass of the Kroupa (2001) IMF in solar masses
const KROUPA_BREAK_MASS: f64 = 0.5;
const KROUPA_LOW_SLOPE: f64 = -1.3;
const KROUPA_HIGH_SLOPE: f64 = -2.3;

/// Sample from a power-law distribution
///
/// Samples from p(x) ∝ x^α between x_min and x_max using inverse transform sampling.
///
/// # Arguments
/// * `x_min` - Minimum value
/// * `x_max` - Maximum value
/// * `alpha` - Power-law exponent (e.g., -2.3 for Salpeter IMF); must not be -1
/// * `rng` - Random number generator
///
/// # Returns
/// A sample from the power-law distribution
pub fn sample_power_law(x_min: f64, x_max: f64, alpha: f64, rng: &mut ChaChaRng) -> f64 {
    let u: f64 = rng.random();
    let alpha1 = alpha + 1.0;
    (u * (x_max.powf(alpha1) - x_min.powf(alpha1)) + x_min.powf(alpha1)).powf(1.0 / alpha1)
}

/// Integral of x^α over [a, b], used to weight power-law segments
fn power_law_weight(a: f64, b: f64, alpha: f64) -> f64 {
    let alpha1 = alpha + 1.0;
    (b.powf(alpha1) - a.powf(alpha1)) / alpha1
}

/// Sample stellar mass from the Kroupa (2001) Initial Mass Function
///
/// The Kroupa IMF is a broken power law, continuous at the break:
/// - M < 0.5 M☉: α = -1.3
/// - M ≥ 0.5 M☉: α = -2.3
///
/// Segment probabilities are the integrals of the IMF over the part of each
/// segment that lies inside `[min_mass, max_mass]`.
///
/// # Arguments
/// * `rng` - Random number generator
/// * `min_mass` - Lower mass limit in solar masses
/// * `max_mass` - Upper mass limit in solar masses
///
/// # Returns
/// Stellar mass in solar masses. A degenerate range (`min_mass >= max_mass`)
/// returns `min_mass`.
pub fn sample_mass_kroupa(rng: &mut ChaChaRng, min_mass: f64, max_mass: f64) -> f64 {
    if min_mass >= max_mass {
        return min_mass;
    }

    let low = (min_mass, max_mass.min(KROUPA_BREAK_MASS));
    let high = (min_mass.max(KROUPA_BREAK_MASS), max_mass);

    // Continuity at the break: k_high = k_low * M_break
    let w_low = if low.0 < low.1 {
        power_law_weight(low.0, low.1, KROUPA_LOW_SLOPE)
    } else {
        0.0
    };
    let w_high = if high.0 < high.1 {
        KROUPA_BREAK_MASS * power_law_weight(high.0, high.1, KROUPA_HIGH_SLOPE)
    } else {
        0.0
    };

    let pick: f64 = rng.random();
    let mass = if pick * (w_low + w_high) < w_low {
        sample_power_law(low.0, low.1, KROUPA_LOW_SLOPE, rng)
    } else {
        sample_power_law(high.0, high.1, KROUPA_HIGH_SLOPE, rng)
    };
    mass.clamp(min_mass, max_mass)
}

/// Sample the penetration factor β = r_t / r_p of a star scattered into the loss cone
///
/// In the pinhole regime the distribution of pericentres is uniform, giving
/// p(β) ∝ β⁻² between the bounds.
///
/// # Arguments
/// * `rng` - Random number generator
/// * `beta_min` - Smallest penetration factor
/// * `beta_max` - Largest penetration factor
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaChaRng;
/// use stellar::sampling::sample_penetration_factor;
///
/// let mut rng = ChaChaRng::seed_from_u64(7);
/// let beta = sample_penetration_factor(&mut rng, 0.6, 4.0);
/// assert!((0.6..=4.0).contains(&beta));
/// ```
pub fn sample_penetration_factor(rng: &mut ChaChaRng, beta_min: f64, beta_max: f64) -> f64 {
    if beta_min >= beta_max {
        return beta_min;
    }
    sample_power_law(beta_min, beta_max, -2.0, rng).clamp(beta_min, beta_max)
}

/// Uniformly distributed unit vector on the sphere
///
/// Draws `u = cos θ` uniformly in [-1, 1] and the azimuth uniformly in
/// [0, 2π).
pub fn sample_sphere_direction(rng: &mut ChaChaRng) -> [f64; 3] {
    let u: f64 = rng.random_range(-1.0..=1.0);
    let phi: f64 = rng.random_range(0.0..TAU);
    let s = (1.0 - u * u).sqrt();
    [s * phi.cos(), s * phi.sin(), u]
}
