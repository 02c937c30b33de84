//! Wilson score interval lower bound.
//!
//! For `n = up + down` votes with observed helpful share `p = up / n` and the
//! two-sided normal quantile `z` of the confidence level:
//!
//! ```text
//! (p + z²/2n - z·sqrt((p(1-p) + z²/4n) / n)) / (1 + z²/n)
//! ```
//!
//! Zero votes score 0: no signal is ranked like negative signal.

use statrs::distribution::{ContinuousCDF, Normal};

use revrank_core::error::RankingError;
use revrank_core::types::Confidence;

/// Two-sided standard normal quantile `z` with `Φ(z) = 1 - (1 - c) / 2`.
pub fn z_score(confidence: Confidence) -> Result<f64, RankingError> {
    let normal = Normal::new(0.0, 1.0).map_err(|e| RankingError::Distribution(e.to_string()))?;
    Ok(normal.inverse_cdf(confidence.quantile_probability()))
}

/// Wilson lower bound for a precomputed `z`.
///
/// Counts are trusted here; [`wilson_lower_bound`] checks their sign.
pub fn wilson_lower_bound_with_z(up: u64, down: u64, z: f64) -> f64 {
    let n = (up + down) as f64;
    if n == 0.0 {
        return 0.0;
    }

    let phat = up as f64 / n;
    let z2 = z * z;
    let centre = phat + z2 / (2.0 * n);
    let margin = z * ((phat * (1.0 - phat) + z2 / (4.0 * n)) / n).sqrt();

    // Float cancellation at up == 0 can dip a hair below zero.
    ((centre - margin) / (1.0 + z2 / n)).max(0.0)
}

/// Wilson lower bound of the helpful proportion at `confidence`.
///
/// # Examples
///
/// ```
/// use revrank_core::types::Confidence;
/// use revrank_wilson::wilson_lower_bound;
/// let few = wilson_lower_bound(2, 0, Confidence::default()).unwrap();
/// let many = wilson_lower_bound(95, 5, Confidence::default()).unwrap();
/// assert!(few < many);
/// ```
pub fn wilson_lower_bound(up: i64, down: i64, confidence: Confidence) -> Result<f64, RankingError> {
    if up < 0 || down < 0 {
        return Err(RankingError::InvalidInput {
            row: None,
            reason: format!("negative vote count: up {up}, down {down}"),
        });
    }
    let z = z_score(confidence)?;
    Ok(wilson_lower_bound_with_z(up as u64, down as u64, z))
}
