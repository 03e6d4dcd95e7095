//! Common utilities for component calculations.

use crate::state::SpecHeatCapacity;

/// Fallback density when an inlet state carries a zero or negative density [kg/m³].
pub const DENSITY_FALLBACK: f64 = 1000.0;

/// Density above which a fluid is treated as liquid-like when estimating cp [kg/m³].
pub const LIQUID_DENSITY_THRESHOLD: f64 = 500.0;

/// Rough specific-heat estimate from density when the caller supplies none.
///
/// Liquids cluster around 2000 J/(kg·K) for the propellants of interest,
/// gases around 1000 J/(kg·K).
pub fn estimate_cp(rho: f64) -> SpecHeatCapacity {
    if rho > LIQUID_DENSITY_THRESHOLD {
        2000.0
    } else {
        1000.0
    }
}

/// Clamp a density to a usable positive value.
pub fn usable_density(rho: f64) -> f64 {
    if rho > 0.0 { rho } else { DENSITY_FALLBACK }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cp_estimate_by_phase() {
        assert_eq!(estimate_cp(789.0), 2000.0);
        assert_eq!(estimate_cp(5.0), 1000.0);
    }

    #[test]
    fn density_guard() {
        assert_eq!(usable_density(789.0), 789.0);
        assert_eq!(usable_density(0.0), DENSITY_FALLBACK);
        assert_eq!(usable_density(-1.0), DENSITY_FALLBACK);
    }
}
