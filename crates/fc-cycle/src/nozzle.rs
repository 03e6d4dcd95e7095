//! Isentropic nozzle-flow relations used by the flow-split helper.
//!
//! Frozen-flow, ideal-gas relations. The cycle solver only needs enough of
//! the nozzle picture to turn a thrust target into a propellant mass flow:
//! thrust coefficient, throat area, and the c* mass-flow relation.

use crate::bracket::{BisectionConfig, bisect};
use fc_core::units::constants::G0_MPS2;

/// A/A* from Mach number.
pub fn area_ratio_from_mach(mach: f64, gamma: f64) -> f64 {
    let gp1 = gamma + 1.0;
    let gm1 = gamma - 1.0;
    let exponent = gp1 / (2.0 * gm1);
    (1.0 / mach) * ((2.0 / gp1) * (1.0 + 0.5 * gm1 * mach * mach)).powf(exponent)
}

/// Supersonic Mach number for a given area ratio (A/A* ≥ 1).
///
/// Inverts the area-Mach relation by bisection on M ∈ [1, 50]; the area
/// ratio is monotonically increasing there, so the bracket always holds
/// for area ratios above 1.
pub fn mach_from_area_ratio(area_ratio: f64, gamma: f64) -> f64 {
    if area_ratio <= 1.0 {
        return 1.0;
    }
    let cfg = BisectionConfig::with_x_tol(1e-9);
    bisect(
        |mach| area_ratio_from_mach(mach, gamma) - area_ratio,
        1.0,
        50.0,
        &cfg,
    )
    .unwrap_or(1.0)
}

/// Isentropic static-to-stagnation pressure ratio P/P0 at Mach number M.
pub fn isentropic_pressure_ratio(mach: f64, gamma: f64) -> f64 {
    (1.0 + 0.5 * (gamma - 1.0) * mach * mach).powf(-gamma / (gamma - 1.0))
}

/// pe/pc for a nozzle of the given expansion ratio.
pub fn exit_pressure_ratio(gamma: f64, expansion_ratio: f64) -> f64 {
    let exit_mach = mach_from_area_ratio(expansion_ratio, gamma);
    isentropic_pressure_ratio(exit_mach, gamma)
}

/// Thrust coefficient CF for the given expansion and pressure ratios.
///
/// `pa_pc` is the ambient-to-chamber pressure ratio (0 for vacuum).
pub fn thrust_coefficient(gamma: f64, expansion_ratio: f64, pe_pc: f64, pa_pc: f64) -> f64 {
    let gm1 = gamma - 1.0;
    let gp1 = gamma + 1.0;

    let momentum = ((2.0 * gamma * gamma / gm1)
        * (2.0 / gp1).powf(gp1 / gm1)
        * (1.0 - pe_pc.powf(gm1 / gamma)))
    .sqrt();
    let pressure = (pe_pc - pa_pc) * expansion_ratio;

    momentum + pressure
}

/// Throat area from F = CF · Pc · At.
pub fn throat_area(thrust: f64, chamber_pressure: f64, cf: f64) -> f64 {
    thrust / (cf * chamber_pressure)
}

/// Total propellant mass flow from ṁ = Pc · At / c*.
pub fn mass_flow_rate(chamber_pressure: f64, throat_area: f64, c_star: f64) -> f64 {
    chamber_pressure * throat_area / c_star
}

/// Specific impulse [s] from thrust and mass flow.
pub fn specific_impulse(thrust: f64, mass_flow: f64) -> f64 {
    thrust / (mass_flow * G0_MPS2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_ratio_is_one_at_sonic() {
        assert!((area_ratio_from_mach(1.0, 1.2) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn mach_inversion_round_trips() {
        for &gamma in &[1.15, 1.2, 1.3, 1.4] {
            let mach = mach_from_area_ratio(10.0, gamma);
            assert!(mach > 1.0);
            let back = area_ratio_from_mach(mach, gamma);
            assert!((back - 10.0).abs() < 1e-6, "gamma={gamma}: {back}");
        }
    }

    #[test]
    fn exit_pressure_drops_with_expansion() {
        let small = exit_pressure_ratio(1.2, 4.0);
        let large = exit_pressure_ratio(1.2, 40.0);
        assert!(small < 1.0);
        assert!(large < small);
    }

    #[test]
    fn thrust_coefficient_in_plausible_range() {
        // Vacuum CF for ε = 10 sits between ~1.5 and ~1.9 for rocket gammas
        let pe_pc = exit_pressure_ratio(1.2, 10.0);
        let cf = thrust_coefficient(1.2, 10.0, pe_pc, 0.0);
        assert!((1.4..2.0).contains(&cf), "CF = {cf}");
    }

    #[test]
    fn flow_relations_round_trip() {
        let pc = 2e6;
        let cf = 1.6;
        let at = throat_area(2000.0, pc, cf);
        assert!((cf * pc * at - 2000.0).abs() < 1e-9);

        let mdot = mass_flow_rate(pc, at, 1550.0);
        assert!(mdot > 0.0);
        assert!((specific_impulse(2000.0, mdot) - 2000.0 / (mdot * G0_MPS2)).abs() < 1e-12);
    }
}
