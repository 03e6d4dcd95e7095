//! Valve / restriction component model.

use crate::record::{ComponentKind, ComponentRecord};
use crate::state::FluidState;
use crate::traits::{Component, ComponentOutcome};
use fc_core::units::{Pressure, pa};

/// Valve or fixed restriction: isenthalpic throttling.
///
/// The pressure drop is either a fixed configured value or, when a flow
/// coefficient is set, computed from the Cv relation
/// Δp = (Q[m³/h] / Cv)² · (ρ/1000) · 1e5 Pa. Temperature, enthalpy, and
/// entropy pass through unchanged; no real throttling temperature change
/// is modelled.
#[derive(Clone, Debug)]
pub struct Valve {
    /// Component name for diagnostics
    pub name: String,
    /// Fixed pressure drop [Pa], used when no flow coefficient is set.
    pub dp_fixed: Pressure,
    /// Flow coefficient [m³/h at 1 bar Δp], optional.
    pub cv: Option<f64>,
}

/// Result of one valve evaluation.
#[derive(Clone, Debug)]
pub struct ValveOutcome {
    pub name: String,
    pub inlet: FluidState,
    pub outlet: FluidState,
    pub pressure_drop: Pressure,
}

impl Valve {
    /// Valve with a fixed pressure drop.
    pub fn with_dp(name: impl Into<String>, dp: Pressure) -> Self {
        Self {
            name: name.into(),
            dp_fixed: dp,
            cv: None,
        }
    }

    /// Valve sized by flow coefficient.
    pub fn with_cv(name: impl Into<String>, cv: f64) -> Self {
        Self {
            name: name.into(),
            dp_fixed: pa(0.0),
            cv: Some(cv),
        }
    }
}

impl Component for Valve {
    type Params = ();
    type Outcome = ValveOutcome;

    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, inlet: &FluidState, _params: ()) -> ValveOutcome {
        let rho = inlet.density.value;

        let dp = match self.cv {
            Some(cv) if rho > 0.0 => {
                // Volumetric flow in m³/h for the Cv relation
                let q_m3h = inlet.mass_flow.value / rho * 3600.0;
                (q_m3h / cv).powi(2) * (rho / 1000.0) * 1e5
            }
            _ => self.dp_fixed.value,
        };

        let outlet = FluidState {
            pressure: pa(inlet.pressure.value - dp),
            temperature: inlet.temperature, // isenthalpic
            mass_flow: inlet.mass_flow,
            density: inlet.density,
            enthalpy: inlet.enthalpy,
            entropy: inlet.entropy,
            quality: inlet.quality,
            fluid: inlet.fluid.clone(),
        };

        ValveOutcome {
            name: self.name.clone(),
            inlet: inlet.clone(),
            outlet,
            pressure_drop: pa(dp),
        }
    }
}

impl ComponentOutcome for ValveOutcome {
    fn outlet(&self) -> &FluidState {
        &self.outlet
    }

    fn record(&self) -> ComponentRecord {
        ComponentRecord::new(self.name.clone(), ComponentKind::Valve, 0.0)
            .with_metric("pressure_drop_bar", self.pressure_drop.value / 1e5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ComponentOutcome;
    use fc_core::units::{k, kgm3, kgps};

    fn ethanol_inlet() -> FluidState {
        FluidState::new(pa(5e5), k(293.0), kgps(0.5), kgm3(789.0), "ethanol")
    }

    #[test]
    fn fixed_drop_is_exact_and_isenthalpic() {
        let valve = Valve::with_dp("main_valve", pa(1e5));
        let out = valve.compute(&ethanol_inlet(), ());

        assert_eq!(out.outlet.pressure.value, 4e5);
        assert_eq!(out.outlet.temperature.value, 293.0);
        assert_eq!(out.outlet.enthalpy, 0.0);
        assert_eq!(out.outlet.mass_flow.value, 0.5);
    }

    #[test]
    fn no_shaft_power() {
        let valve = Valve::with_dp("valve", pa(1e5));
        let out = valve.compute(&ethanol_inlet(), ());
        assert_eq!(out.shaft_power().value, 0.0);
    }

    #[test]
    fn cv_model_scales_with_flow_squared() {
        let valve = Valve::with_cv("cv_valve", 2.0);
        let single = valve.compute(&ethanol_inlet(), ());

        let double_flow = FluidState {
            mass_flow: kgps(1.0),
            ..ethanol_inlet()
        };
        let double = valve.compute(&double_flow, ());

        let ratio = double.pressure_drop.value / single.pressure_drop.value;
        assert!((ratio - 4.0).abs() < 1e-9);
    }

    #[test]
    fn cv_model_matches_hand_calc() {
        // Q = 0.5/789 ≈ 6.337e-4 m³/s ≈ 2.281 m³/h
        // Δp = (2.281/2)² · 0.789 · 1e5 ≈ 1.027e5 Pa
        let valve = Valve::with_cv("cv_valve", 2.0);
        let out = valve.compute(&ethanol_inlet(), ());
        let q_m3h = 0.5 / 789.0 * 3600.0;
        let expected = (q_m3h / 2.0_f64).powi(2) * 0.789 * 1e5;
        assert!((out.pressure_drop.value - expected).abs() < 1e-6);
    }

    #[test]
    fn record_reports_bar() {
        let valve = Valve::with_dp("test_valve", pa(1e5));
        let out = valve.compute(&ethanol_inlet(), ());
        assert_eq!(out.record().metric("pressure_drop_bar"), Some(1.0));
    }
}
