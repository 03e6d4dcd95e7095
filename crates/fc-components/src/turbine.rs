//! Turbine component model.

use crate::record::{ComponentKind, ComponentRecord};
use crate::state::{FluidState, SpecHeatCapacity};
use crate::traits::{Component, ComponentOutcome};
use fc_core::units::{Power, Pressure, k, kgm3, w};

/// Gas turbine expanding hot gas through a pressure ratio.
///
/// Ideal-gas expansion with isentropic efficiency:
///
/// ```text
/// PR          = p_in / p_out
/// T_out_ideal = T_in · (1/PR)^((γ-1)/γ)
/// T_out       = T_in - η · (T_in - T_out_ideal)
/// w           = cp · (T_in - T_out)
/// ```
///
/// A non-positive outlet pressure degenerates to PR = 1 (no expansion, no
/// work). The outlet density is corrected for both pressure and
/// temperature, ρ_out = ρ_in · (p_out/p_in) · (T_in/T_out); dropping the
/// temperature factor would understate the expansion.
#[derive(Clone, Debug)]
pub struct Turbine {
    /// Component name for diagnostics
    pub name: String,
    /// Isentropic efficiency (0 < η ≤ 1)
    pub efficiency: f64,
}

/// Inputs for one turbine evaluation.
#[derive(Clone, Copy, Debug)]
pub struct TurbineParams {
    /// Exhaust pressure [Pa].
    pub outlet_pressure: Pressure,
    /// Ratio of specific heats of the working gas.
    pub gamma: f64,
    /// Specific heat at constant pressure [J/(kg·K)].
    pub cp: SpecHeatCapacity,
}

/// Result of one turbine evaluation.
#[derive(Clone, Debug)]
pub struct TurbineOutcome {
    pub name: String,
    pub inlet: FluidState,
    pub outlet: FluidState,
    /// p_in / p_out (1 for a degenerate expansion).
    pub pressure_ratio: f64,
    /// Specific work extracted [J/kg].
    pub specific_work: f64,
    /// Shaft power [W], negative per the produced-power sign convention.
    pub shaft_power: Power,
    pub efficiency: f64,
}

impl Turbine {
    pub fn new(name: impl Into<String>, efficiency: f64) -> Self {
        Self {
            name: name.into(),
            efficiency,
        }
    }
}

impl Component for Turbine {
    type Params = TurbineParams;
    type Outcome = TurbineOutcome;

    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, inlet: &FluidState, params: TurbineParams) -> TurbineOutcome {
        let p_out = params.outlet_pressure.value;
        let pr = if p_out > 0.0 {
            inlet.pressure.value / p_out
        } else {
            1.0
        };

        let t_in = inlet.temperature.value;
        let exponent = (params.gamma - 1.0) / params.gamma;
        let t_out_ideal = t_in * (1.0 / pr).powf(exponent);
        let t_out = t_in - self.efficiency * (t_in - t_out_ideal);

        // Specific work extracted [J/kg]
        let work = params.cp * (t_in - t_out);
        let p_shaft = work * inlet.mass_flow.value;

        // Ideal-gas density at the exhaust
        let rho_out = if inlet.pressure.value > 0.0 && t_out > 0.0 {
            inlet.density.value * (p_out / inlet.pressure.value) * (t_in / t_out)
        } else {
            inlet.density.value
        };

        let outlet = FluidState {
            pressure: params.outlet_pressure,
            temperature: k(t_out),
            mass_flow: inlet.mass_flow,
            density: kgm3(rho_out),
            enthalpy: inlet.enthalpy - work,
            entropy: inlet.entropy,
            quality: inlet.quality,
            fluid: inlet.fluid.clone(),
        };

        TurbineOutcome {
            name: self.name.clone(),
            inlet: inlet.clone(),
            outlet,
            pressure_ratio: pr,
            specific_work: work,
            shaft_power: w(-p_shaft),
            efficiency: self.efficiency,
        }
    }
}

impl ComponentOutcome for TurbineOutcome {
    fn outlet(&self) -> &FluidState {
        &self.outlet
    }

    fn shaft_power(&self) -> Power {
        self.shaft_power
    }

    fn record(&self) -> ComponentRecord {
        ComponentRecord::new(self.name.clone(), ComponentKind::Turbine, self.shaft_power.value)
            .with_metric("pressure_ratio", self.pressure_ratio)
            .with_metric("efficiency", self.efficiency)
            .with_metric("shaft_power_kw", -self.shaft_power.value / 1e3)
    }
}
