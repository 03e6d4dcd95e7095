//! Counter-flow heat exchanger using the effectiveness-NTU method.

use crate::record::{ComponentKind, ComponentRecord};
use crate::state::{FluidState, SpecHeatCapacity};
use crate::traits::{Component, ComponentOutcome};
use fc_core::units::{Power, Pressure, k, pa, w};
use tracing::warn;

/// Counter-flow heat exchanger.
///
/// The effectiveness ε relates the actual heat transfer to the
/// thermodynamic maximum:
///
/// ```text
/// C_hot  = ṁ_hot · cp_hot      C_cold = ṁ_cold · cp_cold
/// Q_max  = min(C_hot, C_cold) · (T_hot_in - T_cold_in)
/// Q      = ε · max(Q_max, 0)
/// ```
///
/// Invariant: the cold-side outlet can never exceed the hot-side inlet
/// temperature. If the computed rise would cross it, ΔT_cold is clamped to
/// the inlet temperature difference, Q and ΔT_hot are recomputed from the
/// clamped value, and a warning is logged.
///
/// Per the shared contract the hot-side outlet is the primary result; the
/// cold-side outlet is exposed on [`HeatExchangerOutcome::cold_outlet`].
#[derive(Clone, Debug)]
pub struct HeatExchanger {
    /// Component name for diagnostics
    pub name: String,
    /// Effectiveness ε (0–1)
    pub effectiveness: f64,
    /// Hot-side pressure drop [Pa]
    pub dp_hot: Pressure,
    /// Cold-side pressure drop [Pa]
    pub dp_cold: Pressure,
}

/// Inputs for one heat-exchanger evaluation.
#[derive(Clone, Debug)]
pub struct HeatExchangerParams {
    /// Cold-side inlet state.
    pub cold_inlet: FluidState,
    /// Hot-side specific heat [J/(kg·K)].
    pub cp_hot: SpecHeatCapacity,
    /// Cold-side specific heat [J/(kg·K)].
    pub cp_cold: SpecHeatCapacity,
}

/// Result of one heat-exchanger evaluation.
#[derive(Clone, Debug)]
pub struct HeatExchangerOutcome {
    pub name: String,
    pub hot_inlet: FluidState,
    pub hot_outlet: FluidState,
    pub cold_inlet: FluidState,
    pub cold_outlet: FluidState,
    /// Actual heat transferred from hot to cold [W].
    pub heat_transfer: Power,
    pub effectiveness: f64,
    /// Whether the pinch-point guard clamped the cold-side rise.
    pub pinch_clamped: bool,
}

impl HeatExchanger {
    pub fn new(
        name: impl Into<String>,
        effectiveness: f64,
        dp_hot: Pressure,
        dp_cold: Pressure,
    ) -> Self {
        Self {
            name: name.into(),
            effectiveness,
            dp_hot,
            dp_cold,
        }
    }
}

impl Component for HeatExchanger {
    type Params = HeatExchangerParams;
    type Outcome = HeatExchangerOutcome;

    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, inlet: &FluidState, params: HeatExchangerParams) -> HeatExchangerOutcome {
        let cold = &params.cold_inlet;

        let c_hot = inlet.mass_flow.value * params.cp_hot;
        let c_cold = cold.mass_flow.value * params.cp_cold;
        let c_min = c_hot.min(c_cold);

        let t_hot_in = inlet.temperature.value;
        let t_cold_in = cold.temperature.value;

        let q_max = c_min * (t_hot_in - t_cold_in);
        let mut q = self.effectiveness * q_max.max(0.0);

        let mut dt_hot = if c_hot > 0.0 { q / c_hot } else { 0.0 };
        let mut dt_cold = if c_cold > 0.0 { q / c_cold } else { 0.0 };

        // Pinch point: the cold outlet must not exceed the hot inlet.
        let mut pinch_clamped = false;
        if t_cold_in + dt_cold > t_hot_in && dt_cold > 0.0 {
            dt_cold = (t_hot_in - t_cold_in).max(0.0);
            q = if c_cold > 0.0 { dt_cold * c_cold } else { 0.0 };
            dt_hot = if c_hot > 0.0 { q / c_hot } else { 0.0 };
            pinch_clamped = true;
            warn!(
                exchanger = %self.name,
                hot_inlet_k = t_hot_in,
                "pinch point: clamped cold outlet to hot inlet temperature"
            );
        }

        let hot_outlet = FluidState {
            pressure: pa(inlet.pressure.value - self.dp_hot.value),
            temperature: k(t_hot_in - dt_hot),
            mass_flow: inlet.mass_flow,
            density: inlet.density,
            enthalpy: if inlet.mass_flow.value > 0.0 {
                inlet.enthalpy - q / inlet.mass_flow.value
            } else {
                inlet.enthalpy
            },
            entropy: inlet.entropy,
            quality: inlet.quality,
            fluid: inlet.fluid.clone(),
        };

        let cold_outlet = FluidState {
            pressure: pa(cold.pressure.value - self.dp_cold.value),
            temperature: k(t_cold_in + dt_cold),
            mass_flow: cold.mass_flow,
            density: cold.density,
            enthalpy: if cold.mass_flow.value > 0.0 {
                cold.enthalpy + q / cold.mass_flow.value
            } else {
                cold.enthalpy
            },
            entropy: cold.entropy,
            quality: cold.quality,
            fluid: cold.fluid.clone(),
        };

        HeatExchangerOutcome {
            name: self.name.clone(),
            hot_inlet: inlet.clone(),
            hot_outlet,
            cold_inlet: params.cold_inlet,
            cold_outlet,
            heat_transfer: w(q),
            effectiveness: self.effectiveness,
            pinch_clamped,
        }
    }
}

impl HeatExchangerOutcome {
    /// Cold-side outlet state.
    pub fn cold_outlet(&self) -> &FluidState {
        &self.cold_outlet
    }
}

impl ComponentOutcome for HeatExchangerOutcome {
    fn outlet(&self) -> &FluidState {
        &self.hot_outlet
    }

    fn record(&self) -> ComponentRecord {
        ComponentRecord::new(self.name.clone(), ComponentKind::HeatExchanger, 0.0)
            .with_metric("heat_transfer_kw", self.heat_transfer.value / 1e3)
            .with_metric("effectiveness", self.effectiveness)
            .with_metric("pinch_clamped", if self.pinch_clamped { 1.0 } else { 0.0 })
    }
}
