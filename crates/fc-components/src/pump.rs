//! Pump component model.

use crate::common::{estimate_cp, usable_density};
use crate::record::{ComponentKind, ComponentRecord};
use crate::state::{FluidState, SpecHeatCapacity};
use crate::traits::{Component, ComponentOutcome};
use fc_core::units::{Power, Pressure, k, kgm3, w};

/// Centrifugal or positive-displacement pump.
///
/// Raises a (nearly) incompressible stream to a required discharge
/// pressure using an isentropic-efficiency work model:
///
/// ```text
/// Δp       = p_out - p_in
/// w_ideal  = Δp / ρ
/// w_actual = w_ideal / η
/// P_shaft  = w_actual · ṁ
/// ```
///
/// The absorbed work heats the fluid: ΔT = w_actual / cp, with cp
/// estimated from density when the caller does not supply one. Density and
/// entropy pass through unchanged (the entropy rise from inefficiency is
/// not modelled).
///
/// Pathological inputs are clamped rather than rejected: η ≤ 0 is treated
/// as 1, ρ ≤ 0 falls back to 1000 kg/m³.
#[derive(Clone, Debug)]
pub struct Pump {
    /// Component name for diagnostics
    pub name: String,
    /// Isentropic efficiency (0 < η ≤ 1)
    pub efficiency: f64,
}

/// Inputs for one pump evaluation.
#[derive(Clone, Copy, Debug)]
pub struct PumpParams {
    /// Required discharge pressure [Pa].
    pub outlet_pressure: Pressure,
    /// Specific heat for the outlet temperature rise; estimated from
    /// density when `None`.
    pub cp: Option<SpecHeatCapacity>,
}

impl PumpParams {
    /// Params with only a discharge-pressure target; cp will be estimated.
    pub fn discharge(outlet_pressure: Pressure) -> Self {
        Self {
            outlet_pressure,
            cp: None,
        }
    }
}

/// Result of one pump evaluation.
#[derive(Clone, Debug)]
pub struct PumpOutcome {
    pub name: String,
    pub inlet: FluidState,
    pub outlet: FluidState,
    /// Δp across the pump [Pa]; negative if the requested discharge is
    /// below the inlet pressure.
    pub pressure_rise: Pressure,
    /// Shaft power consumed [W].
    pub shaft_power: Power,
    pub efficiency: f64,
}

impl Pump {
    pub fn new(name: impl Into<String>, efficiency: f64) -> Self {
        Self {
            name: name.into(),
            efficiency,
        }
    }
}

impl Component for Pump {
    type Params = PumpParams;
    type Outcome = PumpOutcome;

    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, inlet: &FluidState, params: PumpParams) -> PumpOutcome {
        let dp = params.outlet_pressure.value - inlet.pressure.value;
        let rho = usable_density(inlet.density.value);
        let mdot = inlet.mass_flow.value;

        // Ideal (isentropic) work per unit mass [J/kg]
        let w_ideal = dp / rho;
        // Actual work per unit mass; η ≤ 0 degenerates to the ideal work
        let w_actual = if self.efficiency > 0.0 {
            w_ideal / self.efficiency
        } else {
            w_ideal
        };

        let p_shaft = w_actual * mdot;

        let cp = match params.cp {
            Some(cp) if cp > 0.0 => cp,
            _ => estimate_cp(rho),
        };
        let dt = w_actual / cp;

        let outlet = FluidState {
            pressure: params.outlet_pressure,
            temperature: k(inlet.temperature.value + dt),
            mass_flow: inlet.mass_flow,
            density: kgm3(rho),
            enthalpy: inlet.enthalpy + w_actual,
            entropy: inlet.entropy,
            quality: inlet.quality,
            fluid: inlet.fluid.clone(),
        };

        PumpOutcome {
            name: self.name.clone(),
            inlet: inlet.clone(),
            outlet,
            pressure_rise: fc_core::units::pa(dp),
            shaft_power: w(p_shaft),
            efficiency: self.efficiency,
        }
    }
}

impl ComponentOutcome for PumpOutcome {
    fn outlet(&self) -> &FluidState {
        &self.outlet
    }

    fn shaft_power(&self) -> Power {
        self.shaft_power
    }

    fn record(&self) -> ComponentRecord {
        ComponentRecord::new(self.name.clone(), ComponentKind::Pump, self.shaft_power.value)
            .with_metric("pressure_rise_bar", self.pressure_rise.value / 1e5)
            .with_metric("efficiency", self.efficiency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fc_core::units::{k, kgm3, kgps, pa};

    fn ethanol_inlet() -> FluidState {
        FluidState::new(pa(5e5), k(293.0), kgps(0.5), kgm3(789.0), "ethanol")
    }

    #[test]
    fn basic_pressure_rise() {
        let pump = Pump::new("fuel_pump", 0.65);
        let out = pump.compute(&ethanol_inlet(), PumpParams::discharge(pa(30e5)));

        assert_eq!(out.outlet.pressure.value, 30e5);
        assert_eq!(out.outlet.mass_flow.value, 0.5);
        // heated by inefficiency
        assert!(out.outlet.temperature.value > 293.0);
    }

    #[test]
    fn reference_work_and_power() {
        // Δp = 25 bar, ρ = 789, η = 0.65, ṁ = 0.5:
        //   w_ideal  = 25e5/789   ≈ 3168.6 J/kg
        //   w_actual ≈ 4874.7 J/kg
        //   P_shaft  ≈ 2437.4 W
        let pump = Pump::new("fuel_pump", 0.65);
        let out = pump.compute(&ethanol_inlet(), PumpParams::discharge(pa(30e5)));

        assert!((out.pressure_rise.value - 25e5).abs() < 1e-6);
        assert!((out.shaft_power.value - 2437.4).abs() < 0.5);
        assert!(out.shaft_power.value > 0.0); // consumes power
    }

    #[test]
    fn more_head_more_power() {
        let pump = Pump::new("pump", 0.65);
        let p1 = pump.compute(&ethanol_inlet(), PumpParams::discharge(pa(20e5)));
        let p2 = pump.compute(&ethanol_inlet(), PumpParams::discharge(pa(50e5)));
        assert!(p2.shaft_power.value > p1.shaft_power.value);
    }

    #[test]
    fn higher_efficiency_less_power() {
        let low = Pump::new("low", 0.50).compute(&ethanol_inlet(), PumpParams::discharge(pa(30e5)));
        let high = Pump::new("high", 0.80).compute(&ethanol_inlet(), PumpParams::discharge(pa(30e5)));
        assert!(high.shaft_power.value < low.shaft_power.value);
    }

    #[test]
    fn non_positive_efficiency_degenerates_to_ideal() {
        let broken = Pump::new("broken", 0.0).compute(&ethanol_inlet(), PumpParams::discharge(pa(30e5)));
        let ideal = Pump::new("ideal", 1.0).compute(&ethanol_inlet(), PumpParams::discharge(pa(30e5)));
        assert!((broken.shaft_power.value - ideal.shaft_power.value).abs() < 1e-9);
    }

    #[test]
    fn zero_density_falls_back() {
        let inlet = FluidState {
            density: kgm3(0.0),
            ..ethanol_inlet()
        };
        let out = Pump::new("pump", 0.65).compute(&inlet, PumpParams::discharge(pa(30e5)));
        assert!(out.shaft_power.value.is_finite());
        assert_eq!(out.outlet.density.value, 1000.0);
    }

    #[test]
    fn custom_cp_changes_temperature_rise() {
        let pump = Pump::new("pump", 0.65);
        let low_cp = pump.compute(
            &ethanol_inlet(),
            PumpParams {
                outlet_pressure: pa(30e5),
                cp: Some(1000.0),
            },
        );
        let high_cp = pump.compute(
            &ethanol_inlet(),
            PumpParams {
                outlet_pressure: pa(30e5),
                cp: Some(4000.0),
            },
        );
        // Same power, but higher cp → less ΔT
        assert!(low_cp.outlet.temperature.value > high_cp.outlet.temperature.value);
    }

    #[test]
    fn record_carries_metrics() {
        let pump = Pump::new("ox_pump", 0.65);
        let out = pump.compute(&ethanol_inlet(), PumpParams::discharge(pa(30e5)));
        let rec = out.record();
        assert_eq!(rec.kind, ComponentKind::Pump);
        assert!(rec.metric("pressure_rise_bar").is_some());
        assert_eq!(rec.metric("efficiency"), Some(0.65));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn power_monotonic_in_pressure_rise(
                dp_lo in 1e5_f64..20e5,
                extra in 1e4_f64..30e5,
            ) {
                let pump = Pump::new("pump", 0.65);
                let inlet = ethanol_inlet();
                let lo = pump.compute(&inlet, PumpParams::discharge(pa(inlet.pressure.value + dp_lo)));
                let hi = pump.compute(&inlet, PumpParams::discharge(pa(inlet.pressure.value + dp_lo + extra)));
                prop_assert!(hi.shaft_power.value > lo.shaft_power.value);
            }

            #[test]
            fn mass_flow_conserved(mdot in 1e-3_f64..50.0) {
                let inlet = FluidState {
                    mass_flow: kgps(mdot),
                    ..ethanol_inlet()
                };
                let out = Pump::new("pump", 0.7).compute(&inlet, PumpParams::discharge(pa(40e5)));
                prop_assert_eq!(out.outlet.mass_flow.value, mdot);
            }
        }
    }
}
