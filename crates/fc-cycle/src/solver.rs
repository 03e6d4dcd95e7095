//! Cycle solver: assembles components into complete engine cycles.
//!
//! Supported architectures:
//! - Pressure-fed: tank → feed line → valve → injector (no turbopump)
//! - Gas-generator: separate GG drives turbine → pumps, with dumped exhaust
//! - Expander: chamber heat drives turbine → pumps (closed cycle)
//!
//! Each architecture is a standalone computation path dispatched once per
//! call. The pump-fed paths resolve the turbine/pump power balance with a
//! bounded bracketed search and fall back to an analytic estimate, marked
//! on the result, when the bracket fails.

use crate::bracket::{BisectionConfig, BracketError, bisect};
use crate::definition::{CycleArchitecture, CycleDefinition};
use crate::error::{CycleError, CycleResult};
use crate::nozzle;
use crate::performance::{BalanceOutcome, CyclePerformance};
use fc_components::{
    Component, ComponentKind, ComponentOutcome, ComponentRecord, FluidState, HeatExchanger,
    HeatExchangerOutcome, HeatExchangerParams, Pump, PumpOutcome, PumpParams, Turbine,
    TurbineOutcome, TurbineParams, Valve,
};
use fc_core::units::{k, kgm3, kgps, pa, w};
use tracing::warn;

/// Expansion ratio assumed when sizing the throat for the flow split.
const SIZING_EXPANSION_RATIO: f64 = 10.0;

/// Tank pressure for pump-fed architectures [Pa]: NPSH margin only.
const PUMP_FED_TANK_PRESSURE: f64 = 3.0e5;

/// Oxidizer tank temperature [K].
const OX_TANK_TEMPERATURE: f64 = 90.0;
/// Fuel tank temperature [K].
const FUEL_TANK_TEMPERATURE: f64 = 293.0;

/// GG chamber pressure as a fraction of main chamber pressure.
const GG_PRESSURE_FRACTION: f64 = 0.9;
/// Turbine exhaust pressure for the gas-generator cycle [Pa]: dumped to ambient.
const GG_EXHAUST_PRESSURE: f64 = 1.0e5;
/// Notional density of GG combustion products at the turbine inlet [kg/m³].
const GG_GAS_DENSITY: f64 = 5.0;
/// Smallest GG mass flow considered by the balance search [kg/s].
const GG_MDOT_MIN: f64 = 1.0e-4;
/// Upper bound of the GG balance search as a fraction of total mass flow.
const GG_MDOT_MAX_FRACTION: f64 = 0.2;

/// Wall recovery temperature of the jacket hot side as a fraction of Tc.
const JACKET_RECOVERY_FRACTION: f64 = 0.4;
/// Specific heat of the jacket hot-side gas [J/(kg·K)].
const JACKET_GAS_CP: f64 = 1500.0;
/// Specific heat of the (heated) fuel on the expander side [J/(kg·K)].
const HEATED_FUEL_CP: f64 = 2500.0;
/// Ratio of specific heats of heated fuel vapour at the expander turbine.
const HEATED_FUEL_GAMMA: f64 = 1.15;
/// Margin added above the physically required minimum discharge pressure [Pa].
const EXPANDER_PRESSURE_MARGIN: f64 = 1.0e5;
/// Width of the expander discharge-pressure search interval [Pa].
const EXPANDER_SEARCH_SPAN: f64 = 50.0e5;

/// Solve the engine cycle and compute system performance.
///
/// Dispatches on the architecture selector. Only definition problems are
/// hard errors; all numerical anomalies inside a solve degrade to a
/// best-effort result (see [`BalanceOutcome`]).
pub fn solve_cycle(defn: &CycleDefinition) -> CycleResult<CyclePerformance> {
    validate(defn)?;

    Ok(match defn.architecture {
        CycleArchitecture::PressureFed => solve_pressure_fed(defn),
        CycleArchitecture::GasGenerator => solve_gas_generator(defn),
        CycleArchitecture::Expander => solve_expander(defn),
    })
}

fn validate(defn: &CycleDefinition) -> CycleResult<()> {
    use fc_core::ensure_finite;

    ensure_finite(defn.thrust.value, "thrust")?;
    ensure_finite(defn.chamber_pressure.value, "chamber pressure")?;
    ensure_finite(defn.mixture_ratio, "mixture ratio")?;
    ensure_finite(defn.c_star.value, "characteristic velocity")?;
    ensure_finite(defn.gamma, "gamma")?;

    if defn.thrust.value <= 0.0 {
        return Err(CycleError::InvalidDefinition {
            what: "thrust must be positive",
        });
    }
    if defn.chamber_pressure.value <= 0.0 {
        return Err(CycleError::InvalidDefinition {
            what: "chamber pressure must be positive",
        });
    }
    if defn.mixture_ratio <= 0.0 {
        return Err(CycleError::InvalidDefinition {
            what: "mixture ratio must be positive",
        });
    }
    if defn.c_star.value <= 0.0 {
        return Err(CycleError::InvalidDefinition {
            what: "characteristic velocity must be positive",
        });
    }
    if defn.gamma <= 1.0 {
        return Err(CycleError::InvalidDefinition {
            what: "gamma must exceed 1",
        });
    }

    Ok(())
}

/// Propellant flow split computed once per solve.
#[derive(Clone, Copy, Debug)]
struct FlowRates {
    /// Total propellant mass flow [kg/s]
    total: f64,
    /// Oxidizer mass flow [kg/s]
    ox: f64,
    /// Fuel mass flow [kg/s]
    fuel: f64,
}

/// Mass flow rates from the thrust target via CF, throat area, and c*.
fn flow_rates(defn: &CycleDefinition) -> FlowRates {
    let pe_pc = nozzle::exit_pressure_ratio(defn.gamma, SIZING_EXPANSION_RATIO);
    let cf = nozzle::thrust_coefficient(defn.gamma, SIZING_EXPANSION_RATIO, pe_pc, 0.0);
    let at = nozzle::throat_area(defn.thrust.value, defn.chamber_pressure.value, cf);
    let total = nozzle::mass_flow_rate(defn.chamber_pressure.value, at, defn.c_star.value);

    let mr = defn.mixture_ratio;
    FlowRates {
        total,
        ox: total * mr / (1.0 + mr),
        fuel: total / (1.0 + mr),
    }
}

// --- Pressure-fed cycle ---

/// Tank → feed line → valve → injector. No turbopump: the tanks must
/// overcome every downstream loss.
fn solve_pressure_fed(defn: &CycleDefinition) -> CyclePerformance {
    let flows = flow_rates(defn);
    let injector_dp = defn.injector_dp().value;
    let pc = defn.chamber_pressure.value;

    let p_tank_ox = pc + injector_dp + defn.ox_feed_line_dp.value + defn.ox_valve_dp.value;
    let p_tank_fuel = pc + injector_dp + defn.fuel_feed_line_dp.value + defn.fuel_valve_dp.value;

    let mut records = Vec::new();

    // Oxidizer path, feed-line loss taken from the configured budget
    let ox_tank = FluidState::new(
        pa(p_tank_ox),
        k(OX_TANK_TEMPERATURE),
        kgps(flows.ox),
        defn.ox_density,
        "oxidizer",
    );
    let ox_after_feed = FluidState {
        pressure: pa(ox_tank.pressure.value - defn.ox_feed_line_dp.value),
        ..ox_tank
    };
    records.push(
        ComponentRecord::new("ox_feed_line", ComponentKind::Pipe, 0.0)
            .with_metric("pressure_drop_bar", defn.ox_feed_line_dp.value / 1e5),
    );
    let ox_valve = Valve::with_dp("ox_valve", defn.ox_valve_dp);
    records.push(ox_valve.compute(&ox_after_feed, ()).record());

    // Fuel path
    let fuel_tank = FluidState::new(
        pa(p_tank_fuel),
        k(FUEL_TANK_TEMPERATURE),
        kgps(flows.fuel),
        defn.fuel_density,
        "fuel",
    );
    let fuel_after_feed = FluidState {
        pressure: pa(fuel_tank.pressure.value - defn.fuel_feed_line_dp.value),
        ..fuel_tank
    };
    records.push(
        ComponentRecord::new("fuel_feed_line", ComponentKind::Pipe, 0.0)
            .with_metric("pressure_drop_bar", defn.fuel_feed_line_dp.value / 1e5),
    );
    let fuel_valve = Valve::with_dp("fuel_valve", defn.fuel_valve_dp);
    records.push(fuel_valve.compute(&fuel_after_feed, ()).record());

    CyclePerformance {
        architecture: CycleArchitecture::PressureFed,
        chamber_pressure: defn.chamber_pressure,
        thrust: defn.thrust,
        total_mass_flow: kgps(flows.total),
        mixture_ratio: defn.mixture_ratio,
        isp_delivered: nozzle::specific_impulse(defn.thrust.value, flows.total),
        c_star: defn.c_star,
        pump_power_total: w(0.0),
        turbine_power_total: w(0.0),
        power_balance_error: w(0.0),
        tank_pressure_ox: pa(p_tank_ox),
        tank_pressure_fuel: pa(p_tank_fuel),
        balance: BalanceOutcome::NotRequired,
        component_records: records,
    }
}

// --- Gas-generator cycle ---

/// Pumps raise both propellants to the chamber circuit; a separate gas
/// generator burns a bleed flow and drives the turbine, whose exhaust is
/// dumped. The GG mass flow is searched until turbine power matches total
/// pump power.
fn solve_gas_generator(defn: &CycleDefinition) -> CyclePerformance {
    let flows = flow_rates(defn);
    let injector_dp = defn.injector_dp().value;
    let pc = defn.chamber_pressure.value;

    let p_ox_discharge = pc + injector_dp + defn.ox_feed_line_dp.value + defn.ox_valve_dp.value;
    let p_fuel_discharge = pc + injector_dp + defn.fuel_feed_line_dp.value + defn.fuel_valve_dp.value;

    let ox_pump = Pump::new("ox_pump", defn.ox_pump_efficiency);
    let fuel_pump = Pump::new("fuel_pump", defn.fuel_pump_efficiency);

    let ox_inlet = FluidState::new(
        pa(PUMP_FED_TANK_PRESSURE),
        k(OX_TANK_TEMPERATURE),
        kgps(flows.ox),
        defn.ox_density,
        "oxidizer",
    );
    let fuel_inlet = FluidState::new(
        pa(PUMP_FED_TANK_PRESSURE),
        k(FUEL_TANK_TEMPERATURE),
        kgps(flows.fuel),
        defn.fuel_density,
        "fuel",
    );

    let ox_out = ox_pump.compute(&ox_inlet, PumpParams::discharge(pa(p_ox_discharge)));
    let fuel_out = fuel_pump.compute(&fuel_inlet, PumpParams::discharge(pa(p_fuel_discharge)));
    let pump_power = ox_out.shaft_power.value + fuel_out.shaft_power.value;

    let turbine = Turbine::new("gg_turbine", defn.turbine_efficiency);
    let turbine_params = TurbineParams {
        outlet_pressure: pa(GG_EXHAUST_PRESSURE),
        gamma: defn.turbine_gas_gamma,
        cp: defn.turbine_gas_cp,
    };
    let gg_inlet = |gg_mdot: f64| {
        FluidState::new(
            pa(GG_PRESSURE_FRACTION * pc),
            defn.turbine_inlet_temperature,
            kgps(gg_mdot),
            kgm3(GG_GAS_DENSITY),
            "gg_exhaust",
        )
    };

    // Residual: turbine power - pump power, driven to zero over the GG flow
    let residual = |gg_mdot: f64| {
        let out = turbine.compute(&gg_inlet(gg_mdot), turbine_params);
        out.shaft_power.value.abs() - pump_power
    };

    let cfg = BisectionConfig::with_x_tol(1e-6);
    let (gg_mdot, balance) = match bisect(
        residual,
        GG_MDOT_MIN,
        GG_MDOT_MAX_FRACTION * flows.total,
        &cfg,
    ) {
        Ok(root) => (root, BalanceOutcome::Converged),
        Err(BracketError::NotBracketed { .. }) => {
            warn!("gas-generator power balance not bracketed; using pressure-ratio estimate");
            (fallback_gg_mass_flow(defn, pump_power), BalanceOutcome::Fallback)
        }
    };

    let turbine_out = turbine.compute(&gg_inlet(gg_mdot), turbine_params);
    let turbine_power = turbine_out.shaft_power.value.abs();

    let records = vec![
        ox_out.record(),
        fuel_out.record(),
        turbine_out.record(),
        ComponentRecord::new("gas_generator", ComponentKind::GasGenerator, 0.0)
            .with_metric("mass_flow_kg_s", gg_mdot),
    ];

    CyclePerformance {
        architecture: CycleArchitecture::GasGenerator,
        chamber_pressure: defn.chamber_pressure,
        thrust: defn.thrust,
        total_mass_flow: kgps(flows.total),
        mixture_ratio: defn.mixture_ratio,
        isp_delivered: nozzle::specific_impulse(defn.thrust.value, flows.total),
        c_star: defn.c_star,
        pump_power_total: w(pump_power),
        turbine_power_total: w(turbine_power),
        power_balance_error: w(turbine_power - pump_power),
        tank_pressure_ox: pa(PUMP_FED_TANK_PRESSURE),
        tank_pressure_fuel: pa(PUMP_FED_TANK_PRESSURE),
        balance,
        component_records: records,
    }
}

/// Closed-form GG flow estimate from the design pressure ratio, used when
/// the balance search is not bracketed.
fn fallback_gg_mass_flow(defn: &CycleDefinition, pump_power: f64) -> f64 {
    let g = defn.turbine_gas_gamma;
    let pr = defn.turbine_pressure_ratio;
    let dt_ideal =
        defn.turbine_inlet_temperature.value * (1.0 - (1.0 / pr).powf((g - 1.0) / g));
    let w_specific = defn.turbine_efficiency * defn.turbine_gas_cp * dt_ideal;
    if w_specific > 0.0 {
        pump_power / w_specific
    } else {
        0.01
    }
}

// --- Expander cycle ---

/// One pure evaluation of the expander cycle at a candidate fuel-pump
/// discharge pressure.
struct ExpanderEval {
    ox_pump: PumpOutcome,
    fuel_pump: PumpOutcome,
    jacket: HeatExchangerOutcome,
    turbine: TurbineOutcome,
    /// Total pump power consumed [W]
    pump_power: f64,
    /// Turbine power produced [W]
    turbine_power: f64,
}

impl ExpanderEval {
    fn residual(&self) -> f64 {
        self.turbine_power - self.pump_power
    }
}

/// Fuel path: tank → pump → cooling jacket → turbine → injector.
/// Ox path: tank → pump → valve → injector.
fn evaluate_expander(defn: &CycleDefinition, flows: &FlowRates, p_fuel_discharge: f64) -> ExpanderEval {
    let injector_dp = defn.injector_dp().value;
    let pc = defn.chamber_pressure.value;

    let ox_pump = Pump::new("ox_pump", defn.ox_pump_efficiency);
    let fuel_pump = Pump::new("fuel_pump", defn.fuel_pump_efficiency);
    let jacket = HeatExchanger::new(
        "regen_jacket",
        defn.hx_effectiveness,
        defn.hx_dp_hot,
        defn.hx_dp_cold,
    );
    let turbine = Turbine::new("expander_turbine", defn.turbine_efficiency);

    let ox_inlet = FluidState::new(
        pa(PUMP_FED_TANK_PRESSURE),
        k(OX_TANK_TEMPERATURE),
        kgps(flows.ox),
        defn.ox_density,
        "oxidizer",
    );
    let p_ox_discharge = pc + injector_dp + defn.ox_valve_dp.value;
    let ox_out = ox_pump.compute(&ox_inlet, PumpParams::discharge(pa(p_ox_discharge)));

    let fuel_inlet = FluidState::new(
        pa(PUMP_FED_TANK_PRESSURE),
        k(FUEL_TANK_TEMPERATURE),
        kgps(flows.fuel),
        defn.fuel_density,
        "fuel",
    );
    let fuel_out = fuel_pump.compute(&fuel_inlet, PumpParams::discharge(pa(p_fuel_discharge)));

    let pump_power = ox_out.shaft_power.value + fuel_out.shaft_power.value;

    // Pumped fuel entering the jacket; pump work appears as a small preheat
    let cold_in = FluidState::new(
        pa(p_fuel_discharge),
        k(FUEL_TANK_TEMPERATURE + fuel_out.shaft_power.value / (flows.fuel * HEATED_FUEL_CP)),
        kgps(flows.fuel),
        defn.fuel_density,
        "fuel",
    );
    // Hot side: chamber-wall gas at its recovery temperature
    let hot_in = FluidState::new(
        defn.chamber_pressure,
        k(JACKET_RECOVERY_FRACTION * defn.chamber_temperature.value),
        kgps(flows.total),
        kgm3(GG_GAS_DENSITY),
        "hot_gas",
    );
    let jacket_out = jacket.compute(
        &hot_in,
        HeatExchangerParams {
            cold_inlet: cold_in,
            cp_hot: JACKET_GAS_CP,
            cp_cold: HEATED_FUEL_CP,
        },
    );

    // Heated fuel expands through the turbine, leaving enough pressure to
    // feed the injector
    let turbine_inlet = FluidState {
        density: kgm3(defn.fuel_density.value * 0.5),
        fluid: "fuel_vapour".into(),
        ..jacket_out.cold_outlet().clone()
    };
    let p_turbine_outlet = pc + injector_dp;
    let turbine_out = turbine.compute(
        &turbine_inlet,
        TurbineParams {
            outlet_pressure: pa(p_turbine_outlet),
            gamma: HEATED_FUEL_GAMMA,
            cp: HEATED_FUEL_CP,
        },
    );
    let turbine_power = turbine_out.shaft_power.value.abs();

    ExpanderEval {
        ox_pump: ox_out,
        fuel_pump: fuel_out,
        jacket: jacket_out,
        turbine: turbine_out,
        pump_power,
        turbine_power,
    }
}

/// The fuel-pump discharge pressure is searched until the turbine, driven
/// by the regeneratively heated fuel, covers both pumps.
fn solve_expander(defn: &CycleDefinition) -> CyclePerformance {
    let flows = flow_rates(defn);
    let injector_dp = defn.injector_dp().value;
    let pc = defn.chamber_pressure.value;

    // Lower bound: discharge must clear the chamber circuit and jacket
    let p_min = pc + injector_dp + defn.hx_dp_cold.value + EXPANDER_PRESSURE_MARGIN;
    let p_max = p_min + EXPANDER_SEARCH_SPAN;

    let cfg = BisectionConfig::with_x_tol(1e3);
    let (p_balanced, balance) = match bisect(
        |p| evaluate_expander(defn, &flows, p).residual(),
        p_min,
        p_max,
        &cfg,
    ) {
        Ok(root) => (root, BalanceOutcome::Converged),
        Err(BracketError::NotBracketed { .. }) => {
            warn!("expander power balance not bracketed; using midpoint estimate");
            (0.5 * (p_min + p_max), BalanceOutcome::Fallback)
        }
    };

    let eval = evaluate_expander(defn, &flows, p_balanced);

    let records = vec![
        eval.ox_pump.record(),
        eval.fuel_pump.record(),
        eval.jacket.record(),
        eval.turbine.record(),
    ];

    CyclePerformance {
        architecture: CycleArchitecture::Expander,
        chamber_pressure: defn.chamber_pressure,
        thrust: defn.thrust,
        total_mass_flow: kgps(flows.total),
        mixture_ratio: defn.mixture_ratio,
        isp_delivered: nozzle::specific_impulse(defn.thrust.value, flows.total),
        c_star: defn.c_star,
        pump_power_total: w(eval.pump_power),
        turbine_power_total: w(eval.turbine_power),
        power_balance_error: w(eval.residual()),
        tank_pressure_ox: pa(PUMP_FED_TANK_PRESSURE),
        tank_pressure_fuel: pa(PUMP_FED_TANK_PRESSURE),
        balance,
        component_records: records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fc_core::units::newtons;

    #[test]
    fn flow_split_follows_mixture_ratio() {
        let defn = CycleDefinition::default();
        let flows = flow_rates(&defn);

        assert!(flows.total > 0.0);
        assert!((flows.ox + flows.fuel - flows.total).abs() < 1e-12);
        assert!((flows.ox / flows.fuel - defn.mixture_ratio).abs() < 1e-9);
    }

    #[test]
    fn flow_scales_with_thrust() {
        let small = flow_rates(&CycleDefinition::default());
        let big = flow_rates(&CycleDefinition {
            thrust: newtons(4000.0),
            ..CycleDefinition::default()
        });
        assert!((big.total / small.total - 2.0).abs() < 1e-9);
    }

    #[test]
    fn non_positive_thrust_is_rejected() {
        let defn = CycleDefinition {
            thrust: newtons(0.0),
            ..CycleDefinition::default()
        };
        assert!(matches!(
            solve_cycle(&defn),
            Err(CycleError::InvalidDefinition { .. })
        ));
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let defn = CycleDefinition {
            mixture_ratio: f64::NAN,
            ..CycleDefinition::default()
        };
        assert!(solve_cycle(&defn).is_err());
    }

    #[test]
    fn gg_fallback_estimate_is_positive() {
        let defn = CycleDefinition::default();
        let mdot = fallback_gg_mass_flow(&defn, 2500.0);
        assert!(mdot > 0.0);
        // W_specific = η·cp·T_in·(1-(1/PR)^((γ-1)/γ))
        let g = defn.turbine_gas_gamma;
        let dt = 800.0 * (1.0 - (0.1_f64).powf((g - 1.0) / g));
        let expected = 2500.0 / (0.6 * 1500.0 * dt);
        assert!((mdot - expected).abs() < 1e-12);
    }
}
