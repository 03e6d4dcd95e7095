//! Cycle definition: architecture selection and operating point.

use crate::error::CycleError;
use fc_core::units::{Density, Force, Pressure, Temperature, Velocity, k, kgm3, mps, newtons, pa};
use std::fmt;
use std::str::FromStr;

/// Engine feed-system architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CycleArchitecture {
    /// Tank pressure alone pushes propellant into the chamber.
    PressureFed,
    /// A gas generator drives the turbine; exhaust is dumped.
    GasGenerator,
    /// Regeneratively heated fuel drives the turbine (closed cycle).
    Expander,
}

impl CycleArchitecture {
    pub fn as_str(&self) -> &'static str {
        match self {
            CycleArchitecture::PressureFed => "pressure_fed",
            CycleArchitecture::GasGenerator => "gas_generator",
            CycleArchitecture::Expander => "expander",
        }
    }
}

impl fmt::Display for CycleArchitecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CycleArchitecture {
    type Err = CycleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pressure_fed" => Ok(CycleArchitecture::PressureFed),
            "gas_generator" => Ok(CycleArchitecture::GasGenerator),
            "expander" => Ok(CycleArchitecture::Expander),
            other => Err(CycleError::UnknownArchitecture {
                name: other.to_string(),
            }),
        }
    }
}

/// Complete definition of an engine cycle to solve.
///
/// Immutable input to [`crate::solve_cycle`]: the solver never mutates a
/// definition. Defaults describe a 2 kN N₂O/ethanol-class operating point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CycleDefinition {
    pub architecture: CycleArchitecture,

    // Operating point
    pub chamber_pressure: Pressure,
    pub thrust: Force,
    /// O/F mass ratio
    pub mixture_ratio: f64,
    /// Characteristic velocity of the propellant combination
    pub c_star: Velocity,
    /// Ratio of specific heats of the combustion products
    pub gamma: f64,
    /// Combustion chamber temperature
    pub chamber_temperature: Temperature,

    // Propellant properties
    pub ox_density: Density,
    pub fuel_density: Density,

    // Turbopump parameters (gas-generator / expander)
    pub ox_pump_efficiency: f64,
    pub fuel_pump_efficiency: f64,
    pub turbine_efficiency: f64,
    /// GG exhaust / turbine inlet temperature
    pub turbine_inlet_temperature: Temperature,
    /// Design pressure ratio, used by the analytic power-balance fallback
    pub turbine_pressure_ratio: f64,
    pub turbine_gas_gamma: f64,
    /// Specific heat of the turbine working gas [J/(kg·K)]
    pub turbine_gas_cp: f64,

    // Feed system losses
    pub ox_feed_line_dp: Pressure,
    pub fuel_feed_line_dp: Pressure,
    pub ox_valve_dp: Pressure,
    pub fuel_valve_dp: Pressure,
    /// Injector pressure drop as a fraction of chamber pressure
    pub injector_dp_fraction: f64,

    // Expander cycle regen-jacket parameters
    pub hx_effectiveness: f64,
    /// Chamber-side pressure drop
    pub hx_dp_hot: Pressure,
    /// Coolant-side pressure drop
    pub hx_dp_cold: Pressure,
}

impl Default for CycleDefinition {
    fn default() -> Self {
        Self {
            architecture: CycleArchitecture::PressureFed,

            chamber_pressure: pa(2.0e6),
            thrust: newtons(2000.0),
            mixture_ratio: 4.0,
            c_star: mps(1550.0),
            gamma: 1.21,
            chamber_temperature: k(3100.0),

            ox_density: kgm3(1220.0),
            fuel_density: kgm3(789.0),

            ox_pump_efficiency: 0.65,
            fuel_pump_efficiency: 0.65,
            turbine_efficiency: 0.60,
            turbine_inlet_temperature: k(800.0),
            turbine_pressure_ratio: 10.0,
            turbine_gas_gamma: 1.3,
            turbine_gas_cp: 1500.0,

            ox_feed_line_dp: pa(50_000.0),
            fuel_feed_line_dp: pa(50_000.0),
            ox_valve_dp: pa(50_000.0),
            fuel_valve_dp: pa(50_000.0),
            injector_dp_fraction: 0.15,

            hx_effectiveness: 0.80,
            hx_dp_hot: pa(50_000.0),
            hx_dp_cold: pa(100_000.0),
        }
    }
}

impl CycleDefinition {
    /// Injector pressure drop at the design chamber pressure.
    pub fn injector_dp(&self) -> Pressure {
        pa(self.injector_dp_fraction * self.chamber_pressure.value)
    }
}
