//! fc-components: unit models for liquid-rocket feed-system cycles.
//!
//! Provides the physical component library used by the cycle solver:
//! - Pumps and turbines with isentropic-efficiency work models
//! - Valves (fixed Δp or Cv-based, isenthalpic)
//! - Pipes with Darcy-Weisbach friction, minor, and hydrostatic losses
//! - Counter-flow heat exchangers (effectiveness-NTU)
//!
//! Every component implements the [`Component`] trait: a deterministic
//! function from an inlet [`FluidState`] plus model parameters to a typed
//! outcome carrying the outlet state(s), shaft power, and a diagnostic
//! [`ComponentRecord`]. Components hold configuration only — results are
//! never cached on the instance — so one instance can serve any number of
//! repeated or concurrent solves.
//!
//! # Example
//!
//! ```
//! use fc_components::{Component, ComponentOutcome, FluidState, Pump, PumpParams};
//! use fc_core::units::{k, kgm3, kgps, pa};
//!
//! let pump = Pump::new("fuel_pump", 0.65);
//! let inlet = FluidState::new(pa(5e5), k(293.0), kgps(0.5), kgm3(789.0), "ethanol");
//! let out = pump.compute(&inlet, PumpParams::discharge(pa(30e5)));
//!
//! assert_eq!(out.outlet().pressure.value, 30e5);
//! assert!(out.shaft_power().value > 0.0);
//! ```

pub mod common;
pub mod heat_exchanger;
pub mod pipe;
pub mod pump;
pub mod record;
pub mod state;
pub mod traits;
pub mod turbine;
pub mod valve;

// Re-exports
pub use heat_exchanger::{HeatExchanger, HeatExchangerOutcome, HeatExchangerParams};
pub use pipe::{Pipe, PipeLosses, PipeOutcome};
pub use pump::{Pump, PumpOutcome, PumpParams};
pub use record::{ComponentKind, ComponentRecord};
pub use state::{FluidState, QUALITY_SINGLE_PHASE, SpecEnthalpy, SpecEntropy, SpecHeatCapacity};
pub use traits::{Component, ComponentOutcome};
pub use turbine::{Turbine, TurbineOutcome, TurbineParams};
pub use valve::{Valve, ValveOutcome};
