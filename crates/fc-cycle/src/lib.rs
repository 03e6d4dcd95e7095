//! fc-cycle: steady-state cycle solver for liquid-rocket feed systems.
//!
//! Connects the `fc-components` unit models (pumps, turbines, valves,
//! pipes, heat exchangers) into complete engine cycles and solves for the
//! self-consistent operating point of each:
//!
//! - **Pressure-fed** — tank pressure overcomes all downstream losses; no
//!   turbomachinery, no iteration.
//! - **Gas-generator** — a bleed flow burned in a gas generator drives the
//!   turbine; the GG mass flow is searched until turbine power equals
//!   total pump power.
//! - **Expander** — regeneratively heated fuel drives the turbine; the
//!   fuel-pump discharge pressure is searched for the power balance.
//!
//! One solve is a single synchronous, deterministic call: a bounded number
//! of component evaluations, no background work, no shared state. When a
//! power-balance search cannot bracket a root it degrades to an analytic
//! estimate and marks the result with [`BalanceOutcome::Fallback`] rather
//! than failing.
//!
//! # Example
//!
//! ```
//! use fc_cycle::{CycleArchitecture, CycleDefinition, solve_cycle};
//!
//! let defn = CycleDefinition {
//!     architecture: CycleArchitecture::GasGenerator,
//!     ..CycleDefinition::default()
//! };
//! let perf = solve_cycle(&defn).unwrap();
//!
//! assert!(perf.pump_power_total.value > 0.0);
//! assert!(perf.isp_delivered > 0.0);
//! ```

pub mod bracket;
pub mod definition;
pub mod error;
pub mod nozzle;
pub mod performance;
pub mod solver;

pub use bracket::{BisectionConfig, BracketError, bisect};
pub use definition::{CycleArchitecture, CycleDefinition};
pub use error::{CycleError, CycleResult};
pub use performance::{BalanceOutcome, CyclePerformance};
pub use solver::solve_cycle;
