//! Cycle performance aggregate.

use fc_components::ComponentRecord;
use fc_core::units::{Force, MassRate, Power, Pressure, Velocity};

use crate::definition::CycleArchitecture;

/// How the turbine/pump power balance was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BalanceOutcome {
    /// No turbomachinery in this architecture; nothing to balance.
    NotRequired,
    /// The bracketed search converged on the balance point.
    Converged,
    /// The bracket failed; the result carries an analytic estimate.
    Fallback,
}

impl BalanceOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, BalanceOutcome::Fallback)
    }
}

/// System-level results of one cycle solve.
///
/// Created once per [`crate::solve_cycle`] call and never mutated after
/// return. The scalar fields are the stable output surface; the component
/// records are advisory diagnostics for reporting.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CyclePerformance {
    pub architecture: CycleArchitecture,
    pub chamber_pressure: Pressure,
    pub thrust: Force,
    pub total_mass_flow: MassRate,
    /// O/F mass ratio
    pub mixture_ratio: f64,
    /// Delivered specific impulse [s], accounting for cycle losses
    pub isp_delivered: f64,
    pub c_star: Velocity,
    /// Total power consumed by pumps (0 for pressure-fed)
    pub pump_power_total: Power,
    /// Total power produced by the turbine (0 for pressure-fed)
    pub turbine_power_total: Power,
    /// Residual turbine power minus pump power; small but not exactly zero
    pub power_balance_error: Power,
    pub tank_pressure_ox: Pressure,
    pub tank_pressure_fuel: Pressure,
    /// How the power balance was resolved
    pub balance: BalanceOutcome,
    /// Per-component diagnostic summaries, in evaluation order
    pub component_records: Vec<ComponentRecord>,
}
