//! Core traits for component models.

use crate::record::ComponentRecord;
use crate::state::FluidState;
use fc_core::units::Power;

/// Trait for physical unit models in a feed-system cycle.
///
/// Each component is a deterministic function of its inlet state and a set
/// of model-specific parameters. A computation returns a typed outcome
/// carrying the outlet state(s), the net shaft power, and a diagnostic
/// record; nothing is cached on the component instance, so a single
/// instance may be reused across repeated or concurrent solves.
pub trait Component {
    /// Model-specific inputs beyond the inlet state.
    type Params;
    /// Typed result of one evaluation.
    type Outcome: ComponentOutcome;

    /// Component name for diagnostics and identification.
    fn name(&self) -> &str;

    /// Run the component model.
    fn compute(&self, inlet: &FluidState, params: Self::Params) -> Self::Outcome;
}

/// Common surface of a component evaluation result.
pub trait ComponentOutcome {
    /// Primary outlet state. Components with two streams (heat exchangers)
    /// return the hot-side outlet here and expose the other stream through
    /// an accessor on the concrete type.
    fn outlet(&self) -> &FluidState;

    /// Net shaft power transfer.
    ///
    /// Sign convention:
    /// - Positive: power consumed from the shaft (pumps)
    /// - Negative: power delivered to the shaft (turbines)
    ///
    /// Components without rotating machinery return 0 W.
    fn shaft_power(&self) -> Power {
        fc_core::units::w(0.0)
    }

    /// Diagnostic summary for reporting.
    fn record(&self) -> ComponentRecord;
}
