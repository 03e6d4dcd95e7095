//! Fluid state definitions.

use fc_core::units::{Density, MassRate, Pressure, Temperature};

/// Specific enthalpy [J/kg].
///
/// Not part of uom's standard set, so we use f64 with clear documentation.
pub type SpecEnthalpy = f64;

/// Specific entropy [J/(kg·K)].
///
/// Not part of uom's standard set, so we use f64 with clear documentation.
pub type SpecEntropy = f64;

/// Specific heat capacity [J/(kg·K)].
pub type SpecHeatCapacity = f64;

/// Vapour quality sentinel for a subcooled or superheated (single-phase) state.
pub const QUALITY_SINGLE_PHASE: f64 = -1.0;

/// Thermodynamic state of a fluid at one point in the feed system.
///
/// A pure value record: components never mutate a `FluidState` in place,
/// they produce a fresh outlet state from an inlet state. Mass flow is
/// carried with the state because every component in this library conserves
/// it (no stream is split or merged inside a component; heat exchangers
/// keep their hot and cold streams as two separate states).
#[derive(Debug, Clone, PartialEq)]
pub struct FluidState {
    /// Static pressure [Pa].
    pub pressure: Pressure,
    /// Temperature [K].
    pub temperature: Temperature,
    /// Mass flow rate carried by this stream [kg/s].
    pub mass_flow: MassRate,
    /// Density [kg/m³].
    pub density: Density,
    /// Specific enthalpy [J/kg].
    pub enthalpy: SpecEnthalpy,
    /// Specific entropy [J/(kg·K)].
    pub entropy: SpecEntropy,
    /// Vapour quality; [`QUALITY_SINGLE_PHASE`] when not two-phase.
    pub quality: f64,
    /// Fluid label for diagnostics. No physical effect.
    pub fluid: String,
}

impl Default for FluidState {
    fn default() -> Self {
        Self {
            pressure: Pressure::default(),
            temperature: Temperature::default(),
            mass_flow: MassRate::default(),
            density: Density::default(),
            enthalpy: 0.0,
            entropy: 0.0,
            quality: QUALITY_SINGLE_PHASE,
            fluid: String::new(),
        }
    }
}

impl FluidState {
    /// Create a single-phase state from the commonly known properties.
    ///
    /// Enthalpy and entropy start at zero (only differences matter to the
    /// component models here); quality is the single-phase sentinel.
    pub fn new(
        pressure: Pressure,
        temperature: Temperature,
        mass_flow: MassRate,
        density: Density,
        fluid: impl Into<String>,
    ) -> Self {
        Self {
            pressure,
            temperature,
            mass_flow,
            density,
            fluid: fluid.into(),
            ..Self::default()
        }
    }

    /// Whether the state lies inside the two-phase dome.
    pub fn is_two_phase(&self) -> bool {
        (0.0..=1.0).contains(&self.quality)
    }
}
