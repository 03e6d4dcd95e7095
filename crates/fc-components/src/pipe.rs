//! Pipe / feed line component with Darcy-Weisbach friction.

use crate::common::usable_density;
use crate::record::{ComponentKind, ComponentRecord};
use crate::state::FluidState;
use crate::traits::{Component, ComponentOutcome};
use fc_core::units::constants::G0_MPS2;
use fc_core::units::{DynVisc, Length, pa};

/// Feed line segment with friction, minor, and hydrostatic losses.
///
/// ```text
/// v   = ṁ / (ρ·A)
/// Re  = ρ·v·D / μ
/// f   = 64/Re                         (laminar, Re < 2300)
///     = 0.25 / log10(ε/D/3.7 + 5.74/Re^0.9)²   (Swamee-Jain)
/// Δp  = f·(L/D)·½ρv² + K·½ρv² + ρ·g₀·Δz
/// ```
///
/// The hydrostatic term is positive for upward flow. Temperature and
/// composition pass through unchanged.
#[derive(Clone, Debug)]
pub struct Pipe {
    /// Component name for diagnostics
    pub name: String,
    /// Inner diameter
    pub diameter: Length,
    /// Segment length
    pub length: Length,
    /// Elevation change (positive = upward)
    pub height_change: Length,
    /// Sum of minor loss coefficients for fittings, bends, valves
    pub k_minor: f64,
    /// Absolute surface roughness
    pub roughness: Length,
    /// Dynamic viscosity of the carried fluid
    pub mu: DynVisc,
}

/// Loss breakdown for one pipe evaluation.
#[derive(Clone, Copy, Debug, Default)]
pub struct PipeLosses {
    pub friction_pa: f64,
    pub minor_pa: f64,
    pub gravity_pa: f64,
}

impl PipeLosses {
    pub fn total(&self) -> f64 {
        self.friction_pa + self.minor_pa + self.gravity_pa
    }
}

/// Result of one pipe evaluation.
#[derive(Clone, Debug)]
pub struct PipeOutcome {
    pub name: String,
    pub inlet: FluidState,
    pub outlet: FluidState,
    pub losses: PipeLosses,
    /// Mean flow velocity [m/s]
    pub velocity: f64,
    pub reynolds: f64,
}

impl Pipe {
    pub fn new(
        name: impl Into<String>,
        diameter: Length,
        length: Length,
        height_change: Length,
        k_minor: f64,
        roughness: Length,
        mu: DynVisc,
    ) -> Self {
        Self {
            name: name.into(),
            diameter,
            length,
            height_change,
            k_minor,
            roughness,
            mu,
        }
    }

    /// Darcy friction factor from the Reynolds number.
    fn friction_factor(&self, reynolds: f64) -> f64 {
        if reynolds < 2300.0 {
            // Laminar
            64.0 / reynolds.max(1.0)
        } else {
            // Turbulent: Swamee-Jain explicit fit of Colebrook
            let e_d = self.roughness.value / self.diameter.value;
            let log_arg = e_d / 3.7 + 5.74 / reynolds.powf(0.9);
            0.25 / log_arg.log10().powi(2)
        }
    }
}

impl Component for Pipe {
    type Params = ();
    type Outcome = PipeOutcome;

    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, inlet: &FluidState, _params: ()) -> PipeOutcome {
        let rho = usable_density(inlet.density.value);
        let d = self.diameter.value;

        let area = std::f64::consts::PI * (d / 2.0).powi(2);
        let velocity = if area > 0.0 {
            inlet.mass_flow.value / (rho * area)
        } else {
            0.0
        };
        let reynolds = if self.mu.value > 0.0 {
            rho * velocity * d / self.mu.value
        } else {
            0.0
        };

        let dyn_head = 0.5 * rho * velocity.powi(2);
        let friction_pa = if reynolds > 0.0 {
            self.friction_factor(reynolds) * (self.length.value / d) * dyn_head
        } else {
            0.0
        };

        let losses = PipeLosses {
            friction_pa,
            minor_pa: self.k_minor * dyn_head,
            gravity_pa: rho * G0_MPS2 * self.height_change.value,
        };

        let outlet = FluidState {
            pressure: pa(inlet.pressure.value - losses.total()),
            temperature: inlet.temperature,
            mass_flow: inlet.mass_flow,
            density: inlet.density,
            enthalpy: inlet.enthalpy,
            entropy: inlet.entropy,
            quality: inlet.quality,
            fluid: inlet.fluid.clone(),
        };

        PipeOutcome {
            name: self.name.clone(),
            inlet: inlet.clone(),
            outlet,
            losses,
            velocity,
            reynolds,
        }
    }
}

impl ComponentOutcome for PipeOutcome {
    fn outlet(&self) -> &FluidState {
        &self.outlet
    }

    fn record(&self) -> ComponentRecord {
        ComponentRecord::new(self.name.clone(), ComponentKind::Pipe, 0.0)
            .with_metric("pressure_drop_bar", self.losses.total() / 1e5)
            .with_metric("velocity_m_s", self.velocity)
            .with_metric("reynolds", self.reynolds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ComponentOutcome;
    use fc_core::units::{k, kgm3, kgps, m};
    use uom::si::dynamic_viscosity::pascal_second;

    fn feed_line(length_m: f64) -> Pipe {
        Pipe::new(
            "feed_line",
            m(0.012),
            m(length_m),
            m(0.0),
            5.0,
            m(1.5e-6),
            DynVisc::new::<pascal_second>(1.2e-3),
        )
    }

    fn ethanol_inlet() -> FluidState {
        FluidState::new(
            fc_core::units::pa(25e5),
            k(293.0),
            kgps(0.5),
            kgm3(789.0),
            "ethanol",
        )
    }

    #[test]
    fn flow_loses_pressure() {
        let out = feed_line(1.0).compute(&ethanol_inlet(), ());
        assert!(out.outlet.pressure.value < 25e5);
        assert_eq!(out.outlet.mass_flow.value, 0.5);
        assert!(out.reynolds > 2300.0, "expected turbulent flow");
    }

    #[test]
    fn no_shaft_power() {
        let out = feed_line(1.0).compute(&ethanol_inlet(), ());
        assert_eq!(out.shaft_power().value, 0.0);
    }

    #[test]
    fn longer_line_higher_drop() {
        let short = feed_line(0.5).compute(&ethanol_inlet(), ());
        let long = feed_line(3.0).compute(&ethanol_inlet(), ());
        assert!(long.outlet.pressure.value < short.outlet.pressure.value);
    }

    #[test]
    fn zero_flow_leaves_only_static_head() {
        let pipe = Pipe::new(
            "riser",
            m(0.012),
            m(1.0),
            m(2.0),
            5.0,
            m(1.5e-6),
            DynVisc::new::<pascal_second>(1.2e-3),
        );
        let inlet = FluidState {
            mass_flow: kgps(0.0),
            ..ethanol_inlet()
        };
        let out = pipe.compute(&inlet, ());

        assert_eq!(out.losses.friction_pa, 0.0);
        assert_eq!(out.losses.minor_pa, 0.0);
        let expected = 789.0 * G0_MPS2 * 2.0;
        assert!((out.losses.gravity_pa - expected).abs() < 1e-9);
    }

    #[test]
    fn laminar_friction_factor() {
        let pipe = feed_line(1.0);
        assert!((pipe.friction_factor(1000.0) - 0.064).abs() < 1e-12);
    }

    #[test]
    fn record_breakdown() {
        let out = feed_line(1.0).compute(&ethanol_inlet(), ());
        let rec = out.record();
        assert_eq!(rec.kind, ComponentKind::Pipe);
        assert!(rec.metric("velocity_m_s").unwrap() > 0.0);
        assert!(rec.metric("reynolds").unwrap() > 0.0);
    }
}
