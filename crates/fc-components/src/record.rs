//! Diagnostic records emitted by component computations.

/// Kind tag for a diagnostic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ComponentKind {
    Pump,
    Turbine,
    Valve,
    Pipe,
    HeatExchanger,
    GasGenerator,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Pump => "pump",
            ComponentKind::Turbine => "turbine",
            ComponentKind::Valve => "valve",
            ComponentKind::Pipe => "pipe",
            ComponentKind::HeatExchanger => "heat_exchanger",
            ComponentKind::GasGenerator => "gas_generator",
        }
    }
}

/// Free-form diagnostic summary of one component evaluation.
///
/// Collected by the cycle solver for reporting. The metric keys are
/// advisory and not part of any stability contract; consumers should treat
/// them as opaque key/value pairs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ComponentRecord {
    pub name: String,
    pub kind: ComponentKind,
    /// Net shaft power [W]; positive = consumed, negative = produced.
    pub power_w: f64,
    pub metrics: Vec<(&'static str, f64)>,
}

impl ComponentRecord {
    pub fn new(name: impl Into<String>, kind: ComponentKind, power_w: f64) -> Self {
        Self {
            name: name.into(),
            kind,
            power_w,
            metrics: Vec::new(),
        }
    }

    pub fn with_metric(mut self, key: &'static str, value: f64) -> Self {
        self.metrics.push((key, value));
        self
    }

    /// Look up a metric by key.
    pub fn metric(&self, key: &str) -> Option<f64> {
        self.metrics.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }
}
