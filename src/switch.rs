use serde::{Deserialize, Serialize};
use tracing::info;

/// The guard's two toggles: battery management itself and the optimization mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchKind {
    Enabled,
    Optimization,
}

impl SwitchKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Enabled => "Enabled",
            Self::Optimization => "Optimization",
        }
    }

    /// Management starts on, optimization starts off.
    pub fn default_on(self) -> bool {
        matches!(self, Self::Enabled)
    }

    fn subject(self) -> &'static str {
        match self {
            Self::Enabled => "Battery management",
            Self::Optimization => "Battery optimization",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationMode {
    Balanced,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationAttributes {
    pub optimization_mode: OptimizationMode,
    pub power_saving: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardSwitch {
    kind: SwitchKind,
    is_on: bool,
}

impl GuardSwitch {
    pub fn new(kind: SwitchKind) -> Self {
        Self {
            kind,
            is_on: kind.default_on(),
        }
    }

    pub fn kind(&self) -> SwitchKind {
        self.kind
    }

    pub fn is_on(&self) -> bool {
        self.is_on
    }

    pub fn turn_on(&mut self) {
        self.is_on = true;
        info!("{} enabled", self.kind.subject());
    }

    pub fn turn_off(&mut self) {
        self.is_on = false;
        info!("{} disabled", self.kind.subject());
    }

    pub fn set(&mut self, on: bool) {
        if on {
            self.turn_on();
        } else {
            self.turn_off();
        }
    }

    /// Entity name under the integration's configured `name`.
    pub fn entity_name(&self, base: &str) -> String {
        format!("{base} {}", self.kind.label())
    }

    /// Only the optimization switch carries attributes.
    pub fn attributes(&self) -> Option<OptimizationAttributes> {
        match self.kind {
            SwitchKind::Enabled => None,
            SwitchKind::Optimization => Some(OptimizationAttributes {
                optimization_mode: if self.is_on {
                    OptimizationMode::Balanced
                } else {
                    OptimizationMode::Disabled
                },
                power_saving: self.is_on,
            }),
        }
    }

    pub fn snapshot(&self, base: &str) -> SwitchSnapshot {
        SwitchSnapshot {
            name: self.entity_name(base),
            kind: self.kind,
            is_on: self.is_on,
            attributes: self.attributes(),
        }
    }
}

/// Published state of one switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchSnapshot {
    pub name: String,
    pub kind: SwitchKind,
    pub is_on: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<OptimizationAttributes>,
}
