use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse urgency of a report.
///
/// Variants are declared in ascending order, so `Ord` gives
/// `Low < Moderate < High` and escalation is a plain `max`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low,
    Moderate,
    High,
}

impl Severity {
    /// Raise the severity to `level` if it is higher. Never lowers it.
    pub fn escalate(&mut self, level: Severity) {
        *self = (*self).max(level);
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "moderate" => Ok(Severity::Moderate),
            "high" => Ok(Severity::High),
            other => Err(format!("Unknown severity: {}", other)),
        }
    }
}
