//! Agent maturity levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How much autonomy an agent has been granted.
///
/// Levels are totally ordered: `Student < Intern < Supervised < Autonomous`.
/// Policy rules name a minimum level and any agent at or above it passes.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AgentMaturity {
    /// Newly introduced agent; read-only actions only
    #[default]
    Student,
    /// Limited actions, typically streaming and presentation
    Intern,
    /// State-changing actions under human supervision
    Supervised,
    /// Fully trusted agent
    Autonomous,
}

impl AgentMaturity {
    /// All levels, lowest first.
    pub const ALL: [Self; 4] = [
        Self::Student,
        Self::Intern,
        Self::Supervised,
        Self::Autonomous,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Intern => "intern",
            Self::Supervised => "supervised",
            Self::Autonomous => "autonomous",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "student" => Some(Self::Student),
            "intern" => Some(Self::Intern),
            "supervised" => Some(Self::Supervised),
            "autonomous" => Some(Self::Autonomous),
            _ => None,
        }
    }

    /// Whether this level satisfies a required minimum.
    pub fn meets(&self, minimum: Self) -> bool {
        *self >= minimum
    }
}

impl fmt::Display for AgentMaturity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(AgentMaturity::Student < AgentMaturity::Intern);
        assert!(AgentMaturity::Intern < AgentMaturity::Supervised);
        assert!(AgentMaturity::Supervised < AgentMaturity::Autonomous);
    }

    #[test]
    fn test_default_is_lowest_level() {
        assert_eq!(AgentMaturity::default(), AgentMaturity::Student);
        assert_eq!(AgentMaturity::default(), AgentMaturity::ALL[0]);
    }

    #[test]
    fn test_meets() {
        assert!(AgentMaturity::Autonomous.meets(AgentMaturity::Supervised));
        assert!(AgentMaturity::Supervised.meets(AgentMaturity::Supervised));
        assert!(!AgentMaturity::Intern.meets(AgentMaturity::Supervised));
    }

    #[test]
    fn test_from_str() {
        assert_eq!(AgentMaturity::from_str("INTERN"), Some(AgentMaturity::Intern));
        assert_eq!(AgentMaturity::from_str(" autonomous "), Some(AgentMaturity::Autonomous));
        assert_eq!(AgentMaturity::from_str("expert"), None);

        for level in AgentMaturity::ALL {
            assert_eq!(AgentMaturity::from_str(level.as_str()), Some(level));
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&AgentMaturity::Supervised).unwrap();
        assert_eq!(json, "\"supervised\"");
        let parsed: AgentMaturity = serde_json::from_str("\"student\"").unwrap();
        assert_eq!(parsed, AgentMaturity::Student);
    }
}
