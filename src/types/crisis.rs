//! Crisis tier definitions

use colored::Color;
use serde::{Deserialize, Serialize};

/// Severity of crisis language found in an entry.
///
/// Ordered: `None < Moderate < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrisisTier {
    /// No configured keyword matched
    None,
    /// Substance-use indicators
    Moderate,
    /// Hopelessness or acute distress
    High,
    /// Self-harm or suicidal language
    Critical,
}

impl CrisisTier {
    /// Tiers that carry keyword groups, in detection order
    pub const DETECTION_ORDER: [CrisisTier; 3] =
        [CrisisTier::Critical, CrisisTier::High, CrisisTier::Moderate];

    pub fn is_crisis(&self) -> bool {
        *self != CrisisTier::None
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CrisisTier::None => "none",
            CrisisTier::Moderate => "moderate",
            CrisisTier::High => "high",
            CrisisTier::Critical => "critical",
        }
    }

    /// Terminal colour
    pub fn color(&self) -> Color {
        match self {
            CrisisTier::None => Color::BrightBlack,
            CrisisTier::Moderate => Color::Yellow,
            CrisisTier::High => Color::BrightRed,
            CrisisTier::Critical => Color::Red,
        }
    }
}

impl std::fmt::Display for CrisisTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which keyword tripped the detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrisisMatch {
    pub tier: CrisisTier,
    /// Name of the keyword group, e.g. `self_harm`
    pub group: String,
    pub keyword: String,
}
