//! Crisis detector: tiered keyword scan
//!
//! Tiers are checked strictly critical → high → moderate and the first tier
//! with any hit wins, so lower-tier words never mask a critical phrase.

use tracing::warn;

use crate::config::CrisisConfig;
use crate::types::{CrisisMatch, CrisisTier};

/// Keyword scanner over a replaceable [`CrisisConfig`]
#[derive(Debug, Clone)]
pub struct CrisisDetector {
    keywords: CrisisConfig,
}

impl CrisisDetector {
    /// Keywords are lowercased once here; matching lowercases the text.
    pub fn new(config: &CrisisConfig) -> Self {
        let mut keywords = config.clone();
        for tier in CrisisTier::DETECTION_ORDER {
            if let Some(groups) = keywords.groups_mut(tier) {
                for group in groups.iter_mut() {
                    group.keywords = group
                        .keywords
                        .iter()
                        .map(|k| k.trim().to_lowercase())
                        .filter(|k| !k.is_empty())
                        .collect();
                }
            }
        }
        Self { keywords }
    }

    /// First match in severity order, or `None` when the text is clear
    pub fn scan(&self, text: &str) -> Option<CrisisMatch> {
        let lower = text.to_lowercase().replace('\u{2019}', "'");
        for tier in CrisisTier::DETECTION_ORDER {
            for group in self.keywords.groups(tier) {
                if let Some(keyword) = group.keywords.iter().find(|k| lower.contains(k.as_str())) {
                    warn!(tier = tier.as_str(), group = group.name.as_str(), "crisis language detected");
                    return Some(CrisisMatch {
                        tier,
                        group: group.name.clone(),
                        keyword: keyword.clone(),
                    });
                }
            }
        }
        None
    }

    /// Tier only
    pub fn detect(&self, text: &str) -> CrisisTier {
        self.scan(text).map(|m| m.tier).unwrap_or(CrisisTier::None)
    }
}

impl Default for CrisisDetector {
    fn default() -> Self {
        Self::new(&CrisisConfig::default())
    }
}
