//! Integration tests for per-entry analysis
//!
//! Tests the full path: text → crisis scan + sentiment + emotion → severity → output

use moodjournal::config::JournalConfig;
use moodjournal::core::{severity_of, CrisisDetector, EntryAnalyzer};
use moodjournal::types::{CrisisTier, SeverityTier};

#[test]
fn test_severity_partition_and_boundaries() {
    assert_eq!(severity_of(-1.0), SeverityTier::Critical);
    assert_eq!(severity_of(-0.7), SeverityTier::Critical);
    assert_eq!(severity_of(-0.3), SeverityTier::High);
    assert_eq!(severity_of(-0.3 + f64::EPSILON), SeverityTier::Moderate);
    assert_eq!(severity_of(0.3), SeverityTier::Moderate);
    assert_eq!(severity_of(0.7), SeverityTier::Good);
    assert_eq!(severity_of(0.71), SeverityTier::Excellent);

    // walking [-1, 1] never goes back down a tier
    let order = [
        SeverityTier::Critical,
        SeverityTier::High,
        SeverityTier::Moderate,
        SeverityTier::Good,
        SeverityTier::Excellent,
    ];
    let mut last = 0;
    for i in 0..=200 {
        let s = -1.0 + i as f64 * 0.01;
        let rank = order.iter().position(|t| *t == severity_of(s)).unwrap();
        assert!(rank >= last, "tier went down at {s}");
        last = rank;
    }
}

#[test]
fn test_critical_wins_over_moderate() {
    let detector = CrisisDetector::default();
    assert_eq!(
        detector.detect("I feel like I need drugs and want to kill myself"),
        CrisisTier::Critical
    );
    assert_eq!(detector.detect("I had a great walk today"), CrisisTier::None);
}

#[test]
fn test_crisis_is_case_insensitive() {
    let detector = CrisisDetector::default();
    assert_eq!(detector.detect("I just want to GIVE UP"), CrisisTier::High);
    let hit = detector.scan("Been Drinking To Forget lately").unwrap();
    assert_eq!(hit.tier, CrisisTier::Moderate);
    assert_eq!(hit.group, "substance_abuse");
}

#[test]
fn test_configured_keywords_replace_defaults() {
    let config = JournalConfig::from_toml(
        r#"
        [[crisis.critical]]
        name = "custom"
        keywords = ["Red Flag Phrase"]
        "#,
    )
    .unwrap();
    let analyzer = EntryAnalyzer::new(&config);
    assert_eq!(analyzer.detect_crisis("this has a red flag phrase in it"), CrisisTier::Critical);
    // a default critical phrase is gone, high tier still active
    assert_eq!(analyzer.detect_crisis("thinking about suicide"), CrisisTier::None);
    assert_eq!(analyzer.detect_crisis("I feel hopeless"), CrisisTier::High);
}

#[test]
fn test_analysis_output() {
    let analyzer = EntryAnalyzer::new(&JournalConfig::default());

    let out = analyzer.analyze("I'm so worried about the exam, I feel anxious and nervous");
    assert_eq!(out.emotion, "anxious");
    assert!(out.sentiment < 0.0);
    assert_eq!(out.crisis, CrisisTier::None);
    assert_eq!(out.emoji, "😰");
    assert!(out.to_parseable_string().starts_with("emotion=anxious"));

    let blank = analyzer.analyze("");
    assert_eq!(blank.emotion, "neutral");
    assert_eq!(blank.sentiment, 0.0);
    assert_eq!(blank.confidence, 0.0);
}

#[test]
fn test_custom_taxonomy() {
    let config = JournalConfig::from_toml(
        r#"
        [taxonomy]
        labels = ["calm", "nostalgic", "meh"]
        neutral_label = "meh"
        "#,
    )
    .unwrap();
    let analyzer = EntryAnalyzer::new(&config);
    assert_eq!(analyzer.classify_entry("feeling nostalgic tonight").emotion, "nostalgic");
    assert_eq!(analyzer.classify_entry("the bus was late").emotion, "meh");
}
