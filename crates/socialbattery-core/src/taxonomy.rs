//! Mood taxonomy and battery bands.
//!
//! The taxonomy is the fixed set of mood labels offered by the capture UI,
//! grouped by category. Aggregation never consults it; it exists so the
//! capture layer can validate a choice and so front-ends can list options.

use serde::{Deserialize, Serialize};

/// A named group of mood labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodCategory {
    pub name: String,
    pub labels: Vec<String>,
}

/// Ordered category -> labels mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodTaxonomy {
    pub categories: Vec<MoodCategory>,
}

const BUILTIN: &[(&str, &[&str])] = &[
    (
        "Energy Levels",
        &["Energized", "Content", "Tired", "Exhausted", "Drained"],
    ),
    (
        "Social States",
        &[
            "Need Space",
            "Open to Interaction",
            "Seeking Connection",
            "Social Overload",
        ],
    ),
    (
        "Emotional States",
        &["Calm", "Anxious", "Peaceful", "Overwhelmed", "Frustrated", "Happy"],
    ),
    (
        "Mental States",
        &["Focused", "Scattered", "Creative", "Overthinking", "Clear-minded"],
    ),
    (
        "Physical States",
        &["Relaxed", "Tense", "Restless", "Grounded", "Uncomfortable"],
    ),
];

impl Default for MoodTaxonomy {
    fn default() -> Self {
        Self {
            categories: BUILTIN
                .iter()
                .map(|(name, labels)| MoodCategory {
                    name: name.to_string(),
                    labels: labels.iter().map(|l| l.to_string()).collect(),
                })
                .collect(),
        }
    }
}

impl MoodTaxonomy {
    /// Every label in category order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .flat_map(|c| c.labels.iter().map(String::as_str))
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels().any(|l| l == label)
    }

    /// Category a label belongs to, if any.
    pub fn category_of(&self, label: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.labels.iter().any(|l| l == label))
            .map(|c| c.name.as_str())
    }

    /// Resolve user input to a canonical label, ignoring case and
    /// surrounding whitespace.
    pub fn resolve(&self, input: &str) -> Option<&str> {
        let wanted = input.trim();
        self.labels().find(|l| l.eq_ignore_ascii_case(wanted))
    }
}

/// Coarse classification of a battery level for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatteryBand {
    High,
    Medium,
    Low,
}

/// Thresholds separating the [`BatteryBand`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandThresholds {
    /// Levels strictly above this are [`BatteryBand::High`]
    pub high: i32,
    /// Levels strictly above this (and not high) are [`BatteryBand::Medium`]
    pub low: i32,
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self { high: 70, low: 30 }
    }
}

impl BatteryBand {
    pub fn classify(level: i32, thresholds: BandThresholds) -> Self {
        if level > thresholds.high {
            BatteryBand::High
        } else if level > thresholds.low {
            BatteryBand::Medium
        } else {
            BatteryBand::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BatteryBand::High => "high",
            BatteryBand::Medium => "medium",
            BatteryBand::Low => "low",
        }
    }
}
