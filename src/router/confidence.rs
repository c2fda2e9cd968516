//! Confidence model: converts domain scores and query shape into a single
//! [0,1] value.
//!
//! Three additive components, each independently capped, summed and capped
//! at 1.0:
//! - match strength (0.0-0.6) from the best domain's match count
//! - query length (0.0-0.2) from the whitespace word count
//! - specificity (0.0-0.2) from the gap between the best and second-best
//!   domain

use crate::config::ThresholdConfig;
use crate::router::keywords::DomainScores;
use serde::Serialize;

/// Confidence tier derived from the configured HIGH/LOW thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn from_score(confidence: f32, thresholds: &ThresholdConfig) -> Self {
        if confidence >= thresholds.high {
            ConfidenceLevel::High
        } else if confidence >= thresholds.low {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "high",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::Low => "low",
        }
    }
}

/// Compute routing confidence for a query given its domain scores.
pub fn confidence(query: &str, scores: &DomainScores) -> f32 {
    let total = match_strength(scores.max_score())
        + length_component(query)
        + specificity(scores);
    total.min(1.0)
}

/// Match-strength component (0.0-0.6), a piecewise ramp over the best
/// domain's match count. Diminishing returns past 2 matches, saturating at 5.
fn match_strength(max_score: usize) -> f32 {
    match max_score {
        0 => 0.0,
        1 | 2 => 0.2 + 0.1 * max_score as f32,
        3 | 4 => 0.4 + 0.05 * (max_score as f32 - 2.0),
        _ => 0.6,
    }
}

/// Query-length component (0.0-0.2). Longer queries carry more signal, so
/// the keyword evidence they produce is trusted a little more.
fn length_component(query: &str) -> f32 {
    let words = query.split_whitespace().count();
    if words >= 10 {
        0.2
    } else if words >= 5 {
        0.1
    } else {
        0.0
    }
}

/// Specificity component (0.0-0.2): rewards a clear winner over a contested
/// score set. A tie contributes nothing.
fn specificity(scores: &DomainScores) -> f32 {
    if scores.total() == 0 {
        return 0.0;
    }
    let max = scores.max_score();
    let second = scores.second_max();
    if max > 2 * second {
        0.2
    } else if max > second {
        0.1
    } else {
        0.0
    }
}
