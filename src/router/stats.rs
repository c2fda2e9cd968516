//! Process-lifetime routing counters, bucketed by confidence tier.
//!
//! Counters are atomic so a single tracker can be shared across concurrent
//! route calls without a lock. They are never persisted; `reset()` is the
//! only way to clear them before process teardown.

use crate::config::ThresholdConfig;
use crate::router::confidence::ConfidenceLevel;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Accumulates routing outcomes for observability.
pub struct RouterStats {
    total_routes: AtomicU64,
    high_confidence: AtomicU64,
    medium_confidence: AtomicU64,
    low_confidence: AtomicU64,
    fallbacks_used: AtomicU64,
    thresholds: ThresholdConfig,
}

/// Snapshot of the counters plus derived percentages.
///
/// Percentages are pre-formatted strings ("42.9%") so the report can be
/// logged or serialized as-is; all of them are "0.0%" before the first route.
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub total_routes: u64,
    pub high_confidence: u64,
    pub medium_confidence: u64,
    pub low_confidence: u64,
    pub fallbacks_used: u64,
    pub high_confidence_pct: String,
    pub medium_confidence_pct: String,
    pub low_confidence_pct: String,
    pub fallback_rate: String,
}

fn percentage(count: u64, total: u64) -> String {
    if total == 0 {
        "0.0%".to_string()
    } else {
        format!("{:.1}%", count as f64 * 100.0 / total as f64)
    }
}

impl RouterStats {
    pub fn new(thresholds: &ThresholdConfig) -> Self {
        Self {
            total_routes: AtomicU64::new(0),
            high_confidence: AtomicU64::new(0),
            medium_confidence: AtomicU64::new(0),
            low_confidence: AtomicU64::new(0),
            fallbacks_used: AtomicU64::new(0),
            thresholds: thresholds.clone(),
        }
    }

    /// Record one completed route. Exactly one tier counter is incremented
    /// per call, so high + medium + low always equals total_routes.
    pub fn record(&self, confidence: f32, fallbacks_used: bool) {
        self.total_routes.fetch_add(1, Ordering::Relaxed);
        match ConfidenceLevel::from_score(confidence, &self.thresholds) {
            ConfidenceLevel::High => self.high_confidence.fetch_add(1, Ordering::Relaxed),
            ConfidenceLevel::Medium => self.medium_confidence.fetch_add(1, Ordering::Relaxed),
            ConfidenceLevel::Low => self.low_confidence.fetch_add(1, Ordering::Relaxed),
        };
        if fallbacks_used {
            self.fallbacks_used.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Snapshot the counters. Taken with relaxed loads, so a snapshot under
    /// concurrent recording may be mid-update by a few counts.
    pub fn report(&self) -> StatsReport {
        let total = self.total_routes.load(Ordering::Relaxed);
        let high = self.high_confidence.load(Ordering::Relaxed);
        let medium = self.medium_confidence.load(Ordering::Relaxed);
        let low = self.low_confidence.load(Ordering::Relaxed);
        let fallbacks = self.fallbacks_used.load(Ordering::Relaxed);
        StatsReport {
            total_routes: total,
            high_confidence: high,
            medium_confidence: medium,
            low_confidence: low,
            fallbacks_used: fallbacks,
            high_confidence_pct: percentage(high, total),
            medium_confidence_pct: percentage(medium, total),
            low_confidence_pct: percentage(low, total),
            fallback_rate: percentage(fallbacks, total),
        }
    }

    /// Zero every counter.
    pub fn reset(&self) {
        self.total_routes.store(0, Ordering::Relaxed);
        self.high_confidence.store(0, Ordering::Relaxed);
        self.medium_confidence.store(0, Ordering::Relaxed);
        self.low_confidence.store(0, Ordering::Relaxed);
        self.fallbacks_used.store(0, Ordering::Relaxed);
    }
}
