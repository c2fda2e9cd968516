//! Query routing engine: decides which knowledge collection a free-text
//! query should be searched against, how confident that decision is, and
//! which collections to try next if confidence is low.
//!
//! Pipeline per call: priority override check → per-domain keyword scoring →
//! collection selection → confidence → fallback expansion → stats. Every
//! call is a pure function of its input except for the shared statistics
//! counters; any string input, including the empty string, produces a valid
//! decision.

pub mod confidence;
pub mod fallback;
pub mod keywords;
pub mod overrides;
pub mod stats;

use crate::config::RoutingConfig;
use crate::error::Result;
use crate::router::confidence::ConfidenceLevel;
use crate::router::fallback::FallbackManager;
use crate::router::keywords::KeywordMatcher;
use crate::router::overrides::OverrideChecker;
use crate::router::stats::{RouterStats, StatsReport};
use serde::Serialize;
use std::sync::Arc;

/// The outcome of routing one query.
///
/// `collections_to_try` starts with `collection_name`, contains no
/// duplicates, and holds at most four entries (primary plus up to three
/// fallbacks). The search layer is expected to query them in order until it
/// has sufficient results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutingDecision {
    pub collection_name: String,
    /// Routing confidence in [0,1], reported at 2-decimal fidelity.
    pub confidence: f32,
    pub collections_to_try: Vec<String>,
}

impl RoutingDecision {
    pub fn confidence_level(&self, config: &RoutingConfig) -> ConfidenceLevel {
        ConfidenceLevel::from_score(self.confidence, &config.thresholds)
    }
}

/// The routing engine. Construct once with loaded configuration, then call
/// [`Router::route`] per query; it is safe to share across threads.
pub struct Router {
    config: Arc<RoutingConfig>,
    matcher: KeywordMatcher,
    overrides: OverrideChecker,
    fallbacks: FallbackManager,
    stats: RouterStats,
}

impl Router {
    pub fn new(config: RoutingConfig) -> Result<Self> {
        config.validate()?;
        let matcher = KeywordMatcher::new(&config);
        let overrides = OverrideChecker::new(&config.overrides);
        let fallbacks = FallbackManager::new(config.fallbacks.clone(), &config.thresholds);
        let stats = RouterStats::new(&config.thresholds);
        Ok(Self {
            config: Arc::new(config),
            matcher,
            overrides,
            fallbacks,
            stats,
        })
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Route one query to a collection, with confidence and fallbacks.
    pub fn route(&self, query: &str) -> RoutingDecision {
        if let Some(collection) = self.overrides.check(query) {
            log::debug!("priority override fired, routing to '{}'", collection);
            self.stats.record(1.0, false);
            return RoutingDecision {
                collection_name: collection.to_string(),
                confidence: 1.0,
                collections_to_try: vec![collection.to_string()],
            };
        }

        let scores = self.matcher.score_domains(query);
        // Modifier scores are computed on every call but selection does not
        // consult them; they are logged for analytics only.
        let modifier_scores = self.matcher.score_modifiers(query);
        log::debug!(
            "domain scores: {:?}, modifier scores: {:?}",
            scores.iter().collect::<Vec<_>>(),
            modifier_scores
        );

        let primary = match scores.top_domain() {
            Some((domain, count)) if count > 0 => self
                .config
                .collection_for(domain)
                .unwrap_or_else(|| self.config.default_collection.as_str()),
            _ => self.config.default_collection.as_str(),
        }
        .to_string();

        let confidence = confidence::confidence(query, &scores);
        let collections_to_try =
            self.fallbacks
                .expand(&primary, confidence, self.config.thresholds.max_fallbacks);
        let fallbacks_used = collections_to_try.len() > 1;
        self.stats.record(confidence, fallbacks_used);

        log::debug!(
            "routed to '{}' (confidence {:.2}, {} fallback(s))",
            primary,
            confidence,
            collections_to_try.len() - 1
        );

        RoutingDecision {
            collection_name: primary,
            confidence: round2(confidence),
            collections_to_try,
        }
    }

    /// Keywords from `domain`'s vocabulary found in the query.
    pub fn matched_keywords(&self, query: &str, domain: &str) -> Vec<String> {
        self.matcher.matched_keywords(query, domain)
    }

    /// Full, unfiltered fallback chain for a collection.
    pub fn fallback_chain(&self, collection: &str) -> &[String] {
        self.fallbacks.chain(collection)
    }

    /// Snapshot of the routing statistics counters.
    pub fn stats_report(&self) -> StatsReport {
        self.stats.report()
    }

    /// Zero the routing statistics counters.
    pub fn reset_stats(&self) {
        self.stats.reset();
    }
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> Router {
        Router::new(RoutingConfig::default()).unwrap()
    }

    #[test]
    fn test_visa_query_routes_to_visa_collection() {
        let r = router();
        let decision = r.route("What documents do I need for a tourist visa extension?");
        assert_eq!(decision.collection_name, "visa_oracle");
        // "visa" + "tourist visa" + "extension" = 3 matches (0.45), 10 words
        // (0.2), clear winner (0.2)
        assert!(decision.confidence >= 0.5);
        assert_eq!(decision.collections_to_try[0], "visa_oracle");
    }

    #[test]
    fn test_identity_override_exact_confidence() {
        let r = router();
        let decision = r.route("chi sono io");
        assert_eq!(decision.collection_name, "bali_zero_agents");
        assert_eq!(decision.confidence, 1.0);
        assert_eq!(decision.collections_to_try, vec!["bali_zero_agents"]);
    }

    #[test]
    fn test_override_beats_keyword_scores() {
        // Heavy tax vocabulary, but the team pattern short-circuits scoring.
        let r = router();
        let decision = r.route("who works on pajak npwp pph filings?");
        assert_eq!(decision.collection_name, "bali_zero_agents");
        assert_eq!(decision.confidence, 1.0);
    }

    #[test]
    fn test_no_evidence_routes_to_default() {
        let r = router();
        let decision = r.route("ciao");
        assert_eq!(decision.collection_name, "visa_oracle");
        assert_eq!(decision.confidence, 0.0);
        // Low tier expands through the default collection's fallback entry
        assert_eq!(
            decision.collections_to_try,
            vec!["visa_oracle", "kbli_eye", "tax_genius", "legal_architect"]
        );
    }

    #[test]
    fn test_gibberish_stays_low_confidence() {
        let r = router();
        let decision = r.route("asdkjf qwoeiru");
        assert_eq!(decision.collection_name, "visa_oracle");
        assert!(decision.confidence <= 0.2);
    }

    #[test]
    fn test_empty_and_whitespace_queries_are_total() {
        let r = router();
        for query in ["", "   ", "\t\n"] {
            let decision = r.route(query);
            assert_eq!(decision.collection_name, "visa_oracle");
            assert_eq!(decision.confidence, 0.0);
            assert_eq!(decision.collections_to_try[0], "visa_oracle");
        }
    }

    #[test]
    fn test_strong_tax_query_high_confidence_no_fallbacks() {
        // 3 tax hits, 13 words, no competing domain: 0.45 + 0.2 + 0.2 = 0.85
        let r = router();
        let query = "Could you please tell me about tax and pajak rules regarding pph today";
        let decision = r.route(query);
        assert_eq!(decision.collection_name, "tax_genius");
        assert!((decision.confidence - 0.85).abs() < 1e-6);
        assert_eq!(decision.collections_to_try, vec!["tax_genius"]);
    }

    #[test]
    fn test_tie_breaks_to_first_configured_domain() {
        let r = router();
        let decision = r.route("visa pajak");
        assert_eq!(decision.collection_name, "visa_oracle");
    }

    #[test]
    fn test_property_domain_has_no_fallback_entry() {
        // Selection emits "property_sage" but the fallback table's key for
        // the property specialty is the legacy "property_listings", so the
        // expansion is the primary alone even at low confidence.
        let r = router();
        let decision = r.route("villa leasehold");
        assert_eq!(decision.collection_name, "property_sage");
        assert!(decision.confidence < 0.7);
        assert_eq!(decision.collections_to_try, vec!["property_sage"]);
    }

    #[test]
    fn test_books_domain_routes_to_visa_catch_all() {
        let r = router();
        let decision = r.route("recommend a reading publication");
        assert_eq!(decision.collection_name, "visa_oracle");
    }

    #[test]
    fn test_determinism() {
        let r = router();
        let query = "bagaimana cara perpanjangan kitas?";
        let first = r.route(query);
        for _ in 0..10 {
            assert_eq!(r.route(query), first);
        }
    }

    #[test]
    fn test_confidence_bounds_on_arbitrary_input() {
        let r = router();
        let long = "visa pajak kbli legal villa team book ".repeat(500);
        for query in ["", "ñandú 日本語 🙂", long.as_str()] {
            let decision = r.route(query);
            assert!(decision.confidence >= 0.0 && decision.confidence <= 1.0);
            assert!(!decision.collections_to_try.is_empty());
            assert!(decision.collections_to_try.len() <= 4);
            assert_eq!(decision.collections_to_try[0], decision.collection_name);
        }
    }

    #[test]
    fn test_stats_accumulate_across_routes() {
        let r = router();
        let queries = [
            "chi sono io",                // override, high
            "ciao",                       // default, low
            "tourist visa extension now", // medium-ish
        ];
        for q in queries {
            r.route(q);
        }
        let report = r.stats_report();
        assert_eq!(report.total_routes, 3);
        assert_eq!(
            report.high_confidence + report.medium_confidence + report.low_confidence,
            3
        );
        r.reset_stats();
        assert_eq!(r.stats_report().total_routes, 0);
    }

    #[test]
    fn test_fallbacks_used_flag_feeds_stats() {
        let r = router();
        r.route("ciao"); // low confidence, default collection has fallbacks
        let report = r.stats_report();
        assert_eq!(report.fallbacks_used, 1);
        assert_eq!(report.fallback_rate, "100.0%");
    }

    #[test]
    fn test_router_rejects_invalid_config() {
        let mut config = RoutingConfig::default();
        config.domains.clear();
        assert!(Router::new(config).is_err());
    }

    #[test]
    fn test_concurrent_routing() {
        let r = std::sync::Arc::new(router());
        let mut handles = Vec::new();
        for _ in 0..4 {
            let r = std::sync::Arc::clone(&r);
            handles.push(std::thread::spawn(move || {
                for _ in 0..500 {
                    let d = r.route("perpanjangan kitas visa");
                    assert_eq!(d.collection_name, "visa_oracle");
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(r.stats_report().total_routes, 2000);
    }

    #[test]
    fn test_decision_serializes_to_json() {
        let r = router();
        let decision = r.route("tourist visa");
        let json = serde_json::to_string(&decision).unwrap();
        assert!(json.contains("\"collection_name\":\"visa_oracle\""));
        assert!(json.contains("collections_to_try"));
    }
}
