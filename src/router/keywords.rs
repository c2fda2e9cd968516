//! Keyword matcher: first-layer, vocabulary-based domain scoring.
//!
//! Matching is deliberately simple: case-insensitive substring containment,
//! no stemming, no tokenization, no word boundaries (a keyword inside a
//! longer word still counts). This layer is meant to be fast and to handle
//! the bulk of queries; ambiguous ones surface as low confidence and are
//! handled downstream.

use crate::config::RoutingConfig;

/// Per-domain match counts for one query, in configured domain order.
///
/// Transient value, recomputed per query, never persisted.
#[derive(Debug, Clone)]
pub struct DomainScores {
    scores: Vec<(String, usize)>,
}

impl DomainScores {
    /// Match count for a domain (0 if the domain is unknown).
    pub fn get(&self, domain: &str) -> usize {
        self.scores
            .iter()
            .find(|(name, _)| name == domain)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Highest match count across all domains.
    pub fn max_score(&self) -> usize {
        self.scores.iter().map(|(_, count)| *count).max().unwrap_or(0)
    }

    /// Second-highest match count across all domains (0 when fewer than two
    /// domains are configured).
    pub fn second_max(&self) -> usize {
        let mut counts: Vec<usize> = self.scores.iter().map(|(_, count)| *count).collect();
        counts.sort_unstable_by(|a, b| b.cmp(a));
        counts.get(1).copied().unwrap_or(0)
    }

    /// Sum of match counts across all domains.
    pub fn total(&self) -> usize {
        self.scores.iter().map(|(_, count)| *count).sum()
    }

    /// The top-scoring domain and its count. Ties resolve to the
    /// earliest-configured domain, which makes selection deterministic.
    pub fn top_domain(&self) -> Option<(&str, usize)> {
        let mut best: Option<(&str, usize)> = None;
        for (name, count) in &self.scores {
            match best {
                Some((_, best_count)) if *count <= best_count => {}
                _ => best = Some((name.as_str(), *count)),
            }
        }
        best
    }

    /// Iterate over (domain, count) pairs in configured order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.scores.iter().map(|(name, count)| (name.as_str(), *count))
    }
}

struct KeywordGroup {
    name: String,
    /// Keywords pre-lowered at construction so scoring only lowercases the
    /// query once per call.
    keywords: Vec<String>,
}

impl KeywordGroup {
    fn new(name: &str, keywords: &[String]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    fn count_matches(&self, query_lower: &str) -> usize {
        self.keywords
            .iter()
            .filter(|k| query_lower.contains(k.as_str()))
            .count()
    }
}

/// Scores queries against the configured domain and modifier vocabularies.
pub struct KeywordMatcher {
    domains: Vec<KeywordGroup>,
    modifiers: Vec<KeywordGroup>,
}

impl KeywordMatcher {
    pub fn new(config: &RoutingConfig) -> Self {
        Self {
            domains: config
                .domains
                .iter()
                .map(|d| KeywordGroup::new(&d.name, &d.keywords))
                .collect(),
            modifiers: config
                .modifiers
                .iter()
                .map(|m| KeywordGroup::new(&m.name, &m.keywords))
                .collect(),
        }
    }

    /// Count keyword matches per domain for a query.
    pub fn score_domains(&self, query: &str) -> DomainScores {
        let query_lower = query.to_lowercase();
        DomainScores {
            scores: self
                .domains
                .iter()
                .map(|group| (group.name.clone(), group.count_matches(&query_lower)))
                .collect(),
        }
    }

    /// The keywords from `domain`'s vocabulary found in the query, in
    /// configured keyword order. Empty for an unknown domain.
    pub fn matched_keywords(&self, query: &str, domain: &str) -> Vec<String> {
        let query_lower = query.to_lowercase();
        self.domains
            .iter()
            .find(|group| group.name == domain)
            .map(|group| {
                group
                    .keywords
                    .iter()
                    .filter(|k| query_lower.contains(k.as_str()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Count keyword matches per modifier group.
    ///
    /// Modifier scores are computed on every route but the selection rule
    /// does not consult them; they are exposed for logging and analytics.
    pub fn score_modifiers(&self, query: &str) -> Vec<(String, usize)> {
        let query_lower = query.to_lowercase();
        self.modifiers
            .iter()
            .map(|group| (group.name.clone(), group.count_matches(&query_lower)))
            .collect()
    }
}
