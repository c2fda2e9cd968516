//! Priority overrides: a small set of intent patterns that bypass keyword
//! scoring entirely.
//!
//! Checked strictly before domain scoring, in fixed precedence order:
//! identity, team/colleague, founder, backend/API. First match wins. When an
//! override fires the router returns its collection with confidence 1.0 and
//! no fallbacks beyond the collection itself.
//!
//! Backend/API questions route to the books collection. That is the observed
//! production behavior, kept as-is; point `overrides.backend_collection` at a
//! technical-docs collection to change it.

use crate::config::OverrideConfig;

pub struct OverrideChecker {
    identity: Vec<String>,
    team: Vec<String>,
    founder: Vec<String>,
    backend: Vec<String>,
    team_collection: String,
    backend_collection: String,
}

impl OverrideChecker {
    pub fn new(config: &OverrideConfig) -> Self {
        let lower = |patterns: &[String]| -> Vec<String> {
            patterns.iter().map(|p| p.to_lowercase()).collect()
        };
        Self {
            identity: lower(&config.identity),
            team: lower(&config.team),
            founder: lower(&config.founder),
            backend: lower(&config.backend),
            team_collection: config.team_collection.clone(),
            backend_collection: config.backend_collection.clone(),
        }
    }

    /// Check a query against the override patterns, returning the target
    /// collection of the first matching group.
    pub fn check(&self, query: &str) -> Option<&str> {
        let query_lower = query.to_lowercase();
        let hits = |patterns: &[String]| patterns.iter().any(|p| query_lower.contains(p.as_str()));

        if hits(&self.identity) || hits(&self.team) || hits(&self.founder) {
            return Some(&self.team_collection);
        }
        if hits(&self.backend) {
            return Some(&self.backend_collection);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoutingConfig;

    fn checker() -> OverrideChecker {
        OverrideChecker::new(&RoutingConfig::default().overrides)
    }

    #[test]
    fn test_identity_patterns_route_to_team() {
        let c = checker();
        assert_eq!(c.check("who am I?"), Some("bali_zero_agents"));
        assert_eq!(c.check("chi sono io"), Some("bali_zero_agents"));
        assert_eq!(c.check("siapa saya?"), Some("bali_zero_agents"));
        assert_eq!(c.check("Do you know me already?"), Some("bali_zero_agents"));
    }

    #[test]
    fn test_team_patterns_route_to_team() {
        let c = checker();
        assert_eq!(c.check("show me the team"), Some("bali_zero_agents"));
        assert_eq!(c.check("who works in the tax department?"), Some("bali_zero_agents"));
    }

    #[test]
    fn test_founder_routes_to_team() {
        let c = checker();
        assert_eq!(c.check("Who is the founder?"), Some("bali_zero_agents"));
        assert_eq!(c.check("il fondatore"), Some("bali_zero_agents"));
    }

    #[test]
    fn test_backend_routes_to_books_collection() {
        let c = checker();
        assert_eq!(c.check("which backend handles search?"), Some("zantara_books"));
        assert_eq!(c.check("describe the service architecture"), Some("zantara_books"));
    }

    #[test]
    fn test_identity_wins_over_backend() {
        // "who am i" and "backend" both present; identity has precedence.
        let c = checker();
        assert_eq!(
            c.check("who am i in the backend system?"),
            Some("bali_zero_agents")
        );
    }

    #[test]
    fn test_no_override_for_plain_queries() {
        let c = checker();
        assert_eq!(c.check("tourist visa extension"), None);
        assert_eq!(c.check(""), None);
        assert_eq!(c.check("ciao"), None);
    }

    #[test]
    fn test_override_matching_is_case_insensitive() {
        let c = checker();
        assert_eq!(c.check("WHO AM I"), Some("bali_zero_agents"));
        assert_eq!(c.check("The FOUNDER story"), Some("bali_zero_agents"));
    }
}
