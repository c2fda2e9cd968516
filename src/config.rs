use serde::Deserialize;
use std::path::PathBuf;

use crate::error::{Result, RouterError};

/// Routing configuration: keyword vocabularies, the domain→collection map,
/// the fallback table, and the confidence thresholds.
///
/// All of it is data, not code, so the routing behavior can be tuned without
/// redeploying logic. Every section has built-in defaults; a `routing.toml`
/// file only needs to override what it wants to change.
#[derive(Debug, Clone, Deserialize)]
pub struct RoutingConfig {
    /// Domain definitions, in priority order. On a tied top score the
    /// earliest-configured domain wins, so order is part of the contract.
    #[serde(default = "default_domains")]
    pub domains: Vec<DomainConfig>,

    /// Secondary tag groups scored alongside domains. Selection does not
    /// consult them; they are surfaced for logging/analytics only.
    #[serde(default = "default_modifiers")]
    pub modifiers: Vec<ModifierConfig>,

    #[serde(default)]
    pub overrides: OverrideConfig,

    /// Fallback table, keyed by the legacy per-specialty collection names.
    /// Keys that selection never emits are tolerated (their entries are
    /// simply unreachable), as are selection outputs with no entry here
    /// (they expand to no fallbacks).
    #[serde(default = "default_fallbacks")]
    pub fallbacks: Vec<FallbackEntry>,

    #[serde(default)]
    pub thresholds: ThresholdConfig,

    /// Collection used when no domain keyword matches at all.
    #[serde(default = "default_collection")]
    pub default_collection: String,
}

/// One knowledge domain: its name, the collection it routes to, and its
/// keyword vocabulary (case-insensitive substring entries, multilingual).
#[derive(Debug, Clone, Deserialize)]
pub struct DomainConfig {
    pub name: String,
    pub collection: String,
    pub keywords: Vec<String>,
}

/// A modifier tag group (e.g. recency, procedural).
#[derive(Debug, Clone, Deserialize)]
pub struct ModifierConfig {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Priority override patterns, checked before any keyword scoring.
#[derive(Debug, Clone, Deserialize)]
pub struct OverrideConfig {
    /// Identity self-reference patterns ("who am i", "chi sono", ...).
    #[serde(default = "default_identity_patterns")]
    pub identity: Vec<String>,
    /// Team/colleague enumeration patterns.
    #[serde(default = "default_team_patterns")]
    pub team: Vec<String>,
    /// Founder keywords.
    #[serde(default = "default_founder_patterns")]
    pub founder: Vec<String>,
    /// Backend/API/service-architecture keywords.
    #[serde(default = "default_backend_patterns")]
    pub backend: Vec<String>,
    /// Collection returned by identity/team/founder overrides.
    #[serde(default = "default_team_collection")]
    pub team_collection: String,
    /// Collection returned by the backend/API override. Kept pointed at the
    /// books collection to match observed production behavior.
    #[serde(default = "default_backend_collection")]
    pub backend_collection: String,
}

impl Default for OverrideConfig {
    fn default() -> Self {
        Self {
            identity: default_identity_patterns(),
            team: default_team_patterns(),
            founder: default_founder_patterns(),
            backend: default_backend_patterns(),
            team_collection: default_team_collection(),
            backend_collection: default_backend_collection(),
        }
    }
}

/// One fallback table row: a collection and its ranked alternatives.
#[derive(Debug, Clone, Deserialize)]
pub struct FallbackEntry {
    pub collection: String,
    pub alternatives: Vec<String>,
}

/// Confidence tier thresholds and the fallback cap.
#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdConfig {
    #[serde(default = "default_high_threshold")]
    pub high: f32,
    #[serde(default = "default_low_threshold")]
    pub low: f32,
    #[serde(default = "default_max_fallbacks")]
    pub max_fallbacks: usize,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            high: default_high_threshold(),
            low: default_low_threshold(),
            max_fallbacks: default_max_fallbacks(),
        }
    }
}

fn default_high_threshold() -> f32 {
    0.7
}

fn default_low_threshold() -> f32 {
    0.3
}

fn default_max_fallbacks() -> usize {
    3
}

fn default_collection() -> String {
    "visa_oracle".to_string()
}

fn default_team_collection() -> String {
    "bali_zero_agents".to_string()
}

fn default_backend_collection() -> String {
    "zantara_books".to_string()
}

fn svec(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_identity_patterns() -> Vec<String> {
    svec(&[
        "who am i",
        "chi sono",
        "siapa saya",
        "do you know me",
        "what do you know about me",
        "mi conosci",
        "kamu kenal saya",
    ])
}

fn default_team_patterns() -> Vec<String> {
    svec(&[
        "team",
        "colleague",
        "colleghi",
        "who works",
        "department",
        "organigramma",
        "staff members",
        "rekan kerja",
    ])
}

fn default_founder_patterns() -> Vec<String> {
    svec(&["founder", "fondatore"])
}

fn default_backend_patterns() -> Vec<String> {
    svec(&[
        "endpoint",
        "backend",
        "microservice",
        "architecture",
        "deployment",
        "webhook",
        "api key",
        "rest api",
        "source code",
    ])
}

fn default_domains() -> Vec<DomainConfig> {
    vec![
        DomainConfig {
            name: "visa".to_string(),
            collection: "visa_oracle".to_string(),
            keywords: svec(&[
                "visa",
                "kitas",
                "kitap",
                "immigration",
                "imigrasi",
                "passport",
                "paspor",
                "visto",
                "permesso di soggiorno",
                "stay permit",
                "overstay",
                "sponsor",
                "visa on arrival",
                "voa",
                "tourist visa",
                "extension",
                "perpanjangan",
                "golden visa",
            ]),
        },
        DomainConfig {
            name: "kbli".to_string(),
            collection: "kbli_eye".to_string(),
            keywords: svec(&[
                "kbli",
                "oss",
                "nib",
                "business classification",
                "klasifikasi",
                "business license",
                "izin usaha",
                "pt pma",
                "company registration",
                "pendirian pt",
                "risk based",
                "kode kbli",
            ]),
        },
        DomainConfig {
            name: "tax".to_string(),
            collection: "tax_genius".to_string(),
            keywords: svec(&[
                "tax",
                "pajak",
                "npwp",
                "pph",
                "ppn",
                "spt",
                "bpjs",
                "tasse",
                "fiscale",
                "withholding",
                "tax report",
                "e-filing",
                "coretax",
                "lapor pajak",
            ]),
        },
        DomainConfig {
            name: "legal".to_string(),
            collection: "legal_architect".to_string(),
            keywords: svec(&[
                "legal",
                "law",
                "hukum",
                "contract",
                "kontrak",
                "contratto",
                "notary",
                "notaris",
                "agreement",
                "permit",
                "izin",
                "compliance",
                "legale",
                "lawsuit",
            ]),
        },
        DomainConfig {
            name: "property".to_string(),
            collection: "property_sage".to_string(),
            keywords: svec(&[
                "property",
                "villa",
                "land",
                "tanah",
                "leasehold",
                "freehold",
                "hak pakai",
                "sewa",
                "rent",
                "real estate",
                "immobile",
                "affitto",
                "imb",
                "pbg",
                "building permit",
            ]),
        },
        DomainConfig {
            name: "team".to_string(),
            collection: "bali_zero_agents".to_string(),
            keywords: svec(&[
                "team",
                "staff",
                "consultant",
                "advisor",
                "who is",
                "chi è",
                "siapa",
                "contact",
                "colleague",
                "collega",
                "manager",
                "ceo",
            ]),
        },
        DomainConfig {
            name: "books".to_string(),
            // Catch-all: book/reading queries have no dedicated searchable
            // collection, they route to the visa collection.
            collection: "visa_oracle".to_string(),
            keywords: svec(&[
                "book",
                "libro",
                "buku",
                "guide",
                "handbook",
                "manual",
                "reading",
                "literature",
                "publication",
                "bibliography",
            ]),
        },
    ]
}

fn default_modifiers() -> Vec<ModifierConfig> {
    vec![
        ModifierConfig {
            name: "recency".to_string(),
            keywords: svec(&[
                "latest",
                "update",
                "updated",
                "terbaru",
                "aggiornamento",
                "recent",
                "news",
                "new regulation",
                "2024",
                "2025",
            ]),
        },
        ModifierConfig {
            name: "procedural".to_string(),
            keywords: svec(&[
                "how to",
                "how do i",
                "bagaimana",
                "come si",
                "step by step",
                "procedure",
                "prosedur",
                "process",
                "requirements",
                "persyaratan",
                "calculate",
                "hitung",
            ]),
        },
    ]
}

fn default_fallbacks() -> Vec<FallbackEntry> {
    // Keys use the legacy per-specialty naming scheme. Two of them
    // ("property_listings", "zantara_books") are never produced by the
    // selection rule, so those rows only apply if an operator renames the
    // corresponding collections. Kept as shipped to match the production
    // table.
    fn entry(collection: &str, alternatives: &[&str]) -> FallbackEntry {
        FallbackEntry {
            collection: collection.to_string(),
            alternatives: svec(alternatives),
        }
    }
    vec![
        entry("visa_oracle", &["kbli_eye", "tax_genius", "legal_architect"]),
        entry("kbli_eye", &["visa_oracle", "tax_genius"]),
        entry("tax_genius", &["legal_architect", "kbli_eye", "visa_oracle"]),
        entry(
            "legal_architect",
            &["visa_oracle", "tax_genius", "property_listings"],
        ),
        entry("property_listings", &["legal_architect", "visa_oracle"]),
        entry("zantara_books", &["bali_zero_agents", "visa_oracle"]),
        entry("bali_zero_agents", &["zantara_books"]),
    ]
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            domains: default_domains(),
            modifiers: default_modifiers(),
            overrides: OverrideConfig::default(),
            fallbacks: default_fallbacks(),
            thresholds: ThresholdConfig::default(),
            default_collection: default_collection(),
        }
    }
}

impl RoutingConfig {
    /// Load configuration.
    ///
    /// Loads environment variables from .env file (if present) first.
    /// Looks for the config file in this order:
    /// 1. Path specified in RAGROUTER_CONFIG environment variable
    /// 2. ./routing.toml in current directory
    ///
    /// If neither exists the built-in defaults are used; an explicitly
    /// configured path that cannot be read is still an error.
    pub fn load() -> Result<Self> {
        // Load .env file if it exists (ignore errors - file is optional)
        let _ = dotenv::dotenv();

        let explicit = std::env::var("RAGROUTER_CONFIG").ok().map(PathBuf::from);
        let config_path = explicit
            .clone()
            .unwrap_or_else(|| PathBuf::from("routing.toml"));

        let config: RoutingConfig = if config_path.exists() {
            let config_str = std::fs::read_to_string(&config_path)?;
            toml::from_str(&config_str)?
        } else if explicit.is_some() {
            return Err(RouterError::Config(format!(
                "config file not found: {}",
                config_path.display()
            )));
        } else {
            log::info!("No routing.toml found, using built-in routing defaults");
            RoutingConfig::default()
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.domains.is_empty() {
            return Err(RouterError::Config(
                "at least one domain must be configured".to_string(),
            ));
        }

        for domain in &self.domains {
            if domain.name.trim().is_empty() {
                return Err(RouterError::Config("domain name cannot be empty".to_string()));
            }
            if domain.collection.trim().is_empty() {
                return Err(RouterError::Config(format!(
                    "domain '{}' has an empty collection name",
                    domain.name
                )));
            }
            if domain.keywords.is_empty() {
                return Err(RouterError::Config(format!(
                    "domain '{}' has no keywords",
                    domain.name
                )));
            }
        }

        let mut seen = std::collections::HashSet::new();
        for domain in &self.domains {
            if !seen.insert(domain.name.as_str()) {
                return Err(RouterError::Config(format!(
                    "duplicate domain name: '{}'",
                    domain.name
                )));
            }
        }

        if self.default_collection.trim().is_empty() {
            return Err(RouterError::Config(
                "default_collection cannot be empty".to_string(),
            ));
        }

        let t = &self.thresholds;
        if !(0.0..=1.0).contains(&t.high) || !(0.0..=1.0).contains(&t.low) {
            return Err(RouterError::Config(
                "thresholds.high and thresholds.low must be between 0.0 and 1.0".to_string(),
            ));
        }
        if t.low >= t.high {
            return Err(RouterError::Config(format!(
                "thresholds.low ({}) must be below thresholds.high ({})",
                t.low, t.high
            )));
        }

        Ok(())
    }

    /// Look up the collection a domain routes to, if the domain exists.
    pub fn collection_for(&self, domain: &str) -> Option<&str> {
        self.domains
            .iter()
            .find(|d| d.name == domain)
            .map(|d| d.collection.as_str())
    }
}
