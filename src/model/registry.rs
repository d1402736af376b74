//! Model Registry - Load resource kind schemas from JSON
//!
//! Every resource kind's schema (endpoint, summary/full fields, nullable
//! fields, nested resources and search filters) is declared in an embedded
//! JSON file and looked up through [`Kind::def`].

use super::Kind;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

/// Embedded schema file (compiled into the binary)
const KINDS_FILE: &str = include_str!("../resources/kinds.json");

/// Nested-resource field declaration
#[derive(Debug, Clone, Deserialize)]
pub struct NestedDef {
    pub field: String,
    pub kind: Kind,
    /// One-to-many when true
    #[serde(default)]
    pub many: bool,
}

/// Search filter declaration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FilterDef {
    /// Free-text filters folded into `keyword_param`, in this order
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub keyword_param: Option<String>,
    /// Accepts `start_date` / `end_date`
    #[serde(default)]
    pub dates: bool,
    /// Relational filter name -> query parameter carrying related ids
    #[serde(default)]
    pub relations: BTreeMap<String, String>,
    /// Filters sent to the service unchanged
    #[serde(default)]
    pub passthrough: Vec<String>,
}

/// Resource kind definition from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct KindDef {
    pub display_name: String,
    /// Path segment under `/srv/` for search and detail lookups
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub searchable: bool,
    /// Value of the `model` parameter sent with searches
    #[serde(default)]
    pub search_model: Option<String>,
    /// False for endpoints that return every match in one response
    #[serde(default = "default_true")]
    pub paginated: bool,
    /// False for kinds whose detail endpoint adds nothing to a summary
    #[serde(default = "default_true")]
    pub hydrate: bool,
    #[serde(default = "default_identity_field")]
    pub identity_field: String,
    pub summary_fields: Vec<String>,
    pub full_fields: Vec<String>,
    /// Fields whose absence from a detail payload means null, not unfetched
    #[serde(default)]
    pub nullable: Vec<String>,
    #[serde(default)]
    pub nested: Vec<NestedDef>,
    #[serde(default)]
    pub filters: FilterDef,
}

fn default_true() -> bool {
    true
}

fn default_identity_field() -> String {
    "id".to_string()
}

impl KindDef {
    /// Whether hydration fetches anything for this kind
    pub fn can_hydrate(&self) -> bool {
        self.hydrate && self.endpoint.is_some()
    }

    pub fn declares(&self, field: &str) -> bool {
        self.summary_fields.iter().any(|f| f == field)
            || self.full_fields.iter().any(|f| f == field)
    }

    pub fn is_full_field(&self, field: &str) -> bool {
        self.full_fields.iter().any(|f| f == field)
    }

    /// Every filter name accepted by a search, `id` included
    pub fn filter_names(&self) -> Vec<&str> {
        let mut names = vec!["id"];
        names.extend(self.filters.keywords.iter().map(String::as_str));
        if self.filters.dates {
            names.extend(["start_date", "end_date"]);
        }
        names.extend(self.filters.relations.keys().map(String::as_str));
        names.extend(self.filters.passthrough.iter().map(String::as_str));
        names
    }
}

/// Root structure of resources/kinds.json
#[derive(Debug, Clone, Deserialize)]
pub struct Registry {
    pub kinds: HashMap<String, KindDef>,
}

/// Global registry loaded from JSON
static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Get the registry (parses the embedded JSON on first access)
pub fn get_registry() -> &'static Registry {
    REGISTRY.get_or_init(|| {
        let registry: Registry = serde_json::from_str(KINDS_FILE)
            .unwrap_or_else(|e| panic!("Failed to parse embedded kind registry: {}", e));

        for kind in Kind::ALL {
            if !registry.kinds.contains_key(kind.key()) {
                panic!("Kind registry has no entry for '{}'", kind.key());
            }
        }

        registry
    })
}

/// Get a kind definition by registry key
pub fn get_kind_def(key: &str) -> Option<&'static KindDef> {
    get_registry().kinds.get(key)
}
