//! Per-data-type default rules applied after coercion.

use std::collections::HashMap;
use std::sync::OnceLock;

use intake_model::{CanonicalRecord, FieldValue};

/// Fills in values a record of one data type should always carry.
pub trait DefaultRule: Send + Sync {
    /// Data type this rule applies to, lowercase.
    fn data_type(&self) -> &'static str;

    fn description(&self) -> &'static str {
        "Default rule"
    }

    /// Apply defaults to the record at zero-based `index` of the output.
    fn apply(&self, index: usize, record: &mut CanonicalRecord);
}

/// Default rules keyed by data type.
///
/// Data types without a rule pass through unchanged.
#[derive(Default)]
pub struct DefaultRuleRegistry {
    rules: HashMap<&'static str, Box<dyn DefaultRule>>,
}

impl DefaultRuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule, replacing any rule for the same data type.
    pub fn register(&mut self, rule: Box<dyn DefaultRule>) {
        self.rules.insert(rule.data_type(), rule);
    }

    pub fn get(&self, data_type: &str) -> Option<&dyn DefaultRule> {
        let key = data_type.trim().to_lowercase();
        self.rules.get(key.as_str()).map(|rule| rule.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn data_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.keys().copied()
    }
}

impl std::fmt::Debug for DefaultRuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut types: Vec<&str> = self.data_types().collect();
        types.sort_unstable();
        f.debug_struct("DefaultRuleRegistry")
            .field("data_types", &types)
            .finish()
    }
}

static DEFAULT_REGISTRY: OnceLock<DefaultRuleRegistry> = OnceLock::new();

/// Registry with the built-in rules, built on first access.
pub fn default_registry() -> &'static DefaultRuleRegistry {
    DEFAULT_REGISTRY.get_or_init(build_default_registry)
}

fn build_default_registry() -> DefaultRuleRegistry {
    let mut registry = DefaultRuleRegistry::new();
    registry.register(Box::new(LotDefaults));
    registry
}

/// Inventory lot defaults.
///
/// - `id`: `LOT-IMPORT-<index>`
/// - `status`: `active`
/// - `type`: `intake`
/// - `originalQuantity`: copied from `quantity`
#[derive(Debug, Clone, Copy, Default)]
pub struct LotDefaults;

impl DefaultRule for LotDefaults {
    fn data_type(&self) -> &'static str {
        "lots"
    }

    fn description(&self) -> &'static str {
        "Inventory lot identifiers, status and original quantity"
    }

    fn apply(&self, index: usize, record: &mut CanonicalRecord) {
        set_if_missing(record, "id", || format!("LOT-IMPORT-{index}").into());
        set_if_missing(record, "status", || "active".into());
        set_if_missing(record, "type", || "intake".into());
        if !record.contains_key("originalQuantity")
            && let Some(quantity) = record.get("quantity").cloned()
        {
            record.insert("originalQuantity".to_string(), quantity);
        }
    }
}

/// Absent keys and zero-length text count as missing; zero does not.
fn set_if_missing(record: &mut CanonicalRecord, key: &str, value: impl FnOnce() -> FieldValue) {
    if record.get(key).is_none_or(FieldValue::is_blank) {
        record.insert(key.to_string(), value());
    }
}
