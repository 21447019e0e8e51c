//! PC builder compatibility validation
//!
//! Rules are data: each component id maps to an attribute sheet, and each
//! rule compares attributes across build slots. Two rule kinds exist:
//!
//! - `match`: an attribute of one slot must equal an attribute of another
//!   (a list on either side matches when the lists share a value)
//! - `capacity`: the sum of attributes over some slots must not exceed an
//!   attribute of another slot
//!
//! A rule is skipped when any slot it reads is empty, the component has no
//! sheet, or the sheet lacks the attribute. Validation is pure.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::EntityId;
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;
use thiserror::Error;

const BUILTIN_RULES_JSON: &str = include_str!("../data/compat_rules.json");

static BUILTIN_RULES: LazyLock<CompatibilityRules> = LazyLock::new(|| {
    CompatibilityRules::from_json(BUILTIN_RULES_JSON).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to parse bundled compatibility rules");
        CompatibilityRules::default()
    })
});

/// Build slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Cpu,
    #[serde(alias = "mb")]
    Motherboard,
    Gpu,
    Ram,
    Storage,
    Psu,
    Case,
    Cooler,
}

/// Slots a build needs before it is validated
pub const REQUIRED_SLOTS: [Slot; 7] = [
    Slot::Cpu,
    Slot::Motherboard,
    Slot::Gpu,
    Slot::Ram,
    Slot::Storage,
    Slot::Psu,
    Slot::Case,
];

impl Slot {
    pub fn label(&self) -> &'static str {
        match self {
            Slot::Cpu => "Procesador (CPU)",
            Slot::Motherboard => "Placa Madre",
            Slot::Gpu => "Tarjeta Gráfica (GPU)",
            Slot::Ram => "Memoria RAM",
            Slot::Storage => "Almacenamiento",
            Slot::Psu => "Fuente de Poder (PSU)",
            Slot::Case => "Gabinete",
            Slot::Cooler => "Cooler (Opcional)",
        }
    }

    /// Catalog category offered for this slot
    pub fn product_category(&self) -> &'static str {
        match self {
            Slot::Cpu => "CPU",
            Slot::Motherboard => "Placa madre",
            Slot::Gpu => "GPU",
            Slot::Ram => "RAM",
            Slot::Storage => "Almacenamiento",
            Slot::Psu => "Fuente",
            Slot::Case => "Gabinete",
            Slot::Cooler => "Cooler",
        }
    }

    pub fn is_required(&self) -> bool {
        REQUIRED_SLOTS.contains(self)
    }
}

/// Partial build: slot to selected product id
pub type PcBuild = BTreeMap<Slot, EntityId>;

/// Required slots still empty, in slot order
pub fn missing_required_slots(build: &PcBuild) -> Vec<Slot> {
    REQUIRED_SLOTS
        .iter()
        .copied()
        .filter(|slot| !build.contains_key(slot))
        .collect()
}

/// Attribute of the component in a slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAttr {
    pub slot: Slot,
    pub attr: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Rule {
    /// `message` may use `{left}` and `{right}`
    Match {
        left: SlotAttr,
        right: SlotAttr,
        message: String,
    },
    /// `message` may use `{total}` and `{capacity}`
    Capacity {
        consumers: Vec<SlotAttr>,
        capacity: SlotAttr,
        message: String,
    },
}

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("Invalid compatibility rules: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Attribute sheets plus the rules evaluated over them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityRules {
    #[serde(default)]
    pub components: HashMap<EntityId, BTreeMap<String, Value>>,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// Validation outcome; `ok` iff `issues` is empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityReport {
    pub ok: bool,
    pub issues: Vec<String>,
}

impl CompatibilityRules {
    /// Rules bundled with the storefront
    pub fn builtin() -> &'static CompatibilityRules {
        &BUILTIN_RULES
    }

    pub fn from_json(json: &str) -> Result<Self, RulesError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Evaluate every rule in order against `build`
    pub fn validate(&self, build: &PcBuild) -> CompatibilityReport {
        let issues: Vec<String> = self.rules.iter().filter_map(|rule| self.check(rule, build)).collect();
        CompatibilityReport {
            ok: issues.is_empty(),
            issues,
        }
    }

    fn check(&self, rule: &Rule, build: &PcBuild) -> Option<String> {
        match rule {
            Rule::Match { left, right, message } => {
                let l = self.attr(build, left)?;
                let r = self.attr(build, right)?;
                if values_match(l, r) {
                    None
                } else {
                    Some(
                        message
                            .replace("{left}", &display_value(l))
                            .replace("{right}", &display_value(r)),
                    )
                }
            }
            Rule::Capacity {
                consumers,
                capacity,
                message,
            } => {
                let limit = self.attr(build, capacity)?.as_f64()?;
                let draws: Vec<f64> = consumers
                    .iter()
                    .filter_map(|c| self.attr(build, c).and_then(Value::as_f64))
                    .collect();
                if draws.is_empty() {
                    return None;
                }
                let total: f64 = draws.iter().sum();
                if total <= limit {
                    None
                } else {
                    Some(
                        message
                            .replace("{total}", &total.to_string())
                            .replace("{capacity}", &limit.to_string()),
                    )
                }
            }
        }
    }

    fn attr(&self, build: &PcBuild, target: &SlotAttr) -> Option<&Value> {
        let id = build.get(&target.slot)?;
        self.components.get(id)?.get(&target.attr)
    }
}

/// Validate against the bundled rules
pub fn validate_compatibility(build: &PcBuild) -> CompatibilityReport {
    CompatibilityRules::builtin().validate(build)
}

fn values_match(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Array(l), Value::Array(r)) => l.iter().any(|v| r.contains(v)),
        (Value::Array(l), r) => l.contains(r),
        (l, Value::Array(r)) => r.contains(l),
        (l, r) => l == r,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join("/"),
        other => other.to_string(),
    }
}
