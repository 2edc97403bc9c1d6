//! Component definitions: the static catalog entries describing zone types.

use crate::models::screen::{ComponentCategory, Position, ScreenType};
use crate::models::zone_config::{ConfigField, ZoneConfig};
use serde::{Deserialize, Serialize};

/// A named sub-mode of a component (e.g. a send button's "bar" destination).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Variant ID, unique within its component
    pub id: String,
    /// Display label
    pub label: String,
    /// Opaque glyph identifier
    pub icon: String,
    /// Color tag
    pub color: String,
    /// Short description
    pub description: String,
}

/// Static description of a zone type.
///
/// # Validation
///
/// - ID must be unique within the registry
/// - `max_instances` must be at least 1
/// - Every `config_schema` default must be accepted by its own field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDefinition {
    /// Unique component ID (e.g. "ItemGrid", "SendButton")
    pub id: String,
    /// Display name
    pub name: String,
    /// Palette description
    pub description: String,
    /// Opaque glyph identifier
    pub icon: String,
    /// Screen this component belongs to
    pub layout_type: ScreenType,
    /// Palette category
    pub category: ComponentCategory,
    /// Region a new instance lands in when no position is chosen
    pub default_position: Position,
    /// Default width hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_width: Option<u32>,
    /// Config a new instance starts with
    #[serde(default)]
    pub default_config: ZoneConfig,
    /// Maximum number of coexisting instances (1 = singleton)
    pub max_instances: u32,
    /// Whether a usable layout needs at least one instance
    #[serde(default)]
    pub required: bool,
    /// Named sub-modes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<Variant>>,
    /// Components that must not coexist with this one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<Vec<String>>,
    /// Ordered typed configuration fields
    #[serde(default)]
    pub config_schema: Vec<ConfigField>,
    /// Suggestion shown when a required component is missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_hint: Option<String>,
}

impl ComponentDefinition {
    /// Whether at most one instance is allowed.
    #[must_use]
    pub const fn is_singleton(&self) -> bool {
        self.max_instances <= 1
    }

    /// Looks up a variant by ID.
    #[must_use]
    pub fn variant(&self, id: &str) -> Option<&Variant> {
        self.variants.as_ref()?.iter().find(|v| v.id == id)
    }

    /// Whether `id` names one of this component's variants.
    #[must_use]
    pub fn has_variant(&self, id: &str) -> bool {
        self.variant(id).is_some()
    }

    /// Looks up a schema field by key.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&ConfigField> {
        self.config_schema.iter().find(|f| f.key == key)
    }

    /// Declared conflicts (empty when none).
    #[must_use]
    pub fn conflict_ids(&self) -> &[String] {
        self.conflicts.as_deref().unwrap_or_default()
    }

    /// Builds the config of a freshly placed instance.
    ///
    /// Schema defaults come first, `default_config` overrides them, and a chosen
    /// variant is written under the `variant` key.
    #[must_use]
    pub fn initial_config(&self, variant: Option<&str>) -> ZoneConfig {
        let mut config: ZoneConfig = self
            .config_schema
            .iter()
            .map(|f| (f.key.clone(), f.default_value.clone()))
            .collect();
        for (key, value) in self.default_config.iter() {
            config.insert(key.clone(), value.clone());
        }
        if let Some(variant) = variant {
            config.insert("variant", variant.into());
        }
        config
    }

    /// Checks the definition's internal consistency.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.id.is_empty() {
            anyhow::bail!("Component ID cannot be empty");
        }
        if self.max_instances == 0 {
            anyhow::bail!("Component '{}' must allow at least one instance", self.id);
        }
        for field in &self.config_schema {
            if !field.accepts(&field.default_value) {
                anyhow::bail!(
                    "Component '{}' field '{}' has a default that does not match its type",
                    self.id,
                    field.key
                );
            }
        }
        Ok(())
    }
}
