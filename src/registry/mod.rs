//! Component registry: the static catalog of zone types.
//!
//! The catalog is embedded in the binary at compile time and parsed once per
//! process. It never changes at runtime, so a single shared instance can be
//! handed out to every layout session.

use crate::models::{ComponentCategory, ComponentDefinition, ScreenType};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

/// Catalog schema from components.json.
#[derive(Debug, Deserialize)]
struct ComponentCatalog {
    #[allow(dead_code)]
    version: String,
    components: Vec<ComponentDefinition>,
}

/// Unordered pair of conflicting component IDs, stored smaller ID first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConflictPair {
    /// Lexicographically smaller component ID
    pub first: String,
    /// Lexicographically larger component ID
    pub second: String,
}

impl ConflictPair {
    /// Builds a normalized pair from two IDs in any order.
    #[must_use]
    pub fn new(a: &str, b: &str) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self {
            first: first.to_string(),
            second: second.to_string(),
        }
    }

    /// Whether `id` is one side of the pair.
    #[must_use]
    pub fn involves(&self, id: &str) -> bool {
        self.first == id || self.second == id
    }
}

/// Immutable catalog of component definitions with fast lookup.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    /// All definitions in catalog order
    definitions: Vec<ComponentDefinition>,
    /// Fast lookup by component ID
    lookup: HashMap<String, usize>,
    /// Symmetric conflict relation
    conflicts: BTreeSet<ConflictPair>,
}

impl ComponentRegistry {
    /// Loads the registry from the embedded catalog.
    pub fn load() -> Result<Self> {
        let json_data = include_str!("components.json");
        let catalog: ComponentCatalog =
            serde_json::from_str(json_data).context("Failed to parse embedded components.json")?;
        Self::from_definitions(catalog.components)
    }

    /// Shared process-wide registry built from the embedded catalog.
    ///
    /// The catalog is parsed on first use; later calls return the same instance.
    pub fn builtin() -> Result<&'static Self> {
        static BUILTIN: OnceLock<std::result::Result<ComponentRegistry, String>> =
            OnceLock::new();
        BUILTIN
            .get_or_init(|| Self::load().map_err(|e| format!("{e:#}")))
            .as_ref()
            .map_err(|e| anyhow::anyhow!("{e}"))
    }

    /// Builds a registry from explicit definitions.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - two definitions share an ID
    /// - a definition is internally inconsistent
    /// - a conflict names an unknown component
    pub fn from_definitions(definitions: Vec<ComponentDefinition>) -> Result<Self> {
        let mut lookup = HashMap::new();
        for (idx, definition) in definitions.iter().enumerate() {
            definition.validate()?;
            if lookup.insert(definition.id.clone(), idx).is_some() {
                anyhow::bail!("Duplicate component ID '{}' in catalog", definition.id);
            }
        }

        let mut conflicts = BTreeSet::new();
        for definition in &definitions {
            for other in definition.conflict_ids() {
                if !lookup.contains_key(other) {
                    anyhow::bail!(
                        "Component '{}' declares a conflict with unknown component '{}'",
                        definition.id,
                        other
                    );
                }
                if other != &definition.id {
                    conflicts.insert(ConflictPair::new(&definition.id, other));
                }
            }
        }

        Ok(Self {
            definitions,
            lookup,
            conflicts,
        })
    }

    /// Gets a definition by ID.
    #[must_use]
    pub fn definition_by_id(&self, id: &str) -> Option<&ComponentDefinition> {
        let idx = self.lookup.get(id)?;
        self.definitions.get(*idx)
    }

    /// Gets a definition by ID, only if it belongs to `screen`.
    #[must_use]
    pub fn definition_for_screen(
        &self,
        id: &str,
        screen: ScreenType,
    ) -> Option<&ComponentDefinition> {
        self.definition_by_id(id)
            .filter(|definition| definition.layout_type == screen)
    }

    /// All definitions of a screen, in catalog order.
    #[must_use]
    pub fn definitions_for_screen(&self, screen: ScreenType) -> Vec<&ComponentDefinition> {
        self.definitions
            .iter()
            .filter(|definition| definition.layout_type == screen)
            .collect()
    }

    /// Definitions of a screen grouped by palette category.
    ///
    /// Groups follow [`ComponentCategory::ALL`] order; empty groups are omitted.
    #[must_use]
    pub fn definitions_by_category(
        &self,
        screen: ScreenType,
    ) -> Vec<(ComponentCategory, Vec<&ComponentDefinition>)> {
        ComponentCategory::ALL
            .into_iter()
            .filter_map(|category| {
                let group: Vec<&ComponentDefinition> = self
                    .definitions
                    .iter()
                    .filter(|d| d.layout_type == screen && d.category == category)
                    .collect();
                (!group.is_empty()).then_some((category, group))
            })
            .collect()
    }

    /// Required definitions of a screen, in catalog order.
    #[must_use]
    pub fn required_for_screen(&self, screen: ScreenType) -> Vec<&ComponentDefinition> {
        self.definitions
            .iter()
            .filter(|d| d.layout_type == screen && d.required)
            .collect()
    }

    /// The symmetric conflict relation, ordered by pair.
    pub fn conflict_pairs(&self) -> impl Iterator<Item = &ConflictPair> {
        self.conflicts.iter()
    }

    /// Whether two components conflict, regardless of which side declared it.
    #[must_use]
    pub fn conflicts_with(&self, a: &str, b: &str) -> bool {
        self.conflicts.contains(&ConflictPair::new(a, b))
    }

    /// All definitions in catalog order.
    #[must_use]
    pub fn definitions(&self) -> &[ComponentDefinition] {
        &self.definitions
    }

    /// Total number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
