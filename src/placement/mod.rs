//! Placement engine: add, remove, relocate, reorder and duplicate zones.
//!
//! Every operation takes the current [`ZoneStore`] by reference and returns a
//! new store; the caller's store is never touched. Operations naming a zone
//! that does not exist return an unchanged copy, so callers can chain them
//! without checking first.
//!
//! The engine consults the [`ComponentRegistry`] for defaults and limits but
//! does not refuse over-limit adds: the validation engine reports those.

use crate::models::{ConfigValue, Position, ZoneInstance, ZoneStore};
use crate::registry::ComponentRegistry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Direction of a single-step reorder within a position bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards the start of the bucket
    Up,
    /// Towards the end of the bucket
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

impl FromStr for Direction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => anyhow::bail!("Unknown direction '{other}'. Must be 'up' or 'down'"),
        }
    }
}

/// Result of an operation that may create a zone.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// The store after the operation
    pub store: ZoneStore,
    /// ID of the created zone, if one was created
    pub zone_id: Option<String>,
}

impl Placement {
    fn unchanged(store: &ZoneStore) -> Self {
        Self {
            store: store.clone(),
            zone_id: None,
        }
    }
}

/// Zone placement operations bound to a component registry.
#[derive(Debug, Clone, Copy)]
pub struct PlacementEngine<'a> {
    registry: &'a ComponentRegistry,
}

impl<'a> PlacementEngine<'a> {
    /// Creates an engine backed by `registry`.
    #[must_use]
    pub const fn new(registry: &'a ComponentRegistry) -> Self {
        Self { registry }
    }

    /// The registry this engine consults.
    #[must_use]
    pub const fn registry(&self) -> &'a ComponentRegistry {
        self.registry
    }

    /// Places a new zone of `component` at the end of `position`.
    ///
    /// The zone starts visible with the definition's default config. A
    /// `variant` the definition does not declare is ignored. Unknown
    /// components produce no zone.
    pub fn add(
        &self,
        store: &ZoneStore,
        component: &str,
        position: Position,
        variant: Option<&str>,
    ) -> Placement {
        let Some(definition) = self.registry.definition_by_id(component) else {
            debug!(component, "add ignored: unknown component");
            return Placement::unchanged(store);
        };

        let variant = variant.filter(|v| {
            let known = definition.has_variant(v);
            if !known {
                debug!(component, variant = v, "add: ignoring unknown variant");
            }
            known
        });

        let id = ZoneInstance::generate_id(&definition.id);
        let mut zone = ZoneInstance::new(
            id.clone(),
            definition.id.clone(),
            position,
            store.next_order(position),
        )
        .with_config(definition.initial_config(variant));
        zone.variant = variant.map(String::from);

        let mut next = store.clone();
        next.zones_mut().push(zone);
        Placement {
            store: next,
            zone_id: Some(id),
        }
    }

    /// Removes a zone. Siblings keep their `order` values.
    #[must_use]
    pub fn remove(&self, store: &ZoneStore, id: &str) -> ZoneStore {
        let mut next = store.clone();
        next.zones_mut().retain(|z| z.id != id);
        next
    }

    /// Flips a zone's visibility without touching order or position.
    #[must_use]
    pub fn toggle_visibility(&self, store: &ZoneStore, id: &str) -> ZoneStore {
        edit_zone(store, id, |zone| zone.visible = !zone.visible)
    }

    /// Swaps a zone with its neighbour in the same position bucket.
    ///
    /// `Up` on the first zone and `Down` on the last zone are no-ops.
    #[must_use]
    pub fn reorder(&self, store: &ZoneStore, id: &str, direction: Direction) -> ZoneStore {
        let Some(zone) = store.get(id) else {
            debug!(zone = id, "reorder ignored: unknown zone");
            return store.clone();
        };

        let bucket = store.in_position(zone.position);
        let Some(idx) = bucket.iter().position(|z| z.id == id) else {
            return store.clone();
        };

        let neighbour = match direction {
            Direction::Up => idx.checked_sub(1),
            Direction::Down => (idx + 1 < bucket.len()).then_some(idx + 1),
        };

        match neighbour {
            Some(n) => swap_zones(store, id, &bucket[n].id),
            None => store.clone(),
        }
    }

    /// Moves a zone to the end of another position bucket.
    ///
    /// Leaves a gap in the old bucket's `order` sequence. Moving a zone to
    /// the position it already occupies is a no-op.
    #[must_use]
    pub fn move_to(&self, store: &ZoneStore, id: &str, position: Position) -> ZoneStore {
        match store.get(id) {
            Some(zone) if zone.position != position => {
                let order = store.next_order(position);
                edit_zone(store, id, |zone| {
                    zone.position = position;
                    zone.order = order;
                })
            }
            Some(_) => store.clone(),
            None => {
                debug!(zone = id, "move ignored: unknown zone");
                store.clone()
            }
        }
    }

    /// Drops `source` onto `target`, as a drag-and-drop adapter would.
    ///
    /// Across buckets this is [`move_to`](Self::move_to) the target's position.
    /// Within a bucket the source steps one neighbour at a time until it
    /// reaches the target's index.
    #[must_use]
    pub fn drop_onto(&self, store: &ZoneStore, source: &str, target: &str) -> ZoneStore {
        let (Some(src), Some(tgt)) = (store.get(source), store.get(target)) else {
            debug!(source, target, "drop ignored: unknown zone");
            return store.clone();
        };
        if src.id == tgt.id {
            return store.clone();
        }
        if src.position != tgt.position {
            return self.move_to(store, source, tgt.position);
        }

        let bucket = store.in_position(src.position);
        let from = bucket.iter().position(|z| z.id == source);
        let to = bucket.iter().position(|z| z.id == target);
        let (Some(from), Some(to)) = (from, to) else {
            return store.clone();
        };

        let direction = if to < from {
            Direction::Up
        } else {
            Direction::Down
        };
        (0..from.abs_diff(to)).fold(store.clone(), |current, _| {
            self.reorder(&current, source, direction)
        })
    }

    /// Clones a zone (config, variant, size) under a new ID at the end of its bucket.
    ///
    /// Refused while the component is at its `max_instances` limit.
    pub fn duplicate(&self, store: &ZoneStore, id: &str) -> Placement {
        let Some(zone) = store.get(id) else {
            debug!(zone = id, "duplicate ignored: unknown zone");
            return Placement::unchanged(store);
        };
        let Some(definition) = self.registry.definition_by_id(&zone.component) else {
            debug!(zone = id, component = %zone.component, "duplicate ignored: unknown component");
            return Placement::unchanged(store);
        };
        if !self.can_place(store, &zone.component) {
            debug!(
                zone = id,
                max = definition.max_instances,
                "duplicate refused: component at instance limit"
            );
            return Placement::unchanged(store);
        }

        let new_id = ZoneInstance::generate_id(&definition.id);
        let mut copy = zone.clone();
        copy.id.clone_from(&new_id);
        copy.order = store.next_order(zone.position);

        let mut next = store.clone();
        next.zones_mut().push(copy);
        Placement {
            store: next,
            zone_id: Some(new_id),
        }
    }

    /// Sets one config value after checking it against the component's schema.
    ///
    /// The `variant` key is routed through [`set_variant`](Self::set_variant).
    /// Unknown keys and mistyped values leave the store unchanged.
    #[must_use]
    pub fn set_config(
        &self,
        store: &ZoneStore,
        id: &str,
        key: &str,
        value: ConfigValue,
    ) -> ZoneStore {
        if key == "variant" {
            return match value.as_str() {
                Some(variant) => self.set_variant(store, id, Some(variant)),
                None => store.clone(),
            };
        }

        let Some(zone) = store.get(id) else {
            debug!(zone = id, "config edit ignored: unknown zone");
            return store.clone();
        };
        let accepted = self
            .registry
            .definition_by_id(&zone.component)
            .and_then(|definition| definition.field(key))
            .is_some_and(|field| field.accepts(&value));
        if !accepted {
            debug!(zone = id, key, "config edit ignored: not accepted by schema");
            return store.clone();
        }

        edit_zone(store, id, |zone| zone.config.insert(key, value))
    }

    /// Changes or clears the active variant, keeping `config.variant` in sync.
    ///
    /// Variants the component does not declare leave the store unchanged.
    #[must_use]
    pub fn set_variant(&self, store: &ZoneStore, id: &str, variant: Option<&str>) -> ZoneStore {
        let Some(zone) = store.get(id) else {
            return store.clone();
        };

        match variant {
            Some(variant) => {
                let known = self
                    .registry
                    .definition_by_id(&zone.component)
                    .is_some_and(|definition| definition.has_variant(variant));
                if !known {
                    debug!(zone = id, variant, "variant change ignored: unknown variant");
                    return store.clone();
                }
                edit_zone(store, id, |zone| {
                    zone.variant = Some(variant.to_string());
                    zone.config.insert("variant", variant.into());
                })
            }
            None => edit_zone(store, id, |zone| {
                zone.variant = None;
                zone.config.remove("variant");
            }),
        }
    }

    /// Sets or clears a zone's size overrides.
    #[must_use]
    pub fn resize(
        &self,
        store: &ZoneStore,
        id: &str,
        width: Option<u32>,
        height: Option<u32>,
    ) -> ZoneStore {
        edit_zone(store, id, |zone| {
            zone.width = width;
            zone.height = height;
        })
    }

    /// Whether another instance of `component` fits under its `max_instances`.
    ///
    /// This is the palette's precondition for adding; `add` itself does not
    /// enforce it. Unknown components never fit.
    #[must_use]
    pub fn can_place(&self, store: &ZoneStore, component: &str) -> bool {
        self.registry
            .definition_by_id(component)
            .is_some_and(|definition| {
                let limit = usize::try_from(definition.max_instances).unwrap_or(usize::MAX);
                store.count_for(component) < limit
            })
    }
}

/// Returns a copy of `store` with `f` applied to zone `id`.
fn edit_zone(store: &ZoneStore, id: &str, f: impl FnOnce(&mut ZoneInstance)) -> ZoneStore {
    let mut next = store.clone();
    match next.zones_mut().iter_mut().find(|z| z.id == id) {
        Some(zone) => f(zone),
        None => debug!(zone = id, "edit ignored: unknown zone"),
    }
    next
}

/// Exchanges two zones' places in their bucket.
///
/// Both the `order` values and the collection slots are swapped, so the
/// pair trades places even when their `order` values tie.
fn swap_zones(store: &ZoneStore, a: &str, b: &str) -> ZoneStore {
    let mut next = store.clone();
    let (Some(ia), Some(ib)) = (next.index_of(a), next.index_of(b)) else {
        return next;
    };
    let zones = next.zones_mut();
    let order_a = zones[ia].order;
    zones[ia].order = zones[ib].order;
    zones[ib].order = order_a;
    zones.swap(ia, ib);
    next
}
