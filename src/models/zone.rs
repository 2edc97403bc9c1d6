//! Zone instances and the ordered store that holds them.

use crate::models::screen::Position;
use crate::models::zone_config::ZoneConfig;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One placed component on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneInstance {
    /// Unique zone ID (stable across moves and reorders)
    pub id: String,
    /// ID of the owning component definition
    pub component: String,
    /// Screen region
    pub position: Position,
    /// Active variant ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    /// Width override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Height override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Relative sequence within `position` (not necessarily contiguous)
    pub order: i64,
    /// Hidden zones stay in the store but are ignored by validation
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Per-zone configuration
    #[serde(default)]
    pub config: ZoneConfig,
}

/// Default value for `visible` (true)
const fn default_visible() -> bool {
    true
}

impl ZoneInstance {
    /// Creates a visible zone with an empty config.
    pub fn new(
        id: impl Into<String>,
        component: impl Into<String>,
        position: Position,
        order: i64,
    ) -> Self {
        Self {
            id: id.into(),
            component: component.into(),
            position,
            variant: None,
            width: None,
            height: None,
            order,
            visible: true,
            config: ZoneConfig::new(),
        }
    }

    /// Sets the active variant.
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Sets the config.
    #[must_use]
    pub fn with_config(mut self, config: ZoneConfig) -> Self {
        self.config = config;
        self
    }

    /// Marks the zone hidden.
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Generates a fresh zone ID for a component (e.g. "sendbutton-1f3a9c2e").
    #[must_use]
    pub fn generate_id(component: &str) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!("{}-{}", component.to_lowercase(), &suffix[..8])
    }
}

/// Ordered collection of the zones of one layout.
///
/// The store itself is never mutated by the placement engine; every
/// operation produces a new store. Collection order doubles as the
/// tie-breaker for zones sharing the same `order` value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneStore {
    zones: Vec<ZoneInstance>,
}

impl ZoneStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing zone list.
    #[must_use]
    pub fn from_zones(zones: Vec<ZoneInstance>) -> Self {
        Self { zones }
    }

    /// All zones in collection order.
    #[must_use]
    pub fn zones(&self) -> &[ZoneInstance] {
        &self.zones
    }

    /// Consumes the store, returning the zone list.
    #[must_use]
    pub fn into_zones(self) -> Vec<ZoneInstance> {
        self.zones
    }

    /// Iterates zones in collection order.
    pub fn iter(&self) -> std::slice::Iter<'_, ZoneInstance> {
        self.zones.iter()
    }

    /// Number of zones (visible or not).
    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Whether the store holds no zones.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Looks up a zone by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ZoneInstance> {
        self.zones.iter().find(|z| z.id == id)
    }

    /// Collection index of a zone.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.zones.iter().position(|z| z.id == id)
    }

    /// Zones of one position bucket, ascending by `order`.
    ///
    /// The sort is stable, so equal `order` values keep collection order.
    #[must_use]
    pub fn in_position(&self, position: Position) -> Vec<&ZoneInstance> {
        let mut bucket: Vec<&ZoneInstance> =
            self.zones.iter().filter(|z| z.position == position).collect();
        bucket.sort_by_key(|z| z.order);
        bucket
    }

    /// Order value for a zone appended to `position`.
    #[must_use]
    pub fn next_order(&self, position: Position) -> i64 {
        self.zones
            .iter()
            .filter(|z| z.position == position)
            .map(|z| z.order)
            .max()
            .map_or(0, |max| max.saturating_add(1))
    }

    /// Number of zones (visible or not) of a component.
    #[must_use]
    pub fn count_for(&self, component: &str) -> usize {
        self.zones.iter().filter(|z| z.component == component).count()
    }

    /// Visible zones in collection order.
    pub fn visible(&self) -> impl Iterator<Item = &ZoneInstance> {
        self.zones.iter().filter(|z| z.visible)
    }

    pub(crate) fn zones_mut(&mut self) -> &mut Vec<ZoneInstance> {
        &mut self.zones
    }
}

impl From<Vec<ZoneInstance>> for ZoneStore {
    fn from(zones: Vec<ZoneInstance>) -> Self {
        Self::from_zones(zones)
    }
}

impl<'a> IntoIterator for &'a ZoneStore {
    type Item = &'a ZoneInstance;
    type IntoIter = std::slice::Iter<'a, ZoneInstance>;

    fn into_iter(self) -> Self::IntoIter {
        self.zones.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ZoneStore {
        ZoneStore::from_zones(vec![
            ZoneInstance::new("b", "PayCard", Position::Bottom, 3),
            ZoneInstance::new("a", "PayCash", Position::Bottom, 1),
            ZoneInstance::new("g", "ItemGrid", Position::Center, 0),
            ZoneInstance::new("c", "QuickPay", Position::Bottom, 3).hidden(),
        ])
    }

    #[test]
    fn test_in_position_sorted_with_stable_ties() {
        let store = store();
        let ids: Vec<&str> = store
            .in_position(Position::Bottom)
            .iter()
            .map(|z| z.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_next_order() {
        let store = store();
        assert_eq!(store.next_order(Position::Bottom), 4);
        assert_eq!(store.next_order(Position::Center), 1);
        assert_eq!(store.next_order(Position::Left), 0);
    }

    #[test]
    fn test_next_order_saturates_at_max() {
        let store = ZoneStore::from_zones(vec![ZoneInstance::new(
            "cash",
            "PayCash",
            Position::Bottom,
            i64::MAX,
        )]);
        assert_eq!(store.next_order(Position::Bottom), i64::MAX);
    }

    #[test]
    fn test_visible_excludes_hidden() {
        let store = store();
        assert_eq!(store.visible().count(), 3);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_generate_id_is_unique_and_prefixed() {
        let a = ZoneInstance::generate_id("SendButton");
        let b = ZoneInstance::generate_id("SendButton");
        assert!(a.starts_with("sendbutton-"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_zone_json_shape() {
        let zone = ZoneInstance::new("z1", "SendButton", Position::Bottom, 2).with_variant("bar");
        let json = serde_json::to_value(&zone).unwrap();
        assert_eq!(json["component"], "SendButton");
        assert_eq!(json["position"], "bottom");
        assert_eq!(json["variant"], "bar");
        assert_eq!(json["visible"], true);
        assert!(json.get("width").is_none());

        let parsed: ZoneInstance =
            serde_json::from_str(r#"{"id":"x","component":"ItemGrid","position":"center","order":0}"#)
                .unwrap();
        assert!(parsed.visible);
        assert!(parsed.config.is_empty());
    }
}
