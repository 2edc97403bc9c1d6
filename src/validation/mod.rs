//! Layout validation engine.
//!
//! [`validate`] derives a fresh list of diagnostics from the current zones, the
//! screen type and the optional theme. It holds no state between calls, so it
//! is safe to re-run after every placement operation.
//!
//! Only visible zones whose component is registered for the active screen take
//! part in any rule. Zones naming an unregistered component are skipped.

use crate::models::{
    ComponentDefinition, Diagnostic, DiagnosticSummary, ScreenType, Severity, ZoneInstance,
};
use crate::registry::ComponentRegistry;
use tracing::debug;

/// Theme that marks a counter-service layout.
pub const EXPRESS_THEME: &str = "express";

/// Variant assumed for send buttons that do not name one.
pub const DEFAULT_SEND_VARIANT: &str = "kitchen";

const SEND_BUTTON: &str = "SendButton";
const TABLE_SELECT: &str = "TableSelect";
const PAYMENT_COMPONENTS: [&str; 4] = ["PayCash", "PayCard", "PaySplit", "QuickPay"];

/// Zones of one component, in first-appearance order.
struct ComponentGroup<'a> {
    definition: &'a ComponentDefinition,
    zones: Vec<&'a ZoneInstance>,
}

impl ComponentGroup<'_> {
    fn zone_ids(&self) -> Vec<String> {
        self.zones.iter().map(|z| z.id.clone()).collect()
    }
}

/// Validation input prepared once and shared by every rule.
struct LayoutView<'a> {
    screen: ScreenType,
    express: bool,
    groups: Vec<ComponentGroup<'a>>,
}

impl<'a> LayoutView<'a> {
    fn new(
        registry: &'a ComponentRegistry,
        zones: &'a [ZoneInstance],
        screen: ScreenType,
        theme: Option<&str>,
    ) -> Self {
        let mut groups: Vec<ComponentGroup<'a>> = Vec::new();

        for zone in zones.iter().filter(|z| z.visible) {
            let Some(definition) = registry.definition_for_screen(&zone.component, screen) else {
                debug!(
                    zone = %zone.id,
                    component = %zone.component,
                    %screen,
                    "skipping zone with unregistered component"
                );
                continue;
            };
            match groups.iter_mut().find(|g| g.definition.id == definition.id) {
                Some(group) => group.zones.push(zone),
                None => groups.push(ComponentGroup {
                    definition,
                    zones: vec![zone],
                }),
            }
        }

        Self {
            screen,
            express: theme == Some(EXPRESS_THEME),
            groups,
        }
    }

    fn group(&self, component: &str) -> Option<&ComponentGroup<'a>> {
        self.groups.iter().find(|g| g.definition.id == component)
    }

    fn has(&self, component: &str) -> bool {
        self.group(component).is_some()
    }
}

/// Validates zones against the registry's rules for `screen`.
///
/// Rules run in a fixed order, so identical input always yields an identical
/// list:
///
/// 1. components over their `max_instances` limit (error)
/// 2. required components with no visible instance (error)
/// 3. conflicting components placed together (error, once per pair)
/// 4. no payment button on a POS screen (warning)
/// 5. no send button on a POS screen (warning)
/// 6. table selector on an express layout (info)
/// 7. no table selector on a non-express POS layout (warning)
/// 8. two send buttons routing to the same destination (error)
#[must_use]
pub fn validate(
    registry: &ComponentRegistry,
    zones: &[ZoneInstance],
    screen: ScreenType,
    theme: Option<&str>,
) -> Vec<Diagnostic> {
    let view = LayoutView::new(registry, zones, screen, theme);
    let mut diagnostics = Vec::new();

    check_instance_limits(&view, &mut diagnostics);
    check_required(registry, &view, &mut diagnostics);
    check_conflicts(registry, &view, &mut diagnostics);
    check_payment_path(&view, &mut diagnostics);
    check_send_button(&view, &mut diagnostics);
    check_express_table_select(&view, &mut diagnostics);
    check_missing_table_select(&view, &mut diagnostics);
    check_send_destinations(&view, &mut diagnostics);

    diagnostics
}

/// Counts diagnostics by severity.
#[must_use]
pub fn summarize(diagnostics: &[Diagnostic]) -> DiagnosticSummary {
    let count = |severity| diagnostics.iter().filter(|d| d.severity == severity).count();
    let errors = count(Severity::Error);
    DiagnosticSummary {
        errors,
        warnings: count(Severity::Warning),
        infos: count(Severity::Info),
        has_errors: errors > 0,
    }
}

/// Whether a layout with these diagnostics may be saved.
///
/// Only errors block saving; warnings and infos are advisory.
#[must_use]
pub fn can_save(diagnostics: &[Diagnostic]) -> bool {
    !diagnostics.iter().any(Diagnostic::is_error)
}

/// Effective send destination of a send button zone.
///
/// `config.variant` wins over the zone's `variant`; with neither set the
/// button sends to the kitchen.
#[must_use]
pub fn send_destination(zone: &ZoneInstance) -> &str {
    zone.config
        .get_str("variant")
        .or(zone.variant.as_deref())
        .unwrap_or(DEFAULT_SEND_VARIANT)
}

fn check_instance_limits(view: &LayoutView<'_>, out: &mut Vec<Diagnostic>) {
    for group in &view.groups {
        let count = group.zones.len();
        let max = usize::try_from(group.definition.max_instances).unwrap_or(usize::MAX);
        if count <= max {
            continue;
        }
        let excess = count - max;
        let name = &group.definition.name;
        out.push(
            Diagnostic::error(
                format!("too-many-{}", group.definition.id),
                format!("{name} appears {count} times but at most {max} allowed"),
            )
            .with_suggestion(format!(
                "Remove {excess} {name} {}",
                if excess == 1 { "instance" } else { "instances" }
            ))
            .with_zones(group.zone_ids())
            .with_component(group.definition.id.clone()),
        );
    }
}

fn check_required(registry: &ComponentRegistry, view: &LayoutView<'_>, out: &mut Vec<Diagnostic>) {
    for definition in registry.required_for_screen(view.screen) {
        if view.has(&definition.id) {
            continue;
        }
        if view.express && definition.id == TABLE_SELECT {
            continue;
        }
        let suggestion = definition.missing_hint.clone().unwrap_or_else(|| {
            format!(
                "Add a {} to the {} area",
                definition.name, definition.default_position
            )
        });
        out.push(
            Diagnostic::error(
                format!("missing-{}", definition.id),
                format!("Missing required component: {}", definition.name),
            )
            .with_suggestion(suggestion)
            .with_component(definition.id.clone()),
        );
    }
}

fn check_conflicts(registry: &ComponentRegistry, view: &LayoutView<'_>, out: &mut Vec<Diagnostic>) {
    for pair in registry.conflict_pairs() {
        let (Some(first), Some(second)) = (view.group(&pair.first), view.group(&pair.second))
        else {
            continue;
        };
        let mut affected = first.zone_ids();
        affected.extend(second.zone_ids());
        out.push(
            Diagnostic::error(
                format!("conflict-{}-{}", pair.first, pair.second),
                format!(
                    "{} and {} cannot be used together",
                    first.definition.name, second.definition.name
                ),
            )
            .with_suggestion(format!(
                "Remove either {} or {}",
                first.definition.name, second.definition.name
            ))
            .with_zones(affected)
            .with_component(pair.first.clone()),
        );
    }
}

fn check_payment_path(view: &LayoutView<'_>, out: &mut Vec<Diagnostic>) {
    if view.screen != ScreenType::Pos || PAYMENT_COMPONENTS.iter().any(|c| view.has(c)) {
        return;
    }
    out.push(
        Diagnostic::warning("no-payment", "No payment buttons on this screen")
            .with_suggestion("Add Cash, Card, Split or Quick Pay so checks can be closed here"),
    );
}

fn check_send_button(view: &LayoutView<'_>, out: &mut Vec<Diagnostic>) {
    if view.screen != ScreenType::Pos || view.has(SEND_BUTTON) {
        return;
    }
    out.push(
        Diagnostic::warning("no-send-button", "No send button on this screen")
            .with_suggestion("Add a Send Button so orders reach the kitchen or bar")
            .with_component(SEND_BUTTON),
    );
}

fn check_express_table_select(view: &LayoutView<'_>, out: &mut Vec<Diagnostic>) {
    let Some(group) = view.group(TABLE_SELECT).filter(|_| view.express) else {
        return;
    };
    out.push(
        Diagnostic::info(
            "express-table-select",
            "Express layouts usually do not need a table selector",
        )
        .with_suggestion("Counter service has no tables; consider removing the Table Selector")
        .with_zones(group.zone_ids())
        .with_component(TABLE_SELECT),
    );
}

fn check_missing_table_select(view: &LayoutView<'_>, out: &mut Vec<Diagnostic>) {
    if view.screen != ScreenType::Pos || view.express || view.has(TABLE_SELECT) {
        return;
    }
    out.push(
        Diagnostic::warning("no-table-select", "No table selector on this screen")
            .with_suggestion(
                "Add a Table Selector for dine-in service, or use the express theme for counter service",
            )
            .with_component(TABLE_SELECT),
    );
}

fn check_send_destinations(view: &LayoutView<'_>, out: &mut Vec<Diagnostic>) {
    let Some(group) = view.group(SEND_BUTTON) else {
        return;
    };

    let mut destinations: Vec<(&str, Vec<String>)> = Vec::new();
    for zone in &group.zones {
        let destination = send_destination(zone);
        match destinations.iter_mut().find(|(d, _)| *d == destination) {
            Some((_, ids)) => ids.push(zone.id.clone()),
            None => destinations.push((destination, vec![zone.id.clone()])),
        }
    }

    for (destination, ids) in destinations {
        if ids.len() < 2 {
            continue;
        }
        let label = group
            .definition
            .variant(destination)
            .map_or(destination, |v| v.label.as_str());
        out.push(
            Diagnostic::error(
                format!("dup-send-variant-{destination}"),
                format!(
                    "{} send buttons route to the same destination: {label}",
                    ids.len()
                ),
            )
            .with_suggestion("Give each send button a different destination or remove the extras")
            .with_zones(ids)
            .with_component(SEND_BUTTON),
        );
    }
}
