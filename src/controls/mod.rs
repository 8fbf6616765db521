//! Layer control tree model.
//!
//! This module provides the data model behind the drawer's layer toggles:
//! the immutable tree of control groups loaded at startup, and the runtime
//! state that tracks which layers are shown and which panels are open.
//!
//! ## Module Structure
//!
//! - [`state`] - Visibility map, accordion indices, disclosure flags
//!
//! ## Key Types
//!
//! - [`ControlTree`]: Resource holding the ordered control groups
//! - [`ControlNode`]: A leaf control or a one-level nesting group
//! - [`LayerId`]: Key identifying one map layer

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

mod state;

pub use state::{AccordionIndices, DisclosureFlags, LayerVisibility, ToggleLayerRequest};

/// Identifies one togglable layer on the map surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(String);

impl LayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Icon shown in a first-level panel header. Rendered as an emoji glyph;
/// the configuration refers to icons by name only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconRef {
    Borders,
    Grid,
    Services,
    People,
}

impl IconRef {
    pub fn glyph(&self) -> &'static str {
        match self {
            IconRef::Borders => "🗺",
            IconRef::Grid => "⚡",
            IconRef::Services => "🏥",
            IconRef::People => "👥",
        }
    }
}

/// A leaf entry: one label bound to one layer id, rendered as a checkbox row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub label: String,
    pub layer_id: LayerId,
}

/// One entry inside a first-level group.
///
/// The two variants encode the depth limit of the configuration: a `Group`
/// holds leaf controls only, so nesting deeper than one sub-level is
/// unrepresentable rather than merely unvalidated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlNode {
    Item(Control),
    Group {
        label: String,
        subcontrols: Vec<(String, Control)>,
    },
}

impl ControlNode {
    /// Number of checkbox rows this node contributes.
    pub fn leaf_count(&self) -> usize {
        match self {
            ControlNode::Item(_) => 1,
            ControlNode::Group { subcontrols, .. } => subcontrols.len(),
        }
    }

    fn collect_layer_ids<'a>(&'a self, out: &mut Vec<&'a LayerId>) {
        match self {
            ControlNode::Item(control) => out.push(&control.layer_id),
            ControlNode::Group { subcontrols, .. } => {
                out.extend(subcontrols.iter().map(|(_, c)| &c.layer_id));
            }
        }
    }
}

/// A top-level accordion entry: header metadata plus an ordered list of
/// controls and sub-groups. Order is exactly the declared order; entries
/// are never sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiControlGroup {
    pub id: String,
    pub label: String,
    pub icon: IconRef,
    pub description: String,
    pub controls: Vec<(String, ControlNode)>,
}

impl UiControlGroup {
    /// Number of checkbox rows across this group, including nested sub-groups.
    pub fn leaf_count(&self) -> usize {
        self.controls.iter().map(|(_, node)| node.leaf_count()).sum()
    }

    /// Every layer id reachable from this group, in declaration order.
    pub fn layer_ids(&self) -> Vec<&LayerId> {
        let mut out = Vec::new();
        for (_, node) in &self.controls {
            node.collect_layer_ids(&mut out);
        }
        out
    }

    /// True when at least one layer reachable from this group (directly or
    /// inside a nested sub-group) is currently visible. Drives the accent
    /// border and icon background of the panel header; recomputed every
    /// frame from the visibility map, never cached.
    pub fn has_selected_layers(&self, visibility: &LayerVisibility) -> bool {
        self.layer_ids().iter().any(|id| visibility.is_visible(id))
    }
}

/// The full control tree, loaded once at startup and immutable afterwards.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlTree {
    pub groups: Vec<UiControlGroup>,
}

impl ControlTree {
    /// Number of top-level accordion entries.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of checkbox rows across the whole tree, independent of which
    /// panels are open.
    pub fn leaf_count(&self) -> usize {
        self.groups.iter().map(|g| g.leaf_count()).sum()
    }

    /// Every layer id in the tree, in declaration order.
    pub fn layer_ids(&self) -> Vec<&LayerId> {
        self.groups.iter().flat_map(|g| g.layer_ids()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(key: &str, label: &str) -> (String, ControlNode) {
        (
            key.to_string(),
            ControlNode::Item(Control {
                label: label.to_string(),
                layer_id: LayerId::new(key),
            }),
        )
    }

    fn subgroup(key: &str, label: &str, leaves: &[(&str, &str)]) -> (String, ControlNode) {
        (
            key.to_string(),
            ControlNode::Group {
                label: label.to_string(),
                subcontrols: leaves
                    .iter()
                    .map(|(k, l)| {
                        (
                            k.to_string(),
                            Control {
                                label: l.to_string(),
                                layer_id: LayerId::new(*k),
                            },
                        )
                    })
                    .collect(),
            },
        )
    }

    /// One group "Infrastructure" with leaves roads/schools and a
    /// "Utilities" sub-group containing power-lines.
    fn infrastructure_group() -> UiControlGroup {
        UiControlGroup {
            id: "infrastructure".to_string(),
            label: "Infrastructure".to_string(),
            icon: IconRef::Grid,
            description: "Roads, schools and utilities".to_string(),
            controls: vec![
                leaf("roads", "Roads"),
                leaf("schools", "Schools"),
                subgroup("utilities", "Utilities", &[("power-lines", "Power lines")]),
            ],
        }
    }

    #[test]
    fn test_group_count_matches_configuration() {
        let tree = ControlTree {
            groups: vec![infrastructure_group(), infrastructure_group()],
        };
        assert_eq!(tree.group_count(), 2);
    }

    #[test]
    fn test_leaf_count_includes_subgroup_leaves() {
        let group = infrastructure_group();
        assert_eq!(group.leaf_count(), 3);

        let tree = ControlTree {
            groups: vec![group],
        };
        assert_eq!(tree.leaf_count(), 3);
    }

    #[test]
    fn test_layer_ids_preserve_declaration_order() {
        let group = infrastructure_group();
        let ids: Vec<&str> = group.layer_ids().iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["roads", "schools", "power-lines"]);
    }

    #[test]
    fn test_has_selected_layers_direct_leaf() {
        let group = infrastructure_group();
        let mut visibility = LayerVisibility::default();
        assert!(!group.has_selected_layers(&visibility));

        visibility.set(LayerId::new("roads"), true);
        assert!(group.has_selected_layers(&visibility));
    }

    #[test]
    fn test_has_selected_layers_nested_leaf() {
        let group = infrastructure_group();
        let mut visibility = LayerVisibility::default();
        visibility.set(LayerId::new("power-lines"), true);
        assert!(group.has_selected_layers(&visibility));
    }

    #[test]
    fn test_has_selected_layers_ignores_foreign_layers() {
        let group = infrastructure_group();
        let mut visibility = LayerVisibility::default();
        visibility.set(LayerId::new("unrelated"), true);
        assert!(!group.has_selected_layers(&visibility));
    }

    #[test]
    fn test_has_selected_layers_tracks_visibility_changes() {
        let group = infrastructure_group();
        let mut visibility = LayerVisibility::default();
        visibility.set(LayerId::new("schools"), true);
        assert!(group.has_selected_layers(&visibility));

        visibility.toggle(&LayerId::new("schools"));
        assert!(!group.has_selected_layers(&visibility));
    }

    #[test]
    fn test_icon_glyphs_not_empty() {
        for icon in [IconRef::Borders, IconRef::Grid, IconRef::Services, IconRef::People] {
            assert!(!icon.glyph().is_empty());
        }
    }

    #[test]
    fn test_icon_ref_kebab_case_serialization() {
        let json = serde_json::to_string(&IconRef::Borders).unwrap();
        assert_eq!(json, "\"borders\"");
        let parsed: IconRef = serde_json::from_str("\"people\"").unwrap();
        assert_eq!(parsed, IconRef::People);
    }

    #[test]
    fn test_layer_id_display_matches_as_str() {
        let id = LayerId::new("sierra-leone-schools");
        assert_eq!(id.to_string(), id.as_str());
    }
}
