//! Map rendering surface.
//!
//! Owns the layer entities drawn on the map and is the single writer of
//! [`LayerVisibility`]: toggle intents emitted by the drawer arrive here as
//! [`ToggleLayerRequest`] messages, flip the visibility map, and show or
//! hide the matching entity. The drawer itself never touches map drawing.

mod sources;

pub use sources::{catalog, source_for, MapSource, SourceKind};

use bevy::prelude::*;

use crate::config::ConfigLoaded;
use crate::constants::{
    MAP_CENTER_LAT, MAP_CENTER_LON, WORLD_UNITS_PER_DEGREE,
};
use crate::controls::{ControlTree, LayerId, LayerVisibility, ToggleLayerRequest};
use crate::theme;

/// Marker tying one spawned entity to one togglable layer.
#[derive(Component, Debug, Clone)]
pub struct MapLayer {
    pub layer_id: LayerId,
}

/// Base edge length of the placeholder quad for the first layer
const LAYER_QUAD_BASE: f32 = 600.0;

/// Each subsequent layer's quad shrinks by this much so stacked layers
/// stay distinguishable
const LAYER_QUAD_STEP: f32 = 40.0;

/// Placeholder overlay color for a layer, picked by what the id describes.
fn layer_color(layer_id: &str) -> Color {
    if layer_id.contains("border") || layer_id.contains("district") {
        theme::LAYER_BOUNDARY
    } else if layer_id.contains("transmission") || layer_id.contains("distribution") {
        theme::LAYER_NETWORK
    } else {
        theme::LAYER_POINTS
    }
}

fn visibility_component(shown: bool) -> Visibility {
    if shown {
        Visibility::Visible
    } else {
        Visibility::Hidden
    }
}

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Transform::from_translation(Vec3::new(
            MAP_CENTER_LON * WORLD_UNITS_PER_DEGREE,
            MAP_CENTER_LAT * WORLD_UNITS_PER_DEGREE,
            1000.0,
        )),
    ));
}

/// Spawn one placeholder quad per leaf layer in the control tree.
///
/// Real tile fetching is out of scope; each quad stands in for one overlay.
/// Layers whose id has no entry in the source catalog still get a quad.
fn spawn_layer_entities(
    mut commands: Commands,
    tree: Res<ControlTree>,
    visibility: Res<LayerVisibility>,
) {
    let center = Vec2::new(
        MAP_CENTER_LON * WORLD_UNITS_PER_DEGREE,
        MAP_CENTER_LAT * WORLD_UNITS_PER_DEGREE,
    );

    for (index, layer_id) in tree.layer_ids().into_iter().enumerate() {
        if let Some(source) = source_for(layer_id.as_str()) {
            debug!(
                "Layer '{}' backed by {:?} tileset {} ({})",
                layer_id, source.kind, source.tileset_id, source.source_layer
            );
        } else {
            debug!("Layer '{}' has no source, rendering placeholder only", layer_id);
        }

        let edge = (LAYER_QUAD_BASE - index as f32 * LAYER_QUAD_STEP).max(LAYER_QUAD_STEP);
        commands.spawn((
            MapLayer {
                layer_id: layer_id.clone(),
            },
            Sprite::from_color(layer_color(layer_id.as_str()), Vec2::splat(edge)),
            Transform::from_translation(center.extend(index as f32)),
            visibility_component(visibility.is_visible(layer_id)),
        ));
    }

    info!(
        "Spawned {} map layers across {} groups ({} visible)",
        tree.leaf_count(),
        tree.group_count(),
        visibility.visible_count()
    );
}

/// The single writer of [`LayerVisibility`]. Processes toggle intents in
/// arrival order: flip the entry, then mirror it onto the entity.
fn apply_toggle_requests(
    mut requests: MessageReader<ToggleLayerRequest>,
    mut visibility: ResMut<LayerVisibility>,
    mut layers: Query<(&MapLayer, &mut Visibility)>,
) {
    for request in requests.read() {
        visibility.toggle(&request.layer_id);
        let shown = visibility.is_visible(&request.layer_id);
        info!(
            "Layer '{}' {}",
            request.layer_id,
            if shown { "shown" } else { "hidden" }
        );

        for (layer, mut entity_visibility) in layers.iter_mut() {
            if layer.layer_id == request.layer_id {
                *entity_visibility = visibility_component(shown);
            }
        }
    }
}

pub struct MapPlugin;

impl Plugin for MapPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ToggleLayerRequest>()
            .add_systems(
                Startup,
                (spawn_camera, spawn_layer_entities.after(ConfigLoaded)),
            )
            .add_systems(
                Update,
                apply_toggle_requests.run_if(on_message::<ToggleLayerRequest>),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_color_boundary() {
        assert_eq!(layer_color("sierra-leone-borders"), theme::LAYER_BOUNDARY);
        assert_eq!(layer_color("sierra-leone-districts"), theme::LAYER_BOUNDARY);
    }

    #[test]
    fn test_layer_color_network() {
        assert_eq!(
            layer_color("sierra-leone-transmission"),
            theme::LAYER_NETWORK
        );
        assert_eq!(layer_color("distribution-mv"), theme::LAYER_NETWORK);
    }

    #[test]
    fn test_layer_color_points_fallback() {
        assert_eq!(layer_color("sierra-leone-schools"), theme::LAYER_POINTS);
        assert_eq!(layer_color("demand-hotspots"), theme::LAYER_POINTS);
    }

    #[test]
    fn test_visibility_component_mapping() {
        assert_eq!(visibility_component(true), Visibility::Visible);
        assert_eq!(visibility_component(false), Visibility::Hidden);
    }
}
