//! The layer control tree: accordion groups, disclosure sub-groups and
//! checkbox rows.
//!
//! Rendering is a pure function of the control tree and the current state.
//! Top-level open/closed state lives in the shared [`AccordionIndices`] set
//! passed down from the drawer; each sub-panel reads and flips only its own
//! [`DisclosureFlags`] entry. Checkbox rows never mutate state directly -
//! they report the layer id to the `toggle_layer` emitter, once per click,
//! and the map collaborator does the flipping.

use bevy_egui::egui;

use crate::controls::{
    AccordionIndices, Control, ControlNode, ControlTree, DisclosureFlags, LayerId,
    LayerVisibility, UiControlGroup,
};
use crate::theme;

/// Width of the accent border marking groups with selected layers
const ACCENT_BORDER_WIDTH: f32 = 5.0;

fn chevron_glyph(is_open: bool) -> &'static str {
    if is_open { "⏶" } else { "⏷" }
}

fn disclosure_glyph(is_open: bool) -> &'static str {
    if is_open { "➖" } else { "➕" }
}

/// Render the whole control tree: one first-level panel per group, in
/// declared order, each keyed by its ordinal index into the accordion set.
pub fn render_layer_control(
    ui: &mut egui::Ui,
    tree: &ControlTree,
    accordion: &mut AccordionIndices,
    disclosures: &mut DisclosureFlags,
    visibility: &LayerVisibility,
    mut toggle_layer: impl FnMut(&LayerId),
) {
    for (index, group) in tree.groups.iter().enumerate() {
        render_first_level_panel(
            ui,
            group,
            index,
            accordion,
            disclosures,
            visibility,
            &mut toggle_layer,
        );
    }
}

fn render_first_level_panel(
    ui: &mut egui::Ui,
    group: &UiControlGroup,
    index: usize,
    accordion: &mut AccordionIndices,
    disclosures: &mut DisclosureFlags,
    visibility: &LayerVisibility,
    toggle_layer: &mut dyn FnMut(&LayerId),
) {
    let is_open = accordion.is_open(index);
    let has_selected = group.has_selected_layers(visibility);

    let header = egui::Frame::new()
        .fill(theme::BACKGROUND)
        .stroke(egui::Stroke::new(1.0, theme::ACCENT))
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                let icon_bg = if has_selected {
                    theme::OFFLIGHT
                } else {
                    theme::MUTED
                };
                egui::Frame::new()
                    .fill(icon_bg)
                    .corner_radius(4.0)
                    .inner_margin(egui::Margin::symmetric(6, 4))
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(group.icon.glyph()).size(theme::font_size(3)),
                        );
                    });

                ui.vertical(|ui| {
                    ui.label(
                        egui::RichText::new(&group.label)
                            .color(theme::PRIMARY)
                            .size(theme::font_size(3))
                            .strong(),
                    );
                    ui.label(
                        egui::RichText::new(&group.description)
                            .color(theme::TEXT)
                            .size(theme::font_size(0)),
                    );
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(chevron_glyph(is_open))
                            .color(theme::PRIMARY)
                            .size(theme::font_size(2)),
                    );
                });
            });
        });

    // Accent border on the left edge marks groups with at least one
    // selected layer
    let rect = header.response.rect;
    let accent = if has_selected {
        theme::HIGHLIGHT
    } else {
        theme::BACKGROUND
    };
    ui.painter().rect_filled(
        egui::Rect::from_min_max(
            rect.min,
            egui::pos2(rect.min.x + ACCENT_BORDER_WIDTH, rect.max.y),
        ),
        0.0,
        accent,
    );

    if header.response.interact(egui::Sense::click()).clicked() {
        accordion.toggle(index);
    }

    if is_open {
        for (key, node) in &group.controls {
            match node {
                ControlNode::Item(control) => {
                    render_control_item(ui, control, visibility, toggle_layer);
                }
                ControlNode::Group { label, subcontrols } => {
                    render_second_level_panel(
                        ui,
                        index,
                        key,
                        label,
                        subcontrols,
                        disclosures,
                        visibility,
                        toggle_layer,
                    );
                }
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn render_second_level_panel(
    ui: &mut egui::Ui,
    group_index: usize,
    key: &str,
    label: &str,
    subcontrols: &[(String, Control)],
    disclosures: &mut DisclosureFlags,
    visibility: &LayerVisibility,
    toggle_layer: &mut dyn FnMut(&LayerId),
) {
    let is_open = disclosures.is_open(group_index, key);

    let header = egui::Frame::new()
        .fill(theme::MUTED)
        .inner_margin(egui::Margin::symmetric(10, 6))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(label.to_uppercase())
                        .color(theme::PRIMARY)
                        .size(theme::font_size(1))
                        .strong(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(disclosure_glyph(is_open))
                            .color(theme::PRIMARY)
                            .size(theme::font_size(1)),
                    );
                });
            });
        });

    if header.response.interact(egui::Sense::click()).clicked() {
        disclosures.toggle(group_index, key);
    }

    if is_open {
        for (_, control) in subcontrols {
            render_control_item(ui, control, visibility, toggle_layer);
        }
    }
}

/// One checkbox row. The checked state is read from the visibility map on
/// every frame ("unknown implies hidden"); a click reports the layer id to
/// the emitter and changes nothing locally.
fn render_control_item(
    ui: &mut egui::Ui,
    control: &Control,
    visibility: &LayerVisibility,
    toggle_layer: &mut dyn FnMut(&LayerId),
) {
    egui::Frame::new()
        .fill(theme::MUTED)
        .inner_margin(egui::Margin::symmetric(12, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            let mut checked = visibility.is_visible(&control.layer_id);
            let response = ui.checkbox(
                &mut checked,
                egui::RichText::new(&control.label)
                    .color(theme::PRIMARY)
                    .size(theme::font_size(2)),
            );
            // `checked` is a frame-local copy; the visibility map is the
            // source of truth and only the map collaborator writes it
            if response.changed() {
                toggle_layer(&control.layer_id);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chevron_glyph_by_open_state() {
        assert_eq!(chevron_glyph(true), "⏶");
        assert_eq!(chevron_glyph(false), "⏷");
    }

    #[test]
    fn test_disclosure_glyph_by_open_state() {
        assert_eq!(disclosure_glyph(true), "➖");
        assert_eq!(disclosure_glyph(false), "➕");
    }
}
