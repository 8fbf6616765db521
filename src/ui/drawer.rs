//! The drawer: left side panel hosting the layer control tree.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::ControlsFileNotice;
use crate::constants::{COUNTRY, COUNTRY_CODE, DRAWER_WIDTH};
use crate::controls::{
    AccordionIndices, ControlTree, DisclosureFlags, LayerVisibility, ToggleLayerRequest,
};
use crate::theme;

use super::layer_control::render_layer_control;

/// Main drawer UI system.
pub fn drawer_ui(
    mut contexts: EguiContexts,
    tree: Res<ControlTree>,
    mut accordion: ResMut<AccordionIndices>,
    mut disclosures: ResMut<DisclosureFlags>,
    visibility: Res<LayerVisibility>,
    mut toggles: MessageWriter<ToggleLayerRequest>,
) -> Result {
    egui::SidePanel::left("drawer")
        .exact_width(DRAWER_WIDTH)
        .resizable(false)
        .frame(egui::Frame::new().fill(theme::BACKGROUND))
        .show(contexts.ctx_mut()?, |ui| {
            render_header(ui);
            ui.add_space(theme::space(2));
            egui::ScrollArea::vertical().show(ui, |ui| {
                render_layer_control(
                    ui,
                    &tree,
                    &mut accordion,
                    &mut disclosures,
                    &visibility,
                    |layer_id| {
                        toggles.write(ToggleLayerRequest {
                            layer_id: layer_id.clone(),
                        });
                    },
                );
            });
        });
    Ok(())
}

fn render_header(ui: &mut egui::Ui) {
    egui::Frame::new()
        .fill(theme::PRIMARY)
        .inner_margin(egui::Margin::symmetric(12, 10))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(COUNTRY)
                        .color(theme::BACKGROUND)
                        .size(theme::font_size(3))
                        .strong(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(COUNTRY_CODE)
                            .color(theme::OFFLIGHT)
                            .size(theme::font_size(1)),
                    );
                });
            });
        });
}

/// Notice dialog shown when the controls file was rejected at startup.
pub fn controls_notice_ui(
    mut contexts: EguiContexts,
    mut notice: ResMut<ControlsFileNotice>,
) -> Result {
    if !notice.show {
        return Ok(());
    }

    let ctx = contexts.ctx_mut()?;

    egui::Window::new("Controls file rejected")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_width(360.0)
        .show(ctx, |ui| {
            if let Some(ref reason) = notice.reason {
                ui.label(reason);
                ui.add_space(6.0);
            }
            ui.label("Showing the built-in layer catalog instead.");
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                notice.show = false;
                notice.reason = None;
            }
        });
    Ok(())
}
