//! Drawer UI module.
//!
//! ## Module Structure
//!
//! - [`drawer`] - Side panel, header and startup notices
//! - [`layer_control`] - The accordion of layer visibility toggles
//!
//! ## Systems
//!
//! - [`drawer::drawer_ui`]: Main drawer rendering system
//! - [`drawer::controls_notice_ui`]: Rejected-controls-file notice dialog

mod drawer;
mod layer_control;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::controls::{AccordionIndices, DisclosureFlags};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AccordionIndices>()
            .init_resource::<DisclosureFlags>()
            // Side panel first, then overlay dialogs
            .add_systems(
                EguiPrimaryContextPass,
                (drawer::drawer_ui, drawer::controls_notice_ui).chain(),
            );
    }
}
