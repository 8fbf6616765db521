//! Runtime state behind the layer control tree.
//!
//! Three resources with deliberately different shapes:
//!
//! - [`LayerVisibility`] - which layers are shown, written only by the map
//!   collaborator in response to [`ToggleLayerRequest`] messages
//! - [`AccordionIndices`] - the shared set of open top-level panels, owned
//!   by the drawer root (multi-expand accordion)
//! - [`DisclosureFlags`] - independent open booleans per sub-panel
//!
//! The top-level and sub-panel open states are intentionally NOT unified:
//! the accordion is one shared sorted set, the disclosures are per-panel
//! flags with no interaction between siblings.

use bevy::prelude::*;
use std::collections::HashMap;

use super::LayerId;

/// Request to flip one layer's visibility. Emitted by the drawer's checkbox
/// rows, exactly one per click; consumed by the map collaborator.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct ToggleLayerRequest {
    pub layer_id: LayerId,
}

/// Which layers are currently shown on the map.
///
/// A layer id with no entry is treated as hidden ("unknown implies hidden");
/// lookups never fail.
#[derive(Resource, Debug, Clone, Default)]
pub struct LayerVisibility {
    visible: HashMap<LayerId, bool>,
}

impl LayerVisibility {
    pub fn is_visible(&self, id: &LayerId) -> bool {
        self.visible.get(id).copied().unwrap_or(false)
    }

    pub fn set(&mut self, id: LayerId, visible: bool) {
        self.visible.insert(id, visible);
    }

    /// Flip one entry. An absent entry counts as hidden, so toggling it
    /// inserts `true`.
    pub fn toggle(&mut self, id: &LayerId) {
        let flipped = !self.is_visible(id);
        self.visible.insert(id.clone(), flipped);
    }

    pub fn visible_count(&self) -> usize {
        self.visible.values().filter(|v| **v).count()
    }
}

/// The set of open top-level accordion panels, kept sorted ascending.
///
/// The first two panels start open. There is no bound on how many panels
/// may be open at once.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct AccordionIndices {
    open: Vec<usize>,
}

impl Default for AccordionIndices {
    fn default() -> Self {
        Self { open: vec![0, 1] }
    }
}

impl AccordionIndices {
    pub fn is_open(&self, index: usize) -> bool {
        self.open.contains(&index)
    }

    /// Remove the index if present, insert it otherwise. The set stays
    /// sorted ascending after every toggle.
    pub fn toggle(&mut self, index: usize) {
        match self.open.binary_search(&index) {
            Ok(pos) => {
                self.open.remove(pos);
            }
            Err(pos) => {
                self.open.insert(pos, index);
            }
        }
    }

}

#[cfg(test)]
impl AccordionIndices {
    fn open_indices(&self) -> &[usize] {
        &self.open
    }
}

/// Open flags for second-level sub-panels, keyed by the owning group's
/// ordinal and the sub-panel's control key. Every sub-panel starts closed;
/// each flag is flipped only by a click on its own header.
#[derive(Resource, Debug, Clone, Default)]
pub struct DisclosureFlags {
    open: HashMap<(usize, String), bool>,
}

impl DisclosureFlags {
    pub fn is_open(&self, group_index: usize, key: &str) -> bool {
        self.open
            .get(&(group_index, key.to_string()))
            .copied()
            .unwrap_or(false)
    }

    pub fn toggle(&mut self, group_index: usize, key: &str) {
        let entry = self
            .open
            .entry((group_index, key.to_string()))
            .or_insert(false);
        *entry = !*entry;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_missing_entry_is_hidden() {
        let visibility = LayerVisibility::default();
        assert!(!visibility.is_visible(&LayerId::new("roads")));
    }

    #[test]
    fn test_visibility_set_and_read() {
        let mut visibility = LayerVisibility::default();
        visibility.set(LayerId::new("roads"), true);
        visibility.set(LayerId::new("schools"), false);

        assert!(visibility.is_visible(&LayerId::new("roads")));
        assert!(!visibility.is_visible(&LayerId::new("schools")));
        assert_eq!(visibility.visible_count(), 1);
    }

    #[test]
    fn test_visibility_toggle_flips() {
        let mut visibility = LayerVisibility::default();
        visibility.set(LayerId::new("roads"), true);

        visibility.toggle(&LayerId::new("roads"));
        assert!(!visibility.is_visible(&LayerId::new("roads")));

        visibility.toggle(&LayerId::new("roads"));
        assert!(visibility.is_visible(&LayerId::new("roads")));
    }

    #[test]
    fn test_visibility_toggle_absent_entry_shows_layer() {
        let mut visibility = LayerVisibility::default();
        visibility.toggle(&LayerId::new("power-lines"));
        assert!(visibility.is_visible(&LayerId::new("power-lines")));
    }

    #[test]
    fn test_accordion_default_first_two_open() {
        let accordion = AccordionIndices::default();
        assert!(accordion.is_open(0));
        assert!(accordion.is_open(1));
        assert!(!accordion.is_open(2));
    }

    #[test]
    fn test_accordion_toggle_adds_absent_index() {
        let mut accordion = AccordionIndices::default();
        accordion.toggle(3);
        assert!(accordion.is_open(3));
        assert_eq!(accordion.open_indices(), &[0, 1, 3]);
    }

    #[test]
    fn test_accordion_toggle_removes_present_index() {
        let mut accordion = AccordionIndices::default();
        accordion.toggle(0);
        assert!(!accordion.is_open(0));
        assert_eq!(accordion.open_indices(), &[1]);
    }

    #[test]
    fn test_accordion_stays_sorted_after_every_toggle() {
        let mut accordion = AccordionIndices::default();
        for index in [5, 2, 4, 1, 3] {
            accordion.toggle(index);
            let open = accordion.open_indices();
            assert!(open.windows(2).all(|w| w[0] < w[1]), "unsorted: {:?}", open);
        }
        assert_eq!(accordion.open_indices(), &[0, 2, 3, 4, 5]);
    }

    #[test]
    fn test_accordion_multi_expand_has_no_bound() {
        let mut accordion = AccordionIndices::default();
        for index in 2..10 {
            accordion.toggle(index);
        }
        for index in 0..10 {
            assert!(accordion.is_open(index));
        }
    }

    #[test]
    fn test_disclosure_default_closed() {
        let flags = DisclosureFlags::default();
        assert!(!flags.is_open(0, "utilities"));
    }

    #[test]
    fn test_disclosure_toggle_flips_only_own_flag() {
        let mut flags = DisclosureFlags::default();
        flags.toggle(0, "utilities");

        assert!(flags.is_open(0, "utilities"));
        // Sibling in the same group and same key in another group stay closed
        assert!(!flags.is_open(0, "coverage"));
        assert!(!flags.is_open(1, "utilities"));

        flags.toggle(0, "utilities");
        assert!(!flags.is_open(0, "utilities"));
    }
}
