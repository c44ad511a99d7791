use std::collections::HashMap;

use textra_types::{OverlayId, Position};

use crate::presenter::Overlay;

/// What one overlay knows about its translation
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayState {
    pub original_text: String,
    pub current_translation: String,
    pub source_language: String,
    pub target_language: String,
    pub position: Position,
}

/// Overlays currently mounted. Repeated triggers open more, nothing is deduplicated.
#[derive(Default)]
pub struct UiState {
    overlays: HashMap<OverlayId, Overlay>,
    opened: Vec<OverlayId>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, overlay: Overlay) -> OverlayId {
        let id = overlay.id();
        self.opened.push(id);
        self.overlays.insert(id, overlay);
        id
    }

    pub fn remove(&mut self, id: &OverlayId) -> Option<Overlay> {
        self.opened.retain(|open| open != id);
        self.overlays.remove(id)
    }

    pub fn get_mut(&mut self, id: &OverlayId) -> Option<&mut Overlay> {
        self.overlays.get_mut(id)
    }

    /// Explicit id, or the most recently opened overlay still alive
    pub fn resolve(&self, id: Option<OverlayId>) -> Option<OverlayId> {
        match id {
            Some(id) => self.overlays.contains_key(&id).then_some(id),
            None => self.opened.last().copied(),
        }
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}
