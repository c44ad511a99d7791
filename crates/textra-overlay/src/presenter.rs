use textra_config::overlay::OverlayConfig;
use textra_types::{OverlayEvent, OverlayId, OverlayPayload, Position, RelayError, RelayMessage};
use uuid::Uuid;

use crate::component::{DescriptionInput, OverlayDescription};
use crate::drag::{DragController, DragListeners};
use crate::state::OverlayState;

pub const RETRANSLATION_FAILED: &str = "Translation failed";

/// Re-translation the overlay wants performed on its behalf
#[derive(Debug, Clone, PartialEq)]
pub struct RetranslateRequest {
    pub overlay_id: OverlayId,
    pub seq: u64,
    pub message: RelayMessage,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEffect {
    Retranslate(RetranslateRequest),
    TextReplaced(String),
    Moved(Position),
    Dismissed,
}

/// One live overlay: its state, its description and the drag interaction
pub struct Overlay {
    state: OverlayState,
    description: OverlayDescription,
    drag: DragController,
    /// Sequence number of the newest re-translation issued
    latest_seq: u64,
    closed: bool,
}

impl Overlay {
    pub fn open(payload: &OverlayPayload, languages: &[(&str, &str)], config: &OverlayConfig) -> Self {
        let id = Uuid::new_v4();
        let description = OverlayDescription::build(
            DescriptionInput {
                id,
                translated_text: &payload.translated_text,
                source_language: &payload.source_language,
                target_language: &payload.target_language,
                anchor: payload.anchor,
                scroll: payload.scroll,
            },
            languages,
            config,
        );

        let state = OverlayState {
            original_text: payload.original_text.clone(),
            current_translation: payload.translated_text.clone(),
            source_language: payload.source_language.clone(),
            target_language: payload.target_language.clone(),
            position: description.position,
        };

        Self {
            state,
            description,
            drag: DragController::default(),
            latest_seq: 0,
            closed: false,
        }
    }

    pub fn id(&self) -> OverlayId {
        self.description.id
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn description(&self) -> &OverlayDescription {
        &self.description
    }

    pub fn drag_listeners(&self) -> DragListeners {
        self.drag.listeners()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn handle(&mut self, event: OverlayEvent) -> Option<OverlayEffect> {
        if self.closed {
            return None;
        }

        match event {
            OverlayEvent::SourceChanged { code } => {
                if code == self.state.source_language || !self.description.source_select.offers(&code) {
                    return None;
                }
                self.state.source_language = code.clone();
                self.description.source_select.selected = code;
                Some(self.retranslate())
            }
            OverlayEvent::TargetChanged { code } => {
                if code == self.state.target_language || !self.description.target_select.offers(&code) {
                    return None;
                }
                self.state.target_language = code.clone();
                self.description.target_select.selected = code;
                Some(self.retranslate())
            }
            OverlayEvent::PointerDown { target, x, y } => {
                self.drag.pointer_down(target, Position { x, y }, self.state.position);
                None
            }
            OverlayEvent::PointerMove { x, y } => {
                let position = self.drag.pointer_move(Position { x, y })?;
                self.state.position = position;
                self.description.position = position;
                Some(OverlayEffect::Moved(position))
            }
            OverlayEvent::PointerUp => {
                self.drag.pointer_up();
                None
            }
            OverlayEvent::Close => {
                self.drag.detach();
                self.closed = true;
                Some(OverlayEffect::Dismissed)
            }
        }
    }

    /// Apply a relay response. Responses older than the newest request are dropped.
    pub fn finish_retranslation(
        &mut self,
        seq: u64,
        result: Result<String, RelayError>,
    ) -> Option<OverlayEffect> {
        if self.closed {
            return None;
        }
        if seq != self.latest_seq {
            tracing::debug!(
                "Dropping stale translation {} for overlay {} (latest {})",
                seq,
                self.id(),
                self.latest_seq
            );
            return None;
        }

        let text = match result {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => RETRANSLATION_FAILED.to_string(),
            Err(e) => {
                tracing::error!("Re-translation failed: {}", e);
                RETRANSLATION_FAILED.to_string()
            }
        };

        self.state.current_translation = text.clone();
        self.description.output.value = text.clone();
        Some(OverlayEffect::TextReplaced(text))
    }

    fn retranslate(&mut self) -> OverlayEffect {
        self.latest_seq += 1;
        OverlayEffect::Retranslate(RetranslateRequest {
            overlay_id: self.id(),
            seq: self.latest_seq,
            message: RelayMessage::Retranslate {
                text: self.state.original_text.clone(),
                from: self.state.source_language.clone(),
                to: self.state.target_language.clone(),
            },
        })
    }
}
