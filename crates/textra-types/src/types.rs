use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type OverlayId = Uuid;

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Context menu activation coming from the host
    MenuClicked(MenuClick),
    /// Translation is ready, open an overlay for it
    ShowOverlay(OverlayPayload),
    /// User interaction with an overlay. `None` targets the newest overlay.
    Overlay {
        overlay_id: Option<OverlayId>,
        event: OverlayEvent,
    },
    RetranslationFinished {
        overlay_id: OverlayId,
        seq: u64,
        result: Result<String, RelayError>,
    },
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub u32);

/// Bounding rectangle of the selection, in viewport coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

/// Absolute page position
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuClick {
    pub menu_item_id: String,
    #[serde(default)]
    pub selection_text: Option<String>,
    pub tab_id: TabId,
    #[serde(default)]
    pub anchor: Rect,
    #[serde(default)]
    pub scroll: ScrollOffset,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayPayload {
    pub translated_text: String,
    pub original_text: String,
    pub source_language: String,
    pub target_language: String,
    pub tab_id: TabId,
    pub anchor: Rect,
    pub scroll: ScrollOffset,
}

/// Parts of an overlay a pointer event can land on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayElement {
    LanguageBar,
    SourceSelect,
    TargetSelect,
    TextSurface,
    CloseButton,
    Frame,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OverlayEvent {
    SourceChanged { code: String },
    TargetChanged { code: String },
    PointerDown { target: OverlayElement, x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    Close,
}

/// One line of host input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostInput {
    MenuClick(MenuClick),
    Overlay {
        #[serde(default)]
        overlay_id: Option<OverlayId>,
        event: OverlayEvent,
    },
}

impl From<HostInput> for AppEvent {
    fn from(input: HostInput) -> Self {
        match input {
            HostInput::MenuClick(click) => AppEvent::MenuClicked(click),
            HostInput::Overlay { overlay_id, event } => AppEvent::Overlay { overlay_id, event },
        }
    }
}

/// Message sent from an overlay to the background translator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum RelayMessage {
    Retranslate {
        text: String,
        from: String,
        to: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    #[error("Relay channel closed")]
    Closed,

    #[error("Relay dropped the reply")]
    NoReply,
}
