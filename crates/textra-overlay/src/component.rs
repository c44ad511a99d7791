use serde::Serialize;
use textra_config::overlay::OverlayConfig;
use textra_types::{OverlayElement, OverlayId, Position, Rect, ScrollOffset};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageOption {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageSelect {
    pub element: OverlayElement,
    pub label: String,
    pub options: Vec<LanguageOption>,
    pub selected: String,
}

impl LanguageSelect {
    fn new(element: OverlayElement, label: &str, table: &[(&str, &str)], selected: &str) -> Self {
        Self {
            element,
            label: label.to_string(),
            options: table
                .iter()
                .map(|(code, name)| LanguageOption {
                    code: code.to_string(),
                    name: name.to_string(),
                })
                .collect(),
            selected: selected.to_string(),
        }
    }

    pub fn offers(&self, code: &str) -> bool {
        self.options.iter().any(|o| o.code == code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSurface {
    pub element: OverlayElement,
    pub value: String,
    pub read_only: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Button {
    pub element: OverlayElement,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    Change,
    Click,
    PointerDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Retranslate,
    Dismiss,
    BeginDrag,
}

/// Which element reacts to which event, and how
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub element: OverlayElement,
    pub on: Trigger,
    pub action: Action,
}

/// Everything a UI layer needs to draw an overlay and wire its events
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayDescription {
    pub id: OverlayId,
    pub position: Position,
    pub size: Size,
    pub resizable: bool,
    /// Container of both selects, also the drag handle
    pub language_bar: OverlayElement,
    pub source_select: LanguageSelect,
    pub target_select: LanguageSelect,
    pub output: TextSurface,
    pub close: Button,
    pub bindings: Vec<Binding>,
}

/// Overlay top-left corner for a selection, computed once when the overlay opens
pub fn anchor_position(rect: Rect, scroll: ScrollOffset, gap: f64) -> Position {
    Position {
        x: rect.left + scroll.x,
        y: rect.bottom + scroll.y + gap,
    }
}

pub struct DescriptionInput<'a> {
    pub id: OverlayId,
    pub translated_text: &'a str,
    pub source_language: &'a str,
    pub target_language: &'a str,
    pub anchor: Rect,
    pub scroll: ScrollOffset,
}

impl OverlayDescription {
    pub fn build(
        input: DescriptionInput<'_>,
        languages: &[(&str, &str)],
        config: &OverlayConfig,
    ) -> Self {
        Self {
            id: input.id,
            position: anchor_position(input.anchor, input.scroll, config.anchor_gap),
            size: Size {
                width: config.width,
                height: config.height,
            },
            resizable: true,
            language_bar: OverlayElement::LanguageBar,
            source_select: LanguageSelect::new(
                OverlayElement::SourceSelect,
                "Input: ",
                languages,
                input.source_language,
            ),
            target_select: LanguageSelect::new(
                OverlayElement::TargetSelect,
                "Output: ",
                languages,
                input.target_language,
            ),
            output: TextSurface {
                element: OverlayElement::TextSurface,
                value: input.translated_text.to_string(),
                read_only: true,
            },
            close: Button {
                element: OverlayElement::CloseButton,
                label: "Close".to_string(),
            },
            bindings: vec![
                Binding {
                    element: OverlayElement::SourceSelect,
                    on: Trigger::Change,
                    action: Action::Retranslate,
                },
                Binding {
                    element: OverlayElement::TargetSelect,
                    on: Trigger::Change,
                    action: Action::Retranslate,
                },
                Binding {
                    element: OverlayElement::CloseButton,
                    on: Trigger::Click,
                    action: Action::Dismiss,
                },
                Binding {
                    element: OverlayElement::LanguageBar,
                    on: Trigger::PointerDown,
                    action: Action::BeginDrag,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    const TABLE: &[(&str, &str)] = &[("en", "English"), ("fr", "French"), ("vi", "Vietnamese")];

    #[test]
    fn anchors_below_selection_including_scroll() {
        let rect = Rect {
            left: 120.0,
            top: 40.0,
            right: 300.0,
            bottom: 60.0,
        };
        let scroll = ScrollOffset { x: 5.0, y: 800.0 };
        assert_eq!(anchor_position(rect, scroll, 10.0), Position { x: 125.0, y: 870.0 });
    }

    #[test]
    fn selects_are_populated_and_preselected() {
        let description = OverlayDescription::build(
            DescriptionInput {
                id: Uuid::new_v4(),
                translated_text: "Xin chào",
                source_language: "en",
                target_language: "vi",
                anchor: Rect::default(),
                scroll: ScrollOffset::default(),
            },
            TABLE,
            &OverlayConfig::default(),
        );

        assert_eq!(description.source_select.options.len(), 3);
        assert_eq!(description.source_select.options[1].name, "French");
        assert_eq!(description.source_select.selected, "en");
        assert_eq!(description.target_select.selected, "vi");
        assert_eq!(description.target_select.label, "Output: ");
        assert!(description.output.read_only);
        assert_eq!(description.output.value, "Xin chào");
        assert_eq!(description.size, Size { width: 400, height: 300 });
        assert!(description.bindings.contains(&Binding {
            element: OverlayElement::CloseButton,
            on: Trigger::Click,
            action: Action::Dismiss,
        }));
    }
}
