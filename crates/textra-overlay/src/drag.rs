use textra_types::{OverlayElement, Position};

/// Document-level listeners that only exist while a drag is in progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragListeners {
    pub pointer_move: bool,
    pub pointer_up: bool,
}

impl DragListeners {
    pub fn attached(&self) -> bool {
        self.pointer_move || self.pointer_up
    }
}

#[derive(Debug, Default)]
pub struct DragController {
    /// Pointer offset from the overlay corner, captured at drag start
    grab: Option<Position>,
    listeners: DragListeners,
}

/// Only the language bar and the selects inside it start a drag
pub fn is_drag_handle(target: OverlayElement) -> bool {
    matches!(
        target,
        OverlayElement::LanguageBar | OverlayElement::SourceSelect | OverlayElement::TargetSelect
    )
}

impl DragController {
    pub fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }

    pub fn listeners(&self) -> DragListeners {
        self.listeners
    }

    /// Returns true when a drag started
    pub fn pointer_down(&mut self, target: OverlayElement, pointer: Position, origin: Position) -> bool {
        if !is_drag_handle(target) {
            return false;
        }

        self.grab = Some(Position {
            x: pointer.x - origin.x,
            y: pointer.y - origin.y,
        });
        self.listeners = DragListeners {
            pointer_move: true,
            pointer_up: true,
        };
        true
    }

    /// New overlay position while dragging
    pub fn pointer_move(&mut self, pointer: Position) -> Option<Position> {
        if !self.listeners.pointer_move {
            return None;
        }
        let grab = self.grab?;
        Some(Position {
            x: pointer.x - grab.x,
            y: pointer.y - grab.y,
        })
    }

    /// Ends the drag and detaches the document listeners
    pub fn pointer_up(&mut self) -> bool {
        if !self.listeners.pointer_up {
            return false;
        }
        self.detach();
        true
    }

    pub fn detach(&mut self) {
        self.grab = None;
        self.listeners = DragListeners::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64) -> Position {
        Position { x, y }
    }

    #[test]
    fn drag_tracks_pointer_offset() {
        let mut drag = DragController::default();
        assert!(drag.pointer_down(OverlayElement::LanguageBar, at(110.0, 220.0), at(100.0, 200.0)));

        assert_eq!(drag.pointer_move(at(150.0, 260.0)), Some(at(140.0, 240.0)));
        assert_eq!(drag.pointer_move(at(10.0, 25.0)), Some(at(0.0, 5.0)));

        assert!(drag.pointer_up());
        assert!(!drag.listeners().attached());
        assert_eq!(drag.pointer_move(at(500.0, 500.0)), None);
    }

    #[test]
    fn selects_inside_the_bar_are_handles() {
        let mut drag = DragController::default();
        assert!(drag.pointer_down(OverlayElement::TargetSelect, at(0.0, 0.0), at(0.0, 0.0)));
        assert!(drag.is_dragging());
    }

    #[test]
    fn other_elements_never_drag() {
        for target in [
            OverlayElement::TextSurface,
            OverlayElement::CloseButton,
            OverlayElement::Frame,
        ] {
            let mut drag = DragController::default();
            assert!(!drag.pointer_down(target, at(5.0, 5.0), at(0.0, 0.0)));
            assert_eq!(drag.pointer_move(at(50.0, 50.0)), None);
            assert!(!drag.listeners().attached());
            assert!(!drag.pointer_up());
        }
    }
}
