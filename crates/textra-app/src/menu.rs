use std::sync::RwLock;

use textra_types::MenuClick;

pub const TRANSLATE_SELECTION: &str = "translateSelection";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuContext {
    Page,
    Selection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    pub contexts: Vec<MenuContext>,
}

impl MenuItem {
    pub fn translate_selection() -> Self {
        Self {
            id: TRANSLATE_SELECTION.to_string(),
            title: "Translate selection".to_string(),
            contexts: vec![MenuContext::Selection],
        }
    }

    pub fn visible_for(&self, has_selection: bool) -> bool {
        self.contexts.iter().any(|context| match context {
            MenuContext::Page => true,
            MenuContext::Selection => has_selection,
        })
    }
}

/// Context menu entries registered by this process
#[derive(Default)]
pub struct MenuRegistry {
    items: RwLock<Vec<MenuItem>>,
}

impl MenuRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the item unless one with the same id exists. Returns true when added.
    pub fn register(&self, item: MenuItem) -> bool {
        let Ok(mut items) = self.items.write() else {
            tracing::error!("Menu registry lock poisoned");
            return false;
        };
        if items.iter().any(|existing| existing.id == item.id) {
            return false;
        }
        tracing::info!("Registered context menu item '{}'", item.id);
        items.push(item);
        true
    }

    /// Startup registration, safe to call more than once
    pub fn ensure_registered(&self) -> bool {
        self.register(MenuItem::translate_selection())
    }

    pub fn visible_items(&self, has_selection: bool) -> Vec<MenuItem> {
        self.items
            .read()
            .map(|items| {
                items
                    .iter()
                    .filter(|item| item.visible_for(has_selection))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Selected text of a click on the translate entry, if it qualifies
    pub fn selection_for<'a>(&self, click: &'a MenuClick) -> Option<&'a str> {
        if click.menu_item_id != TRANSLATE_SELECTION {
            return None;
        }
        let text = click.selection_text.as_deref()?;
        if text.trim().is_empty() {
            return None;
        }
        let registered = self
            .visible_items(true)
            .iter()
            .any(|item| item.id == click.menu_item_id);

        registered.then_some(text)
    }
}

#[cfg(test)]
mod tests {
    use textra_types::{Rect, ScrollOffset, TabId};

    use super::*;

    fn click(id: &str, text: Option<&str>) -> MenuClick {
        MenuClick {
            menu_item_id: id.to_string(),
            selection_text: text.map(str::to_string),
            tab_id: TabId(1),
            anchor: Rect::default(),
            scroll: ScrollOffset::default(),
        }
    }

    #[test]
    fn registration_is_idempotent() {
        let registry = MenuRegistry::new();
        assert!(registry.ensure_registered());
        assert!(!registry.ensure_registered());
        assert_eq!(registry.visible_items(true).len(), 1);
    }

    #[test]
    fn entry_only_shows_with_a_selection() {
        let registry = MenuRegistry::new();
        registry.ensure_registered();
        assert!(registry.visible_items(false).is_empty());
        assert_eq!(registry.visible_items(true)[0].title, "Translate selection");
    }

    #[test]
    fn only_qualifying_clicks_yield_text() {
        let registry = MenuRegistry::new();
        assert_eq!(registry.selection_for(&click(TRANSLATE_SELECTION, Some("Hi"))), None);

        registry.ensure_registered();
        assert_eq!(registry.selection_for(&click(TRANSLATE_SELECTION, Some(" Hi "))), Some(" Hi "));
        assert_eq!(registry.selection_for(&click(TRANSLATE_SELECTION, Some("  "))), None);
        assert_eq!(registry.selection_for(&click(TRANSLATE_SELECTION, None)), None);
        assert_eq!(registry.selection_for(&click("somethingElse", Some("Hi"))), None);
    }
}
