//! Keyboard state of the suggestion dropdown.

use desh_darshan_catalog::PlaceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// Visible suggestions plus the highlighted row.
///
/// `selected` is `None` when no row is highlighted. Moving down stops at the
/// last row; moving up from the first row clears the highlight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionPanel {
    items: Vec<PlaceId>,
    visible: bool,
    selected: Option<usize>,
}

impl SuggestionPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rows. The panel is visible iff there is something to show,
    /// and the highlight is cleared.
    pub fn show(&mut self, items: Vec<PlaceId>) {
        self.visible = !items.is_empty();
        self.items = items;
        self.selected = None;
    }

    /// Hide and forget the rows.
    pub fn clear(&mut self) {
        self.items.clear();
        self.hide();
    }

    /// Hide the panel, keeping the rows for when it is shown again.
    pub fn hide(&mut self) {
        self.visible = false;
        self.selected = None;
    }

    pub fn dismiss(&mut self) {
        self.hide();
    }

    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let last = self.items.len() - 1;
        self.selected = Some(self.selected.map_or(0, |i| (i + 1).min(last)));
    }

    pub fn select_previous(&mut self) {
        self.selected = match self.selected {
            Some(0) | None => None,
            Some(i) => Some(i - 1),
        };
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn selected(&self) -> Option<&PlaceId> {
        self.selected.and_then(|i| self.items.get(i))
    }

    /// What a form submit picks: the highlighted row, else the first.
    #[must_use]
    pub fn submit(&self) -> Option<&PlaceId> {
        self.selected().or_else(|| self.items.first())
    }

    /// Apply a key press while the panel is open. Returns the id chosen by
    /// `Enter`; a closed panel ignores every key.
    pub fn handle_key(&mut self, key: PanelKey) -> Option<PlaceId> {
        if !self.visible {
            return None;
        }
        match key {
            PanelKey::ArrowDown => self.select_next(),
            PanelKey::ArrowUp => self.select_previous(),
            PanelKey::Enter => return self.selected().cloned(),
            PanelKey::Escape => self.dismiss(),
        }
        None
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn items(&self) -> &[PlaceId] {
        &self.items
    }
}
