//! Application state management for the terminal shopping list.
//!
//! `App` owns the current list snapshot and the UI state around it. It
//! never touches storage itself: mutations mark the app dirty and the
//! event loop saves the whole list when it next sees that flag.

use crate::domain::{
    ItemDraft, ItemFilter, ItemId, ItemQuery, ListAction, ListSummary, ShoppingItem, ShoppingList,
};
use crate::infrastructure::{DEFAULT_EXPORT_FILE, ExportError};

/// Represents the current mode of the application.
///
/// The mode decides how key presses are interpreted and which prompt the
/// status bar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Browsing the list - arrow keys move the selection, shortcuts available
    Normal,
    /// Add form is open
    Adding,
    /// Edit form is open for the selected item
    Editing,
    /// User is typing a search query, results update live
    Search,
    /// Help screen is displayed
    Help,
    /// CSV export dialog is open
    ExportCsv,
}

/// Which field of the add/edit form has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Quantity,
}

/// Single-line text buffer with a cursor counted in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set(&mut self, value: impl Into<String>) {
        *self = Self::new(value);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_offset(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.value
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}

/// Main application state containing the shopping list and UI state.
///
/// # Examples
///
/// ```
/// use shoplist::application::{App, AppMode};
///
/// let mut app = App::default();
/// app.start_adding();
/// assert_eq!(app.mode, AppMode::Adding);
///
/// for c in "Milk".chars() {
///     app.input_char(c);
/// }
/// app.submit_form();
///
/// assert_eq!(app.list.len(), 1);
/// assert!(app.take_dirty());
/// ```
#[derive(Debug)]
pub struct App {
    /// Current snapshot of the shopping list
    pub list: ShoppingList,
    /// Search text and filter applied to the list view
    pub query: ItemQuery,
    /// Index of the selected row within the visible items
    pub selected: usize,
    /// Current application mode
    pub mode: AppMode,
    /// Name field of the add/edit form
    pub name_input: TextInput,
    /// Quantity field of the add/edit form
    pub quantity_input: TextInput,
    /// Focused form field
    pub focus: FormField,
    /// Item being edited while in editing mode
    pub editing_id: Option<ItemId>,
    /// Search query buffer
    pub search_input: TextInput,
    /// Filename buffer for CSV export
    pub export_input: TextInput,
    /// Filename prefilled into the export prompt
    pub default_export_file: String,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    dirty: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new(DEFAULT_EXPORT_FILE)
    }
}

impl App {
    pub fn new(default_export_file: impl Into<String>) -> Self {
        Self {
            list: ShoppingList::default(),
            query: ItemQuery::default(),
            selected: 0,
            mode: AppMode::Normal,
            name_input: TextInput::default(),
            quantity_input: TextInput::default(),
            focus: FormField::Name,
            editing_id: None,
            search_input: TextInput::default(),
            export_input: TextInput::default(),
            default_export_file: default_export_file.into(),
            help_scroll: 0,
            status_message: None,
            dirty: false,
        }
    }

    /// Seeds the list with what was loaded from storage at startup.
    ///
    /// An empty load leaves the list alone. Hydration does not mark the
    /// app dirty since the items are already stored.
    pub fn hydrate(&mut self, items: Vec<ShoppingItem>) {
        if !items.is_empty() {
            self.list = std::mem::take(&mut self.list).apply(ListAction::SetItems(items));
            self.selected = 0;
        }
    }

    /// Applies a list action and flags the list for saving.
    pub fn dispatch(&mut self, action: ListAction) {
        self.list = std::mem::take(&mut self.list).apply(action);
        self.dirty = true;
        self.clamp_selection();
    }

    /// Returns whether the list changed since the last call, resetting the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn visible_items(&self) -> Vec<&ShoppingItem> {
        self.query.apply(&self.list)
    }

    pub fn selected_item(&self) -> Option<&ShoppingItem> {
        self.visible_items().get(self.selected).copied()
    }

    pub fn summary(&self) -> ListSummary {
        ListSummary::of(&self.list)
    }

    pub fn select_next(&mut self) {
        let count = self.visible_items().len();
        if self.selected + 1 < count {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.visible_items().len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_items().len();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
    }

    /// Opens the add form with an empty name and a quantity of 1.
    pub fn start_adding(&mut self) {
        self.mode = AppMode::Adding;
        self.name_input.clear();
        self.quantity_input.set(ShoppingItem::DEFAULT_QUANTITY.to_string());
        self.focus = FormField::Name;
        self.editing_id = None;
        self.status_message = None;
    }

    /// Opens the edit form for the selected item, if there is one.
    pub fn start_editing(&mut self) {
        let Some(item) = self.selected_item() else {
            return;
        };
        let (id, name, quantity) = (item.id.clone(), item.name.clone(), item.quantity);

        self.mode = AppMode::Editing;
        self.editing_id = Some(id);
        self.name_input.set(name);
        self.quantity_input.set(quantity.to_string());
        self.focus = FormField::Name;
        self.status_message = None;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Name => FormField::Quantity,
            FormField::Quantity => FormField::Name,
        };
    }

    /// Validates the form and adds or edits the item.
    ///
    /// Invalid input keeps the form open and shows the reason in the
    /// status bar.
    pub fn submit_form(&mut self) {
        let draft = match ItemDraft::parse(self.name_input.value(), self.quantity_input.value()) {
            Ok(draft) => draft,
            Err(error) => {
                self.status_message = Some(format!("Error: {error}"));
                return;
            }
        };

        match (self.mode, self.editing_id.take()) {
            (AppMode::Editing, Some(id)) => {
                self.status_message = Some(format!("Updated {}", draft.name));
                self.dispatch(ListAction::Edit {
                    id,
                    name: draft.name,
                    quantity: draft.quantity,
                });
            }
            (AppMode::Adding, _) => {
                self.status_message = Some(format!("Added {}", draft.name));
                self.dispatch(ListAction::Add(draft.into_item()));
            }
            _ => {}
        }

        self.close_form();
    }

    /// Closes the add/edit form without touching the list.
    pub fn cancel_form(&mut self) {
        self.close_form();
    }

    fn close_form(&mut self) {
        self.mode = AppMode::Normal;
        self.name_input.clear();
        self.quantity_input.clear();
        self.focus = FormField::Name;
        self.editing_id = None;
    }

    /// The text buffer that typed characters go to in the current mode.
    pub fn active_input_mut(&mut self) -> Option<&mut TextInput> {
        match self.mode {
            AppMode::Adding | AppMode::Editing => Some(match self.focus {
                FormField::Name => &mut self.name_input,
                FormField::Quantity => &mut self.quantity_input,
            }),
            AppMode::Search => Some(&mut self.search_input),
            AppMode::ExportCsv => Some(&mut self.export_input),
            AppMode::Normal | AppMode::Help => None,
        }
    }

    /// Routes a typed character to the active buffer.
    pub fn input_char(&mut self, c: char) {
        if let Some(input) = self.active_input_mut() {
            input.insert(c);
        }
        self.sync_search();
    }

    pub fn input_backspace(&mut self) {
        if let Some(input) = self.active_input_mut() {
            input.backspace();
        }
        self.sync_search();
    }

    pub fn input_delete(&mut self) {
        if let Some(input) = self.active_input_mut() {
            input.delete();
        }
        self.sync_search();
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_item().map(|item| item.id.clone()) {
            self.dispatch(ListAction::TogglePurchased(id));
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(item) = self.selected_item() {
            let (id, name) = (item.id.clone(), item.name.clone());
            self.dispatch(ListAction::Delete(id));
            self.status_message = Some(format!("Deleted {name}"));
        }
    }

    /// Starts search mode, keeping any query already in effect.
    pub fn start_search(&mut self) {
        self.mode = AppMode::Search;
        self.search_input.set(self.query.search.clone());
        self.status_message = None;
    }

    /// Leaves search mode with the query still applied.
    pub fn finish_search(&mut self) {
        self.mode = AppMode::Normal;
        let count = self.visible_items().len();
        if !self.query.search.is_empty() {
            self.status_message = Some(format!(
                "{} item{} matching '{}'",
                count,
                if count == 1 { "" } else { "s" },
                self.query.search
            ));
        }
    }

    /// Leaves search mode and drops the search text.
    pub fn cancel_search(&mut self) {
        self.mode = AppMode::Normal;
        self.search_input.clear();
        self.sync_search();
    }

    fn sync_search(&mut self) {
        if matches!(self.mode, AppMode::Search | AppMode::Normal)
            && self.query.search != self.search_input.value()
        {
            self.query.search = self.search_input.value().to_string();
            self.selected = 0;
        }
    }

    pub fn cycle_filter(&mut self) {
        self.set_filter(self.query.filter.next());
    }

    pub fn set_filter(&mut self, filter: ItemFilter) {
        self.query.filter = filter;
        self.selected = 0;
        self.status_message = Some(format!("Showing: {}", filter.label()));
    }

    /// Drops both the search text and the filter.
    pub fn clear_query(&mut self) {
        self.query = ItemQuery::default();
        self.search_input.clear();
        self.selected = 0;
    }

    pub fn show_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// Switches to CSV export mode to prompt for a filename.
    pub fn start_csv_export(&mut self) {
        self.mode = AppMode::ExportCsv;
        self.export_input.set(self.default_export_file.clone());
        self.status_message = None;
    }

    /// Gets the filename to use for CSV export, falling back to the default.
    pub fn get_csv_export_filename(&self) -> String {
        if self.export_input.value().is_empty() {
            self.default_export_file.clone()
        } else {
            self.export_input.value().to_string()
        }
    }

    /// Processes the result of a CSV export and returns to normal mode.
    pub fn set_csv_export_result(&mut self, result: Result<String, ExportError>) {
        match result {
            Ok(filename) => {
                self.status_message = Some(format!("Exported to {filename}"));
                self.default_export_file = filename;
            }
            Err(error) => {
                tracing::warn!(%error, "csv export failed");
                self.status_message = Some(format!("Export failed: {error}"));
            }
        }

        self.cancel_filename_input();
    }

    pub fn cancel_filename_input(&mut self) {
        self.mode = AppMode::Normal;
        self.export_input.clear();
    }
}
