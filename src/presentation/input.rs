use crate::application::{App, AppMode};
use crate::infrastructure::CsvExporter;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Adding | AppMode::Editing => Self::handle_form_mode(app, key),
            AppMode::Search => Self::handle_search_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
            AppMode::ExportCsv => Self::handle_export_mode(app, key),
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('e') = key {
                app.start_csv_export();
            }
            return;
        }

        app.status_message = None;

        match key {
            KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Home | KeyCode::Char('g') => app.select_first(),
            KeyCode::End | KeyCode::Char('G') => app.select_last(),
            KeyCode::Char('a') => app.start_adding(),
            KeyCode::Enter | KeyCode::Char('e') | KeyCode::F(2) => app.start_editing(),
            KeyCode::Char(' ') | KeyCode::Char('t') => app.toggle_selected(),
            KeyCode::Delete | KeyCode::Char('d') => app.delete_selected(),
            KeyCode::Char('/') => app.start_search(),
            KeyCode::Char('f') => app.cycle_filter(),
            KeyCode::Char('x') => app.start_csv_export(),
            KeyCode::Esc => app.clear_query(),
            KeyCode::F(1) | KeyCode::Char('?') => app.show_help(),
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            _ => {}
        }
    }

    fn handle_form_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.submit_form(),
            KeyCode::Esc => app.cancel_form(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => app.toggle_focus(),
            _ => Self::handle_text_key(app, key),
        }
    }

    fn handle_search_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.finish_search(),
            KeyCode::Esc => app.cancel_search(),
            KeyCode::Down => app.select_next(),
            KeyCode::Up => app.select_previous(),
            _ => Self::handle_text_key(app, key),
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.close_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn handle_export_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                let filename = app.get_csv_export_filename();
                let result = CsvExporter::export_to_csv(app.list.items(), &filename);
                app.set_csv_export_result(result);
            }
            KeyCode::Esc => app.cancel_filename_input(),
            _ => Self::handle_text_key(app, key),
        }
    }

    /// Line-editing keys shared by every prompt.
    fn handle_text_key(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Backspace => app.input_backspace(),
            KeyCode::Delete => app.input_delete(),
            KeyCode::Char(c) => app.input_char(c),
            KeyCode::Left | KeyCode::Right | KeyCode::Home | KeyCode::End => {
                if let Some(input) = app.active_input_mut() {
                    match key {
                        KeyCode::Left => input.move_left(),
                        KeyCode::Right => input.move_right(),
                        KeyCode::Home => input.move_home(),
                        _ => input.move_end(),
                    }
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::FormField;
    use crate::domain::{ItemFilter, ShoppingItem};
    use tempfile::TempDir;

    fn press(app: &mut App, key: KeyCode) {
        InputHandler::handle_key_event(app, key, KeyModifiers::NONE);
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_add_item_with_keys() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.mode, AppMode::Adding);

        type_text(&mut app, "Milk");
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, FormField::Quantity);
        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "2");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.list.items()[0].name, "Milk");
        assert_eq!(app.list.items()[0].quantity, 2);
    }

    #[test]
    fn test_form_keys_do_not_trigger_shortcuts() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "dates");
        assert_eq!(app.name_input.value(), "dates");
        assert!(app.list.is_empty());

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.list.is_empty());
    }

    #[test]
    fn test_toggle_edit_and_delete_keys() {
        let mut app = App::default();
        app.hydrate(vec![
            ShoppingItem::with_id("a", "Milk", 2),
            ShoppingItem::with_id("b", "Eggs", 12),
        ]);

        press(&mut app, KeyCode::Char(' '));
        assert!(app.list.items()[0].purchased);

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.mode, AppMode::Editing);
        press(&mut app, KeyCode::End);
        type_text(&mut app, "!");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.list.items()[1].name, "Eggs!");

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.list.len(), 1);
        assert!(app.take_dirty());
    }

    #[test]
    fn test_search_and_filter_keys() {
        let mut app = App::default();
        app.hydrate(vec![
            ShoppingItem::with_id("a", "Milk", 2),
            ShoppingItem::with_id("b", "Eggs", 12),
        ]);

        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode, AppMode::Search);
        type_text(&mut app, "egg");
        assert_eq!(app.visible_items().len(), 1);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Normal);

        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.query.filter, ItemFilter::Purchased);
        assert!(app.visible_items().is_empty());

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.visible_items().len(), 2);
    }

    #[test]
    fn test_help_keys() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.mode, AppMode::Help);
        press(&mut app, KeyCode::PageDown);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.help_scroll, 4);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_csv_export_key_binding() {
        let mut app = App::default();
        InputHandler::handle_key_event(&mut app, KeyCode::Char('e'), KeyModifiers::CONTROL);
        assert_eq!(app.mode, AppMode::ExportCsv);
        assert_eq!(app.export_input.value(), "shopping-list.csv");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.export_input.value().is_empty());
    }

    #[test]
    fn test_csv_export_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let mut app = App::new(path.to_str().unwrap());
        app.hydrate(vec![ShoppingItem::with_id("a", "Milk", 2)]);

        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, AppMode::Normal);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Milk,2,no"));
        assert!(!app.take_dirty());
    }
}
