use crate::application::{App, AppMode, FormField, TextInput};
use crate::domain::ItemFilter;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_filter_bar(f, app, chunks[1]);
    render_list(f, app, chunks[2]);

    match app.mode {
        AppMode::Adding | AppMode::Editing => render_form(f, app, chunks[3]),
        _ => render_status_bar(f, app, chunks[3]),
    }

    if app.mode == AppMode::Help {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let summary = app.summary();
    let header = Paragraph::new(format!(
        "shoplist - Shopping List | {} items, {} purchased, {} to buy",
        summary.total,
        summary.purchased,
        summary.remaining()
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_filter_bar(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw("Filter: ")];
    for filter in [ItemFilter::All, ItemFilter::Purchased, ItemFilter::Unpurchased] {
        let style = if filter == app.query.filter {
            Style::default().bg(Color::LightBlue).fg(Color::Black)
        } else {
            Style::default().fg(Color::Yellow)
        };
        spans.push(Span::styled(format!(" {} ", filter.label()), style));
        spans.push(Span::raw(" "));
    }
    if !app.query.search.is_empty() {
        spans.push(Span::styled(
            format!("| Search: {}", app.query.search),
            Style::default().fg(Color::Magenta),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_list(f: &mut Frame, app: &App, area: Rect) {
    let items = app.visible_items();
    let title = if app.query.is_active() {
        format!("Items ({} of {})", items.len(), app.list.len())
    } else {
        "Items".to_string()
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    if items.is_empty() {
        let message = if app.list.is_empty() {
            "Your list is empty. Press 'a' to add an item."
        } else {
            "No items match the current search and filter."
        };
        let empty = Paragraph::new(message)
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from(""),
        Cell::from("Item"),
        Cell::from("Qty"),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let rows: Vec<Row> = items
        .iter()
        .map(|item| {
            let (mark, style) = if item.purchased {
                (
                    "[x]",
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT),
                )
            } else {
                ("[ ]", Style::default())
            };
            Row::new(vec![
                Cell::from(mark),
                Cell::from(item.name.clone()),
                Cell::from(item.quantity.to_string()),
            ])
            .style(style)
            .height(1)
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Min(10),
        Constraint::Length(8),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1)
        .row_highlight_style(Style::default().bg(Color::Blue).fg(Color::White));

    let mut state = TableState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(table, area, &mut state);
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let title = match app.mode {
        AppMode::Editing => "Edit item (Tab: switch field | Enter: save | Esc: cancel)",
        _ => "Add item (Tab: switch field | Enter: add | Esc: cancel)",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().fg(Color::Green));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(20)])
        .split(inner);

    let name_label = "Name: ";
    let quantity_label = "Quantity: ";
    render_field(f, columns[0], name_label, &app.name_input, app.focus == FormField::Name);
    render_field(
        f,
        columns[1],
        quantity_label,
        &app.quantity_input,
        app.focus == FormField::Quantity,
    );

    if let Some(status) = &app.status_message {
        // Validation errors replace the title so they are visible while typing
        let error = Paragraph::new(status.as_str()).style(Style::default().fg(Color::Red));
        f.render_widget(error, Rect { height: 1, ..area });
    }
}

fn render_field(f: &mut Frame, area: Rect, label: &str, input: &TextInput, focused: bool) {
    let style = if focused {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let line = Line::from(vec![
        Span::styled(label, Style::default().fg(Color::Yellow)),
        Span::styled(input.value(), style),
    ]);
    f.render_widget(Paragraph::new(line), area);

    if focused {
        place_cursor(f, area, label, input);
    }
}

fn place_cursor(f: &mut Frame, area: Rect, prefix: &str, input: &TextInput) {
    let offset = (prefix.chars().count() + input.cursor()) as u16;
    let x = area.x.saturating_add(offset).min(area.right().saturating_sub(1));
    f.set_cursor_position(Position::new(x, area.y));
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let (prompt, input) = match app.mode {
        AppMode::Search => ("Search: ", Some(&app.search_input)),
        AppMode::ExportCsv => ("Export CSV as: ", Some(&app.export_input)),
        _ => ("", None),
    };

    let text = match app.mode {
        AppMode::Normal => app.status_message.clone().unwrap_or_else(|| {
            "a: add | e: edit | space: toggle | d: delete | /: search | f: filter | x: export | ?: help | q: quit"
                .to_string()
        }),
        AppMode::Search => format!("{}{} (Enter to keep, Esc to clear)", prompt, app.search_input.value()),
        AppMode::ExportCsv => format!(
            "{}{} (Enter to export, Esc to cancel)",
            prompt,
            app.export_input.value()
        ),
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
        AppMode::Adding | AppMode::Editing => String::new(),
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Search => Style::default().fg(Color::Magenta),
            AppMode::ExportCsv => Style::default().fg(Color::Yellow),
            AppMode::Help => Style::default().fg(Color::Cyan),
            AppMode::Adding | AppMode::Editing => Style::default().fg(Color::Green),
        });
    f.render_widget(status, area);

    if let Some(input) = input {
        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        place_cursor(f, inner, prompt, input);
    }
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines
        .get(start_line..end_line)
        .unwrap_or_default()
        .join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(
                    "shoplist Help (Line {}/{})",
                    start_line + 1,
                    help_lines.len()
                ))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

const HELP_TEXT: &str = r#"SHOPLIST KEYBOARD REFERENCE

=== LIST ===
↑↓ or j/k       Move the selection
Home/g End/G    Jump to first / last item
a               Add an item
Enter/e/F2      Edit the selected item
Space/t         Mark the selected item purchased / not purchased
Delete/d        Delete the selected item
q               Quit

=== ADD / EDIT FORM ===
Tab             Switch between name and quantity
Enter           Save the item
Esc             Discard the form
                The name is required
                The quantity must be a whole number (blank means 1)

=== SEARCH AND FILTER ===
/               Search by name (case-insensitive, updates as you type)
                Enter keeps the search, Esc clears it
f               Cycle filter: All -> Purchased -> Unpurchased
Esc             Clear search and filter

=== EXPORT ===
x or Ctrl+E     Export the whole list to a CSV file

=== STORAGE ===
The list is saved automatically after every change and loaded again
on the next start. Set SHOPLIST_DATA_DIR to choose where it is kept.

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window"#;
