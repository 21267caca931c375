//! UI rendering with Ratatui.

use crate::app::{App, InputMode, Screen};
use crate::toast::ToastLevel;
use panelrs_core::{DetailState, Field, ModalController, ModalKind, PageItem};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

/// Main render function.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs + search
            Constraint::Min(3),    // Table
            Constraint::Length(1), // Pagination
            Constraint::Length(1), // Help / status
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_table(frame, app, chunks[1]);
    render_pagination(frame, app, chunks[2]);
    render_status(frame, app, chunks[3]);

    if let Some(ref modal) = app.modal {
        render_modal(frame, app, modal, area);
    }

    render_toast(frame, app, area);
}

/// Render the tab bar and the search box.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let tab = |label: &str, active: bool| {
        if active {
            Span::styled(
                format!(" {label} "),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {label} "), Style::default().fg(Color::DarkGray))
        }
    };
    let tabs = Line::from(vec![
        tab("Themes", app.screen == Screen::Themes),
        Span::raw(" "),
        tab("User Access Types", app.screen == Screen::AccessTypes),
    ]);
    let tabs_block = Block::default().borders(Borders::ALL).title(" panelrs ");
    let inner = tabs_block.inner(chunks[0]);
    frame.render_widget(tabs_block, chunks[0]);
    frame.render_widget(Paragraph::new(tabs), inner);

    let searching = app.input_mode == InputMode::Search;
    let border_color = if searching { Color::Magenta } else { Color::DarkGray };
    let search_block = Block::default()
        .borders(Borders::ALL)
        .title(" Search (Enter to apply) ")
        .border_style(Style::default().fg(border_color));
    let search_inner = search_block.inner(chunks[1]);
    frame.render_widget(search_block, chunks[1]);

    let typed = app.pane().list.typed_search();
    let mut spans = vec![Span::styled("▸ ", Style::default().fg(border_color))];
    spans.push(Span::raw(typed.to_string()));
    if searching {
        spans.push(Span::styled(
            "_",
            Style::default().add_modifier(Modifier::SLOW_BLINK),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), search_inner);
}

/// Render the current page of records as a table.
fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let pane = app.pane();
    let has_color = pane.descriptor().has_color();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", pane.descriptor().title));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let records = &pane.list.data().records;
    if records.is_empty() {
        let text = if pane.list.is_busy() {
            "Loading..."
        } else {
            "No records found"
        };
        let empty = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let mut header_cells = vec!["ID", "Name", "Description"];
    if has_color {
        header_cells.push("Color");
    }
    header_cells.push("Status");
    let header = Row::new(header_cells)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    let rows = records.iter().enumerate().map(|(i, record)| {
        let mut cells = vec![
            Cell::from(record.id.to_string()),
            Cell::from(record.name.clone()),
            Cell::from(record.description.clone()),
        ];
        if has_color {
            cells.push(Cell::from(record.color.clone().unwrap_or_default()));
        }
        cells.push(Cell::from(
            record.audit.status.clone().unwrap_or_default(),
        ));
        let style = if i == pane.selected_row {
            Style::default()
                .bg(Color::Rgb(60, 60, 80))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Row::new(cells).style(style)
    });

    let mut widths = vec![
        Constraint::Length(8),
        Constraint::Percentage(30),
        Constraint::Percentage(40),
    ];
    if has_color {
        widths.push(Constraint::Length(9));
    }
    widths.push(Constraint::Length(10));

    let table = Table::new(rows, widths).header(header);
    frame.render_widget(table, inner);
}

/// Render the page-number bar with ellipsis placeholders.
fn render_pagination(frame: &mut Frame, app: &App, area: Rect) {
    let pane = app.pane();
    let list = &pane.list;

    let mut spans = vec![Span::styled(" Page: ", Style::default().fg(Color::DarkGray))];
    for item in list.page_window() {
        match item {
            PageItem::Page(n) if n == list.page() => {
                spans.push(Span::styled(
                    format!("[{n}]"),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ));
            }
            PageItem::Page(n) => {
                spans.push(Span::raw(format!(" {n} ")));
            }
            PageItem::Ellipsis => {
                spans.push(Span::styled(" … ", Style::default().fg(Color::DarkGray)));
            }
        }
    }
    spans.push(Span::styled(
        format!(
            "  size {}  {} total",
            list.size(),
            list.data().total_elements
        ),
        Style::default().fg(Color::DarkGray),
    ));
    if list.is_busy() {
        spans.push(Span::styled(
            "  loading…",
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the help line and last-refreshed stamp.
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let refreshed = app
        .last_refreshed
        .map(|t| format!("refreshed {}", t.format("%H:%M:%S")))
        .unwrap_or_default();
    let help = format!(
        " n:add e:edit v:view d:delete /:search s:size h/l:page Tab:screen r:refresh q:quit  {refreshed}"
    );
    let line = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(line, area);
}

/// Render the open modal as a centered overlay.
fn render_modal(frame: &mut Frame, app: &App, modal: &ModalController, area: Rect) {
    let title = match modal.kind() {
        ModalKind::Add => format!(" Add {} ", modal.descriptor().label),
        ModalKind::Edit => format!(" Edit {} ", modal.descriptor().label),
        ModalKind::View => format!(" View {} ", modal.descriptor().label),
        ModalKind::Delete => format!(" Delete {} ", modal.descriptor().label),
    };

    let dialog_width = 60.min(area.width.saturating_sub(4));
    let dialog_height = 16.min(area.height.saturating_sub(4));
    let dialog_area = centered_rect(dialog_width, dialog_height, area);

    frame.render_widget(Clear, dialog_area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    match modal.detail() {
        DetailState::Loading => {
            let loading = Paragraph::new("Loading…")
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center);
            frame.render_widget(loading, inner);
            return;
        }
        DetailState::Failed(message) => {
            // Inline error block in place of the form.
            let error = Paragraph::new(message.as_str())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Center);
            frame.render_widget(error, inner);
            return;
        }
        _ => {}
    }

    match modal.kind() {
        ModalKind::Add | ModalKind::Edit => render_form(frame, app, modal, inner),
        ModalKind::View => render_view(frame, modal, inner),
        ModalKind::Delete => render_delete(frame, modal, inner),
    }
}

fn render_form(frame: &mut Frame, app: &App, modal: &ModalController, area: Rect) {
    let has_color = modal.descriptor().has_color();
    let draft = modal.draft();
    let errors = modal.errors();

    let mut constraints = vec![
        Constraint::Length(3), // Name + error
        Constraint::Length(3), // Description + error
    ];
    if has_color {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(1)); // Hint
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(area);

    render_form_field(
        frame,
        "Name",
        &draft.name,
        errors.get(Field::Name),
        app.modal_field == Field::Name,
        chunks[0],
    );
    render_form_field(
        frame,
        "Description",
        &draft.description,
        errors.get(Field::Description),
        app.modal_field == Field::Description,
        chunks[1],
    );
    if has_color {
        render_form_field(
            frame,
            "Color",
            draft.color.as_deref().unwrap_or(""),
            errors.get(Field::Color),
            app.modal_field == Field::Color,
            chunks[2],
        );
    }

    let hint = Paragraph::new("Tab: next field | Enter: save | Esc: cancel")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint, chunks[chunks.len() - 1]);
}

fn render_form_field(
    frame: &mut Frame,
    label: &str,
    value: &str,
    error: Option<&str>,
    focused: bool,
    area: Rect,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let label_color = if focused { Color::Cyan } else { Color::DarkGray };
    frame.render_widget(
        Paragraph::new(label).style(Style::default().fg(label_color)),
        chunks[0],
    );

    let cursor = if focused { "_" } else { "" };
    frame.render_widget(
        Paragraph::new(format!("▸ {value}{cursor}")).style(Style::default().fg(Color::White)),
        chunks[1],
    );

    if let Some(error) = error {
        frame.render_widget(
            Paragraph::new(error).style(Style::default().fg(Color::Red)),
            chunks[2],
        );
    }
}

fn render_view(frame: &mut Frame, modal: &ModalController, area: Rect) {
    let Some(record) = modal.record() else {
        return;
    };

    let id = record.id.to_string();
    let mut lines = vec![
        detail_line("ID", &id),
        detail_line("Name", &record.name),
        detail_line("Description", &record.description),
    ];
    if let Some(ref color) = record.color {
        lines.push(detail_line("Color", color));
    }
    let audit = &record.audit;
    for (label, value) in [
        ("Status", &audit.status),
        ("Created by", &audit.created_by),
        ("Created on", &audit.created_on),
        ("Updated by", &audit.updated_by),
        ("Updated on", &audit.updated_on),
    ] {
        if let Some(value) = value {
            lines.push(detail_line(label, value));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter: close",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
    let inner = area.inner(Margin::new(1, 1));
    frame.render_widget(paragraph, inner);
}

fn detail_line<'a>(label: &'a str, value: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
        Span::raw(value.to_string()),
    ])
}

fn render_delete(frame: &mut Frame, modal: &ModalController, area: Rect) {
    let subject = modal
        .record_id()
        .map(|id| format!("{} #{id}", modal.descriptor().label))
        .unwrap_or_else(|| modal.descriptor().label.to_string());
    let lines = vec![
        Line::from(format!("Delete this {subject}?")),
        Line::from(""),
        Line::from(Span::styled(
            "y/Enter: delete | n/Esc: cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    let inner = area.inner(Margin::new(1, 1));
    frame.render_widget(paragraph, inner);
}

/// Render the latest toast, if one is alive.
fn render_toast(frame: &mut Frame, app: &App, area: Rect) {
    let Some(toast) = app.toasts.latest() else {
        return;
    };
    let (color, prefix) = match toast.level {
        ToastLevel::Success => (Color::Green, "✔"),
        ToastLevel::Error => (Color::Red, "✖"),
    };
    let text = format!(" {prefix} {} ", toast.message);
    let width = (text.chars().count() as u16 + 2).min(area.width);
    let toast_area = Rect::new(
        area.x + area.width.saturating_sub(width + 1),
        area.y + area.height.saturating_sub(2),
        width,
        1,
    );
    frame.render_widget(Clear, toast_area);
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::Black).bg(color)),
        toast_area,
    );
}

/// Helper to create a centered rectangle.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
