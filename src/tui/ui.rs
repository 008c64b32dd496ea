use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::app::{App, AppMode, FormField};
use crate::core::RenderKind;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    match app.mode {
        AppMode::Form | AppMode::Input => draw_form(frame, app),
        AppMode::Results => draw_results(frame, app),
    }
}

/// Draw the scene form
fn draw_form(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title or edit line
            Constraint::Min(11),    // Form
            Constraint::Length(3),  // Status bar
            Constraint::Length(2),  // Help line
        ])
        .split(frame.area());

    if app.mode == AppMode::Input {
        draw_edit_line(frame, app, chunks[0]);
    } else {
        draw_title(frame, chunks[0]);
    }

    draw_fields(frame, app, chunks[1]);
    draw_status(frame, app, chunks[2]);
    draw_help(frame, app, chunks[3]);
}

fn draw_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(vec![Line::from(vec![
        Span::styled(
            "Photo Scene Changer",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " - Restyle travel photos with Gemini",
            Style::default().fg(Color::Gray),
        ),
    ])])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(title, area);
}

fn draw_edit_line(frame: &mut Frame, app: &App, area: Rect) {
    let field = app.selected_field();
    let input = Paragraph::new(app.edit_buffer.as_str())
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(format!(
                    "{} (Enter to apply, Esc to cancel)",
                    field.label()
                )),
        );
    frame.render_widget(input, area);

    frame.set_cursor_position((area.x + app.cursor_pos as u16 + 1, area.y + 1));
}

fn draw_fields(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = FormField::all()
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let is_selected = i == app.form_selected;
            let value = app.field_value(*field);

            let hint = if field.is_text() {
                " [Enter]"
            } else if *field == FormField::RemoveText {
                " [Space]"
            } else {
                " [←→]"
            };

            let content = Line::from(vec![
                Span::styled(
                    format!("{:<26}", field.label()),
                    if is_selected {
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::White)
                    },
                ),
                Span::styled(value, Style::default().fg(Color::Gray)),
                Span::styled(
                    if is_selected { hint } else { "" },
                    Style::default().fg(Color::DarkGray),
                ),
            ]);

            ListItem::new(content)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Scene"))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(list, area);
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let (message, style) = if let Some(err) = &app.error_message {
        (err.as_str(), Style::default().fg(Color::Red))
    } else if let Some(err) = &app.variation_error {
        (err.as_str(), Style::default().fg(Color::Red))
    } else if app.generating {
        ("Rendering scene...", Style::default().fg(Color::Yellow))
    } else if app.generating_variations {
        ("Rendering variations...", Style::default().fg(Color::Yellow))
    } else if let Some(status) = &app.status_message {
        (status.as_str(), Style::default().fg(Color::Green))
    } else {
        ("Ready", Style::default().fg(Color::Gray))
    };

    let status = Paragraph::new(message)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status, area);
}

fn draw_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.mode {
        AppMode::Input => "Enter: Apply | Esc: Cancel",
        AppMode::Form => {
            "↑↓: Navigate | ←→/Space: Change | Enter: Edit | g: Generate | v: Variations | r: Results | q: Quit"
        }
        _ => "",
    };

    let help = Paragraph::new(help_text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}

/// Draw render results
fn draw_results(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(10),    // Results
            Constraint::Length(2),  // Help
        ])
        .split(area);

    let header = Paragraph::new("Results")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    let mut lines: Vec<Line> = Vec::new();

    if let Some(render) = &app.primary {
        lines.push(Line::from(vec![Span::styled(
            format!("Primary ({})", render.id),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )]));
        lines.push(Line::from(vec![Span::styled(
            format!("  {}", render.instruction_preview(100)),
            Style::default().fg(Color::White),
        )]));
        if let Some(path) = render.image.as_ref().and_then(|i| i.path.as_deref()) {
            lines.push(Line::from(vec![Span::styled(
                format!("  {}", path),
                Style::default().fg(Color::Gray),
            )]));
        }
        lines.push(Line::from(""));
    }

    for render in &app.variations {
        let slot = match render.kind {
            RenderKind::Variation { slot } => slot,
            RenderKind::Primary => 0,
        };
        lines.push(Line::from(vec![Span::styled(
            format!("Variation {} ({})", slot, render.id),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )]));
        lines.push(Line::from(vec![Span::styled(
            format!("  {}", render.instruction_preview(100)),
            Style::default().fg(Color::White),
        )]));
        if let Some(path) = render.image.as_ref().and_then(|i| i.path.as_deref()) {
            lines.push(Line::from(vec![Span::styled(
                format!("  {}", path),
                Style::default().fg(Color::Gray),
            )]));
        }
        lines.push(Line::from(""));
    }

    if let Some(err) = &app.variation_error {
        lines.push(Line::from(vec![Span::styled(
            format!("Variations failed: {}", err),
            Style::default().fg(Color::Red),
        )]));
    }

    if lines.is_empty() {
        lines.push(Line::from(vec![Span::styled(
            "No renders yet",
            Style::default().fg(Color::Gray),
        )]));
    }

    let results = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Renders"))
        .wrap(Wrap { trim: true });
    frame.render_widget(results, chunks[1]);

    let help = Paragraph::new("Esc/q: Back").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[2]);
}
