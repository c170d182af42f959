use crate::query::Runner;
use crate::tui::app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

pub fn draw<R: Runner>(f: &mut Frame, app: &App<R>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Editor view / results
            Constraint::Length(1), // Status bar or minibuffer
        ])
        .split(f.area());

    draw_main_area(f, app, chunks[0]);

    if app.prompt.is_some() {
        draw_prompt(f, app, chunks[1]);
    } else {
        draw_status_bar(f, app, chunks[1]);
    }
}

/// Editor view, split with the result pane while it is open
fn draw_main_area<R: Runner>(f: &mut Frame, app: &App<R>, area: Rect) {
    if !app.results_visible {
        draw_preview(f, app, area);
        return;
    }

    let direction = if app.split_horizontal {
        Direction::Vertical
    } else {
        Direction::Horizontal
    };
    let chunks = Layout::default()
        .direction(direction)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    draw_preview(f, app, chunks[0]);
    draw_results_list(f, app, chunks[1]);
}

fn draw_results_list<R: Runner>(f: &mut Frame, app: &App<R>, area: Rect) {
    let records = app.session().records();

    let items: Vec<ListItem> = records
        .iter()
        .map(|record| {
            let path_style = Style::default().fg(Color::Blue);
            let line_style = Style::default().fg(Color::Yellow);
            let scope_style = Style::default().fg(Color::Cyan);
            let content_style = Style::default().fg(Color::White);

            // Format: path:line  scope  content
            let prefix_len = record.file.as_os_str().len() + record.symbol_scope.len() + 12;
            let max_content_len = (area.width as usize).saturating_sub(prefix_len);
            let content: String = record.context.trim().chars().take(max_content_len).collect();

            let line = Line::from(vec![
                Span::styled(format!("{}:", record.file.display()), path_style),
                Span::styled(format!("{}", record.line), line_style),
                Span::raw("  "),
                Span::styled(record.symbol_scope.as_str(), scope_style),
                Span::raw("  "),
                Span::styled(content, content_style),
            ]);

            ListItem::new(line)
        })
        .collect();

    let title = match app.session().results() {
        Some(results) => format!(
            " *cscope* {} '{}' ({}) ",
            results.operation,
            results.symbol,
            records.len()
        ),
        None => " *cscope* ".to_string(),
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default().with_selected(app.list.selected());
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_preview<R: Runner>(f: &mut Frame, app: &App<R>, area: Rect) {
    let title = match app.preview_path {
        Some(ref path) => format!(" {} ", path.display()),
        None => match app.index_directory() {
            Some(dir) => format!(" {} ", dir.display()),
            None => " csx ".to_string(),
        },
    };

    let content = if let Some(ref preview) = app.preview_content {
        let selected_line = app.selected_line();
        let lines: Vec<Line> = preview
            .lines()
            .enumerate()
            .skip(app.preview_scroll)
            .take(area.height.saturating_sub(2) as usize)
            .map(|(line_num, line)| {
                let actual_line = line_num + 1;

                // Check if this is the matched line
                let is_match = selected_line == Some(actual_line as u32);

                let line_num_style = Style::default().fg(Color::DarkGray);
                let content_style = if is_match {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };

                Line::from(vec![
                    Span::styled(format!("{:4} ", actual_line), line_num_style),
                    Span::styled(line, content_style),
                ])
            })
            .collect();

        Text::from(lines)
    } else {
        Text::raw("No preview available")
    };

    let preview = Paragraph::new(content)
        .block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(preview, area);
}

fn draw_prompt<R: Runner>(f: &mut Frame, app: &App<R>, area: Rect) {
    let Some(ref prompt) = app.prompt else {
        return;
    };
    let label = prompt.kind.label();

    let line = Line::from(vec![
        Span::styled(label, Style::default().fg(Color::Yellow)),
        Span::raw(prompt.input.as_str()),
    ]);
    f.render_widget(Paragraph::new(line), area);

    let cursor_x = area.x + (label.len() + prompt.input.chars().count()) as u16;
    f.set_cursor_position((cursor_x.min(area.right().saturating_sub(1)), area.y));
}

fn draw_status_bar<R: Runner>(f: &mut Frame, app: &App<R>, area: Rect) {
    let status = Paragraph::new(app.status_message.as_str())
        .style(Style::default().fg(Color::Cyan));

    f.render_widget(status, area);
}
