// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use common::Task;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::api::TaskApi;
use crate::app::{App, Focus};
use crate::error::FailureHandler;

/// Draws the whole screen: title, form, task list and status bar.
pub fn render<A: TaskApi, H: FailureHandler>(f: &mut Frame, app: &App<A, H>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    let title = Paragraph::new(Line::from(Span::styled(
        "Simple ToDo List App",
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    render_form(f, chunks[1], app);
    render_task_list(f, chunks[2], app);
    render_statusbar(f, chunks[3], app);
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn field<'a>(title: &'a str, value: Span<'a>, focused: bool) -> Paragraph<'a> {
    Paragraph::new(Line::from(value)).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style(focused)),
    )
}

fn placeholder(text: &str) -> Span<'_> {
    Span::styled(text, Style::default().fg(Color::DarkGray))
}

fn render_form<A: TaskApi, H: FailureHandler>(f: &mut Frame, area: Rect, app: &App<A, H>) {
    let drafts = &app.board.drafts;
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20),
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Min(20),
            Constraint::Length(12),
        ])
        .split(area);

    let category = if drafts.category.is_empty() {
        placeholder("Select Category")
    } else {
        Span::raw(drafts.category.as_str())
    };
    f.render_widget(
        field("Category", category, app.focus == Focus::Category),
        cells[0],
    );

    f.render_widget(
        field(
            "Priority",
            Span::raw(drafts.priority.label()),
            app.focus == Focus::Priority,
        ),
        cells[1],
    );

    let due_date = match drafts.due_date {
        Some(date) => Span::raw(date.format("%Y-%m-%d").to_string()),
        None => placeholder("yyyy-mm-dd"),
    };
    f.render_widget(
        field("Due date", due_date, app.focus == Focus::DueDate),
        cells[2],
    );

    let description = if drafts.description.is_empty() {
        placeholder("Enter task...")
    } else {
        Span::raw(drafts.description.as_str())
    };
    f.render_widget(
        field("Description", description, app.focus == Focus::Description),
        cells[3],
    );
    if app.focus == Focus::Description {
        let typed = u16::try_from(drafts.description.chars().count()).unwrap_or(u16::MAX);
        let x = cells[3]
            .x
            .saturating_add(1)
            .saturating_add(typed)
            .min(cells[3].right().saturating_sub(2));
        f.set_cursor_position((x, cells[3].y + 1));
    }

    let button_style = if app.focus == Focus::AddButton {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let button = Paragraph::new(Span::styled("Add Task", button_style))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(app.focus == Focus::AddButton)),
        );
    f.render_widget(button, cells[4]);
}

fn priority_color(priority: i32) -> Color {
    match priority {
        3 => Color::Red,
        2 => Color::Yellow,
        1 => Color::Green,
        _ => Color::Gray,
    }
}

fn task_line(task: &Task) -> Line<'_> {
    let description_style = if task.completed {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
    };

    let mut spans = vec![
        Span::styled(
            format!("{:<7}", task.priority_label()),
            Style::default().fg(priority_color(task.priority)),
        ),
        Span::styled(task.description.as_str(), description_style),
    ];
    if let Some(category) = task.category.as_deref().filter(|c| !c.is_empty()) {
        spans.push(Span::styled(
            format!("  [{category}]"),
            Style::default().fg(Color::Blue),
        ));
    }
    if let Some(due) = task.due_date {
        spans.push(Span::styled(
            format!("  due {}", due.format("%Y-%m-%d")),
            Style::default().fg(Color::Magenta),
        ));
    }
    spans.push(Span::styled(
        if task.completed {
            "  [Undo]"
        } else {
            "  [Complete]"
        },
        Style::default().fg(Color::Cyan),
    ));
    spans.push(Span::styled("  [Delete]", Style::default().fg(Color::Red)));

    Line::from(spans)
}

fn render_task_list<A: TaskApi, H: FailureHandler>(f: &mut Frame, area: Rect, app: &App<A, H>) {
    let focused = app.focus == Focus::TaskList;
    let block = Block::default()
        .title("Task List")
        .borders(Borders::ALL)
        .border_style(border_style(focused));

    if app.board.tasks.is_empty() {
        let empty = Paragraph::new(placeholder("No tasks yet")).block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .board
        .tasks
        .iter()
        .map(|task| ListItem::new(task_line(task)))
        .collect();

    let highlight = if focused {
        Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let list = List::new(items).block(block).highlight_style(highlight);

    let mut state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_statusbar<A: TaskApi, H: FailureHandler>(f: &mut Frame, area: Rect, app: &App<A, H>) {
    let (label, hints) = match app.focus {
        Focus::Category => ("CATEGORY", "←/→ choose"),
        Focus::Priority => ("PRIORITY", "←/→ or 1-3 choose"),
        Focus::DueDate => ("DUE DATE", "←/→ day  PgUp/PgDn week  ⌫ clear"),
        Focus::Description => ("DESCRIPTION", "type  ⏎ add"),
        Focus::AddButton => ("ADD", "⏎ add task"),
        Focus::TaskList => ("TASKS", "↑/↓ select  c complete/undo  d delete  q quit"),
    };

    let mut spans = vec![
        Span::styled(
            format!(" {label} "),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" {hints} | Tab next field | Esc quit ")),
        Span::raw(format!("| {} tasks ", app.board.tasks.len())),
    ];
    if app.pending > 0 {
        spans.push(Span::styled(
            format!("| syncing {} ", app.pending),
            Style::default().fg(Color::Yellow),
        ));
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black)),
        area,
    );
}
