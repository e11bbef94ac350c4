use crate::app::{App, Flow, Focus, Status};
use crate::form::{Field, TaskForm};
use crate::store::WalletStatus;
use crossterm::event::{self, Event};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if app.handle_key(key) == Flow::Quit {
                return Ok(());
            }
        }
    }
}

pub fn draw(f: &mut Frame, app: &App) {
    let form_height = if app.form_available() { 5 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Length(form_height),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);
    if app.form_available() {
        draw_form(f, app, chunks[1]);
    }
    draw_tasks(f, app, chunks[2]);
    draw_status(f, app, chunks[3]);
    draw_help(f, app, chunks[4]);
}

fn focus_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let wallet = match app.wallet_status() {
        WalletStatus::NotRequired => Span::styled("local mock store", Style::default().fg(Color::DarkGray)),
        WalletStatus::Disconnected => Span::styled("wallet not connected (w)", Style::default().fg(Color::Yellow)),
        WalletStatus::Connected(address) => Span::styled(address, Style::default().fg(Color::Green)),
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled("To-Do DApp", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        wallet,
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn field_line<'a>(label: &'a str, form: &'a TaskForm, field: Field, active: bool) -> Line<'a> {
    let value = match field {
        Field::Title => form.title.value(),
        Field::Description => form.description.value(),
    };
    let cursor = if active && form.focused == field { "_" } else { "" };
    Line::from(vec![
        Span::styled(label, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(value),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ])
}

fn draw_form(f: &mut Frame, app: &App, area: Rect) {
    let active = app.focus == Focus::Form && app.editing.is_none();
    let form = Paragraph::new(vec![
        field_line("Task Title:       ", &app.form, Field::Title, active),
        field_line("Task Description: ", &app.form, Field::Description, active),
    ])
    .block(
        Block::default()
            .title("New task")
            .borders(Borders::ALL)
            .border_style(focus_style(active)),
    );
    f.render_widget(form, area);
}

fn draw_tasks(f: &mut Frame, app: &App, area: Rect) {
    let rows: Vec<Row> = app
        .tasks
        .iter()
        .map(|task| match &app.editing {
            Some(edit) if edit.id == task.id => {
                let editing = |field: Field, value: &str| {
                    let marker = if edit.form.focused == field { "_" } else { "" };
                    Cell::from(format!("{value}{marker}")).style(Style::default().fg(Color::Yellow))
                };
                Row::new(vec![
                    editing(Field::Title, edit.form.title.value()),
                    editing(Field::Description, edit.form.description.value()),
                ])
            }
            _ => Row::new(vec![
                Cell::from(task.title.as_str()),
                Cell::from(task.description.as_str()),
            ]),
        })
        .collect();

    let table = Table::new(rows, [Constraint::Percentage(35), Constraint::Percentage(65)])
        .header(
            Row::new(vec!["Title", "Description"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .title("Your Tasks")
                .borders(Borders::ALL)
                .border_style(focus_style(app.focus == Focus::List)),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = TableState::default();
    if !app.tasks.is_empty() {
        state.select(Some(app.selected));
    }
    f.render_stateful_widget(table, area, &mut state);
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let line = match &app.status {
        Some(Status::Info(message)) => Span::styled(message.as_str(), Style::default().fg(Color::Green)),
        Some(Status::Error(message)) => Span::styled(message.as_str(), Style::default().fg(Color::Red)),
        None => Span::raw(""),
    };
    f.render_widget(Paragraph::new(Line::from(line)), area);
}

fn draw_help(f: &mut Frame, app: &App, area: Rect) {
    let help = if app.editing.is_some() {
        "Tab: switch field  Enter: save  Esc: cancel"
    } else if app.focus == Focus::Form {
        "Tab: next field  Enter: save task  Esc: task list  Ctrl-C: quit"
    } else {
        "↑/↓: select  e: edit  d: delete  r: refresh  w: connect wallet  n: new task  q: quit"
    };
    f.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
