use super::app::{App, Focus, PromptKind};
use crate::model::{ListPane, PagerView, TablePane, TableView, LOADING_DOCUMENTS};
use itertools::Itertools;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState,
        Wrap,
    },
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // badges
            Constraint::Min(5),    // lists and table
            Constraint::Length(1), // pager
            Constraint::Length(1), // key help
        ])
        .split(f.area());

    draw_badges(f, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .split(chunks[1]);
    let lists = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(body[0]);

    let view = app.console.view();
    draw_list(
        f,
        lists[0],
        " Databases ",
        &view.databases,
        app.database_cursor,
        app.focus == Focus::Databases,
    );
    draw_list(
        f,
        lists[1],
        " Collections ",
        &view.collections,
        app.collection_cursor,
        app.focus == Focus::Collections,
    );
    draw_table(f, body[1], &view.table, app);
    draw_pager(f, chunks[2], &view.pager, app);
    f.render_widget(
        Paragraph::new("Tab focus  ↑↓ move  Enter select  [ ] page  + - size  r refresh  d delete  L logout  q quit")
            .style(Style::default().fg(Color::DarkGray)),
        chunks[3],
    );

    match app.prompt {
        Some(PromptKind::Login) => draw_login(f, app),
        Some(PromptKind::Confirm) => draw_confirm(f, app),
        None => {}
    }
}

fn draw_badges(f: &mut Frame, area: Rect, app: &App) {
    let view = app.console.view();
    let session = if app.console.session().authenticated {
        "logged in"
    } else {
        "not logged in"
    };
    let line = Line::from(vec![
        Span::styled("Database: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            view.active_database.as_str(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Collection: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            view.active_collection.as_str(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("   Page size: {}   ({})", app.console.state().limit(), session),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title)
}

fn draw_list(f: &mut Frame, area: Rect, title: &str, pane: &ListPane, cursor: usize, focused: bool) {
    let block = pane_block(title, focused);
    let entries = match pane {
        ListPane::Entries(entries) => entries,
        ListPane::Error(text) => {
            let p = Paragraph::new(text.as_str())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(block);
            f.render_widget(p, area);
            return;
        }
        ListPane::Placeholder(text) | ListPane::Loading(text) => {
            let p = Paragraph::new(text.as_str())
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: true })
                .block(block);
            f.render_widget(p, area);
            return;
        }
    };

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            if entry.active {
                ListItem::new(format!("● {}", entry.name))
                    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            } else {
                ListItem::new(format!("  {}", entry.name))
            }
        })
        .collect();

    let mut state = ListState::default();
    if focused {
        state.select(Some(cursor));
    }
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_table(f: &mut Frame, area: Rect, pane: &TablePane, app: &App) {
    let block = pane_block(" Documents ", app.focus == Focus::Documents);
    let (text, style) = match pane {
        TablePane::Table(table) => return draw_rows(f, area, table, block, app),
        TablePane::Loading => (LOADING_DOCUMENTS, Style::default().fg(Color::DarkGray)),
        TablePane::Placeholder(text) => (text.as_str(), Style::default().fg(Color::DarkGray)),
        TablePane::Error(text) => (text.as_str(), Style::default().fg(Color::Red)),
    };
    let p = Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(p, area);
}

fn draw_rows(f: &mut Frame, area: Rect, table: &TableView, block: Block<'_>, app: &App) {
    let header = Row::new(table.headers())
        .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED));

    let rows = table.rows.iter().map(|row| {
        let mut cells: Vec<Cell> = row
            .cells
            .iter()
            .map(|cell| {
                let style = if cell.structured {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default()
                };
                Cell::from(cell.text.clone()).style(style)
            })
            .collect();
        let action = if row.delete_id.is_some() { "[d] delete" } else { "" };
        cells.push(Cell::from(action).style(Style::default().fg(Color::Red)));
        Row::new(cells)
    });

    let widths = table
        .columns
        .iter()
        .map(|_| Constraint::Fill(1))
        .chain(std::iter::once(Constraint::Length(10)));

    let mut state = TableState::default();
    if app.focus == Focus::Documents {
        state.select(Some(app.row_cursor));
    }
    let widget = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_stateful_widget(widget, area, &mut state);
}

fn draw_pager(f: &mut Frame, area: Rect, pager: &PagerView, app: &App) {
    let enabled = |on: bool| {
        if on {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };
    let limit = app.console.state().limit();
    let spans = [
        Span::styled("[ prev", enabled(pager.previous_enabled)),
        Span::raw(pager.indicator.clone()),
        Span::styled("next ]", enabled(pager.next_enabled)),
        Span::raw(pager.count.clone()),
        Span::raw(format!("{} per page", limit)),
    ];
    let line = Line::from(Itertools::intersperse(spans.into_iter(), Span::raw("   ")).collect_vec());
    f.render_widget(Paragraph::new(line), area);
}

fn draw_login(f: &mut Frame, app: &App) {
    let view = app.console.view();
    let area = centered_rect(50, 7, f.area());
    f.render_widget(Clear, area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    f.render_widget(
        Paragraph::new("Login required. Enter the admin password.")
            .style(Style::default().add_modifier(Modifier::BOLD)),
        chunks[0],
    );
    f.render_widget(&app.input, chunks[1]);
    if let Some(error) = view.login.error.as_deref() {
        f.render_widget(
            Paragraph::new(error).style(Style::default().fg(Color::Red)),
            chunks[2],
        );
    }
}

fn draw_confirm(f: &mut Frame, app: &App) {
    let Some(prompt) = app.console.view().confirm.as_ref() else {
        return;
    };
    let area = centered_rect(60, 10, f.area());
    f.render_widget(Clear, area);
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Confirm deletion ");
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(2), Constraint::Length(3), Constraint::Length(1)])
        .split(inner);
    f.render_widget(
        Paragraph::new(prompt.message.as_str()).wrap(Wrap { trim: true }),
        chunks[0],
    );
    if prompt.token_required {
        f.render_widget(&app.input, chunks[1]);
    } else {
        f.render_widget(
            Paragraph::new("Enter to delete, Esc to cancel").style(Style::default().fg(Color::DarkGray)),
            chunks[1],
        );
    }
    let status = if prompt.busy {
        Line::styled("Deleting…", Style::default().fg(Color::DarkGray))
    } else if let Some(error) = prompt.error.as_deref() {
        Line::styled(error, Style::default().fg(Color::Red))
    } else {
        Line::default()
    };
    f.render_widget(Paragraph::new(status), chunks[2]);
}

/// A `width`% wide, `height` rows tall rectangle centered in `r`.
fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width) / 2),
            Constraint::Percentage(width),
            Constraint::Percentage((100 - width) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_stays_inside_frame() {
        let frame = Rect::new(0, 0, 100, 40);
        let area = centered_rect(50, 7, frame);
        assert_eq!(area.height, 7);
        assert_eq!(area.width, 50);
        assert!(area.x >= 20 && area.right() <= 80);
        assert!(area.bottom() <= frame.bottom());
    }
}
