use super::keymap::{command_for, is_interrupt, Command};
use super::ui;
use crate::api::CatalogApi;
use crate::logic::{execute, Completion, Console, Event, Request, Ticket};
use crate::model::{ListPane, TablePane};
use crossterm::{
    event::{Event as TermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind},
    execute as term_execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use log::debug;
use ratatui::{
    backend::CrosstermBackend,
    widgets::{Block, Borders},
    Terminal,
};
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;
use tui_textarea::TextArea;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Databases,
    Collections,
    Documents,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Databases => Focus::Collections,
            Focus::Collections => Focus::Documents,
            Focus::Documents => Focus::Databases,
        }
    }

    fn previous(self) -> Self {
        match self {
            Focus::Databases => Focus::Documents,
            Focus::Collections => Focus::Databases,
            Focus::Documents => Focus::Collections,
        }
    }
}

/// Which prompt currently owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Login,
    Confirm,
}

pub struct App {
    pub console: Console,
    pub focus: Focus,
    pub database_cursor: usize,
    pub collection_cursor: usize,
    pub row_cursor: usize,
    pub input: TextArea<'static>,
    pub prompt: Option<PromptKind>,
    pub exit: bool,
    api: Arc<dyn CatalogApi>,
    sender: mpsc::UnboundedSender<Completion>,
    receiver: mpsc::UnboundedReceiver<Completion>,
}

impl App {
    pub fn new(console: Console, api: Arc<dyn CatalogApi>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            console,
            focus: Focus::Databases,
            database_cursor: 0,
            collection_cursor: 0,
            row_cursor: 0,
            input: new_textarea(None),
            prompt: None,
            exit: false,
            api,
            sender,
            receiver,
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        term_execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.run_loop(&mut terminal).await;

        // Restore terminal
        disable_raw_mode()?;
        term_execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let tickets = self.console.start();
        self.spawn_all(tickets);
        let mut events = EventStream::new();

        while !self.exit {
            terminal.draw(|f| ui::draw(f, self))?;

            tokio::select! {
                Some(completion) = self.receiver.recv() => self.on_completion(completion),
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(TermEvent::Key(key))) => self.on_key(key),
                    Some(Ok(_)) => {}
                    Some(Err(err)) => return Err(err.into()),
                    None => self.exit = true,
                }
            }
        }
        Ok(())
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if is_interrupt(&key) {
            self.exit = true;
            return;
        }
        match self.prompt {
            Some(kind) => self.on_prompt_key(kind, key),
            None => self.on_command(command_for(key)),
        }
    }

    fn on_prompt_key(&mut self, kind: PromptKind, key: KeyEvent) {
        match (kind, key.code) {
            (PromptKind::Login, KeyCode::Enter) => {
                let password = self.input_text();
                self.dispatch(Event::Login { password });
            }
            (PromptKind::Confirm, KeyCode::Enter) => {
                let typed = self.input_text();
                self.dispatch(Event::ConfirmDeletion { typed });
            }
            (PromptKind::Confirm, KeyCode::Esc) => self.dispatch(Event::CancelDeletion),
            // The login prompt cannot be dismissed.
            (PromptKind::Login, KeyCode::Esc) => {}
            _ => {
                self.input.input(key);
            }
        }
    }

    fn on_command(&mut self, command: Command) {
        match command {
            Command::FocusNext => self.focus = self.focus.next(),
            Command::FocusPrevious => self.focus = self.focus.previous(),
            Command::Up => self.move_cursor(-1),
            Command::Down => self.move_cursor(1),
            Command::Select => self.select(),
            Command::PreviousPage => self.dispatch(Event::PreviousPage),
            Command::NextPage => self.dispatch(Event::NextPage),
            Command::LargerPage => {
                let limit = self.console.state().limit().next();
                self.dispatch(Event::ChangeLimit(limit));
            }
            Command::SmallerPage => {
                let limit = self.console.state().limit().previous();
                self.dispatch(Event::ChangeLimit(limit));
            }
            Command::Refresh => match self.focus {
                Focus::Databases => self.dispatch(Event::RefreshDatabases),
                Focus::Collections => self.dispatch(Event::RefreshCollections),
                Focus::Documents => {}
            },
            Command::Delete => self.arm_delete(),
            Command::Logout => self.dispatch(Event::Logout),
            Command::Quit => self.exit = true,
            Command::None => {}
        }
    }

    fn select(&mut self) {
        let view = self.console.view();
        let event = match self.focus {
            Focus::Databases => name_at(&view.databases, self.database_cursor)
                .map(|name| Event::SelectDatabase(name.to_string())),
            Focus::Collections => name_at(&view.collections, self.collection_cursor)
                .map(|name| Event::SelectCollection(name.to_string())),
            Focus::Documents => None,
        };
        if let Some(event) = event {
            if matches!(event, Event::SelectDatabase(_)) {
                self.collection_cursor = 0;
            }
            self.row_cursor = 0;
            self.dispatch(event);
        }
    }

    fn arm_delete(&mut self) {
        let view = self.console.view();
        let event = match self.focus {
            Focus::Databases => name_at(&view.databases, self.database_cursor)
                .map(|name| Event::ArmDeleteDatabase { name: name.to_string() }),
            Focus::Collections => name_at(&view.collections, self.collection_cursor)
                .map(|name| Event::ArmDeleteCollection { name: name.to_string() }),
            Focus::Documents => view
                .table
                .as_table()
                .and_then(|table| table.rows.get(self.row_cursor))
                .and_then(|row| row.delete_id.clone())
                .map(|id| Event::ArmDeleteDocument { id }),
        };
        if let Some(event) = event {
            self.dispatch(event);
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.focused_len();
        let cursor = match self.focus {
            Focus::Databases => &mut self.database_cursor,
            Focus::Collections => &mut self.collection_cursor,
            Focus::Documents => &mut self.row_cursor,
        };
        if len == 0 {
            *cursor = 0;
            return;
        }
        *cursor = cursor.saturating_add_signed(delta).min(len - 1);
    }

    fn focused_len(&self) -> usize {
        let view = self.console.view();
        match self.focus {
            Focus::Databases => view.databases.names().len(),
            Focus::Collections => view.collections.names().len(),
            Focus::Documents => match &view.table {
                TablePane::Table(table) => table.rows.len(),
                _ => 0,
            },
        }
    }

    pub fn dispatch(&mut self, event: Event) {
        let tickets = self.console.handle(event);
        self.spawn_all(tickets);
        self.after_update();
    }

    pub fn on_completion(&mut self, completion: Completion) {
        let login_answer = matches!(completion.ticket.request, Request::Login { .. })
            && self.console.is_current(&completion.ticket);
        let tickets = self.console.complete(completion);
        self.spawn_all(tickets);
        self.after_update();
        if login_answer
            && self.prompt == Some(PromptKind::Login)
            && self.console.view().login.error.is_some()
        {
            // Wrong password: start over with an empty field.
            self.input = new_textarea(self.prompt);
        }
    }

    fn spawn_all(&self, tickets: Vec<Ticket>) {
        for ticket in tickets {
            let api = Arc::clone(&self.api);
            let sender = self.sender.clone();
            tokio::spawn(async move {
                let completion = execute(api.as_ref(), ticket).await;
                if sender.send(completion).is_err() {
                    debug!("console gone, dropping completion");
                }
            });
        }
    }

    /// Keep cursors in range and the text field in step with the open prompt.
    fn after_update(&mut self) {
        let view = self.console.view();
        self.database_cursor = clamp(self.database_cursor, view.databases.names().len());
        self.collection_cursor = clamp(self.collection_cursor, view.collections.names().len());
        let rows = view.table.as_table().map_or(0, |t| t.rows.len());
        self.row_cursor = clamp(self.row_cursor, rows);

        let prompt = if view.login.visible {
            Some(PromptKind::Login)
        } else if view.confirm.is_some() {
            Some(PromptKind::Confirm)
        } else {
            None
        };
        if prompt != self.prompt {
            self.input = new_textarea(prompt);
            self.prompt = prompt;
        }
    }

    fn input_text(&self) -> String {
        self.input.lines().join("")
    }
}

fn name_at(pane: &ListPane, cursor: usize) -> Option<&str> {
    pane.names().get(cursor).copied()
}

fn clamp(cursor: usize, len: usize) -> usize {
    cursor.min(len.saturating_sub(1))
}

fn new_textarea(prompt: Option<PromptKind>) -> TextArea<'static> {
    let mut textarea = TextArea::default();
    let title = match prompt {
        Some(PromptKind::Login) => {
            textarea.set_mask_char('*');
            textarea.set_placeholder_text("Admin password");
            " Password "
        }
        _ => {
            textarea.set_placeholder_text("Type the name to confirm, Enter to submit, Esc to cancel");
            " Confirm "
        }
    };
    textarea.set_block(Block::default().borders(Borders::ALL).title(title));
    textarea
}
