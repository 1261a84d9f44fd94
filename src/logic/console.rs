use crate::error::ConsoleError;
use crate::logic::confirm::ConfirmationWorkflow;
use crate::logic::effects::{Completion, Reply, Request, Ticket, Tickets};
use crate::model::{BrowseState, PageSize, Session, View, EMPTY_MARK};
use log::debug;

/// Discrete operator actions routed to the component handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    RefreshDatabases,
    RefreshCollections,
    SelectDatabase(String),
    SelectCollection(String),
    PreviousPage,
    NextPage,
    ChangeLimit(PageSize),
    ArmDeleteDocument { id: String },
    ArmDeleteCollection { name: String },
    ArmDeleteDatabase { name: String },
    ConfirmDeletion { typed: String },
    CancelDeletion,
    Login { password: String },
    Logout,
}

/// The state container: browse state, session, confirmation workflow and the
/// derived view, mutated together by one handler call at a time.
///
/// `handle` and `complete` return the tickets the caller must execute; their
/// completions come back through `complete`.
#[derive(Debug)]
pub struct Console {
    pub(crate) state: BrowseState,
    pub(crate) session: Session,
    pub(crate) confirm: ConfirmationWorkflow,
    pub(crate) view: View,
    pub(crate) tickets: Tickets,
    /// Set while a database list reload must leave the selection alone.
    pub(crate) keep_database: bool,
    outbox: Vec<Ticket>,
    default_database: Option<String>,
    default_limit: PageSize,
}

impl Console {
    pub fn new(default_database: Option<String>, limit: PageSize) -> Self {
        let mut console = Self {
            state: BrowseState::new(default_database.clone(), limit),
            session: Session::new(),
            confirm: ConfirmationWorkflow::new(),
            view: View::default(),
            tickets: Tickets::new(),
            keep_database: false,
            outbox: Vec::new(),
            default_database,
            default_limit: limit,
        };
        console.update_badges();
        console
    }

    pub fn state(&self) -> &BrowseState {
        &self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn confirmation(&self) -> &ConfirmationWorkflow {
        &self.confirm
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Whether a completion for `ticket` would still be applied.
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.tickets.is_current(ticket)
    }

    /// Enter the browse flow.
    pub fn start(&mut self) -> Vec<Ticket> {
        self.load_databases();
        self.drain()
    }

    pub fn handle(&mut self, event: Event) -> Vec<Ticket> {
        if self.session.prompt_visible && !matches!(event, Event::Login { .. }) {
            debug!("login prompt open, ignoring {:?}", event);
            return self.drain();
        }
        match event {
            Event::RefreshDatabases => self.load_databases(),
            Event::RefreshCollections => self.load_collections(),
            Event::SelectDatabase(name) => self.select_database(&name),
            Event::SelectCollection(name) => self.select_collection(&name),
            Event::PreviousPage => self.previous_page(),
            Event::NextPage => self.next_page(),
            Event::ChangeLimit(limit) => self.change_limit(limit),
            Event::ArmDeleteDocument { id } => self.arm_delete_document(id),
            Event::ArmDeleteCollection { name } => self.arm_delete_collection(name),
            Event::ArmDeleteDatabase { name } => self.arm_delete_database(name),
            Event::ConfirmDeletion { typed } => self.confirm_deletion(&typed),
            Event::CancelDeletion => self.cancel_deletion(),
            Event::Login { password } => self.login(password),
            Event::Logout => self.logout(),
        }
        self.drain()
    }

    /// Apply an I/O completion. Answers to superseded tickets are dropped.
    pub fn complete(&mut self, completion: Completion) -> Vec<Ticket> {
        let Completion { ticket, outcome } = completion;
        if !self.tickets.is_current(&ticket) {
            debug!(
                "discarding stale answer to ticket #{} ({:?})",
                ticket.id,
                ticket.request.slot()
            );
            return self.drain();
        }
        self.tickets.invalidate(ticket.request.slot());
        match ticket.request {
            Request::ListDatabases => self.apply_databases(outcome.and_then(expect_databases)),
            Request::ListCollections { .. } => {
                self.apply_collections(outcome.and_then(expect_collections))
            }
            Request::FetchDocs(_) => self.apply_docs(outcome.and_then(expect_docs)),
            Request::Execute(action) => self.apply_execution(action, outcome.map(|_| ())),
            Request::Login { .. } => self.apply_login(outcome.map(|_| ())),
            Request::Logout => self.apply_logout(outcome.map(|_| ())),
        }
        self.drain()
    }

    pub(crate) fn issue(&mut self, request: Request) {
        let ticket = self.tickets.issue(request);
        self.outbox.push(ticket);
    }

    fn drain(&mut self) -> Vec<Ticket> {
        std::mem::take(&mut self.outbox)
    }

    pub(crate) fn update_badges(&mut self) {
        self.view.active_database = self
            .state
            .selected_database()
            .unwrap_or(EMPTY_MARK)
            .to_string();
        self.view.active_collection = self
            .state
            .selected_collection()
            .unwrap_or(EMPTY_MARK)
            .to_string();
    }

    pub(crate) fn sync_confirm_view(&mut self) {
        self.view.confirm = self.confirm.prompt();
    }

    /// Back to the state the console had at startup; outstanding answers are
    /// made stale. The session itself is left to the caller.
    pub(crate) fn reset_browse(&mut self) {
        self.state = BrowseState::new(self.default_database.clone(), self.default_limit);
        self.confirm.cancel();
        self.tickets.invalidate_all();
        let login = std::mem::take(&mut self.view.login);
        self.view = View {
            login,
            ..View::default()
        };
        self.update_badges();
    }
}

fn expect_databases(reply: Reply) -> Result<Vec<String>, ConsoleError> {
    match reply {
        Reply::Databases(names) => Ok(names),
        other => Err(unexpected(other)),
    }
}

fn expect_collections(reply: Reply) -> Result<Vec<String>, ConsoleError> {
    match reply {
        Reply::Collections(names) => Ok(names),
        other => Err(unexpected(other)),
    }
}

fn expect_docs(reply: Reply) -> Result<crate::model::DocsPage, ConsoleError> {
    match reply {
        Reply::Docs(page) => Ok(page),
        other => Err(unexpected(other)),
    }
}

fn unexpected(reply: Reply) -> ConsoleError {
    ConsoleError::Decode(format!("unexpected reply {:?}", reply))
}
