use crate::error::{ConsoleError, Result, CONFIRMATION_MISMATCH_MESSAGE};
use crate::logic::console::Console;
use crate::logic::effects::{Request, Slot};
use crate::model::{ConfirmPrompt, DestructiveAction};
use log::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmState {
    Idle,
    Armed,
    Executing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingAction {
    pub message: String,
    pub confirm_token: Option<String>,
    pub action: DestructiveAction,
}

/// Single-slot gate in front of destructive actions.
///
/// At most one action is pending. Arming again replaces it, whatever the
/// current state; the replaced action is gone for good.
#[derive(Debug, Clone)]
pub struct ConfirmationWorkflow {
    state: ConfirmState,
    pending: Option<PendingAction>,
    error: Option<String>,
}

impl Default for ConfirmationWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfirmationWorkflow {
    pub fn new() -> Self {
        Self {
            state: ConfirmState::Idle,
            pending: None,
            error: None,
        }
    }

    pub fn state(&self) -> ConfirmState {
        self.state
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn arm(
        &mut self,
        message: impl Into<String>,
        confirm_token: Option<String>,
        action: DestructiveAction,
    ) {
        if let Some(previous) = &self.pending {
            debug!("discarding pending {}", previous.action.describe());
        }
        self.pending = Some(PendingAction {
            message: message.into(),
            confirm_token,
            action,
        });
        self.state = ConfirmState::Armed;
        self.error = None;
    }

    /// Check the typed text and hand out the action to run.
    ///
    /// Returns `Ok(None)` when nothing is armed (idle, or already executing).
    pub fn confirm(&mut self, typed: &str) -> Result<Option<DestructiveAction>> {
        if self.state != ConfirmState::Armed {
            return Ok(None);
        }
        let Some(pending) = &self.pending else {
            self.state = ConfirmState::Idle;
            return Ok(None);
        };
        if let Some(token) = &pending.confirm_token {
            if typed != token.as_str() {
                self.error = Some(CONFIRMATION_MISMATCH_MESSAGE.to_string());
                return Err(ConsoleError::ConfirmationMismatch);
            }
        }
        self.state = ConfirmState::Executing;
        self.error = None;
        Ok(Some(pending.action.clone()))
    }

    /// The executing action finished; returns it so the caller can refresh.
    pub fn succeed(&mut self) -> Option<DestructiveAction> {
        self.state = ConfirmState::Idle;
        self.error = None;
        self.pending.take().map(|p| p.action)
    }

    /// The executing action failed; back to armed with the error shown.
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.pending.is_some() {
            self.state = ConfirmState::Armed;
            self.error = Some(message.into());
        }
    }

    /// Back to armed without a message (the session gate has taken over).
    pub fn interrupt(&mut self) {
        if self.pending.is_some() {
            self.state = ConfirmState::Armed;
            self.error = None;
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
        self.error = None;
        self.state = ConfirmState::Idle;
    }

    pub fn prompt(&self) -> Option<ConfirmPrompt> {
        let pending = self.pending.as_ref()?;
        Some(ConfirmPrompt {
            message: pending.message.clone(),
            token_required: pending.confirm_token.is_some(),
            error: self.error.clone(),
            busy: self.state == ConfirmState::Executing,
        })
    }
}

impl Console {
    pub(crate) fn arm(&mut self, action: DestructiveAction) {
        // Whatever was executing before no longer owns the prompt.
        self.tickets.invalidate(Slot::Confirmation);
        let token = action.confirm_token().map(str::to_string);
        self.confirm.arm(action.prompt_message(), token, action);
        self.sync_confirm_view();
    }

    pub(crate) fn confirm_deletion(&mut self, typed: &str) {
        match self.confirm.confirm(typed) {
            Ok(Some(action)) => {
                info!("executing delete of {}", action.describe());
                self.issue(Request::Execute(action));
            }
            Ok(None) => debug!("nothing armed to confirm"),
            Err(err) => debug!("confirmation rejected: {}", err),
        }
        self.sync_confirm_view();
    }

    pub(crate) fn cancel_deletion(&mut self) {
        self.tickets.invalidate(Slot::Confirmation);
        self.confirm.cancel();
        self.sync_confirm_view();
    }

    pub(crate) fn apply_execution(&mut self, action: DestructiveAction, outcome: Result<()>) {
        match outcome {
            Ok(()) => {
                info!("deleted {}", action.describe());
                self.confirm.succeed();
                self.sync_confirm_view();
                match &action {
                    DestructiveAction::DeleteDocument { .. } => self.load_documents_page(),
                    DestructiveAction::DeleteCollection { db, collection } => {
                        self.after_collection_deleted(db, collection)
                    }
                    DestructiveAction::DeleteDatabase { db } => self.after_database_deleted(db),
                }
            }
            Err(err) if err.is_unauthorized() => {
                self.confirm.interrupt();
                self.sync_confirm_view();
                self.on_unauthorized();
            }
            Err(err) => {
                warn!("delete of {} failed: {}", action.describe(), err);
                self.confirm.fail(err.to_string());
                self.sync_confirm_view();
            }
        }
    }
}
