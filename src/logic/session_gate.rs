//! Session gate: login prompt visibility and re-entry into the browse flow.

use crate::error::{Result, INVALID_PASSWORD_MESSAGE};
use crate::logic::console::Console;
use crate::logic::effects::Request;
use log::{debug, info, warn};

impl Console {
    /// Any call answered 401. Showing an already visible prompt does nothing.
    pub(crate) fn on_unauthorized(&mut self) {
        self.session.authenticated = false;
        if self.session.prompt_visible {
            return;
        }
        info!("session not authenticated, showing login prompt");
        self.session.prompt_visible = true;
        self.session.error = None;
        self.sync_login_view();
    }

    pub(crate) fn login(&mut self, password: String) {
        self.issue(Request::Login { password });
    }

    pub(crate) fn apply_login(&mut self, outcome: Result<()>) {
        match outcome {
            Ok(()) => {
                info!("logged in");
                self.session.authenticated = true;
                self.session.prompt_visible = false;
                self.session.error = None;
                self.sync_login_view();
                self.reset_browse();
                self.load_databases();
            }
            Err(err) => {
                debug!("login rejected: {}", err);
                self.session.authenticated = false;
                self.session.prompt_visible = true;
                self.session.error = Some(INVALID_PASSWORD_MESSAGE.to_string());
                self.sync_login_view();
            }
        }
    }

    pub(crate) fn logout(&mut self) {
        self.issue(Request::Logout);
    }

    /// The browse flow restarts from scratch whether or not the server agreed.
    pub(crate) fn apply_logout(&mut self, outcome: Result<()>) {
        if let Err(err) = outcome {
            warn!("logout request failed: {}", err);
        }
        self.session.authenticated = false;
        self.reset_browse();
        self.load_databases();
    }

    fn sync_login_view(&mut self) {
        self.view.login.visible = self.session.prompt_visible;
        self.view.login.error = self.session.error.clone();
    }
}
