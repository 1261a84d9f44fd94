/// Authentication state as inferred from server responses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub authenticated: bool,
    pub prompt_visible: bool,
    /// Shown under the password field after a failed login.
    pub error: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }
}
