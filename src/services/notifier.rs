//! Failure notice for a panel

/// Holds at most one failure message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notifier {
    message: Option<String>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a message, replacing whatever was there
    pub fn notify(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn dismiss(&mut self) {
        self.message = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.message.is_some()
    }
}
