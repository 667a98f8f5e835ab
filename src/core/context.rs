//! Shared context passed to modules

/// Currently selected item in the UI
#[derive(Debug, Clone, Default)]
pub enum Selected {
    #[default]
    None,
    Inspection(i64),
    Alert(i64),
}

/// Shared context available to all modules
#[derive(Debug, Default)]
pub struct Context {
    /// Currently selected item
    pub selected: Selected,

    /// Clipboard content for copy/paste between tools
    pub clipboard: Option<String>,

    /// Display path of the backing database
    pub db_path: String,

    /// Number of alerts still pending
    pub pending_alerts: u64,

    /// Whether a refresh is in flight
    pub refreshing: bool,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set clipboard content
    pub fn set_clipboard(&mut self, content: String) {
        self.clipboard = Some(content);
    }

    /// Get clipboard content
    pub fn get_clipboard(&self) -> Option<&str> {
        self.clipboard.as_deref()
    }
}
