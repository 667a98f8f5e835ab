//! Actions that modules can return to communicate with the app

/// Actions returned by modules to communicate state changes
#[derive(Debug, Clone)]
pub enum Action {
    /// No action needed
    None,

    /// Navigate to a specific view
    Navigate(NavigateTarget),

    /// Copy text to clipboard context
    Copy(String),

    /// Show notification in status bar
    Notify(String, NotifyLevel),

    /// Close current overlay/popup
    CloseOverlay,

    /// Request quit
    Quit,
}

/// Navigation targets
#[derive(Debug, Clone)]
pub enum NavigateTarget {
    /// Go back to previous view
    Back,
    /// Go to the dashboard section
    Dashboard,
    /// Go to the full inspection history
    History,
    /// Go to the alert list
    Alerts,
    /// Go to the reports/export section
    Reports,
    /// Open detail for a specific inspection
    Inspection(i64),
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warn,
    Error,
}
