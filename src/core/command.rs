//! Command parser for the : command system

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Navigation commands
    Dashboard,
    History,
    Alerts,
    Reports,
    Inspection(i64),
    Back,

    // Table filter commands
    Filter(Option<String>),
    Status(Option<String>),
    Clear,

    // Data commands
    Refresh,
    Export(Option<String>),

    // Sidebar
    Collapse,

    Quit,

    // Unknown command
    Unknown(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().map(|s| s.trim().to_string());

    match cmd.to_lowercase().as_str() {
        // Navigation
        "dashboard" | "dash" | "home" => Command::Dashboard,
        "history" | "hist" | "log" => Command::History,
        "alerts" | "alert" => Command::Alerts,
        "reports" | "report" => Command::Reports,
        "inspection" | "insp" => match args.and_then(|a| a.parse::<i64>().ok()) {
            Some(id) => Command::Inspection(id),
            None => Command::Unknown(input.to_string()),
        },
        "back" => Command::Back,

        // Filtering
        "filter" | "search" | "plate" => Command::Filter(args),
        "status" => Command::Status(args),
        "clear" => Command::Clear,

        // Data
        "refresh" | "reload" => Command::Refresh,
        "export" | "exp" => Command::Export(args),

        // Sidebar
        "collapse" | "sidebar" => Command::Collapse,

        "quit" | "q" | "exit" => Command::Quit,

        _ => Command::Unknown(input.to_string()),
    }
}
