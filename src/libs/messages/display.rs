//! Display implementation for worklog application messages.
//!
//! All user-facing message text is defined in one place so wording stays
//! consistent between the CLI and the server startup output.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigRemoved => "Configuration removed".to_string(),
            Message::PromptServerPort => "HTTP port to listen on".to_string(),
            Message::PromptDatabaseFile => "Database file name".to_string(),

            // === SERVER MESSAGES ===
            Message::ServerListening(addr) => format!("Worklog API listening on {}", addr),
            Message::DefaultProjectCreated => "Default project has been created on startup".to_string(),
            Message::DefaultProjectExists => "Default project already exists".to_string(),
        };
        write!(f, "{}", text)
    }
}
