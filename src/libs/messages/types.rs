#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigRemoved,
    PromptServerPort,
    PromptDatabaseFile,

    // === SERVER MESSAGES ===
    ServerListening(String), // address
    DefaultProjectCreated,
    DefaultProjectExists,
}
