use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Delay between two renders of the host table
    #[serde(default = "default_ui_refresh_ms")]
    pub ui_refresh_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ui_refresh_ms: default_ui_refresh_ms(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_ui_refresh_ms() -> u64 {
    1000
}
