use crate::diagnostics::{Level, Logger};

pub const DEFAULT_LOG_LEVEL: Level = Level::Info;

pub struct FrontendConfig {
    pub log_level: Level,
    pub logging_enabled: bool,
    pub dump_tree: bool,
    pub dump_scopes: bool,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            // set default values here, unless overridden via command-line
            log_level: DEFAULT_LOG_LEVEL,
            logging_enabled: true,
            dump_tree: false,
            dump_scopes: false,
        }
    }
}

impl FrontendConfig {
    /// The CLI reads diagnostics through `tracing`, so nothing is kept.
    pub fn logger(&self) -> Logger {
        Logger::streaming(self.logging_enabled, self.log_level)
    }
}
