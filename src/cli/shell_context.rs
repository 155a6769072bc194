//! Shared runtime state for CLI interactions and command execution.

use std::{
    path::PathBuf,
    sync::{Arc, RwLock},
};

use rentbook_config::{Config, ConfigManager};
use rentbook_core::Clock;
use rentbook_domain::Portfolio;

use super::{formatters::CliFormatters, registry::CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub portfolio: Option<Portfolio>,
    /// File the open portfolio was loaded from or last saved to.
    pub portfolio_path: Option<PathBuf>,
    pub clock: Arc<dyn Clock>,
    pub formatters: CliFormatters,
    pub config_manager: ConfigManager,
    pub config: Arc<RwLock<Config>>,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn prompt(&self) -> String {
        match &self.portfolio {
            Some(portfolio) => format!("rentbook({})> ", portfolio.name),
            None => "rentbook> ".to_string(),
        }
    }
}
