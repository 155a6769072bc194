//! Core CLI dispatch, error types, and shell context helpers.

use std::{
    io,
    path::PathBuf,
    str::FromStr,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use strsim::levenshtein;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use rentbook_config::{resolve_home, Config, ConfigError, ConfigManager};
use rentbook_core::{Clock, CoreError};
use rentbook_domain::Portfolio;

use crate::errors::PersistenceError;
use crate::utils::persistence;

use super::commands;
use super::formatters::CliFormatters;
use super::output;
use super::registry::CommandRegistry;
pub use super::shell_context::{CliMode, ShellContext};
use super::system_clock::SystemClock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Recoverable failure of a single command; the shell reports it and keeps going.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("No portfolio loaded. Use `new <name>` or `open <path>` first.")]
    PortfolioNotLoaded,
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Fatal shell failure that ends the session.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("terminal error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::at_home(&resolve_home())?;
        Self::with_parts(mode, config_manager, Arc::new(SystemClock))
    }

    pub fn with_parts(
        mode: CliMode,
        config_manager: ConfigManager,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config = config_manager.load()?;
        output::set_color_enabled(mode == CliMode::Interactive && config.ui_color_enabled);
        let config = Arc::new(RwLock::new(config));

        let mut app = ShellContext {
            mode,
            registry,
            portfolio: None,
            portfolio_path: None,
            clock,
            formatters: CliFormatters::new(config.clone()),
            config_manager,
            config,
            last_command: None,
            running: true,
        };
        app.auto_load_last();
        Ok(app)
    }

    fn auto_load_last(&mut self) {
        if self.mode != CliMode::Interactive {
            return;
        }
        let Some(path) = self.config_read().last_opened_portfolio.clone() else {
            return;
        };
        match persistence::load_portfolio_from_file(&path) {
            Ok(portfolio) => {
                output::success(format!(
                    "Automatically opened last portfolio `{}`.",
                    portfolio.name
                ));
                self.portfolio = Some(portfolio);
                self.portfolio_path = Some(path);
            }
            Err(err) => warn!(path = %path.display(), "could not reopen last portfolio: {err}"),
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.handler(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        debug!(command, ?args, "dispatching command");
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        let lowered = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &lowered), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::info(format!("Did you mean `{name}`?"));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        dialoguer::Confirm::new()
            .with_prompt("Exit shell?")
            .default(true)
            .interact()
            .map_err(|err| CliError::Command(err.to_string()))
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::PortfolioNotLoaded => {
                output::error(CommandError::PortfolioNotLoaded);
                output::hint("Try `new \"My Rentals\"` to get started.");
            }
            other => output::error(other),
        }
    }

    pub(crate) fn config_read(&self) -> RwLockReadGuard<'_, Config> {
        self.config.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn config_write(&self) -> RwLockWriteGuard<'_, Config> {
        self.config.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        let config = self.config_read().clone();
        self.config_manager.save(&config)?;
        Ok(())
    }

    /// Remembers `path` as the portfolio to reopen next session.
    pub(crate) fn remember_portfolio(&mut self, path: PathBuf) -> CommandResult {
        self.config_write().last_opened_portfolio = Some(path.clone());
        self.portfolio_path = Some(path);
        self.persist_config()
    }

    pub(crate) fn portfolio(&self) -> Result<&Portfolio, CommandError> {
        self.portfolio.as_ref().ok_or(CommandError::PortfolioNotLoaded)
    }

    pub(crate) fn portfolio_mut(&mut self) -> Result<&mut Portfolio, CommandError> {
        self.portfolio.as_mut().ok_or(CommandError::PortfolioNotLoaded)
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub(crate) fn current_year(&self) -> i32 {
        self.today().year()
    }

    pub(crate) fn resolve_property(&self, needle: &str) -> Result<Uuid, CommandError> {
        self.portfolio()?
            .find_property(needle)
            .map(|property| property.id)
            .ok_or_else(|| not_found("property", needle))
    }

    pub(crate) fn resolve_fee(&self, needle: &str) -> Result<Uuid, CommandError> {
        self.portfolio()?
            .find_fee_template(needle)
            .map(|fee| fee.id)
            .ok_or_else(|| not_found("fee", needle))
    }

    pub(crate) fn resolve_owner(&self, needle: &str) -> Result<Uuid, CommandError> {
        let portfolio = self.portfolio()?;
        find_by_name(
            portfolio.owners.iter().map(|owner| (owner.id, owner.name.as_str())),
            needle,
        )
        .ok_or_else(|| not_found("owner", needle))
    }

    pub(crate) fn resolve_tenant(&self, needle: &str) -> Result<Uuid, CommandError> {
        let portfolio = self.portfolio()?;
        find_by_name(
            portfolio.tenants.iter().map(|tenant| (tenant.id, tenant.name.as_str())),
            needle,
        )
        .ok_or_else(|| not_found("tenant", needle))
    }
}

fn not_found(entity: &str, needle: &str) -> CommandError {
    CommandError::InvalidArguments(format!("No {entity} matches `{needle}`."))
}

fn find_by_name<'a>(
    mut candidates: impl Iterator<Item = (Uuid, &'a str)>,
    needle: &str,
) -> Option<Uuid> {
    if let Ok(id) = Uuid::parse_str(needle) {
        return candidates.find(|(candidate, _)| *candidate == id).map(|(id, _)| id);
    }
    let needle = needle.trim();
    candidates
        .find(|(_, name)| name.eq_ignore_ascii_case(needle))
        .map(|(id, _)| id)
}

pub(crate) fn require_arg<'a>(
    args: &[&'a str],
    index: usize,
    usage: &str,
) -> Result<&'a str, CommandError> {
    args.get(index)
        .copied()
        .ok_or_else(|| CommandError::InvalidArguments(format!("usage: {usage}")))
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("invalid date `{input}` (use YYYY-MM-DD)"))
    })
}

pub(crate) fn parse_amount(input: &str) -> Result<Decimal, CommandError> {
    Decimal::from_str(input.trim())
        .map_err(|_| CommandError::InvalidArguments(format!("invalid amount `{input}`")))
}

pub(crate) fn parse_year(input: Option<&str>, default: i32) -> Result<i32, CommandError> {
    match input {
        None => Ok(default),
        Some(raw) => raw
            .parse::<i32>()
            .ok()
            .filter(|year| (1900..=9999).contains(year))
            .ok_or_else(|| CommandError::InvalidArguments(format!("invalid year `{raw}`"))),
    }
}

pub(crate) fn parse_month(input: Option<&str>, default: u32) -> Result<u32, CommandError> {
    match input {
        None => Ok(default),
        Some(raw) => raw
            .parse::<u32>()
            .ok()
            .filter(|month| (1..=12).contains(month))
            .ok_or_else(|| CommandError::InvalidArguments(format!("invalid month `{raw}` (1-12)"))),
    }
}

pub(crate) fn short_id(id: Uuid) -> String {
    let mut short = id.simple().to_string();
    short.truncate(8);
    short
}

#[cfg(test)]
pub(crate) fn script_context(home: &std::path::Path, today: NaiveDate) -> ShellContext {
    let manager = ConfigManager::at_home(home).expect("config manager");
    ShellContext::with_parts(
        CliMode::Script,
        manager,
        Arc::new(rentbook_core::FixedClock::on(today)),
    )
    .expect("shell context")
}

#[cfg(test)]
impl ShellContext {
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = super::shell::parse_command_line(line)
            .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
        let Some((first, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        self.dispatch(&first.to_lowercase(), first, &args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn run(context: &mut ShellContext, lines: &[&str]) {
        for line in lines {
            context
                .process_line(line)
                .unwrap_or_else(|err| panic!("`{line}` failed: {err}"));
        }
    }

    #[test]
    fn commands_require_a_portfolio() {
        let home = tempdir().unwrap();
        let mut context = script_context(home.path(), date(2025, 3, 1));
        let err = context.process_line("owner add Ada").unwrap_err();
        assert!(matches!(err, CommandError::PortfolioNotLoaded));
    }

    #[test]
    fn builds_portfolio_through_commands() {
        let home = tempdir().unwrap();
        let mut context = script_context(home.path(), date(2025, 3, 1));
        run(
            &mut context,
            &[
                "new \"Harbour Holdings\"",
                "owner add \"Ada Moll\"",
                "property add \"Ada Moll\" \"Quay 4\" apartment",
                "tenant add \"Ben Roe\"",
                "rental add \"Quay 4\" \"Ben Roe\" 2025-01-01 950",
                "fee add \"Quay 4\" \"Service charge\" 450 quarterly 3",
                "fee add \"Quay 4\" Insurance 1200 annual",
                "payment add \"Quay 4\" 450 2025-01-10 \"Service charge\"",
            ],
        );

        let portfolio = context.portfolio().unwrap();
        assert_eq!(portfolio.properties.len(), 1);
        assert_eq!(portfolio.fee_templates.len(), 2);
        assert_eq!(portfolio.payments[0].amount, dec!(450));
        assert!(portfolio.payments[0].fee_template_id.is_some());
        assert_eq!(portfolio.rentals.len(), 1);
    }

    #[test]
    fn invalid_frequency_is_reported_not_fatal() {
        let home = tempdir().unwrap();
        let mut context = script_context(home.path(), date(2025, 3, 1));
        run(
            &mut context,
            &["new Test", "owner add Ada", "property add Ada Loft"],
        );
        let err = context
            .process_line("fee add Loft Sweep 80 specific_month 13")
            .unwrap_err();
        assert!(matches!(err, CommandError::Core(CoreError::Configuration(_))));
        let err = context.process_line("fee add Loft Sweep 80 fortnightly").unwrap_err();
        assert!(matches!(err, CommandError::Core(CoreError::Configuration(_))));
        assert!(context.portfolio().unwrap().fee_templates.is_empty());
    }

    #[test]
    fn exit_stops_the_loop() {
        let home = tempdir().unwrap();
        let mut context = script_context(home.path(), date(2025, 3, 1));
        assert_eq!(context.process_line("exit").unwrap(), LoopControl::Exit);
        assert_eq!(context.process_line("hlep").unwrap(), LoopControl::Continue);
    }

    #[test]
    fn config_set_persists() {
        let home = tempdir().unwrap();
        let mut context = script_context(home.path(), date(2025, 3, 1));
        run(&mut context, &["config set currency dkk"]);
        let stored = context.config_manager.load().unwrap();
        assert_eq!(stored.currency, "DKK");
    }
}
