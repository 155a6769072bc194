use std::io::{self, BufRead};

use rustyline::{error::ReadlineError, history::DefaultHistory, Editor};

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output;

/// Presence of this variable switches the shell to reading commands from stdin.
pub const SCRIPT_ENV_VAR: &str = "RENTBOOK_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV_VAR).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<(), DefaultHistory>::new()?;
    output::info("Rentbook shell. Type `help` to list commands.");

    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                match handle_line(context, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err),
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if !context.running {
            break;
        }
        let line = line?;
        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(format!("Could not parse `{}`: {err}", line.trim()));
            return Ok(LoopControl::Continue);
        }
    };
    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };
    if raw.starts_with('#') {
        return Ok(LoopControl::Continue);
    }

    let command = raw.to_lowercase();
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    context.last_command = Some(line.trim().to_string());

    let control = context.dispatch(&command, raw, &args)?;
    if control == LoopControl::Exit {
        context.running = false;
    }
    Ok(control)
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, shell_words::ParseError> {
    shell_words::split(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::core::script_context;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn quoted_arguments_stay_together() {
        let tokens = parse_command_line("fee add \"Quay 4\" 'Service charge' 450").unwrap();
        assert_eq!(tokens, vec!["fee", "add", "Quay 4", "Service charge", "450"]);
        assert!(parse_command_line("owner add \"unterminated").is_err());
    }

    #[test]
    fn unparsable_and_comment_lines_are_skipped() {
        let home = tempdir().unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let mut context = script_context(home.path(), today);
        for line in ["owner add \"unterminated", "# owner add Ada", "   "] {
            assert_eq!(handle_line(&mut context, line).unwrap(), LoopControl::Continue);
        }
        assert!(context.last_command.is_none());
        assert!(context.running);
    }
}
