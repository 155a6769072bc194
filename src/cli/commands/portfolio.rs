//! Creating, opening and saving portfolio files.

use std::path::PathBuf;

use rentbook_domain::Portfolio;

use crate::cli::core::{require_arg, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::utils::persistence;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("new", "Start an empty portfolio", "new <name>", cmd_new),
        CommandEntry::new("open", "Open a portfolio file", "open <path>", cmd_open),
        CommandEntry::new(
            "save",
            "Save the portfolio (to its current file unless a path is given)",
            "save [path]",
            cmd_save,
        ),
    ]
}

fn cmd_new(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = args.join(" ");
    if name.trim().is_empty() {
        return Err(CommandError::InvalidArguments("usage: new <name>".into()));
    }
    context.portfolio = Some(Portfolio::new(name.trim()));
    context.portfolio_path = None;
    output::success(format!("New portfolio created: {}", name.trim()));
    Ok(())
}

fn cmd_open(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = PathBuf::from(require_arg(args, 0, "open <path>")?);
    let portfolio = persistence::load_portfolio_from_file(&path)?;
    output::success(format!(
        "Opened portfolio `{}` ({} properties).",
        portfolio.name,
        portfolio.properties.len()
    ));
    context.portfolio = Some(portfolio);
    context.remember_portfolio(path)
}

fn cmd_save(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = match args.first() {
        Some(path) => PathBuf::from(path),
        None => match context.portfolio_path.clone() {
            Some(path) => path,
            None => {
                let data_root = context.config_read().resolve_data_root();
                let file_name = format!("{}.json", slug(&context.portfolio()?.name));
                data_root.join(file_name)
            }
        },
    };
    persistence::save_portfolio_to_file(context.portfolio()?, &path)?;
    output::success(format!("Saved portfolio to {}", path.display()));
    context.remember_portfolio(path)
}

fn slug(name: &str) -> String {
    let words: Vec<String> = name
        .split(|ch: char| !ch.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect();
    if words.is_empty() {
        "portfolio".to_string()
    } else {
        words.join("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_keeps_words_only() {
        assert_eq!(slug("Harbour Holdings / 2025"), "harbour-holdings-2025");
        assert_eq!(slug("***"), "portfolio");
    }
}
