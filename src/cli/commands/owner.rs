use rentbook_core::OwnerService;
use rentbook_domain::Owner;

use crate::cli::core::{require_arg, short_id, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const USAGE: &str = "owner <add <name> [email] [phone]|list|remove <name>>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new("owner", "Manage property owners", USAGE, cmd_owner)]
}

fn cmd_owner(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(format!("usage: {USAGE}")));
    };
    match action.to_lowercase().as_str() {
        "add" => {
            let mut owner = Owner::new(require_arg(rest, 0, USAGE)?);
            owner.email = rest.get(1).map(|value| value.to_string());
            owner.phone = rest.get(2).map(|value| value.to_string());
            let name = owner.name.clone();
            OwnerService::add(context.portfolio_mut()?, owner)?;
            output::success(format!("Owner added: {name}"));
            Ok(())
        }
        "list" => {
            let portfolio = context.portfolio()?;
            if portfolio.owners.is_empty() {
                output::info("No owners in this portfolio.");
                return Ok(());
            }
            let rows: Vec<Vec<String>> = portfolio
                .owners
                .iter()
                .map(|owner| {
                    let properties = portfolio
                        .properties
                        .iter()
                        .filter(|property| property.owner_id == owner.id)
                        .count();
                    vec![
                        short_id(owner.id),
                        owner.name.clone(),
                        owner.email.clone().unwrap_or_default(),
                        properties.to_string(),
                    ]
                })
                .collect();
            output::print_table(&["ID", "Name", "Email", "Properties"], &rows);
            Ok(())
        }
        "remove" => {
            let id = context.resolve_owner(require_arg(rest, 0, USAGE)?)?;
            let removed = OwnerService::remove(context.portfolio_mut()?, id)?;
            output::success(format!("Owner removed: {}", removed.name));
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown owner subcommand `{other}`. Available: add, list, remove"
        ))),
    }
}
