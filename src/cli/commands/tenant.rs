use rentbook_core::TenantService;
use rentbook_domain::Tenant;

use crate::cli::core::{require_arg, short_id, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const USAGE: &str = "tenant <add <name> [email] [phone]|list|remove <name>>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new("tenant", "Manage tenants", USAGE, cmd_tenant)]
}

fn cmd_tenant(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(format!("usage: {USAGE}")));
    };
    match action.to_lowercase().as_str() {
        "add" => {
            let mut tenant = Tenant::new(require_arg(rest, 0, USAGE)?);
            tenant.email = rest.get(1).map(|value| value.to_string());
            tenant.phone = rest.get(2).map(|value| value.to_string());
            let name = tenant.name.clone();
            TenantService::add(context.portfolio_mut()?, tenant)?;
            output::success(format!("Tenant added: {name}"));
            Ok(())
        }
        "list" => {
            let today = context.today();
            let portfolio = context.portfolio()?;
            if portfolio.tenants.is_empty() {
                output::info("No tenants in this portfolio.");
                return Ok(());
            }
            let rows: Vec<Vec<String>> = portfolio
                .tenants
                .iter()
                .map(|tenant| {
                    let renting = portfolio
                        .rentals
                        .iter()
                        .filter(|rental| rental.tenant_id == tenant.id && rental.is_active_on(today))
                        .filter_map(|rental| portfolio.property(rental.property_id))
                        .map(|property| property.name.clone())
                        .collect::<Vec<_>>()
                        .join(", ");
                    vec![
                        short_id(tenant.id),
                        tenant.name.clone(),
                        tenant.email.clone().unwrap_or_default(),
                        renting,
                    ]
                })
                .collect();
            output::print_table(&["ID", "Name", "Email", "Renting"], &rows);
            Ok(())
        }
        "remove" => {
            let id = context.resolve_tenant(require_arg(rest, 0, USAGE)?)?;
            let removed = TenantService::remove(context.portfolio_mut()?, id)?;
            output::success(format!("Tenant removed: {}", removed.name));
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown tenant subcommand `{other}`. Available: add, list, remove"
        ))),
    }
}
