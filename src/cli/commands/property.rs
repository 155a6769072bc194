use chrono::Datelike;

use rentbook_core::{CoreError, DueService, FeeService, PropertyService, RentalService};
use rentbook_domain::{Displayable, Property, PropertyKind};

use crate::cli::core::{require_arg, short_id, CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const USAGE: &str =
    "property <add <owner> <name> [kind] [address]|list|show <property>|remove <property>>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "property",
        "Manage properties (add, list, show, remove)",
        USAGE,
        cmd_property,
    )]
}

fn cmd_property(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(format!("usage: {USAGE}")));
    };
    match action.to_lowercase().as_str() {
        "add" => handle_add(context, rest),
        "list" => handle_list(context),
        "show" => handle_show(context, rest),
        "remove" => handle_remove(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown property subcommand `{other}`. Available: add, list, show, remove"
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let owner_id = context.resolve_owner(require_arg(args, 0, USAGE)?)?;
    let name = require_arg(args, 1, USAGE)?;
    let kind = match args.get(2) {
        Some(raw) => PropertyKind::parse(raw).ok_or_else(|| {
            CommandError::InvalidArguments(format!(
                "unknown property kind `{raw}` (apartment, house, commercial, land, other)"
            ))
        })?,
        None => PropertyKind::default(),
    };
    let mut property = Property::new(owner_id, name, kind);
    if let Some(address) = args.get(3) {
        property = property.with_address(*address);
    }
    PropertyService::add(context.portfolio_mut()?, property)?;
    output::success(format!("Property added: {name} ({kind})"));
    Ok(())
}

fn handle_list(context: &ShellContext) -> CommandResult {
    let today = context.today();
    let portfolio = context.portfolio()?;
    if portfolio.properties.is_empty() {
        output::info("No properties in this portfolio.");
        return Ok(());
    }
    let occupied: Vec<_> = RentalService::active_on(portfolio, today)
        .into_iter()
        .map(|rental| rental.property_id)
        .collect();
    let rows: Vec<Vec<String>> = portfolio
        .properties
        .iter()
        .map(|property| {
            let owner = portfolio
                .owner(property.owner_id)
                .map(|owner| owner.name.clone())
                .unwrap_or_default();
            let status = if occupied.contains(&property.id) {
                "let"
            } else {
                "vacant"
            };
            vec![
                short_id(property.id),
                property.name.clone(),
                property.kind.to_string(),
                owner,
                status.to_string(),
            ]
        })
        .collect();
    output::print_table(&["ID", "Name", "Kind", "Owner", "Status"], &rows);
    Ok(())
}

fn handle_show(context: &ShellContext, args: &[&str]) -> CommandResult {
    let id = context.resolve_property(require_arg(args, 0, USAGE)?)?;
    let today = context.today();
    let portfolio = context.portfolio()?;
    let property = portfolio
        .property(id)
        .ok_or(CoreError::PropertyNotFound(id))?;

    output::section(&property.name);
    let owner = portfolio
        .owner(property.owner_id)
        .map(|owner| owner.name.clone())
        .unwrap_or_default();
    let tenant = portfolio
        .rentals_for(id)
        .find(|rental| rental.is_active_on(today))
        .and_then(|rental| portfolio.tenant(rental.tenant_id))
        .map(|tenant| tenant.name.clone())
        .unwrap_or_else(|| "(vacant)".into());
    let required = DueService::required_this_month(portfolio, id, today.year(), today.month())?;
    output::print_two_column(&[
        ("Kind", property.kind.to_string()),
        ("Owner", owner),
        ("Address", property.address.clone()),
        ("Tenant", tenant),
        ("Due this month", context.formatters.amount(required)),
    ]);

    let fees = FeeService::active_for_property(portfolio, id);
    if !fees.is_empty() {
        output::section("Active fees");
        for fee in fees {
            output::info(fee.display_label());
        }
    }
    Ok(())
}

fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = context.resolve_property(require_arg(args, 0, USAGE)?)?;
    if context.mode == CliMode::Interactive {
        let name = context
            .portfolio()?
            .property(id)
            .map(|property| property.name.clone())
            .unwrap_or_default();
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Remove `{name}` with its fees, payments and history?"))
            .default(false)
            .interact()?;
        if !confirmed {
            output::info("Operation cancelled.");
            return Ok(());
        }
    }
    let clock = context.clock.clone();
    let removed = PropertyService::remove(context.portfolio_mut()?, id, clock.as_ref())?;
    output::success(format!("Property removed: {}", removed.name));
    Ok(())
}
