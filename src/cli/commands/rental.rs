use rentbook_core::RentalService;
use rentbook_domain::Rental;

use crate::cli::core::{
    parse_amount, parse_date, require_arg, short_id, CommandError, CommandResult, ShellContext,
};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const USAGE: &str = "rental <add <property> <tenant> <start> <rent> [end] [deposit]|end <property> <date>|list>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "rental",
        "Start, end and list rental agreements",
        USAGE,
        cmd_rental,
    )]
}

fn cmd_rental(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(format!("usage: {USAGE}")));
    };
    match action.to_lowercase().as_str() {
        "add" => handle_add(context, rest),
        "end" => handle_end(context, rest),
        "list" => handle_list(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown rental subcommand `{other}`. Available: add, end, list"
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let property_id = context.resolve_property(require_arg(args, 0, USAGE)?)?;
    let tenant_id = context.resolve_tenant(require_arg(args, 1, USAGE)?)?;
    let start = parse_date(require_arg(args, 2, USAGE)?)?;
    let rent = parse_amount(require_arg(args, 3, USAGE)?)?;
    let mut rental = Rental::new(property_id, tenant_id, start, rent);
    if let Some(end) = args.get(4) {
        rental = rental.with_end_date(parse_date(end)?);
    }
    if let Some(deposit) = args.get(5) {
        rental.deposit = parse_amount(deposit)?;
    }
    RentalService::add(context.portfolio_mut()?, rental)?;
    output::success(format!(
        "Rental started on {} at {} per month.",
        context.formatters.date(start),
        context.formatters.amount(rent)
    ));
    Ok(())
}

fn handle_end(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let property_id = context.resolve_property(require_arg(args, 0, USAGE)?)?;
    let end = parse_date(require_arg(args, 1, USAGE)?)?;
    let rental_id = context
        .portfolio()?
        .rentals_for(property_id)
        .find(|rental| rental.is_active_on(end))
        .map(|rental| rental.id)
        .ok_or_else(|| {
            CommandError::InvalidArguments("No rental of that property runs on that date.".into())
        })?;
    RentalService::end(context.portfolio_mut()?, rental_id, end)?;
    output::success(format!("Rental ends on {}.", context.formatters.date(end)));
    Ok(())
}

fn handle_list(context: &ShellContext) -> CommandResult {
    let portfolio = context.portfolio()?;
    if portfolio.rentals.is_empty() {
        output::info("No rentals in this portfolio.");
        return Ok(());
    }
    let mut rentals: Vec<&Rental> = portfolio.rentals.iter().collect();
    rentals.sort_by_key(|rental| rental.start_date);
    let rows: Vec<Vec<String>> = rentals
        .into_iter()
        .map(|rental| {
            vec![
                short_id(rental.id),
                portfolio
                    .property(rental.property_id)
                    .map(|property| property.name.clone())
                    .unwrap_or_default(),
                portfolio
                    .tenant(rental.tenant_id)
                    .map(|tenant| tenant.name.clone())
                    .unwrap_or_default(),
                context.formatters.date(rental.start_date),
                rental
                    .end_date
                    .map(|end| context.formatters.date(end))
                    .unwrap_or_else(|| "open".into()),
                context.formatters.amount(rental.monthly_rent),
            ]
        })
        .collect();
    output::print_table(&["ID", "Property", "Tenant", "Start", "End", "Rent"], &rows);
    Ok(())
}
