use rentbook_core::{CoreError, FeeService, FrequencyRule};
use rentbook_domain::FeeTemplate;

use crate::cli::core::{parse_amount, require_arg, short_id, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const USAGE: &str =
    "fee <add <property> <name> <amount> <frequency> [value]|list <property>|toggle <fee>|remove <fee>>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "fee",
        "Manage recurring fee templates (monthly, quarterly, biannual, annual, specific_month)",
        USAGE,
        cmd_fee,
    )]
}

fn cmd_fee(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(format!("usage: {USAGE}")));
    };
    match action.to_lowercase().as_str() {
        "add" => handle_add(context, rest),
        "list" => handle_list(context, rest),
        "toggle" => handle_toggle(context, rest),
        "remove" => {
            let id = context.resolve_fee(require_arg(rest, 0, USAGE)?)?;
            let removed = FeeService::remove(context.portfolio_mut()?, id)?;
            output::success(format!("Fee removed: {}", removed.name));
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown fee subcommand `{other}`. Available: add, list, toggle, remove"
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let property_id = context.resolve_property(require_arg(args, 0, USAGE)?)?;
    let name = require_arg(args, 1, USAGE)?;
    let amount = parse_amount(require_arg(args, 2, USAGE)?)?;
    let value = match args.get(4) {
        Some(raw) => Some(raw.parse::<i32>().map_err(|_| {
            CommandError::InvalidArguments(format!("frequency value `{raw}` is not a number"))
        })?),
        None => None,
    };
    let rule = FrequencyRule::parse(require_arg(args, 3, USAGE)?, value).map_err(CoreError::from)?;

    let template = FeeTemplate::new(property_id, name, amount, rule.kind(), value);
    FeeService::add(context.portfolio_mut()?, template)?;
    output::success(format!(
        "Fee added: {name} {} ({rule})",
        context.formatters.amount(amount)
    ));
    Ok(())
}

fn handle_list(context: &ShellContext, args: &[&str]) -> CommandResult {
    let property_id = context.resolve_property(require_arg(args, 0, USAGE)?)?;
    let portfolio = context.portfolio()?;
    let rows: Vec<Vec<String>> = portfolio
        .fee_templates_for(property_id)
        .map(|fee| {
            let schedule = FrequencyRule::of(fee)
                .map(|rule| rule.to_string())
                .unwrap_or_else(|err| format!("invalid: {err}"));
            vec![
                short_id(fee.id),
                fee.name.clone(),
                context.formatters.amount(fee.amount),
                schedule,
                if fee.is_active { "active" } else { "inactive" }.to_string(),
            ]
        })
        .collect();
    if rows.is_empty() {
        output::info("No fees for this property.");
        return Ok(());
    }
    output::print_table(&["ID", "Name", "Amount", "Schedule", "Status"], &rows);
    Ok(())
}

fn handle_toggle(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = context.resolve_fee(require_arg(args, 0, USAGE)?)?;
    let (name, active) = context
        .portfolio()?
        .fee_template(id)
        .map(|fee| (fee.name.clone(), fee.is_active))
        .ok_or(CoreError::FeeTemplateNotFound(id))?;
    FeeService::set_active(context.portfolio_mut()?, id, !active)?;
    let state = if active { "deactivated" } else { "activated" };
    output::success(format!("Fee {state}: {name}"));
    Ok(())
}
