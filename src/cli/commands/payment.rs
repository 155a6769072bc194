use rentbook_core::{PaymentQuery, PaymentService};
use rentbook_domain::{Payment, PaymentMethod};

use crate::cli::core::{
    parse_amount, parse_date, require_arg, short_id, CommandError, CommandResult, ShellContext,
};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const USAGE: &str =
    "payment <add <property> <amount> <date> [fee] [method]|list <property> [page]|remove <id>>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "payment",
        "Record and browse received payments",
        USAGE,
        cmd_payment,
    )]
}

fn cmd_payment(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(format!("usage: {USAGE}")));
    };
    match action.to_lowercase().as_str() {
        "add" => handle_add(context, rest),
        "list" => handle_list(context, rest),
        "remove" => handle_remove(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown payment subcommand `{other}`. Available: add, list, remove"
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let property_id = context.resolve_property(require_arg(args, 0, USAGE)?)?;
    let amount = parse_amount(require_arg(args, 1, USAGE)?)?;
    let paid_on = parse_date(require_arg(args, 2, USAGE)?)?;
    let mut payment = Payment::new(property_id, paid_on, amount);
    if let Some(fee) = args.get(3).filter(|fee| !fee.is_empty() && **fee != "-") {
        payment = payment.for_fee(context.resolve_fee(fee)?);
    }
    if let Some(raw) = args.get(4) {
        payment.method = PaymentMethod::parse(raw).ok_or_else(|| {
            CommandError::InvalidArguments(format!(
                "unknown payment method `{raw}` (cash, bank, card, cheque, other)"
            ))
        })?;
    }
    let portfolio = context.portfolio()?;
    if let Some(rental) = portfolio
        .rentals_for(property_id)
        .find(|rental| rental.is_active_on(paid_on))
    {
        payment = payment.for_rental(rental.id);
    }

    PaymentService::add(context.portfolio_mut()?, payment)?;
    output::success(format!(
        "Payment recorded: {} on {}",
        context.formatters.amount(amount),
        context.formatters.date(paid_on)
    ));
    Ok(())
}

fn handle_list(context: &ShellContext, args: &[&str]) -> CommandResult {
    let property_id = context.resolve_property(require_arg(args, 0, USAGE)?)?;
    let page = match args.get(1) {
        Some(raw) => raw.parse::<usize>().map_err(|_| {
            CommandError::InvalidArguments(format!("invalid page number `{raw}`"))
        })?,
        None => 1,
    };
    let query = PaymentQuery {
        page,
        per_page: context.config_read().payments_per_page,
        ..PaymentQuery::for_property(property_id)
    };
    let portfolio = context.portfolio()?;
    let result = PaymentService::query(portfolio, &query)?;
    if result.total == 0 {
        output::info("No payments recorded for this property.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = result
        .items
        .iter()
        .map(|payment| {
            vec![
                short_id(payment.id),
                context.formatters.date(payment.paid_on),
                context.formatters.amount(payment.amount),
                payment
                    .fee_template_id
                    .and_then(|id| portfolio.fee_template(id))
                    .map(|fee| fee.name.clone())
                    .unwrap_or_else(|| "-".into()),
                payment.method.to_string(),
            ]
        })
        .collect();
    output::print_table(&["ID", "Date", "Amount", "Fee", "Method"], &rows);
    output::info(format!(
        "Page {} of {} ({} payments)",
        result.page,
        result.total_pages.max(1),
        result.total
    ));
    if result.has_next() {
        output::hint(format!(
            "Use `payment list \"{}\" {}` for the next page.",
            args[0],
            result.page + 1
        ));
    }
    Ok(())
}

fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let needle = require_arg(args, 0, USAGE)?.to_lowercase();
    let id = context
        .portfolio()?
        .payments
        .iter()
        .find(|payment| {
            payment.id.to_string() == needle || payment.id.simple().to_string().starts_with(&needle)
        })
        .map(|payment| payment.id)
        .ok_or_else(|| CommandError::InvalidArguments(format!("No payment matches `{needle}`.")))?;
    let removed = PaymentService::remove(context.portfolio_mut()?, id)?;
    output::success(format!(
        "Payment removed: {} on {}",
        context.formatters.amount(removed.amount),
        context.formatters.date(removed.paid_on)
    ));
    Ok(())
}
