//! Read-only reports over fee schedules: per-fee schedules, the property calendar,
//! what is due, expected versus received, and the property timeline.

use chrono::Datelike;
use rust_decimal::Decimal;

use rentbook_core::{
    build_schedule, month_name, summarize_year, CalendarService, CoreError, DueService,
    FrequencyRule, PaymentService, TimelineService,
};
use rentbook_domain::{DateWindow, EventKind, TimelineEvent};

use crate::cli::core::{
    parse_date, parse_month, parse_year, require_arg, CommandError, CommandResult, ShellContext,
};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const SCHEDULE_USAGE: &str = "schedule <fee> [year]";
const CALENDAR_USAGE: &str = "calendar <property> [year]";
const DUE_USAGE: &str = "due <property> [year] [month]";
const SUMMARY_USAGE: &str = "summary <property> [year]";
const TIMELINE_USAGE: &str = "timeline <property> | timeline add <property> <date> <title>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "schedule",
            "Show the months a fee falls due in and its yearly total",
            SCHEDULE_USAGE,
            cmd_schedule,
        ),
        CommandEntry::new(
            "calendar",
            "Show every fee of a property month by month",
            CALENDAR_USAGE,
            cmd_calendar,
        ),
        CommandEntry::new(
            "due",
            "List unpaid fees and the amount required for a month",
            DUE_USAGE,
            cmd_due,
        ),
        CommandEntry::new(
            "summary",
            "Compare expected charges with payments received over a year",
            SUMMARY_USAGE,
            cmd_summary,
        ),
        CommandEntry::new(
            "timeline",
            "Show or add events in a property's history",
            TIMELINE_USAGE,
            cmd_timeline,
        ),
    ]
}

fn cmd_schedule(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let fee_id = context.resolve_fee(require_arg(args, 0, SCHEDULE_USAGE)?)?;
    let year = parse_year(args.get(1).copied(), context.current_year())?;
    let portfolio = context.portfolio()?;
    let fee = portfolio
        .fee_template(fee_id)
        .ok_or(CoreError::FeeTemplateNotFound(fee_id))?;
    let rule = FrequencyRule::of(fee).map_err(CoreError::from)?;
    let schedule = build_schedule(fee, year).map_err(CoreError::from)?;
    let summary = summarize_year(&schedule);

    output::section(format!("{} - {year} ({rule})", fee.name));
    if !fee.is_active {
        output::warning("This fee is inactive and is left out of calendars and due lists.");
    }
    let rows: Vec<Vec<String>> = schedule
        .iter()
        .map(|entry| {
            vec![
                month_name(entry.month).to_string(),
                context.formatters.amount(entry.amount_due),
            ]
        })
        .collect();
    output::print_table(&["Month", "Amount due"], &rows);
    output::print_two_column(&[
        ("Total", context.formatters.amount(summary.total_amount)),
        ("Charges", summary.months_with_payments.to_string()),
        (
            "Average per charge",
            context.formatters.amount(summary.average_per_active_month),
        ),
    ]);
    Ok(())
}

fn cmd_calendar(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let property_id = context.resolve_property(require_arg(args, 0, CALENDAR_USAGE)?)?;
    let years: Vec<i32> = match args.get(1) {
        Some(raw) => vec![parse_year(Some(*raw), context.current_year())?],
        None => {
            let first = context.current_year();
            let span = i32::from(context.config_read().schedule_year_span.max(1));
            (first..first + span).collect()
        }
    };
    let portfolio = context.portfolio()?;

    for year in years {
        let months = CalendarService::for_property(portfolio, property_id, year)?;
        output::section(format!("Calendar {year}"));
        if months.is_empty() {
            output::info("Nothing falls due this year.");
            continue;
        }
        let rows: Vec<Vec<String>> = months
            .iter()
            .map(|month| {
                let names: Vec<&str> = month.entries.iter().map(|entry| entry.name.as_str()).collect();
                vec![
                    context.formatters.period(month.period),
                    names.join(", "),
                    context.formatters.amount(month.total_due),
                ]
            })
            .collect();
        output::print_table(&["Month", "Fees", "Total"], &rows);

        let comparison = CalendarService::compare_with_previous_year(portfolio, property_id, year)?;
        let change = match comparison.percent_change {
            Some(percent) => format!("{percent}%"),
            None => "n/a".into(),
        };
        output::print_two_column(&[
            ("Year total", context.formatters.amount(comparison.current_total)),
            (
                "Previous year",
                context.formatters.amount(comparison.previous_total),
            ),
            ("Change", change),
        ]);
    }
    Ok(())
}

fn cmd_due(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let property_id = context.resolve_property(require_arg(args, 0, DUE_USAGE)?)?;
    let today = context.today();
    let year = parse_year(args.get(1).copied(), today.year())?;
    let month = parse_month(args.get(2).copied(), today.month())?;
    let portfolio = context.portfolio()?;

    let unpaid = DueService::unpaid_for_month(portfolio, property_id, year, month)?;
    let required = DueService::required_this_month(portfolio, property_id, year, month)?;

    output::section(format!("Due in {} {year}", month_name(month)));
    if unpaid.is_empty() {
        output::success("All fees due this month are paid.");
    } else {
        let rows: Vec<Vec<String>> = unpaid
            .iter()
            .map(|notice| vec![notice.name.clone(), context.formatters.amount(notice.amount_due)])
            .collect();
        output::print_table(&["Fee", "Amount"], &rows);
    }
    let outstanding: Decimal = unpaid.iter().map(|notice| notice.amount_due).sum();
    output::print_two_column(&[
        ("Required", context.formatters.amount(required)),
        ("Outstanding", context.formatters.amount(outstanding)),
    ]);
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let property_id = context.resolve_property(require_arg(args, 0, SUMMARY_USAGE)?)?;
    let year = parse_year(args.get(1).copied(), context.current_year())?;
    let portfolio = context.portfolio()?;

    let calendar = CalendarService::for_property(portfolio, property_id, year)?;
    let window = DateWindow::year(year).map_err(CoreError::from)?;
    let received = PaymentService::monthly_totals(portfolio.payments_for(property_id), window);

    let rows: Vec<Vec<String>> = received
        .iter()
        .map(|month| {
            let expected = calendar
                .iter()
                .find(|entry| entry.period == month.period)
                .map(|entry| entry.total_due)
                .unwrap_or(Decimal::ZERO);
            vec![
                context.formatters.period(month.period),
                context.formatters.amount(expected),
                context.formatters.amount(month.total),
            ]
        })
        .collect();

    let expected_total: Decimal = calendar.iter().map(|month| month.total_due).sum();
    let received_total = PaymentService::yearly_summary(portfolio, property_id, year)?;

    output::section(format!("Summary {year}"));
    output::print_table(&["Month", "Expected", "Received"], &rows);
    output::print_two_column(&[
        ("Expected", context.formatters.amount(expected_total)),
        ("Received", context.formatters.amount(received_total)),
        (
            "Balance",
            context.formatters.amount(received_total - expected_total),
        ),
    ]);
    Ok(())
}

fn cmd_timeline(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let first = require_arg(args, 0, TIMELINE_USAGE)?;
    if first.eq_ignore_ascii_case("add") {
        let property_id = context.resolve_property(require_arg(args, 1, TIMELINE_USAGE)?)?;
        let date = parse_date(require_arg(args, 2, TIMELINE_USAGE)?)?;
        let title = args.get(3..).map(|rest| rest.join(" ")).unwrap_or_default();
        if title.trim().is_empty() {
            return Err(CommandError::InvalidArguments(format!(
                "usage: {TIMELINE_USAGE}"
            )));
        }
        let event = TimelineEvent::new(property_id, date, EventKind::Note, title.trim());
        TimelineService::add(context.portfolio_mut()?, event)?;
        output::success("Event added.");
        return Ok(());
    }

    let property_id = context.resolve_property(first)?;
    let portfolio = context.portfolio()?;
    let events = TimelineService::for_property(portfolio, property_id);
    if events.is_empty() {
        output::info("No events recorded for this property.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = events
        .iter()
        .map(|event| {
            vec![
                context.formatters.date(event.occurred_on),
                event.kind.to_string(),
                event.title.clone(),
            ]
        })
        .collect();
    output::print_table(&["Date", "Kind", "Event"], &rows);
    Ok(())
}
