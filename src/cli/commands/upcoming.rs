//! Pay-period projection view.

use std::collections::HashSet;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::bills::{project_pay_periods, summarize_period, IncomeProfile, PeriodBucket};
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::format::{format_date, format_optional_amount};
use crate::cli::io;
use crate::cli::output::section as output_section;

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "upcoming",
        "Show bills due per upcoming pay period",
        "upcoming [months]",
        cmd_upcoming,
    )]
}

fn cmd_upcoming(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let months = parse_months(context, args)?;
    let profile = context.require_income_profile()?;
    let today = context.today();
    let buckets = project_pay_periods(&context.book.bills, &profile, today, months);
    let excluded = context.excluded_bills.clone();
    render_projection(context, &buckets, &profile, &excluded, today);
    Ok(())
}

pub(crate) fn parse_months(context: &ShellContext, args: &[&str]) -> Result<u32, CommandError> {
    match args.first() {
        None => Ok(context.config.horizon_months.max(1)),
        Some(raw) => {
            let months: u32 = raw.parse().map_err(|_| {
                CommandError::InvalidArguments(format!("`{}` is not a number of months", raw))
            })?;
            if months < 1 {
                return Err(CommandError::InvalidArguments(
                    "months must be at least 1".into(),
                ));
            }
            Ok(months)
        }
    }
}

pub(crate) fn render_projection(
    context: &ShellContext,
    buckets: &[PeriodBucket],
    profile: &IncomeProfile,
    excluded: &HashSet<Uuid>,
    today: NaiveDate,
) {
    if buckets.is_empty() {
        io::print_warning("Pay schedule has not started yet; nothing to project.");
        return;
    }

    let symbol = &context.config.currency_symbol;
    for bucket in buckets {
        let heading = match bucket.after {
            Some(after) => format!(
                "Pay period {} – {}",
                format_date(bucket.pay_date),
                format_date(after)
            ),
            None => format!("Pay period {} – (open)", format_date(bucket.pay_date)),
        };
        output_section(heading);
        if bucket.bills.is_empty() {
            io::print_info("  No bills due.");
            continue;
        }
        for occurrence in &bucket.bills {
            let marker = if excluded.contains(&occurrence.bill_id) {
                "  (excluded)"
            } else {
                ""
            };
            io::print_info(format!(
                "  {}  {:<24} {}{}",
                occurrence.date.format("%Y-%m-%d"),
                occurrence.title,
                format_optional_amount(occurrence.amount, symbol),
                marker
            ));
        }
    }

    render_summary(context, &buckets[0], profile, excluded, today);
}

fn render_summary(
    context: &ShellContext,
    current: &PeriodBucket,
    profile: &IncomeProfile,
    excluded: &HashSet<Uuid>,
    today: NaiveDate,
) {
    let summary = summarize_period(current, profile, excluded, today);
    let symbol = &context.config.currency_symbol;

    output_section("This period");
    io::print_info(format!(
        "  Income    : {} ({})",
        format_optional_amount(profile.amount, symbol),
        profile.pay_frequency.per_label()
    ));
    io::print_info(format!(
        "  Bills due : {}",
        crate::cli::format::format_amount(summary.total_due, symbol)
    ));
    io::print_info(format!(
        "  Balance   : {}",
        crate::cli::format::format_amount(summary.balance, symbol)
    ));
    match &summary.next_bill {
        Some(next) => io::print_info(format!(
            "  Next bill : {} on {}",
            next.title,
            format_date(next.date)
        )),
        None => io::print_info("  Next bill : none"),
    }
    if !excluded.is_empty() {
        io::print_hint(format!(
            "{} bill(s) excluded from the totals this session.",
            excluded.len()
        ));
    }
}
