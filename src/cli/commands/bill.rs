//! CLI command handlers for bill CRUD.

use uuid::Uuid;

use crate::bills::{BillDraft, Cadence, Recurrence};
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::format::format_optional_amount;
use crate::cli::io;
use crate::cli::output::section as output_section;

use super::{parse_amount, parse_date, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "bill",
        "Manage bills",
        "bill <list|add|edit|remove|toggle> ...",
        cmd_bill,
    )]
}

fn cmd_bill(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return list_bills(context);
    };
    match subcommand.to_lowercase().as_str() {
        "list" | "ls" => list_bills(context),
        "add" => add_bill(context, rest),
        "edit" => edit_bill(context, rest),
        "remove" | "rm" => remove_bill(context, rest),
        "toggle" => toggle_bill(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "Unknown bill action `{}`; expected list, add, edit, remove, or toggle.",
            other
        ))),
    }
}

fn list_bills(context: &mut ShellContext) -> CommandResult {
    if context.book.bills.is_empty() {
        io::print_info("No bills registered.");
        io::print_hint("Try `bill add single Rent 2024-02-01 1000`.");
        return Ok(());
    }
    output_section("Bills");
    let symbol = context.config.currency_symbol.clone();
    for (position, bill) in context.book.bills.iter().enumerate() {
        let marker = if context.excluded_bills.contains(&bill.id) {
            "  (excluded from totals)"
        } else {
            ""
        };
        io::print_info(format!(
            "  {:>2}. {:<24} {:>12}  {}{}",
            position + 1,
            bill.title,
            format_optional_amount(bill.amount, &symbol),
            bill.kind.describe(),
            marker
        ));
    }
    Ok(())
}

fn add_bill(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let draft = draft_from_args_or_prompt(context, args)?;
    context.book.add_bill(draft)?;
    context.save_book()?;
    io::print_success("Bill added.");
    Ok(())
}

fn edit_bill(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((index, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: bill edit <number> <single|recurring> ...".into(),
        ));
    };
    let id = resolve_bill(context, index)?;
    let draft = draft_from_args_or_prompt(context, rest)?;
    context.book.update_bill(id, draft)?;
    context.save_book()?;
    io::print_success("Bill updated.");
    Ok(())
}

fn remove_bill(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(index) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: bill remove <number>".into(),
        ));
    };
    let id = resolve_bill(context, index)?;
    let title = context
        .book
        .bill(id)
        .map(|bill| bill.title.clone())
        .unwrap_or_default();
    if context.is_interactive()
        && !io::confirm_action(&format!("Remove `{}`?", title), false)?
    {
        return Ok(());
    }
    context.book.remove_bill(id)?;
    context.excluded_bills.remove(&id);
    context.save_book()?;
    io::print_success(format!("Removed `{}`.", title));
    Ok(())
}

/// Session-only toggle: an excluded bill stays in every period view but is
/// left out of the summary totals.
fn toggle_bill(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(index) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: bill toggle <number>".into(),
        ));
    };
    let id = resolve_bill(context, index)?;
    if context.excluded_bills.remove(&id) {
        io::print_success("Bill included in totals again.");
    } else {
        context.excluded_bills.insert(id);
        io::print_success("Bill excluded from totals for this session.");
    }
    Ok(())
}

fn resolve_bill(context: &ShellContext, raw: &str) -> Result<Uuid, CommandError> {
    let position: usize = raw.parse().map_err(|_| {
        CommandError::InvalidArguments(format!("`{}` is not a bill number", raw))
    })?;
    context
        .book
        .bills
        .get(position.wrapping_sub(1))
        .map(|bill| bill.id)
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!(
                "No bill numbered {}; see `bill list`.",
                raw
            ))
        })
}

fn draft_from_args_or_prompt(
    context: &ShellContext,
    args: &[&str],
) -> Result<BillDraft, CommandError> {
    if args.is_empty() {
        if !context.is_interactive() {
            return Err(CommandError::InvalidArguments(
                "usage: bill add <single|recurring> ...".into(),
            ));
        }
        return prompt_draft();
    }
    parse_draft(args)
}

pub(crate) fn parse_draft(args: &[&str]) -> Result<BillDraft, CommandError> {
    let Some((shape, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: bill add <single|recurring> ...".into(),
        ));
    };
    match shape.to_lowercase().as_str() {
        "single" => parse_single(rest),
        "recurring" => parse_recurring(rest),
        other => Err(CommandError::InvalidArguments(format!(
            "`{}` is not a bill shape; expected single or recurring",
            other
        ))),
    }
}

fn parse_single(args: &[&str]) -> Result<BillDraft, CommandError> {
    let [title, due, rest @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: bill add single <title> <due YYYY-MM-DD> [amount]".into(),
        ));
    };
    let amount = match rest {
        [] => None,
        [amount] => Some(parse_amount(amount)?),
        _ => {
            return Err(CommandError::InvalidArguments(
                "too many arguments for a single bill".into(),
            ))
        }
    };
    Ok(BillDraft::single(*title, parse_date(due)?, amount))
}

fn parse_recurring(args: &[&str]) -> Result<BillDraft, CommandError> {
    const USAGE: &str = "usage: bill add recurring <title> <weekly|monthly> <interval> \
                         <start YYYY-MM-DD> [amount] [until=DATE] [count=N] [days=5,20]";

    let mut positionals = Vec::new();
    let mut rule_options = Vec::new();
    for arg in args {
        if arg.contains('=') {
            rule_options.push(*arg);
        } else {
            positionals.push(*arg);
        }
    }

    let [title, cadence, interval, start, rest @ ..] = positionals.as_slice() else {
        return Err(CommandError::InvalidArguments(USAGE.into()));
    };
    let amount = match rest {
        [] => None,
        [amount] => Some(parse_amount(amount)?),
        _ => return Err(CommandError::InvalidArguments(USAGE.into())),
    };

    let interval: u32 = interval.parse().map_err(|_| {
        CommandError::InvalidArguments(format!("`{}` is not an interval", interval))
    })?;
    let mut rule = Recurrence::new(parse_cadence(cadence)?, interval)
        .with_start_date(parse_date(start)?);

    for option in rule_options {
        let (key, value) = option.split_once('=').unwrap_or((option, ""));
        match key {
            "until" => rule.until = Some(parse_date(value)?),
            "count" => {
                rule.count = Some(value.parse().map_err(|_| {
                    CommandError::InvalidArguments(format!("`{}` is not a count", value))
                })?)
            }
            "days" => rule.by_month_day = parse_days(value)?,
            other => {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown option `{}`; expected until=, count=, or days=",
                    other
                )))
            }
        }
    }

    Ok(BillDraft::recurring(*title, rule, amount))
}

fn parse_cadence(raw: &str) -> Result<Cadence, CommandError> {
    match raw.to_lowercase().as_str() {
        "weekly" => Ok(Cadence::Weekly),
        "monthly" => Ok(Cadence::Monthly),
        other => Err(CommandError::InvalidArguments(format!(
            "`{}` is not a cadence; expected weekly or monthly",
            other
        ))),
    }
}

fn parse_days(raw: &str) -> Result<Vec<u32>, CommandError> {
    raw.split(',')
        .map(|part| {
            part.trim().parse::<u32>().map_err(|_| {
                CommandError::InvalidArguments(format!("`{}` is not a day of month", part))
            })
        })
        .collect()
}

fn prompt_draft() -> Result<BillDraft, CommandError> {
    let title = io::prompt_text("Title")?;
    let amount = match io::prompt_optional_text("Amount (blank to skip)")? {
        Some(raw) => Some(parse_amount(&raw)?),
        None => None,
    };
    let shape = io::prompt_text("Shape (single/recurring)")?;
    match shape.to_lowercase().as_str() {
        "single" => {
            let due = parse_date(&io::prompt_text("Due date (YYYY-MM-DD)")?)?;
            Ok(BillDraft::single(title, due, amount))
        }
        "recurring" => {
            let cadence = parse_cadence(&io::prompt_text("Cadence (weekly/monthly)")?)?;
            let interval: u32 = io::prompt_text("Interval (1 = every week/month)")?
                .trim()
                .parse()
                .map_err(|_| CommandError::InvalidArguments("interval must be a number".into()))?;
            let start = parse_date(&io::prompt_text("First occurrence (YYYY-MM-DD)")?)?;
            let mut rule = Recurrence::new(cadence, interval).with_start_date(start);
            if cadence == Cadence::Monthly {
                if let Some(days) = io::prompt_optional_text("Days of month, e.g. 5,20 (blank for the start day)")? {
                    rule.by_month_day = parse_days(&days)?;
                }
            }
            if let Some(until) = io::prompt_optional_text("End date (blank for none)")? {
                rule.until = Some(parse_date(&until)?);
            }
            if let Some(count) = io::prompt_optional_text("Max occurrences (blank for none)")? {
                rule.count = Some(count.trim().parse().map_err(|_| {
                    CommandError::InvalidArguments("count must be a number".into())
                })?);
            }
            Ok(BillDraft::recurring(title, rule, amount))
        }
        other => Err(CommandError::InvalidArguments(format!(
            "`{}` is not a bill shape; expected single or recurring",
            other
        ))),
    }
}
