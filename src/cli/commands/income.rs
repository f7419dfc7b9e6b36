//! CLI command handlers for the income profile.

use crate::bills::{IncomeProfile, PayFrequency};
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::format::{format_date, format_optional_amount};
use crate::cli::io;
use crate::cli::output::section as output_section;

use super::{parse_amount, parse_date, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "income",
        "Manage the income profile",
        "income <show|set|edit|clear> [weekly|fortnightly|monthly] [start] [amount]",
        cmd_income,
    )]
}

fn cmd_income(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return show_income(context);
    };
    match subcommand.to_lowercase().as_str() {
        "show" => show_income(context),
        "set" | "edit" => set_income(context, rest),
        "clear" => clear_income(context),
        other => Err(CommandError::InvalidArguments(format!(
            "Unknown income action `{}`; expected show, set, edit, or clear.",
            other
        ))),
    }
}

fn show_income(context: &mut ShellContext) -> CommandResult {
    let Some(profile) = context.book.income_profile.clone() else {
        io::print_info("No income profile configured.");
        io::print_hint("Try `income set monthly 2024-01-01 50000`.");
        return Ok(());
    };
    let today = context.today();
    output_section("Income profile");
    io::print_info(format!("  Frequency : {}", profile.pay_frequency.label()));
    io::print_info(format!("  Anchor    : {}", format_date(profile.start_date)));
    io::print_info(format!(
        "  Amount    : {} ({})",
        format_optional_amount(profile.amount, &context.config.currency_symbol),
        profile.pay_frequency.per_label()
    ));
    match profile.current_pay(today) {
        Some(current) => {
            io::print_info(format!("  Last pay  : {}", format_date(current)));
            io::print_info(format!(
                "  Next pay  : {}",
                format_date(profile.next_pay_after(current))
            ));
        }
        None => io::print_warning("Pay schedule has not started yet."),
    }
    Ok(())
}

fn set_income(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let profile = if args.is_empty() {
        if !context.is_interactive() {
            return Err(CommandError::InvalidArguments(
                "usage: income set <weekly|fortnightly|monthly> <start YYYY-MM-DD> [amount]"
                    .into(),
            ));
        }
        prompt_profile()?
    } else {
        parse_profile(args)?
    };

    let today = context.today();
    context.book.set_income_profile(profile, today)?;
    context.save_book()?;
    io::print_success("Income profile saved.");
    Ok(())
}

fn clear_income(context: &mut ShellContext) -> CommandResult {
    if context.book.income_profile.is_none() {
        io::print_info("No income profile configured.");
        return Ok(());
    }
    if context.is_interactive() && !io::confirm_action("Remove the income profile?", false)? {
        return Ok(());
    }
    context.book.clear_income_profile();
    context.save_book()?;
    io::print_success("Income profile removed.");
    Ok(())
}

fn parse_profile(args: &[&str]) -> Result<IncomeProfile, CommandError> {
    let [frequency, start, rest @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: income set <weekly|fortnightly|monthly> <start YYYY-MM-DD> [amount]".into(),
        ));
    };
    let amount = match rest {
        [] => None,
        [amount] => Some(parse_amount(amount)?),
        _ => {
            return Err(CommandError::InvalidArguments(
                "too many arguments for `income set`".into(),
            ))
        }
    };
    Ok(IncomeProfile::new(
        parse_frequency(frequency)?,
        parse_date(start)?,
        amount,
    ))
}

fn prompt_profile() -> Result<IncomeProfile, CommandError> {
    let frequency = parse_frequency(&io::prompt_text("Pay frequency (weekly/fortnightly/monthly)")?)?;
    let start = parse_date(&io::prompt_text("First pay date (YYYY-MM-DD)")?)?;
    let amount = match io::prompt_optional_text("Income per period (blank to skip)")? {
        Some(raw) => Some(parse_amount(&raw)?),
        None => None,
    };
    Ok(IncomeProfile::new(frequency, start, amount))
}

pub(crate) fn parse_frequency(raw: &str) -> Result<PayFrequency, CommandError> {
    match raw.to_lowercase().as_str() {
        "weekly" => Ok(PayFrequency::Weekly),
        "fortnightly" => Ok(PayFrequency::Fortnightly),
        "monthly" => Ok(PayFrequency::Monthly),
        other => Err(CommandError::InvalidArguments(format!(
            "`{}` is not a pay frequency; expected weekly, fortnightly, or monthly",
            other
        ))),
    }
}
