//! What-if workspace commands.
//!
//! Playground bills live only in the session and are projected with the
//! same engine as the real book.

use uuid::Uuid;

use crate::bills::project_pay_periods;
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::format::format_optional_amount;
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::playground::PlaygroundAction;

use super::bill::parse_draft;
use super::income::parse_frequency;
use super::upcoming::{parse_months, render_projection};
use super::{parse_amount, parse_date, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "playground",
        "Explore hypothetical bills without touching the book",
        "playground <start|clone|list|add|edit|remove|view|reset> ...",
        cmd_playground,
    )]
}

fn cmd_playground(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: playground <start|clone|list|add|edit|remove|view|reset>".into(),
        ));
    };
    match subcommand.to_lowercase().as_str() {
        "start" => start(context, rest),
        "clone" => clone_book(context),
        "list" | "ls" => list(context),
        "add" => add(context, rest),
        "edit" => edit(context, rest),
        "remove" | "rm" => remove(context, rest),
        "view" => view(context, rest),
        "reset" => reset(context),
        other => Err(CommandError::InvalidArguments(format!(
            "Unknown playground action `{}`.",
            other
        ))),
    }
}

/// Starts a fresh playground. With arguments the hypothetical income is
/// taken from them; otherwise the book's profile is borrowed.
fn start(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let income_profile = if args.is_empty() {
        context.require_income_profile()?
    } else {
        let [frequency, start, rest @ ..] = args else {
            return Err(CommandError::InvalidArguments(
                "usage: playground start [<weekly|fortnightly|monthly> <start> [amount]]".into(),
            ));
        };
        let amount = match rest {
            [] => None,
            [amount] => Some(parse_amount(amount)?),
            _ => {
                return Err(CommandError::InvalidArguments(
                    "too many arguments for `playground start`".into(),
                ))
            }
        };
        let profile = crate::bills::IncomeProfile::new(
            parse_frequency(frequency)?,
            parse_date(start)?,
            amount,
        );
        profile.validate(context.today())?;
        profile
    };

    context
        .playground
        .apply(PlaygroundAction::InitFresh { income_profile });
    io::print_success("Playground started with no bills.");
    Ok(())
}

/// Seeds the playground with copies of the book's bills.
fn clone_book(context: &mut ShellContext) -> CommandResult {
    let income_profile = context.require_income_profile()?;
    let bills = context.book.bills.clone();
    let count = bills.len();
    context.playground.apply(PlaygroundAction::InitClone {
        income_profile,
        bills,
    });
    io::print_success(format!("Playground seeded with {} bill(s).", count));
    Ok(())
}

fn list(context: &mut ShellContext) -> CommandResult {
    require_started(context)?;
    if context.playground.bills.is_empty() {
        io::print_info("Playground has no bills.");
        return Ok(());
    }
    output_section("Playground bills");
    let symbol = context.config.currency_symbol.clone();
    for (position, bill) in context.playground.bills.iter().enumerate() {
        io::print_info(format!(
            "  {:>2}. {:<24} {:>12}  {}",
            position + 1,
            bill.title,
            format_optional_amount(bill.amount, &symbol),
            bill.kind.describe()
        ));
    }
    Ok(())
}

fn add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_started(context)?;
    let draft = parse_draft(args)?;
    draft.validate()?;
    context.playground.apply(PlaygroundAction::AddBill(draft));
    io::print_success("Playground bill added.");
    Ok(())
}

fn edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_started(context)?;
    let Some((index, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: playground edit <number> <single|recurring> ...".into(),
        ));
    };
    let id = resolve(context, index)?;
    let draft = parse_draft(rest)?;
    draft.validate()?;
    context
        .playground
        .apply(PlaygroundAction::UpdateBill { id, draft });
    io::print_success("Playground bill updated.");
    Ok(())
}

fn remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_started(context)?;
    let Some(index) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: playground remove <number>".into(),
        ));
    };
    let id = resolve(context, index)?;
    context.playground.apply(PlaygroundAction::DeleteBill { id });
    io::print_success("Playground bill removed.");
    Ok(())
}

fn view(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_started(context)?;
    let months = parse_months(context, args)?;
    let profile = context
        .playground
        .income_profile
        .clone()
        .ok_or(CommandError::IncomeNotConfigured)?;
    let today = context.today();
    let buckets = project_pay_periods(&context.playground.bills, &profile, today, months);
    // Exclusion toggles belong to the real book view only.
    let excluded = std::collections::HashSet::new();
    render_projection(context, &buckets, &profile, &excluded, today);
    Ok(())
}

fn reset(context: &mut ShellContext) -> CommandResult {
    context.playground.apply(PlaygroundAction::Reset);
    io::print_success("Playground cleared.");
    Ok(())
}

fn require_started(context: &ShellContext) -> Result<(), CommandError> {
    if context.playground.initialized {
        Ok(())
    } else {
        Err(CommandError::Message(
            "Playground not started. Use `playground start` or `playground clone` first.".into(),
        ))
    }
}

fn resolve(context: &ShellContext, raw: &str) -> Result<Uuid, CommandError> {
    let position: usize = raw.parse().map_err(|_| {
        CommandError::InvalidArguments(format!("`{}` is not a bill number", raw))
    })?;
    context
        .playground
        .bills
        .get(position.wrapping_sub(1))
        .map(|bill| bill.id)
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!(
                "No playground bill numbered {}; see `playground list`.",
                raw
            ))
        })
}
