//! Shell housekeeping commands.

use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("help", "Show available commands", "help [command]", cmd_help),
        CommandDefinition::new("version", "Show build metadata", "version", cmd_version),
        CommandDefinition::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first().map(|name| name.to_lowercase()) {
        let Some(command) = context.registry.get(&name) else {
            return Err(CommandError::InvalidArguments(format!(
                "No such command `{}`.",
                name
            )));
        };
        output_section(command.name);
        io::print_info(format!("  {}", command.description));
        io::print_info(format!("  usage: {}", command.usage));
        return Ok(());
    }

    output_section("Commands");
    let width = context
        .registry
        .names()
        .map(str::len)
        .max()
        .unwrap_or(0);
    for command in context.registry.iter() {
        io::print_info(format!(
            "  {:width$}  {}",
            command.name,
            command.description,
            width = width
        ));
    }
    io::print_hint("Use `help <command>` for usage details.");
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output_section(format!("Bill Core {}", env!("CARGO_PKG_VERSION")));
    io::print_info(format!(
        "  Build hash : {} ({})",
        env!("BILL_CORE_BUILD_HASH"),
        env!("BILL_CORE_BUILD_STATUS")
    ));
    io::print_info(format!("  Built at   : {}", env!("BILL_CORE_BUILD_TIMESTAMP")));
    io::print_info(format!("  Target     : {}", env!("BILL_CORE_BUILD_TARGET")));
    io::print_info(format!("  Profile    : {}", env!("BILL_CORE_BUILD_PROFILE")));
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
