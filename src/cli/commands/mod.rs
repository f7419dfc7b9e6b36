use std::collections::HashMap;

pub mod bill;
pub mod income;
pub mod playground;
pub mod system;
pub mod upcoming;

use crate::cli::context::{CommandResult, ShellContext};

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(system::definitions());
    commands.extend(income::definitions());
    commands.extend(bill::definitions());
    commands.extend(upcoming::definitions());
    commands.extend(playground::definitions());
    commands
}

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

pub(crate) fn parse_date(raw: &str) -> Result<chrono::NaiveDate, crate::cli::CommandError> {
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        crate::cli::CommandError::InvalidArguments(format!(
            "`{}` is not a date; expected YYYY-MM-DD",
            raw
        ))
    })
}

pub(crate) fn parse_amount(raw: &str) -> Result<f64, crate::cli::CommandError> {
    raw.parse::<f64>().map_err(|_| {
        crate::cli::CommandError::InvalidArguments(format!("`{}` is not an amount", raw))
    })
}

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandDefinition>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut commands = HashMap::new();
        let mut order = Vec::new();
        for definition in definitions {
            order.push(definition.name);
            commands.insert(definition.name, definition);
        }
        Self { commands, order }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.order
            .iter()
            .filter_map(move |name| self.commands.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.commands.get(name).map(|definition| definition.handler)
    }
}
