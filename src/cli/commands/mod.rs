pub mod config;
pub mod fee;
pub mod owner;
pub mod payment;
pub mod portfolio;
pub mod property;
pub mod rental;
pub mod schedule;
pub mod system;
pub mod tenant;

use crate::cli::registry::{CommandEntry, CommandRegistry};

const ROOT_COMMAND_ORDER: &[&str] = &[
    "new",
    "open",
    "save",
    "owner",
    "property",
    "tenant",
    "rental",
    "fee",
    "payment",
    "schedule",
    "calendar",
    "due",
    "summary",
    "timeline",
    "config",
    "help",
    "version",
    "exit",
];

pub(crate) fn all_entries() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(portfolio::definitions());
    commands.extend(owner::definitions());
    commands.extend(property::definitions());
    commands.extend(tenant::definitions());
    commands.extend(rental::definitions());
    commands.extend(fee::definitions());
    commands.extend(payment::definitions());
    commands.extend(schedule::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let mut entries = all_entries();
    entries.sort_by_key(|entry| {
        ROOT_COMMAND_ORDER
            .iter()
            .position(|name| entry.name.eq_ignore_ascii_case(name))
            .unwrap_or(ROOT_COMMAND_ORDER.len())
    });
    for entry in entries {
        registry.register(entry);
    }
}

