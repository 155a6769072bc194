use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// A root command; its handler dispatches any subcommands.
pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
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

/// Root commands in the order `help` lists them. Names are lowercase.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repeated name overwrites the earlier entry in place.
    pub fn register(&mut self, entry: CommandEntry) {
        match self.entries.iter_mut().find(|known| known.name == entry.name) {
            Some(known) => *known = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn list(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.get(name).map(|entry| entry.handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ignore(_: &mut ShellContext, _: &[&str]) -> CommandResult {
        Ok(())
    }

    #[test]
    fn re_registering_overwrites_without_moving() {
        let mut registry = CommandRegistry::new();
        for (name, description) in [("owner", "old"), ("fee", "Fees"), ("owner", "Owners")] {
            registry.register(CommandEntry::new(name, description, "", ignore));
        }
        assert_eq!(registry.names().collect::<Vec<_>>(), ["owner", "fee"]);
        assert_eq!(registry.list().len(), 2);
        assert_eq!(registry.get("owner").map(|entry| entry.description), Some("Owners"));
        assert!(registry.handler("fee").is_some());
        assert!(registry.handler("tenant").is_none());
    }
}
