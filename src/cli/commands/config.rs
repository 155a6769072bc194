use rentbook_config::model::KEYS;

use crate::cli::core::{require_arg, CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const USAGE: &str = "config [show|set <key> <value>|backup [note]|backups|restore <name>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and manage global CLI preferences",
        USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return show_config(context);
    };
    match action.to_lowercase().as_str() {
        "show" => show_config(context),
        "set" => {
            let key = require_arg(rest, 0, USAGE)?;
            if rest.len() < 2 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    KEYS.join("|")
                )));
            }
            let value = rest[1..].join(" ");
            set_value(context, &key.to_lowercase(), &value)
        }
        "backup" => {
            let note = (!rest.is_empty()).then(|| rest.join(" "));
            let config = context.config_read().clone();
            let name = context.config_manager.backup(&config, note.as_deref())?;
            output::success(format!("Configuration backed up as {name}"));
            Ok(())
        }
        "backups" => {
            let backups = context.config_manager.list_backups()?;
            if backups.is_empty() {
                output::info("No configuration backups yet.");
                return Ok(());
            }
            output::section("Configuration backups");
            for name in backups {
                println!("  {name}");
            }
            Ok(())
        }
        "restore" => {
            let name = require_arg(rest, 0, USAGE)?;
            let restored = context.config_manager.restore(name)?;
            apply_color(context, restored.ui_color_enabled);
            *context.config_write() = restored;
            context.persist_config()?;
            output::success(format!("Configuration restored from {name}"));
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config subcommand `{other}`. Available: show, set, backup, backups, restore"
        ))),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    let config = context.config_read();
    let mut rows = Vec::with_capacity(KEYS.len());
    for key in KEYS {
        rows.push((key, config.get(key)?));
    }
    output::section("Configuration");
    output::print_two_column(&rows);
    output::hint(format!(
        "Stored at {}",
        context.config_manager.config_path().display()
    ));
    Ok(())
}

fn set_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let color = {
        let mut config = context.config_write();
        config.set(key, value)?;
        config.ui_color_enabled
    };
    if key == "ui_color_enabled" {
        apply_color(context, color);
    }
    context.persist_config()?;
    output::success("Configuration updated.");
    Ok(())
}

fn apply_color(context: &ShellContext, enabled: bool) {
    output::set_color_enabled(context.mode == CliMode::Interactive && enabled);
}
