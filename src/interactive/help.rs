use async_trait::async_trait;

use crate::commands::CommandRegistry;
use crate::interactive::{CommandHandler, Session};
use crate::types::error::Result;
use crate::types::invocation::ParsedInvocation;

pub struct HelpCommand;

#[async_trait(?Send)]
impl CommandHandler for HelpCommand {
    async fn handle(&self, session: &mut Session, _invocation: &ParsedInvocation) -> Result<()> {
        print!("{}", render_help(&session.registry));
        Ok(())
    }
}

pub fn render_help(registry: &CommandRegistry) -> String {
    let mut out = String::new();
    for command in registry.commands() {
        out.push_str(&format!(
            "[{}], [{}]: {}\n",
            command.name, command.alias, command.description
        ));
        for arg in &command.arguments {
            out.push_str(&format!(
                "\t[{}], [{}]{}: {}\n",
                arg.long,
                arg.short,
                arg.value_hint(),
                arg.description
            ));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_commands_in_order_with_flags() {
        let help = render_help(&CommandRegistry::default());
        let lines: Vec<&str> = help.lines().collect();

        assert_eq!(lines[0], "[help], [-h]: Show this help");
        assert!(lines[2].starts_with("[init], [-i]: "));
        assert!(lines[3].starts_with("\t[--network], [-n] <int>: "));
        assert!(help.contains("\t[--path_abi], [-pa] <string>: "));
        assert!(help.contains("\t[--args], [-a] <a,b,...>: "));
        assert!(help.contains("\t[--doubles], [-d]: "));
        assert!(help.contains("[command_story], [-cs]: "));

        let read = help.find("[read]").unwrap();
        let story = help.find("[command_story]").unwrap();
        assert!(read < story);
    }
}
