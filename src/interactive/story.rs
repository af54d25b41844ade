use async_trait::async_trait;

use crate::commands::CommandRegistry;
use crate::interactive::{CommandHandler, Session};
use crate::types::command::Flag;
use crate::types::error::Result;
use crate::types::invocation::ParsedInvocation;

pub struct CommandStoryCommand;

#[async_trait(?Send)]
impl CommandHandler for CommandStoryCommand {
    async fn handle(&self, session: &mut Session, invocation: &ParsedInvocation) -> Result<()> {
        let story = session.history.list(include_doubles(invocation));
        print!("{}", render_story(&session.registry, &story));
        Ok(())
    }
}

/// `-d` turns on the raw listing when it reads `true`, `True` or `1`.
pub fn include_doubles(invocation: &ParsedInvocation) -> bool {
    invocation
        .flag(Flag::Doubles)
        .and_then(|value| value.as_single())
        .is_some_and(|value| matches!(value, "True" | "true" | "1"))
}

pub fn render_story(registry: &CommandRegistry, story: &[&ParsedInvocation]) -> String {
    let mut out = String::new();
    for invocation in story {
        out.push_str(&format!(
            "{:5}{}\n",
            format!("[{}]", invocation.id),
            registry.canonical_name(&invocation.command)
        ));
        for (key, value) in invocation.arguments.iter() {
            let name = Flag::from_token(key).map(|f| f.canonical()).unwrap_or(key);
            out.push_str(&format!("\t\t{}   {}\n", name, value));
        }
    }
    out
}
