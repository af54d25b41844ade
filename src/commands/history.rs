use log::debug;

use crate::types::invocation::{Arguments, ParsedInvocation};

/// Log of the invocations typed during a session.
///
/// Only the first invocation of each command name is ever stored. A later
/// invocation of the same command, even with different arguments, is dropped
/// on insert and so never shows up in any listing.
#[derive(Debug, Default)]
pub struct CommandHistory {
    entries: Vec<ParsedInvocation>,
    issued: u64,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the next invocation and records it.
    pub fn register(&mut self, command: String, arguments: Arguments) -> ParsedInvocation {
        let invocation = ParsedInvocation {
            id: self.issued,
            command,
            arguments,
        };
        self.issued += 1;
        self.record(invocation.clone());
        invocation
    }

    /// Appends unless an invocation with the same command name is stored.
    pub fn record(&mut self, invocation: ParsedInvocation) -> bool {
        if self
            .entries
            .iter()
            .any(|stored| stored.command == invocation.command)
        {
            debug!(
                "history already holds `{}`, dropping invocation {}",
                invocation.command, invocation.id
            );
            return false;
        }
        self.entries.push(invocation);
        true
    }

    /// Raw append order with `include_duplicates`, otherwise one entry per
    /// distinct (command, arguments) pair, skipping argument-less invocations.
    pub fn list(&self, include_duplicates: bool) -> Vec<&ParsedInvocation> {
        if include_duplicates {
            return self.entries.iter().collect();
        }

        let mut listed: Vec<&ParsedInvocation> = Vec::new();
        for invocation in &self.entries {
            if invocation.arguments.is_empty() {
                continue;
            }
            let seen = listed.iter().any(|other| {
                other.command == invocation.command && other.arguments == invocation.arguments
            });
            if !seen {
                listed.push(invocation);
            }
        }
        listed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
