use std::collections::HashMap;

use crate::types::command::{ArgType, ArgumentSpec, CommandKind, CommandSpec, Flag};

/// Read-only table of the commands the console understands.
pub struct CommandRegistry {
    commands: Vec<CommandSpec>,
    index: HashMap<&'static str, usize>,
}

impl CommandRegistry {
    /// Builds the lookup index in declaration order, a spelling registered
    /// twice resolves to its last declaration.
    pub fn new(commands: Vec<CommandSpec>) -> Self {
        let mut index = HashMap::new();
        for (position, spec) in commands.iter().enumerate() {
            index.insert(spec.name, position);
            index.insert(spec.alias, position);
        }
        Self { commands, index }
    }

    /// Looks a command up by its long name or its short alias.
    pub fn lookup(&self, name: &str) -> Option<&CommandSpec> {
        self.index.get(name).map(|&position| &self.commands[position])
    }

    /// Every declared command, in declaration order.
    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    /// Name to echo for a command typed as `raw`: the canonical name of its
    /// handler, or `raw` itself when unknown.
    pub fn canonical_name<'a>(&'a self, raw: &'a str) -> &'a str {
        self.lookup(raw).map(|spec| spec.kind.as_str()).unwrap_or(raw)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new(default_commands())
    }
}

pub fn default_commands() -> Vec<CommandSpec> {
    vec![
        CommandSpec {
            name: "help",
            alias: "-h",
            kind: CommandKind::Help,
            description: "Show this help",
            arguments: vec![],
        },
        CommandSpec {
            name: "init",
            alias: "-i",
            kind: CommandKind::Init,
            description: "Connect to a network and load a contract",
            arguments: vec![
                ArgumentSpec::for_flag(
                    Flag::Network,
                    ArgType::Int,
                    "(chain_id) Chain id of the network",
                ),
                ArgumentSpec::for_flag(
                    Flag::Contract,
                    ArgType::String,
                    "(contract_address) Address of the contract",
                ),
                ArgumentSpec::for_flag(
                    Flag::PathAbi,
                    ArgType::String,
                    "(path_abi, optional) Path to a local ABI file",
                ),
            ],
        },
        CommandSpec {
            name: "read",
            alias: "-r",
            kind: CommandKind::Read,
            description: "Call a read method of the contract",
            arguments: vec![
                ArgumentSpec::for_flag(
                    Flag::Method,
                    ArgType::String,
                    "(mid or method_name) Contract method",
                ),
                ArgumentSpec::for_flag(
                    Flag::Args,
                    ArgType::List,
                    "(argument list, optional) Method arguments",
                ),
            ],
        },
        CommandSpec {
            name: "command_story",
            alias: "-cs",
            kind: CommandKind::CommandStory,
            description: "Show the command history with arguments",
            arguments: vec![ArgumentSpec::for_flag(
                Flag::Doubles,
                ArgType::None,
                "(true, True or 1) Show repeated commands",
            )],
        },
        CommandSpec {
            name: "wallets",
            alias: "-w",
            kind: CommandKind::Wallets,
            description: "List local wallets",
            arguments: vec![],
        },
    ]
}
