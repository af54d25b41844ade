use std::fmt;

/// Handler identifier attached to every declared command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Help,
    Init,
    Read,
    CommandStory,
    Wallets,
}

impl CommandKind {
    /// Canonical command name, as echoed back in the history.
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Help => "help",
            CommandKind::Init => "init",
            CommandKind::Read => "read",
            CommandKind::CommandStory => "command_story",
            CommandKind::Wallets => "wallets_list",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flags understood by the console, each with a long and a short spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    Network,
    Contract,
    PathAbi,
    Method,
    Args,
    Doubles,
}

impl Flag {
    pub const ALL: [Flag; 6] = [
        Flag::Network,
        Flag::Contract,
        Flag::PathAbi,
        Flag::Method,
        Flag::Args,
        Flag::Doubles,
    ];

    pub fn long(&self) -> &'static str {
        match self {
            Flag::Network => "--network",
            Flag::Contract => "--contract",
            Flag::PathAbi => "--path_abi",
            Flag::Method => "--method",
            Flag::Args => "--args",
            Flag::Doubles => "--doubles",
        }
    }

    pub fn short(&self) -> &'static str {
        match self {
            Flag::Network => "-n",
            Flag::Contract => "-c",
            Flag::PathAbi => "-pa",
            Flag::Method => "-m",
            Flag::Args => "-a",
            Flag::Doubles => "-d",
        }
    }

    /// Name used when echoing an invocation back to the user.
    pub fn canonical(&self) -> &'static str {
        &self.long()[2..]
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|flag| flag.long() == token || flag.short() == token)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    String,
    Int,
    List,
    None,
}

#[derive(Debug, Clone)]
pub struct ArgumentSpec {
    pub long: &'static str,
    pub short: &'static str,
    pub takes_value: bool,
    pub arg_type: ArgType,
    pub description: &'static str,
}

impl ArgumentSpec {
    pub fn for_flag(flag: Flag, arg_type: ArgType, description: &'static str) -> Self {
        Self {
            long: flag.long(),
            short: flag.short(),
            takes_value: arg_type != ArgType::None,
            arg_type,
            description,
        }
    }

    /// Value placeholder shown in help, empty for switches.
    pub fn value_hint(&self) -> &'static str {
        if !self.takes_value {
            return "";
        }
        match self.arg_type {
            ArgType::String => " <string>",
            ArgType::Int => " <int>",
            ArgType::List => " <a,b,...>",
            ArgType::None => "",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub name: &'static str,
    pub alias: &'static str,
    pub kind: CommandKind,
    pub description: &'static str,
    pub arguments: Vec<ArgumentSpec>,
}
