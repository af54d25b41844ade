//! Interactive command console: reads a line, dispatches it, reports errors
//! and waits for the next one.

mod help;
mod init;
pub mod prompt;
pub mod read;
mod story;

use anyhow::Context;
use async_trait::async_trait;
use console::style;
use log::{debug, warn};

use crate::commands::{CommandHistory, CommandRegistry, parse_line};
use crate::config::{Config, ConfigManager};
use crate::types::command::CommandKind;
use crate::types::error::{ConsoleError, Result};
use crate::types::invocation::ParsedInvocation;
use crate::types::network::NetworkConfig;
use crate::utils::eth::{ContractConnector, ContractReader, EthConnector};

pub use self::{
    help::{HelpCommand, render_help},
    init::{InitCommand, parse_contract_address, select_network},
    prompt::{LinePrompt, Prompt},
    read::{ReadCommand, bind_arguments, coerce_argument, format_result, read_method, resolve_method},
    story::{CommandStoryCommand, include_doubles, render_story},
};

pub const CONSOLE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[async_trait(?Send)]
pub trait CommandHandler: Sync {
    async fn handle(&self, session: &mut Session, invocation: &ParsedInvocation) -> Result<()>;
}

/// Commands that can run. `wallets` is declared in the registry but has no
/// handler, so it reports as an unknown command.
static DISPATCH_TABLE: &[(CommandKind, &dyn CommandHandler)] = &[
    (CommandKind::Help, &HelpCommand),
    (CommandKind::Init, &InitCommand),
    (CommandKind::Read, &ReadCommand),
    (CommandKind::CommandStory, &CommandStoryCommand),
];

pub fn handler_for(kind: CommandKind) -> Option<&'static dyn CommandHandler> {
    DISPATCH_TABLE
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, handler)| *handler)
}

/// State of one console run.
pub struct Session {
    pub registry: CommandRegistry,
    pub history: CommandHistory,
    pub networks: Vec<NetworkConfig>,
    pub default_chain_id: Option<u64>,
    pub connector: Box<dyn ContractConnector>,
    pub contract: Option<Box<dyn ContractReader>>,
    pub prompt: Box<dyn Prompt>,
}

impl Session {
    pub fn new(config: &Config, connector: Box<dyn ContractConnector>, prompt: Box<dyn Prompt>) -> Self {
        Self {
            registry: CommandRegistry::default(),
            history: CommandHistory::new(),
            networks: config.networks(),
            default_chain_id: config.default_network().map(|n| n.chain_id()),
            connector,
            contract: None,
            prompt,
        }
    }

    /// Parses and runs one input line.
    pub async fn handle_line(&mut self, line: &str) -> Result<()> {
        let invocation = parse_line(line, &mut self.history)?;

        let handler = self
            .registry
            .lookup(&invocation.command)
            .and_then(|spec| handler_for(spec.kind))
            .ok_or_else(|| ConsoleError::UnknownCommand(invocation.command.clone()))?;

        debug!("dispatching `{}`", invocation.command);
        handler.handle(self, &invocation).await
    }

    /// Reads and runs lines until the user interrupts or input ends.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        while let Some(line) = self.prompt.read_line("Enter command: ")? {
            self.prompt.add_history(&line);
            if let Err(e) = self.handle_line(&line).await {
                report_error(&e);
            }
        }
        println!("\n👋 Goodbye!");
        Ok(())
    }
}

fn report_error(error: &ConsoleError) {
    warn!("{}", error);
    match error {
        e if e.is_input_error() => println!(
            "{} Incorrect command or input. [-h], [help]: help",
            style("❌").red()
        ),
        ConsoleError::UnknownCommand(_) => println!(
            "{} Unknown command, type [-h] or [help] for instructions",
            style("❌").red()
        ),
        other => println!("{} {}", style("❌").red(), style(other).red()),
    }
}

/// Starts the interactive console on the terminal.
pub async fn start() -> anyhow::Result<()> {
    let config_manager = ConfigManager::new()?;
    let config = config_manager
        .load()
        .with_context(|| format!("Failed to load {}", config_manager.config_path().display()))?;

    let connector = EthConnector {
        explorer_api_key: config.explorer_api_key(),
    };
    let prompt = LinePrompt::new()?;
    let mut session = Session::new(&config, Box::new(connector), Box::new(prompt));

    println!("\n{}", style("📝 Contract Console").bold().blue().underlined());
    println!("{}", style(format!("v{}, type [-h] or [help] for instructions", CONSOLE_VERSION)).dim());
    println!("{}\n", "-".repeat(40));

    session.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interactive::prompt::ScriptedPrompt;
    use crate::interactive::read::tests::{FakeContract, erc20_methods};
    use ethers::abi::Token;
    use ethers::types::{Address, U256};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Connector handing out a [`FakeContract`] and remembering what it was asked.
    #[derive(Default)]
    struct FakeConnector {
        connected: Rc<RefCell<Vec<(u64, Address, Option<String>)>>>,
    }

    #[async_trait(?Send)]
    impl ContractConnector for FakeConnector {
        async fn connect(
            &self,
            network: &NetworkConfig,
            address: Address,
            path_abi: Option<&str>,
        ) -> anyhow::Result<Box<dyn ContractReader>> {
            self.connected
                .borrow_mut()
                .push((network.chain_id, address, path_abi.map(str::to_string)));
            Ok(Box::new(FakeContract::new(
                erc20_methods(),
                vec![Token::Uint(U256::from(18u8))],
            )))
        }
    }

    fn new_session(answers: &[&str]) -> (Session, Rc<RefCell<Vec<(u64, Address, Option<String>)>>>) {
        let connector = FakeConnector::default();
        let connected = Rc::clone(&connector.connected);
        let session = Session::new(
            &Config::default(),
            Box::new(connector),
            Box::new(ScriptedPrompt::new(answers)),
        );
        (session, connected)
    }

    const ADDRESS: &str = "0x742d35cc6634c0532925a3b844bc454e4438f44e";

    #[test]
    fn test_wallets_has_no_handler() {
        assert!(handler_for(CommandKind::Wallets).is_none());
        for kind in [
            CommandKind::Help,
            CommandKind::Init,
            CommandKind::Read,
            CommandKind::CommandStory,
        ] {
            assert!(handler_for(kind).is_some(), "{} should be dispatched", kind);
        }
    }

    #[tokio::test]
    async fn test_wallets_reports_unknown_command() {
        let (mut session, _) = new_session(&[]);
        for line in ["wallets", "-w"] {
            assert!(matches!(
                session.handle_line(line).await,
                Err(ConsoleError::UnknownCommand(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_unknown_command_is_still_recorded() {
        let (mut session, _) = new_session(&[]);
        let result = session.handle_line("frobnicate -x 1").await;
        assert!(matches!(result, Err(ConsoleError::UnknownCommand(_))));
        assert_eq!(session.history.len(), 1);
    }

    #[tokio::test]
    async fn test_input_errors_are_classified() {
        let (mut session, _) = new_session(&[]);
        assert!(session.handle_line("  ").await.unwrap_err().is_input_error());
        assert!(session.handle_line("read value").await.unwrap_err().is_input_error());
        assert!(session.history.is_empty());
    }

    #[tokio::test]
    async fn test_read_before_init_short_circuits() {
        let (mut session, _) = new_session(&[]);
        session.handle_line("read -m decimals").await.unwrap();
        assert!(session.contract.is_none());
    }

    #[tokio::test]
    async fn test_init_with_flags_then_read() {
        let (mut session, connected) = new_session(&[]);
        let line = format!("init -n 31 -c {} -pa ./erc20.json", ADDRESS);
        session.handle_line(&line).await.unwrap();

        {
            let connected = connected.borrow();
            assert_eq!(connected.len(), 1);
            assert_eq!(connected[0].0, 31);
            assert_eq!(connected[0].2.as_deref(), Some("./erc20.json"));
        }

        session.handle_line("-r -m 2").await.unwrap();
        assert!(session.contract.is_some());
    }

    #[tokio::test]
    async fn test_init_prompts_for_missing_values() {
        let (mut session, connected) = new_session(&["30", ADDRESS, ""]);
        session.handle_line("-i").await.unwrap();

        let connected = connected.borrow();
        assert_eq!(connected[0].0, 30);
        assert_eq!(connected[0].2, None);
    }

    #[tokio::test]
    async fn test_failed_init_keeps_previous_contract() {
        let (mut session, connected) = new_session(&[]);
        session
            .handle_line(&format!("init -n 31 -c {} -pa a.json", ADDRESS))
            .await
            .unwrap();

        let result = session.handle_line("-i -n 31 -c 0x1234 -pa a.json").await;
        assert!(matches!(result, Err(ConsoleError::InvalidAddress(_))));
        assert!(session.contract.is_some());

        let result = session.handle_line("-i -n 5 -c 0x1234").await;
        assert!(matches!(result, Err(ConsoleError::UnknownNetwork(_))));
        assert_eq!(connected.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_handler_errors_do_not_stop_the_loop() {
        let (mut session, _) = new_session(&["read -m allowance -a 0xabc", "help", "command_story -d true"]);
        session
            .handle_line(&format!("init -n 31 -c {} -pa a.json", ADDRESS))
            .await
            .unwrap();

        session.run().await.unwrap();

        // init, read, help, command_story: every parsed line is on record once.
        let names: Vec<&str> = session
            .history
            .list(true)
            .iter()
            .map(|i| i.command.as_str())
            .collect();
        assert_eq!(names, vec!["init", "read", "help", "command_story"]);
    }

    #[tokio::test]
    async fn test_second_read_with_other_args_is_not_in_history() {
        let (mut session, _) = new_session(&[]);
        session
            .handle_line(&format!("init -n 31 -c {} -pa a.json", ADDRESS))
            .await
            .unwrap();
        session.handle_line("read -m 1").await.unwrap();
        session.handle_line("read -m 2").await.unwrap();

        let story = render_story(&session.registry, &session.history.list(false));
        assert!(story.contains("method   1"));
        assert!(!story.contains("method   2"));
    }
}
