use async_trait::async_trait;
use console::style;
use ethers::types::Address;
use log::info;
use std::str::FromStr;

use crate::interactive::{CommandHandler, Session};
use crate::types::command::Flag;
use crate::types::error::{ConsoleError, Result};
use crate::types::invocation::{ArgValue, ParsedInvocation};
use crate::types::network::NetworkConfig;
use crate::utils::table::TableBuilder;

pub struct InitCommand;

#[async_trait(?Send)]
impl CommandHandler for InitCommand {
    async fn handle(&self, session: &mut Session, invocation: &ParsedInvocation) -> Result<()> {
        let chain_id = match invocation.flag(Flag::Network) {
            Some(value) => scalar(value, ConsoleError::UnknownNetwork)?,
            None => {
                print_networks(&session.networks);
                session.prompt.ask("Enter chain_id: ")?
            }
        };
        let network = select_network(&session.networks, chain_id.trim(), session.default_chain_id)?
            .clone();

        let address = match invocation.flag(Flag::Contract) {
            Some(value) => scalar(value, ConsoleError::InvalidAddress)?,
            None => session.prompt.ask("Enter contract_address: ")?,
        };
        let address = parse_contract_address(address.trim())?;

        let path_abi = match invocation.flag(Flag::PathAbi) {
            Some(value) => scalar(value, |raw| {
                ConsoleError::External(anyhow::anyhow!("Invalid ABI path: {}", raw))
            })?,
            None => session.prompt.ask("Enter path_abi or leave empty: ")?,
        };
        let path_abi = Some(path_abi.trim()).filter(|path| !path.is_empty());

        let contract = session.connector.connect(&network, address, path_abi).await?;
        let method_count = contract.read_methods().len();
        session.contract = Some(contract);

        info!("initialized {:?} on chain {}", address, network.chain_id);
        println!(
            "{} Contract {:?} initialized on {} ({} read methods)",
            style("✓").green().bold(),
            address,
            style(&network.name).bold(),
            method_count
        );
        Ok(())
    }
}

/// Picks a network by chain id; an empty answer falls back to `default`.
pub fn select_network<'a>(
    networks: &'a [NetworkConfig],
    chain_id: &str,
    default: Option<u64>,
) -> Result<&'a NetworkConfig> {
    let unknown = || ConsoleError::UnknownNetwork(chain_id.to_string());

    let chain_id = match (chain_id.is_empty(), default) {
        (true, Some(default)) => default,
        _ => chain_id.parse::<u64>().map_err(|_| unknown())?,
    };

    networks
        .iter()
        .find(|network| network.chain_id == chain_id)
        .ok_or_else(unknown)
}

/// Accepts a `0x`-prefixed, 42 character contract address.
pub fn parse_contract_address(raw: &str) -> Result<Address> {
    if raw.len() != 42 || !raw.starts_with("0x") {
        return Err(ConsoleError::InvalidAddress(raw.to_string()));
    }
    Address::from_str(raw).map_err(|_| ConsoleError::InvalidAddress(raw.to_string()))
}

fn scalar(value: &ArgValue, error: impl FnOnce(String) -> ConsoleError) -> Result<String> {
    value
        .as_single()
        .map(str::to_string)
        .ok_or_else(|| error(value.to_string()))
}

fn print_networks(networks: &[NetworkConfig]) {
    println!("Choose one of the networks:");

    let mut table = TableBuilder::new();
    table.add_header(&["[chain_id]", "name"]);
    for network in networks {
        let chain_id = format!("[{}]", network.chain_id);
        table.add_row(&[chain_id.as_str(), network.name.as_str()]);
    }
    table.print();
}
