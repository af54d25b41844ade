use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use ethers::abi::param_type::Reader;
use ethers::abi::token::{LenientTokenizer, Tokenizer};
use ethers::abi::{Abi, Function, Token};
use ethers::prelude::*;
use ethers::types::transaction::eip2718::TypedTransaction;
use log::{debug, info};

use crate::types::method::{CallArg, MethodDescriptor};
use crate::types::network::NetworkConfig;
use crate::utils::abi;

/// Read access to one deployed contract.
#[async_trait(?Send)]
pub trait ContractReader {
    /// Read methods in ABI declaration order.
    fn read_methods(&self) -> Vec<MethodDescriptor>;

    /// Calls the overload described by `method`.
    async fn call_read_method(&self, method: &MethodDescriptor, args: &[CallArg]) -> Result<Vec<Token>>;
}

/// Opens a [`ContractReader`] for a contract on a network.
#[async_trait(?Send)]
pub trait ContractConnector {
    async fn connect(
        &self,
        network: &NetworkConfig,
        address: Address,
        path_abi: Option<&str>,
    ) -> Result<Box<dyn ContractReader>>;
}

pub struct EthClient {
    provider: Arc<Provider<Http>>,
    address: Address,
    abi: Abi,
    methods: Vec<MethodDescriptor>,
}

impl EthClient {
    pub fn new(network: &NetworkConfig, address: Address, abi_json: &str) -> Result<Self> {
        let provider = Provider::<Http>::try_from(network.rpc_url.as_str())
            .map_err(|e| anyhow!("Failed to connect to RPC: {}", e))?;
        let abi: Abi = serde_json::from_str(abi_json).context("Failed to parse ABI")?;
        let methods = abi::read_methods(abi_json)?;

        Ok(Self {
            provider: Arc::new(provider),
            address,
            abi,
            methods,
        })
    }

    /// The ABI function behind `method`, telling overloads apart by their
    /// input types.
    fn function_for(&self, method: &MethodDescriptor) -> Result<&Function> {
        let overloads = self
            .abi
            .functions_by_name(&method.name)
            .map_err(|e| anyhow!("Method {} not found in ABI: {}", method.name, e))?;

        overloads
            .iter()
            .find(|function| {
                function.inputs.len() == method.inputs.len()
                    && function
                        .inputs
                        .iter()
                        .zip(&method.inputs)
                        .all(|(param, descriptor)| {
                            Reader::read(&descriptor.kind).is_ok_and(|kind| kind == param.kind)
                        })
            })
            .or_else(|| {
                overloads
                    .iter()
                    .find(|function| function.inputs.len() == method.inputs.len())
            })
            .ok_or_else(|| {
                anyhow!(
                    "No overload of {} takes ({})",
                    method.name,
                    method.inputs_label()
                )
            })
    }

    fn encode_args(function: &Function, args: &[CallArg]) -> Result<Vec<Token>> {
        if function.inputs.len() != args.len() {
            return Err(anyhow!(
                "{} expects {} argument(s), got {}",
                function.name,
                function.inputs.len(),
                args.len()
            ));
        }

        function
            .inputs
            .iter()
            .zip(args)
            .map(|(param, arg)| match arg {
                CallArg::Uint(value) => Ok(Token::Uint(*value)),
                CallArg::Raw(raw) => LenientTokenizer::tokenize(&param.kind, raw)
                    .map_err(|e| anyhow!("Invalid value `{}` for {}: {}", raw, param.name, e)),
            })
            .collect()
    }
}

#[async_trait(?Send)]
impl ContractReader for EthClient {
    fn read_methods(&self) -> Vec<MethodDescriptor> {
        self.methods.clone()
    }

    async fn call_read_method(&self, method: &MethodDescriptor, args: &[CallArg]) -> Result<Vec<Token>> {
        let function = self.function_for(method)?;
        let name = &method.name;

        let tokens = Self::encode_args(function, args)?;
        let data = function
            .encode_input(&tokens)
            .map_err(|e| anyhow!("Failed to encode call to {}: {}", name, e))?;

        let tx: TypedTransaction = TransactionRequest::new().to(self.address).data(data).into();
        debug!("eth_call {} on {:?}", name, self.address);

        let raw = self
            .provider
            .call(&tx, None)
            .await
            .map_err(|e| anyhow!("Call to {} failed: {}", name, e))?;

        function
            .decode_output(raw.as_ref())
            .map_err(|e| anyhow!("Failed to decode {} output: {}", name, e))
    }
}

/// Connects through the network's RPC, loading the ABI from a file or the
/// network's explorer.
pub struct EthConnector {
    pub explorer_api_key: Option<String>,
}

#[async_trait(?Send)]
impl ContractConnector for EthConnector {
    async fn connect(
        &self,
        network: &NetworkConfig,
        address: Address,
        path_abi: Option<&str>,
    ) -> Result<Box<dyn ContractReader>> {
        let address_hex = format!("{:?}", address);
        let abi_json = abi::load_abi(
            network,
            &address_hex,
            path_abi,
            self.explorer_api_key.as_deref(),
        )
        .await?;

        let client = EthClient::new(network, address, &abi_json)?;
        info!(
            "connected to {} at {} ({} read methods)",
            network.name,
            network.rpc_url,
            client.methods.len()
        );
        Ok(Box::new(client))
    }
}
