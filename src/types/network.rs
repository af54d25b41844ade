use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub chain_id: u64,
    pub name: String,
    pub rpc_url: String,
    /// Explorer `getabi` endpoint, the contract address is appended to it.
    pub abi_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    EthereumMainnet,
    EthereumSepolia,
    EthereumHolesky,
    BscTestnet,
    BaseSepolia,
    ShibariumPuppy,
    RootStockMainnet,
    RootStockTestnet,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::EthereumMainnet => write!(f, "Ethereum Mainnet"),
            Network::EthereumSepolia => write!(f, "Ethereum Sepolia"),
            Network::EthereumHolesky => write!(f, "Ethereum Holesky"),
            Network::BscTestnet => write!(f, "BSC Testnet"),
            Network::BaseSepolia => write!(f, "Base Sepolia"),
            Network::ShibariumPuppy => write!(f, "Shibarium Puppy"),
            Network::RootStockMainnet => write!(f, "Rootstock Mainnet"),
            Network::RootStockTestnet => write!(f, "Rootstock Testnet"),
        }
    }
}

impl Network {
    pub const ALL: [Network; 8] = [
        Network::EthereumMainnet,
        Network::EthereumSepolia,
        Network::EthereumHolesky,
        Network::BscTestnet,
        Network::BaseSepolia,
        Network::ShibariumPuppy,
        Network::RootStockMainnet,
        Network::RootStockTestnet,
    ];

    pub fn chain_id(&self) -> u64 {
        match self {
            Network::EthereumMainnet => 1,
            Network::EthereumSepolia => 11155111,
            Network::EthereumHolesky => 17000,
            Network::BscTestnet => 97,
            Network::BaseSepolia => 84532,
            Network::ShibariumPuppy => 157,
            Network::RootStockMainnet => 30,
            Network::RootStockTestnet => 31,
        }
    }

    pub fn get_config(&self) -> NetworkConfig {
        let (rpc_url, abi_url) = match self {
            Network::EthereumMainnet => (
                "https://eth.llamarpc.com",
                Some("https://api.etherscan.io/api?module=contract&action=getabi&address="),
            ),
            Network::EthereumSepolia => (
                "https://ethereum-sepolia-rpc.publicnode.com",
                Some("https://api-sepolia.etherscan.io/api?module=contract&action=getabi&address="),
            ),
            Network::EthereumHolesky => (
                "https://ethereum-holesky.blockpi.network/v1/rpc/public",
                Some("https://api-holesky.etherscan.io/api?module=contract&action=getabi&address="),
            ),
            Network::BscTestnet => (
                "https://bsc-testnet-rpc.publicnode.com",
                Some("https://api-testnet.bscscan.com/api?module=contract&action=getabi&address="),
            ),
            Network::BaseSepolia => (
                "https://sepolia.base.org",
                Some("https://api-sepolia.basescan.org/api?module=contract&action=getabi&address="),
            ),
            Network::ShibariumPuppy => ("https://puppynet.shibrpc.com", None),
            Network::RootStockMainnet => (
                "https://public-node.rsk.co",
                Some("https://rootstock.blockscout.com/api?module=contract&action=getabi&address="),
            ),
            Network::RootStockTestnet => (
                "https://public-node.testnet.rsk.co",
                Some(
                    "https://rootstock-testnet.blockscout.com/api?module=contract&action=getabi&address=",
                ),
            ),
        };

        NetworkConfig {
            chain_id: self.chain_id(),
            name: self.to_string(),
            rpc_url: rpc_url.to_string(),
            abi_url: abi_url.map(str::to_string),
        }
    }

    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.chain_id() == chain_id)
    }
}

/// Every known network, in display order.
pub fn list_network_configs() -> Vec<NetworkConfig> {
    Network::ALL.iter().map(Network::get_config).collect()
}
