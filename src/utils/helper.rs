use ethers::abi::Token;
use ethers::types::{I256, U256};
use ethers::utils::to_checksum;

/// Decimals of the fixed-point token amounts shown next to `uint256` results.
pub const TOKEN_DECIMALS: usize = 18;

pub struct Helper;

impl Helper {
    /// Renders a decoded ABI token the way it is shown to the user.
    pub fn format_token(token: &Token) -> String {
        match token {
            Token::Address(address) => to_checksum(address, None),
            Token::FixedBytes(bytes) | Token::Bytes(bytes) => format!("0x{}", hex::encode(bytes)),
            Token::Int(raw) => I256::from_raw(*raw).to_string(),
            Token::Uint(value) => value.to_string(),
            Token::Bool(value) => value.to_string(),
            Token::String(value) => value.clone(),
            Token::FixedArray(items) | Token::Array(items) => {
                format!("[{}]", Self::format_tokens(items))
            }
            Token::Tuple(items) => format!("({})", Self::format_tokens(items)),
        }
    }

    pub fn format_tokens(tokens: &[Token]) -> String {
        tokens
            .iter()
            .map(Self::format_token)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `value / 10^18`, rounded half up to two decimals.
    pub fn format_token_amount(value: U256) -> String {
        let divisor = U256::exp10(TOKEN_DECIMALS - 2);
        let half = divisor / 2;
        let cents = value.saturating_add(half) / divisor;
        let hundred = U256::from(100u8);
        format!("{}.{:02}", cents / hundred, (cents % hundred).as_u64())
    }
}
