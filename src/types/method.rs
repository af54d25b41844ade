use ethers::types::U256;
use serde::Deserialize;

pub const UINT256: &str = "uint256";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParamDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ParamDescriptor {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }

    pub fn is_uint256(&self) -> bool {
        self.kind == UINT256
    }
}

/// A read-only contract method as listed from the ABI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub name: String,
    pub inputs: Vec<ParamDescriptor>,
    pub outputs: Vec<ParamDescriptor>,
}

impl MethodDescriptor {
    pub fn inputs_label(&self) -> String {
        join_params(&self.inputs)
    }

    pub fn outputs_label(&self) -> String {
        join_params(&self.outputs)
    }
}

fn join_params(params: &[ParamDescriptor]) -> String {
    params
        .iter()
        .map(|p| format!("{}: {}", p.name, p.kind))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Argument handed to the contract reader after coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallArg {
    Uint(U256),
    /// Passed through untouched, the reader tokenizes it against the ABI type.
    Raw(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        let method = MethodDescriptor {
            name: "allowance".into(),
            inputs: vec![
                ParamDescriptor::new("owner", "address"),
                ParamDescriptor::new("spender", "address"),
            ],
            outputs: vec![ParamDescriptor::new("", "uint256")],
        };
        assert_eq!(method.inputs_label(), "owner: address, spender: address");
        assert_eq!(method.outputs_label(), ": uint256");
    }
}
