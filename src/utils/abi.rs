use std::fs;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use serde::Deserialize;
use serde_json::Value;

use crate::types::method::{MethodDescriptor, ParamDescriptor};
use crate::types::network::NetworkConfig;

#[derive(Debug, Deserialize)]
struct AbiEntry {
    #[serde(rename = "type", default = "default_entry_type")]
    entry_type: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    inputs: Vec<ParamDescriptor>,
    #[serde(default)]
    outputs: Vec<ParamDescriptor>,
    #[serde(rename = "stateMutability")]
    state_mutability: Option<String>,
    #[serde(default)]
    constant: bool,
}

fn default_entry_type() -> String {
    "function".to_string()
}

impl AbiEntry {
    fn is_read_method(&self) -> bool {
        if self.entry_type != "function" {
            return false;
        }
        match self.state_mutability.as_deref() {
            Some(mutability) => mutability == "view" || mutability == "pure",
            None => self.constant,
        }
    }
}

/// Read methods of an ABI document, in declaration order.
pub fn read_methods(abi_json: &str) -> Result<Vec<MethodDescriptor>> {
    let entries: Vec<AbiEntry> =
        serde_json::from_str(abi_json).context("ABI is not a JSON array of entries")?;

    Ok(entries
        .into_iter()
        .filter(AbiEntry::is_read_method)
        .map(|entry| MethodDescriptor {
            name: entry.name,
            inputs: entry.inputs,
            outputs: entry.outputs,
        })
        .collect())
}

/// Extracts the ABI carried in an explorer `getabi` response.
///
/// The explorer wraps the ABI as a JSON string in `result`; on failure the
/// same field carries the error text.
pub fn parse_explorer_response(body: &Value) -> Result<String> {
    let result = body
        .get("result")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("Explorer response has no `result` field"))?;

    match serde_json::from_str::<Value>(result) {
        Ok(Value::Array(_)) => Ok(result.to_string()),
        _ => {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unexpected response");
            Err(anyhow!("Explorer did not return an ABI: {} ({})", message, result))
        }
    }
}

/// Loads the ABI JSON for a contract, from `path_abi` when given, otherwise
/// from the network's explorer.
pub async fn load_abi(
    network: &NetworkConfig,
    address: &str,
    path_abi: Option<&str>,
    api_key: Option<&str>,
) -> Result<String> {
    if let Some(path) = path_abi {
        debug!("reading ABI from {}", path);
        return fs::read_to_string(path).with_context(|| format!("Failed to read ABI file {}", path));
    }

    let abi_url = network
        .abi_url
        .as_ref()
        .ok_or_else(|| anyhow!("{} has no ABI endpoint, pass --path_abi", network.name))?;

    let mut url = format!("{}{}", abi_url, address);
    if let Some(key) = api_key {
        url.push_str("&apikey=");
        url.push_str(key);
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message(format!("Fetching ABI from {}", network.name));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let response = reqwest::Client::new()
        .get(&url)
        .header(reqwest::header::USER_AGENT, "contract-console")
        .send()
        .await;
    spinner.finish_and_clear();

    let body: Value = response
        .context("Failed to reach the explorer")?
        .json()
        .await
        .context("Explorer returned invalid JSON")?;

    let abi = parse_explorer_response(&body)?;
    info!("fetched ABI for {} from {}", address, network.name);
    Ok(abi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    const ERC20_ABI: &str = r#"[
        {"type":"constructor","inputs":[{"name":"supply","type":"uint256"}]},
        {"type":"function","name":"name","inputs":[],"outputs":[{"name":"","type":"string"}],"stateMutability":"view"},
        {"type":"function","name":"transfer","inputs":[{"name":"to","type":"address"},{"name":"amount","type":"uint256"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable"},
        {"type":"event","name":"Transfer","inputs":[{"name":"from","type":"address","indexed":true}],"anonymous":false},
        {"type":"function","name":"balanceOf","inputs":[{"name":"account","type":"address"}],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
        {"name":"decimals","inputs":[],"outputs":[{"name":"","type":"uint8"}],"constant":true},
        {"type":"function","name":"add","inputs":[{"name":"a","type":"uint256"},{"name":"b","type":"uint256"}],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"pure"}
    ]"#;

    #[test]
    fn test_read_methods_keep_declaration_order() {
        let methods = read_methods(ERC20_ABI).unwrap();
        let names: Vec<&str> = methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["name", "balanceOf", "decimals", "add"]);
        assert_eq!(methods[1].inputs, vec![ParamDescriptor::new("account", "address")]);
        assert_eq!(methods[2].outputs, vec![ParamDescriptor::new("", "uint8")]);
    }

    #[test]
    fn test_read_methods_rejects_non_array() {
        assert!(read_methods(r#"{"abi": []}"#).is_err());
    }

    #[test]
    fn test_parse_explorer_response() {
        let ok = json!({"status": "1", "message": "OK", "result": "[{\"type\":\"function\"}]"});
        assert_eq!(parse_explorer_response(&ok).unwrap(), "[{\"type\":\"function\"}]");

        let unverified = json!({
            "status": "0",
            "message": "NOTOK",
            "result": "Contract source code not verified"
        });
        let err = parse_explorer_response(&unverified).unwrap_err();
        assert!(err.to_string().contains("not verified"));

        assert!(parse_explorer_response(&json!({"status": "1"})).is_err());
    }

    #[tokio::test]
    async fn test_load_abi_prefers_local_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(ERC20_ABI.as_bytes())?;
        let path = file.path().to_string_lossy().to_string();

        let network = crate::types::network::Network::ShibariumPuppy.get_config();
        let abi = load_abi(&network, "0x0", Some(&path), None).await?;
        assert_eq!(read_methods(&abi)?.len(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn test_load_abi_without_endpoint_or_file_fails() {
        let network = crate::types::network::Network::ShibariumPuppy.get_config();
        let err = load_abi(&network, "0x0", None, None).await.unwrap_err();
        assert!(err.to_string().contains("--path_abi"));
    }
}
