//! JSON-RPC client for an Ethereum node

use std::time::Duration;

use alloy_primitives::Address;
use anyhow::{anyhow, Context, Result};
use serde_json::{json, Value};
use tracing::debug;

use crate::config::Config;

/// Minimal JSON-RPC 2.0 client over HTTP.
#[derive(Clone, Debug)]
pub struct RpcClient {
    http: reqwest::Client,
    url: String,
}

impl RpcClient {
    /// Build a client for the configured endpoint.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { http, url: config.rpc_url.clone() })
    }

    /// Endpoint this client talks to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issue one JSON-RPC call and extract its `result` field.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value> {
        let request = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        });
        debug!(method, "sending JSON-RPC request");

        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .json::<Value>()
            .await?;

        if let Some(error) = response.get("error") {
            return Err(anyhow!("RPC error from {method}: {error}"));
        }
        response
            .get("result")
            .cloned()
            .ok_or_else(|| anyhow!("no result in {method} response"))
    }

    /// Chain ID of the connected node.
    pub async fn chain_id(&self) -> Result<u64> {
        let result = self.call("eth_chainId", json!([])).await?;
        parse_hex_quantity(&result).context("invalid eth_chainId response")
    }

    /// `eth_call` against `to` with raw calldata, at the latest block.
    pub async fn eth_call(&self, to: Address, calldata: Vec<u8>) -> Result<Vec<u8>> {
        let params = json!([
            {
                "to": to.to_string(),
                "data": format!("0x{}", hex::encode(&calldata)),
            },
            "latest"
        ]);
        let result = self.call("eth_call", params).await?;
        let data = result
            .as_str()
            .ok_or_else(|| anyhow!("eth_call result is not a string"))?;
        hex::decode(data.trim_start_matches("0x")).context("eth_call returned invalid hex")
    }
}

/// Parse a JSON-RPC hex quantity (`"0x1a4"`).
fn parse_hex_quantity(value: &Value) -> Result<u64> {
    let s = value
        .as_str()
        .ok_or_else(|| anyhow!("quantity is not a string"))?;
    u64::from_str_radix(s.trim_start_matches("0x"), 16)
        .with_context(|| format!("malformed hex quantity {s:?}"))
}

/// Human-readable name for well-known chain IDs.
pub fn network_name(chain_id: u64) -> String {
    match chain_id {
        1 => "Ethereum Mainnet".to_string(),
        10 => "Optimism".to_string(),
        137 => "Polygon".to_string(),
        42161 => "Arbitrum One".to_string(),
        11155111 => "Sepolia Testnet".to_string(),
        other => format!("unknown (chain id {other})"),
    }
}
