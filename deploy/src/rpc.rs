//! Minimal JSON-RPC access to the target node.
//!
//! Only `system_chain` is needed: the testnet guard checks the chain the
//! node says it runs, not just the label in `deploy.toml`.

use std::time::Duration;

use log::debug;
use serde::Deserialize;
use serde_json::json;

use crate::error::{Error, Result};

/// Queries a node for its identity.
pub trait NodeRpc {
    /// Chain name from the node's chain spec, e.g. `"Shibuya Testnet"`.
    fn system_chain(&self, url: &str) -> Result<String>;
}

/// [`NodeRpc`] over plain HTTP JSON-RPC.
///
/// Substrate nodes answer HTTP on their websocket port, so `ws://` and
/// `wss://` endpoints are rewritten to `http://` and `https://`.
pub struct HttpNodeRpc {
    agent: ureq::Agent,
}

impl Default for HttpNodeRpc {
    fn default() -> Self {
        Self { agent: ureq::AgentBuilder::new().timeout(Duration::from_secs(30)).build() }
    }
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<String>,
    error: Option<serde_json::Value>,
}

pub fn http_endpoint(url: &str) -> String {
    if let Some(rest) = url.strip_prefix("wss://") {
        format!("https://{rest}")
    } else if let Some(rest) = url.strip_prefix("ws://") {
        format!("http://{rest}")
    } else {
        url.to_string()
    }
}

fn parse_system_chain(body: &str) -> Result<String> {
    let response: RpcResponse = serde_json::from_str(body)?;
    if let Some(error) = response.error {
        return Err(Error::Rpc(format!("system_chain returned error: {error}")))
    }
    response.result.ok_or_else(|| Error::Rpc("system_chain returned no result".to_string()))
}

impl NodeRpc for HttpNodeRpc {
    fn system_chain(&self, url: &str) -> Result<String> {
        let endpoint = http_endpoint(url);
        debug!("system_chain via {endpoint}");

        let request_body =
            json!({ "jsonrpc": "2.0", "method": "system_chain", "params": [], "id": 1 }).to_string();
        let response = self
            .agent
            .post(&endpoint)
            .set("content-type", "application/json")
            .send_string(&request_body)
            .map_err(|error| match error {
                ureq::Error::Status(status, _) => {
                    Error::Rpc(format!("{endpoint} returned status {status}"))
                }
                ureq::Error::Transport(transport) => {
                    Error::Rpc(format!("{endpoint} unreachable: {transport}"))
                }
            })?;

        parse_system_chain(&response.into_string()?)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::Cell;

    use super::*;

    /// Reports a fixed chain name and counts queries.
    pub(crate) struct FixedChain {
        pub name: &'static str,
        pub queries: Cell<usize>,
    }

    impl FixedChain {
        pub(crate) fn new(name: &'static str) -> Self {
            Self { name, queries: Cell::new(0) }
        }
    }

    impl NodeRpc for FixedChain {
        fn system_chain(&self, _url: &str) -> Result<String> {
            self.queries.set(self.queries.get() + 1);
            Ok(self.name.to_string())
        }
    }

    #[test]
    fn websocket_urls_map_to_http() {
        assert_eq!(http_endpoint("ws://127.0.0.1:9944"), "http://127.0.0.1:9944");
        assert_eq!(
            http_endpoint("wss://rpc.shibuya.astar.network"),
            "https://rpc.shibuya.astar.network"
        );
        assert_eq!(http_endpoint("http://localhost:9933"), "http://localhost:9933");
    }

    #[test]
    fn system_chain_response_parsing() {
        assert_eq!(
            parse_system_chain(r#"{"jsonrpc":"2.0","result":"Shibuya Testnet","id":1}"#).unwrap(),
            "Shibuya Testnet"
        );
        assert!(matches!(
            parse_system_chain(
                r#"{"jsonrpc":"2.0","error":{"code":-32601,"message":"Method not found"},"id":1}"#
            ),
            Err(Error::Rpc(_))
        ));
        assert!(matches!(parse_system_chain(r#"{"jsonrpc":"2.0","id":1}"#), Err(Error::Rpc(_))));
        assert!(matches!(parse_system_chain("<html>"), Err(Error::Json(_))));
    }
}
