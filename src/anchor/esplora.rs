//! Esplora REST client (blockstream.info, mempool.space)

use crate::anchor::ledger::{LedgerError, LedgerQuery, TransactionInfo};
use crate::config::ExplorerConfig;
use crate::core::{
    error::{DftsError, Result},
    types::{AnchorStatus, Network},
};
use serde::Deserialize;
use std::time::Duration;

/// Transaction as returned by `GET /tx/:txid`
#[derive(Debug, Deserialize)]
struct EsploraTx {
    #[serde(default)]
    vout: Vec<EsploraOutput>,
    #[serde(default)]
    status: EsploraStatus,
}

#[derive(Debug, Deserialize)]
struct EsploraOutput {
    #[serde(default)]
    scriptpubkey: String,
}

#[derive(Debug, Default, Deserialize)]
struct EsploraStatus {
    #[serde(default)]
    confirmed: bool,
    block_height: Option<u64>,
}

impl TryFrom<EsploraTx> for TransactionInfo {
    type Error = LedgerError;

    fn try_from(tx: EsploraTx) -> std::result::Result<Self, Self::Error> {
        let status = match (tx.status.confirmed, tx.status.block_height) {
            (true, Some(block_height)) => AnchorStatus::Confirmed { block_height },
            (true, None) => {
                return Err(LedgerError::Decode {
                    reason: "confirmed transaction without block_height".to_string(),
                })
            },
            (false, _) => AnchorStatus::Unconfirmed,
        };
        Ok(TransactionInfo {
            output_scripts: tx.vout.into_iter().map(|o| o.scriptpubkey).collect(),
            status,
        })
    }
}

/// Blocking HTTP client for Esplora-compatible explorers
pub struct EsploraClient {
    client: reqwest::blocking::Client,
    config: ExplorerConfig,
}

impl EsploraClient {
    /// Create a client using the explorer settings from configuration
    pub fn new(config: ExplorerConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("dfts/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DftsError::NetworkError {
                reason: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client, config })
    }

    /// URL of the transaction endpoint for `txid` on `network`
    pub fn transaction_url(&self, network: Network, txid: &str) -> String {
        format!(
            "{}/tx/{}",
            self.config.base_url(network).trim_end_matches('/'),
            txid
        )
    }
}

impl LedgerQuery for EsploraClient {
    fn fetch_transaction(
        &self,
        network: Network,
        txid: &str,
    ) -> std::result::Result<TransactionInfo, LedgerError> {
        let url = self.transaction_url(network, txid);
        tracing::debug!(%url, "querying ledger");

        let response = self.client.get(&url).send().map_err(|e| {
            if e.is_timeout() {
                LedgerError::Timeout
            } else {
                LedgerError::Transport {
                    reason: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LedgerError::NotFound);
        }
        if !status.is_success() {
            return Err(LedgerError::Status {
                status: status.as_u16(),
            });
        }

        let tx: EsploraTx = response.json().map_err(|e| {
            if e.is_timeout() {
                LedgerError::Timeout
            } else {
                LedgerError::Decode {
                    reason: e.to_string(),
                }
            }
        })?;

        TransactionInfo::try_from(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    const TXID: &str = "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b";

    fn parse(json: &str) -> std::result::Result<TransactionInfo, LedgerError> {
        let tx: EsploraTx = serde_json::from_str(json).unwrap();
        TransactionInfo::try_from(tx)
    }

    /// Serve a single canned HTTP response on a loopback port
    fn serve_once(status_line: &str, body: &str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );

        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        format!("http://{}", addr)
    }

    fn local_client(base_url: String, timeout: Duration) -> EsploraClient {
        let client = reqwest::blocking::Client::builder()
            .no_proxy()
            .timeout(timeout)
            .build()
            .unwrap();
        let config = ExplorerConfig {
            testnet_url: base_url,
            ..ExplorerConfig::default()
        };
        EsploraClient { client, config }
    }

    fn fetch(status_line: &str, body: &str) -> std::result::Result<TransactionInfo, LedgerError> {
        let client = local_client(serve_once(status_line, body), Duration::from_secs(5));
        client.fetch_transaction(Network::Testnet, TXID)
    }

    #[test]
    fn test_parse_confirmed_transaction() {
        let json = r#"{
            "txid": "ab",
            "vout": [
                {"scriptpubkey": "0014deadbeef", "value": 1000},
                {"scriptpubkey": "6a20aabb", "value": 0}
            ],
            "status": {"confirmed": true, "block_height": 2500000, "block_hash": "00"}
        }"#;
        let info = parse(json).unwrap();
        assert_eq!(info.output_scripts, vec!["0014deadbeef", "6a20aabb"]);
        assert_eq!(info.status, AnchorStatus::Confirmed { block_height: 2500000 });
    }

    #[test]
    fn test_parse_mempool_transaction() {
        let json = r#"{"vout": [{"scriptpubkey": "6a"}], "status": {"confirmed": false}}"#;
        assert_eq!(parse(json).unwrap().status, AnchorStatus::Unconfirmed);
    }

    #[test]
    fn test_confirmed_without_height_is_rejected() {
        let err = parse(r#"{"vout": [], "status": {"confirmed": true}}"#).unwrap_err();
        assert!(matches!(err, LedgerError::Decode { .. }));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_transaction_url_per_network() {
        let client = EsploraClient::new(ExplorerConfig::default()).unwrap();
        assert_eq!(
            client.transaction_url(Network::Testnet, "ff"),
            "https://blockstream.info/testnet/api/tx/ff"
        );
        assert_eq!(
            client.transaction_url(Network::Mainnet, "ff"),
            "https://blockstream.info/api/tx/ff"
        );
        assert_eq!(
            client.transaction_url(Network::Signet, "ff"),
            "https://mempool.space/signet/api/tx/ff"
        );
    }

    #[test]
    fn test_fetch_confirmed_transaction() {
        let body = r#"{"vout":[{"scriptpubkey":"6a20aabb"}],"status":{"confirmed":true,"block_height":42}}"#;
        let info = fetch("200 OK", body).unwrap();
        assert_eq!(info.output_scripts, vec!["6a20aabb"]);
        assert_eq!(info.status, AnchorStatus::Confirmed { block_height: 42 });
    }

    #[test]
    fn test_fetch_missing_transaction() {
        let err = fetch("404 Not Found", "Transaction not found").unwrap_err();
        assert_eq!(err, LedgerError::NotFound);
        assert!(!err.is_retryable());
    }

    #[rstest]
    #[case("500 Internal Server Error", 500, true)]
    #[case("503 Service Unavailable", 503, true)]
    #[case("429 Too Many Requests", 429, true)]
    #[case("400 Bad Request", 400, false)]
    fn test_fetch_error_status(
        #[case] status_line: &str,
        #[case] code: u16,
        #[case] retryable: bool,
    ) {
        let err = fetch(status_line, "").unwrap_err();
        assert_eq!(err, LedgerError::Status { status: code });
        assert_eq!(err.is_retryable(), retryable);
    }

    #[test]
    fn test_fetch_non_json_body() {
        let err = fetch("200 OK", "not json!").unwrap_err();
        assert!(matches!(err, LedgerError::Decode { .. }));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_fetch_confirmed_without_height() {
        let err = fetch("200 OK", r#"{"vout":[],"status":{"confirmed":true}}"#).unwrap_err();
        assert!(matches!(err, LedgerError::Decode { .. }));
    }

    #[test]
    fn test_fetch_times_out() {
        // Accepts connections into the backlog but never answers
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let client = local_client(base_url, Duration::from_millis(300));

        let err = client.fetch_transaction(Network::Testnet, TXID).unwrap_err();
        assert_eq!(err, LedgerError::Timeout);
        assert!(err.is_retryable());
        drop(listener);
    }
}
