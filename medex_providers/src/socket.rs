//! Client for a Stanford NER style line server.
//!
//! One request per connection: the space-joined tokens and a newline go out,
//! one line of `token/LABEL` pairs comes back.

use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info};

use medex_core::{Error, NerBackend, NerConfig, Result, TaggedToken};

use crate::retry::retry_with_backoff;

pub struct SocketNer {
    addr: String,
    timeout: Duration,
    retry_delays_ms: Vec<u64>,
}

impl SocketNer {
    pub fn new(host: &str, port: u16) -> Self {
        let addr = format!("{host}:{port}");
        info!("Creating SocketNer for {addr}");
        Self {
            addr,
            timeout: Duration::from_secs(10),
            retry_delays_ms: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_config(config: &NerConfig) -> Self {
        Self::new(&config.host, config.port)
            .with_timeout(Duration::from_secs(config.timeout_secs))
            .with_retry_delays(config.retry_delays_ms.clone())
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_retry_delays(mut self, delays_ms: Vec<u64>) -> Self {
        self.retry_delays_ms = delays_ms;
        self
    }

    async fn exchange(&self, request: &str) -> Result<String> {
        let mut stream = TcpStream::connect(&self.addr)
            .await
            .map_err(|source| Error::Connect {
                addr: self.addr.clone(),
                source,
            })?;
        stream.write_all(request.as_bytes()).await?;
        stream.flush().await?;

        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            return Err(Error::Protocol(format!(
                "{} closed the connection without a reply",
                self.addr
            )));
        }
        Ok(line)
    }

    async fn try_tag(&self, request: &str) -> Result<Vec<TaggedToken>> {
        let line = timeout(self.timeout, self.exchange(request))
            .await
            .map_err(|_| Error::Timeout(self.timeout))??;
        parse_tagged_line(&line)
    }
}

/// Parse `token/LABEL` pairs; the label follows the last `/`, so tokens such
/// as `03/07` keep their own slashes.
pub fn parse_tagged_line(line: &str) -> Result<Vec<TaggedToken>> {
    line.split_whitespace()
        .map(|pair| match pair.rsplit_once('/') {
            Some((token, label)) if !token.is_empty() && !label.is_empty() => {
                Ok(TaggedToken::new(token, label))
            }
            _ => Err(Error::Protocol(format!("untagged token {pair:?}"))),
        })
        .collect()
}

#[async_trait]
impl NerBackend for SocketNer {
    async fn tag(&self, tokens: &[String]) -> Result<Vec<TaggedToken>> {
        if tokens.is_empty() {
            return Ok(Vec::new());
        }
        let request = format!("{}\n", tokens.join(" "));
        debug!("Tagging {} tokens via {}", tokens.len(), self.addr);
        retry_with_backoff(|| self.try_tag(&request), &self.retry_delays_ms).await
    }
}
