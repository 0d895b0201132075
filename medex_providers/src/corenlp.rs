use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use medex_core::{Error, NerBackend, NerConfig, Result, TaggedToken};

use crate::retry::retry_with_backoff;

/// Annotator properties sent with every request. Input is pre-tokenized, so the
/// server splits on whitespace only.
const PROPERTIES: &str =
    r#"{"annotators":"tokenize,ssplit,ner","outputFormat":"json","tokenize.whitespace":"true"}"#;

#[derive(Debug, Deserialize)]
struct Annotation {
    #[serde(default)]
    sentences: Vec<AnnotatedSentence>,
}

#[derive(Debug, Deserialize)]
struct AnnotatedSentence {
    #[serde(default)]
    tokens: Vec<AnnotatedToken>,
}

#[derive(Debug, Deserialize)]
struct AnnotatedToken {
    word: String,
    ner: String,
}

/// Stanford CoreNLP server client.
pub struct CoreNlpNer {
    client: Client,
    base_url: String,
    timeout: Duration,
    retry_delays_ms: Vec<u64>,
}

impl CoreNlpNer {
    pub fn new(base_url: String) -> Self {
        info!("Creating CoreNlpNer for {base_url}");
        Self {
            client: Client::new(),
            base_url,
            timeout: Duration::from_secs(10),
            retry_delays_ms: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_config(config: &NerConfig) -> Self {
        Self::new(config.url.clone())
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

    fn endpoint(&self) -> Result<Url> {
        let base = format!("{}/", self.base_url.trim_end_matches('/'));
        Url::parse_with_params(&base, &[("properties", PROPERTIES)])
            .map_err(|e| Error::Request(format!("invalid CoreNLP url {base:?}: {e}")))
    }

    fn request_error(&self, e: &reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout(self.timeout)
        } else {
            Error::Request(e.to_string())
        }
    }

    /// Helper method to send a single request
    async fn try_tag(&self, url: &Url, body: &str) -> Result<Vec<TaggedToken>> {
        let response = self
            .client
            .post(url.clone())
            .timeout(self.timeout)
            .body(body.to_string())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| self.request_error(&e))?;

        let text = response.text().await.map_err(|e| self.request_error(&e))?;
        parse_annotation(&text)
    }
}

/// Flatten a CoreNLP JSON annotation into tagged tokens across all sentences.
pub fn parse_annotation(json: &str) -> Result<Vec<TaggedToken>> {
    let annotation: Annotation =
        serde_json::from_str(json).map_err(|e| Error::Protocol(e.to_string()))?;
    Ok(annotation
        .sentences
        .into_iter()
        .flat_map(|sentence| sentence.tokens)
        .map(|token| TaggedToken::new(token.word, token.ner))
        .collect())
}

#[async_trait]
impl NerBackend for CoreNlpNer {
    async fn tag(&self, tokens: &[String]) -> Result<Vec<TaggedToken>> {
        if tokens.is_empty() {
            return Ok(Vec::new());
        }
        let url = self.endpoint()?;
        let body = tokens.join(" ");
        debug!("Tagging {} tokens via {}", tokens.len(), self.base_url);
        retry_with_backoff(|| self.try_tag(&url, &body), &self.retry_delays_ms).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const REPLY: &str = r#"{"sentences":[
        {"index":0,"tokens":[
            {"index":1,"word":"Seen","ner":"O"},
            {"index":2,"word":"on","ner":"O"},
            {"index":3,"word":"March","ner":"DATE"},
            {"index":4,"word":"3","ner":"DATE"}
        ]},
        {"index":1,"tokens":[
            {"index":1,"word":"Dr.","ner":"O"},
            {"index":2,"word":"Smith","ner":"PERSON"}
        ]}
    ]}"#;

    /// Minimal HTTP/1.1 responder: reads one request, replies with `body`, and
    /// hands back the raw request head.
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn serve_json(body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("bound listener has an address");
        let handle = tokio::spawn(async move {
            let Ok((mut stream, _)) = listener.accept().await else {
                return String::new();
            };
            let mut received = Vec::new();
            let mut buf = [0_u8; 1024];
            loop {
                let Ok(n) = stream.read(&mut buf).await else {
                    break;
                };
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&buf[..n]);
                if request_complete(&received) {
                    break;
                }
            }
            let reply = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(reply.as_bytes()).await;
            let _ = stream.shutdown().await;
            String::from_utf8_lossy(&received).into_owned()
        });
        (format!("http://{addr}"), handle)
    }

    fn request_complete(received: &[u8]) -> bool {
        let text = String::from_utf8_lossy(received);
        let Some((head, body)) = text.split_once("\r\n\r\n") else {
            return false;
        };
        let length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        body.len() >= length
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn annotation_tokens_are_flattened_in_order() {
        let tagged = parse_annotation(REPLY).expect("valid annotation");
        let words: Vec<&str> = tagged.iter().map(|t| t.token.as_str()).collect();
        assert_eq!(words, vec!["Seen", "on", "March", "3", "Dr.", "Smith"]);
        assert_eq!(tagged[5].label, "PERSON");
    }

    #[test]
    fn malformed_annotation_is_a_protocol_error() {
        assert!(matches!(parse_annotation("<html>"), Err(Error::Protocol(_))));
        assert!(matches!(
            parse_annotation(r#"{"sentences":[{"tokens":[{"word":"x"}]}]}"#),
            Err(Error::Protocol(_))
        ));
        assert_eq!(parse_annotation("{}").ok(), Some(Vec::new()));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn endpoint_carries_encoded_properties() {
        let ner = CoreNlpNer::new("http://localhost:9000/".to_string());
        let url = ner.endpoint().expect("valid url");
        assert_eq!(url.path(), "/");
        let (key, value) = url.query_pairs().next().expect("properties parameter");
        assert_eq!(key, "properties");
        assert_eq!(value, PROPERTIES);
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn entities_from_live_server() {
        let (url, server) = serve_json(REPLY).await;
        let ner = CoreNlpNer::new(url);

        let groups = ner
            .get_entities("Seen on March 3 . Dr. Smith")
            .await
            .expect("server replies with an annotation");
        assert_eq!(groups["DATE"], vec!["March 3".to_string()]);
        assert_eq!(groups["PERSON"], vec!["Smith".to_string()]);

        let request = server.await.expect("server task completes");
        assert!(request.starts_with("POST /?properties="));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_request_error() {
        let ner = CoreNlpNer::new("http://127.0.0.1:1".to_string());
        let result = ner.tag(&["x".to_string()]).await;
        assert!(matches!(result, Err(Error::Request(_))));
    }
}
