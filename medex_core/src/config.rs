//! Settings shared by the extraction and provider crates.

use serde::{Deserialize, Serialize};

/// Date normalization settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateConfig {
    /// Two-digit years below this value land in the 2000s, the rest in the 1900s.
    #[serde(default = "DateConfig::default_century_pivot")]
    pub century_pivot: u32,
    /// Day used when a token only names a month and year (`03/98`).
    #[serde(default = "DateConfig::default_unknown_day")]
    pub unknown_day: u32,
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            century_pivot: Self::default_century_pivot(),
            unknown_day: Self::default_unknown_day(),
        }
    }
}

impl DateConfig {
    const fn default_century_pivot() -> u32 {
        69
    }

    const fn default_unknown_day() -> u32 {
        15
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NerBackendKind {
    /// Stanford NER line server over TCP.
    Socket,
    /// Stanford CoreNLP HTTP server.
    #[serde(alias = "corenlp")]
    CoreNlp,
    /// No tagger; date extraction relies on patterns only.
    #[default]
    None,
}

impl NerBackendKind {
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Socket => "socket",
            Self::CoreNlp => "core_nlp",
            Self::None => "none",
        }
    }
}

impl std::str::FromStr for NerBackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "socket" => Ok(Self::Socket),
            "core_nlp" | "corenlp" => Ok(Self::CoreNlp),
            "none" => Ok(Self::None),
            other => Err(format!("unknown NER backend: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NerConfig {
    #[serde(default)]
    pub backend: NerBackendKind,
    #[serde(default = "NerConfig::default_host")]
    pub host: String,
    #[serde(default = "NerConfig::default_port")]
    pub port: u16,
    #[serde(default = "NerConfig::default_url")]
    pub url: String,
    #[serde(default = "NerConfig::default_timeout_secs")]
    pub timeout_secs: u64,
    /// Delay before each retry; empty means a single attempt.
    #[serde(default = "NerConfig::default_retry_delays_ms")]
    pub retry_delays_ms: Vec<u64>,
}

impl Default for NerConfig {
    fn default() -> Self {
        Self {
            backend: NerBackendKind::default(),
            host: Self::default_host(),
            port: Self::default_port(),
            url: Self::default_url(),
            timeout_secs: Self::default_timeout_secs(),
            retry_delays_ms: Self::default_retry_delays_ms(),
        }
    }
}

impl NerConfig {
    fn default_host() -> String {
        "localhost".to_string()
    }

    const fn default_port() -> u16 {
        8080
    }

    fn default_url() -> String {
        "http://localhost:9000".to_string()
    }

    const fn default_timeout_secs() -> u64 {
        10
    }

    fn default_retry_delays_ms() -> Vec<u64> {
        vec![200, 500]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn partial_ner_config_fills_defaults() {
        let config: NerConfig =
            serde_json::from_str(r#"{"backend": "socket", "port": 9191}"#).expect("valid JSON");
        assert_eq!(config.backend, NerBackendKind::Socket);
        assert_eq!(config.port, 9191);
        assert_eq!(config.host, "localhost");
        assert_eq!(config.retry_delays_ms, vec![200, 500]);
    }

    #[test]
    fn backend_kind_parses_both_spellings() {
        assert_eq!("CoreNLP".parse::<NerBackendKind>(), Ok(NerBackendKind::CoreNlp));
        assert_eq!("core_nlp".parse::<NerBackendKind>(), Ok(NerBackendKind::CoreNlp));
        assert!("spacy".parse::<NerBackendKind>().is_err());
    }

    #[test]
    fn date_config_defaults() {
        let config = DateConfig::default();
        assert_eq!(config.century_pivot, 69);
        assert_eq!(config.unknown_day, 15);
    }
}
