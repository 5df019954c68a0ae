use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::defaults::{
    DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_CONDITION_KEYWORDS, DEFAULT_MODERATE_KEYWORDS,
    DEFAULT_SEVERE_KEYWORDS, DEFAULT_SYMPTOM_KEYWORDS,
};

/// Human-readable duration (e.g., "200ms", "5m", "1h").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HumanDuration(pub std::time::Duration);

impl Default for HumanDuration {
    fn default() -> Self {
        HumanDuration(std::time::Duration::from_secs(0))
    }
}

impl HumanDuration {
    pub fn from_secs(secs: u64) -> Self {
        HumanDuration(std::time::Duration::from_secs(secs))
    }

    pub fn as_duration(&self) -> std::time::Duration {
        self.0
    }
}

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();

        let (num_str, unit) = if let Some(n) = s.strip_suffix("ms") {
            (n, "ms")
        } else if let Some(n) = s.strip_suffix('s') {
            (n, "s")
        } else if let Some(n) = s.strip_suffix('m') {
            (n, "m")
        } else if let Some(n) = s.strip_suffix('h') {
            (n, "h")
        } else if let Some(n) = s.strip_suffix('d') {
            (n, "d")
        } else {
            return Err(format!("Invalid duration format: {}", s));
        };

        let num: u64 = num_str
            .trim()
            .parse()
            .map_err(|_| format!("Invalid number in duration: {}", s))?;

        let secs = match unit {
            "ms" => return Ok(HumanDuration(std::time::Duration::from_millis(num))),
            "s" => Some(num),
            "m" => num.checked_mul(60),
            "h" => num.checked_mul(3600),
            "d" => num.checked_mul(86400),
            _ => return Err(format!("Unknown duration unit: {}", unit)),
        };

        secs.map(|secs| HumanDuration(std::time::Duration::from_secs(secs)))
            .ok_or_else(|| format!("Duration overflows: {}", s))
    }
}

impl fmt::Display for HumanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let millis = self.0.as_millis();
        let secs = self.0.as_secs();

        // Only use a coarser unit when it is exact, so Display round-trips.
        if millis % 1000 != 0 {
            write!(f, "{}ms", millis)
        } else if secs % 86400 == 0 && secs > 0 {
            write!(f, "{}d", secs / 86400)
        } else if secs % 3600 == 0 && secs > 0 {
            write!(f, "{}h", secs / 3600)
        } else if secs % 60 == 0 && secs > 0 {
            write!(f, "{}m", secs / 60)
        } else {
            write!(f, "{}s", secs)
        }
    }
}

impl Serialize for HumanDuration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for HumanDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        HumanDuration::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Human-readable bytes (e.g., "512kb", "16mb").
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HumanBytes(pub u64);

impl HumanBytes {
    pub fn as_bytes(&self) -> u64 {
        self.0
    }

    /// Byte count as a `usize`, saturating on 32-bit targets.
    pub fn as_usize(&self) -> usize {
        usize::try_from(self.0).unwrap_or(usize::MAX)
    }
}

impl FromStr for HumanBytes {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();

        let (num_str, multiplier) = if let Some(n) = s.strip_suffix("tb") {
            (n, 1024u64 * 1024 * 1024 * 1024)
        } else if let Some(n) = s.strip_suffix("gb") {
            (n, 1024u64 * 1024 * 1024)
        } else if let Some(n) = s.strip_suffix("mb") {
            (n, 1024u64 * 1024)
        } else if let Some(n) = s.strip_suffix("kb") {
            (n, 1024u64)
        } else if let Some(n) = s.strip_suffix('b') {
            (n, 1u64)
        } else {
            // Assume bytes if no unit
            (s.as_str(), 1u64)
        };

        let num: u64 = num_str
            .trim()
            .parse()
            .map_err(|_| format!("Invalid number in bytes: {}", s))?;

        num.checked_mul(multiplier)
            .map(HumanBytes)
            .ok_or_else(|| format!("Byte size overflows: {}", s))
    }
}

impl fmt::Display for HumanBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const UNITS: [(u64, &str); 4] = [
            (1024 * 1024 * 1024 * 1024, "tb"),
            (1024 * 1024 * 1024, "gb"),
            (1024 * 1024, "mb"),
            (1024, "kb"),
        ];

        let bytes = self.0;
        for (size, unit) in UNITS {
            if bytes >= size && bytes % size == 0 {
                return write!(f, "{}{}", bytes / size, unit);
            }
        }
        write!(f, "{}b", bytes)
    }
}

impl Serialize for HumanBytes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for HumanBytes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Accept both `16mb` and a bare integer.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(u64),
            Str(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Num(n) => Ok(HumanBytes(n)),
            Raw::Str(s) => HumanBytes::from_str(&s).map_err(serde::de::Error::custom),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout: HumanDuration,
    pub concurrency_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5000,
            request_timeout: HumanDuration::from_secs(60),
            concurrency_limit: 256,
        }
    }
}

/// Upload handling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Directory that holds in-flight uploads. Files never outlive a request.
    pub dir: String,
    /// Maximum accepted request payload.
    pub max_size: HumanBytes,
    /// File extensions accepted by the upload endpoint, without the dot.
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        UploadConfig {
            dir: "uploads".to_string(),
            max_size: HumanBytes(16 * 1024 * 1024),
            allowed_extensions: to_strings(DEFAULT_ALLOWED_EXTENSIONS),
        }
    }
}

/// Keyword lists driving severity classification and symptom/condition matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    pub severe: Vec<String>,
    pub moderate: Vec<String>,
    pub symptoms: Vec<String>,
    pub conditions: Vec<String>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        KeywordConfig {
            severe: to_strings(DEFAULT_SEVERE_KEYWORDS),
            moderate: to_strings(DEFAULT_MODERATE_KEYWORDS),
            symptoms: to_strings(DEFAULT_SYMPTOM_KEYWORDS),
            conditions: to_strings(DEFAULT_CONDITION_KEYWORDS),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive. `RUST_LOG` takes precedence.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            filter: "info".to_string(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upload: UploadConfig,
    pub keywords: KeywordConfig,
    pub log: LogConfig,
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
