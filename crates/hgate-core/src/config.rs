use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level daemon configuration (loaded from hgate.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HgateConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub auth: AuthConfig,
    pub decoy: DecoyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// TCP listen address for the HTTP API (default: 127.0.0.1:8088)
    pub listen: String,
    /// Prometheus metrics endpoint (default: 127.0.0.1:9102)
    pub metrics_addr: Option<String>,
    /// Log level (default: info)
    pub log_level: String,
    /// Log format: "json" or "text"
    pub log_format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to the JSON credential store file
    pub path: PathBuf,
}

/// Password hashing and login behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Argon2id memory cost in KiB (default: 65536 = 64 MiB)
    pub argon2_mem_cost_kib: u32,
    /// Argon2id time cost (iterations, default: 3)
    pub argon2_time_cost: u32,
    /// Argon2id parallelism (default: 4)
    pub argon2_parallelism: u32,
    /// Fixed delay applied before reporting an unknown username, in
    /// milliseconds. Equalizes timing against the decoy-synthesis path.
    pub login_delay_ms: u64,
}

/// Tunable plausibility heuristics for decoy synthesis.
///
/// These shape HOW plausible the decoys look; the determinism and
/// shape-parity guarantees do not depend on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoyConfig {
    /// Keep the real given name in the decoy's full name
    pub preserve_given_name: bool,
    /// Maximum distance (years) between a decoy expiry and the real one
    pub expiry_jitter_years: i32,
    /// Fallback expiry horizon when the real record has no usable expiry
    pub horizon_min_years: i32,
    pub horizon_max_years: i32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:8088".into(),
            metrics_addr: Some("127.0.0.1:9102".into()),
            log_level: "info".into(),
            log_format: "json".into(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("/var/lib/hgate/users.json"),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            argon2_mem_cost_kib: 65536,
            argon2_time_cost: 3,
            argon2_parallelism: 4,
            login_delay_ms: 500,
        }
    }
}

impl Default for DecoyConfig {
    fn default() -> Self {
        Self {
            preserve_given_name: true,
            expiry_jitter_years: 3,
            horizon_min_years: 3,
            horizon_max_years: 6,
        }
    }
}
