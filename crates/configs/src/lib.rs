use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::time::Duration;

/// Deployment environment; selects the logging sink and verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Dev,
    Prod,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub env: Environment,
    #[serde(default)]
    pub storage_path: String,
    #[serde(default)]
    pub token_ttl_secs: u64,
    #[serde(default)]
    pub grpc: GrpcConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GrpcConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for GrpcConfig {
    fn default() -> Self {
        Self { host: default_host(), port: 44044, timeout_secs: default_timeout() }
    }
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_timeout() -> u64 { 10 }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| anyhow!("cannot read config {path}: {e}"))?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load from `path` (or `CONFIG_PATH`/`config.toml` when `None`), then normalize and validate.
    pub fn load_and_validate(path: Option<&str>) -> Result<Self> {
        let mut cfg = match path {
            Some(p) => load_from_file(p)?,
            None => load_default()?,
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        if self.storage_path.trim().is_empty() {
            if let Ok(path) = std::env::var("STORAGE_PATH") {
                self.storage_path = path;
            }
        }
        self.grpc.normalize();
        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage_path.trim().is_empty() {
            return Err(anyhow!("storage_path is empty; set it in the config file or STORAGE_PATH"));
        }
        if self.token_ttl_secs == 0 {
            return Err(anyhow!("token_ttl_secs must be a positive number of seconds"));
        }
        self.grpc.validate()
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }
}

impl GrpcConfig {
    fn normalize(&mut self) {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
    }

    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(anyhow!("grpc.port must be in 1..=65535"));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("grpc.timeout_secs must be a positive number of seconds"));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
env = "prod"
storage_path = "./storage/sso.db"
token_ttl_secs = 3600

[grpc]
host = "127.0.0.1"
port = 44044
timeout_secs = 5
"#;

    #[test]
    fn parses_full_config() -> Result<()> {
        let mut cfg = load_from_str(FULL)?;
        cfg.normalize_and_validate()?;
        assert_eq!(cfg.env, Environment::Prod);
        assert_eq!(cfg.storage_path, "./storage/sso.db");
        assert_eq!(cfg.token_ttl(), Duration::from_secs(3600));
        assert_eq!(cfg.grpc.bind_addr(), "127.0.0.1:44044");
        assert_eq!(cfg.grpc.timeout(), Duration::from_secs(5));
        Ok(())
    }

    #[test]
    fn defaults_apply() -> Result<()> {
        let cfg = load_from_str("storage_path = \"sso.db\"\ntoken_ttl_secs = 60\n")?;
        assert_eq!(cfg.env, Environment::Local);
        assert_eq!(cfg.grpc.host, "0.0.0.0");
        assert_eq!(cfg.grpc.port, 44044);
        assert_eq!(cfg.grpc.timeout_secs, 10);
        cfg.validate()
    }

    #[test]
    fn rejects_zero_ttl() -> Result<()> {
        let mut cfg = load_from_str("storage_path = \"sso.db\"\n")?;
        let err = cfg.normalize_and_validate().unwrap_err();
        assert!(err.to_string().contains("token_ttl_secs"));
        Ok(())
    }

    #[test]
    fn storage_path_falls_back_to_env_and_file_wins() -> Result<()> {
        // only test that touches STORAGE_PATH
        std::env::set_var("STORAGE_PATH", "/var/lib/sso/from-env.db");

        let mut from_env = load_from_str("token_ttl_secs = 60\n")?;
        let mut from_file = load_from_str("storage_path = \"./file.db\"\ntoken_ttl_secs = 60\n")?;
        let env_result = from_env.normalize_and_validate();
        let file_result = from_file.normalize_and_validate();
        std::env::remove_var("STORAGE_PATH");

        env_result?;
        file_result?;
        assert_eq!(from_env.storage_path, "/var/lib/sso/from-env.db");
        assert_eq!(from_file.storage_path, "./file.db");
        Ok(())
    }

    #[test]
    fn rejects_zero_port() -> Result<()> {
        let cfg = load_from_str("storage_path = \"sso.db\"\ntoken_ttl_secs = 1\n[grpc]\nport = 0\n")?;
        assert!(cfg.validate().is_err());
        Ok(())
    }

    #[test]
    fn rejects_unknown_env() {
        assert!(load_from_str("env = \"staging\"\n").is_err());
    }

    #[test]
    fn blank_host_is_normalized() -> Result<()> {
        let mut cfg = load_from_str("storage_path = \"sso.db\"\ntoken_ttl_secs = 1\n[grpc]\nhost = \"  \"\nport = 1\n")?;
        cfg.normalize_and_validate()?;
        assert_eq!(cfg.grpc.host, "0.0.0.0");
        Ok(())
    }

    #[test]
    fn load_from_file_reads_toml() -> Result<()> {
        let path = std::env::temp_dir().join(format!("sso_config_{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, FULL)?;
        let cfg = AppConfig::load_and_validate(path.to_str())?;
        assert_eq!(cfg.grpc.port, 44044);
        let _ = std::fs::remove_file(&path);
        Ok(())
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_from_file("/definitely/not/here.toml").is_err());
    }
}
