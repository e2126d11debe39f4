//! Server configuration, read from a TOML file.
//!
//! ```toml
//! [admin]
//! password_hash = "$argon2id$..."
//!
//! [storage]
//! data_dir = "/var/lib/helpdesk"
//!
//! [jwt]
//! secret = "..."
//! expire_secs = 604800
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Directory holding named server contexts.
pub const CONTEXT_DIR: &str = "/etc/helpdesk";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub admin: AdminConfig,
    pub storage: StorageConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// argon2id PHC string of the shared admin password.
    #[serde(default)]
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub data_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    #[serde(default)]
    pub secret: String,
    #[serde(default = "default_expire_secs")]
    pub expire_secs: i64,
}

fn default_expire_secs() -> i64 {
    7 * 24 * 3600
}

impl ServerConfig {
    /// Map `-c` to a file: anything that looks like a path is used as is,
    /// a bare name resolves to `/etc/helpdesk/<name>.toml`.
    pub fn resolve_path(name_or_path: &str) -> PathBuf {
        if name_or_path.contains('/') || name_or_path.contains('.') {
            PathBuf::from(name_or_path)
        } else {
            Path::new(CONTEXT_DIR).join(format!("{name_or_path}.toml"))
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e))?;
        let config: ServerConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path() {
        assert_eq!(
            ServerConfig::resolve_path("prod"),
            PathBuf::from("/etc/helpdesk/prod.toml")
        );
        assert_eq!(
            ServerConfig::resolve_path("./local.toml"),
            PathBuf::from("./local.toml")
        );
        assert_eq!(
            ServerConfig::resolve_path("/tmp/x"),
            PathBuf::from("/tmp/x")
        );
    }

    #[test]
    fn test_load_applies_default_expiry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("helpdesk.toml");
        std::fs::write(
            &path,
            r#"
[admin]
password_hash = "$argon2id$abc"

[storage]
data_dir = "/var/lib/helpdesk"

[jwt]
secret = "s3cret"
"#,
        )
        .unwrap();

        let config = ServerConfig::load(&path).unwrap();
        assert_eq!(config.admin.password_hash, "$argon2id$abc");
        assert_eq!(config.storage.data_dir, "/var/lib/helpdesk");
        assert_eq!(config.jwt.secret, "s3cret");
        assert_eq!(config.jwt.expire_secs, 604800);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ServerConfig::load(&dir.path().join("nope.toml")).is_err());
    }
}
