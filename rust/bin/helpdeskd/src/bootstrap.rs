//! First-start checks.
//!
//! helpdeskd refuses to start unless the config carries an admin password
//! hash, a JWT secret and a data directory.

use crate::config::ServerConfig;

/// Verify server configuration is ready for production use.
pub fn verify_config(config: &ServerConfig) -> anyhow::Result<()> {
    if config.admin.password_hash.is_empty() {
        anyhow::bail!(
            "No admin password hash found in configuration.\n\
             Run `helpdesk init` to set up the server first."
        );
    }
    if config.jwt.secret.is_empty() {
        anyhow::bail!("JWT secret is empty in configuration.");
    }
    if config.jwt.expire_secs <= 0 {
        anyhow::bail!("JWT expire_secs must be positive.");
    }
    if config.storage.data_dir.is_empty() {
        anyhow::bail!("Storage data_dir is empty in configuration.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AdminConfig, JwtConfig, StorageConfig};

    fn config() -> ServerConfig {
        ServerConfig {
            admin: AdminConfig {
                password_hash: "$argon2id$abc".to_string(),
            },
            storage: StorageConfig {
                data_dir: "/tmp".to_string(),
            },
            jwt: JwtConfig {
                secret: "test".to_string(),
                expire_secs: 3600,
            },
        }
    }

    #[test]
    fn test_verify_config_ok() {
        assert!(verify_config(&config()).is_ok());
    }

    #[test]
    fn test_verify_config_empty_hash() {
        let mut c = config();
        c.admin.password_hash.clear();
        assert!(verify_config(&c).is_err());
    }

    #[test]
    fn test_verify_config_empty_secret_or_dir() {
        let mut c = config();
        c.jwt.secret.clear();
        assert!(verify_config(&c).is_err());

        let mut c = config();
        c.storage.data_dir.clear();
        assert!(verify_config(&c).is_err());

        let mut c = config();
        c.jwt.expire_secs = 0;
        assert!(verify_config(&c).is_err());
    }
}
