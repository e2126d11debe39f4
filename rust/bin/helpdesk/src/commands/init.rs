//! `helpdesk init`: write a fresh server config.

use std::path::{Path, PathBuf};

use anyhow::Result;
use rand::Rng;
use serde::Serialize;

#[derive(Serialize)]
struct ServerFile<'a> {
    admin: Admin<'a>,
    storage: Storage<'a>,
    jwt: Jwt,
}

#[derive(Serialize)]
struct Admin<'a> {
    password_hash: &'a str,
}

#[derive(Serialize)]
struct Storage<'a> {
    data_dir: &'a str,
}

#[derive(Serialize)]
struct Jwt {
    secret: String,
    expire_secs: i64,
}

const EXPIRE_SECS: i64 = 7 * 24 * 3600;

/// 32 random bytes, hex encoded.
pub fn generate_secret() -> String {
    let mut rng = rand::thread_rng();
    (0..32).map(|_| format!("{:02x}", rng.gen::<u8>())).collect()
}

/// Render the TOML body of a server config.
pub fn render(password_hash: &str, data_dir: &str, jwt_secret: String) -> Result<String> {
    let file = ServerFile {
        admin: Admin { password_hash },
        storage: Storage { data_dir },
        jwt: Jwt {
            secret: jwt_secret,
            expire_secs: EXPIRE_SECS,
        },
    };
    Ok(toml::to_string_pretty(&file)?)
}

/// Hash the admin password, generate a JWT secret and write
/// `<config_dir>/<name>.toml`. Refuses to overwrite an existing file.
pub fn create(name: &str, config_dir: &Path, data_dir: &str, password: &str) -> Result<PathBuf> {
    let config_path = config_dir.join(format!("{}.toml", name));
    if config_path.exists() {
        anyhow::bail!("{} already exists.", config_path.display());
    }

    let password_hash = helpdesk_auth::hash_password(password)
        .map_err(|e| anyhow::anyhow!("failed to hash password: {}", e))?;
    let body = render(&password_hash, data_dir, generate_secret())?;

    std::fs::create_dir_all(config_dir)?;
    std::fs::write(&config_path, body)?;
    std::fs::create_dir_all(data_dir)?;

    println!("Context \"{}\" created.", name);
    println!("  Config: {}", config_path.display());
    println!("  Data:   {}", data_dir);
    Ok(config_path)
}
