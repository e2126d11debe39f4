//! `helpdesk`: server setup helper.
//!
//! `helpdesk init <name>` writes `/etc/helpdesk/<name>.toml` for
//! `helpdeskd -c <name>`; `helpdesk hash-password` prints an argon2id hash
//! for editing a config by hand.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Helpdesk CLI tool.
#[derive(Parser, Debug)]
#[command(name = "helpdesk", about = "Store IT helpdesk setup tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a server config (admin password hash + JWT secret).
    Init {
        /// Context name.
        name: String,
        /// Server config directory.
        #[arg(long, default_value = "/etc/helpdesk")]
        config_dir: String,
        /// Data directory (default: /var/lib/helpdesk/<name>).
        #[arg(long)]
        data_dir: Option<String>,
        /// Admin password (non-interactive, for CI/automation).
        /// If not provided, will prompt interactively.
        #[arg(long)]
        password: Option<String>,
    },

    /// Print the argon2id hash of a password.
    #[command(name = "hash-password")]
    HashPassword {
        #[arg(long)]
        password: Option<String>,
    },

    /// Show version.
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            name,
            config_dir,
            data_dir,
            password,
        } => {
            let data_dir = data_dir.unwrap_or_else(|| format!("/var/lib/helpdesk/{}", name));
            let password = read_password(password, true)?;
            commands::init::create(&name, &PathBuf::from(config_dir), &data_dir, &password)?;
        }

        Commands::HashPassword { password } => {
            let password = read_password(password, false)?;
            let hash = helpdesk_auth::hash_password(&password)
                .map_err(|e| anyhow::anyhow!("failed to hash password: {}", e))?;
            println!("{}", hash);
        }

        Commands::Version => {
            println!("helpdesk cli v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// Take the password from the flag, or prompt for it.
fn read_password(flag: Option<String>, confirm: bool) -> anyhow::Result<String> {
    let password = match flag {
        Some(p) => p,
        None => {
            let pw = rpassword::prompt_password("Enter admin password: ")?;
            if confirm && pw != rpassword::prompt_password("Confirm admin password: ")? {
                anyhow::bail!("Passwords do not match.");
            }
            pw
        }
    };
    if password.is_empty() {
        anyhow::bail!("Password cannot be empty.");
    }
    Ok(password)
}
