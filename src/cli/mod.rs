pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::config;

#[derive(Parser)]
#[command(name = "wishlist-api")]
#[command(about = "Wishlist API - family member wishlists with CSV exports")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve,

    #[command(about = "Print a bearer token for an existing user")]
    Token(commands::token::TokenArgs),

    #[command(about = "User account management")]
    User {
        #[command(subcommand)]
        cmd: commands::user::UserCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = config().clone();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => commands::serve::handle(config).await,
        Commands::Token(args) => commands::token::handle(args, config, output_format).await,
        Commands::User { cmd } => commands::user::handle(cmd, config, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_defaults_to_serve() {
        let cli = Cli::try_parse_from(["wishlist-api"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn token_requires_exactly_one_selector() {
        assert!(Cli::try_parse_from(["wishlist-api", "token"]).is_err());
        assert!(Cli::try_parse_from([
            "wishlist-api",
            "token",
            "--email",
            "a@example.com",
            "--user-id",
            "00000000-0000-0000-0000-000000000000",
        ])
        .is_err());
        assert!(Cli::try_parse_from(["wishlist-api", "--json", "token", "--email", "a@example.com"]).is_ok());
    }

    #[test]
    fn user_create_flags() {
        let cli = Cli::try_parse_from([
            "wishlist-api",
            "user",
            "create",
            "--email",
            "admin@example.com",
            "--hashed-password",
            "$2b$12$opaque",
            "--superuser",
            "--address",
            "12 Elm Street",
            "--phone",
            "555-0100",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::User {
                cmd:
                    commands::user::UserCommands::Create {
                        superuser,
                        full_name,
                        address,
                        phone,
                        ..
                    },
            }) => {
                assert!(superuser);
                assert!(full_name.is_none());
                assert_eq!(address.as_deref(), Some("12 Elm Street"));
                assert_eq!(phone.as_deref(), Some("555-0100"));
            }
            _ => panic!("expected user create"),
        }
    }
}
