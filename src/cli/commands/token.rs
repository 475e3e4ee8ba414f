use clap::{ArgGroup, Args};
use serde_json::json;
use uuid::Uuid;

use crate::auth::generate_token;
use crate::cli::utils::{connect_store, output_success};
use crate::cli::OutputFormat;
use crate::config::AppConfig;

#[derive(Args)]
#[command(group(ArgGroup::new("who").required(true).args(["user_id", "email"])))]
pub struct TokenArgs {
    #[arg(long, help = "User id")]
    pub user_id: Option<Uuid>,

    #[arg(long, help = "User email")]
    pub email: Option<String>,
}

pub async fn handle(args: TokenArgs, config: AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let store = connect_store(&config).await?;

    let user = match (args.user_id, args.email.as_deref()) {
        (Some(id), _) => store.get_user(id).await?,
        (None, Some(email)) => store.get_user_by_email(email).await?,
        (None, None) => anyhow::bail!("either --user-id or --email is required"),
    }
    .ok_or_else(|| anyhow::anyhow!("User not found"))?;

    if !user.is_active {
        anyhow::bail!("User {} is inactive", user.email);
    }

    let token = generate_token(user.id, &config.security)?;

    output_success(
        &output_format,
        &format!("Token issued for {}", user.email),
        Some(json!({
            "user_id": user.id,
            "expires_in_hours": config.security.jwt_expiry_hours,
            "token": token,
        })),
    )
}
