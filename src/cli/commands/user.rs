use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use crate::cli::utils::{connect_store, output_success};
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::models::UserCreate;
use crate::services::UserService;

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Create a user")]
    Create {
        #[arg(long, help = "Email address (unique)")]
        email: String,

        #[arg(long, help = "Password hash, stored as given")]
        hashed_password: String,

        #[arg(long, help = "Display name")]
        full_name: Option<String>,

        #[arg(long, help = "Postal address, shown in the admin export")]
        address: Option<String>,

        #[arg(long, help = "Phone number, shown in the admin export")]
        phone: Option<String>,

        #[arg(long, help = "Grant superuser rights")]
        superuser: bool,
    },

    #[command(about = "Delete a user and all of its family members")]
    Delete {
        #[arg(help = "User id")]
        id: Uuid,
    },
}

pub async fn handle(cmd: UserCommands, config: AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let store = connect_store(&config).await?;

    match cmd {
        UserCommands::Create {
            email,
            hashed_password,
            full_name,
            address,
            phone,
            superuser,
        } => {
            let payload = UserCreate {
                email,
                is_active: true,
                is_superuser: superuser,
                full_name,
                address,
                phone,
                hashed_password,
            };

            let user = UserService::new(store).create(payload).await?;
            output_success(
                &output_format,
                &format!("Created user {}", user.email),
                Some(json!({ "id": user.id, "is_superuser": user.is_superuser })),
            )
        }
        UserCommands::Delete { id } => {
            if !store.delete_user(id).await? {
                anyhow::bail!("User not found");
            }
            output_success(&output_format, &format!("Deleted user {}", id), None)
        }
    }
}
