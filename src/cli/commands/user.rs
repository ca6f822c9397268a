use clap::Subcommand;

use crate::cli::utils::{output_list, output_success};
use crate::cli::{open_database, OutputFormat};
use crate::services::user_service;

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Create a user account")]
    Create {
        username: String,
        password: String,
        faculty: String,
        department: String,
    },

    #[command(about = "List all users")]
    List,
}

pub async fn handle(cmd: UserCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let db = open_database().await?;

    let result = match cmd {
        UserCommands::Create { username, password, faculty, department } => {
            let user =
                user_service::create_user(&db, &username, &password, &faculty, &department).await?;
            output_success(output_format, &format!("{} created!", user.username), Some(&user.to_json()))
        }
        UserCommands::List => {
            let users = user_service::get_all_users_json(&db).await?;
            output_list(output_format, &users, "No users", |u| {
                format!("{:>4}  {}  {}/{}", u.id.unwrap_or_default(), u.username, u.faculty, u.department)
            })
        }
    };

    db.close().await;
    result
}
