use crate::cli::{utils::output_success, OutputFormat};
use crate::config;
use crate::database::Database;

pub async fn handle(reset: bool, output_format: OutputFormat) -> anyhow::Result<()> {
    let db = Database::connect(&config::config().database).await?;

    if reset {
        db.drop_schema().await?;
    }
    db.create_schema().await?;
    db.close().await;

    let message = if reset { "Database reset" } else { "Database initialized" };
    output_success::<()>(output_format, message, None)
}
