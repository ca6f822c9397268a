use clap::Subcommand;

use crate::cli::utils::{output_list, output_success};
use crate::cli::{open_database, OutputFormat};
use crate::services::student_service;

#[derive(Subcommand)]
pub enum StudentCommands {
    #[command(about = "Create a student record")]
    Create { student_id: i64, name: String },

    #[command(about = "List all students")]
    List,
}

pub async fn handle(cmd: StudentCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let db = open_database().await?;

    let result = match cmd {
        StudentCommands::Create { student_id, name } => {
            let student = student_service::create_student(&db, student_id, &name).await?;
            output_success(
                output_format,
                &format!("Student {} created", student.student_id),
                Some(&student.to_json()),
            )
        }
        StudentCommands::List => {
            let students = student_service::get_all_students_JSON(&db).await?;
            output_list(output_format, &students, "No students", |s| {
                format!("{:>10}  {}", s.student_id, s.name)
            })
        }
    };

    db.close().await;
    result
}
