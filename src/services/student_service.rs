use tracing::info;

use crate::database::models::{Student, StudentJson};
use crate::database::{Database, DatabaseError};

pub async fn create_student(
    db: &Database,
    student_id: i64,
    name: &str,
) -> Result<Student, DatabaseError> {
    let student = sqlx::query_as::<_, Student>(
        "INSERT INTO students (student_id, name) VALUES (?, ?) RETURNING student_id, name",
    )
    .bind(student_id)
    .bind(name)
    .fetch_one(db.pool())
    .await?;

    info!("Created student {}", student.student_id);
    Ok(student)
}

pub async fn update_student(
    db: &Database,
    student_id: i64,
    name: &str,
) -> Result<Option<Student>, DatabaseError> {
    let student = sqlx::query_as::<_, Student>(
        "UPDATE students SET name = ? WHERE student_id = ? RETURNING student_id, name",
    )
    .bind(name)
    .bind(student_id)
    .fetch_optional(db.pool())
    .await?;
    Ok(student)
}

/// Remove a student and return what was removed. Reviews naming the student are kept.
pub async fn delete_student(
    db: &Database,
    student_id: i64,
) -> Result<Option<Student>, DatabaseError> {
    let student = sqlx::query_as::<_, Student>(
        "DELETE FROM students WHERE student_id = ? RETURNING student_id, name",
    )
    .bind(student_id)
    .fetch_optional(db.pool())
    .await?;

    if student.is_some() {
        info!("Deleted student {}", student_id);
    }
    Ok(student)
}

pub async fn get_student(db: &Database, student_id: i64) -> Result<Option<Student>, DatabaseError> {
    let student = sqlx::query_as::<_, Student>(
        "SELECT student_id, name FROM students WHERE student_id = ?",
    )
    .bind(student_id)
    .fetch_optional(db.pool())
    .await?;
    Ok(student)
}

pub async fn get_all_students(db: &Database) -> Result<Vec<Student>, DatabaseError> {
    let students = sqlx::query_as::<_, Student>(
        "SELECT student_id, name FROM students ORDER BY id",
    )
    .fetch_all(db.pool())
    .await?;
    Ok(students)
}

#[allow(non_snake_case)]
pub async fn get_all_students_JSON(db: &Database) -> Result<Vec<StudentJson>, DatabaseError> {
    Ok(get_all_students(db).await?.iter().map(Student::to_json).collect())
}
