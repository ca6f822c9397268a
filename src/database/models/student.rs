use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Student {
    pub student_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentJson {
    #[serde(rename = "studentID")]
    pub student_id: i64,
    pub name: String,
}

impl Student {
    pub fn new(student_id: i64, name: impl Into<String>) -> Self {
        Self {
            student_id,
            name: name.into(),
        }
    }

    pub fn to_json(&self) -> StudentJson {
        StudentJson {
            student_id: self.student_id,
            name: self.name.clone(),
        }
    }
}
