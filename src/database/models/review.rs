use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A staff member's review of a student, with community up/down votes.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Review {
    pub id: Option<i64>,
    pub student_id: i64,
    pub staff_id: i64,
    pub experience: String,
    pub rating: i64,
    pub upvotes: i64,
    pub downvotes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewJson {
    pub id: Option<i64>,
    #[serde(rename = "studentID")]
    pub student_id: i64,
    #[serde(rename = "staffID")]
    pub staff_id: i64,
    pub experience: String,
    pub rating: i64,
    pub upvotes: i64,
    pub downvotes: i64,
}

impl Review {
    pub fn new(student_id: i64, staff_id: i64, experience: impl Into<String>, rating: i64) -> Self {
        Self {
            id: None,
            student_id,
            staff_id,
            experience: experience.into(),
            rating,
            upvotes: 0,
            downvotes: 0,
        }
    }

    pub fn to_json(&self) -> ReviewJson {
        ReviewJson {
            id: self.id,
            student_id: self.student_id,
            staff_id: self.staff_id,
            experience: self.experience.clone(),
            rating: self.rating,
            upvotes: self.upvotes,
            downvotes: self.downvotes,
        }
    }
}
