use std::ops::RangeInclusive;

use tracing::info;

use crate::database::models::{Review, ReviewJson};
use crate::database::{Database, DatabaseError};

/// Accepted values for `Review::rating`
pub const RATING_RANGE: RangeInclusive<i64> = 0..=10;

#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("Rating {0} must be between 0 and 10")]
    InvalidRating(i64),
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

const REVIEW_COLUMNS: &str = "id, student_id, staff_id, experience, rating, upvotes, downvotes";

fn check_rating(rating: i64) -> Result<(), ReviewError> {
    if RATING_RANGE.contains(&rating) {
        Ok(())
    } else {
        Err(ReviewError::InvalidRating(rating))
    }
}

/// Persist a new review with both vote counters at zero
pub async fn create_review(
    db: &Database,
    student_id: i64,
    staff_id: i64,
    experience: &str,
    rating: i64,
) -> Result<Review, ReviewError> {
    check_rating(rating)?;
    let review = Review::new(student_id, staff_id, experience, rating);

    let review = sqlx::query_as::<_, Review>(&format!(
        "INSERT INTO reviews (student_id, staff_id, experience, rating, upvotes, downvotes)
         VALUES (?, ?, ?, ?, ?, ?)
         RETURNING {REVIEW_COLUMNS}"
    ))
    .bind(review.student_id)
    .bind(review.staff_id)
    .bind(&review.experience)
    .bind(review.rating)
    .bind(review.upvotes)
    .bind(review.downvotes)
    .fetch_one(db.pool())
    .await
    .map_err(DatabaseError::from)?;

    info!("Created review {:?} for student {}", review.id, review.student_id);
    Ok(review)
}

pub async fn get_review(db: &Database, id: i64) -> Result<Option<Review>, DatabaseError> {
    let review = sqlx::query_as::<_, Review>(&format!(
        "SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(db.pool())
    .await?;
    Ok(review)
}

pub async fn get_all_reviews(db: &Database) -> Result<Vec<Review>, DatabaseError> {
    let reviews = sqlx::query_as::<_, Review>(&format!(
        "SELECT {REVIEW_COLUMNS} FROM reviews ORDER BY id"
    ))
    .fetch_all(db.pool())
    .await?;
    Ok(reviews)
}

pub async fn get_all_reviews_json(db: &Database) -> Result<Vec<ReviewJson>, DatabaseError> {
    Ok(get_all_reviews(db).await?.iter().map(Review::to_json).collect())
}

pub async fn update_review_exp(
    db: &Database,
    id: i64,
    experience: &str,
) -> Result<Option<Review>, DatabaseError> {
    let review = sqlx::query_as::<_, Review>(&format!(
        "UPDATE reviews SET experience = ? WHERE id = ? RETURNING {REVIEW_COLUMNS}"
    ))
    .bind(experience)
    .bind(id)
    .fetch_optional(db.pool())
    .await?;
    Ok(review)
}

pub async fn update_review_rate(
    db: &Database,
    id: i64,
    rating: i64,
) -> Result<Option<Review>, ReviewError> {
    check_rating(rating)?;

    let review = sqlx::query_as::<_, Review>(&format!(
        "UPDATE reviews SET rating = ? WHERE id = ? RETURNING {REVIEW_COLUMNS}"
    ))
    .bind(rating)
    .bind(id)
    .fetch_optional(db.pool())
    .await
    .map_err(DatabaseError::from)?;
    Ok(review)
}

pub async fn upvote(db: &Database, id: i64) -> Result<Option<Review>, DatabaseError> {
    increment(db, id, Vote::Up).await
}

pub async fn downvote(db: &Database, id: i64) -> Result<Option<Review>, DatabaseError> {
    increment(db, id, Vote::Down).await
}

#[derive(Debug, Clone, Copy)]
enum Vote {
    Up,
    Down,
}

impl Vote {
    fn column(self) -> &'static str {
        match self {
            Vote::Up => "upvotes",
            Vote::Down => "downvotes",
        }
    }
}

/// Single-statement increment, so concurrent votes are never lost
async fn increment(db: &Database, id: i64, vote: Vote) -> Result<Option<Review>, DatabaseError> {
    let column = vote.column();
    let review = sqlx::query_as::<_, Review>(&format!(
        "UPDATE reviews SET {column} = {column} + 1 WHERE id = ? RETURNING {REVIEW_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(db.pool())
    .await?;
    Ok(review)
}

/// Remove a review, returning the row as it was just before deletion
pub async fn delete_review(db: &Database, id: i64) -> Result<Option<Review>, DatabaseError> {
    let review = sqlx::query_as::<_, Review>(&format!(
        "DELETE FROM reviews WHERE id = ? RETURNING {REVIEW_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(db.pool())
    .await?;

    if review.is_some() {
        info!("Deleted review {}", id);
    }
    Ok(review)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestContext;

    async fn seeded() -> (TestContext, i64) {
        let ctx = TestContext::new().await.unwrap();
        let review = create_review(ctx.db(), 816024126, 1, "This student was good!", 8)
            .await
            .unwrap();
        let id = review.id.unwrap();
        (ctx, id)
    }

    #[tokio::test]
    async fn test_update_review_exp() {
        let (ctx, id) = seeded().await;
        assert_eq!(id, 1);
        assert_eq!(
            get_review(ctx.db(), 1).await.unwrap().unwrap().experience,
            "This student was good!"
        );

        update_review_exp(ctx.db(), 1, "Bad").await.unwrap();

        let review = get_review(ctx.db(), 1).await.unwrap().unwrap();
        assert_eq!(review.experience, "Bad");
        assert_eq!(review.rating, 8);
    }

    #[tokio::test]
    async fn test_update_review_rating() {
        let (ctx, id) = seeded().await;

        update_review_rate(ctx.db(), id, 5).await.unwrap();

        assert_eq!(get_review(ctx.db(), id).await.unwrap().unwrap().rating, 5);
    }

    #[tokio::test]
    async fn out_of_range_rating_is_rejected() {
        let (ctx, id) = seeded().await;

        let err = update_review_rate(ctx.db(), id, 11).await.unwrap_err();
        assert!(matches!(err, ReviewError::InvalidRating(11)));
        assert_eq!(get_review(ctx.db(), id).await.unwrap().unwrap().rating, 8);

        let err = create_review(ctx.db(), 1, 1, "x", -1).await.unwrap_err();
        assert!(matches!(err, ReviewError::InvalidRating(-1)));
    }

    #[tokio::test]
    async fn test_review_delete() {
        let (ctx, id) = seeded().await;
        let review = get_review(ctx.db(), id).await.unwrap();

        let deleted = delete_review(ctx.db(), id).await.unwrap();

        assert_eq!(review, deleted);
        assert!(get_review(ctx.db(), id).await.unwrap().is_none());
        assert!(delete_review(ctx.db(), id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_review_upvote() {
        let (ctx, id) = seeded().await;

        let review = upvote(ctx.db(), id).await.unwrap().unwrap();
        assert_eq!((review.upvotes, review.downvotes), (1, 0));

        let review = upvote(ctx.db(), id).await.unwrap().unwrap();
        assert_eq!(review.upvotes, 2);
    }

    #[tokio::test]
    async fn test_review_downvote() {
        let (ctx, id) = seeded().await;

        let review = downvote(ctx.db(), id).await.unwrap().unwrap();
        assert_eq!((review.upvotes, review.downvotes), (0, 1));
    }

    #[tokio::test]
    async fn missing_review_operations_return_none() {
        let ctx = TestContext::new().await.unwrap();

        assert!(get_review(ctx.db(), 42).await.unwrap().is_none());
        assert!(update_review_exp(ctx.db(), 42, "Bad").await.unwrap().is_none());
        assert!(update_review_rate(ctx.db(), 42, 3).await.unwrap().is_none());
        assert!(upvote(ctx.db(), 42).await.unwrap().is_none());
        assert!(downvote(ctx.db(), 42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn concurrent_upvotes_are_all_counted() {
        let (ctx, id) = seeded().await;
        let db = ctx.db().clone();

        let tasks: Vec<_> = (0..20)
            .map(|_| {
                let db = db.clone();
                tokio::spawn(async move { upvote(&db, id).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(get_review(ctx.db(), id).await.unwrap().unwrap().upvotes, 20);
    }

    #[tokio::test]
    async fn reviews_json_lists_all() {
        let (ctx, _) = seeded().await;
        create_review(ctx.db(), 816024127, 2, "Attentive", 9).await.unwrap();

        let reviews = get_all_reviews_json(ctx.db()).await.unwrap();
        let experiences: Vec<_> = reviews.iter().map(|r| r.experience.as_str()).collect();
        assert_eq!(experiences, ["This student was good!", "Attentive"]);
    }
}
