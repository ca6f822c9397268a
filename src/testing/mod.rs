use crate::database::Database;

/// Private in-memory store with the schema applied, one per test
pub struct TestContext {
    db: Database,
}

impl TestContext {
    pub async fn new() -> anyhow::Result<Self> {
        let db = Database::in_memory()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to open test database: {}", e))?;
        db.create_schema().await?;
        Ok(Self { db })
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Drop and recreate every table
    pub async fn reset(&self) -> anyhow::Result<()> {
        self.db.drop_schema().await?;
        self.db.create_schema().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::student_service;

    #[tokio::test]
    async fn contexts_are_isolated() {
        let first = TestContext::new().await.unwrap();
        let second = TestContext::new().await.unwrap();

        student_service::create_student(first.db(), 1, "Ann").await.unwrap();

        assert_eq!(student_service::get_all_students(first.db()).await.unwrap().len(), 1);
        assert!(student_service::get_all_students(second.db()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reset_empties_tables() {
        let ctx = TestContext::new().await.unwrap();
        student_service::create_student(ctx.db(), 1, "Ann").await.unwrap();

        ctx.reset().await.unwrap();

        assert!(student_service::get_all_students(ctx.db()).await.unwrap().is_empty());
    }
}
