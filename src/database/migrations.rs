use super::Database;
use sqlx::Error as SqlxError;

impl Database {
    /// Run database migrations to create tables
    pub(super) async fn run_migrations(&self) -> Result<(), SqlxError> {
        self.create_contact_tables().await?;
        Ok(())
    }

    async fn create_contact_tables(&self) -> Result<(), SqlxError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contacts (
                id SERIAL PRIMARY KEY,
                first_name VARCHAR(50) NOT NULL,
                last_name VARCHAR(50) NOT NULL,
                email TEXT NOT NULL UNIQUE,
                phone_number TEXT NOT NULL,
                birth_date DATE NOT NULL,
                additional_info TEXT
            )
            "#,
        )
        .execute(self.pool())
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS ix_contacts_first_name ON contacts (first_name)")
            .execute(self.pool())
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS ix_contacts_last_name ON contacts (last_name)")
            .execute(self.pool())
            .await?;

        Ok(())
    }
}
