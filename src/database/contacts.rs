use super::Database;
use chrono::NaiveDate;
use sqlx::{Postgres, QueryBuilder};

use crate::models::{Contact, ContactBody, SearchFilter};
use crate::store::{ContactStore, StoreError};
use crate::utils::string_utils::like_pattern;

const CONTACT_COLUMNS: &str =
    "id, first_name, last_name, email, phone_number, birth_date, additional_info";

/// Row layout of the `contacts` table
#[derive(sqlx::FromRow)]
struct ContactRow {
    id: i32,
    first_name: String,
    last_name: String,
    email: String,
    phone_number: String,
    birth_date: NaiveDate,
    additional_info: Option<String>,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Contact {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone_number: row.phone_number,
            birth_date: row.birth_date,
            additional_info: row.additional_info,
        }
    }
}

/// Turn a unique-constraint failure on `email` into a store error
fn map_write_error(err: sqlx::Error, email: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::DuplicateEmail(email.to_string());
        }
    }
    StoreError::Database(err)
}

impl ContactStore for Database {
    async fn create(&self, body: ContactBody) -> Result<Contact, StoreError> {
        let row: ContactRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO contacts (first_name, last_name, email, phone_number, birth_date, additional_info)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {CONTACT_COLUMNS}
            "#
        ))
        .bind(&body.first_name)
        .bind(&body.last_name)
        .bind(&body.email)
        .bind(&body.phone_number)
        .bind(body.birth_date)
        .bind(&body.additional_info)
        .fetch_one(self.pool())
        .await
        .map_err(|err| map_write_error(err, &body.email))?;

        Ok(row.into())
    }

    async fn get(&self, id: i32) -> Result<Option<Contact>, StoreError> {
        let row: Option<ContactRow> =
            sqlx::query_as(&format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.pool())
                .await?;

        Ok(row.map(Contact::from))
    }

    async fn list(&self, skip: u32, limit: u32) -> Result<Vec<Contact>, StoreError> {
        let rows: Vec<ContactRow> = sqlx::query_as(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY id OFFSET $1 LIMIT $2"
        ))
        .bind(i64::from(skip))
        .bind(i64::from(limit))
        .fetch_all(self.pool())
        .await?;

        Ok(rows.into_iter().map(Contact::from).collect())
    }

    async fn update(&self, id: i32, body: ContactBody) -> Result<Option<Contact>, StoreError> {
        let row: Option<ContactRow> = sqlx::query_as(&format!(
            r#"
            UPDATE contacts SET
                first_name = $2,
                last_name = $3,
                email = $4,
                phone_number = $5,
                birth_date = $6,
                additional_info = $7
            WHERE id = $1
            RETURNING {CONTACT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&body.first_name)
        .bind(&body.last_name)
        .bind(&body.email)
        .bind(&body.phone_number)
        .bind(body.birth_date)
        .bind(&body.additional_info)
        .fetch_optional(self.pool())
        .await
        .map_err(|err| map_write_error(err, &body.email))?;

        Ok(row.map(Contact::from))
    }

    async fn remove(&self, id: i32) -> Result<Option<Contact>, StoreError> {
        let row: Option<ContactRow> = sqlx::query_as(&format!(
            "DELETE FROM contacts WHERE id = $1 RETURNING {CONTACT_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(row.map(Contact::from))
    }

    async fn search(&self, filter: &SearchFilter) -> Result<Vec<Contact>, StoreError> {
        let mut query =
            QueryBuilder::<Postgres>::new(format!("SELECT {CONTACT_COLUMNS} FROM contacts"));

        for (index, predicate) in filter.predicates().iter().enumerate() {
            query.push(if index == 0 { " WHERE " } else { " AND " });
            query.push(predicate.field.column());
            query.push(" ILIKE ");
            query.push_bind(like_pattern(&predicate.needle));
        }
        query.push(" ORDER BY id");

        let rows: Vec<ContactRow> = query.build_query_as().fetch_all(self.pool()).await?;

        Ok(rows.into_iter().map(Contact::from).collect())
    }

    async fn fetch_all(&self) -> Result<Vec<Contact>, StoreError> {
        let rows: Vec<ContactRow> =
            sqlx::query_as(&format!("SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY id"))
                .fetch_all(self.pool())
                .await?;

        Ok(rows.into_iter().map(Contact::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    use crate::models::fixtures::{body, date};

    async fn database(pool: PgPool) -> Database {
        let db = Database { pool };
        db.run_migrations().await.unwrap();
        db
    }

    async fn seeded(pool: PgPool) -> Database {
        let db = database(pool).await;
        for (first_name, last_name, email) in [
            ("Ada", "Lovelace", "ada@example.com"),
            ("Alan", "Turing", "alan@example.org"),
            ("Grace", "Hopper", "grace_h@example.com"),
        ] {
            db.create(body(first_name, last_name, email, date(1950, 1, 1)))
                .await
                .unwrap();
        }
        db
    }

    fn first_names(contacts: Vec<Contact>) -> Vec<String> {
        contacts.into_iter().map(|c| c.first_name).collect()
    }

    #[sqlx::test(migrations = false)]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_search_ands_active_predicates(pool: PgPool) {
        let db = seeded(pool).await;

        let all = db.search(&SearchFilter::default()).await.unwrap();
        assert_eq!(first_names(all), vec!["Ada", "Alan", "Grace"]);

        let by_email = SearchFilter {
            email: Some("EXAMPLE.COM".to_string()),
            ..Default::default()
        };
        assert_eq!(first_names(db.search(&by_email).await.unwrap()), vec!["Ada", "Grace"]);

        let narrowed = SearchFilter {
            first_name: Some("a".to_string()),
            last_name: Some("TUR".to_string()),
            email: Some(".org".to_string()),
        };
        assert_eq!(first_names(db.search(&narrowed).await.unwrap()), vec!["Alan"]);

        let disjoint = SearchFilter {
            first_name: Some("alan".to_string()),
            last_name: Some("hopper".to_string()),
            ..Default::default()
        };
        assert!(db.search(&disjoint).await.unwrap().is_empty());
    }

    #[sqlx::test(migrations = false)]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_search_matches_wildcards_literally(pool: PgPool) {
        let db = seeded(pool).await;

        let underscore = SearchFilter {
            email: Some("_h@".to_string()),
            ..Default::default()
        };
        assert_eq!(first_names(db.search(&underscore).await.unwrap()), vec!["Grace"]);

        let percent = SearchFilter {
            first_name: Some("%".to_string()),
            ..Default::default()
        };
        assert!(db.search(&percent).await.unwrap().is_empty());
    }

    #[sqlx::test(migrations = false)]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_unique_violation_maps_to_duplicate_email(pool: PgPool) {
        let db = seeded(pool).await;

        let created = db
            .create(body("Other", "Ada", "ada@example.com", date(1990, 1, 1)))
            .await;
        assert!(matches!(created, Err(StoreError::DuplicateEmail(email)) if email == "ada@example.com"));

        let updated = db
            .update(2, body("Alan", "Turing", "ada@example.com", date(1912, 6, 23)))
            .await;
        assert!(matches!(updated, Err(StoreError::DuplicateEmail(_))));
        assert_eq!(db.get(2).await.unwrap().unwrap().email, "alan@example.org");

        let kept = db
            .update(2, body("Alan M.", "Turing", "alan@example.org", date(1912, 6, 23)))
            .await
            .unwrap();
        assert_eq!(kept.map(|c| c.first_name), Some("Alan M.".to_string()));
    }

    #[sqlx::test(migrations = false)]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_crud_round_trip(pool: PgPool) {
        let db = seeded(pool).await;

        let page = db.list(1, 1).await.unwrap();
        assert_eq!(first_names(page), vec!["Alan"]);

        let missing = db
            .update(99, body("No", "One", "no@example.com", date(2000, 1, 1)))
            .await
            .unwrap();
        assert!(missing.is_none());

        let removed = db.remove(1).await.unwrap().unwrap();
        assert_eq!(removed.email, "ada@example.com");
        assert!(db.get(1).await.unwrap().is_none());
        assert!(db.remove(1).await.unwrap().is_none());

        let reused = db
            .create(body("New", "Ada", "ada@example.com", date(2000, 2, 29)))
            .await
            .unwrap();
        assert_eq!(reused.id, 4);
        assert_eq!(reused.birth_date, date(2000, 2, 29));
        assert_eq!(db.fetch_all().await.unwrap().len(), 3);
    }
}
