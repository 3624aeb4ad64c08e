use super::{get_id, get_text, SqlRepository};
use crate::error::DbError;
use crate::repository::ProfileRepository;
use sqlx::any::AnyRow;
use tracing::{debug, info};
use tutorlink_common::models::{TuteeId, TuteeProfile, TutorId, TutorProfile, User, UserId};

fn tutor_from_row(row: &AnyRow) -> Result<TutorProfile, DbError> {
    Ok(TutorProfile {
        id: TutorId(get_id(row, "tutor_id")?),
        user_id: UserId(get_id(row, "user_id")?),
    })
}

fn tutee_from_row(row: &AnyRow) -> Result<TuteeProfile, DbError> {
    Ok(TuteeProfile {
        id: TuteeId(get_id(row, "tutee_id")?),
        user_id: UserId(get_id(row, "user_id")?),
    })
}

impl ProfileRepository for SqlRepository {
    async fn create_user(&self, email: &str, display_name: &str) -> Result<User, DbError> {
        debug!("Creating user {}", email);

        let query = r#"
            INSERT INTO users (email, display_name)
            VALUES ($1, $2)
            RETURNING id, email, display_name
        "#;

        let row = sqlx::query(query)
            .bind(email)
            .bind(display_name)
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| DbError::from_query("Failed to insert user", e))?;

        let user = User {
            id: UserId(get_id(&row, "id")?),
            email: get_text(&row, "email")?,
            display_name: get_text(&row, "display_name")?,
        };
        info!("User {} created", user.id);
        Ok(user)
    }

    async fn register_tutor(&self, user_id: UserId) -> Result<TutorProfile, DbError> {
        debug!("Registering tutor role for user {}", user_id);

        let query = r#"
            INSERT INTO tutors (user_id)
            VALUES ($1)
            RETURNING tutor_id, user_id
        "#;

        let row = sqlx::query(query)
            .bind(user_id.0)
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| DbError::from_query("Failed to insert tutor", e))?;

        tutor_from_row(&row)
    }

    async fn register_tutee(&self, user_id: UserId) -> Result<TuteeProfile, DbError> {
        debug!("Registering tutee role for user {}", user_id);

        let query = r#"
            INSERT INTO tutees (user_id)
            VALUES ($1)
            RETURNING tutee_id, user_id
        "#;

        let row = sqlx::query(query)
            .bind(user_id.0)
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| DbError::from_query("Failed to insert tutee", e))?;

        tutee_from_row(&row)
    }

    async fn find_tutor_by_user(&self, user_id: UserId) -> Result<Option<TutorProfile>, DbError> {
        let query = r#"
            SELECT tutor_id, user_id
            FROM tutors
            WHERE user_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(user_id.0)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::from_query("Failed to look up tutor", e))?;

        row.as_ref().map(tutor_from_row).transpose()
    }

    async fn find_tutee_by_user(&self, user_id: UserId) -> Result<Option<TuteeProfile>, DbError> {
        let query = r#"
            SELECT tutee_id, user_id
            FROM tutees
            WHERE user_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(user_id.0)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::from_query("Failed to look up tutee", e))?;

        row.as_ref().map(tutee_from_row).transpose()
    }
}
