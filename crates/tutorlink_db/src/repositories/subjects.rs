use super::{get_id, get_optional_id, get_text, SqlRepository};
use crate::error::DbError;
use crate::repository::SubjectRepository;
use sqlx::any::AnyRow;
use tracing::{debug, info};
use tutorlink_common::models::{Subject, SubjectId, TutorId};

fn subject_from_row(row: &AnyRow) -> Result<Subject, DbError> {
    Ok(Subject {
        id: SubjectId(get_id(row, "subject_id")?),
        name: get_text(row, "subject_name")?,
        tutor_id: get_optional_id(row, "tutor_id")?.map(TutorId),
    })
}

impl SubjectRepository for SqlRepository {
    async fn insert_subject(&self, tutor_id: TutorId, name: &str) -> Result<Subject, DbError> {
        debug!("Inserting subject '{}' for tutor {}", name, tutor_id);

        let query = r#"
            INSERT INTO subjects (subject_name, tutor_id)
            VALUES ($1, $2)
            RETURNING subject_id, subject_name, tutor_id
        "#;

        let row = sqlx::query(query)
            .bind(name)
            .bind(tutor_id.0)
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| DbError::from_query("Failed to insert subject", e))?;

        let subject = subject_from_row(&row)?;
        info!("Subject {} created", subject.id);
        Ok(subject)
    }

    async fn find_subject(&self, subject_id: SubjectId) -> Result<Option<Subject>, DbError> {
        let query = r#"
            SELECT subject_id, subject_name, tutor_id
            FROM subjects
            WHERE subject_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(subject_id.0)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::from_query("Failed to find subject", e))?;

        row.as_ref().map(subject_from_row).transpose()
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>, DbError> {
        let query = r#"
            SELECT subject_id, subject_name, tutor_id
            FROM subjects
            ORDER BY subject_name ASC, subject_id ASC
        "#;

        let rows = sqlx::query(query)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::from_query("Failed to list subjects", e))?;

        rows.iter().map(subject_from_row).collect()
    }

    async fn subjects_for_tutor(&self, tutor_id: TutorId) -> Result<Vec<Subject>, DbError> {
        let query = r#"
            SELECT subject_id, subject_name, tutor_id
            FROM subjects
            WHERE tutor_id = $1
               OR subject_id IN (SELECT subject_id FROM tutor_subjects WHERE tutor_id = $2)
            ORDER BY subject_id ASC
        "#;

        let rows = sqlx::query(query)
            .bind(tutor_id.0)
            .bind(tutor_id.0)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::from_query("Failed to list tutor subjects", e))?;

        rows.iter().map(subject_from_row).collect()
    }

    async fn enroll_tutor(&self, tutor_id: TutorId, subject_id: SubjectId) -> Result<(), DbError> {
        debug!("Enrolling tutor {} in subject {}", tutor_id, subject_id);

        sqlx::query("INSERT INTO tutor_subjects (tutor_id, subject_id) VALUES ($1, $2)")
            .bind(tutor_id.0)
            .bind(subject_id.0)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| DbError::from_query("Failed to enroll tutor", e))?;

        Ok(())
    }

    async fn tutors_for_subject(&self, subject_id: SubjectId) -> Result<Vec<TutorId>, DbError> {
        let query = r#"
            SELECT tutor_id FROM subjects WHERE subject_id = $1 AND tutor_id IS NOT NULL
            UNION
            SELECT tutor_id FROM tutor_subjects WHERE subject_id = $2
            ORDER BY tutor_id ASC
        "#;

        let rows = sqlx::query(query)
            .bind(subject_id.0)
            .bind(subject_id.0)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::from_query("Failed to list subject tutors", e))?;

        rows.iter()
            .map(|row| get_id(row, "tutor_id").map(TutorId))
            .collect()
    }

    async fn delete_unbooked_subject(&self, subject_id: SubjectId) -> Result<bool, DbError> {
        debug!("Deleting subject {}", subject_id);

        let mut tx = self.db_client.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM tutor_subjects
            WHERE subject_id = $1
              AND NOT EXISTS (SELECT 1 FROM bookings WHERE bookings.subject_id = $2)
            "#,
        )
        .bind(subject_id.0)
        .bind(subject_id.0)
        .execute(&mut *tx)
        .await
        .map_err(|e| DbError::from_query("Failed to delete subject enrollments", e))?;

        let result = sqlx::query(
            r#"
            DELETE FROM subjects
            WHERE subject_id = $1
              AND NOT EXISTS (SELECT 1 FROM bookings WHERE bookings.subject_id = $2)
            "#,
        )
        .bind(subject_id.0)
        .bind(subject_id.0)
        .execute(&mut *tx)
        .await
        .map_err(|e| DbError::from_query("Failed to delete subject", e))?;

        if result.rows_affected() == 0 {
            // Booked or already gone; keep its enrollments.
            tx.rollback()
                .await
                .map_err(|e| DbError::TransactionError(e.to_string()))?;
            return Ok(false);
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))?;
        Ok(true)
    }
}
