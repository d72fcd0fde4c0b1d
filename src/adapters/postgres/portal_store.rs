//! PostgreSQL implementation of PortalStore.
//!
//! Schema lives in `migrations/`. Enum columns are bound and read as text
//! with explicit casts, identity metadata as `jsonb` text.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::classroom::{
    AttendanceRecord, AttendanceStatus, AuthIdentity, Class, Post, Profile, UserRole,
};
use crate::domain::foundation::{
    AttendanceId, ClassId, DomainError, ErrorCode, PostId, Timestamp, UserId,
};
use crate::domain::policy::AttendanceRow;
use crate::ports::PortalStore;

/// PostgreSQL implementation of PortalStore.
#[derive(Clone)]
pub struct PostgresPortalStore {
    pool: PgPool,
}

impl PostgresPortalStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const ATTENDANCE_COLUMNS: &str = r#"
    a.id, a.student_id, a.date, a.status::text AS status, a.created_at,
    p.class_id AS student_class_id
"#;

#[async_trait]
impl PortalStore for PostgresPortalStore {
    async fn insert_identity(
        &self,
        identity: &AuthIdentity,
        profile: &Profile,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database(format!("Failed to start transaction: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO auth_identities (id, email, metadata, created_at)
            VALUES ($1, $2, $3::jsonb, $4)
            "#,
        )
        .bind(identity.id().as_uuid())
        .bind(identity.email())
        .bind(identity.metadata().to_string())
        .bind(identity.created_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| map_db_error(e, "insert identity"))?;

        sqlx::query(
            r#"
            INSERT INTO profiles (id, name, role, class_id, created_at, updated_at)
            VALUES ($1, $2, $3::user_role, $4, $5, $6)
            "#,
        )
        .bind(profile.id().as_uuid())
        .bind(profile.name())
        .bind(profile.role().as_str())
        .bind(profile.class_id().map(|c| *c.as_uuid()))
        .bind(profile.created_at().as_datetime())
        .bind(profile.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| map_db_error(e, "insert profile"))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database(format!("Failed to commit transaction: {}", e)))?;

        Ok(())
    }

    async fn find_identity(&self, id: &UserId) -> Result<Option<AuthIdentity>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, metadata::text AS metadata, created_at
            FROM auth_identities
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "fetch identity"))?;

        row.map(row_to_identity).transpose()
    }

    async fn delete_identity(&self, id: &UserId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM auth_identities WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "delete identity"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::IdentityNotFound,
                format!("identity {}", id),
            ));
        }

        Ok(())
    }

    async fn list_classes(&self) -> Result<Vec<Class>, DomainError> {
        let rows = sqlx::query("SELECT id, name, created_at FROM classes ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "list classes"))?;

        rows.into_iter().map(row_to_class).collect()
    }

    async fn find_class(&self, id: &ClassId) -> Result<Option<Class>, DomainError> {
        let row = sqlx::query("SELECT id, name, created_at FROM classes WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "fetch class"))?;

        row.map(row_to_class).transpose()
    }

    async fn find_profile(&self, id: &UserId) -> Result<Option<Profile>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, role::text AS role, class_id, created_at, updated_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "fetch profile"))?;

        row.map(row_to_profile).transpose()
    }

    async fn update_profile(&self, profile: &Profile) -> Result<(), DomainError> {
        // updated_at is also refreshed by the profiles_touch_updated_at trigger.
        let result = sqlx::query(
            r#"
            UPDATE profiles SET
                name = $2,
                class_id = $3,
                updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(profile.id().as_uuid())
        .bind(profile.name())
        .bind(profile.class_id().map(|c| *c.as_uuid()))
        .bind(profile.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "update profile"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProfileNotFound,
                format!("profile {}", profile.id()),
            ));
        }

        Ok(())
    }

    async fn list_profiles_in_class(&self, class_id: &ClassId) -> Result<Vec<Profile>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, role::text AS role, class_id, created_at, updated_at
            FROM profiles
            WHERE class_id = $1
            ORDER BY name, id
            "#,
        )
        .bind(class_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "list profiles"))?;

        rows.into_iter().map(row_to_profile).collect()
    }

    async fn insert_post(&self, post: &Post) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, teacher_id, class_id, title, content, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(post.id().as_uuid())
        .bind(post.teacher_id().as_uuid())
        .bind(post.class_id().as_uuid())
        .bind(post.title())
        .bind(post.content())
        .bind(post.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "insert post"))?;

        Ok(())
    }

    async fn find_post(&self, id: &PostId) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, teacher_id, class_id, title, content, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "fetch post"))?;

        row.map(row_to_post).transpose()
    }

    async fn update_post(&self, post: &Post) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE posts SET title = $2, content = $3 WHERE id = $1")
            .bind(post.id().as_uuid())
            .bind(post.title())
            .bind(post.content())
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "update post"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::PostNotFound,
                format!("post {}", post.id()),
            ));
        }

        Ok(())
    }

    async fn delete_post(&self, id: &PostId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "delete post"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::PostNotFound,
                format!("post {}", id),
            ));
        }

        Ok(())
    }

    async fn list_posts_in_class(&self, class_id: &ClassId) -> Result<Vec<Post>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, teacher_id, class_id, title, content, created_at
            FROM posts
            WHERE class_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(class_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "list posts"))?;

        rows.into_iter().map(row_to_post).collect()
    }

    async fn upsert_attendance(
        &self,
        record: &AttendanceRecord,
    ) -> Result<AttendanceRecord, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO attendance (id, student_id, date, status, created_at)
            VALUES ($1, $2, $3, $4::attendance_status, $5)
            ON CONFLICT (student_id, date) DO UPDATE SET status = EXCLUDED.status
            RETURNING id, student_id, date, status::text AS status, created_at
            "#,
        )
        .bind(record.id().as_uuid())
        .bind(record.student_id().as_uuid())
        .bind(record.date())
        .bind(record.status().as_str())
        .bind(record.created_at().as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "upsert attendance"))?;

        row_to_attendance_record(&row)
    }

    async fn upsert_attendance_in_class(
        &self,
        record: &AttendanceRecord,
        class_id: Option<ClassId>,
    ) -> Result<AttendanceRecord, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database(format!("Failed to start transaction: {}", e)))?;

        // FOR SHARE holds off a concurrent class change until commit.
        let current = sqlx::query("SELECT class_id FROM profiles WHERE id = $1 FOR SHARE")
            .bind(record.student_id().as_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_db_error(e, "lock student profile"))?;

        if let Some(row) = current {
            let current: Option<Uuid> = get(&row, "class_id")?;
            if current != class_id.map(|c| *c.as_uuid()) {
                return Err(DomainError::new(
                    ErrorCode::Forbidden,
                    format!("student {} changed class", record.student_id()),
                ));
            }
        }

        let row = sqlx::query(
            r#"
            INSERT INTO attendance (id, student_id, date, status, created_at)
            VALUES ($1, $2, $3, $4::attendance_status, $5)
            ON CONFLICT (student_id, date) DO UPDATE SET status = EXCLUDED.status
            RETURNING id, student_id, date, status::text AS status, created_at
            "#,
        )
        .bind(record.id().as_uuid())
        .bind(record.student_id().as_uuid())
        .bind(record.date())
        .bind(record.status().as_str())
        .bind(record.created_at().as_datetime())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_db_error(e, "upsert attendance"))?;

        let stored = row_to_attendance_record(&row)?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database(format!("Failed to commit transaction: {}", e)))?;

        Ok(stored)
    }

    async fn find_attendance(
        &self,
        student_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRow>, DomainError> {
        let sql = format!(
            r#"
            SELECT {ATTENDANCE_COLUMNS}
            FROM attendance a
            LEFT JOIN profiles p ON p.id = a.student_id
            WHERE a.student_id = $1 AND a.date = $2
            "#
        );
        let row = sqlx::query(&sql)
            .bind(student_id.as_uuid())
            .bind(date)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "fetch attendance"))?;

        row.map(row_to_attendance_row).transpose()
    }

    async fn list_attendance_for_student(
        &self,
        student_id: &UserId,
    ) -> Result<Vec<AttendanceRow>, DomainError> {
        let sql = format!(
            r#"
            SELECT {ATTENDANCE_COLUMNS}
            FROM attendance a
            LEFT JOIN profiles p ON p.id = a.student_id
            WHERE a.student_id = $1
            ORDER BY a.date DESC
            "#
        );
        let rows = sqlx::query(&sql)
            .bind(student_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "list student attendance"))?;

        rows.into_iter().map(row_to_attendance_row).collect()
    }

    async fn list_attendance_for_class(
        &self,
        class_id: &ClassId,
        date: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRow>, DomainError> {
        let sql = format!(
            r#"
            SELECT {ATTENDANCE_COLUMNS}
            FROM attendance a
            JOIN profiles p ON p.id = a.student_id
            WHERE p.class_id = $1 AND ($2::date IS NULL OR a.date = $2)
            ORDER BY a.date DESC, a.student_id
            "#
        );
        let rows = sqlx::query(&sql)
            .bind(class_id.as_uuid())
            .bind(date)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "list class attendance"))?;

        rows.into_iter().map(row_to_attendance_row).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn map_db_error(e: sqlx::Error, action: &str) -> DomainError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => DomainError::new(
            ErrorCode::UniqueViolation,
            format!("Failed to {}: {}", action, db_err.message()),
        ),
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => DomainError::new(
            ErrorCode::ForeignKeyViolation,
            format!("Failed to {}: {}", action, db_err.message()),
        ),
        _ => DomainError::database(format!("Failed to {}: {}", action, e)),
    }
}

fn get<'r, T>(row: &'r PgRow, column: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column)
        .map_err(|e| DomainError::database(format!("Failed to get {}: {}", column, e)))
}

fn str_to_role(s: &str) -> Result<UserRole, DomainError> {
    s.parse()
        .map_err(|_| DomainError::database(format!("Invalid user role: {}", s)))
}

fn str_to_status(s: &str) -> Result<AttendanceStatus, DomainError> {
    s.parse()
        .map_err(|_| DomainError::database(format!("Invalid attendance status: {}", s)))
}

fn row_to_identity(row: PgRow) -> Result<AuthIdentity, DomainError> {
    let metadata: String = get(&row, "metadata")?;
    let metadata = serde_json::from_str(&metadata)
        .map_err(|e| DomainError::database(format!("Invalid identity metadata: {}", e)))?;
    let created_at: DateTime<Utc> = get(&row, "created_at")?;

    Ok(AuthIdentity::reconstitute(
        UserId::from_uuid(get(&row, "id")?),
        get(&row, "email")?,
        metadata,
        Timestamp::from_datetime(created_at),
    ))
}

fn row_to_class(row: PgRow) -> Result<Class, DomainError> {
    let created_at: DateTime<Utc> = get(&row, "created_at")?;
    Ok(Class::reconstitute(
        ClassId::from_uuid(get(&row, "id")?),
        get(&row, "name")?,
        Timestamp::from_datetime(created_at),
    ))
}

fn row_to_profile(row: PgRow) -> Result<Profile, DomainError> {
    let role: String = get(&row, "role")?;
    let class_id: Option<Uuid> = get(&row, "class_id")?;
    let created_at: DateTime<Utc> = get(&row, "created_at")?;
    let updated_at: DateTime<Utc> = get(&row, "updated_at")?;

    Ok(Profile::reconstitute(
        UserId::from_uuid(get(&row, "id")?),
        get(&row, "name")?,
        str_to_role(&role)?,
        class_id.map(ClassId::from_uuid),
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

fn row_to_post(row: PgRow) -> Result<Post, DomainError> {
    let created_at: DateTime<Utc> = get(&row, "created_at")?;
    Ok(Post::reconstitute(
        PostId::from_uuid(get(&row, "id")?),
        UserId::from_uuid(get(&row, "teacher_id")?),
        ClassId::from_uuid(get(&row, "class_id")?),
        get(&row, "title")?,
        get(&row, "content")?,
        Timestamp::from_datetime(created_at),
    ))
}

fn row_to_attendance_record(row: &PgRow) -> Result<AttendanceRecord, DomainError> {
    let status: String = get(row, "status")?;
    let created_at: DateTime<Utc> = get(row, "created_at")?;
    Ok(AttendanceRecord::reconstitute(
        AttendanceId::from_uuid(get(row, "id")?),
        UserId::from_uuid(get(row, "student_id")?),
        get(row, "date")?,
        str_to_status(&status)?,
        Timestamp::from_datetime(created_at),
    ))
}

fn row_to_attendance_row(row: PgRow) -> Result<AttendanceRow, DomainError> {
    let student_class_id: Option<Uuid> = get(&row, "student_class_id")?;
    Ok(AttendanceRow::new(
        row_to_attendance_record(&row)?,
        student_class_id.map(ClassId::from_uuid),
    ))
}
