use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::models::{
    Attendance, AttendanceDetailRow, Meetup, MeetupChanges, MeetupWithImage, NewMeetup,
    ScheduleRow, UpcomingAttendanceRow,
};

const ATTENDANCE_UNIQUE_CONSTRAINT: &str = "attendances_user_meetup_key";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_meetup(&self, new: NewMeetup) -> Result<Meetup, StoreError> {
        let meetup = sqlx::query_as::<_, Meetup>(
            r#"
            INSERT INTO meetups (organizer_id, title, description, location, date, image_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(new.organizer_id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.location)
        .bind(new.date)
        .bind(new.image_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(meetup)
    }

    async fn meetup_by_id(&self, id: Uuid) -> Result<Option<Meetup>, StoreError> {
        let meetup = sqlx::query_as::<_, Meetup>("SELECT * FROM meetups WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(meetup)
    }

    async fn meetup_owned(
        &self,
        id: Uuid,
        organizer_id: Uuid,
    ) -> Result<Option<Meetup>, StoreError> {
        let meetup = sqlx::query_as::<_, Meetup>(
            "SELECT * FROM meetups WHERE id = $1 AND organizer_id = $2",
        )
        .bind(id)
        .bind(organizer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(meetup)
    }

    async fn update_meetup(&self, id: Uuid, changes: MeetupChanges) -> Result<Meetup, StoreError> {
        let meetup = sqlx::query_as::<_, Meetup>(
            r#"
            UPDATE meetups SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                location = COALESCE($4, location),
                date = COALESCE($5, date),
                image_id = COALESCE($6, image_id),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.location)
        .bind(changes.date)
        .bind(changes.image_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(meetup)
    }

    async fn delete_meetup(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM meetups WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn upcoming_meetups_by_organizer(
        &self,
        organizer_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<MeetupWithImage>, StoreError> {
        let meetups = sqlx::query_as::<_, MeetupWithImage>(
            r#"
            SELECT m.id, m.organizer_id, m.title, m.description, m.location, m.date,
                   m.image_id, f.path AS image_path, f.url AS image_url
            FROM meetups m
            LEFT JOIN files f ON f.id = m.image_id
            WHERE m.organizer_id = $1 AND m.date >= $2
            ORDER BY m.date ASC
            "#,
        )
        .bind(organizer_id)
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(meetups)
    }

    async fn meetups_in_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ScheduleRow>, StoreError> {
        let rows = sqlx::query_as::<_, ScheduleRow>(
            r#"
            SELECT m.id, m.title, m.description, m.location, m.date,
                   u.name AS organizer_name, u.email AS organizer_email,
                   f.path AS image_path, f.url AS image_url,
                   COALESCE(array_remove(array_agg(a.user_id), NULL), '{}') AS attendee_ids
            FROM meetups m
            JOIN users u ON u.id = m.organizer_id
            LEFT JOIN files f ON f.id = m.image_id
            LEFT JOIN attendances a ON a.meetup_id = m.id
            WHERE m.date >= $1 AND m.date < $2
            GROUP BY m.id, u.name, u.email, f.path, f.url
            ORDER BY m.date ASC
            OFFSET $3 LIMIT $4
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn count_meetups_in_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64, StoreError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM meetups WHERE date >= $1 AND date < $2",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    async fn insert_attendance(
        &self,
        user_id: Uuid,
        meetup_id: Uuid,
    ) -> Result<Attendance, StoreError> {
        let attendance = sqlx::query_as::<_, Attendance>(
            r#"
            INSERT INTO attendances (user_id, meetup_id)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(meetup_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db)
                if db.constraint() == Some(ATTENDANCE_UNIQUE_CONSTRAINT) =>
            {
                StoreError::DuplicateAttendance
            }
            _ => StoreError::Database(e),
        })?;

        Ok(attendance)
    }

    async fn attendance_exists(
        &self,
        user_id: Uuid,
        meetup_id: Uuid,
    ) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM attendances WHERE user_id = $1 AND meetup_id = $2)",
        )
        .bind(user_id)
        .bind(meetup_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn attendance_at_same_instant(
        &self,
        user_id: Uuid,
        date: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1
                FROM attendances a
                JOIN meetups m ON m.id = a.meetup_id
                WHERE a.user_id = $1 AND m.date = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn count_attendees(&self, meetup_id: Uuid) -> Result<i64, StoreError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM attendances WHERE meetup_id = $1",
        )
        .bind(meetup_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    async fn attendance_detail(
        &self,
        user_id: Uuid,
        meetup_id: Uuid,
    ) -> Result<Option<AttendanceDetailRow>, StoreError> {
        let row = sqlx::query_as::<_, AttendanceDetailRow>(
            r#"
            SELECT a.id, a.user_id, a.meetup_id,
                   m.title AS meetup_title, m.description AS meetup_description,
                   m.location AS meetup_location, m.date AS meetup_date,
                   o.name AS organizer_name, o.email AS organizer_email,
                   u.name AS attendee_name, u.email AS attendee_email
            FROM attendances a
            JOIN meetups m ON m.id = a.meetup_id
            JOIN users o ON o.id = m.organizer_id
            JOIN users u ON u.id = a.user_id
            WHERE a.user_id = $1 AND a.meetup_id = $2
            "#,
        )
        .bind(user_id)
        .bind(meetup_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn upcoming_attendances(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<UpcomingAttendanceRow>, StoreError> {
        let rows = sqlx::query_as::<_, UpcomingAttendanceRow>(
            r#"
            SELECT a.user_id, m.id AS meetup_id, m.title, m.description, m.location, m.date
            FROM attendances a
            JOIN meetups m ON m.id = a.meetup_id
            WHERE a.user_id = $1 AND m.date > $2
            ORDER BY m.date ASC
            "#,
        )
        .bind(user_id)
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
