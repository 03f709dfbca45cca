//! Data-access seam. Handlers and services talk to a [`Store`] trait object
//! so business rules can be exercised against an in-memory implementation;
//! the process wires in [`PgStore`] at startup.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    Attendance, AttendanceDetailRow, Meetup, MeetupChanges, MeetupWithImage, NewMeetup,
    ScheduleRow, UpcomingAttendanceRow,
};

pub mod postgres;

#[cfg(test)]
pub mod memory;

pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Unique-constraint hit on (user, meetup); raced inserts land here.
    #[error("attendance already exists")]
    DuplicateAttendance,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// The specific queries this service needs, and nothing more generic.
#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_meetup(&self, new: NewMeetup) -> Result<Meetup, StoreError>;

    async fn meetup_by_id(&self, id: Uuid) -> Result<Option<Meetup>, StoreError>;

    /// Point lookup scoped to the organizer; `None` means "does not exist
    /// or is not yours", which callers surface as a single rejection.
    async fn meetup_owned(
        &self,
        id: Uuid,
        organizer_id: Uuid,
    ) -> Result<Option<Meetup>, StoreError>;

    async fn update_meetup(&self, id: Uuid, changes: MeetupChanges) -> Result<Meetup, StoreError>;

    async fn delete_meetup(&self, id: Uuid) -> Result<(), StoreError>;

    /// Organizer's own meetups dated `now` or later, image joined,
    /// ascending by date.
    async fn upcoming_meetups_by_organizer(
        &self,
        organizer_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<MeetupWithImage>, StoreError>;

    /// Meetups with `start <= date < end`, organizer and image joined,
    /// attendee ids aggregated, ascending by date, offset/limit paginated.
    async fn meetups_in_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ScheduleRow>, StoreError>;

    async fn count_meetups_in_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64, StoreError>;

    async fn insert_attendance(
        &self,
        user_id: Uuid,
        meetup_id: Uuid,
    ) -> Result<Attendance, StoreError>;

    async fn attendance_exists(&self, user_id: Uuid, meetup_id: Uuid)
        -> Result<bool, StoreError>;

    /// Whether the user already attends another meetup at exactly `date`.
    async fn attendance_at_same_instant(
        &self,
        user_id: Uuid,
        date: DateTime<Utc>,
    ) -> Result<bool, StoreError>;

    async fn count_attendees(&self, meetup_id: Uuid) -> Result<i64, StoreError>;

    async fn attendance_detail(
        &self,
        user_id: Uuid,
        meetup_id: Uuid,
    ) -> Result<Option<AttendanceDetailRow>, StoreError>;

    async fn upcoming_attendances(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<UpcomingAttendanceRow>, StoreError>;
}
