use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Attendance {
    pub id: Uuid,
    pub user_id: Uuid,
    pub meetup_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Attendance joined with its meetup, the meetup's organizer and the
/// attending user, projected to the fields the registration response needs.
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceDetailRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub meetup_id: Uuid,
    pub meetup_title: String,
    pub meetup_description: String,
    pub meetup_location: String,
    pub meetup_date: DateTime<Utc>,
    pub organizer_name: String,
    pub organizer_email: String,
    pub attendee_name: String,
    pub attendee_email: String,
}

/// A user's attendance with the meetup it belongs to, future meetups only.
#[derive(Debug, Clone, FromRow)]
pub struct UpcomingAttendanceRow {
    pub user_id: Uuid,
    pub meetup_id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: DateTime<Utc>,
}
