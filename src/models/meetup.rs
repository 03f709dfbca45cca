use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Meetup {
    pub id: Uuid,
    pub organizer_id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: DateTime<Utc>,
    pub image_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a meetup. The image is required at creation time;
/// the column stays nullable so an image can be detached later.
#[derive(Debug, Clone)]
pub struct NewMeetup {
    pub organizer_id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: DateTime<Utc>,
    pub image_id: Uuid,
}

/// Partial update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct MeetupChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub image_id: Option<Uuid>,
}

/// Meetup joined with its image attachment, one row per meetup.
#[derive(Debug, Clone, FromRow)]
pub struct MeetupWithImage {
    pub id: Uuid,
    pub organizer_id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: DateTime<Utc>,
    pub image_id: Option<Uuid>,
    pub image_path: Option<String>,
    pub image_url: Option<String>,
}

/// Schedule-browsing row: meetup joined with organizer contact info,
/// image attachment and the ids of everyone attending.
#[derive(Debug, Clone, FromRow)]
pub struct ScheduleRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: DateTime<Utc>,
    pub organizer_name: String,
    pub organizer_email: String,
    pub image_path: Option<String>,
    pub image_url: Option<String>,
    pub attendee_ids: Vec<Uuid>,
}
