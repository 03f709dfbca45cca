//! Attendance registration pipeline. Each check short-circuits with its own
//! rejection; the organizer notification rides behind the committed write
//! and can never fail the request.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::Store;
use crate::jobs::{AttendeeMail, JobQueue};
use crate::models::AttendanceDetailRow;
use crate::utils::error::AppError;

const MEETUP_NOT_FOUND: &str = "Meetup does not exist";
const SELF_ATTENDANCE: &str = "Organizers are not allowed to attend their own Meetups";
const PAST_MEETUP: &str = "You cannot attend a past meetup";
const ALREADY_ATTENDING: &str = "You are already an Attendee of this meetup";
const SAME_TIME: &str = "You are not allowed to attend two meetups at the same time";

#[derive(Debug, Deserialize)]
pub struct RegisterAttendanceRequest {
    pub meetup_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct PersonInfo {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct AttendedMeetup {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: DateTime<Utc>,
    pub organizer: PersonInfo,
}

#[derive(Debug, Serialize)]
pub struct AttendanceDetail {
    pub id: Uuid,
    pub meetup: AttendedMeetup,
    pub attendee: PersonInfo,
}

impl From<AttendanceDetailRow> for AttendanceDetail {
    fn from(row: AttendanceDetailRow) -> Self {
        Self {
            id: row.id,
            meetup: AttendedMeetup {
                id: row.meetup_id,
                title: row.meetup_title,
                description: row.meetup_description,
                location: row.meetup_location,
                date: row.meetup_date,
                organizer: PersonInfo {
                    name: row.organizer_name,
                    email: row.organizer_email,
                },
            },
            attendee: PersonInfo {
                name: row.attendee_name,
                email: row.attendee_email,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpcomingAttendance {
    pub user_id: Uuid,
    pub meetup: MeetupSummary,
}

#[derive(Debug, Serialize)]
pub struct MeetupSummary {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: DateTime<Utc>,
}

#[derive(Clone)]
pub struct AttendanceService {
    store: Arc<dyn Store>,
    jobs: JobQueue,
}

impl AttendanceService {
    pub fn new(store: Arc<dyn Store>, jobs: JobQueue) -> Self {
        Self { store, jobs }
    }

    pub async fn register(
        &self,
        user_id: Uuid,
        req: RegisterAttendanceRequest,
    ) -> Result<AttendanceDetail, AppError> {
        let meetup = self
            .store
            .meetup_by_id(req.meetup_id)
            .await?
            .ok_or_else(|| AppError::NotFound(MEETUP_NOT_FOUND.to_string()))?;

        if meetup.organizer_id == user_id {
            return Err(AppError::Conflict(SELF_ATTENDANCE.to_string()));
        }

        if meetup.date <= Utc::now() {
            return Err(AppError::Conflict(PAST_MEETUP.to_string()));
        }

        if self.store.attendance_exists(user_id, meetup.id).await? {
            return Err(AppError::Conflict(ALREADY_ATTENDING.to_string()));
        }

        // exact timestamp equality, matching the observed behavior;
        // overlapping ranges are not considered a conflict
        if self
            .store
            .attendance_at_same_instant(user_id, meetup.date)
            .await?
        {
            return Err(AppError::Conflict(SAME_TIME.to_string()));
        }

        self.store.insert_attendance(user_id, meetup.id).await?;

        let attendees_total = self.store.count_attendees(meetup.id).await?;

        let detail: AttendanceDetail = self
            .store
            .attendance_detail(user_id, meetup.id)
            .await?
            .ok_or_else(|| {
                AppError::InternalServerError("Attendance vanished after insert".to_string())
            })?
            .into();

        self.jobs.submit(AttendeeMail {
            attendee_name: detail.attendee.name.clone(),
            attendee_email: detail.attendee.email.clone(),
            organizer_name: detail.meetup.organizer.name.clone(),
            organizer_email: detail.meetup.organizer.email.clone(),
            meetup_title: detail.meetup.title.clone(),
            meetup_date: detail.meetup.date,
            attendees_total,
        });

        Ok(detail)
    }

    /// The caller's attendances whose meetup is still ahead, date ascending.
    pub async fn list_mine(&self, user_id: Uuid) -> Result<Vec<UpcomingAttendance>, AppError> {
        let rows = self.store.upcoming_attendances(user_id, Utc::now()).await?;

        Ok(rows
            .into_iter()
            .map(|r| UpcomingAttendance {
                user_id: r.user_id,
                meetup: MeetupSummary {
                    id: r.meetup_id,
                    title: r.title,
                    description: r.description,
                    location: r.location,
                    date: r.date,
                },
            })
            .collect())
    }
}
