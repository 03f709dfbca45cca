//! In-memory [`Store`] used by the service tests. Mirrors the Postgres
//! queries, including the unique (user, meetup) constraint.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{Store, StoreError};
use crate::models::{
    Attendance, AttendanceDetailRow, Meetup, MeetupChanges, MeetupWithImage, NewMeetup,
    ScheduleRow, UpcomingAttendanceRow,
};

#[derive(Debug, Clone)]
struct UserRecord {
    id: Uuid,
    name: String,
    email: String,
}

#[derive(Debug, Clone)]
struct FileRecord {
    id: Uuid,
    path: String,
    url: String,
}

#[derive(Default)]
struct Inner {
    users: Vec<UserRecord>,
    files: Vec<FileRecord>,
    meetups: Vec<Meetup>,
    attendances: Vec<Attendance>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_user(&self, name: &str, email: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.lock().unwrap().users.push(UserRecord {
            id,
            name: name.to_string(),
            email: email.to_string(),
        });
        id
    }

    pub fn seed_file(&self, path: &str, url: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.lock().unwrap().files.push(FileRecord {
            id,
            path: path.to_string(),
            url: url.to_string(),
        });
        id
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_meetup(&self, new: NewMeetup) -> Result<Meetup, StoreError> {
        let now = Utc::now();
        let meetup = Meetup {
            id: Uuid::new_v4(),
            organizer_id: new.organizer_id,
            title: new.title,
            description: new.description,
            location: new.location,
            date: new.date,
            image_id: Some(new.image_id),
            created_at: now,
            updated_at: now,
        };
        self.inner.lock().unwrap().meetups.push(meetup.clone());
        Ok(meetup)
    }

    async fn meetup_by_id(&self, id: Uuid) -> Result<Option<Meetup>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.meetups.iter().find(|m| m.id == id).cloned())
    }

    async fn meetup_owned(
        &self,
        id: Uuid,
        organizer_id: Uuid,
    ) -> Result<Option<Meetup>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .meetups
            .iter()
            .find(|m| m.id == id && m.organizer_id == organizer_id)
            .cloned())
    }

    async fn update_meetup(&self, id: Uuid, changes: MeetupChanges) -> Result<Meetup, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let meetup = inner
            .meetups
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(StoreError::Database(sqlx::Error::RowNotFound))?;

        if let Some(title) = changes.title {
            meetup.title = title;
        }
        if let Some(description) = changes.description {
            meetup.description = description;
        }
        if let Some(location) = changes.location {
            meetup.location = location;
        }
        if let Some(date) = changes.date {
            meetup.date = date;
        }
        if let Some(image_id) = changes.image_id {
            meetup.image_id = Some(image_id);
        }
        meetup.updated_at = Utc::now();

        Ok(meetup.clone())
    }

    async fn delete_meetup(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.meetups.retain(|m| m.id != id);
        inner.attendances.retain(|a| a.meetup_id != id);
        Ok(())
    }

    async fn upcoming_meetups_by_organizer(
        &self,
        organizer_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<MeetupWithImage>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<MeetupWithImage> = inner
            .meetups
            .iter()
            .filter(|m| m.organizer_id == organizer_id && m.date >= now)
            .map(|m| {
                let image = m
                    .image_id
                    .and_then(|id| inner.files.iter().find(|f| f.id == id));
                MeetupWithImage {
                    id: m.id,
                    organizer_id: m.organizer_id,
                    title: m.title.clone(),
                    description: m.description.clone(),
                    location: m.location.clone(),
                    date: m.date,
                    image_id: m.image_id,
                    image_path: image.map(|f| f.path.clone()),
                    image_url: image.map(|f| f.url.clone()),
                }
            })
            .collect();
        rows.sort_by_key(|m| m.date);
        Ok(rows)
    }

    async fn meetups_in_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ScheduleRow>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut matching: Vec<&Meetup> = inner
            .meetups
            .iter()
            .filter(|m| m.date >= start && m.date < end)
            .collect();
        matching.sort_by_key(|m| m.date);

        let rows = matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|m| {
                let organizer = inner
                    .users
                    .iter()
                    .find(|u| u.id == m.organizer_id)
                    .expect("organizer seeded");
                let image = m
                    .image_id
                    .and_then(|id| inner.files.iter().find(|f| f.id == id));
                let attendee_ids = inner
                    .attendances
                    .iter()
                    .filter(|a| a.meetup_id == m.id)
                    .map(|a| a.user_id)
                    .collect();
                ScheduleRow {
                    id: m.id,
                    title: m.title.clone(),
                    description: m.description.clone(),
                    location: m.location.clone(),
                    date: m.date,
                    organizer_name: organizer.name.clone(),
                    organizer_email: organizer.email.clone(),
                    image_path: image.map(|f| f.path.clone()),
                    image_url: image.map(|f| f.url.clone()),
                    attendee_ids,
                }
            })
            .collect();

        Ok(rows)
    }

    async fn count_meetups_in_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .meetups
            .iter()
            .filter(|m| m.date >= start && m.date < end)
            .count() as i64)
    }

    async fn insert_attendance(
        &self,
        user_id: Uuid,
        meetup_id: Uuid,
    ) -> Result<Attendance, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner
            .attendances
            .iter()
            .any(|a| a.user_id == user_id && a.meetup_id == meetup_id)
        {
            return Err(StoreError::DuplicateAttendance);
        }

        let attendance = Attendance {
            id: Uuid::new_v4(),
            user_id,
            meetup_id,
            created_at: Utc::now(),
        };
        inner.attendances.push(attendance.clone());
        Ok(attendance)
    }

    async fn attendance_exists(
        &self,
        user_id: Uuid,
        meetup_id: Uuid,
    ) -> Result<bool, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .attendances
            .iter()
            .any(|a| a.user_id == user_id && a.meetup_id == meetup_id))
    }

    async fn attendance_at_same_instant(
        &self,
        user_id: Uuid,
        date: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.attendances.iter().any(|a| {
            a.user_id == user_id
                && inner
                    .meetups
                    .iter()
                    .any(|m| m.id == a.meetup_id && m.date == date)
        }))
    }

    async fn count_attendees(&self, meetup_id: Uuid) -> Result<i64, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .attendances
            .iter()
            .filter(|a| a.meetup_id == meetup_id)
            .count() as i64)
    }

    async fn attendance_detail(
        &self,
        user_id: Uuid,
        meetup_id: Uuid,
    ) -> Result<Option<AttendanceDetailRow>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let Some(attendance) = inner
            .attendances
            .iter()
            .find(|a| a.user_id == user_id && a.meetup_id == meetup_id)
        else {
            return Ok(None);
        };
        let meetup = inner
            .meetups
            .iter()
            .find(|m| m.id == meetup_id)
            .expect("meetup exists for attendance");
        let organizer = inner
            .users
            .iter()
            .find(|u| u.id == meetup.organizer_id)
            .expect("organizer seeded");
        let attendee = inner
            .users
            .iter()
            .find(|u| u.id == user_id)
            .expect("attendee seeded");

        Ok(Some(AttendanceDetailRow {
            id: attendance.id,
            user_id,
            meetup_id,
            meetup_title: meetup.title.clone(),
            meetup_description: meetup.description.clone(),
            meetup_location: meetup.location.clone(),
            meetup_date: meetup.date,
            organizer_name: organizer.name.clone(),
            organizer_email: organizer.email.clone(),
            attendee_name: attendee.name.clone(),
            attendee_email: attendee.email.clone(),
        }))
    }

    async fn upcoming_attendances(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<UpcomingAttendanceRow>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<UpcomingAttendanceRow> = inner
            .attendances
            .iter()
            .filter(|a| a.user_id == user_id)
            .filter_map(|a| {
                inner
                    .meetups
                    .iter()
                    .find(|m| m.id == a.meetup_id && m.date > now)
                    .map(|m| UpcomingAttendanceRow {
                        user_id: a.user_id,
                        meetup_id: m.id,
                        title: m.title.clone(),
                        description: m.description.clone(),
                        location: m.location.clone(),
                        date: m.date,
                    })
            })
            .collect();
        rows.sort_by_key(|r| r.date);
        Ok(rows)
    }
}
