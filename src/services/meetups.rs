//! Organizer-facing meetup rules: future-date gating on every mutation and
//! a merged "does not exist" answer for meetups the caller does not own.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::Store;
use crate::models::{ImageRef, Meetup, MeetupChanges, MeetupWithImage, NewMeetup};
use crate::utils::error::AppError;

const INVALID_MEETUP: &str = "Meetup is not valid";
const PAST_DATE: &str = "Meetup must not have a past date";
const NOT_FOUND_FOR_ORGANIZER: &str = "Meetup with this organizer does not exist";

#[derive(Debug, Deserialize)]
pub struct CreateMeetupRequest {
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: DateTime<Utc>,
    pub image_id: Uuid,
}

impl CreateMeetupRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty()
            || self.description.trim().is_empty()
            || self.location.trim().is_empty()
        {
            return Err(AppError::ValidationError(INVALID_MEETUP.to_string()));
        }
        Ok(())
    }
}

/// All fields optional; serde type-checks whatever is present.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateMeetupRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub image_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct MeetupDetail {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: DateTime<Utc>,
    pub image: Option<ImageRef>,
}

impl From<MeetupWithImage> for MeetupDetail {
    fn from(row: MeetupWithImage) -> Self {
        let image = match (row.image_path, row.image_url) {
            (Some(path), Some(url)) => Some(ImageRef {
                id: row.image_id,
                path,
                url,
            }),
            _ => None,
        };
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            location: row.location,
            date: row.date,
            image,
        }
    }
}

#[derive(Clone)]
pub struct MeetupService {
    store: Arc<dyn Store>,
}

impl MeetupService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        organizer_id: Uuid,
        req: CreateMeetupRequest,
    ) -> Result<Meetup, AppError> {
        req.validate()?;

        if req.date <= Utc::now() {
            return Err(AppError::Conflict(PAST_DATE.to_string()));
        }

        let meetup = self
            .store
            .insert_meetup(NewMeetup {
                organizer_id,
                title: req.title,
                description: req.description,
                location: req.location,
                date: req.date,
                image_id: req.image_id,
            })
            .await?;

        Ok(meetup)
    }

    pub async fn update(
        &self,
        organizer_id: Uuid,
        meetup_id: Uuid,
        req: UpdateMeetupRequest,
    ) -> Result<Meetup, AppError> {
        if let Some(date) = req.date {
            if date <= Utc::now() {
                return Err(AppError::Conflict(PAST_DATE.to_string()));
            }
        }

        let meetup = self
            .store
            .meetup_owned(meetup_id, organizer_id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND_FOR_ORGANIZER.to_string()))?;

        // a meetup that already happened is immutable
        if meetup.date <= Utc::now() {
            return Err(AppError::Conflict(PAST_DATE.to_string()));
        }

        let updated = self
            .store
            .update_meetup(
                meetup.id,
                MeetupChanges {
                    title: req.title,
                    description: req.description,
                    location: req.location,
                    date: req.date,
                    image_id: req.image_id,
                },
            )
            .await?;

        Ok(updated)
    }

    /// The organizer's own upcoming meetups, image joined, date ascending.
    pub async fn list(&self, organizer_id: Uuid) -> Result<Vec<MeetupDetail>, AppError> {
        let rows = self
            .store
            .upcoming_meetups_by_organizer(organizer_id, Utc::now())
            .await?;

        Ok(rows.into_iter().map(MeetupDetail::from).collect())
    }

    pub async fn cancel(&self, organizer_id: Uuid, meetup_id: Uuid) -> Result<String, AppError> {
        let meetup = self
            .store
            .meetup_owned(meetup_id, organizer_id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND_FOR_ORGANIZER.to_string()))?;

        if meetup.date <= Utc::now() {
            return Err(AppError::Conflict(PAST_DATE.to_string()));
        }

        self.store.delete_meetup(meetup.id).await?;

        Ok(format!("Meetup ({}) has been cancelled", meetup.title))
    }
}
