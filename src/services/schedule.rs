//! Public schedule browsing: the meetups of a single day, ten per page,
//! with a total that does not depend on the requested page.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::Store;
use crate::models::{ImageRef, ScheduleRow};
use crate::utils::error::AppError;

const INVALID_QUERY: &str = "Date or page number invalid";
const PAGE_SIZE: i64 = 10;

/// Raw query parameters; both are required and validated explicitly so a
/// bad value gets the same rejection as a missing one.
#[derive(Debug, Default, Deserialize)]
pub struct ScheduleParams {
    pub date: Option<String>,
    pub page: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ScheduleEntry {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: DateTime<Utc>,
    pub organizer: OrganizerInfo,
    pub image: Option<ImageRef>,
    pub attendees: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct OrganizerInfo {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SchedulePage {
    pub meetups: Vec<ScheduleEntry>,
    pub total: i64,
}

impl From<ScheduleRow> for ScheduleEntry {
    fn from(row: ScheduleRow) -> Self {
        let image = match (row.image_path, row.image_url) {
            (Some(path), Some(url)) => Some(ImageRef {
                id: None,
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
            organizer: OrganizerInfo {
                name: row.organizer_name,
                email: row.organizer_email,
            },
            image,
            attendees: row.attendee_ids,
        }
    }
}

#[derive(Clone)]
pub struct ScheduleService {
    store: Arc<dyn Store>,
}

impl ScheduleService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn browse(&self, params: ScheduleParams) -> Result<SchedulePage, AppError> {
        let date = params
            .date
            .as_deref()
            .and_then(parse_day)
            .ok_or_else(|| AppError::ValidationError(INVALID_QUERY.to_string()))?;

        let page = match params.page {
            Some(page) if page >= 1 => page,
            _ => return Err(AppError::ValidationError(INVALID_QUERY.to_string())),
        };

        // inclusive day window, expressed as [midnight, next midnight)
        let start = date.and_time(NaiveTime::MIN).and_utc();
        let end = start + Duration::days(1);
        let offset = (page - 1) * PAGE_SIZE;

        let rows = self
            .store
            .meetups_in_window(start, end, offset, PAGE_SIZE)
            .await?;
        let total = self.store.count_meetups_in_window(start, end).await?;

        Ok(SchedulePage {
            meetups: rows.into_iter().map(ScheduleEntry::from).collect(),
            total,
        })
    }
}

/// Accepts a plain date or a full timestamp, which collapses to its day.
fn parse_day(s: &str) -> Option<NaiveDate> {
    s.parse::<NaiveDate>()
        .ok()
        .or_else(|| s.parse::<DateTime<Utc>>().ok().map(|d| d.date_naive()))
}
