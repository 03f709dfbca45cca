use std::sync::Arc;

use crate::db::Store;
use crate::jobs::JobQueue;
use crate::services::{AttendanceService, MeetupService, ScheduleService};

/// Built once at startup and handed to the router; handlers reach their
/// service through it instead of any module-level state.
#[derive(Clone)]
pub struct AppState {
    pub meetups: MeetupService,
    pub attendance: AttendanceService,
    pub schedule: ScheduleService,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, jobs: JobQueue) -> Self {
        Self {
            meetups: MeetupService::new(store.clone()),
            attendance: AttendanceService::new(store.clone(), jobs),
            schedule: ScheduleService::new(store),
        }
    }
}
