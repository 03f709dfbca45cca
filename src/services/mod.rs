pub mod attendance;
pub mod meetups;
pub mod schedule;

pub use attendance::AttendanceService;
pub use meetups::MeetupService;
pub use schedule::ScheduleService;
