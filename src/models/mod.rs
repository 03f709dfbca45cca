pub mod attendance;
pub mod file;
pub mod meetup;

pub use attendance::{Attendance, AttendanceDetailRow, UpcomingAttendanceRow};
pub use file::ImageRef;
pub use meetup::{Meetup, MeetupChanges, MeetupWithImage, NewMeetup, ScheduleRow};
