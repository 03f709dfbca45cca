use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::mailer::OutgoingMail;

/// Payload of the "new attendee" notification sent to a meetup's organizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendeeMail {
    pub attendee_name: String,
    pub attendee_email: String,
    pub organizer_name: String,
    pub organizer_email: String,
    pub meetup_title: String,
    pub meetup_date: DateTime<Utc>,
    pub attendees_total: i64,
}

impl AttendeeMail {
    pub fn into_mail(self) -> OutgoingMail {
        let date = format_meetup_date(self.meetup_date);
        OutgoingMail {
            to: format!("{} <{}>", self.organizer_name, self.organizer_email),
            subject: format!("New Attendee to your Meetup: [{}]", self.meetup_title),
            body: format!(
                "Hello {}!\n\n\
                 {} ({}) has just registered for \"{}\" on {}.\n\
                 Your meetup now has {} attendee(s).\n",
                self.organizer_name,
                self.attendee_name,
                self.attendee_email,
                self.meetup_title,
                date,
                self.attendees_total,
            ),
        }
    }
}

/// Fixed en-US display format, e.g. "May 1, 2024".
pub fn format_meetup_date(date: DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}
