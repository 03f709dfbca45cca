//! Background job submission. A queue handle accepts payloads from request
//! handlers and a worker task drains them; nothing here reports back to the
//! request that enqueued the job.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info};

pub mod attendee_mail;
pub mod mailer;

pub use attendee_mail::AttendeeMail;
pub use mailer::{LogMailer, Mailer, WebhookMailer};

#[derive(Clone)]
pub struct JobQueue {
    tx: mpsc::UnboundedSender<AttendeeMail>,
}

impl JobQueue {
    /// Spawns the worker task and returns the submission handle.
    pub fn start(mailer: Arc<dyn Mailer>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<AttendeeMail>();

        tokio::spawn(async move {
            info!("attendee mail worker started");
            while let Some(job) = rx.recv().await {
                let meetup = job.meetup_title.clone();
                if let Err(e) = mailer.send(job.into_mail()).await {
                    // at-least-once is best effort here; the attendance
                    // write this mail follows is already committed
                    error!(error = %e, meetup = %meetup, "failed to deliver attendee mail");
                }
            }
        });

        Self { tx }
    }

    /// Fire-and-forget; a submission failure is logged, never surfaced.
    pub fn submit(&self, job: AttendeeMail) {
        if self.tx.send(job).is_err() {
            error!("attendee mail worker is gone, dropping job");
        }
    }

    /// Queue handle whose jobs land in the returned receiver instead of a
    /// worker, so tests can assert on what was submitted.
    #[cfg(test)]
    pub fn for_tests() -> (Self, mpsc::UnboundedReceiver<AttendeeMail>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}
