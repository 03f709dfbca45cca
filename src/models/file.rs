use serde::Serialize;
use uuid::Uuid;

/// Stored-file projection attached to meetup responses.
#[derive(Debug, Clone, Serialize)]
pub struct ImageRef {
    pub id: Option<Uuid>,
    pub path: String,
    pub url: String,
}
