//! Enquiries sent from the contact page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Visitor-supplied enquiry fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEnquiry {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
}

/// A stored enquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enquiry {
    pub id: Uuid,
    #[serde(flatten)]
    pub details: NewEnquiry,
    pub received_at: DateTime<Utc>,
}

impl Enquiry {
    pub fn receive(mut details: NewEnquiry, now: DateTime<Utc>) -> Self {
        details.name = details.name.trim().to_owned();
        details.email = details.email.trim().to_lowercase();
        details.message = details.message.trim().to_owned();
        Self {
            id: Uuid::new_v4(),
            details,
            received_at: now,
        }
    }
}
