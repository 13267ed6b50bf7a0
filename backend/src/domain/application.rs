//! Job applications submitted through the careers page.
//!
//! Payload shape is checked by the request validator before handlers build
//! these types, so constructors here only normalise values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Review stage of an application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    New,
    Reviewing,
    Interview,
    Hired,
    Rejected,
}

impl ApplicationStatus {
    /// Wire names, in pipeline order.
    pub const NAMES: [&'static str; 5] = ["new", "reviewing", "interview", "hired", "rejected"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Reviewing => "reviewing",
            Self::Interview => "interview",
            Self::Hired => "hired",
            Self::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "reviewing" => Ok(Self::Reviewing),
            "interview" => Ok(Self::Interview),
            "hired" => Ok(Self::Hired),
            "rejected" => Ok(Self::Rejected),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}

/// Raised when a status string is not one of [`ApplicationStatus::NAMES`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown application status: {0}")]
pub struct UnknownStatus(pub String);

/// Postal location of an applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub city: String,
    pub zip: String,
}

/// Applicant-supplied fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub full_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

/// A stored application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    #[serde(flatten)]
    pub details: NewApplication,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    /// Accept a submission, trimming free text and lower-casing the e-mail.
    pub fn submit(mut details: NewApplication, now: DateTime<Utc>) -> Self {
        details.full_name = details.full_name.trim().to_owned();
        details.email = details.email.trim().to_lowercase();
        details.position = details.position.trim().to_owned();
        details.skills = details
            .skills
            .into_iter()
            .map(|skill| skill.trim().to_owned())
            .collect();
        Self {
            id: Uuid::new_v4(),
            details,
            status: ApplicationStatus::New,
            submitted_at: now,
            updated_at: now,
        }
    }

    /// Move the application to another stage.
    pub fn transition(&mut self, status: ApplicationStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = now;
    }
}

/// Filter and page window for listing applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplicationQuery {
    pub status: Option<ApplicationStatus>,
    pub page: PageRequest,
}

/// One-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub const DEFAULT_LIMIT: u32 = 20;
    pub const MAX_LIMIT: u32 = 100;

    /// Clamp raw values into a usable window.
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .clamp(1, Self::MAX_LIMIT),
        }
    }

    /// Number of records to skip.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.limit as usize)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results together with the unpaged total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub request: PageRequest,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn details() -> NewApplication {
        NewApplication {
            full_name: "  Grace Hopper ".into(),
            email: "Grace@Example.COM".into(),
            phone: None,
            position: " Backend Engineer ".into(),
            experience_years: Some(7),
            portfolio_url: None,
            cover_letter: None,
            skills: vec![" rust ".into(), "sql".into()],
            address: None,
        }
    }

    #[rstest]
    fn submit_normalises_fields() {
        let now = Utc::now();
        let application = Application::submit(details(), now);
        assert_eq!(application.details.full_name, "Grace Hopper");
        assert_eq!(application.details.email, "grace@example.com");
        assert_eq!(application.details.position, "Backend Engineer");
        assert_eq!(application.details.skills, ["rust", "sql"]);
        assert_eq!(application.status, ApplicationStatus::New);
        assert_eq!(application.submitted_at, now);
    }

    #[rstest]
    fn transition_updates_timestamp() {
        let submitted = Utc::now();
        let mut application = Application::submit(details(), submitted);
        let later = submitted + chrono::Duration::minutes(5);
        application.transition(ApplicationStatus::Interview, later);
        assert_eq!(application.status, ApplicationStatus::Interview);
        assert_eq!(application.updated_at, later);
        assert_eq!(application.submitted_at, submitted);
    }

    #[rstest]
    fn status_names_round_trip() {
        for name in ApplicationStatus::NAMES {
            let status: ApplicationStatus = name.parse().expect("known status");
            assert_eq!(status.as_str(), name);
        }
        assert!("archived".parse::<ApplicationStatus>().is_err());
    }

    #[rstest]
    #[case(None, None, 1, 20, 0)]
    #[case(Some(0), Some(0), 1, 1, 0)]
    #[case(Some(3), Some(10), 3, 10, 20)]
    #[case(Some(2), Some(500), 2, 100, 100)]
    fn page_request_clamps(
        #[case] page: Option<u32>,
        #[case] limit: Option<u32>,
        #[case] expected_page: u32,
        #[case] expected_limit: u32,
        #[case] offset: usize,
    ) {
        let request = PageRequest::new(page, limit);
        assert_eq!(request.page, expected_page);
        assert_eq!(request.limit, expected_limit);
        assert_eq!(request.offset(), offset);
    }

    #[rstest]
    fn serialises_flat_camel_case() {
        let application = Application::submit(details(), Utc::now());
        let value = serde_json::to_value(&application).expect("serialise");
        assert_eq!(value["fullName"], "Grace Hopper");
        assert_eq!(value["status"], "new");
        assert!(value.get("details").is_none());
        assert!(value.get("phone").is_none());
    }
}
