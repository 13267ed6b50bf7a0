//! Application collection.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::ports::{ApplicationRepository, ApplicationRepositoryError};
use crate::domain::{Application, ApplicationQuery, ApplicationStatus, Page};

#[derive(Debug, Default, Clone)]
pub struct MemoryApplicationRepository {
    documents: Arc<RwLock<HashMap<Uuid, Application>>>,
}

impl MemoryApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApplicationRepository for MemoryApplicationRepository {
    async fn insert(&self, application: &Application) -> Result<(), ApplicationRepositoryError> {
        let mut documents = self.documents.write().await;
        if documents.contains_key(&application.id) {
            return Err(ApplicationRepositoryError::query(format!(
                "duplicate application id {}",
                application.id
            )));
        }
        documents.insert(application.id, application.clone());
        Ok(())
    }

    async fn find(&self, id: &Uuid) -> Result<Option<Application>, ApplicationRepositoryError> {
        Ok(self.documents.read().await.get(id).cloned())
    }

    async fn list(
        &self,
        query: &ApplicationQuery,
    ) -> Result<Page<Application>, ApplicationRepositoryError> {
        let documents = self.documents.read().await;
        let mut matching: Vec<&Application> = documents
            .values()
            .filter(|application| query.status.is_none_or(|status| application.status == status))
            .collect();
        matching.sort_by(|a, b| {
            b.submitted_at
                .cmp(&a.submitted_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        let total = matching.len();
        let items = matching
            .into_iter()
            .skip(query.page.offset())
            .take(query.page.limit as usize)
            .cloned()
            .collect();
        Ok(Page {
            items,
            total,
            request: query.page,
        })
    }

    async fn update(&self, application: &Application) -> Result<bool, ApplicationRepositoryError> {
        let mut documents = self.documents.write().await;
        match documents.get_mut(&application.id) {
            Some(stored) => {
                *stored = application.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, ApplicationRepositoryError> {
        Ok(self.documents.write().await.remove(id).is_some())
    }

    async fn count_by_status(
        &self,
    ) -> Result<Vec<(ApplicationStatus, usize)>, ApplicationRepositoryError> {
        let documents = self.documents.read().await;
        let counts = ApplicationStatus::NAMES
            .iter()
            .filter_map(|name| name.parse::<ApplicationStatus>().ok())
            .map(|status| {
                let count = documents
                    .values()
                    .filter(|application| application.status == status)
                    .count();
                (status, count)
            })
            .collect();
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewApplication, PageRequest};
    use chrono::{Duration, Utc};
    use rstest::rstest;

    fn application(name: &str, minutes_ago: i64) -> Application {
        Application::submit(
            NewApplication {
                full_name: name.into(),
                email: format!("{}@example.com", name.to_lowercase()),
                phone: None,
                position: "Engineer".into(),
                experience_years: None,
                portfolio_url: None,
                cover_letter: None,
                skills: Vec::new(),
                address: None,
            },
            Utc::now() - Duration::minutes(minutes_ago),
        )
    }

    async fn seeded() -> (MemoryApplicationRepository, Vec<Application>) {
        let repo = MemoryApplicationRepository::new();
        let mut stored = Vec::new();
        for (index, name) in ["Ada", "Grace", "Linus"].into_iter().enumerate() {
            let app = application(name, index as i64 * 10);
            repo.insert(&app).await.expect("insert");
            stored.push(app);
        }
        (repo, stored)
    }

    #[rstest]
    #[tokio::test]
    async fn list_returns_newest_first_with_total() {
        let (repo, _) = seeded().await;
        let query = ApplicationQuery {
            status: None,
            page: PageRequest::new(Some(1), Some(2)),
        };
        let page = repo.list(&query).await.expect("list");
        assert_eq!(page.total, 3);
        let names: Vec<_> = page.items.iter().map(|a| a.details.full_name.as_str()).collect();
        assert_eq!(names, ["Ada", "Grace"]);
    }

    #[rstest]
    #[tokio::test]
    async fn list_filters_by_status() {
        let (repo, mut stored) = seeded().await;
        let mut hired = stored.remove(1);
        hired.transition(ApplicationStatus::Hired, Utc::now());
        assert!(repo.update(&hired).await.expect("update"));

        let query = ApplicationQuery {
            status: Some(ApplicationStatus::Hired),
            page: PageRequest::default(),
        };
        let page = repo.list(&query).await.expect("list");
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, hired.id);

        let counts = repo.count_by_status().await.expect("counts");
        assert!(counts.contains(&(ApplicationStatus::Hired, 1)));
        assert!(counts.contains(&(ApplicationStatus::New, 2)));
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_insert_is_rejected() {
        let (repo, stored) = seeded().await;
        assert!(repo.insert(&stored[0]).await.is_err());
    }

    #[rstest]
    #[tokio::test]
    async fn update_and_delete_report_missing_documents() {
        let repo = MemoryApplicationRepository::new();
        let app = application("Ada", 0);
        assert!(!repo.update(&app).await.expect("update"));
        assert!(!repo.delete(&app.id).await.expect("delete"));
        repo.insert(&app).await.expect("insert");
        assert!(repo.delete(&app.id).await.expect("delete"));
        assert!(repo.find(&app.id).await.expect("find").is_none());
    }
}
