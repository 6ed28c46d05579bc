use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

use crate::error::RemoteError;
use crate::journal_entry::{EntryUpdate, JournalEntry};
use crate::search::SearchFilter;

/// Confirmation returned by the service after a create.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Confirmation {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub entry: Option<JournalEntry>,
}

/// Transport to the remote reflections service.
#[async_trait]
pub trait RemoteEntries: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<JournalEntry>, RemoteError>;

    async fn create(&self, entry: &JournalEntry) -> Result<Confirmation, RemoteError>;

    async fn update(&self, id: &str, update: &EntryUpdate) -> Result<(), RemoteError>;

    async fn delete(&self, id: &str) -> Result<(), RemoteError>;

    async fn search(&self, filter: &SearchFilter) -> Result<Vec<JournalEntry>, RemoteError>;

    async fn health(&self) -> Result<(), RemoteError>;
}

pub struct HttpRemote {
    client: Client,
    base_url: String,
}

impl HttpRemote {
    pub fn new(base_url: impl Into<String>) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .user_agent(concat!("learning-journal/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        HttpRemote { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

fn check(response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(RemoteError::Status(status))
    }
}

#[async_trait]
impl RemoteEntries for HttpRemote {
    async fn fetch_all(&self) -> Result<Vec<JournalEntry>, RemoteError> {
        let response = self.client.get(self.url("reflections")).send().await?;
        Ok(check(response)?.json().await?)
    }

    async fn create(&self, entry: &JournalEntry) -> Result<Confirmation, RemoteError> {
        let response = self
            .client
            .post(self.url("add_reflection"))
            .json(entry)
            .send()
            .await?;
        Ok(check(response)?.json().await?)
    }

    async fn update(&self, id: &str, update: &EntryUpdate) -> Result<(), RemoteError> {
        let response = self
            .client
            .put(self.url(&format!("update_reflection/{id}")))
            .json(update)
            .send()
            .await?;
        check(response)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), RemoteError> {
        let response = self
            .client
            .delete(self.url(&format!("delete_reflection/{id}")))
            .send()
            .await?;
        check(response)?;
        Ok(())
    }

    async fn search(&self, filter: &SearchFilter) -> Result<Vec<JournalEntry>, RemoteError> {
        let response = self
            .client
            .get(self.url("reflections/search"))
            .query(&filter.query_params())
            .send()
            .await?;
        Ok(check(response)?.json().await?)
    }

    async fn health(&self) -> Result<(), RemoteError> {
        let response = self.client.get(self.url("health")).send().await?;
        check(response)?;
        Ok(())
    }
}
