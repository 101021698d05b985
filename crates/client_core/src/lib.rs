use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::domain::{PersonRecord, RecordId};
use tracing::debug;
use url::Url;

pub mod config;
pub mod error;
pub mod form;
pub mod notification;
pub mod session;
pub mod state;
pub mod store;

pub use config::{ClientSettings, ConfigError};
pub use error::{ClientError, RecordOpKind, RequestFailure, ValidationError};
pub use form::{FormController, FormMode, SaveRequest};
pub use notification::{Notifier, Severity, Toast};
pub use session::{RecordsSession, SessionError};
pub use state::{perform, AppState, RecordOp, RecordOutcome};
pub use store::RecordStore;

/// The four calls the client makes against the collection endpoint.
#[async_trait]
pub trait RecordsApi: Send + Sync {
    async fn list(&self) -> Result<Vec<PersonRecord>, ClientError>;
    /// POSTs the record with its client-generated id and returns the stored echo.
    async fn create(&self, record: &PersonRecord) -> Result<PersonRecord, ClientError>;
    async fn update(
        &self,
        id: &RecordId,
        record: &PersonRecord,
    ) -> Result<PersonRecord, ClientError>;
    async fn remove(&self, id: &RecordId) -> Result<(), ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpRecordsClient {
    http: Client,
    collection_url: Url,
}

impl HttpRecordsClient {
    pub fn new(collection_url: Url) -> Self {
        Self {
            http: Client::new(),
            collection_url,
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ConfigError> {
        Ok(Self::new(settings.collection_url()?))
    }

    pub fn collection_url(&self) -> &Url {
        &self.collection_url
    }

    fn record_url(&self, id: &RecordId) -> Url {
        let mut url = self.collection_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id.as_str());
        }
        url
    }
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, RequestFailure> {
    let response = request.send().await?.error_for_status()?;
    Ok(response.json::<T>().await?)
}

async fn send_empty(request: RequestBuilder) -> Result<(), RequestFailure> {
    request.send().await?.error_for_status()?;
    Ok(())
}

#[async_trait]
impl RecordsApi for HttpRecordsClient {
    async fn list(&self) -> Result<Vec<PersonRecord>, ClientError> {
        debug!(url = %self.collection_url, "GET records");
        send_json(self.http.get(self.collection_url.clone()))
            .await
            .map_err(ClientError::Fetch)
    }

    async fn create(&self, record: &PersonRecord) -> Result<PersonRecord, ClientError> {
        debug!(id = %record.id, "POST record");
        send_json(self.http.post(self.collection_url.clone()).json(record))
            .await
            .map_err(ClientError::Create)
    }

    async fn update(
        &self,
        id: &RecordId,
        record: &PersonRecord,
    ) -> Result<PersonRecord, ClientError> {
        debug!(%id, "PUT record");
        send_json(self.http.put(self.record_url(id)).json(record))
            .await
            .map_err(ClientError::Update)
    }

    async fn remove(&self, id: &RecordId) -> Result<(), ClientError> {
        debug!(%id, "DELETE record");
        send_empty(self.http.delete(self.record_url(id)))
            .await
            .map_err(ClientError::Delete)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
