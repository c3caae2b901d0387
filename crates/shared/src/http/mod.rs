use std::time::Duration;

use reqwest::{Client, Response};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::errors::{HttpError, extract_error_message};

/// Thin wrapper over `reqwest` shared by every service client. One instance
/// per remote service, carrying that service's base URL and the fixed
/// client-side timeout.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::Internal(format!("Failed to build HTTP client: {e}")))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, HttpError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(HttpError::from)?;

        Self::read_json(response).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(HttpError::from)?;

        Self::read_json(response).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(HttpError::from)?;

        Self::read_json(response).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, HttpError> {
        let response = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .map_err(HttpError::from)?;

        Self::read_json(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, HttpError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(&body);

            debug!("Service call failed: status={status}, message={message:?}");

            return Err(HttpError::from_status(status.as_u16(), message));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| HttpError::Decode(e.to_string()))
    }
}
