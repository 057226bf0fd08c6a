//! HTTP binding for the plant API.

use async_trait::async_trait;
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use garden_shared::{ApiMessage, NewPlant, Plant, PlantId, PlantPatch};

use crate::error::{ClientError, Result};

/// Base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// The six plant operations, one HTTP call each.
#[async_trait]
pub trait PlantsApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Plant>>;
    async fn get(&self, id: PlantId) -> Result<Plant>;
    async fn create(&self, new: &NewPlant) -> Result<Plant>;
    async fn update(&self, id: PlantId, patch: &PlantPatch) -> Result<Plant>;
    async fn water(&self, id: PlantId) -> Result<Plant>;
    async fn delete(&self, id: PlantId) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct HttpPlantsApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpPlantsApi {
    /// `base_url` is the API root, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, method: Method, path: &str) -> Result<Response> {
        let url = self.url(path);
        debug!(%method, %url, "Sending request");
        Ok(self.http.request(method, url).send().await?)
    }

    async fn send_json<B: serde::Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Response> {
        let url = self.url(path);
        debug!(%method, %url, "Sending request");
        Ok(self.http.request(method, url).json(body).send().await?)
    }
}

/// Decode a success body, or turn an error status into [`ClientError::Status`].
async fn read<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<ApiMessage>()
            .await
            .map(|body| body.message)
            .unwrap_or_else(|_| format!("Error: {}", status.as_u16()));
        return Err(ClientError::Status {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response.json().await?)
}

#[async_trait]
impl PlantsApi for HttpPlantsApi {
    async fn list(&self) -> Result<Vec<Plant>> {
        read(self.send(Method::GET, "/plants").await?).await
    }

    async fn get(&self, id: PlantId) -> Result<Plant> {
        read(self.send(Method::GET, &format!("/plants/{id}")).await?).await
    }

    async fn create(&self, new: &NewPlant) -> Result<Plant> {
        read(self.send_json(Method::POST, "/plants", new).await?).await
    }

    async fn update(&self, id: PlantId, patch: &PlantPatch) -> Result<Plant> {
        read(
            self.send_json(Method::PUT, &format!("/plants/{id}"), patch)
                .await?,
        )
        .await
    }

    async fn water(&self, id: PlantId) -> Result<Plant> {
        read(self.send(Method::PATCH, &format!("/plants/{id}/water")).await?).await
    }

    async fn delete(&self, id: PlantId) -> Result<()> {
        let response = self.send(Method::DELETE, &format!("/plants/{id}")).await?;
        let _: ApiMessage = read(response).await?;
        Ok(())
    }
}
