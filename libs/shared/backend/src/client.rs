use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
    Client, Method, Url,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;
use shared_models::AppError;

/// Thin JSON client over the booking site's own endpoints.
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.backend_base_url.clone(),
        }
    }

    fn get_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        headers
    }

    /// Joins `segments` onto the base URL, percent-encoding each one so ids
    /// cannot escape their path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| AppError::Configuration(format!("Invalid base URL {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Configuration(format!("Base URL {} cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn request<T>(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        debug!("Making {} request to {}", method, url);

        let mut req = self.client.request(method, url.clone()).headers(self.get_headers());

        if !query.is_empty() {
            req = req.query(query);
        }

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Backend error ({}) for {}: {}", status, url, error_text);
            return Err(AppError::Network(format!("Network response was not ok: {}", status)));
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    /// Posts a url-encoded form; any success status (after redirects) counts.
    pub async fn submit_form<F>(&self, segments: &[&str], form: &F) -> Result<(), AppError>
    where
        F: Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        debug!("Submitting form to {}", url);

        let response = self.client.post(url.clone()).form(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            error!("Form submission to {} failed with {}", url, status);
            return Err(AppError::Network(format!("Network response was not ok: {}", status)));
        }

        Ok(())
    }
}
