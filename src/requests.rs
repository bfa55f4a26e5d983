use std::time::Duration;

use reqwest::{Client, ClientBuilder, Response};
use serde::Serialize;

use crate::error::CheckError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client that keeps cookies between requests.
#[derive(Debug)]
pub struct RequestClient {
    client: Client,
}

impl RequestClient {
    pub fn new(user_agent: &str) -> Result<Self, CheckError> {
        let client = ClientBuilder::new()
            .cookie_store(true)
            .user_agent(user_agent)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }

    pub async fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
        timeout: Duration,
    ) -> Result<Response, CheckError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?;
        Ok(response)
    }

    pub async fn get_body(
        &self,
        url: &str,
        query: &[(&str, String)],
        timeout: Duration,
    ) -> Result<String, CheckError> {
        let response = self.get(url, query, timeout).await?;
        let body = response.text().await?;
        Ok(body)
    }

    pub async fn post_form_body<T: Serialize + ?Sized>(
        &self,
        url: &str,
        form: &T,
        timeout: Duration,
    ) -> Result<String, CheckError> {
        let response = self
            .client
            .post(url)
            .form(form)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        Ok(body)
    }

    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        json: &T,
        timeout: Duration,
    ) -> Result<Response, CheckError> {
        let response = self
            .client
            .post(url)
            .json(json)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?;
        Ok(response)
    }
}
