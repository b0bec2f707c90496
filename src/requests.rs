use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, header::USER_AGENT};

use crate::error::{WatchError, WatchResult};

/// A fetched page before anyone has looked at its status.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects.
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    /// Only a plain 200 counts. Partial or empty answers are how the site
    /// stalls scrapers.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// The body of a 200 page; anything else means the site is on to us.
    pub fn into_success_body(self) -> WatchResult<String> {
        if !self.is_success() {
            return Err(WatchError::Blocked { url: self.url });
        }
        Ok(self.body)
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issues a GET, overriding the `User-Agent` header when one is given.
    async fn get(&self, url: &str, user_agent: Option<&str>) -> WatchResult<FetchedPage>;
}

pub struct RequestClient {
    client: Client,
}

impl RequestClient {
    pub fn new(timeout: Option<Duration>) -> WatchResult<Self> {
        let mut builder = ClientBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for RequestClient {
    async fn get(&self, url: &str, user_agent: Option<&str>) -> WatchResult<FetchedPage> {
        let mut request = self.client.get(url);
        if let Some(user_agent) = user_agent {
            request = request.header(USER_AGENT, user_agent);
        }
        let response = request.send().await?;
        let url = response.url().to_string();
        let status = response.status().as_u16();
        let body = response.text().await?;
        log::debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(FetchedPage { url, status, body })
    }
}
