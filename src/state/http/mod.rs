mod types;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client as AsyncClient, StatusCode};
use serde_json::Value;

use self::types::{ErrorResponse, GraphqlRequest, GraphqlResponse};
use crate::config::{GITHUB_API_URL, VERSION};

/// Sends a single named GraphQL operation and hands back its `data` object.
#[async_trait]
pub trait GraphqlTransport: Send + Sync {
    async fn execute(&self, operation_name: &str, query: &str, variables: Value) -> Result<Value>;
}

#[derive(Debug, Clone)]
pub struct HttpClient {
    pub client: AsyncClient,
    pub base_url: String,
    pub headers: HeaderMap,
    pub ua: String,
}

impl HttpClient {
    pub fn new(token: Option<String>, api_url: Option<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert("accept", "application/vnd.github+json".parse()?);

        if let Some(token) = token {
            headers.insert(
                "authorization",
                format!("bearer {token}")
                    .parse()
                    .context("Token contains invalid characters")?,
            );
        }

        let ua = format!(
            "ghp/{VERSION} on {}",
            sys_info::os_type().unwrap_or_else(|_| "unknown".to_string())
        );

        let base_url = api_url
            .unwrap_or_else(|| GITHUB_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client: AsyncClient::builder()
                .user_agent(ua.clone())
                .default_headers(headers.clone())
                .build()?,
            base_url,
            headers,
            ua,
        })
    }

    pub fn graphql_url(&self) -> String {
        format!("{}/graphql", self.base_url)
    }

    async fn handle_response(&self, response: reqwest::Response) -> Result<Value> {
        let status = response.status();

        if !status.is_success() {
            return self.handle_error(response, status).await;
        }

        let body = response
            .json::<GraphqlResponse>()
            .await
            .map_err(|e| anyhow!(e))?;

        unwrap_data(body)
    }

    async fn handle_error(&self, response: reqwest::Response, status: StatusCode) -> Result<Value> {
        let body = response.json::<ErrorResponse>().await;

        match body {
            Ok(body) => {
                log::debug!("Error docs: {:?}", body.documentation_url);

                Err(anyhow!("{}", body.message))
            }
            Err(err) => {
                log::debug!("Error deserialize message: {:#?}", err);

                Err(anyhow!("HTTP {status}"))
            }
        }
    }
}

#[async_trait]
impl GraphqlTransport for HttpClient {
    async fn execute(&self, operation_name: &str, query: &str, variables: Value) -> Result<Value> {
        let body = serde_json::to_vec(&GraphqlRequest {
            query,
            variables: &variables,
            operation_name,
        })?;

        log::debug!("request: {operation_name} {variables}");

        let request = self
            .client
            .post(self.graphql_url())
            .header("content-type", "application/json")
            .body(body)
            .build()?;

        #[cfg(debug_assertions)]
        let now = tokio::time::Instant::now();

        let response = self.client.execute(request).await?;

        #[cfg(debug_assertions)]
        log::debug!("response in: {:#?}", now.elapsed());

        self.handle_response(response).await
    }
}

/// GraphQL reports failures in the body, so a 200 can still be an error.
fn unwrap_data(body: GraphqlResponse) -> Result<Value> {
    if !body.errors.is_empty() {
        for error in &body.errors {
            log::debug!("GraphQL error ({:?}): {}", error.e_type, error.message);
        }

        bail!(
            "GraphQL: {}",
            body.errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    body.data.context("GraphQL: empty response")
}
