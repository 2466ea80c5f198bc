use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct GraphqlRequest<'a> {
    pub query: &'a str,
    pub variables: &'a Value,
    #[serde(rename = "operationName")]
    pub operation_name: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlResponse {
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(rename = "type")]
    pub e_type: Option<String>,
}

// REST style error body, returned for auth and rate limit failures
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub documentation_url: Option<String>,
}
