//! Request DTOs for Web API.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::llm::DEFAULT_TEMPERATURE;

/// Feed retrieval request.
#[derive(Debug, Clone, Deserialize)]
pub struct RssRequest {
    /// Feed names, fetched in this order.
    pub sources: Vec<String>,
}

/// Question answering request.
#[derive(Debug, Clone, Deserialize)]
pub struct QaRequest {
    /// Question for the model.
    pub question: String,
    /// Extra model parameters, forwarded as-is.
    #[serde(default = "default_params")]
    pub params: Map<String, Value>,
}

fn default_params() -> Map<String, Value> {
    let mut params = Map::new();
    params.insert("temperature".to_string(), Value::from(DEFAULT_TEMPERATURE));
    params
}
