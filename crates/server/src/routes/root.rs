use rocket::serde::json::Json;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct NodeInfo {
    /// Name of this node
    pub vohala: String,
    /// Running API version
    pub version: String,
    /// WebSocket URL clients should connect to
    pub ws: String,
}

/// # Query Node
///
/// Fetch which service is running and how to reach its gateway.
#[get("/")]
pub async fn root() -> Json<NodeInfo> {
    Json(NodeInfo {
        vohala: "Vohala Social".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        ws: vohala_config::config().hosts.events.clone(),
    })
}
