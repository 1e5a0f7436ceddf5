use crate::config::constants::API_HEALTH_PATH;
use crate::models::context_dto::RequestContext;
use crate::models::health_dto::DatabaseStatus;
use crate::services::api_client::ApiClient;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub const LOADING_INDICATOR: &str = "…";

/// What the dashboard knows about the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    Loading,
    /// The API answered and reported this database status.
    Reachable(DatabaseStatus),
    /// The API could not be reached or did not answer with JSON.
    Unreachable(String),
}

impl DisplayState {
    pub fn render(&self) -> &'static str {
        match self {
            DisplayState::Loading => LOADING_INDICATOR,
            DisplayState::Reachable(DatabaseStatus::Connected) => "connected",
            DisplayState::Reachable(DatabaseStatus::NotConnected) => "not connected",
            DisplayState::Unreachable(_) => "not connected",
        }
    }
}

// Only `database` matters here; the rest of the report is ignored.
#[derive(Debug, Deserialize)]
struct HealthResponse {
    database: String,
}

#[derive(Debug)]
pub struct StatusDisplay {
    state: DisplayState,
}

impl Default for StatusDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusDisplay {
    pub fn new() -> Self {
        StatusDisplay {
            state: DisplayState::Loading,
        }
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn render(&self) -> &'static str {
        self.state.render()
    }

    pub fn render_page(&self) -> String {
        format!("Dashboard\nDatabase: {}", self.render())
    }

    /// Issue the single health request. If `cancel` fires first the request
    /// is dropped and the state is left as it was.
    pub async fn load(
        &mut self,
        client: &ApiClient,
        ctx: &RequestContext,
        cancel: &CancellationToken,
    ) -> &DisplayState {
        let request = client.get_json::<HealthResponse>(API_HEALTH_PATH, ctx);

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("health request cancelled");
                return &self.state;
            }
            result = request => result,
        };

        self.state = match result {
            Ok(body) => DisplayState::Reachable(DatabaseStatus::from_reported(&body.database)),
            Err(e) => {
                warn!(
                    error = %e,
                    url = %client.url(API_HEALTH_PATH),
                    "health endpoint unreachable"
                );
                DisplayState::Unreachable(e.to_string())
            }
        };
        &self.state
    }
}
