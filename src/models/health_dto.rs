use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum DatabaseStatus {
    #[serde(rename = "connected")]
    Connected,
    #[serde(rename = "not connected")]
    NotConnected,
}

impl fmt::Display for DatabaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseStatus::Connected => write!(f, "connected"),
            DatabaseStatus::NotConnected => write!(f, "not connected"),
        }
    }
}

impl DatabaseStatus {
    /// Anything other than exactly `connected` counts as not connected.
    pub fn from_reported(s: &str) -> Self {
        match s {
            "connected" => DatabaseStatus::Connected,
            _ => DatabaseStatus::NotConnected,
        }
    }
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub database: DatabaseStatus,
}

impl HealthReport {
    pub fn connected() -> Self {
        HealthReport {
            status: HealthStatus::Healthy,
            timestamp: Utc::now(),
            database: DatabaseStatus::Connected,
        }
    }

    pub fn not_connected() -> Self {
        HealthReport {
            status: HealthStatus::Unhealthy,
            timestamp: Utc::now(),
            database: DatabaseStatus::NotConnected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LivenessStatus {
    Ok,
}

/// Body of `GET /health`, process liveness only.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Liveness {
    pub status: LivenessStatus,
    pub timestamp: DateTime<Utc>,
}

impl Liveness {
    pub fn now() -> Self {
        Liveness {
            status: LivenessStatus::Ok,
            timestamp: Utc::now(),
        }
    }
}
