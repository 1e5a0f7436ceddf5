use crate::models::health_dto::HealthReport;
use sqlx::AnyPool;
use std::future::Future;
use tracing::warn;

/// Liveness probe against a backing store.
pub trait Probe {
    fn probe(&self) -> impl Future<Output = Result<(), sqlx::Error>> + Send;
}

impl Probe for AnyPool {
    async fn probe(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(self).await.map(|_| ())
    }
}

/// Run exactly one probe and turn the outcome into a report. Probe errors
/// stop here.
pub async fn check_database<P>(target: &P) -> HealthReport
where
    P: Probe + Sync,
{
    match target.probe().await {
        Ok(()) => HealthReport::connected(),
        Err(e) => {
            warn!(error = %e, "database probe failed");
            HealthReport::not_connected()
        }
    }
}
