use mongodb::{Client, bson::doc};
use std::time::Instant;

/// Health check status for MongoDB
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// Whether the database is healthy
    pub healthy: bool,
    /// Optional message (e.g., error details)
    pub message: Option<String>,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

async fn ping(client: &Client) -> mongodb::error::Result<()> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map(|_| ())
}

/// Check MongoDB health with a `ping` command
///
/// Returns timing information and any error messages.
pub async fn check_health_detailed(client: &Client) -> HealthStatus {
    let start = Instant::now();
    let result = ping(client).await;
    let response_time_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => HealthStatus {
            healthy: true,
            message: None,
            response_time_ms,
        },
        Err(e) => HealthStatus {
            healthy: false,
            message: Some(e.to_string()),
            response_time_ms,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mongodb::{MongoConfig, connect_lazy};

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_check_health_reachable() {
        let client = connect_lazy(&MongoConfig::default()).await.unwrap();
        let status = check_health_detailed(&client).await;
        assert!(status.healthy, "{:?}", status.message);
    }

    #[tokio::test]
    async fn test_check_health_detailed_unreachable() {
        let mut config = MongoConfig::from_host("127.0.0.1:1");
        config.server_selection_timeout_secs = 1;
        config.connect_timeout_secs = 1;
        let client = connect_lazy(&config).await.unwrap();

        let status = check_health_detailed(&client).await;
        assert!(!status.healthy);
        assert!(status.message.is_some());
    }
}
