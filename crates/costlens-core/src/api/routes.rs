//! API routes

use axum::{routing::get, Router};

use super::handlers::{self, AppState};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health))

        // Filter pickers
        .route("/api/v1/campaigns", get(handlers::list_campaigns))

        // Cost views
        .route("/api/v1/costs/summary", get(handlers::get_summary))
        .route("/api/v1/costs/daily", get(handlers::get_daily))
        .route("/api/v1/costs/groups", get(handlers::get_groups))
        .route("/api/v1/costs/rollup", get(handlers::get_rollup))
        .route("/api/v1/costs/overview", get(handlers::get_overview))

        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::engine::CostModel;
    use crate::models::{parse_timestamp, CampaignType, EventRecord};

    fn record(campaign_id: &str, group: Option<&str>, ts: &str, tokens: u64, delivered: u64) -> EventRecord {
        EventRecord {
            campaign_id: campaign_id.to_string(),
            campaign_type: if campaign_id == "C2" {
                CampaignType::Automation
            } else {
                CampaignType::Campaign
            },
            group: group.map(str::to_string),
            timestamp: parse_timestamp(ts).unwrap(),
            tokens_used: tokens,
            attempted: delivered,
            delivered,
            read: 0,
            responded: 0,
        }
    }

    fn state() -> AppState {
        AppState {
            events: Arc::new(vec![
                record("C1", Some("A"), "2024-06-01T10:00:00", 10, 5),
                record("C2", Some("B"), "2024-06-02T10:00:00", 20, 0),
                record("C3", None, "2024-06-03T10:00:00", 2, 2),
            ]),
            cost: Arc::new(CostModel::new(15.0, "IDR").unwrap()),
        }
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = create_router(state())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["events"], 3);
    }

    #[tokio::test]
    async fn test_campaigns() {
        let (status, body) = get_json("/api/v1/campaigns").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["campaigns"], serde_json::json!(["C1", "C2", "C3"]));
        assert_eq!(body["groups"], serde_json::json!(["A", "B", "Unknown"]));
    }

    #[tokio::test]
    async fn test_summary_with_date_filter() {
        let (status, body) = get_json("/api/v1/costs/summary?from=2024-06-01&to=2024-06-02").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_units"], 30);
        assert_eq!(body["total_cost"], 450.0);
        assert_eq!(body["total_delivered"], 5);
        assert_eq!(body["avg_cost_per_delivered"], 90.0);
    }

    #[tokio::test]
    async fn test_groups_filtered_by_group() {
        let (status, body) = get_json("/api/v1/costs/groups?group=A").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!([{ "group": "A", "cost": 150.0, "units": 10 }])
        );
    }

    #[tokio::test]
    async fn test_rollup_sorted_with_unknown() {
        let (status, body) = get_json("/api/v1/costs/rollup?campaign_type=all").await;
        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["campaign_id"], "C2");
        assert_eq!(rows[2]["group"], "Unknown");
    }

    #[tokio::test]
    async fn test_daily_by_campaign_type() {
        let (status, body) = get_json("/api/v1/costs/daily?campaign_type=Automation").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!([{ "day": "2024-06-02", "cost": 300.0, "units": 20 }])
        );
    }

    #[tokio::test]
    async fn test_overview_for_empty_selection() {
        let (status, body) = get_json("/api/v1/costs/overview?campaign=nope").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["event_count"], 0);
        assert_eq!(body["summary"]["total_cost"], 0.0);
        assert_eq!(body["daily"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_bad_queries_are_rejected() {
        for uri in [
            "/api/v1/costs/summary?campaign_type=Blast",
            "/api/v1/costs/summary?from=06/01/2024",
            "/api/v1/costs/summary?from=2024-06-05&to=2024-06-01",
        ] {
            let (status, body) = get_json(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert!(body["error"].is_string());
        }
    }
}
