// HTTP request handlers - the board controller shell
use crate::domain::panel::{
    ChartKind, ConfigError, MarkerShape, Measurement, PanelDraft, PanelId, PanelStyle,
};
use crate::domain::registry::RegistryError;
use crate::presentation::app_state::AppState;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/panels", post(add_panel).get(list_panels).delete(clear_panels))
        .route("/panels/:id", delete(remove_panel))
        .route("/panels/order", put(reorder_panels))
        .route("/board", get(render_board))
        .with_state(state)
}

/// Wire form of one add action: a snapshot of the currently selected
/// configuration fields. Enum fields arrive as strings and are parsed here;
/// an unknown value is rejected before the registry ever sees it.
#[derive(Debug, Deserialize)]
pub struct AddPanelRequest {
    pub measurement: String,
    pub chart_kind: String,
    pub color: String,
    pub line_width: f64,
    pub marker: String,
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl AddPanelRequest {
    fn into_draft(self) -> Result<PanelDraft, ConfigError> {
        Ok(PanelDraft {
            measurement: self.measurement.parse::<Measurement>()?,
            chart_kind: self.chart_kind.parse::<ChartKind>()?,
            style: PanelStyle {
                color: self.color,
                line_width: self.line_width,
                marker: self.marker.parse::<MarkerShape>()?,
                width: self.width,
                height: self.height,
            },
            title: self.title,
        })
    }
}

fn rejection(error: impl std::fmt::Display) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": error.to_string() })),
    )
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Commit one panel to the board.
pub async fn add_panel(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddPanelRequest>,
) -> impl IntoResponse {
    let draft = match request.into_draft() {
        Ok(draft) => draft,
        Err(e) => {
            tracing::debug!(error = %e, "rejected malformed panel input");
            return rejection(RegistryError::InvalidConfig(e)).into_response();
        }
    };

    match state.registry.write().await.add(draft) {
        Ok(id) => (StatusCode::CREATED, Json(json!({ "id": id }))).into_response(),
        Err(e) => {
            tracing::debug!(error = %e, "registry rejected panel");
            rejection(e).into_response()
        }
    }
}

/// Panels in current display order.
pub async fn list_panels(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let registry = state.registry.read().await;
    Json(registry.list().to_vec())
}

/// Remove one panel by id. Idempotent.
pub async fn remove_panel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    let removed = state.registry.write().await.remove(PanelId(id));
    Json(json!({ "removed": removed }))
}

/// Replace the display order. The body must be an exact permutation of the
/// current panel ids; anything else leaves the board untouched.
pub async fn reorder_panels(
    State(state): State<Arc<AppState>>,
    Json(order): Json<Vec<PanelId>>,
) -> impl IntoResponse {
    match state.registry.write().await.reorder(&order) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            tracing::debug!(error = %e, "rejected reorder");
            rejection(e).into_response()
        }
    }
}

/// Drop every panel. Retired ids stay retired.
pub async fn clear_panels(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.registry.write().await.clear();
    StatusCode::NO_CONTENT
}

/// One interaction cycle: sample fresh telemetry and render every panel in
/// order. Always returns one outcome per panel; a bad panel shows up inline
/// as skipped or failed instead of blanking the board.
pub async fn render_board(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let registry = state.registry.read().await;
    let outcomes = state
        .dispatcher
        .render_all(&registry, state.source.as_ref(), state.backend.as_ref())
        .await;
    Json(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dispatcher::RenderDispatcher;
    use crate::infrastructure::config::{ChannelsSettings, ConstellationChannel, ScalarChannel};
    use crate::infrastructure::figure_backend::FigureBackend;
    use crate::infrastructure::sim_source::SimulatedMetricSource;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use tower::ServiceExt;

    fn request(measurement: &str, chart_kind: &str, marker: &str) -> AddPanelRequest {
        AddPanelRequest {
            measurement: measurement.to_string(),
            chart_kind: chart_kind.to_string(),
            color: "#1f77b4".to_string(),
            line_width: 2.0,
            marker: marker.to_string(),
            width: 400,
            height: 400,
            title: "My Custom Plot".to_string(),
        }
    }

    #[test]
    fn test_into_draft_parses_enum_fields() {
        let draft = request("throughput", "line", "circle").into_draft().unwrap();
        assert_eq!(draft.measurement, Measurement::Throughput);
        assert_eq!(draft.chart_kind, ChartKind::Line);
        assert_eq!(draft.style.marker, MarkerShape::Circle);
    }

    #[test]
    fn test_into_draft_rejects_unknown_enum_values() {
        assert!(matches!(
            request("rsrq", "line", "circle").into_draft(),
            Err(ConfigError::UnknownMeasurement(_))
        ));
        assert!(matches!(
            request("mcs", "pie", "circle").into_draft(),
            Err(ConfigError::UnknownChartKind(_))
        ));
        assert!(matches!(
            request("mcs", "line", "star").into_draft(),
            Err(ConfigError::UnknownMarkerShape(_))
        ));
    }

    fn test_app() -> Router {
        let channels = ChannelsSettings {
            mcs: ScalarChannel { min: 0.0, max: 28.0 },
            sinr: ScalarChannel { min: -10.0, max: 30.0 },
            throughput: ScalarChannel { min: 10.0, max: 100.0 },
            bler: ScalarChannel { min: 0.0, max: 1.0 },
            constellation: ConstellationChannel { points: 16 },
        };
        let state = Arc::new(AppState::new(
            RenderDispatcher::new(10),
            Arc::new(SimulatedMetricSource::new(channels)),
            Arc::new(FigureBackend::new()),
        ));
        router(state)
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<serde_json::Value>) -> (StatusCode, serde_json::Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        let request = match body {
            Some(json) => builder.body(Body::from(json.to_string())).unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn add_body(measurement: &str, chart_kind: &str, title: &str) -> serde_json::Value {
        json!({
            "measurement": measurement,
            "chart_kind": chart_kind,
            "color": "#1f77b4",
            "line_width": 2.0,
            "marker": "circle",
            "width": 400,
            "height": 400,
            "title": title,
        })
    }

    #[tokio::test]
    async fn test_board_lifecycle_over_http() {
        let app = test_app();

        let (status, body) = call(&app, "POST", "/panels", Some(add_body("mcs", "gauge", "MCS"))).await;
        assert_eq!(status, StatusCode::CREATED);
        let first = body["id"].as_u64().unwrap();

        let (status, body) =
            call(&app, "POST", "/panels", Some(add_body("throughput", "line", "Rate"))).await;
        assert_eq!(status, StatusCode::CREATED);
        let second = body["id"].as_u64().unwrap();
        assert_ne!(first, second);

        // Two rendered outcomes, in add order.
        let (status, body) = call(&app, "GET", "/board", None).await;
        assert_eq!(status, StatusCode::OK);
        let outcomes = body.as_array().unwrap();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0]["status"], "rendered");
        assert_eq!(outcomes[0]["panel_id"].as_u64().unwrap(), first);
        assert_eq!(outcomes[1]["status"], "rendered");
        assert_eq!(outcomes[1]["panel_id"].as_u64().unwrap(), second);

        // A non-bijective reorder is rejected and changes nothing.
        let (status, _) = call(&app, "PUT", "/panels/order", Some(json!([first]))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let (_, body) = call(&app, "GET", "/panels", None).await;
        let ids: Vec<u64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![first, second]);

        // A valid permutation flips the board order.
        let (status, _) = call(&app, "PUT", "/panels/order", Some(json!([second, first]))).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, body) = call(&app, "GET", "/board", None).await;
        let outcomes = body.as_array().unwrap();
        assert_eq!(outcomes[0]["panel_id"].as_u64().unwrap(), second);

        // Removing the first panel leaves one outcome, twice removing is not
        // an error.
        let (status, body) = call(&app, "DELETE", &format!("/panels/{first}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["removed"], true);
        let (_, body) = call(&app, "DELETE", &format!("/panels/{first}"), None).await;
        assert_eq!(body["removed"], false);

        let (_, body) = call(&app, "GET", "/board", None).await;
        let outcomes = body.as_array().unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0]["panel_id"].as_u64().unwrap(), second);

        let (status, _) = call(&app, "DELETE", "/panels", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, body) = call(&app, "GET", "/panels", None).await;
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_incompatible_panel_reported_inline() {
        let app = test_app();

        call(&app, "POST", "/panels", Some(add_body("sinr", "gauge", "SINR"))).await;
        call(&app, "POST", "/panels", Some(add_body("bler", "scatter", "bad"))).await;
        call(&app, "POST", "/panels", Some(add_body("constellation", "scatter", "IQ"))).await;

        let (_, body) = call(&app, "GET", "/board", None).await;
        let outcomes = body.as_array().unwrap();
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0]["status"], "rendered");
        assert_eq!(outcomes[1]["status"], "skipped");
        assert_eq!(outcomes[1]["reason"]["kind"], "incompatible_pair");
        assert_eq!(outcomes[2]["status"], "rendered");
    }

    #[tokio::test]
    async fn test_malformed_add_is_rejected_with_422() {
        let app = test_app();
        let (status, body) =
            call(&app, "POST", "/panels", Some(add_body("rsrp", "gauge", "nope"))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().contains("unknown measurement"));

        let (_, body) = call(&app, "GET", "/panels", None).await;
        assert!(body.as_array().unwrap().is_empty());
    }
}
