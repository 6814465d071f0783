//! HTTP API for the Educhain node.

use crate::error::ApiError;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use educhain_permissions::{
    Participant, ParticipantId, PermissionError, PermissionManager, Tally,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Level;

type AppState = Arc<PermissionManager>;

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    // CORS layer for browser access
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/status", get(status))
        // Admission control
        .route("/api/v1/permissions", get(list_granting))
        .route("/api/v1/permissions/pending", get(list_pending))
        .route("/api/v1/permissions/request", post(request_permission))
        .route("/api/v1/permissions/vote", post(vote))
        .route("/api/v1/permissions/participant", get(get_participant))
        .route("/api/v1/permissions/tally", get(get_tally))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// --- Health endpoints ---

async fn health() -> &'static str {
    "OK"
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    status: &'static str,
}

async fn status() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok" })
}

// --- Admission endpoints ---

#[derive(Debug, Deserialize)]
struct PermissionRequest {
    node_id: String,
}

#[derive(Debug, Serialize)]
struct PermissionResponse {
    success: bool,
    message: String,
}

#[derive(Debug, Deserialize)]
struct VoteRequest {
    node_id: String,
    voter_id: String,
    approve: bool,
}

#[derive(Debug, Serialize)]
struct VoteResponse {
    success: bool,
    message: String,
    /// Target's grant state after this vote
    granted: bool,
}

/// Participant ids travel as a query parameter so any non-empty id,
/// including `pending` or one containing `/`, can be looked up.
#[derive(Debug, Deserialize)]
struct LookupQuery {
    id: String,
}

/// Unauthorized votes are a misuse signal. A terminal error means the
/// network can never admit anyone, which is an operator problem.
fn rejection_level(err: &PermissionError) -> Level {
    match err {
        PermissionError::VoterNotAuthorized(_) => Level::WARN,
        e if !e.is_retryable() => Level::ERROR,
        _ => Level::DEBUG,
    }
}

/// Log a rejection at the boundary.
fn rejected(op: &str, err: PermissionError) -> ApiError {
    let level = rejection_level(&err);
    if level == Level::WARN {
        tracing::warn!("Rejected {}: {}", op, err);
    } else if level == Level::ERROR {
        tracing::error!("Rejected {}: {}", op, err);
    } else {
        tracing::debug!("Rejected {}: {}", op, err);
    }
    ApiError(err)
}

async fn request_permission(
    State(pm): State<AppState>,
    Json(req): Json<PermissionRequest>,
) -> Result<(StatusCode, Json<PermissionResponse>), ApiError> {
    pm.request_admission(req.node_id.as_str())
        .map_err(|e| rejected("admission request", e))?;
    tracing::info!("Permission request submitted: {}", req.node_id);

    Ok((
        StatusCode::CREATED,
        Json(PermissionResponse {
            success: true,
            message: "Permission request submitted.".to_string(),
        }),
    ))
}

async fn vote(
    State(pm): State<AppState>,
    Json(req): Json<VoteRequest>,
) -> Result<Json<VoteResponse>, ApiError> {
    pm.cast_vote(&req.node_id, &req.voter_id, req.approve)
        .map_err(|e| rejected("vote", e))?;

    // Grants are monotonic, so a later read never under-reports this vote.
    let granted = pm.check_permission(&req.node_id)?;
    let message = if granted {
        format!("Permission granted for node {}.", req.node_id)
    } else {
        format!("Vote recorded for node {}; permission pending.", req.node_id)
    };

    Ok(Json(VoteResponse {
        success: true,
        message,
        granted,
    }))
}

async fn get_participant(
    State(pm): State<AppState>,
    Query(q): Query<LookupQuery>,
) -> Result<Json<Participant>, ApiError> {
    Ok(Json(pm.participant(&q.id)?))
}

async fn get_tally(
    State(pm): State<AppState>,
    Query(q): Query<LookupQuery>,
) -> Result<Json<Tally>, ApiError> {
    Ok(Json(pm.tally(&q.id)?))
}

async fn list_granting(State(pm): State<AppState>) -> Json<Vec<ParticipantId>> {
    Json(pm.granting())
}

async fn list_pending(State(pm): State<AppState>) -> Json<Vec<ParticipantId>> {
    Json(pm.pending())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        Arc::new(PermissionManager::new(["A", "B", "C"]).unwrap())
    }

    fn vote_req(node: &str, voter: &str, approve: bool) -> Json<VoteRequest> {
        Json(VoteRequest {
            node_id: node.to_string(),
            voter_id: voter.to_string(),
            approve,
        })
    }

    fn lookup(id: &str) -> Query<LookupQuery> {
        Query(LookupQuery { id: id.to_string() })
    }

    async fn request(
        state: &AppState,
        node: &str,
    ) -> Result<(StatusCode, Json<PermissionResponse>), ApiError> {
        request_permission(
            State(Arc::clone(state)),
            Json(PermissionRequest {
                node_id: node.to_string(),
            }),
        )
        .await
    }

    #[test]
    fn router_builds() {
        let _ = build_router(state());
    }

    #[tokio::test]
    async fn request_then_duplicate() {
        let state = state();

        let (status, Json(body)) = request(&state, "D").await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert!(body.success);

        let err = request(&state, "D").await.unwrap_err();
        assert_eq!(err.status(), StatusCode::CONFLICT);

        let err = request(&state, "").await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn vote_reports_grant_state() {
        let state = state();
        request(&state, "D").await.unwrap();

        let Json(first) = vote(State(Arc::clone(&state)), vote_req("D", "A", true))
            .await
            .unwrap();
        assert!(!first.granted);

        let Json(second) = vote(State(Arc::clone(&state)), vote_req("D", "B", true))
            .await
            .unwrap();
        assert!(second.granted);
        assert_eq!(second.message, "Permission granted for node D.");
    }

    #[tokio::test]
    async fn vote_errors_map_to_statuses() {
        let state = state();
        request(&state, "D").await.unwrap();

        let err = vote(State(Arc::clone(&state)), vote_req("D", "D", true))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);

        let err = vote(State(Arc::clone(&state)), vote_req("ghost", "A", true))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn rejection_log_levels() {
        let unauthorized = PermissionError::VoterNotAuthorized("D".into());
        assert_eq!(rejection_level(&unauthorized), Level::WARN);
        assert_eq!(rejection_level(&PermissionError::NoQuorum), Level::ERROR);
        assert_eq!(rejection_level(&PermissionError::EmptyId), Level::DEBUG);
        let dup = PermissionError::AlreadyExists("D".into());
        assert_eq!(rejection_level(&dup), Level::DEBUG);
    }

    #[tokio::test]
    async fn participant_and_tally_views() {
        let state = state();
        request(&state, "D").await.unwrap();
        vote(State(Arc::clone(&state)), vote_req("D", "A", true)).await.unwrap();
        vote(State(Arc::clone(&state)), vote_req("D", "B", false)).await.unwrap();

        let Json(d) = get_participant(State(Arc::clone(&state)), lookup("D"))
            .await
            .unwrap();
        assert!(!d.can_grant);

        let Json(tally) = get_tally(State(Arc::clone(&state)), lookup("D")).await.unwrap();
        assert_eq!(
            (tally.yes, tally.no, tally.quorum, tally.threshold, tally.needed),
            (1, 1, 3, 2, 1)
        );

        let err = get_participant(State(Arc::clone(&state)), lookup("ghost"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn ids_that_look_like_routes_are_reachable() {
        let state = state();
        for id in ["pending", "a/b", "tally"] {
            request(&state, id).await.unwrap();

            let Json(p) = get_participant(State(Arc::clone(&state)), lookup(id))
                .await
                .unwrap();
            assert_eq!(p.id.to_string(), id);
            assert!(!p.can_grant);

            let Json(tally) = get_tally(State(Arc::clone(&state)), lookup(id)).await.unwrap();
            assert_eq!(tally.target.to_string(), id);
            assert_eq!(tally.needed, 2);
        }

        let Json(pending) = list_pending(State(Arc::clone(&state))).await;
        assert_eq!(pending.len(), 3);
    }

    #[tokio::test]
    async fn listings() {
        let state = state();
        request(&state, "D").await.unwrap();

        let Json(granting) = list_granting(State(Arc::clone(&state))).await;
        let Json(pending) = list_pending(State(Arc::clone(&state))).await;
        assert_eq!(granting.len(), 3);
        assert_eq!(pending, [ParticipantId::new("D").unwrap()]);
    }
}
