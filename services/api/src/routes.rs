use std::io::Cursor;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use talent_match::error::AppError;
use talent_match::matching::{
    BudgetRange, Complexity, ConstraintPolicy, MatchingEngine, MatchingProfile, ScoreBreakdown,
    WeightSet, WorkItem,
};
use talent_match::roster::{RosterImporter, RosterSource, RowRejection};
use uuid::Uuid;

use crate::infra::AppState;

const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Deserialize)]
pub(crate) struct MatchRequest {
    pub(crate) roster_csv: String,
    #[serde(default)]
    pub(crate) source: Option<RosterSource>,
    pub(crate) work: WorkRequest,
    #[serde(default)]
    pub(crate) weights: Option<WeightSet>,
    #[serde(default)]
    pub(crate) top_n: Option<usize>,
    #[serde(default = "default_apply_constraints")]
    pub(crate) apply_constraints: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WorkRequest {
    #[serde(default)]
    pub(crate) id: Option<String>,
    pub(crate) description: String,
    #[serde(default)]
    pub(crate) required_skills: Vec<String>,
    pub(crate) budget_min: f64,
    pub(crate) budget_max: f64,
    pub(crate) complexity: Complexity,
    #[serde(default)]
    pub(crate) timeline_days: Option<u32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct MatchResponse {
    pub(crate) work_id: String,
    pub(crate) required_skills: Vec<String>,
    pub(crate) rejected_rows: Vec<RowRejection>,
    pub(crate) matches: Vec<MatchEntry>,
}

#[derive(Debug, Serialize)]
pub(crate) struct MatchEntry {
    pub(crate) candidate_id: String,
    pub(crate) username: String,
    pub(crate) name: String,
    pub(crate) title: String,
    pub(crate) rate: f64,
    pub(crate) content: f64,
    pub(crate) collaborative: f64,
    pub(crate) skill_overlap: usize,
    pub(crate) combined: f64,
}

impl From<&ScoreBreakdown<'_>> for MatchEntry {
    fn from(breakdown: &ScoreBreakdown<'_>) -> Self {
        let candidate = breakdown.candidate;
        Self {
            candidate_id: candidate.id.to_string(),
            username: candidate.username.clone(),
            name: candidate.name.clone(),
            title: candidate.title.clone(),
            rate: candidate.rate,
            content: breakdown.content,
            collaborative: breakdown.collaborative,
            skill_overlap: breakdown.skill_overlap,
            combined: breakdown.combined,
        }
    }
}

fn default_apply_constraints() -> bool {
    true
}

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/matches", post(matches_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn matches_endpoint(
    Json(payload): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let MatchRequest {
        roster_csv,
        source,
        work,
        weights,
        top_n,
        apply_constraints,
    } = payload;

    let source = source.unwrap_or(RosterSource::Standard);
    let import = RosterImporter::from_reader(Cursor::new(roster_csv.into_bytes()), source)?;

    let work = WorkItem::new(
        work.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        work.description,
        work.required_skills,
        BudgetRange::new(work.budget_min, work.budget_max)?,
        work.complexity,
        work.timeline_days,
    )?;

    let mut profile = MatchingProfile::for_source(source);
    if let Some(weights) = weights {
        profile = profile.with_weights(weights);
    }
    let engine = MatchingEngine::new(import.candidates, profile);

    let policy = if apply_constraints {
        ConstraintPolicy::default()
    } else {
        ConstraintPolicy::permissive()
    };
    let matches = engine
        .top_matches(&work, &policy, top_n.unwrap_or(DEFAULT_TOP_N))
        .iter()
        .map(MatchEntry::from)
        .collect();

    Ok(Json(MatchResponse {
        work_id: work.id.clone(),
        required_skills: engine.required_skills(&work),
        rejected_rows: import.rejected,
        matches,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSTER: &str = "id,username,name,job_title,skills,experience,rating,hourly_rate,profile_url,availability,total_sales\n\
c-1,ada,Ada,Frontend Developer,\"React, CSS\",5,4.5,60,,true,10\n\
c-2,bruno,Bruno,Chef,cooking,10,5.0,40,,true,30\n\
c-3,pricey,Pat,Senior React Developer,\"React, CSS\",12,5.0,150,,true,50\n\
c-4,broken,Broken,Dev,React,abc,4.0,40,,true,1\n";

    fn request(apply_constraints: bool) -> MatchRequest {
        MatchRequest {
            roster_csv: ROSTER.to_string(),
            source: None,
            work: WorkRequest {
                id: Some("work-42".into()),
                description: "build a React web app".into(),
                required_skills: vec!["React".into(), "CSS".into()],
                budget_min: 20.0,
                budget_max: 100.0,
                complexity: Complexity::Medium,
                timeline_days: Some(14),
            },
            weights: None,
            top_n: None,
            apply_constraints,
        }
    }

    #[tokio::test]
    async fn matches_endpoint_filters_and_reports_rejections() {
        let Json(body) = matches_endpoint(Json(request(true)))
            .await
            .expect("matches computed");

        assert_eq!(body.work_id, "work-42");
        assert_eq!(body.required_skills, vec!["React", "CSS"]);
        assert_eq!(body.rejected_rows.len(), 1);
        assert_eq!(body.rejected_rows[0].line, 5);
        assert_eq!(body.matches.len(), 1);
        assert_eq!(body.matches[0].candidate_id, "c-1");
        assert_eq!(body.matches[0].skill_overlap, 2);
    }

    #[tokio::test]
    async fn constraints_can_be_disabled() {
        let Json(body) = matches_endpoint(Json(request(false)))
            .await
            .expect("matches computed");

        assert_eq!(body.matches.len(), 3);
        assert_eq!(body.matches[0].candidate_id, "c-3");
    }

    #[tokio::test]
    async fn inverted_budget_is_a_bad_request() {
        let mut payload = request(true);
        payload.work.budget_min = 200.0;

        let err = matches_endpoint(Json(payload))
            .await
            .expect_err("budget rejected");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn router_serves_health_and_rejects_malformed_match_requests() {
        use axum::body::Body;
        use axum::http::Request;
        use tower::ServiceExt;

        let health = router()
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("health response");
        assert_eq!(health.status(), StatusCode::OK);

        let malformed = router()
            .oneshot(
                Request::post("/api/v1/matches")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"roster_csv": ""}"#))
                    .expect("request"),
            )
            .await
            .expect("match response");
        assert!(malformed.status().is_client_error());
    }
}
