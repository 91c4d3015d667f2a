//! Range query endpoints (day, week, month)

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::NaiveDate;
use daybook_core::{Event, parse_date, validate_owner_id};

use crate::routes::{AppError, Params, ResultResponse};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events_for_day", get(events_for_day))
        .route("/events_for_week", get(events_for_week))
        .route("/events_for_month", get(events_for_month))
}

/// Validated `user_id` and `date` shared by all range queries
struct RangeQuery {
    user_id: String,
    date: NaiveDate,
}

impl TryFrom<Vec<(String, String)>> for RangeQuery {
    type Error = AppError;

    fn try_from(pairs: Vec<(String, String)>) -> Result<Self, Self::Error> {
        let params = Params::from(pairs);

        let user_id = params.get("user_id");
        validate_owner_id(user_id)?;
        let date = parse_date(params.get("date"))?;

        Ok(RangeQuery {
            user_id: user_id.to_string(),
            date,
        })
    }
}

type EventsResponse = Result<Json<ResultResponse<Vec<Event>>>, AppError>;

/// GET /events_for_day?user_id=..&date=YYYY-MM-DD
async fn events_for_day(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> EventsResponse {
    let q = RangeQuery::try_from(pairs)?;
    let events = state.store().events_for_day(&q.user_id, q.date)?;
    Ok(ResultResponse::json(events))
}

/// GET /events_for_week?user_id=..&date=YYYY-MM-DD
async fn events_for_week(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> EventsResponse {
    let q = RangeQuery::try_from(pairs)?;
    let events = state.store().events_for_week(&q.user_id, q.date)?;
    Ok(ResultResponse::json(events))
}

/// GET /events_for_month?user_id=..&date=YYYY-MM-DD
async fn events_for_month(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> EventsResponse {
    let q = RangeQuery::try_from(pairs)?;
    let events = state.store().events_for_month(&q.user_id, q.date)?;
    Ok(ResultResponse::json(events))
}
