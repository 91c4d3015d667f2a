//! Event mutation endpoints

use axum::{Form, Json, Router, extract::State, routing::post};
use daybook_core::{Event, validate_event_id};

use crate::routes::{AppError, Params, ResultResponse};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create_event", post(create_event))
        .route("/update_event", post(update_event))
        .route("/delete_event", post(delete_event))
}

/// Build an event from the `event_id`, `user_id`, `date` and `event_content`
/// form fields.
fn event_from_form(form: &Params) -> Result<Event, AppError> {
    Ok(Event::new(
        form.get("event_id"),
        form.get("user_id"),
        form.get("date"),
        form.get("event_content"),
    )?)
}

/// POST /create_event - Store a new event
async fn create_event(
    State(state): State<AppState>,
    Form(form): Form<Vec<(String, String)>>,
) -> Result<Json<ResultResponse<Event>>, AppError> {
    let event = state.store().create(event_from_form(&form.into())?)?;
    tracing::debug!(event_id = %event.id(), "event created");

    Ok(ResultResponse::json(event))
}

/// POST /update_event - Replace an existing event
async fn update_event(
    State(state): State<AppState>,
    Form(form): Form<Vec<(String, String)>>,
) -> Result<Json<ResultResponse<Event>>, AppError> {
    let event = state.store().update(event_from_form(&form.into())?)?;
    tracing::debug!(event_id = %event.id(), "event updated");

    Ok(ResultResponse::json(event))
}

/// POST /delete_event - Remove an event by id
async fn delete_event(
    State(state): State<AppState>,
    Form(form): Form<Vec<(String, String)>>,
) -> Result<Json<ResultResponse<&'static str>>, AppError> {
    let form = Params::from(form);
    let event_id = form.get("event_id");

    validate_event_id(event_id)?;
    state.store().delete(event_id)?;
    tracing::debug!(event_id = %event_id, "event deleted");

    Ok(ResultResponse::json("Event has been deleted"))
}
