//! HTTP handlers for the four queue routes: snapshot, history, intake, and
//! completion. Each extracts state and body, validates, mutates the queue
//! under its lock, and returns a uniform `ApiResult`/`ApiError` response.

use std::sync::Arc;

use axum::extract::{Form, State};
use axum::Json;
use chrono::Local;
use serde::Deserialize;

use crate::core_types::DrinkId;
use crate::domain::Order;
use crate::error::ValidationError;
use crate::gateway::state::AppState;
use crate::gateway::types::{ok, ApiError, ApiResult, CompleteResponse, HistoryResponse};

fn validate_order(order: &Order) -> Result<(), ValidationError> {
    if order.drinks.is_empty() {
        return Err(ValidationError::EmptyOrder);
    }
    if order.customer.trim().is_empty() {
        return Err(ValidationError::MissingCustomer);
    }
    for (i, drink) in order.drinks.iter().enumerate() {
        if drink.drink.trim().is_empty() {
            return Err(ValidationError::MissingDrinkName(i));
        }
        if drink.milk_volume < 0.0 {
            return Err(ValidationError::NegativeMilkVolume(drink.milk_volume));
        }
    }
    Ok(())
}

/// `GET /` — the live queue snapshot a UI renders from.
pub async fn get_queue(State(state): State<Arc<AppState>>) -> ApiResult<crate::websocket::QueueSnapshot> {
    let snapshot = state.snapshot().await;
    ok(snapshot)
}

/// `GET /history` — completed drinks grouped by their original order, plus
/// the running completion counters.
pub async fn get_history(State(state): State<Arc<AppState>>) -> ApiResult<HistoryResponse> {
    let engine = state.engine.lock().await;
    ok(HistoryResponse {
        completed_items: engine.completed_items(),
        orders_complete: engine.orders_complete(),
        drinks_complete: engine.drinks_complete(),
    })
}

/// `POST /receive` — accepts a new customer order.
pub async fn receive_order(
    State(state): State<Arc<AppState>>,
    Json(mut order): Json<Order>,
) -> Result<ApiResult<()>, ApiError> {
    validate_order(&order)?;

    order.date_received = Local::now().date_naive();
    order = Order::from_request(order, &state.order_id_gen, || state.drink_id_gen.next());

    if let Some(persistence) = &state.persistence {
        if let Err(err) = persistence.add_order(&order).await {
            tracing::error!(%err, order_id = order.order_id, "failed to persist new order");
        }
    }

    {
        let mut engine = state.engine.lock().await;
        engine.add_order(order);
    }
    state.broadcast_snapshot().await;

    Ok(ok(()))
}

#[derive(Debug, Deserialize)]
pub struct CompleteForm {
    #[serde(rename = "selectedDrinkIDs")]
    selected_drink_ids: String,
    #[serde(rename = "selectedItemIndex")]
    selected_item_index: Option<usize>,
}

/// `POST /complete` — marks the given drinks (or an entire queue item) done.
pub async fn complete_drinks(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CompleteForm>,
) -> Result<ApiResult<CompleteResponse>, ApiError> {
    let drink_ids: Vec<DrinkId> = serde_json::from_str(&form.selected_drink_ids)
        .map_err(|_| ApiError::bad_request("selectedDrinkIDs must be a JSON array of integers"))?;
    let now = Local::now().time();

    let completion;
    {
        let mut engine = state.engine.lock().await;
        completion = if let Some(index) = form.selected_item_index {
            if index >= engine.orders().len() {
                return Err(ValidationError::InvalidItemIndex(index).into());
            }
            engine.complete_item(index, now)
        } else {
            engine.complete_drinks(&drink_ids, now)
        };
    }

    if let Some(persistence) = &state.persistence {
        for &drink_id in &completion.drink_ids {
            if let Err(err) = persistence.complete_drink(drink_id, now).await {
                tracing::error!(%err, drink_id, "failed to persist drink completion");
            }
        }
        for &order_id in &completion.completed_order_ids {
            if let Err(err) = persistence.complete_order(order_id, now).await {
                tracing::error!(%err, order_id, "failed to persist order completion");
            }
        }
    }

    state.broadcast_snapshot().await;

    let engine = state.engine.lock().await;
    Ok(ok(CompleteResponse {
        updated_order_list: engine.orders().to_vec(),
        updated_total_orders: engine.total_orders(),
        updated_total_drinks: engine.total_drinks(),
    }))
}
