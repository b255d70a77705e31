//! Handlers for recorded fundings.
//!
//! Payment capture happens with the payment provider; this API only records
//! confirmed payments and reports totals.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use vitalflow_core::error::CoreError;
use vitalflow_core::pagination::Page;
use vitalflow_core::validation::require_non_empty;
use vitalflow_db::models::funding::{CreateFunding, Funding};
use vitalflow_db::repositories::FundingRepo;

use crate::error::AppResult;
use crate::middleware::rbac::CurrentDonor;
use crate::query::ListParams;
use crate::state::AppState;

const DEFAULT_CURRENCY: &str = "usd";

/// Body of `POST /fundings`. Amounts are in the currency's minor unit.
#[derive(Debug, Deserialize)]
pub struct RecordFunding {
    pub amount_cents: i64,
    #[serde(default)]
    pub currency: Option<String>,
    pub transaction_id: String,
}

#[derive(Debug, Serialize)]
pub struct TotalFunding {
    pub total: i64,
}

/// POST /fundings
///
/// A repeated `transaction_id` hits `uq_fundings_transaction_id` and is
/// reported as 409.
pub async fn record_funding(
    State(state): State<AppState>,
    CurrentDonor(me): CurrentDonor,
    Json(input): Json<RecordFunding>,
) -> AppResult<(StatusCode, Json<Funding>)> {
    if input.amount_cents <= 0 {
        return Err(CoreError::Validation("Amount must be greater than zero".into()).into());
    }
    require_non_empty("Transaction id", &input.transaction_id)?;

    let currency = input
        .currency
        .map(|c| c.trim().to_ascii_lowercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

    let funding = FundingRepo::create(
        &state.pool,
        &CreateFunding {
            donor_email: me.email.clone(),
            donor_name: me.name.clone(),
            amount_cents: input.amount_cents,
            currency,
            transaction_id: input.transaction_id.trim().to_string(),
        },
    )
    .await?;

    tracing::info!(
        funding_id = funding.id,
        donor_id = me.id,
        amount_cents = funding.amount_cents,
        "Funding recorded"
    );
    Ok((StatusCode::CREATED, Json(funding)))
}

/// GET /fundings?page=&size=
pub async fn list_fundings(
    State(state): State<AppState>,
    CurrentDonor(_me): CurrentDonor,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Page<Funding>>> {
    let (limit, offset) = params.window();
    let items = FundingRepo::list(&state.pool, limit, offset).await?;
    let total = FundingRepo::count(&state.pool).await?;
    Ok(Json(Page::new(items, total)))
}

/// GET /total-funding
pub async fn total_funding(State(state): State<AppState>) -> AppResult<Json<TotalFunding>> {
    let total = FundingRepo::total(&state.pool).await?;
    Ok(Json(TotalFunding { total }))
}
