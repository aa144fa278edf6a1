use axum::extract::{Path, Query};
use axum::Json;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::clients::PayPalClient;
use crate::dto::{PlanRequest, ReasonRequest, SubscriptionRequest, TransactionsQuery};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

fn require_id(id: &str, what: &str) -> Result<(), ApiError> {
    if id.trim().is_empty() {
        let message = format!("{} is required.", what);
        warn!("{}", message);
        return Err(ApiError::bad_request(message));
    }
    Ok(())
}

fn reason_or_default(request: Option<Json<ReasonRequest>>, default: &str) -> String {
    request
        .and_then(|Json(r)| r.reason)
        .filter(|reason| !reason.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// POST /billing/plans - create a product and a monthly plan for it
pub async fn create_plan(Json(request): Json<PlanRequest>) -> ApiResult<Value> {
    info!("Creating payment plan");

    if request.product_name.trim().is_empty()
        || request.description.trim().is_empty()
        || request.price <= 0.0
    {
        let message = "Invalid plan request. product_name, description and price (> 0) are required.";
        warn!("{}", message);
        return Err(ApiError::bad_request(message));
    }

    let plan_id = PayPalClient::instance()
        .create_plan(&request.product_name, &request.description, request.price)
        .await?;

    info!("Successfully created payment plan with ID: {}", plan_id);
    Ok(ApiResponse::created(json!({ "plan_id": plan_id })))
}

/// GET /billing/plans/:plan_id
pub async fn plan_details(Path(plan_id): Path<String>) -> ApiResult<Value> {
    info!("Getting details for payment plan {}", plan_id);
    require_id(&plan_id, "Plan ID")?;

    let plan = PayPalClient::instance().plan_details(&plan_id).await?;
    info!("Successfully retrieved plan details for plan ID: {}", plan_id);
    Ok(ApiResponse::success(plan))
}

/// POST /billing/plans/:plan_id/activate
pub async fn activate_plan(Path(plan_id): Path<String>) -> ApiResult<Value> {
    info!("Activating payment plan {}", plan_id);
    require_id(&plan_id, "Plan ID")?;

    PayPalClient::instance().activate_plan(&plan_id).await?;
    info!("Successfully activated plan ID: {}", plan_id);
    Ok(ApiResponse::success(json!({ "plan_id": plan_id })))
}

/// POST /billing/plans/:plan_id/deactivate
pub async fn deactivate_plan(Path(plan_id): Path<String>) -> ApiResult<Value> {
    info!("Deactivating payment plan {}", plan_id);
    require_id(&plan_id, "Plan ID")?;

    PayPalClient::instance().deactivate_plan(&plan_id).await?;
    info!("Successfully deactivated plan ID: {}", plan_id);
    Ok(ApiResponse::success(json!({ "plan_id": plan_id })))
}

/// POST /billing/subscriptions
pub async fn create_subscription(Json(request): Json<SubscriptionRequest>) -> ApiResult<Value> {
    info!("Creating subscription for plan {}", request.plan_id);
    require_id(&request.plan_id, "Plan ID")?;

    let subscription = PayPalClient::instance()
        .create_subscription(&request.plan_id)
        .await?;

    info!("Successfully created subscription for plan ID: {}", request.plan_id);
    Ok(ApiResponse::created(json!({ "subscription_info": subscription })))
}

/// GET /billing/subscriptions/:subscription_id
pub async fn subscription_details(Path(subscription_id): Path<String>) -> ApiResult<Value> {
    info!("Getting details for subscription {}", subscription_id);
    require_id(&subscription_id, "Subscription ID")?;

    let subscription = PayPalClient::instance()
        .subscription_details(&subscription_id)
        .await?;

    info!(
        "Successfully retrieved subscription details for ID: {}",
        subscription_id
    );
    Ok(ApiResponse::success(subscription))
}

/// POST /billing/subscriptions/:subscription_id/suspend
pub async fn suspend_subscription(
    Path(subscription_id): Path<String>,
    request: Option<Json<ReasonRequest>>,
) -> ApiResult<Value> {
    info!("Suspending subscription {}", subscription_id);
    require_id(&subscription_id, "Subscription ID")?;

    let reason = reason_or_default(request, "User requested suspension");
    PayPalClient::instance()
        .suspend_subscription(&subscription_id, &reason)
        .await?;

    info!("Successfully suspended subscription ID: {}", subscription_id);
    Ok(ApiResponse::success(json!({ "subscription_id": subscription_id })))
}

/// POST /billing/subscriptions/:subscription_id/cancel
pub async fn cancel_subscription(
    Path(subscription_id): Path<String>,
    request: Option<Json<ReasonRequest>>,
) -> ApiResult<Value> {
    info!("Cancelling subscription {}", subscription_id);
    require_id(&subscription_id, "Subscription ID")?;

    let reason = reason_or_default(request, "User requested cancellation");
    PayPalClient::instance()
        .cancel_subscription(&subscription_id, &reason)
        .await?;

    info!("Successfully cancelled subscription ID: {}", subscription_id);
    Ok(ApiResponse::success(json!({ "subscription_id": subscription_id })))
}

/// POST /billing/subscriptions/:subscription_id/activate
pub async fn activate_subscription(
    Path(subscription_id): Path<String>,
    request: Option<Json<ReasonRequest>>,
) -> ApiResult<Value> {
    info!("Activating subscription {}", subscription_id);
    require_id(&subscription_id, "Subscription ID")?;

    let reason = reason_or_default(request, "User requested activation");
    PayPalClient::instance()
        .activate_subscription(&subscription_id, &reason)
        .await?;

    info!("Successfully activated subscription ID: {}", subscription_id);
    Ok(ApiResponse::success(json!({ "subscription_id": subscription_id })))
}

/// POST /billing/subscriptions/:subscription_id/capture
pub async fn capture_payment(Path(subscription_id): Path<String>) -> ApiResult<Value> {
    info!("Capturing payment for subscription {}", subscription_id);
    require_id(&subscription_id, "Subscription ID")?;

    PayPalClient::instance().capture_payment(&subscription_id).await?;
    info!(
        "Successfully captured payment for subscription ID: {}",
        subscription_id
    );
    Ok(ApiResponse::success(json!({ "subscription_id": subscription_id })))
}

/// GET /billing/subscriptions/:subscription_id/transactions?start_date&end_date
pub async fn list_transactions(
    Path(subscription_id): Path<String>,
    Query(query): Query<TransactionsQuery>,
) -> ApiResult<Value> {
    info!("Listing transactions for subscription {}", subscription_id);
    require_id(&subscription_id, "Subscription ID")?;

    let (Some(start_date), Some(end_date)) = (query.start_date, query.end_date) else {
        let message = "Start date and end date are required.";
        warn!("{}", message);
        return Err(ApiError::bad_request(message));
    };
    if start_date.trim().is_empty() || end_date.trim().is_empty() {
        let message = "Start date and end date are required.";
        warn!("{}", message);
        return Err(ApiError::bad_request(message));
    }

    let transactions = PayPalClient::instance()
        .list_transactions(&subscription_id, &start_date, &end_date)
        .await?;

    info!(
        "Successfully listed transactions for subscription ID: {}",
        subscription_id
    );
    Ok(ApiResponse::success(json!({ "transactions": transactions })))
}

/// GET /billing/client-token/:plan_id
pub async fn client_token(Path(plan_id): Path<String>) -> ApiResult<Value> {
    info!("Generating client token for plan {}", plan_id);
    require_id(&plan_id, "Plan ID")?;

    let token = PayPalClient::instance().client_token(&plan_id).await?;
    info!("Successfully generated client token for plan ID: {}", plan_id);
    Ok(ApiResponse::success(json!({ "client_token": token })))
}
