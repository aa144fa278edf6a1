use axum::Json;
use tracing::{error, info};

use crate::clients::SummaryClient;
use crate::dto::SummaryRequest;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// POST /summary - summarize text through the LLM proxy
pub async fn summarize(Json(mut request): Json<SummaryRequest>) -> ApiResult<SummaryRequest> {
    if request.content.trim().is_empty() {
        error!("Received invalid summary request: missing content");
        return Err(ApiError::bad_request("Empty request or missing content!"));
    }

    let result = SummaryClient::instance().summarize(&request.content).await?;
    info!("Summary was successfully created ({} chars)", result.len());

    request.result = Some(result);
    Ok(ApiResponse::success(request))
}
