use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;

use crate::clients::ClientError;
use crate::config;

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Proxy to the payments API. Holds a cached OAuth access token obtained via
/// the client-credentials grant; the token is refreshed five minutes before
/// its reported expiry.
pub struct PayPalClient {
    http: reqwest::Client,
    token: RwLock<Option<CachedToken>>,
}

impl Default for PayPalClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PayPalClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            token: RwLock::new(None),
        }
    }

    pub fn instance() -> &'static PayPalClient {
        use std::sync::OnceLock;
        static INSTANCE: OnceLock<PayPalClient> = OnceLock::new();
        INSTANCE.get_or_init(PayPalClient::new)
    }

    fn base_url() -> &'static str {
        &config::config().paypal.base_url
    }

    async fn access_token(&self) -> Result<String, ClientError> {
        // Fast path: cached and not about to expire
        {
            let token = self.token.read().await;
            if let Some(token) = token.as_ref() {
                if token.expires_at > Utc::now() {
                    return Ok(token.access_token.clone());
                }
            }
        }

        let paypal = &config::config().paypal;
        if paypal.client_id.trim().is_empty() || paypal.secret_key.trim().is_empty() {
            return Err(ClientError::MissingCredentials("Payments API credentials"));
        }

        let response = self
            .http
            .post(format!("{}/v1/oauth2/token", Self::base_url()))
            .basic_auth(&paypal.client_id, Some(&paypal.secret_key))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Upstream { status, body });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;

        if token.access_token.trim().is_empty() {
            return Err(ClientError::MalformedResponse(
                "received access token is empty".to_string(),
            ));
        }

        let cached = CachedToken {
            access_token: token.access_token.clone(),
            expires_at: Utc::now() + Duration::seconds(token.expires_in - 300),
        };

        {
            let mut slot = self.token.write().await;
            *slot = Some(cached);
        }

        Ok(token.access_token)
    }

    async fn post_json(&self, path: &str, body: Option<Value>) -> Result<reqwest::Response, ClientError> {
        let token = self.access_token().await?;
        let mut request = self
            .http
            .post(format!("{}{}", Self::base_url(), path))
            .bearer_auth(token);
        if let Some(body) = body {
            request = request.json(&body);
        }
        self.execute(request).await
    }

    async fn get_json(&self, path: &str) -> Result<reqwest::Response, ClientError> {
        let token = self.access_token().await?;
        let request = self
            .http
            .get(format!("{}{}", Self::base_url(), path))
            .bearer_auth(token);
        self.execute(request).await
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ClientError> {
        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Upstream { status, body });
        }
        Ok(response)
    }

    async fn json_body(&self, response: reqwest::Response) -> Result<Value, ClientError> {
        response
            .json()
            .await
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))
    }

    fn string_field(value: &Value, field: &str) -> Result<String, ClientError> {
        value
            .get(field)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ClientError::MalformedResponse(format!("missing '{}' field", field)))
    }

    /// Create a catalog product, then a monthly billing plan for it. Returns
    /// the plan id.
    pub async fn create_plan(
        &self,
        product_name: &str,
        description: &str,
        price: f64,
    ) -> Result<String, ClientError> {
        let product_response = self
            .post_json(
                "/v1/catalogs/products",
                Some(json!({
                    "name": product_name,
                    "description": description,
                    "type": "SERVICE",
                    "category": "SOFTWARE"
                })),
            )
            .await?;
        let product = self.json_body(product_response).await?;
        let product_id = Self::string_field(&product, "id")?;

        let plan_response = self
            .post_json(
                "/v1/billing/plans",
                Some(json!({
                    "product_id": product_id,
                    "name": format!("{} Monthly Plan", product_name),
                    "description": format!("Monthly subscription for {}", description),
                    "status": "ACTIVE",
                    "billing_cycles": [{
                        "frequency": {
                            "interval_unit": "MONTH",
                            "interval_count": 1
                        },
                        "tenure_type": "REGULAR",
                        "sequence": 1,
                        "total_cycles": 0,
                        "pricing_scheme": {
                            "fixed_price": {
                                "value": format!("{:.2}", price),
                                "currency_code": "USD"
                            }
                        }
                    }],
                    "payment_preferences": {
                        "auto_bill_outstanding": true,
                        "setup_fee": {
                            "value": "0",
                            "currency_code": "USD"
                        },
                        "setup_fee_failure_action": "CONTINUE",
                        "payment_failure_threshold": 3
                    }
                })),
            )
            .await?;
        let plan = self.json_body(plan_response).await?;
        Self::string_field(&plan, "id")
    }

    pub async fn plan_details(&self, plan_id: &str) -> Result<Value, ClientError> {
        let response = self.get_json(&format!("/v1/billing/plans/{}", plan_id)).await?;
        self.json_body(response).await
    }

    pub async fn activate_plan(&self, plan_id: &str) -> Result<(), ClientError> {
        self.post_json(&format!("/v1/billing/plans/{}/activate", plan_id), None)
            .await?;
        Ok(())
    }

    pub async fn deactivate_plan(&self, plan_id: &str) -> Result<(), ClientError> {
        self.post_json(&format!("/v1/billing/plans/{}/deactivate", plan_id), None)
            .await?;
        Ok(())
    }

    /// Create a subscription and return its id plus the approval link the
    /// client must follow.
    pub async fn create_subscription(&self, plan_id: &str) -> Result<Value, ClientError> {
        let response = self
            .post_json(
                "/v1/billing/subscriptions",
                Some(json!({
                    "plan_id": plan_id,
                    "application_context": {
                        "return_url": "https://example.com/return",
                        "cancel_url": "https://example.com/cancel",
                        "user_action": "SUBSCRIBE_NOW",
                        "payment_method": {
                            "payer_selected": "PAYPAL",
                            "payee_preferred": "IMMEDIATE_PAYMENT_REQUIRED"
                        }
                    }
                })),
            )
            .await?;

        let subscription = self.json_body(response).await?;
        let id = Self::string_field(&subscription, "id")?;

        let approval_url = subscription
            .get("links")
            .and_then(Value::as_array)
            .and_then(|links| {
                links.iter().find(|link| {
                    link.get("rel").and_then(Value::as_str) == Some("approve")
                })
            })
            .and_then(|link| link.get("href"))
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(json!({ "id": id, "approval_url": approval_url }))
    }

    pub async fn subscription_details(&self, subscription_id: &str) -> Result<Value, ClientError> {
        let response = self
            .get_json(&format!("/v1/billing/subscriptions/{}", subscription_id))
            .await?;
        self.json_body(response).await
    }

    pub async fn suspend_subscription(
        &self,
        subscription_id: &str,
        reason: &str,
    ) -> Result<(), ClientError> {
        self.post_json(
            &format!("/v1/billing/subscriptions/{}/suspend", subscription_id),
            Some(json!({ "reason": reason })),
        )
        .await?;
        Ok(())
    }

    pub async fn cancel_subscription(
        &self,
        subscription_id: &str,
        reason: &str,
    ) -> Result<(), ClientError> {
        self.post_json(
            &format!("/v1/billing/subscriptions/{}/cancel", subscription_id),
            Some(json!({ "reason": reason })),
        )
        .await?;
        Ok(())
    }

    pub async fn activate_subscription(
        &self,
        subscription_id: &str,
        reason: &str,
    ) -> Result<(), ClientError> {
        self.post_json(
            &format!("/v1/billing/subscriptions/{}/activate", subscription_id),
            Some(json!({ "reason": reason })),
        )
        .await?;
        Ok(())
    }

    pub async fn capture_payment(&self, subscription_id: &str) -> Result<(), ClientError> {
        self.post_json(
            &format!("/v1/billing/subscriptions/{}/capture", subscription_id),
            Some(json!({
                "note": "Captured payment",
                "capture_type": "OUTSTANDING_BALANCE"
            })),
        )
        .await?;
        Ok(())
    }

    pub async fn list_transactions(
        &self,
        subscription_id: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Value, ClientError> {
        let token = self.access_token().await?;
        let request = self
            .http
            .get(format!(
                "{}/v1/billing/subscriptions/{}/transactions",
                Self::base_url(),
                subscription_id
            ))
            .query(&[("start_time", start_date), ("end_time", end_date)])
            .bearer_auth(token);

        let response = self.execute(request).await?;
        let body = self.json_body(response).await?;
        Ok(body.get("transactions").cloned().unwrap_or_else(|| json!([])))
    }

    /// Client-side bootstrap config for the payments widget. Verifies the
    /// plan exists upstream first.
    pub async fn client_token(&self, plan_id: &str) -> Result<Value, ClientError> {
        self.plan_details(plan_id).await?;

        let paypal = &config::config().paypal;
        Ok(json!({
            "client_id": paypal.client_id,
            "plan_id": plan_id,
            "timestamp": Utc::now().to_rfc3339(),
            "api_url": paypal.base_url,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_parses_wire_shape() {
        let raw = r#"{"scope":"x","access_token":"A21AA...","token_type":"Bearer","expires_in":32400}"#;
        let token: TokenResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(token.access_token, "A21AA...");
        assert_eq!(token.expires_in, 32400);
    }

    #[test]
    fn string_field_reports_missing_keys() {
        let value = json!({ "name": "plan" });
        assert!(PayPalClient::string_field(&value, "name").is_ok());
        assert!(matches!(
            PayPalClient::string_field(&value, "id"),
            Err(ClientError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn cached_token_is_reused_until_expiry() {
        let client = PayPalClient::new();
        {
            let mut slot = client.token.write().await;
            *slot = Some(CachedToken {
                access_token: "cached-token".to_string(),
                expires_at: Utc::now() + Duration::hours(1),
            });
        }
        // No credentials configured, so any refresh attempt would fail;
        // getting the cached value back proves the fast path was taken.
        assert_eq!(client.access_token().await.unwrap(), "cached-token");
    }

    #[tokio::test]
    async fn expired_token_is_not_served() {
        let client = PayPalClient::new();
        {
            let mut slot = client.token.write().await;
            *slot = Some(CachedToken {
                access_token: "stale".to_string(),
                expires_at: Utc::now() - Duration::seconds(1),
            });
        }
        assert!(matches!(
            client.access_token().await,
            Err(ClientError::MissingCredentials(_))
        ));
    }
}
