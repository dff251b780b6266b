//! The Pesapal gateway client and its four operations.
//!
//! Every operation performs exactly one HTTP round trip and classifies the
//! gateway's answer into an [`Outcome`] envelope. Authenticated calls build
//! their header set locally from the client's fixed template, so no call
//! mutates shared state and the client can be used concurrently.

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::{Value, json};
use url::Url;

use crate::config::{ClientConfig, Environment};
use crate::constants::{
    AUTH_PATH, GATEWAY_OK, IPN_NOTIFICATION_TYPE, ORDER_TRACKING_ID_PARAM, REGISTER_IPN_PATH,
    SUBMIT_ORDER_PATH, TRANSACTION_STATUS_PATH,
};
use crate::error::Error;
use crate::types::{IpnData, OrderData, OrderRequest, Outcome, Status, TokenData, wire};

/// Message used when the gateway answers with a non-200 HTTP status and no
/// usable error detail can be recovered from the body.
const GENERIC_FAILURE_MESSAGE: &str = "invalid server response";

/// Client for the Pesapal v3 REST API.
///
/// Holds the API credentials and a fixed header template. The bearer token
/// obtained from [`authenticate`](Self::authenticate) is not stored; callers
/// pass it explicitly into the other operations.
///
/// # Example
///
/// ```no_run
/// use pesapal::{Environment, Pesapal};
///
/// # async fn run() -> Result<(), pesapal::Error> {
/// let client = Pesapal::sandbox("consumer-key", "consumer-secret");
/// let auth = client.authenticate().await?;
/// # Ok(())
/// # }
/// ```
pub struct Pesapal {
    consumer_key: String,
    consumer_secret: String,
    environment: Environment,
    base_url: Url,
    auth_url: Url,
    register_ipn_url: Url,
    submit_order_url: Url,
    transaction_status_url: Url,
    headers: HeaderMap,
    client: reqwest::Client,
}

impl Pesapal {
    /// Creates a client against the production gateway with default options.
    #[must_use]
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self::with_config(consumer_key, consumer_secret, ClientConfig::default())
            .expect("default configuration is valid")
    }

    /// Creates a client against the sandbox gateway with default options.
    #[must_use]
    pub fn sandbox(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self::with_config(
            consumer_key,
            consumer_secret,
            ClientConfig::new(Environment::Sandbox),
        )
        .expect("sandbox configuration is valid")
    }

    /// Creates a client from an explicit [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UrlParse`] if the configured base URL is invalid.
    pub fn with_config(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self, Error> {
        // Normalize to a single trailing slash so joins append segments
        // instead of replacing the last one.
        let mut base = config.effective_base_url().trim_end_matches('/').to_owned();
        base.push('/');
        let base_url = Url::parse(&base).map_err(|e| Error::UrlParse {
            context: "failed to parse base URL",
            source: e,
        })?;

        let join = |path, context| {
            base_url
                .join(path)
                .map_err(|e| Error::UrlParse { context, source: e })
        };
        let auth_url = join(AUTH_PATH, "failed to construct auth URL")?;
        let register_ipn_url = join(REGISTER_IPN_PATH, "failed to construct IPN URL")?;
        let submit_order_url = join(SUBMIT_ORDER_PATH, "failed to construct order URL")?;
        let transaction_status_url = join(TRANSACTION_STATUS_PATH, "failed to construct status URL")?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let timeout = config.timeout.unwrap_or(ClientConfig::DEFAULT_TIMEOUT);
        let client = config.http_client.unwrap_or_else(|| {
            reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("failed to build reqwest::Client")
        });

        Ok(Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            environment: config.environment,
            base_url,
            auth_url,
            register_ipn_url,
            submit_order_url,
            transaction_status_url,
            headers,
            client,
        })
    }

    /// Returns the environment this client targets.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// Returns the base URL used by this client.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the header set for an authenticated call: the fixed template
    /// plus `Authorization: Bearer <token>`, merged into a local copy.
    fn bearer_headers(&self, token: &str) -> Result<HeaderMap, Error> {
        let mut headers = self.headers.clone();
        let value =
            HeaderValue::from_str(&format!("Bearer {token}")).map_err(Error::InvalidToken)?;
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }

    /// Requests a bearer token from `POST /Auth/RequestToken`.
    ///
    /// The token is returned to the caller, not stored on the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the request cannot complete, or
    /// [`Error::MalformedResponse`] if a 200 body violates the contract.
    /// Gateway rejections come back as a `failed` [`Outcome`].
    pub async fn authenticate(&self) -> Result<Outcome<TokenData>, Error> {
        const CONTEXT: &str = "POST /Auth/RequestToken";
        let body = wire::AuthRequest {
            consumer_key: &self.consumer_key,
            consumer_secret: &self.consumer_secret,
        };
        tracing::debug!(url = %self.auth_url, "requesting auth token");
        let response = self
            .client
            .post(self.auth_url.clone())
            .headers(self.headers.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Http {
                context: CONTEXT,
                source: e,
            })?;

        let http_status = response.status();
        if http_status != StatusCode::OK {
            tracing::warn!(status = %http_status, "token request rejected at transport level");
            return Ok(Outcome::transport_failed(
                Status::Failed,
                http_status.as_u16(),
                GENERIC_FAILURE_MESSAGE.to_owned(),
            ));
        }

        let body: wire::AuthResponse = decode_json(response, CONTEXT).await?;
        if require(body.status, CONTEXT, "status")? == GATEWAY_OK {
            let token = require(body.token, CONTEXT, "token")?;
            let expiry = require(body.expiry_date, CONTEXT, "expiryDate")?;
            return Ok(Outcome::success(TokenData { token, expiry }));
        }
        let error = require(body.error, CONTEXT, "error")?;
        let message = gateway_error_message(&error, CONTEXT)?;
        tracing::warn!(%message, "gateway rejected credentials");
        Ok(Outcome::rejected(error, message))
    }

    /// Registers an IPN callback URL via `POST /URLSetup/RegisterIPN`.
    ///
    /// The gateway will POST payment notifications to `ipn_url`; the
    /// returned `ipn_id` must be attached to submitted orders.
    ///
    /// # Errors
    ///
    /// Same error surface as [`authenticate`](Self::authenticate), plus
    /// [`Error::InvalidToken`] for tokens that cannot form a header.
    pub async fn register_ipn(
        &self,
        token: &str,
        ipn_url: &str,
    ) -> Result<Outcome<IpnData>, Error> {
        const CONTEXT: &str = "POST /URLSetup/RegisterIPN";
        let headers = self.bearer_headers(token)?;
        let body = wire::RegisterIpnRequest {
            url: ipn_url,
            ipn_notification_type: IPN_NOTIFICATION_TYPE,
        };
        tracing::debug!(url = %self.register_ipn_url, ipn_url, "registering IPN URL");
        let response = self
            .client
            .post(self.register_ipn_url.clone())
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Http {
                context: CONTEXT,
                source: e,
            })?;

        let http_status = response.status();
        if http_status != StatusCode::OK {
            tracing::warn!(status = %http_status, "IPN registration rejected at transport level");
            return Ok(Outcome::transport_failed(
                Status::Failed,
                http_status.as_u16(),
                GENERIC_FAILURE_MESSAGE.to_owned(),
            ));
        }

        let body: wire::RegisterIpnResponse = decode_json(response, CONTEXT).await?;
        if require(body.status, CONTEXT, "status")? == GATEWAY_OK {
            let ipn_url = require(body.url, CONTEXT, "url")?;
            let ipn_id = require(body.ipn_id, CONTEXT, "ipn_id")?;
            return Ok(Outcome::success(IpnData { ipn_url, ipn_id }));
        }
        let error = require(body.error, CONTEXT, "error")?;
        let message = gateway_error_message(&error, CONTEXT)?;
        tracing::warn!(%message, "gateway rejected IPN registration");
        Ok(Outcome::rejected(error, message))
    }

    /// Submits a payment order via `POST /Transactions/SubmitOrderRequest`.
    ///
    /// On success the payload carries the gateway's tracking id, the echoed
    /// merchant reference, and the hosted payment page URL.
    ///
    /// # Errors
    ///
    /// Same error surface as [`register_ipn`](Self::register_ipn).
    pub async fn submit_order(
        &self,
        token: &str,
        order: &OrderRequest,
    ) -> Result<Outcome<OrderData>, Error> {
        const CONTEXT: &str = "POST /Transactions/SubmitOrderRequest";
        let headers = self.bearer_headers(token)?;
        tracing::debug!(url = %self.submit_order_url, merchant_reference = %order.id, "submitting order");
        let response = self
            .client
            .post(self.submit_order_url.clone())
            .headers(headers)
            .json(order)
            .send()
            .await
            .map_err(|e| Error::Http {
                context: CONTEXT,
                source: e,
            })?;

        let http_status = response.status();
        if http_status != StatusCode::OK {
            tracing::warn!(status = %http_status, "order submission rejected at transport level");
            return Ok(Outcome::transport_failed(
                Status::Failed,
                http_status.as_u16(),
                GENERIC_FAILURE_MESSAGE.to_owned(),
            ));
        }

        let body: wire::SubmitOrderResponse = decode_json(response, CONTEXT).await?;
        if require(body.status, CONTEXT, "status")? == GATEWAY_OK {
            let order_tracking_id = require(body.order_tracking_id, CONTEXT, "order_tracking_id")?;
            let merchant_reference = require(body.merchant_reference, CONTEXT, "merchant_reference")?;
            let redirect_url = require(body.redirect_url, CONTEXT, "redirect_url")?;
            return Ok(Outcome::success(OrderData {
                order_tracking_id,
                merchant_reference,
                redirect_url,
            }));
        }
        let error = require(body.error, CONTEXT, "error")?;
        let message = gateway_error_message(&error, CONTEXT)?;
        tracing::warn!(%message, "gateway rejected order");
        Ok(Outcome::rejected(error, message))
    }

    /// Queries a payment's state via `GET /Transactions/GetTransactionStatus`.
    ///
    /// Classification is four-way: a completed payment maps to `success`, an
    /// in-flight one to `pending`, any other payment description to `failed`,
    /// and a failed HTTP round trip to `unknown`. Identical gateway responses
    /// yield identical envelopes.
    ///
    /// # Errors
    ///
    /// Same error surface as [`register_ipn`](Self::register_ipn). Note the
    /// non-200 path never errors on a malformed body; it falls back to a
    /// generic message instead.
    pub async fn transaction_status(
        &self,
        token: &str,
        order_tracking_id: &str,
    ) -> Result<Outcome<()>, Error> {
        const CONTEXT: &str = "GET /Transactions/GetTransactionStatus";
        let headers = self.bearer_headers(token)?;
        tracing::debug!(url = %self.transaction_status_url, order_tracking_id, "querying transaction status");
        let response = self
            .client
            .get(self.transaction_status_url.clone())
            .query(&[(ORDER_TRACKING_ID_PARAM, order_tracking_id)])
            .headers(headers)
            .send()
            .await
            .map_err(|e| Error::Http {
                context: CONTEXT,
                source: e,
            })?;

        let http_status = response.status();
        if http_status != StatusCode::OK {
            // Some gateway errors bury their detail one decode deeper; both
            // stages are optional.
            let text = response.text().await.map_err(|e| Error::BodyRead {
                context: CONTEXT,
                source: e,
            })?;
            let message = nested_error_message(&text)
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_owned());
            tracing::warn!(status = %http_status, %message, "status query rejected at transport level");
            return Ok(Outcome::transport_failed(
                Status::Unknown,
                http_status.as_u16(),
                message,
            ));
        }

        let body: wire::TransactionStatusResponse = decode_json(response, CONTEXT).await?;
        if require(body.status, CONTEXT, "status")? != GATEWAY_OK {
            let error = require(body.error, CONTEXT, "error")?;
            let message = gateway_error_message(&error, CONTEXT)?;
            tracing::warn!(%message, "gateway rejected status query");
            return Ok(Outcome::rejected(error, message));
        }

        let description = require(body.payment_status_description, CONTEXT, "payment_status_description")?;
        let outcome = match description.as_str() {
            "Completed" => Outcome::payment_state(Status::Success, json!({}), "transaction successful"),
            "Pending" => Outcome::payment_state(Status::Pending, json!({}), "transaction pending"),
            _ => {
                let error = require(body.message, CONTEXT, "message")?;
                Outcome::payment_state(Status::Failed, error, "transaction failed")
            }
        };
        Ok(outcome)
    }
}

impl std::fmt::Debug for Pesapal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pesapal")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Reads and decodes a 200 response body, mapping both failure modes to the
/// client's error surface.
async fn decode_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    context: &'static str,
) -> Result<T, Error> {
    let bytes = response.bytes().await.map_err(|e| Error::BodyRead {
        context,
        source: e,
    })?;
    serde_json::from_slice(&bytes).map_err(|e| Error::malformed(context, e.to_string()))
}

/// Unwraps a contractually required field.
fn require<T>(field: Option<T>, context: &'static str, name: &'static str) -> Result<T, Error> {
    field.ok_or_else(|| Error::malformed(context, format!("missing `{name}` field")))
}

/// Pulls the human-readable message out of a gateway error object.
fn gateway_error_message(error: &Value, context: &'static str) -> Result<String, Error> {
    error
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| Error::malformed(context, "missing `error.message` field"))
}

/// Extracts `error.message` from a body whose `message` field is itself a
/// JSON-encoded document. `None` when either decode stage or any field is
/// absent.
fn nested_error_message(body: &str) -> Option<String> {
    let outer: Value = serde_json::from_str(body).ok()?;
    let inner: Value = serde_json::from_str(outer.get("message")?.as_str()?).ok()?;
    Some(inner.get("error")?.get("message")?.as_str()?.to_owned())
}
