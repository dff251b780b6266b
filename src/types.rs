//! Result envelope and wire types for the Pesapal v3 API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::DEFAULT_CURRENCY;

/// Outcome tag carried by every result envelope.
///
/// Serialized lowercase, matching the gateway-facing vocabulary
/// (`"success"`, `"pending"`, `"failed"`, `"unknown"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The operation (or payment) completed.
    Success,
    /// The payment is still in flight (status lookups only).
    Pending,
    /// The gateway rejected the request, or the payment failed.
    Failed,
    /// The gateway's answer could not be classified (status lookups whose
    /// transport round trip failed).
    Unknown,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Success => "success",
            Self::Pending => "pending",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// The uniform result envelope returned by every operation.
///
/// `status` is always present. `data` carries the operation payload on
/// success; `error` and `message` are present on non-success (the status
/// lookup also fills them on success, per the gateway's convention).
/// The `error` value is the gateway's structured error object passed
/// through verbatim, or a synthesized string for transport failures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome<T> {
    /// Outcome tag.
    pub status: Status,

    /// Operation payload, present on success. A `None` flattens to no
    /// fields.
    #[serde(flatten)]
    pub data: Option<T>,

    /// Gateway error object (verbatim) or synthesized error string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,

    /// Human-readable message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Outcome<T> {
    /// True if `status` is [`Status::Success`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    pub(crate) fn success(data: T) -> Self {
        Self {
            status: Status::Success,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    pub(crate) fn rejected(error: Value, message: String) -> Self {
        Self {
            status: Status::Failed,
            data: None,
            error: Some(error),
            message: Some(message),
        }
    }

    /// Envelope for an HTTP round trip that did not come back 200.
    pub(crate) fn transport_failed(status: Status, http_status: u16, message: String) -> Self {
        Self {
            status,
            data: None,
            error: Some(Value::String(format!("invalid HTTP status {http_status}"))),
            message: Some(message),
        }
    }

    /// Envelope for a settled payment state reported by the status lookup.
    pub(crate) fn payment_state(status: Status, error: Value, message: &str) -> Self {
        Self {
            status,
            data: None,
            error: Some(error),
            message: Some(message.to_owned()),
        }
    }
}

/// Payload of a successful [`authenticate`](crate::Pesapal::authenticate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenData {
    /// Short-lived bearer token for the other operations.
    pub token: String,
    /// Gateway-supplied expiry timestamp, passed through verbatim.
    pub expiry: String,
}

/// Payload of a successful [`register_ipn`](crate::Pesapal::register_ipn).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IpnData {
    /// The callback URL as echoed by the gateway.
    pub ipn_url: String,
    /// Gateway-assigned notification id, required when submitting orders.
    pub ipn_id: String,
}

/// Payload of a successful [`submit_order`](crate::Pesapal::submit_order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderData {
    /// Gateway-assigned identifier, used to query payment status.
    pub order_tracking_id: String,
    /// The caller-supplied transaction id, echoed back.
    pub merchant_reference: String,
    /// Hosted payment page to redirect the customer to.
    pub redirect_url: String,
}

/// Customer identity and contact details attached to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillingAddress {
    /// Customer email address.
    pub email_address: String,
    /// Customer phone number.
    pub phone_number: String,
    /// ISO country code (e.g. `"KE"`).
    pub country_code: String,
    /// Customer first name.
    pub first_name: String,
    /// Customer last name.
    pub last_name: String,
}

/// A payment order to submit to the gateway.
///
/// # Example
///
/// ```
/// use pesapal::{BillingAddress, OrderRequest};
/// use rust_decimal::Decimal;
///
/// let order = OrderRequest::new(
///     "TXN-001",
///     Decimal::new(150000, 2), // 1500.00
///     "Invoice 001",
///     "https://merchant.example/callback",
///     "ipn-id-from-registration",
///     BillingAddress {
///         email_address: "jane@example.com".into(),
///         phone_number: "0712345678".into(),
///         country_code: "KE".into(),
///         first_name: "Jane".into(),
///         last_name: "Doe".into(),
///     },
/// )
/// .with_currency("UGX");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    /// Merchant reference: caller-assigned transaction id.
    pub id: String,
    /// ISO currency code. Defaults to `"KES"`.
    pub currency: String,
    /// Amount to charge, serialized as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Human-readable description shown to the customer.
    pub description: String,
    /// Where the gateway redirects the customer after payment.
    pub callback_url: String,
    /// IPN id obtained from [`register_ipn`](crate::Pesapal::register_ipn).
    pub notification_id: String,
    /// Customer details.
    pub billing_address: BillingAddress,
}

impl OrderRequest {
    /// Creates an order with the default currency.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        amount: Decimal,
        description: impl Into<String>,
        callback_url: impl Into<String>,
        notification_id: impl Into<String>,
        billing_address: BillingAddress,
    ) -> Self {
        Self {
            id: id.into(),
            currency: DEFAULT_CURRENCY.to_owned(),
            amount,
            description: description.into(),
            callback_url: callback_url.into(),
            notification_id: notification_id.into(),
            billing_address,
        }
    }

    /// Sets the currency.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}

/// Raw gateway response shapes. All fields are optional so that contract
/// violations are detected explicitly instead of failing deserialization.
pub(crate) mod wire {
    use serde::{Deserialize, Serialize};
    use serde_json::Value;

    #[derive(Debug, Serialize)]
    pub struct AuthRequest<'a> {
        pub consumer_key: &'a str,
        pub consumer_secret: &'a str,
    }

    #[derive(Debug, Serialize)]
    pub struct RegisterIpnRequest<'a> {
        pub url: &'a str,
        pub ipn_notification_type: &'a str,
    }

    #[derive(Debug, Deserialize)]
    pub struct AuthResponse {
        pub status: Option<String>,
        pub token: Option<String>,
        #[serde(rename = "expiryDate")]
        pub expiry_date: Option<String>,
        pub error: Option<Value>,
    }

    #[derive(Debug, Deserialize)]
    pub struct RegisterIpnResponse {
        pub status: Option<String>,
        pub url: Option<String>,
        pub ipn_id: Option<String>,
        pub error: Option<Value>,
    }

    #[derive(Debug, Deserialize)]
    pub struct SubmitOrderResponse {
        pub status: Option<String>,
        pub order_tracking_id: Option<String>,
        pub merchant_reference: Option<String>,
        pub redirect_url: Option<String>,
        pub error: Option<Value>,
    }

    #[derive(Debug, Deserialize)]
    pub struct TransactionStatusResponse {
        pub status: Option<String>,
        pub payment_status_description: Option<String>,
        pub message: Option<Value>,
        pub error: Option<Value>,
    }
}
