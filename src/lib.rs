//! Client for the Pesapal payment gateway REST API v3.
//!
//! Pesapal is a payment gateway serving East African markets. This crate
//! wraps its four-step API flow: obtain a bearer token, register an IPN
//! (Instant Payment Notification) callback URL, submit a payment order, and
//! poll the payment's status. Each operation is one HTTP round trip whose
//! heterogeneous JSON answer is normalized into a uniform
//! [`Outcome`](types::Outcome) envelope; gateway rejections are values, not
//! errors.
//!
//! The client holds no token state: `authenticate` returns the token to the
//! caller, who passes it into the other operations. Authenticated calls
//! merge the bearer token into a per-call header set, so a single client
//! can be shared across tasks.
//!
//! # Modules
//!
//! - [`client`] — the [`Pesapal`] client and its four operations
//! - [`config`] — environment selection (production/sandbox) and HTTP options
//! - [`constants`] — base URLs and endpoint paths
//! - [`error`] — transport and contract-violation errors
//! - [`types`] — the result envelope, operation payloads, and order types
//!
//! # Example
//!
//! ```no_run
//! use pesapal::{BillingAddress, OrderRequest, Pesapal};
//! use rust_decimal::Decimal;
//!
//! # async fn run() -> Result<(), pesapal::Error> {
//! let client = Pesapal::sandbox("consumer-key", "consumer-secret");
//!
//! let auth = client.authenticate().await?;
//! let token = auth.data.expect("token on success").token;
//!
//! let ipn = client
//!     .register_ipn(&token, "https://merchant.example/ipn")
//!     .await?;
//! let ipn_id = ipn.data.expect("ipn id on success").ipn_id;
//!
//! let order = OrderRequest::new(
//!     "TXN-001",
//!     Decimal::new(150_000, 2),
//!     "Invoice 001",
//!     "https://merchant.example/callback",
//!     ipn_id,
//!     BillingAddress {
//!         email_address: "jane@example.com".into(),
//!         phone_number: "0712345678".into(),
//!         country_code: "KE".into(),
//!         first_name: "Jane".into(),
//!         last_name: "Doe".into(),
//!     },
//! );
//! let submitted = client.submit_order(&token, &order).await?;
//!
//! if let Some(data) = submitted.data {
//!     let status = client
//!         .transaction_status(&token, &data.order_tracking_id)
//!         .await?;
//!     println!("payment is {}", status.status);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use client::Pesapal;
pub use config::{ClientConfig, Environment};
pub use error::Error;
pub use types::{
    BillingAddress, IpnData, OrderData, OrderRequest, Outcome, Status, TokenData,
};
