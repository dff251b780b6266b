//! Endpoint constants for the Pesapal v3 API.

/// Base URL for the live gateway.
pub const PRODUCTION_BASE_URL: &str = "https://pay.pesapal.com/v3/api";

/// Base URL for the sandbox (demo) gateway.
pub const SANDBOX_BASE_URL: &str = "https://cybqa.pesapal.com/pesapalv3/api";

/// Token issuance endpoint (POST, no auth).
pub const AUTH_PATH: &str = "Auth/RequestToken";

/// IPN registration endpoint (POST, bearer auth).
pub const REGISTER_IPN_PATH: &str = "URLSetup/RegisterIPN";

/// Order submission endpoint (POST, bearer auth).
pub const SUBMIT_ORDER_PATH: &str = "Transactions/SubmitOrderRequest";

/// Transaction status endpoint (GET, bearer auth).
pub const TRANSACTION_STATUS_PATH: &str = "Transactions/GetTransactionStatus";

/// Query parameter carrying the gateway-assigned order id on status lookups.
pub const ORDER_TRACKING_ID_PARAM: &str = "orderTrackingId";

/// Currency applied to orders that do not specify one.
pub const DEFAULT_CURRENCY: &str = "KES";

/// The only IPN delivery mechanism this client registers.
pub const IPN_NOTIFICATION_TYPE: &str = "POST";

/// Gateway `status` field value that signals an accepted request.
pub const GATEWAY_OK: &str = "200";
