use std::time::Duration;

pub const VERIFY_RECEIPT_PRODUCTION_URL: &str = "https://buy.itunes.apple.com/verifyReceipt";
pub const VERIFY_RECEIPT_SANDBOX_URL: &str = "https://sandbox.itunes.apple.com/verifyReceipt";

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// Environment variables read by `VerificationConfig::from_env`.
pub const SHARED_SECRET_ENV: &str = "APP_STORE_SHARED_SECRET";
pub const USE_SANDBOX_ENV: &str = "APP_STORE_USE_SANDBOX";
pub const SANDBOX_FALLBACK_ENV: &str = "APP_STORE_SANDBOX_FALLBACK";
