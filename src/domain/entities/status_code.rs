//! Status codes returned in the `status` field of a verifyReceipt response.
//!
//! https://developer.apple.com/documentation/appstorereceipts/status

/// Sandbox receipt sent to the production endpoint.
pub const SANDBOX_RECEIPT_ON_PRODUCTION: i64 = 21007;
/// Production receipt sent to the sandbox endpoint.
pub const PRODUCTION_RECEIPT_ON_SANDBOX: i64 = 21008;

/// Human-readable message for a documented verifyReceipt error status.
///
/// Returns `None` for any code outside the table, including `0`.
pub const fn status_message(code: i64) -> Option<&'static str> {
    match code {
        21000 => Some("request not sent via HTTP POST"),
        21001 => Some("code no longer used by vendor"),
        21002 => Some("receipt-data malformed or missing"),
        21003 => Some("receipt failed authentication"),
        21004 => Some("shared secret mismatch"),
        21005 => Some("receipt server temporarily unavailable"),
        21006 => Some("receipt valid but subscription expired"),
        21007 => Some("sandbox receipt sent to production endpoint"),
        21008 => Some("production receipt sent to sandbox endpoint"),
        21009 => Some("internal data access error, retry later"),
        21010 => Some("account not found or deleted"),
        _ => None,
    }
}
