use serde::Serialize;

/// JSON body POSTed to the verifyReceipt endpoint.
///
/// https://developer.apple.com/documentation/appstorereceipts/requestbody
#[derive(Debug, Serialize)]
pub(crate) struct RequestBodyModel<'a> {
    /// The Base64-encoded receipt data.
    #[serde(rename = "receipt-data")]
    pub(crate) receipt_data: &'a str,
    /// The app's shared secret. Only required for receipts containing
    /// auto-renewable subscriptions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) password: Option<&'a str>,
    /// Return only the latest renewal transaction for each subscription.
    #[serde(
        rename = "exclude-old-transactions",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub(crate) exclude_old_transactions: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_body() {
        let body = RequestBodyModel {
            receipt_data: "MIIT",
            password: None,
            exclude_old_transactions: false,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "receipt-data": "MIIT" })
        );
    }

    #[test]
    fn test_escapes_hostile_input() {
        let hostile = "ab\"c\\d\",\"password\":\"injected\u{2603}";
        let body = RequestBodyModel {
            receipt_data: hostile,
            password: Some("sec\"ret"),
            exclude_old_transactions: true,
        };
        let encoded = serde_json::to_string(&body).unwrap();
        let decoded: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(
            decoded,
            json!({
                "receipt-data": hostile,
                "password": "sec\"ret",
                "exclude-old-transactions": true,
            })
        );
    }
}
