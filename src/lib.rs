pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod app_store_notification_datasource;
        pub(crate) mod http_transport;
        pub(crate) mod verify_receipt_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod app_store_server_notifications_v1 {
            pub(crate) mod notification_payload_model;
        }
        pub(crate) mod verify_receipt {
            pub(crate) mod common;
            pub(crate) mod request_body_model;
            pub(crate) mod response_body_model;
            pub(crate) mod transaction_record_model;
        }
    }
    pub(crate) mod repositories {
        pub(crate) mod notification_repository_impl;
        pub(crate) mod receipt_repository_impl;
    }
}

pub mod domain {
    pub mod entities {
        pub mod entitlement_set;
        pub mod environment;
        pub mod server_notification;
        pub mod status_code;
        pub mod transaction_record;
        pub mod verification_config;
    }
    pub mod repositories {
        pub mod notification_repository;
        pub mod receipt_repository;
    }
}

pub mod constants;
pub mod errors;
pub mod util;

pub use data::datasources::http_transport::{HttpTransport, ReqwestTransport};
