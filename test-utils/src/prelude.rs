pub use crate::{
    assert_error, enable_logging, request::*, response::*, reviewers, setup_database, uuid, App,
};
pub use assert_json_diff::{assert_json_eq, assert_json_include};
pub use http::StatusCode;
pub use reviewer_service::error;
pub use serde_json::{json, Value};
