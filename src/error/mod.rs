mod constants;
mod db;

pub use constants::*;
pub use db::*;

use crate::service;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::{BufMut, Bytes, BytesMut};
use serde_json::json;

/// An error returned to the client as `{"error": {"code", "message"}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Error<'a> {
    status: StatusCode,
    code: &'static str,
    message: &'a str,
}

pub type Result<T = ()> = std::result::Result<T, Error<'static>>;

impl<'a> Error<'a> {
    #[inline]
    const fn new(status: StatusCode, code: &'static str, message: &'a str) -> Error<'a> {
        Self {
            status,
            code,
            message,
        }
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        self.code
    }

    #[inline]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    #[inline]
    pub const fn message(&self) -> &str {
        self.message
    }

    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(128).writer();

        let body = json!({
            "error": {
                "code": self.code(),
                "message": self.message(),
            }
        });

        if let Err(error) = serde_json::to_writer(&mut buf, &body) {
            error!("failed to serialize error: {error}");
        }

        buf.into_inner().freeze()
    }
}

impl IntoResponse for Error<'_> {
    #[inline]
    fn into_response(self) -> Response {
        let buf = self.to_bytes();
        let mut res = (self.status, buf).into_response();

        res.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(mime::APPLICATION_JSON.as_ref()),
        );

        res
    }
}

impl From<service::Error> for Error<'_> {
    fn from(error: service::Error) -> Self {
        use service::Error as E;

        let response = match &error {
            E::TeamAlreadyExists(_) => constants::TEAM_EXISTS,
            E::TeamNotFound(_) | E::UserNotFound(_) | E::PrNotFound(_) => constants::NOT_FOUND,
            E::PrAlreadyExists(_) => constants::PR_EXISTS,
            E::PrAlreadyMerged(_) => constants::PR_MERGED,
            E::ReviewerNotAssigned { .. } => constants::NOT_ASSIGNED,
            E::NoAvailableReviewers(_) => constants::NO_CANDIDATE,
            E::Internal(internal) => {
                error!("internal error: {internal:?}");
                return constants::INTERNAL;
            }
        };

        warn!(code = response.code(), "request rejected: {error}");

        response
    }
}

macro_rules! const_error {
    ($name:ident, $status:ident, $code:literal, $msg:literal) => {
        pub const $name: $crate::error::Error<'static> =
            $crate::error::Error::new(::axum::http::StatusCode::$status, $code, $msg);
    };
}

#[allow(clippy::useless_attribute)]
#[allow(clippy::needless_pub_self)]
pub(self) use const_error;
