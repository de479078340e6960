//! Caller identity taken from the `X-User-Id` header.
//!
//! The header is trusted: an upstream gateway authenticates the caller and
//! injects their numeric id. Handlers that need an identity take
//! [`RequesterId`] as an argument and never see the raw header.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload};

use crate::domain::{Error, UserId};

/// Header carrying the caller's user id.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Authenticated caller extracted from [`USER_ID_HEADER`].
///
/// Extraction fails with `401 unauthorized` when the header is missing, not
/// a positive integer, or not valid UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequesterId(pub UserId);

impl RequesterId {
    pub fn user_id(self) -> UserId {
        self.0
    }

    fn parse(req: &HttpRequest) -> Result<Self, Error> {
        let raw = req
            .headers()
            .get(USER_ID_HEADER)
            .ok_or_else(|| Error::unauthorized(format!("missing {USER_ID_HEADER} header")))?;
        let id = raw
            .to_str()
            .ok()
            .and_then(|value| value.trim().parse::<i64>().ok())
            .map(UserId::new)
            .filter(|id| id.is_assigned())
            .ok_or_else(|| Error::unauthorized(format!("malformed {USER_ID_HEADER} header")))?;
        Ok(Self(id))
    }
}

impl FromRequest for RequesterId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::parse(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    #[rstest]
    #[case("7", 7)]
    #[case(" 42 ", 42)]
    fn parses_positive_ids(#[case] header: &str, #[case] expected: i64) {
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, header))
            .to_http_request();
        let requester = RequesterId::parse(&req).expect("valid header");
        assert_eq!(requester.user_id(), UserId::new(expected));
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("0")]
    #[case("-3")]
    #[case("1.5")]
    fn rejects_malformed_ids(#[case] header: &str) {
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, header))
            .to_http_request();
        let err = RequesterId::parse(&req).expect_err("malformed header");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert!(err.message().contains("malformed"));
    }

    #[rstest]
    fn missing_header_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        let err = RequesterId::parse(&req).expect_err("missing header");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "missing X-User-Id header");
    }
}
