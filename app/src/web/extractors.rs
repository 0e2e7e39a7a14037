// bistro/app/src/web/extractors.rs

use crate::errors::AppError;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use tracing::warn;
use uuid::Uuid;

pub const USER_ID_HEADER: &str = "X-User-ID";
pub const SESSION_ID_HEADER: &str = "X-Session-ID";

fn uuid_header(req: &HttpRequest, name: &str) -> Option<Uuid> {
  req
    .headers()
    .get(name)
    .and_then(|value| value.to_str().ok())
    .and_then(|value| Uuid::parse_str(value.trim()).ok())
}

/// The signed-in identity, as asserted by the identity service in front of
/// this one. Use `Option<AuthenticatedUser>` where signing in is optional.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
  pub user_id: Uuid,
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    match uuid_header(req, USER_ID_HEADER) {
      Some(user_id) => ready(Ok(AuthenticatedUser { user_id })),
      None => {
        warn!("AuthenticatedUser extractor: Missing or invalid {} header.", USER_ID_HEADER);
        ready(Err(AppError::Auth("Please sign in to view your account.".to_string())))
      }
    }
  }
}

/// The visitor session the cart and forms belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionId(pub Uuid);

impl FromRequest for SessionId {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    match uuid_header(req, SESSION_ID_HEADER) {
      Some(id) => ready(Ok(SessionId(id))),
      None => ready(Err(AppError::Validation(format!(
        "Missing or invalid {} header.",
        SESSION_ID_HEADER
      )))),
    }
  }
}
