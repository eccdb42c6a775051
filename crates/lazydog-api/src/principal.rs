//! The `x-actor-id` extractor.
//!
//! Authentication happens upstream; whatever sits in front of this API is
//! trusted to set the header to the id of the authenticated actor.

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::error::ApiError;

pub const ACTOR_HEADER: &str = "x-actor-id";

/// The id of the actor performing the request.
#[derive(Debug, Clone, Copy)]
pub struct ActorId(pub Uuid);

impl<S> FromRequestParts<S> for ActorId
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
    let raw = parts
      .headers
      .get(ACTOR_HEADER)
      .ok_or(ApiError::Unauthenticated("missing x-actor-id header"))?;
    raw
      .to_str()
      .ok()
      .and_then(|s| Uuid::parse_str(s.trim()).ok())
      .map(ActorId)
      .ok_or(ApiError::Unauthenticated("malformed x-actor-id header"))
  }
}
