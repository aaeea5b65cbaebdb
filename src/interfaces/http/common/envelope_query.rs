//! Query-string extractor that keeps the envelope contract
//!
//! `EnvelopeQuery<T>` wraps `axum::extract::Query<T>`; a malformed query
//! string becomes an `ERROR` envelope instead of a 400.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;

use super::ApiResponse;

pub struct EnvelopeQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for EnvelopeQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(EnvelopeQuery(value)),
            Err(rejection) => Err(ApiResponse::<()>::error(format!(
                "Invalid query string: {}",
                rejection.body_text()
            ))
            .into_response()),
        }
    }
}
