use crate::{error, Error};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Query string extractor that validates its target and answers with the
/// service's JSON error body instead of axum's plain-text rejection.
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Query(query) = axum::extract::Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                debug!("rejected query: {rejection}");
                error::QUERY_INVALID
            })?;

        query.validate().map_err(|errors| {
            debug!("invalid query: {errors}");
            error::QUERY_INVALID
        })?;

        Ok(ValidatedQuery(query))
    }
}
