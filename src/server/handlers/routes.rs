use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Json};
use axum::http::StatusCode;

use crate::api::DynAPI;
use crate::engine::CreateRouteInput;
use crate::entities::RouteOutput;
use crate::error::{invalid_input_error, Error};

pub async fn create(
    Extension(api): Extension<DynAPI>,
    params: Result<Json<CreateRouteInput>, JsonRejection>,
) -> Result<(StatusCode, Json<RouteOutput>), Error> {
    let Json(params) = params.map_err(|rejection| {
        tracing::debug!(%rejection, "rejected route body");
        invalid_input_error()
    })?;

    let route = api.create_route(params).await?;

    Ok((StatusCode::CREATED, route.into()))
}

pub async fn list(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<RouteOutput>>, Error> {
    let routes = api.list_routes().await?;

    Ok(routes.into())
}
