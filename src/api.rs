use async_trait::async_trait;
use std::sync::Arc;

use crate::engine::CreateRouteInput;
use crate::entities::RouteOutput;
use crate::error::Error;

#[async_trait]
pub trait RouteAPI {
    async fn create_route(&self, input: CreateRouteInput) -> Result<RouteOutput, Error>;
    async fn list_routes(&self) -> Result<Vec<RouteOutput>, Error>;
}

pub trait API: RouteAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
