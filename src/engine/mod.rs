mod create_route;
mod list_all_routes;

pub use create_route::{CreateRoute, CreateRouteInput};
pub use list_all_routes::ListAllRoutes;

use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    api::{RouteAPI, API},
    db::RouteRepository,
    entities::RouteOutput,
    error::Error,
};

/// Serves the route use cases from a single shared repository.
pub struct Engine {
    create_route: CreateRoute,
    list_all_routes: ListAllRoutes,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(repo: Arc<dyn RouteRepository>) -> Self {
        Self {
            create_route: CreateRoute::new(repo.clone()),
            list_all_routes: ListAllRoutes::new(repo),
        }
    }
}

#[async_trait]
impl RouteAPI for Engine {
    async fn create_route(&self, input: CreateRouteInput) -> Result<RouteOutput, Error> {
        self.create_route.execute(input).await
    }

    async fn list_routes(&self) -> Result<Vec<RouteOutput>, Error> {
        self.list_all_routes.execute().await
    }
}

impl API for Engine {}

#[test]
fn engine_shares_one_repository() {
    use crate::db::InMemoryRouteStore;
    use crate::entities::LatLng;
    use tokio_test::block_on;

    let engine = Engine::new(Arc::new(InMemoryRouteStore::new()));

    let created = block_on(engine.create_route(CreateRouteInput {
        title: "shared".into(),
        start_position: LatLng::new(1.0, 2.0),
        end_position: LatLng::new(3.0, 4.0),
        points: None,
    }))
    .unwrap();

    let listed = block_on(engine.list_routes()).unwrap();
    assert_eq!(listed, vec![created]);
}
