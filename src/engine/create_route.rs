use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::RouteRepository;
use crate::entities::{LatLng, Route, RouteOutput, RouteProps};
use crate::error::Error;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRouteInput {
    pub title: String,
    pub start_position: LatLng,
    pub end_position: LatLng,
    #[serde(default)]
    pub points: Option<Vec<LatLng>>,
}

impl From<CreateRouteInput> for RouteProps {
    fn from(input: CreateRouteInput) -> Self {
        RouteProps {
            title: input.title,
            start_position: input.start_position,
            end_position: input.end_position,
            points: input.points,
        }
    }
}

pub struct CreateRoute {
    repo: Arc<dyn RouteRepository>,
}

impl CreateRoute {
    pub fn new(repo: Arc<dyn RouteRepository>) -> Self {
        Self { repo }
    }

    /// Builds a route with a fresh id, stores it and returns its snapshot.
    /// The output always carries `points`, empty when none were given.
    #[tracing::instrument(name = "CreateRoute::execute", skip_all, fields(title = %input.title))]
    pub async fn execute(&self, input: CreateRouteInput) -> Result<RouteOutput, Error> {
        let route = Arc::new(Route::new(input.into(), None));

        self.repo.insert(route.clone()).await?;
        tracing::info!(id = route.id(), "route created");

        Ok(route.to_json())
    }
}

#[test]
fn create_route() {
    use crate::db::InMemoryRouteStore;
    use serde_json::json;
    use tokio_test::block_on;

    let repo = Arc::new(InMemoryRouteStore::new());
    let create = CreateRoute::new(repo.clone());

    let output = block_on(create.execute(CreateRouteInput {
        title: "T".into(),
        start_position: LatLng::new(1.0, 2.0),
        end_position: LatLng::new(3.0, 4.0),
        points: None,
    }))
    .unwrap();

    let stored = block_on(repo.find_all()).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(output.id, stored[0].id());
    assert_eq!(
        serde_json::to_value(&output).unwrap(),
        json!({
            "id": stored[0].id(),
            "title": "T",
            "startPosition": { "lat": 1.0, "lng": 2.0 },
            "endPosition": { "lat": 3.0, "lng": 4.0 },
            "points": [],
        })
    );
}

#[test]
fn create_route_keeps_points() {
    use crate::db::InMemoryRouteStore;
    use tokio_test::block_on;

    let repo = Arc::new(InMemoryRouteStore::new());
    let create = CreateRoute::new(repo);

    let points = vec![LatLng::new(1.5, 2.5), LatLng::new(2.0, 3.0)];
    let output = block_on(create.execute(CreateRouteInput {
        title: "with points".into(),
        start_position: LatLng::new(1.0, 2.0),
        end_position: LatLng::new(3.0, 4.0),
        points: Some(points.clone()),
    }))
    .unwrap();

    assert_eq!(output.points, points);
}

#[test]
fn create_route_accepts_empty_title() {
    use crate::db::InMemoryRouteStore;
    use tokio_test::block_on;

    let create = CreateRoute::new(Arc::new(InMemoryRouteStore::new()));

    let output = block_on(create.execute(CreateRouteInput {
        title: "".into(),
        start_position: LatLng::new(0.0, 0.0),
        end_position: LatLng::new(0.0, 0.0),
        points: None,
    }))
    .unwrap();

    assert_eq!(output.title, "");
}

#[test]
fn create_route_propagates_repository_errors() {
    use crate::error::config_error;
    use async_trait::async_trait;
    use tokio_test::block_on;

    struct FailingStore;

    #[async_trait]
    impl RouteRepository for FailingStore {
        async fn insert(&self, _: Arc<Route>) -> Result<(), Error> {
            Err(config_error("store offline"))
        }

        async fn find_all(&self) -> Result<Vec<Arc<Route>>, Error> {
            Ok(vec![])
        }
    }

    let create = CreateRoute::new(Arc::new(FailingStore));
    let err = block_on(create.execute(CreateRouteInput {
        title: "T".into(),
        start_position: LatLng::new(1.0, 2.0),
        end_position: LatLng::new(3.0, 4.0),
        points: None,
    }))
    .unwrap_err();

    assert_eq!(err.code, 6);
}
