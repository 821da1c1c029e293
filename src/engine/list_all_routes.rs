use std::sync::Arc;

use crate::db::RouteRepository;
use crate::entities::RouteOutput;
use crate::error::Error;

pub struct ListAllRoutes {
    repo: Arc<dyn RouteRepository>,
}

impl ListAllRoutes {
    pub fn new(repo: Arc<dyn RouteRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(name = "ListAllRoutes::execute", skip_all)]
    pub async fn execute(&self) -> Result<Vec<RouteOutput>, Error> {
        let routes = self.repo.find_all().await?;

        Ok(routes.iter().map(|route| route.to_json()).collect())
    }
}

#[test]
fn list_all_routes_in_insertion_order() {
    use crate::db::InMemoryRouteStore;
    use crate::entities::{LatLng, Route, RouteProps};
    use tokio_test::block_on;

    let repo = Arc::new(InMemoryRouteStore::new());
    let new_route = |title: &str| {
        Arc::new(Route::new(
            RouteProps {
                title: title.into(),
                start_position: LatLng::new(1.0, 2.0),
                end_position: LatLng::new(3.0, 4.0),
                points: Some(vec![LatLng::new(2.0, 3.0)]),
            },
            None,
        ))
    };

    let a = new_route("A");
    let b = new_route("B");
    block_on(repo.insert(a.clone())).unwrap();
    block_on(repo.insert(b.clone())).unwrap();

    let list = ListAllRoutes::new(repo);
    let output = block_on(list.execute()).unwrap();

    assert_eq!(output, vec![a.to_json(), b.to_json()]);
}

#[test]
fn list_all_routes_empty() {
    use crate::db::InMemoryRouteStore;
    use tokio_test::block_on;

    let list = ListAllRoutes::new(Arc::new(InMemoryRouteStore::new()));

    assert!(block_on(list.execute()).unwrap().is_empty());
}
