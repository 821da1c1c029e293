use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::entities::Route;
use crate::error::Error;

/// Storage the route use cases depend on.
///
/// Operations are async even when a backend completes immediately, so a
/// durable store can replace the in-memory one without touching callers.
#[async_trait]
pub trait RouteRepository: Send + Sync {
    /// Stores a route. Duplicate ids are left to the backend.
    async fn insert(&self, route: Arc<Route>) -> Result<(), Error>;

    /// Every stored route, in insertion order.
    async fn find_all(&self) -> Result<Vec<Arc<Route>>, Error>;
}

/// Process-lifetime store backed by a single ordered list.
#[derive(Default)]
pub struct InMemoryRouteStore {
    items: RwLock<Vec<Arc<Route>>>,
}

impl InMemoryRouteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl RouteRepository for InMemoryRouteStore {
    #[tracing::instrument(skip_all, fields(id = %route.id()))]
    async fn insert(&self, route: Arc<Route>) -> Result<(), Error> {
        self.items.write().await.push(route);

        Ok(())
    }

    #[tracing::instrument(skip_all)]
    async fn find_all(&self) -> Result<Vec<Arc<Route>>, Error> {
        let items = self.items.read().await;
        tracing::debug!(count = items.len(), "loaded routes");

        Ok(items.clone())
    }
}

#[cfg(test)]
fn route(title: &str) -> Arc<Route> {
    use crate::entities::{LatLng, RouteProps};

    Arc::new(Route::new(
        RouteProps {
            title: title.into(),
            start_position: LatLng::new(3.0, 6.0),
            end_position: LatLng::new(6.0, 7.0),
            points: None,
        },
        None,
    ))
}

#[test]
fn insert_then_find_all() {
    use tokio_test::block_on;

    let store = InMemoryRouteStore::new();
    let r = route("my route");

    block_on(store.insert(r.clone())).unwrap();

    let found = block_on(store.find_all()).unwrap();
    assert_eq!(found.len(), 1);
    assert!(Arc::ptr_eq(&found[0], &r));
}

#[test]
fn find_all_keeps_insertion_order() {
    use tokio_test::block_on;

    let store = InMemoryRouteStore::new();
    assert!(block_on(store.is_empty()));

    let routes: Vec<_> = ["a", "b", "c"].iter().map(|t| route(t)).collect();
    for r in routes.iter() {
        block_on(store.insert(r.clone())).unwrap();
    }

    let found = block_on(store.find_all()).unwrap();
    let titles: Vec<_> = found.iter().map(|r| r.title()).collect();
    assert_eq!(titles, vec!["a", "b", "c"]);
}

#[test]
fn duplicate_ids_are_appended() {
    use tokio_test::block_on;

    let store = InMemoryRouteStore::new();
    let r = route("dup");

    block_on(store.insert(r.clone())).unwrap();
    block_on(store.insert(r.clone())).unwrap();

    assert_eq!(block_on(store.len()), 2);
}

#[test]
fn concurrent_inserts_are_all_kept() {
    use futures::future::join_all;
    use std::collections::HashSet;
    use tokio_test::block_on;

    let store = InMemoryRouteStore::new();
    let routes: Vec<_> = (0..32).map(|i| route(&i.to_string())).collect();

    let results = block_on(join_all(routes.iter().map(|r| store.insert(r.clone()))));
    assert!(results.iter().all(Result::is_ok));

    let found = block_on(store.find_all()).unwrap();
    let ids: HashSet<_> = found.iter().map(|r| r.id().to_string()).collect();
    assert_eq!(found.len(), 32);
    assert_eq!(ids.len(), 32);
}
