use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::entities::LatLng;
use crate::error::{empty_title_error, invalid_coordinates_error, invalid_points_error, Error};

/// Fields supplied when a route is built. Nothing here is validated.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteProps {
    pub title: String,
    pub start_position: LatLng,
    pub end_position: LatLng,
    #[serde(default)]
    pub points: Option<Vec<LatLng>>,
}

/// Plain snapshot of a route as handed to callers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteOutput {
    pub id: String,
    pub title: String,
    pub start_position: LatLng,
    pub end_position: LatLng,
    pub points: Vec<LatLng>,
}

/// A named path between two coordinates with optional waypoints.
///
/// Fields are readable through accessors but only change through the
/// `update_*` operations. Construction performs no validation at all, so a
/// route may exist with an empty title; only the updates check their input.
#[derive(Clone, Debug)]
pub struct Route {
    id: String,
    title: String,
    start_position: LatLng,
    end_position: LatLng,
    points: Vec<LatLng>,
}

impl Route {
    /// Builds a route, generating a UUID v4 when `id` is absent or empty.
    pub fn new(props: RouteProps, id: Option<String>) -> Self {
        let id = match id {
            Some(id) if !id.is_empty() => id,
            _ => Uuid::new_v4().to_string(),
        };

        Route {
            id,
            title: props.title,
            start_position: props.start_position,
            end_position: props.end_position,
            points: props.points.unwrap_or_default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start_position(&self) -> &LatLng {
        &self.start_position
    }

    pub fn end_position(&self) -> &LatLng {
        &self.end_position
    }

    pub fn points(&self) -> &[LatLng] {
        &self.points
    }

    #[tracing::instrument(skip(self), fields(id = %self.id))]
    pub fn update_title(&mut self, title: &str) -> Result<(), Error> {
        if title.is_empty() {
            return Err(empty_title_error());
        }

        self.title = title.into();
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(id = %self.id))]
    pub fn update_position(&mut self, start_position: &Value, end_position: &Value) -> Result<(), Error> {
        let start = LatLng::from_value(start_position);
        let end = LatLng::from_value(end_position);

        match (start, end) {
            (Some(start), Some(end)) => {
                self.start_position = start;
                self.end_position = end;
                Ok(())
            }
            _ => Err(invalid_coordinates_error()),
        }
    }

    /// Replaces the waypoints wholesale.
    #[tracing::instrument(skip(self), fields(id = %self.id))]
    pub fn update_points(&mut self, points: &Value) -> Result<(), Error> {
        let points = LatLng::many_from_value(points).ok_or_else(invalid_points_error)?;

        self.points = points;
        Ok(())
    }

    pub fn to_json(&self) -> RouteOutput {
        RouteOutput {
            id: self.id.clone(),
            title: self.title.clone(),
            start_position: self.start_position,
            end_position: self.end_position,
            points: self.points.clone(),
        }
    }
}

#[cfg(test)]
fn props(title: &str) -> RouteProps {
    RouteProps {
        title: title.into(),
        start_position: LatLng::new(1.0, 2.0),
        end_position: LatLng::new(3.0, 4.0),
        points: None,
    }
}

#[test]
fn new_route_generates_distinct_ids() {
    let a = Route::new(props("a"), None);
    let b = Route::new(props("b"), None);

    assert!(!a.id().is_empty());
    assert!(Uuid::parse_str(a.id()).is_ok());
    assert_ne!(a.id(), b.id());
}

#[test]
fn new_route_keeps_explicit_id() {
    let route = Route::new(props("a"), Some("route-1".into()));
    assert_eq!(route.id(), "route-1");

    let route = Route::new(props("a"), Some("".into()));
    assert!(Uuid::parse_str(route.id()).is_ok());
}

#[test]
fn new_route_defaults_points() {
    use serde_json::json;

    let route = Route::new(props("T"), Some("r".into()));

    assert!(route.points().is_empty());
    assert_eq!(
        serde_json::to_value(route.to_json()).unwrap(),
        json!({
            "id": "r",
            "title": "T",
            "startPosition": { "lat": 1.0, "lng": 2.0 },
            "endPosition": { "lat": 3.0, "lng": 4.0 },
            "points": [],
        })
    );
}

#[test]
fn new_route_skips_validation() {
    let route = Route::new(props(""), None);
    assert_eq!(route.title(), "");
}

#[test]
fn update_title() {
    let mut route = Route::new(props("old"), None);

    route.update_title("new").unwrap();
    assert_eq!(route.title(), "new");

    let err = route.update_title("").unwrap_err();
    assert_eq!(err, empty_title_error());
    assert!(err.is_validation());
    assert_eq!(route.title(), "new");
}

#[test]
fn update_position() {
    use serde_json::json;

    let mut route = Route::new(props("T"), None);

    route
        .update_position(&LatLng::new(5.0, 6.0).into(), &json!({ "lat": 7, "lng": 8 }))
        .unwrap();
    assert_eq!(route.start_position(), &LatLng::new(5.0, 6.0));
    assert_eq!(route.end_position(), &LatLng::new(7.0, 8.0));

    let invalid = [
        json!({ "lat": 1 }),
        json!({ "lng": 1 }),
        json!({ "lat": "1", "lng": 1 }),
        json!(null),
    ];
    for end in invalid.iter() {
        let err = route
            .update_position(&json!({ "lat": 9, "lng": 9 }), end)
            .unwrap_err();
        assert_eq!(err, invalid_coordinates_error());
    }

    assert_eq!(route.start_position(), &LatLng::new(5.0, 6.0));
    assert_eq!(route.end_position(), &LatLng::new(7.0, 8.0));
}

#[test]
fn update_points() {
    use serde_json::json;

    let mut route = Route::new(props("T"), None);

    route
        .update_points(&json!([{ "lat": 1, "lng": 1 }, { "lat": 2, "lng": 2 }]))
        .unwrap();
    assert_eq!(route.points(), &[LatLng::new(1.0, 1.0), LatLng::new(2.0, 2.0)]);

    route.update_points(&json!([{ "lat": 3, "lng": 3 }])).unwrap();
    assert_eq!(route.points(), &[LatLng::new(3.0, 3.0)]);

    let err = route.update_points(&json!({ "lat": 1, "lng": 1 })).unwrap_err();
    assert_eq!(err, invalid_points_error());

    let err = route
        .update_points(&json!([{ "lat": 4, "lng": 4 }, { "lat": 5 }]))
        .unwrap_err();
    assert_eq!(err, invalid_points_error());

    assert_eq!(route.points(), &[LatLng::new(3.0, 3.0)]);
}

#[test]
fn to_json_is_a_stable_copy() {
    let mut route = Route::new(props("T"), None);

    let first = route.to_json();
    assert_eq!(first, route.to_json());

    route.update_title("changed").unwrap();
    assert_eq!(first.title, "T");
    assert_eq!(route.to_json().title, "changed");
}
