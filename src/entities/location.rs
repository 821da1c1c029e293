use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Reads a coordinate out of an untyped payload. Only checks that the
    /// value is an object whose `lat` and `lng` are both numbers; ranges are
    /// not enforced.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let lat = object.get("lat")?.as_f64()?;
        let lng = object.get("lng")?.as_f64()?;

        Some(Self { lat, lng })
    }

    /// Reads a sequence of coordinates, failing if the payload is not an
    /// array or if any element is not a coordinate.
    pub fn many_from_value(value: &Value) -> Option<Vec<Self>> {
        value.as_array()?.iter().map(Self::from_value).collect()
    }
}

impl From<LatLng> for Value {
    fn from(latlng: LatLng) -> Self {
        serde_json::json!({ "lat": latlng.lat, "lng": latlng.lng })
    }
}

#[test]
fn from_value_accepts_numbers() {
    use serde_json::json;

    assert_eq!(
        LatLng::from_value(&json!({ "lat": 1, "lng": -2.5 })),
        Some(LatLng::new(1.0, -2.5))
    );
    // out of range is still a coordinate
    assert_eq!(
        LatLng::from_value(&json!({ "lat": 400, "lng": 0 })),
        Some(LatLng::new(400.0, 0.0))
    );
}

#[test]
fn from_value_rejects_malformed() {
    use serde_json::json;

    assert_eq!(LatLng::from_value(&json!(null)), None);
    assert_eq!(LatLng::from_value(&json!([1, 2])), None);
    assert_eq!(LatLng::from_value(&json!({ "lat": 1 })), None);
    assert_eq!(LatLng::from_value(&json!({ "lng": 1 })), None);
    assert_eq!(LatLng::from_value(&json!({ "lat": "1", "lng": 2 })), None);
    assert_eq!(LatLng::from_value(&json!({ "lat": 1, "lng": null })), None);
}

#[test]
fn many_from_value() {
    use serde_json::json;

    assert_eq!(LatLng::many_from_value(&json!([])), Some(vec![]));
    assert_eq!(
        LatLng::many_from_value(&json!([{ "lat": 1, "lng": 2 }, { "lat": 3, "lng": 4 }])),
        Some(vec![LatLng::new(1.0, 2.0), LatLng::new(3.0, 4.0)])
    );
    assert_eq!(LatLng::many_from_value(&json!({ "lat": 1, "lng": 2 })), None);
    assert_eq!(
        LatLng::many_from_value(&json!([{ "lat": 1, "lng": 2 }, { "lat": 3 }])),
        None
    );
}
