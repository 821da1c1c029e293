mod location;
mod route;

pub use location::LatLng;
pub use route::{Route, RouteOutput, RouteProps};
