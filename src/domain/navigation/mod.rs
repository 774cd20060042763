//! Navigation domain module

mod route;

pub use route::{Route, UnknownRouteError, ALL_ROUTES};
