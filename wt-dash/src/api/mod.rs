//! HTTP API handlers for wt-dash

pub mod health;
pub mod map;
pub mod scan;
pub mod summary;
pub mod ui;

pub use health::health_routes;
pub use map::map;
pub use scan::scan;
pub use summary::{reset_session, summary};
pub use ui::{app_js, index};
