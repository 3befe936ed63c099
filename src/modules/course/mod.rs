pub mod controller;
pub mod model;
pub mod router;
pub mod service;

pub use model::*;
pub use router::bind_course_routes;
