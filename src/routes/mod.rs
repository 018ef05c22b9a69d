pub mod health;
pub mod wells;

pub use health::create_health_routes;
pub use wells::create_well_routes;
