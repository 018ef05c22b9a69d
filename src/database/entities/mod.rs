pub mod well_aggregates;

pub use well_aggregates::Entity as WellAggregates;
pub use well_aggregates::NewWellAggregate;

// Type aliases
pub type WellAggregate = well_aggregates::Model;
