pub mod well_aggregates;

pub use well_aggregates::WellAggregatesDao;
