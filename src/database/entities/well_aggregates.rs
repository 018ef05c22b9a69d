use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-well production totals produced by a loader run
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "well_aggregates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub well_identifier: String,
    pub oil_total: f64,
    pub gas_total: f64,
    pub brine_total: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// An aggregate that has not been written yet; storage assigns the id
#[derive(Clone, Debug, PartialEq)]
pub struct NewWellAggregate {
    pub well_identifier: String,
    pub oil_total: f64,
    pub gas_total: f64,
    pub brine_total: f64,
}

impl NewWellAggregate {
    pub(crate) fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            well_identifier: sea_orm::ActiveValue::Set(self.well_identifier),
            oil_total: sea_orm::ActiveValue::Set(self.oil_total),
            gas_total: sea_orm::ActiveValue::Set(self.gas_total),
            brine_total: sea_orm::ActiveValue::Set(self.brine_total),
        }
    }
}
