//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{Region, User};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub phone_number: Option<String>,
    /// Secondary lookup key; NULL for users without one
    #[sea_orm(unique)]
    pub identity_number: Option<String>,
    pub region: String,
    pub amount: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            name: model.name,
            phone_number: model.phone_number,
            identity_number: model.identity_number,
            region: Region::from(model.region),
            amount: model.amount,
        }
    }
}
