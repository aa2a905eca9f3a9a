//! `SeaORM` Entity for users table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use smartbudget_core::access::{Owned, ResourceKind};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email_validated: bool,
    pub email_validated_at: Option<DateTimeWithTimeZone>,
    pub recover_sent_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sheets::Entity")]
    Sheets,
}

impl Related<super::sheets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sheets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A user account belongs to itself.
impl Owned for Model {
    const KIND: ResourceKind = ResourceKind::User;

    fn owner_id(&self) -> i32 {
        self.id
    }
}
