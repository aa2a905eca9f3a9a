//! `SeaORM` Entity for sheets table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use smartbudget_core::access::{Owned, ResourceKind};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "sheets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub description: String,
    pub creator_user_id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatorUserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Users,
    #[sea_orm(has_many = "super::accounts_payable::Entity")]
    AccountsPayable,
    #[sea_orm(has_many = "super::accounts_receivable::Entity")]
    AccountsReceivable,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::accounts_payable::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountsPayable.def()
    }
}

impl Related<super::accounts_receivable::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountsReceivable.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Owned for Model {
    const KIND: ResourceKind = ResourceKind::Sheet;

    fn owner_id(&self) -> i32 {
        self.creator_user_id
    }
}
