//! `SeaORM` Entity for accounts_payable table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use smartbudget_core::access::{Owned, ResourceKind};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts_payable")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((14, 4)))")]
    pub value: Decimal,
    pub creator_user_id: i32,
    pub sheet_id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sheets::Entity",
        from = "Column::SheetId",
        to = "super::sheets::Column::Id",
        on_delete = "Cascade"
    )]
    Sheets,
}

impl Related<super::sheets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sheets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Owned for Model {
    const KIND: ResourceKind = ResourceKind::AccountPayable;

    fn owner_id(&self) -> i32 {
        self.creator_user_id
    }
}
