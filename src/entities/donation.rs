use sea_orm::{ConnectionTrait, Set, entity::prelude::*};

use super::{sea_orm_active_enums::DonationStatus, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "donations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub amount: f64,
    pub currency: String,
    /// Payment provider reference. Unique when present; absent values never collide.
    #[sea_orm(unique, nullable)]
    pub transaction_id: Option<String>,
    pub status: Option<DonationStatus>,
    pub created_at: TimeDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Restrict"
    )]
    User,
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Model {
    pub async fn user<C: ConnectionTrait>(&self, db: &C) -> Result<Option<user::Model>, DbErr> {
        self.find_related(user::Entity).one(db).await
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self { currency: Set("USD".to_string()), ..ActiveModelTrait::default() }
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert {
            self.created_at = super::stamp_if_unset(self.created_at);
        }
        Ok(self)
    }
}
