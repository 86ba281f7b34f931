use sea_orm::{ConnectionTrait, QueryOrder, Set, entity::prelude::*};

use super::{donation, feedback, rating, watch_history};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub username: String,
    pub hashed_password: String,
    pub is_active: bool,
    /// Free-form user settings, `{}` until something is stored.
    pub preferences: Json,
    pub created_at: TimeDateTimeWithTimeZone,
    /// Null until the row is first updated.
    pub updated_at: Option<TimeDateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::rating::Entity")]
    Rating,
    #[sea_orm(has_many = "super::donation::Entity")]
    Donation,
    #[sea_orm(has_many = "super::feedback::Entity")]
    Feedback,
    #[sea_orm(has_many = "super::watch_history::Entity")]
    WatchHistory,
}

impl Related<rating::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rating.def()
    }
}

impl Related<donation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Donation.def()
    }
}

impl Related<feedback::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Feedback.def()
    }
}

impl Related<watch_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WatchHistory.def()
    }
}

impl Model {
    pub async fn ratings<C: ConnectionTrait>(&self, db: &C) -> Result<Vec<rating::Model>, DbErr> {
        self.find_related(rating::Entity).order_by_asc(rating::Column::Id).all(db).await
    }

    pub async fn donations<C: ConnectionTrait>(
        &self,
        db: &C,
    ) -> Result<Vec<donation::Model>, DbErr> {
        self.find_related(donation::Entity).order_by_asc(donation::Column::Id).all(db).await
    }

    pub async fn feedback<C: ConnectionTrait>(
        &self,
        db: &C,
    ) -> Result<Vec<feedback::Model>, DbErr> {
        self.find_related(feedback::Entity).order_by_asc(feedback::Column::Id).all(db).await
    }

    /// Most recent viewing first.
    pub async fn watch_history<C: ConnectionTrait>(
        &self,
        db: &C,
    ) -> Result<Vec<watch_history::Model>, DbErr> {
        self.find_related(watch_history::Entity)
            .order_by_desc(watch_history::Column::WatchedAt)
            .order_by_desc(watch_history::Column::Id)
            .all(db)
            .await
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            is_active: Set(true),
            preferences: Set(serde_json::json!({})),
            ..ActiveModelTrait::default()
        }
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert {
            self.created_at = super::stamp_if_unset(self.created_at);
        } else {
            self.updated_at = super::refresh_updated_at(&self.updated_at);
        }
        Ok(self)
    }
}
