use sea_orm::{ConnectionTrait, entity::prelude::*};

use super::{movie, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ratings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub movie_id: i32,
    /// Score as submitted. Bounds are the caller's business.
    pub rating: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub review: Option<String>,
    pub created_at: TimeDateTimeWithTimeZone,
    pub updated_at: Option<TimeDateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::movie::Entity",
        from = "Column::MovieId",
        to = "super::movie::Column::Id",
        on_delete = "Cascade"
    )]
    Movie,
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<movie::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movie.def()
    }
}

impl Model {
    pub async fn user<C: ConnectionTrait>(&self, db: &C) -> Result<Option<user::Model>, DbErr> {
        self.find_related(user::Entity).one(db).await
    }

    pub async fn movie<C: ConnectionTrait>(&self, db: &C) -> Result<Option<movie::Model>, DbErr> {
        self.find_related(movie::Entity).one(db).await
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
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
