use sea_orm::{ConnectionTrait, QueryOrder, Set, entity::prelude::*};

use super::{genre, movie_genre, rating, watch_history};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub release_date: Option<TimeDateTime>,
    /// Running time in minutes.
    pub duration: Option<i32>,
    /// Maintained by whoever writes ratings; nothing here recomputes it.
    pub average_rating: f64,
    pub rating_count: i32,
    pub image_url: Option<String>,
    pub trailer_url: Option<String>,
    pub is_hidden_gem: bool,
    pub created_at: TimeDateTimeWithTimeZone,
    pub updated_at: Option<TimeDateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::rating::Entity")]
    Rating,
    #[sea_orm(has_many = "super::watch_history::Entity")]
    WatchHistory,
    #[sea_orm(has_many = "super::movie_genre::Entity")]
    MovieGenre,
}

impl Related<rating::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rating.def()
    }
}

impl Related<watch_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WatchHistory.def()
    }
}

impl Related<movie_genre::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovieGenre.def()
    }
}

impl Related<genre::Entity> for Entity {
    fn to() -> RelationDef {
        movie_genre::Relation::Genre.def()
    }

    fn via() -> Option<RelationDef> {
        Some(movie_genre::Relation::Movie.def().rev())
    }
}

impl Model {
    pub async fn genres<C: ConnectionTrait>(&self, db: &C) -> Result<Vec<genre::Model>, DbErr> {
        self.find_related(genre::Entity).order_by_asc(genre::Column::Name).all(db).await
    }

    pub async fn ratings<C: ConnectionTrait>(&self, db: &C) -> Result<Vec<rating::Model>, DbErr> {
        self.find_related(rating::Entity).order_by_asc(rating::Column::Id).all(db).await
    }

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
            average_rating: Set(0.0),
            rating_count: Set(0),
            is_hidden_gem: Set(false),
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
