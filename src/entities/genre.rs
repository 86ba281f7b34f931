use sea_orm::{ConnectionTrait, QueryOrder, entity::prelude::*};

use super::{movie, movie_genre};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "genres")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::movie_genre::Entity")]
    MovieGenre,
}

impl Related<movie_genre::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovieGenre.def()
    }
}

impl Related<movie::Entity> for Entity {
    fn to() -> RelationDef {
        movie_genre::Relation::Movie.def()
    }

    fn via() -> Option<RelationDef> {
        Some(movie_genre::Relation::Genre.def().rev())
    }
}

impl Model {
    pub async fn movies<C: ConnectionTrait>(&self, db: &C) -> Result<Vec<movie::Model>, DbErr> {
        self.find_related(movie::Entity).order_by_asc(movie::Column::Title).all(db).await
    }
}

impl ActiveModelBehavior for ActiveModel {}
