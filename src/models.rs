//! Inputs for creating rows. Required columns are plain fields, so a record
//! cannot be built without them; optional columns default to absent.

use serde::Deserialize;
use time::PrimitiveDateTime;

use crate::entities::sea_orm_active_enums::{DonationStatus, FeedbackCategory};

#[derive(Clone, Debug, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub hashed_password: String,
    #[serde(default)]
    pub preferences: Option<serde_json::Value>,
}

impl NewUser {
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        hashed_password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            hashed_password: hashed_password.into(),
            preferences: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewGenre {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewGenre {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), description: None }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewMovie {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub release_date: Option<PrimitiveDateTime>,
    #[serde(default)]
    pub duration: Option<i32>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub trailer_url: Option<String>,
    #[serde(default)]
    pub is_hidden_gem: bool,
}

impl NewMovie {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Default::default() }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewRating {
    pub user_id: i32,
    pub movie_id: i32,
    pub rating: f64,
    #[serde(default)]
    pub review: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewWatch {
    pub user_id: i32,
    pub movie_id: i32,
    #[serde(default)]
    pub watch_duration: Option<i32>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewDonation {
    pub user_id: i32,
    pub amount: f64,
    /// Falls back to `USD`.
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub status: Option<DonationStatus>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewFeedback {
    pub user_id: i32,
    pub content: String,
    #[serde(default)]
    pub category: Option<FeedbackCategory>,
}

/// Row counts per table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub users: u64,
    pub genres: u64,
    pub movies: u64,
    pub movie_genres: u64,
    pub ratings: u64,
    pub watch_history: u64,
    pub donations: u64,
    pub feedback: u64,
}
