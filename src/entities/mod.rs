//! sea-orm entities, one per table. Relations are declared on both sides so
//! navigation works from either end.

pub mod donation;
pub mod feedback;
pub mod genre;
pub mod movie;
pub mod movie_genre;
pub mod rating;
pub mod sea_orm_active_enums;
pub mod user;
pub mod watch_history;

use sea_orm::{ActiveValue, Set};
use time::OffsetDateTime;

/// Stamp for a column filled in at insert time, unless the caller set one.
pub(crate) fn stamp_if_unset(
    value: ActiveValue<OffsetDateTime>,
) -> ActiveValue<OffsetDateTime> {
    match value {
        ActiveValue::NotSet => Set(OffsetDateTime::now_utc()),
        other => other,
    }
}

/// Next `updated_at` value. Never earlier than the one already stored.
pub(crate) fn refresh_updated_at(
    current: &ActiveValue<Option<OffsetDateTime>>,
) -> ActiveValue<Option<OffsetDateTime>> {
    let previous = match current {
        ActiveValue::Set(value) | ActiveValue::Unchanged(value) => *value,
        ActiveValue::NotSet => None,
    };
    let now = OffsetDateTime::now_utc();
    Set(Some(previous.map_or(now, |prev| prev.max(now))))
}
