use std::cmp::Ordering;

use crate::model::MediaItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Title,
    Length,
    Artist,
    Album,
    Genre,
    Time,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Title,
        SortKey::Length,
        SortKey::Artist,
        SortKey::Album,
        SortKey::Genre,
        SortKey::Time,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Title => "Title",
            SortKey::Length => "Length",
            SortKey::Artist => "Artist",
            SortKey::Album => "Album",
            SortKey::Genre => "Genre",
            SortKey::Time => "Date Added",
        }
    }

    /// Natural ordering of the field this key selects.
    pub fn compare(&self, a: &MediaItem, b: &MediaItem) -> Ordering {
        match self {
            SortKey::Title => a.title.cmp(&b.title),
            SortKey::Length => a.length.cmp(&b.length),
            SortKey::Artist => a.artist_name.cmp(&b.artist_name),
            SortKey::Album => a.album_name.cmp(&b.album_name),
            SortKey::Genre => a.genre.cmp(&b.genre),
            SortKey::Time => a.time.chronological_cmp(&b.time),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            key: SortKey::Title,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortConfig {
    /// Same key while ascending flips to descending; anything else starts
    /// ascending on `key`.
    pub fn toggled(self, key: SortKey) -> Self {
        let direction = if self.key == key && self.direction == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        Self { key, direction }
    }

    /// Stable: equal keys keep their order from `items` in both directions.
    pub fn apply<'a>(&self, items: &'a [MediaItem]) -> Vec<&'a MediaItem> {
        let mut sorted: Vec<&MediaItem> = items.iter().collect();
        sorted.sort_by(|a, b| {
            let ord = self.key.compare(a, b);
            match self.direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
        sorted
    }
}
