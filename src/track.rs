use reqwest::Url;

use crate::{http::Endpoints, model::MediaItem};

/// Everything the detail dialog shows for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackDetail {
    pub item: MediaItem,
    pub stream_url: Url,
    pub cover_url: Option<Url>,
}

impl TrackDetail {
    pub fn open(item: Option<&MediaItem>, token: &str, endpoints: &Endpoints) -> Option<Self> {
        let item = item?;
        Some(Self {
            stream_url: endpoints.stream(&item.title, token)?,
            cover_url: item
                .cover_image
                .as_deref()
                .and_then(|path| endpoints.cover(path)),
            item: item.clone(),
        })
    }

    /// Stream URL safe to put on screen or in logs.
    pub fn display_stream_url(&self) -> Url {
        Endpoints::redact(&self.stream_url)
    }

    pub fn genre(&self) -> &str {
        self.item.genre.as_deref().unwrap_or("Unknown Genre")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AddedAt, Length};

    fn endpoints() -> Endpoints {
        Endpoints::new(Url::parse("http://localhost:8000").unwrap()).unwrap()
    }

    fn item(cover: Option<&str>, genre: Option<&str>) -> MediaItem {
        MediaItem {
            id: 4,
            title: "My Song.m4a".into(),
            length: Length::from_secs(200),
            artist_name: "Artist".into(),
            album_name: "Album".into(),
            genre: genre.map(str::to_string),
            time: AddedAt::new("2024-05-01, 12:00:00"),
            cover_image: cover.map(str::to_string),
            artist_id: None,
            album_id: None,
            users_id: None,
        }
    }

    #[test]
    fn nothing_selected_opens_nothing() {
        assert_eq!(TrackDetail::open(None, "tok", &endpoints()), None);
    }

    #[test]
    fn builds_stream_and_cover_urls() {
        let item = item(Some("static_files/covers/4.jpg"), None);
        let detail = TrackDetail::open(Some(&item), "tok", &endpoints()).unwrap();

        assert_eq!(
            detail.stream_url.as_str(),
            "http://localhost:8000/api/stream/My%20Song.m4a?token=tok"
        );
        assert_eq!(
            detail.cover_url.as_ref().map(Url::as_str),
            Some("http://localhost:8000/static_files/covers/4.jpg")
        );
        assert_eq!(
            detail.display_stream_url().as_str(),
            "http://localhost:8000/api/stream/My%20Song.m4a?token=***"
        );
        assert_eq!(detail.genre(), "Unknown Genre");
    }

    #[test]
    fn dot_title_has_no_stream() {
        let item = MediaItem {
            title: "..".into(),
            ..item(None, None)
        };
        assert_eq!(TrackDetail::open(Some(&item), "tok", &endpoints()), None);
    }

    #[test]
    fn missing_cover_has_no_url() {
        let item = item(None, Some("Jazz"));
        let detail = TrackDetail::open(Some(&item), "tok", &endpoints()).unwrap();
        assert_eq!(detail.cover_url, None);
        assert_eq!(detail.genre(), "Jazz");
    }
}
