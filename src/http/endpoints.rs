use reqwest::Url;

use crate::config::ConfigError;

/// Builds every URL the client talks to, relative to the server origin.
///
/// Titles are pushed as single path segments, so characters such as `/`,
/// `?` or `#` in a file name are percent-encoded instead of changing the
/// route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    origin: Url,
}

impl Endpoints {
    pub fn new(origin: Url) -> Result<Self, ConfigError> {
        if origin.cannot_be_a_base() {
            return Err(ConfigError::InvalidServerUrl(origin.to_string()));
        }
        Ok(Self { origin })
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    fn api(&self, segments: &[&str]) -> Url {
        let mut url = self.origin.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }

    pub fn welcome(&self) -> Url {
        self.api(&[])
    }

    pub fn token(&self) -> Url {
        self.api(&["token"])
    }

    pub fn users(&self) -> Url {
        self.api(&["users"])
    }

    pub fn current_user(&self) -> Url {
        self.api(&["users", "me"])
    }

    pub fn media_list(&self) -> Url {
        self.api(&["media", ""])
    }

    pub fn media_search(&self, query: &str) -> Url {
        let mut url = self.api(&["media", "search"]);
        url.query_pairs_mut().append_pair("query", query);
        url
    }

    /// `None` for titles the URL parser would drop or collapse (`""`, `.`,
    /// `..`), which would otherwise address the parent route.
    fn titled(&self, route: &str, title: &str) -> Option<Url> {
        if matches!(title, "" | "." | "..") {
            return None;
        }
        Some(self.api(&[route, title]))
    }

    pub fn download(&self, title: &str) -> Option<Url> {
        self.titled("download", title)
    }

    pub fn delete(&self, title: &str) -> Option<Url> {
        self.titled("delete", title)
    }

    pub fn upload(&self) -> Url {
        self.api(&["upload", ""])
    }

    /// Players cannot attach an `Authorization` header, so the backend accepts
    /// the bearer token as a query parameter here. Never log the result; use
    /// [`Endpoints::redact`].
    pub fn stream(&self, title: &str, token: &str) -> Option<Url> {
        let mut url = self.titled("stream", title)?;
        url.query_pairs_mut().append_pair("token", token);
        Some(url)
    }

    pub fn cover(&self, cover_image: &str) -> Option<Url> {
        let path = cover_image.trim_start_matches('/');
        if path.is_empty() {
            return None;
        }

        let mut base = self.origin.clone();
        base.set_query(None);
        base.set_fragment(None);
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path).ok()
    }

    /// Copy of `url` with any `token` query value masked.
    pub fn redact(url: &Url) -> Url {
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| {
                let v = if k == "token" {
                    "***".to_string()
                } else {
                    v.into_owned()
                };
                (k.into_owned(), v)
            })
            .collect();

        let mut redacted = url.clone();
        if pairs.is_empty() {
            return redacted;
        }
        redacted.query_pairs_mut().clear().extend_pairs(pairs);
        redacted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints(origin: &str) -> Endpoints {
        Endpoints::new(Url::parse(origin).unwrap()).unwrap()
    }

    #[test]
    fn builds_api_routes() {
        let e = endpoints("http://localhost:8000");
        assert_eq!(e.welcome().as_str(), "http://localhost:8000/api");
        assert_eq!(e.token().as_str(), "http://localhost:8000/api/token");
        assert_eq!(e.current_user().as_str(), "http://localhost:8000/api/users/me");
        assert_eq!(e.media_list().as_str(), "http://localhost:8000/api/media/");
        assert_eq!(e.upload().as_str(), "http://localhost:8000/api/upload/");
    }

    #[test]
    fn keeps_origin_path_prefix() {
        let e = endpoints("https://example.com/library/");
        assert_eq!(e.users().as_str(), "https://example.com/library/api/users");
    }

    #[test]
    fn titles_are_single_segments() {
        let e = endpoints("http://localhost:8000");
        assert_eq!(
            e.download("My Song.m4a").unwrap().as_str(),
            "http://localhost:8000/api/download/My%20Song.m4a"
        );
        assert_eq!(
            e.delete("a/b?c.m4a").unwrap().as_str(),
            "http://localhost:8000/api/delete/a%2Fb%3Fc.m4a"
        );
    }

    #[test]
    fn dot_titles_have_no_route() {
        let e = endpoints("http://localhost:8000");
        for title in ["", ".", ".."] {
            assert_eq!(e.download(title), None, "{title:?}");
            assert_eq!(e.delete(title), None, "{title:?}");
            assert_eq!(e.stream(title, "tok"), None, "{title:?}");
        }
        assert_eq!(
            e.delete("...").unwrap().as_str(),
            "http://localhost:8000/api/delete/..."
        );
        assert_eq!(
            e.download(".hidden.mp3").unwrap().as_str(),
            "http://localhost:8000/api/download/.hidden.mp3"
        );
    }

    #[test]
    fn search_query_is_encoded() {
        let e = endpoints("http://localhost:8000");
        let url = e.media_search("rock & roll");
        assert_eq!(url.path(), "/api/media/search");
        let pairs: Vec<_> = url.query_pairs().collect();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, "query");
        assert_eq!(pairs[0].1, "rock & roll");
    }

    #[test]
    fn stream_carries_token_and_redacts() {
        let e = endpoints("http://localhost:8000");
        let url = e.stream("song.m4a", "abc.def").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/stream/song.m4a?token=abc.def");

        let redacted = Endpoints::redact(&url);
        assert!(!redacted.as_str().contains("abc.def"));
        assert!(redacted.as_str().contains("token=***") || redacted.as_str().contains("token=%2A%2A%2A"));
    }

    #[test]
    fn cover_is_relative_to_origin() {
        let e = endpoints("http://localhost:8000");
        assert_eq!(
            e.cover("static_files/cover.jpg").unwrap().as_str(),
            "http://localhost:8000/static_files/cover.jpg"
        );
        assert_eq!(
            e.cover("/users_media/x.png").unwrap().as_str(),
            "http://localhost:8000/users_media/x.png"
        );
        assert!(e.cover("").is_none());
    }

    #[test]
    fn rejects_non_base_origin() {
        let url = Url::parse("mailto:someone@example.com").unwrap();
        assert!(Endpoints::new(url).is_err());
    }
}
