#![allow(dead_code)]

use std::{sync::Mutex, time::Duration};

use async_trait::async_trait;
use reqwest::Url;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    task::JoinHandle,
};

use mymedia::{
    http::{ApiError, MediaApi},
    model::{AddedAt, Credentials, Length, MediaItem, UploadFile, User},
};

pub const TOKEN: &str = "tok-123";
/// Login with this password is refused by [`FakeApi`].
pub const WRONG_PASSWORD: &str = "not-my-password";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Welcome,
    Login(Credentials),
    Register(Credentials),
    CurrentUser(String),
    List(String),
    Search { token: String, query: String },
    Download { token: String, title: String },
    Delete { token: String, title: String },
    Upload { token: String, names: Vec<String> },
}

/// In-memory backend that records every call it receives.
pub struct FakeApi {
    calls: Mutex<Vec<Call>>,
    media: Mutex<Vec<MediaItem>>,
    fail_next: Mutex<Option<ApiError>>,
    write_delay: Mutex<Option<Duration>>,
    pub token: String,
}

impl FakeApi {
    pub fn new(media: Vec<MediaItem>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            media: Mutex::new(media),
            fail_next: Mutex::new(None),
            write_delay: Mutex::new(None),
            token: TOKEN.to_string(),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn media(&self) -> Vec<MediaItem> {
        self.media.lock().unwrap().clone()
    }

    /// The next call, whatever it is, fails with `error`.
    pub fn fail_next(&self, error: ApiError) {
        *self.fail_next.lock().unwrap() = Some(error);
    }

    /// Registration and upload take `delay` to answer.
    pub fn slow_writes(&self, delay: Duration) {
        *self.write_delay.lock().unwrap() = Some(delay);
    }

    async fn wait_for_write(&self) {
        let delay = *self.write_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        match self.fail_next.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MediaApi for FakeApi {
    async fn welcome(&self) -> Result<String, ApiError> {
        self.record(Call::Welcome)?;
        Ok("Welcome to My Media".to_string())
    }

    async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        self.record(Call::Login(credentials.clone()))?;
        if credentials.password == WRONG_PASSWORD {
            return Err(ApiError::Status {
                status: 401,
                detail: Some("Incorrect username or password".into()),
            });
        }
        Ok(self.token.clone())
    }

    async fn register(&self, credentials: &Credentials) -> Result<String, ApiError> {
        self.record(Call::Register(credentials.clone()))?;
        self.wait_for_write().await;
        Ok(self.token.clone())
    }

    async fn current_user(&self, token: &str) -> Result<User, ApiError> {
        self.record(Call::CurrentUser(token.to_string()))?;
        if token != self.token {
            return Err(ApiError::Status {
                status: 401,
                detail: Some("Could not validate credentials".into()),
            });
        }
        Ok(User {
            id: 1,
            email: "a@b.com".into(),
            date_created: None,
        })
    }

    async fn list_media(&self, token: &str) -> Result<Vec<MediaItem>, ApiError> {
        self.record(Call::List(token.to_string()))?;
        Ok(self.media())
    }

    async fn search_media(&self, token: &str, query: &str) -> Result<Vec<MediaItem>, ApiError> {
        self.record(Call::Search {
            token: token.to_string(),
            query: query.to_string(),
        })?;
        let needle = query.to_lowercase();
        Ok(self
            .media()
            .into_iter()
            .filter(|item| item.title.to_lowercase().contains(&needle))
            .collect())
    }

    async fn download_media(&self, token: &str, title: &str) -> Result<Vec<u8>, ApiError> {
        self.record(Call::Download {
            token: token.to_string(),
            title: title.to_string(),
        })?;
        if self.media().iter().any(|item| item.title == title) {
            Ok(format!("bytes of {title}").into_bytes())
        } else {
            Err(ApiError::Status {
                status: 404,
                detail: Some("File not found".into()),
            })
        }
    }

    async fn delete_media(&self, token: &str, title: &str) -> Result<(), ApiError> {
        self.record(Call::Delete {
            token: token.to_string(),
            title: title.to_string(),
        })?;
        self.media.lock().unwrap().retain(|item| item.title != title);
        Ok(())
    }

    async fn upload_media(&self, token: &str, files: Vec<UploadFile>) -> Result<(), ApiError> {
        self.record(Call::Upload {
            token: token.to_string(),
            names: files.iter().map(|f| f.name.clone()).collect(),
        })?;
        self.wait_for_write().await;
        let mut media = self.media.lock().unwrap();
        for file in files {
            let id = media.len() as i64 + 1;
            media.push(item(id, &file.name, 0, "", "", None, ""));
        }
        Ok(())
    }
}

pub fn item(
    id: i64,
    title: &str,
    secs: u64,
    artist: &str,
    album: &str,
    genre: Option<&str>,
    time: &str,
) -> MediaItem {
    MediaItem {
        id,
        title: title.to_string(),
        length: Length::from_secs(secs),
        artist_name: artist.to_string(),
        album_name: album.to_string(),
        genre: genre.map(str::to_string),
        time: AddedAt::new(time),
        cover_image: None,
        artist_id: None,
        album_id: None,
        users_id: Some(1),
    }
}

pub fn library() -> Vec<MediaItem> {
    vec![
        item(1, "Blue.mp3", 240, "Joni", "Blue", Some("Folk"), "2024-03-01, 10:00:00"),
        item(2, "Alpha.mp3", 95, "Zed", "Early", Some("Rock"), "2024-01-15, 08:30:00"),
        item(3, "Comet.m4a", 180, "Ana", "Sky", None, "2024-02-20, 21:15:00"),
    ]
}

/// What the stub server saw.
#[derive(Debug, Clone)]
pub struct Captured {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Captured {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Accepts one connection, records the request and answers with `status` and
/// a JSON `body`.
pub async fn serve_once(status: u16, body: &str) -> (Url, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let body = body.to_string();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let captured = read_request(&mut stream).await;
        let response = format!(
            "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();
        captured
    });

    (Url::parse(&format!("http://{addr}")).unwrap(), handle)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

async fn read_more(stream: &mut TcpStream, buf: &mut Vec<u8>) {
    let mut chunk = [0u8; 4096];
    let n = stream.read(&mut chunk).await.unwrap();
    assert!(n > 0, "client closed the connection early");
    buf.extend_from_slice(&chunk[..n]);
}

async fn read_request(stream: &mut TcpStream) -> Captured {
    let mut buf = Vec::new();
    let header_end = loop {
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
        read_more(stream, &mut buf).await;
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();
    let lookup = |name: &str| {
        headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    };

    let mut body = buf[header_end..].to_vec();
    if let Some(len) = lookup("content-length") {
        let len: usize = len.parse().unwrap();
        while body.len() < len {
            read_more(stream, &mut body).await;
        }
        body.truncate(len);
    } else if lookup("transfer-encoding").is_some_and(|v| v.contains("chunked")) {
        while find(&body, b"0\r\n\r\n").is_none() {
            read_more(stream, &mut body).await;
        }
        body = dechunk(&body);
    }

    Captured {
        request_line,
        headers,
        body,
    }
}

fn dechunk(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut rest = raw;
    while let Some(line_end) = find(rest, b"\r\n") {
        let size_text = String::from_utf8_lossy(&rest[..line_end]).into_owned();
        let size = usize::from_str_radix(size_text.split(';').next().unwrap_or("0").trim(), 16)
            .unwrap_or(0);
        if size == 0 {
            break;
        }
        let start = line_end + 2;
        out.extend_from_slice(&rest[start..start + size]);
        rest = &rest[start + size + 2..];
    }
    out
}
