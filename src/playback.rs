use std::process::Stdio;

use reqwest::Url;
use tokio::process::Command;
use tracing::info;

use crate::http::{ApiError, Endpoints};

/// Hands stream URLs to an external player program.
#[derive(Debug, Clone)]
pub struct Player {
    program: String,
    args: Vec<String>,
}

impl Player {
    /// `command` is split on whitespace: the first word is the program, the
    /// rest go before the URL.
    pub fn new(command: &str) -> Self {
        let mut words = command.split_whitespace().map(str::to_string);
        let program = words.next().unwrap_or_default();
        Self {
            program,
            args: words.collect(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn open(&self, url: &Url) -> Result<(), ApiError> {
        if self.program.is_empty() {
            return Err(ApiError::File("no player configured".into()));
        }

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(url.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ApiError::File(format!("cannot start {}: {}", self.program, e)))?;

        info!("Playing {} with {}", Endpoints::redact(url), self.program);
        tokio::spawn(async move {
            let _ = child.wait().await;
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_command_words() {
        let player = Player::new("mpv --no-video");
        assert_eq!(player.program(), "mpv");
        assert_eq!(player.args(), ["--no-video".to_string()]);
    }

    #[tokio::test]
    async fn missing_program_fails() {
        let url = Url::parse("http://localhost/api/stream/x").unwrap();
        assert!(Player::new("").open(&url).is_err());
        assert!(
            Player::new("definitely-not-an-installed-player-7c1f")
                .open(&url)
                .is_err()
        );
    }
}
