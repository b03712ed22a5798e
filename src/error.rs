//! Error taxonomy for a dump run.
//!
//! Every fallible operation in the crate returns [`DumpError`]. Which
//! variants are fatal is decided by the caller: the pipeline skips an
//! article on a per-file [`DumpError::Write`] but aborts on everything else.

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DumpError {
    /// Missing or inconsistent input from flags / environment.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("error building HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request could not be built or sent.
    #[error("error making request to {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API request to {url} failed with status {status}: {body}")]
    Status {
        status: StatusCode,
        url: String,
        body: String,
    },

    #[error("error decoding response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("error writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no articles to save")]
    EmptyCombined,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_includes_body() {
        let err = DumpError::Status {
            status: StatusCode::UNAUTHORIZED,
            url: "https://acme.zendesk.com/api/v2/help_center/articles.json".to_string(),
            body: r#"{"error":"Couldn't authenticate you"}"#.to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("401"));
        assert!(msg.contains("Couldn't authenticate you"));
    }

    #[test]
    fn test_write_message_includes_path() {
        let err = DumpError::Write {
            path: PathBuf::from("out/42.md"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "error writing out/42.md: denied");
    }
}
