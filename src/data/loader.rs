use std::future::Future;

use thiserror::Error;

use super::model::ImageRecord;
use crate::config::Config;

// ---------------------------------------------------------------------------
// Fetch errors
// ---------------------------------------------------------------------------

/// Why the picture list could not be fetched.
///
/// The store only keeps the message; the variants exist for logging.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{0}")]
    Transport(String),
    #[error("HTTP status: {0}")]
    Status(u16),
    #[error("{0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// ImageSource – where the picture list comes from
// ---------------------------------------------------------------------------

/// Anything able to produce the list of pictures.
pub trait ImageSource: Send + Sync + 'static {
    fn fetch_image_list(
        &self,
    ) -> impl Future<Output = Result<Vec<ImageRecord>, FetchError>> + Send;
}

/// Fetches the picture list over HTTP.
pub struct HttpImageSource {
    client: reqwest::Client,
    url: String,
}

impl HttpImageSource {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self {
            client,
            url: config.pictures_url.clone(),
        })
    }
}

impl ImageSource for HttpImageSource {
    async fn fetch_image_list(&self) -> Result<Vec<ImageRecord>, FetchError> {
        log::debug!("GET {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body = response.bytes().await?;
        parse_image_list(&body)
    }
}

/// Parse a response body into picture records.
pub fn parse_image_list(body: &[u8]) -> Result<Vec<ImageRecord>, FetchError> {
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;
    use crate::data::model::ViewState;
    use crate::store::ViewStore;

    /// Serve one canned HTTP response on loopback; returns the URL to fetch.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}/pictures.json")
    }

    fn source_for(url: String) -> HttpImageSource {
        HttpImageSource::new(&Config {
            pictures_url: url,
            ..Config::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_http_fetch_success() {
        let url = serve_once(
            "200 OK",
            r#"[{"category":"Owl","path":"a.jpg","author":"X"},{"category":null,"path":"b.jpg"}]"#,
        )
        .await;
        let items = source_for(url).fetch_image_list().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].category.as_deref(), Some("Owl"));
        assert_eq!(items[1].category, None);
    }

    #[tokio::test]
    async fn test_http_not_found_is_status_error() {
        let url = serve_once("404 Not Found", "missing").await;
        let err = source_for(url).fetch_image_list().await.unwrap_err();
        assert!(matches!(err, FetchError::Status(404)), "got {err:?}");
        assert_eq!(err.to_string(), "HTTP status: 404");
    }

    #[tokio::test]
    async fn test_http_bad_body_is_decode_error() {
        let url = serve_once("200 OK", r#"{"category":"Owl"}"#).await;
        let err = source_for(url).fetch_image_list().await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)), "got {err:?}");
        assert!(!err.to_string().is_empty());
    }

    #[tokio::test]
    async fn test_http_refused_connection_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = source_for(format!("http://{addr}/pictures.json"))
            .fetch_image_list()
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)), "got {err:?}");
        assert!(!err.to_string().is_empty());
    }

    #[tokio::test]
    async fn test_http_failure_becomes_error_state() {
        let url = serve_once("500 Internal Server Error", "").await;
        let store = ViewStore::new(source_for(url));
        store.refresh().await;
        assert_eq!(
            *store.observe(),
            ViewState::Error {
                message: "HTTP status: 500".to_string()
            }
        );
    }

    #[test]
    fn test_parse_valid_body() {
        let body = br#"[{"category":"Owl","path":"a.jpg","author":"X"},{"category":"Hawk","path":"b.jpg","author":"Y"}]"#;
        let items = parse_image_list(body).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].image_path.as_deref(), Some("b.jpg"));
    }

    #[test]
    fn test_parse_wrong_shape_is_decode_error() {
        let err = parse_image_list(br#"{"category":"Owl"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_parse_non_json_is_decode_error() {
        let err = parse_image_list(b"<html>502</html>").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(FetchError::Transport("timeout".into()).to_string(), "timeout");
        assert_eq!(FetchError::Status(404).to_string(), "HTTP status: 404");
    }
}
