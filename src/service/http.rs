use super::CatalogService;
use crate::config::AppConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{CodeSnippet, SnippetId};
use reqwest::{Client, Response, Url};
use std::time::Duration;

const CODES_SEGMENTS: [&str; 2] = ["api", "codes"];

#[derive(Debug, Clone)]
pub struct HttpCatalogService {
    client: Client,
    base_url: Url,
}

impl HttpCatalogService {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> CatalogResult<Self> {
        let parsed = Url::parse(base_url.trim())
            .map_err(|e| CatalogError::Transport(format!("invalid base url `{}`: {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(CatalogError::Transport(format!(
                "invalid base url `{}`: not a hierarchical url",
                base_url
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    pub fn from_config(config: &AppConfig) -> CatalogResult<Self> {
        Self::new(
            &config.base_url,
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    fn codes_url(&self) -> Url {
        self.url_with(&CODES_SEGMENTS)
    }

    /// The id is pushed as one path segment, so `/`, `#` and `?` inside a
    /// text id are percent-encoded rather than read as url syntax.
    fn code_url(&self, id: &SnippetId) -> Url {
        let id = id.to_string();
        self.url_with(&[CODES_SEGMENTS[0], CODES_SEGMENTS[1], id.as_str()])
    }

    fn url_with(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` refuses urls that cannot be a base, so the segments are always there
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

fn accepted(response: Response) -> CatalogResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(CatalogError::Rejected {
            status: status.as_u16(),
        })
    }
}

fn transport(error: reqwest::Error) -> CatalogError {
    CatalogError::Transport(error.to_string())
}

impl CatalogService for HttpCatalogService {
    async fn list(&self) -> CatalogResult<Vec<CodeSnippet>> {
        let response = self
            .client
            .get(self.codes_url())
            .send()
            .await
            .map_err(transport)?;

        accepted(response)?
            .json::<Vec<CodeSnippet>>()
            .await
            .map_err(transport)
    }

    async fn create(&self, snippet: &CodeSnippet) -> CatalogResult<()> {
        let response = self
            .client
            .post(self.codes_url())
            .json(snippet)
            .send()
            .await
            .map_err(transport)?;

        accepted(response).map(|_| ())
    }

    async fn delete(&self, id: &SnippetId) -> CatalogResult<()> {
        let response = self
            .client
            .delete(self.code_url(id))
            .send()
            .await
            .map_err(transport)?;

        accepted(response).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_built_from_trimmed_base() {
        let service = HttpCatalogService::new("http://localhost:5000/", None).unwrap();

        assert_eq!(service.codes_url().as_str(), "http://localhost:5000/api/codes");
        assert_eq!(
            service.code_url(&SnippetId::Number(42)).as_str(),
            "http://localhost:5000/api/codes/42"
        );
        assert_eq!(
            service.code_url(&SnippetId::Text("a-b".to_string())).as_str(),
            "http://localhost:5000/api/codes/a-b"
        );
    }

    #[test]
    fn base_path_prefix_is_kept() {
        let service = HttpCatalogService::new("https://example.com/v1/", None).unwrap();

        assert_eq!(service.codes_url().as_str(), "https://example.com/v1/api/codes");
    }

    #[test]
    fn url_syntax_in_text_ids_is_escaped() {
        let service = HttpCatalogService::new("http://localhost:5000", None).unwrap();

        let url = service.code_url(&SnippetId::Text("12#draft?x=1/y".to_string()));

        assert_eq!(url.as_str(), "http://localhost:5000/api/codes/12%23draft%3Fx=1%2Fy");
        assert_eq!(url.fragment(), None);
        assert_eq!(url.query(), None);
    }

    #[test]
    fn malformed_base_url_is_refused() {
        assert!(matches!(
            HttpCatalogService::new("not a url", None),
            Err(CatalogError::Transport(_))
        ));
        assert!(HttpCatalogService::new("mailto:ops@example.com", None).is_err());
    }

    #[tokio::test]
    async fn delete_sends_the_whole_text_id() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let n = socket.read(&mut buf).await.unwrap();
            socket
                .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
                .await
                .unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            request.lines().next().unwrap_or_default().to_string()
        });

        let service = HttpCatalogService::new(&format!("http://{}", addr), None).unwrap();
        let result = service.delete(&SnippetId::Text("12#draft".to_string())).await;
        let request_line = server.await.unwrap();

        assert_eq!(result, Ok(()));
        assert_eq!(request_line, "DELETE /api/codes/12%23draft HTTP/1.1");
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        let service = HttpCatalogService::new("http://127.0.0.1:1", None).unwrap();

        let result = service.list().await;
        assert!(matches!(result, Err(CatalogError::Transport(_))));
    }
}
