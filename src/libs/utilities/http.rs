// Page fetching and archive downloading.
//
// Everything that touches the network goes through the `PageSource` trait so the scrape
// and install pipeline can be driven from in-memory fixtures in tests.

use crate::log_debug;
use crate::schemas::errors::InstallError;
use colored::Colorize;
use std::io::Read;
use std::time::Duration;

/// Upper bound on how much of a download's advertised `Content-Length` is reserved up
/// front. The header comes from the mirror and is not trusted beyond this.
const MAX_PREALLOCATION: usize = 64 * 1024 * 1024;

/// Something that can hand back the body of a URL.
pub trait PageSource {
    /// GETs `url` and returns the body as text (an HTML page).
    fn fetch_page(&self, url: &str) -> Result<String, InstallError>;

    /// GETs `url` and returns the whole body in memory (an archive).
    fn download_bytes(&self, url: &str) -> Result<Vec<u8>, InstallError>;
}

/// Blocking `ureq` client used for the real site.
///
/// Redirects are followed by the agent. There is no retry; a failed request fails the
/// stage that issued it.
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new(timeout: Option<Duration>) -> Self {
        let mut builder = ureq::AgentBuilder::new()
            .user_agent(concat!("swt-install/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            agent: builder.build(),
        }
    }

    fn get(&self, url: &str) -> Result<ureq::Response, InstallError> {
        log_debug!("[Fetch] GET {}", url.blue());
        self.agent
            .get(url)
            .call()
            .map_err(|e| InstallError::Http {
                url: url.to_string(),
                source: Box::new(e),
            })
    }
}

impl PageSource for HttpFetcher {
    fn fetch_page(&self, url: &str) -> Result<String, InstallError> {
        let response = self.get(url)?;
        let body = response.into_string().map_err(|e| InstallError::Body {
            url: url.to_string(),
            source: e,
        })?;
        log_debug!("[Fetch] Received {} bytes of HTML", body.len());
        Ok(body)
    }

    fn download_bytes(&self, url: &str) -> Result<Vec<u8>, InstallError> {
        let response = self.get(url)?;
        let expected = response
            .header("Content-Length")
            .and_then(|len| len.parse::<usize>().ok());

        let mut bytes = Vec::with_capacity(expected.unwrap_or(0).min(MAX_PREALLOCATION));
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|e| InstallError::Body {
                url: url.to_string(),
                source: e,
            })?;
        log_debug!(
            "[Fetch] Downloaded {} bytes from {}",
            bytes.len(),
            url.green()
        );
        Ok(bytes)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::TcpListener;
    use std::thread;

    /// Serves `response` verbatim to the first connection on a loopback port and returns
    /// the URL to request.
    fn serve_once(response: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let _ = stream.write_all(response);
            let _ = stream.flush();
        });
        format!("http://{addr}/eclipse/downloads/")
    }

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(Some(Duration::from_secs(10)))
    }

    #[test]
    fn page_body_is_returned() {
        let url = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 10\r\nConnection: close\r\n\r\n<p>SWT</p>",
        );
        assert_eq!(fetcher().fetch_page(&url).unwrap(), "<p>SWT</p>");
    }

    #[test]
    fn archive_bytes_are_returned() {
        let url = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Type: application/zip\r\nContent-Length: 4\r\nConnection: close\r\n\r\nPK\x03\x04",
        );
        assert_eq!(fetcher().download_bytes(&url).unwrap(), b"PK\x03\x04");
    }

    #[test]
    fn not_found_is_an_http_error() {
        let url = serve_once(
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        let err = fetcher().fetch_page(&url).unwrap_err();
        match err {
            InstallError::Http { url: failed, .. } => assert_eq!(failed, url),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn refused_connection_is_an_http_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = fetcher()
            .download_bytes(&format!("http://{addr}/swt.zip"))
            .unwrap_err();
        assert!(matches!(err, InstallError::Http { .. }));
    }

    #[test]
    fn oversized_content_length_fails_without_panicking() {
        let url = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Length: 18446744073709551615\r\nConnection: close\r\n\r\nPK",
        );
        let err = fetcher().download_bytes(&url).unwrap_err();
        assert!(matches!(err, InstallError::Body { .. }));
    }
}
