//! Binary resource transport.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::io::Read;
use std::time::Duration;

use super::TransferError;

/// Size of each read from the response body.
const CHUNK_SIZE: usize = 16 * 1024;

/// Fetches a binary resource, reporting progress as bytes arrive.
///
/// `on_progress` receives `(bytes_loaded, bytes_total)` in non-decreasing
/// `bytes_loaded` order; `bytes_total` is `None` when the server does not
/// announce a length.
pub trait ResourceFetcher: Send + Sync {
    /// Performs one GET and returns the full body.
    fn fetch(
        &self,
        url: &str,
        on_progress: &mut dyn FnMut(u64, Option<u64>),
    ) -> Result<Vec<u8>, TransferError>;
}

/// HTTP fetcher backed by a blocking reqwest client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }
}

impl ResourceFetcher for HttpFetcher {
    fn fetch(
        &self,
        url: &str,
        on_progress: &mut dyn FnMut(u64, Option<u64>),
    ) -> Result<Vec<u8>, TransferError> {
        let mut response = self.client.get(url).send().map_err(TransferError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransferError::Status(status.as_u16()));
        }

        let total = response.content_length();
        let capacity = total
            .and_then(|len| usize::try_from(len).ok())
            .unwrap_or(0);
        let mut body = Vec::with_capacity(capacity);
        let mut buffer = vec![0u8; CHUNK_SIZE];

        loop {
            let n = response.read(&mut buffer).map_err(TransferError::Read)?;
            if n == 0 {
                break;
            }
            body.extend_from_slice(&buffer[..n]);
            on_progress(body.len() as u64, total);
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_http::{chunked, direct_client, serve_once, with_length};

    fn fetcher() -> HttpFetcher {
        HttpFetcher {
            client: direct_client(),
        }
    }

    fn fetch(url: &str) -> (Result<Vec<u8>, TransferError>, Vec<(u64, Option<u64>)>) {
        let mut reports = Vec::new();
        let result = fetcher().fetch(url, &mut |loaded, total| reports.push((loaded, total)));
        (result, reports)
    }

    #[test]
    fn test_fetch_reports_progress_against_content_length() {
        let body = vec![7u8; 40_000];
        let (url, server) = serve_once(with_length("200 OK", &body));

        let (result, reports) = fetch(&format!("{url}/assets/cv.pdf"));
        let request = server.join().unwrap();

        assert!(request.starts_with("GET /assets/cv.pdf "));
        assert_eq!(result.unwrap(), body);
        assert!(!reports.is_empty());
        assert!(reports.iter().all(|(_, total)| *total == Some(40_000)));
        assert!(reports.windows(2).all(|w| w[0].0 <= w[1].0));
        assert_eq!(reports.last(), Some(&(40_000, Some(40_000))));
    }

    #[test]
    fn test_fetch_without_length_reports_unknown_total() {
        let (url, server) = serve_once(chunked(&[b"%PDF-", b"1.7 body"]));

        let (result, reports) = fetch(&url);
        server.join().unwrap();

        assert_eq!(result.unwrap(), b"%PDF-1.7 body");
        assert!(!reports.is_empty());
        assert!(reports.iter().all(|(_, total)| total.is_none()));
        assert_eq!(reports.last().map(|(loaded, _)| *loaded), Some(13));
    }

    #[test]
    fn test_fetch_maps_error_status() {
        let (url, server) = serve_once(with_length("404 Not Found", b"missing"));

        let (result, reports) = fetch(&url);
        server.join().unwrap();

        assert!(matches!(result, Err(TransferError::Status(404))));
        assert!(reports.is_empty());
    }
}
