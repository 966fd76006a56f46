use crate::error::InstallError;
use crate::progress::ProgressSink;
use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use std::io::{ErrorKind, Read};
use std::time::Duration;

const CHUNK_SIZE: usize = 64 * 1024;

/// One request, no redirects followed, no retries. `timeout` of `None` waits forever.
pub fn client(timeout: Option<Duration>) -> Result<Client, InstallError> {
    Ok(Client::builder()
        .redirect(Policy::none())
        .timeout(timeout)
        .build()?)
}

/// Fetch the whole body of `url` into memory.
pub fn fetch(client: &Client, url: &str, sink: &mut dyn ProgressSink) -> Result<Vec<u8>, InstallError> {
    tracing::info!("fetching: {url}");
    let resp = client.get(url).send()?;
    if !resp.status().is_success() {
        return Err(InstallError::HttpStatus {
            url: url.to_string(),
            status: resp.status(),
        });
    }
    let total = resp.content_length();
    tracing::debug!(?total, "response headers received");
    read_body(resp, total, sink)
}

/// Drain `reader` chunk by chunk, reporting progress when `total` is known and non-zero.
pub fn read_body<R: Read>(
    mut reader: R,
    total: Option<u64>,
    sink: &mut dyn ProgressSink,
) -> Result<Vec<u8>, InstallError> {
    let total = total.filter(|t| *t > 0);
    let mut body = Vec::with_capacity(total.unwrap_or(0).min(64 * 1024 * 1024) as usize);
    let mut chunk = vec![0u8; CHUNK_SIZE];
    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                sink.finish();
                return Err(e.into());
            }
        };
        body.extend_from_slice(&chunk[..n]);
        if let Some(total) = total {
            sink.update(body.len() as u64, total);
        }
    }
    sink.finish();
    tracing::debug!(bytes = body.len(), "download complete");
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        updates: Vec<(u64, u64)>,
        finished: bool,
    }

    impl ProgressSink for Recorder {
        fn update(&mut self, received: u64, total: u64) {
            self.updates.push((received, total));
        }
        fn finish(&mut self) {
            self.finished = true;
        }
    }

    #[test]
    fn progress_follows_each_chunk() {
        let data = vec![7u8; CHUNK_SIZE * 2 + 10];
        let mut rec = Recorder::default();
        let body = read_body(&data[..], Some(data.len() as u64), &mut rec).unwrap();
        assert_eq!(body, data);
        assert!(!rec.updates.is_empty());
        assert_eq!(rec.updates.last(), Some(&(data.len() as u64, data.len() as u64)));
        assert!(rec.updates.windows(2).all(|w| w[0].0 < w[1].0));
        assert!(rec.finished);
    }

    #[test]
    fn missing_or_zero_length_reports_nothing() {
        for total in [None, Some(0)] {
            let mut rec = Recorder::default();
            let body = read_body(&b"payload"[..], total, &mut rec).unwrap();
            assert_eq!(body, b"payload");
            assert!(rec.updates.is_empty());
            assert!(rec.finished);
        }
    }

    #[test]
    fn fetch_reads_full_body() {
        let mut server = mockito::Server::new();
        let body = vec![42u8; 200_000];
        let _m = server
            .mock("GET", "/builds/geth.tar.gz")
            .with_status(200)
            .with_body(body.clone())
            .create();
        let url = format!("{}/builds/geth.tar.gz", server.url());
        let mut rec = Recorder::default();
        let got = fetch(&client(None).unwrap(), &url, &mut rec).unwrap();
        assert_eq!(got, body);
        assert!(rec.finished);
        assert!(rec.updates.last().map_or(true, |u| *u == (200_000, 200_000)));
    }

    #[test]
    fn error_status_is_fatal() {
        let mut server = mockito::Server::new();
        let _m = server.mock("GET", "/missing").with_status(404).create();
        let url = format!("{}/missing", server.url());
        let err = fetch(&client(None).unwrap(), &url, &mut Recorder::default()).unwrap_err();
        assert!(matches!(err, InstallError::HttpStatus { status, .. } if status == 404));
    }

    #[test]
    fn redirects_are_not_followed() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/moved")
            .with_status(302)
            .with_header("location", "/elsewhere")
            .create();
        let url = format!("{}/moved", server.url());
        let err = fetch(&client(None).unwrap(), &url, &mut Recorder::default()).unwrap_err();
        assert!(matches!(err, InstallError::HttpStatus { status, .. } if status == 302));
    }
}
