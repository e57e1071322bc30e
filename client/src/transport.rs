use std::io;

use async_stream::stream;
use bytes::{Bytes, BytesMut};
use common::{
    data::{Candidate, LocalFile},
    format_file_size,
    payloads::UploadResponse,
    session::{ProgressSender, UploadError},
    widget::Transport,
    UPLOAD_FIELD,
};
use futures_util::Stream;
use log::{debug, info};
use reqwest::{
    multipart::{Form, Part},
    Body, Client,
};
use tokio::{fs::File, io::AsyncReadExt};

const CHUNK_SIZE: usize = 64 * 1024;

/// Posts the file as a multipart form to a fixed endpoint.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

fn network(e: reqwest::Error) -> UploadError {
    UploadError::Network(e.to_string())
}

async fn read_chunk(file: &mut File) -> io::Result<Bytes> {
    let mut buf = BytesMut::with_capacity(CHUNK_SIZE);
    file.read_buf(&mut buf).await?;
    Ok(buf.freeze())
}

/// Streams `file` in chunks. A chunk counts as sent once the connection asks
/// for the next one.
fn body_stream(
    mut file: File,
    total: u64,
    progress: ProgressSender,
) -> impl Stream<Item = io::Result<Bytes>> {
    stream! {
        let mut sent = 0;
        progress.report(sent, Some(total));
        loop {
            match read_chunk(&mut file).await {
                Ok(chunk) if chunk.is_empty() => break,
                Ok(chunk) => {
                    let len = chunk.len() as u64;
                    yield Ok(chunk);
                    sent += len;
                    progress.report(sent, Some(total));
                }
                Err(e) => {
                    yield Err(e);
                    break;
                }
            }
        }
    }
}

impl HttpTransport {
    pub fn new(client: Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Checks the status code and decodes the body.
    async fn process_response(
        input: reqwest::Result<reqwest::Response>,
    ) -> Result<UploadResponse, UploadError> {
        let res = input.map_err(network)?;
        let status = res.status();
        if !status.is_success() {
            debug!("endpoint answered {status}: {:?}", res.text().await);
            return Err(UploadError::BadStatus(status.as_u16()));
        }
        let text = res.text().await.map_err(network)?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl Transport<LocalFile> for HttpTransport {
    async fn send(
        &self,
        file: &LocalFile,
        progress: ProgressSender,
    ) -> Result<UploadResponse, UploadError> {
        let fh = File::open(&file.path)
            .await
            .map_err(|e| UploadError::Local(e.to_string()))?;
        let total = file.size();
        let media_type = match file.media_type() {
            "" => "application/octet-stream",
            t => t,
        };
        let part = Part::stream_with_length(Body::wrap_stream(body_stream(fh, total, progress)), total)
            .file_name(file.name().to_string())
            .mime_str(media_type)
            .map_err(|e| UploadError::Local(e.to_string()))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        info!(
            "uploading {} ({}) to {}",
            file.name(),
            format_file_size(total),
            self.endpoint
        );
        let res = self.client.post(&self.endpoint).multipart(form).send().await;
        Self::process_response(res).await
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use common::widget::Widget;
    use mockito::Matcher;

    use super::*;

    fn transport(endpoint: String) -> HttpTransport {
        HttpTransport::new(Client::new(), endpoint)
    }

    async fn local_file(dir: &tempfile::TempDir, name: &str, len: usize) -> LocalFile {
        let path = dir.path().join(name);
        std::fs::write(&path, vec![b'x'; len]).unwrap();
        LocalFile::from_path(path).await.unwrap()
    }

    #[tokio::test]
    async fn uploads_multipart_and_reports_progress() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data; boundary=".to_string()),
            )
            .match_body(Matcher::Regex(
                r#"name="file"; filename="report.txt""#.to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success":true,"link":"https://example.com/abc123"}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = local_file(&dir, "report.txt", 3 * CHUNK_SIZE + 10).await;
        let (sender, mut rx) = ProgressSender::channel();

        let response = transport(server.url()).send(&file, sender).await.unwrap();
        assert_eq!(response.link, "https://example.com/abc123");
        mock.assert_async().await;

        let mut reports = Vec::new();
        while let Ok(p) = rx.try_recv() {
            reports.push(p);
        }
        let total = file.size();
        assert!(reports.iter().all(|p| p.total == Some(total)));
        assert_eq!(reports.first().map(|p| p.sent), Some(0));
        assert_eq!(reports.last().map(|p| p.sent), Some(total));
        assert!(reports.windows(2).all(|w| w[0].sent <= w[1].sent));
    }

    #[tokio::test]
    async fn server_error_is_upload_failed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = local_file(&dir, "a.bin", 100).await;
        let (sender, _rx) = ProgressSender::channel();
        let err = transport(server.url()).send(&file, sender).await.unwrap_err();
        assert_eq!(err, UploadError::BadStatus(500));
        assert_eq!(err.to_string(), "Upload failed");
    }

    #[tokio::test]
    async fn garbage_body_is_bad_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = local_file(&dir, "a.bin", 100).await;
        let (sender, _rx) = ProgressSender::channel();
        let err = transport(server.url()).send(&file, sender).await.unwrap_err();
        assert!(matches!(err, UploadError::BadResponse(_)), "{err:?}");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_network_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = local_file(&dir, "a.bin", 100).await;
        let (sender, _rx) = ProgressSender::channel();
        let err = transport("http://127.0.0.1:1".to_string())
            .send(&file, sender)
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::Network(_)), "{err:?}");
        assert_eq!(err.to_string(), "Network error");
    }

    #[tokio::test]
    async fn file_deleted_after_selection_reports_the_io_error() {
        let mut server = mockito::Server::new_async().await;
        let never = server.mock("POST", "/").expect(0).create_async().await;

        let dir = tempfile::tempdir().unwrap();
        let file = local_file(&dir, "a.bin", 100).await;
        std::fs::remove_file(&file.path).unwrap();

        let (sender, _rx) = ProgressSender::channel();
        let err = transport(server.url()).send(&file, sender).await.unwrap_err();
        assert!(matches!(err, UploadError::Local(_)), "{err:?}");
        assert_ne!(err.to_string(), "Network error");
        let expected = std::fs::File::open(&file.path).unwrap_err().to_string();
        assert_eq!(err.to_string(), expected);
        never.assert_async().await;
    }

    #[tokio::test]
    async fn widget_end_to_end() {
        let mut server = mockito::Server::new_async().await;
        let failing = server
            .mock("POST", "/")
            .with_status(500)
            .expect(1)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = local_file(&dir, "holiday.mp4", 200_000).await;
        let transport = transport(server.url());
        let mut widget = Widget::new();
        assert!(widget.select_file(file).await);

        let result = widget.start_upload(&transport, |_| {}).await;
        assert_eq!(result, Some(Err(UploadError::BadStatus(500))));
        assert_eq!(widget.link(), None);
        failing.assert_async().await;
        failing.remove_async().await;

        server
            .mock("POST", "/")
            .with_status(201)
            .with_body(r#"{"link":"https://example.com/abc123"}"#)
            .create_async()
            .await;
        let percents = RefCell::new(Vec::new());
        let result = widget
            .start_upload(&transport, |s| percents.borrow_mut().push(s.percent))
            .await;
        assert_eq!(result, Some(Ok("https://example.com/abc123".to_string())));
        assert_eq!(widget.link(), Some("https://example.com/abc123"));
        assert!(widget.expiry().is_some());

        let percents = percents.into_inner();
        assert_eq!(percents.first(), Some(&0));
        assert_eq!(percents.last(), Some(&100));
        assert!(percents.windows(2).all(|w| w[0] <= w[1]));
    }
}
