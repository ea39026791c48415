#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Network operations for hostsetup
//!
//! The setup steps only see the [`Downloader`] trait. [`NetClient`] is the
//! HTTP implementation; tests substitute their own.

mod client;

pub use client::{NetClient, NetConfig};

use async_trait::async_trait;
use futures::StreamExt;
use hostsetup_errors::{Error, NetworkError};
use hostsetup_events::{AppEvent, DownloadEvent, EventEmitter, EventSender};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Fetches a remote file onto the local filesystem.
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Download `url` to `dest`, returning the number of bytes written.
    ///
    /// `dest` only appears once the transfer completed; a failed transfer
    /// leaves nothing behind.
    async fn download(&self, url: &str, dest: &Path) -> Result<u64, Error>;
}

/// [`NetClient`] bound to an event channel
#[derive(Clone)]
pub struct HttpDownloader {
    client: NetClient,
    tx: Option<EventSender>,
}

impl HttpDownloader {
    #[must_use]
    pub fn new(client: NetClient) -> Self {
        Self { client, tx: None }
    }

    #[must_use]
    pub fn with_events(client: NetClient, tx: EventSender) -> Self {
        Self {
            client,
            tx: Some(tx),
        }
    }
}

impl EventEmitter for HttpDownloader {
    fn event_sender(&self) -> Option<&EventSender> {
        self.tx.as_ref()
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn download(&self, url: &str, dest: &Path) -> Result<u64, Error> {
        match download_file(&self.client, url, dest, self.tx.as_ref()).await {
            Ok(bytes) => Ok(bytes),
            Err(e) => {
                self.emit(AppEvent::Download(DownloadEvent::Failed {
                    url: url.to_string(),
                    message: e.to_string(),
                }));
                Err(e)
            }
        }
    }
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    dest.with_file_name(name)
}

/// Stream `url` into `dest` through a `.part` sibling file
///
/// # Errors
///
/// Returns an error if the request fails, the server answers with an error
/// status, or the file cannot be written.
pub async fn download_file(
    client: &NetClient,
    url: &str,
    dest: &Path,
    tx: Option<&EventSender>,
) -> Result<u64, Error> {
    let response = client.get(url).await?;

    let emit = |event: DownloadEvent| {
        if let Some(tx) = tx {
            tx.emit(AppEvent::Download(event));
        }
    };

    emit(DownloadEvent::Started {
        url: url.to_string(),
        dest: dest.to_path_buf(),
        total_bytes: response.content_length(),
    });

    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::io_with_path(&e, parent))?;
    }

    let part = partial_path(dest);
    let written = write_stream(response, &part).await;
    let bytes = match written {
        Ok(bytes) => bytes,
        Err(e) => {
            let _ = tokio::fs::remove_file(&part).await;
            return Err(e);
        }
    };

    tokio::fs::rename(&part, dest)
        .await
        .map_err(|e| Error::io_with_path(&e, dest))?;

    emit(DownloadEvent::Completed {
        url: url.to_string(),
        dest: dest.to_path_buf(),
        bytes_downloaded: bytes,
    });
    Ok(bytes)
}

async fn write_stream(response: reqwest::Response, part: &Path) -> Result<u64, Error> {
    let url = response.url().to_string();
    let mut file = tokio::fs::File::create(part)
        .await
        .map_err(|e| Error::io_with_path(&e, part))?;
    let mut stream = response.bytes_stream();
    let mut downloaded = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| client::map_request_error(&url, &e))?;
        file.write_all(&chunk)
            .await
            .map_err(|e| Error::io_with_path(&e, part))?;
        downloaded += chunk.len() as u64;
    }

    file.flush().await.map_err(|e| Error::io_with_path(&e, part))?;
    if downloaded == 0 {
        return Err(NetworkError::DownloadFailed(format!("{url}: empty response body")).into());
    }
    Ok(downloaded)
}
