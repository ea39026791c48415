//! Integration tests for net crate

#[cfg(test)]
mod tests {
    use hostsetup_errors::{Error, NetworkError};
    use hostsetup_events::{channel, AppEvent, DownloadEvent};
    use hostsetup_net::*;
    use httpmock::prelude::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_download_file() {
        let server = MockServer::start();
        let (tx, mut rx) = channel();

        let content = b"fake jdk archive";
        let mock = server.mock(|when, then| {
            when.method(GET).path("/jdk-8u112-linux-x64.tar.gz");
            then.status(200)
                .header("content-length", content.len().to_string())
                .body(content);
        });

        let temp = tempdir().unwrap();
        let dest = temp.path().join("resources").join("jdk-8u112-linux-x64.tar.gz");
        let downloader = HttpDownloader::with_events(NetClient::with_defaults().unwrap(), tx);
        let url = server.url("/jdk-8u112-linux-x64.tar.gz");

        let bytes = downloader.download(&url, &dest).await.unwrap();

        mock.assert();
        assert_eq!(bytes, content.len() as u64);
        assert_eq!(tokio::fs::read(&dest).await.unwrap(), content);
        assert!(!temp
            .path()
            .join("resources")
            .join("jdk-8u112-linux-x64.tar.gz.part")
            .exists());

        let mut saw_start = false;
        let mut saw_complete = false;
        while let Ok(event) = rx.try_recv() {
            match event {
                AppEvent::Download(DownloadEvent::Started { total_bytes, .. }) => {
                    assert_eq!(total_bytes, Some(content.len() as u64));
                    saw_start = true;
                }
                AppEvent::Download(DownloadEvent::Completed { .. }) => saw_complete = true,
                _ => {}
            }
        }
        assert!(saw_start);
        assert!(saw_complete);
    }

    #[tokio::test]
    async fn test_http_error_leaves_no_file() {
        let server = MockServer::start();
        let (tx, mut rx) = channel();

        let mock = server.mock(|when, then| {
            when.method(GET).path("/missing.zip");
            then.status(404);
        });

        let temp = tempdir().unwrap();
        let dest = temp.path().join("missing.zip");
        let downloader = HttpDownloader::with_events(NetClient::with_defaults().unwrap(), tx);

        let err = downloader
            .download(&server.url("/missing.zip"), &dest)
            .await
            .unwrap_err();

        // Attempted exactly once
        mock.assert_hits(1);
        assert!(matches!(
            err,
            Error::Network(NetworkError::HttpError { status: 404, .. })
        ));
        assert!(!dest.exists());
        assert!(matches!(
            rx.try_recv().unwrap(),
            AppEvent::Download(DownloadEvent::Failed { .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let temp = tempdir().unwrap();
        let downloader = HttpDownloader::new(NetClient::with_defaults().unwrap());
        let err = downloader
            .download("not a url", &temp.path().join("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Network(NetworkError::InvalidUrl(_))));
    }
}
