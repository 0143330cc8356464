use crate::default_config;
use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use rand::Rng;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex as AsyncMutex;

/// Cooperative cancellation flag shared with the caller. Checked before the
/// request is sent and between chunks; once set, the stream yields
/// [`FetchError::Cancelled`] and dropping it closes the connection.
pub type CancelToken = Arc<AsyncMutex<bool>>;

pub type LogByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, FetchError>> + Send>>;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("log download failed with status {0}")]
    Status(u16),

    #[error("log download failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("log stream interrupted: {0}")]
    Stream(String),

    #[error("log retrieval cancelled")]
    Cancelled,
}

impl FetchError {
    fn is_retryable(&self) -> bool {
        match self {
            FetchError::Status(code) => *code >= 500,
            FetchError::Transport(_) => true,
            FetchError::Stream(_) | FetchError::Cancelled => false,
        }
    }
}

fn ensure_download_status(status: u16) -> Result<(), FetchError> {
    if status == 200 {
        Ok(())
    } else {
        Err(FetchError::Status(status))
    }
}

/// # open log stream
///
/// GET a signed log URL and hand back its body as an incremental byte
/// stream. The response body is owned by the returned stream; every exit
/// path releases the connection by dropping it.
///
/// Signed URLs are pre-authorized, so no auth header is attached.
pub async fn open_log_stream(
    http: &reqwest::Client,
    url: &str,
    cancel_token: Option<CancelToken>,
) -> Result<LogByteStream, FetchError> {
    if let Some(token) = &cancel_token {
        if *token.lock().await {
            return Err(FetchError::Cancelled);
        }
    }

    let resp = http.get(url).send().await?;
    ensure_download_status(resp.status().as_u16())?;

    let stream = resp.bytes_stream().then(move |chunk| {
        let cancel_token = cancel_token.clone();
        async move {
            if let Some(token) = &cancel_token {
                if *token.lock().await {
                    return Err(FetchError::Cancelled);
                }
            }

            chunk.map_err(|e| FetchError::Stream(e.to_string()))
        }
    });

    Ok(Box::pin(stream))
}

/// # open log stream with retry
///
/// Bounded retry around [`open_log_stream`]: 5xx statuses and transport
/// failures at open time are retried with exponential backoff plus jitter,
/// up to `DOWNLOAD_MAX_ATTEMPTS`. Mid-stream failures are never retried.
pub async fn open_log_stream_with_retry(
    http: &reqwest::Client,
    url: &str,
    cancel_token: Option<CancelToken>,
) -> Result<LogByteStream, FetchError> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        match open_log_stream(http, url, cancel_token.clone()).await {
            Ok(stream) => return Ok(stream),
            Err(e) if e.is_retryable() && attempt < default_config::DOWNLOAD_MAX_ATTEMPTS => {
                tokio::time::sleep(backoff_delay(attempt)).await;
            }
            Err(e) => return Err(e),
        }
    }
}

fn backoff_delay(attempt: u32) -> Duration {
    let base = default_config::DOWNLOAD_RETRY_BASE_DELAY_MS;
    let backoff = base.saturating_mul(1u64 << (attempt - 1).min(8));
    let jitter = rand::rng().random_range(0..=base / 2);

    Duration::from_millis(backoff + jitter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_200_passes_status_check() {
        assert!(ensure_download_status(200).is_ok());

        for status in [204, 302, 404, 410, 500, 503] {
            match ensure_download_status(status) {
                Err(FetchError::Status(code)) => assert_eq!(code, status),
                other => panic!("unexpected: {:?}", other),
            }
        }
    }

    #[test]
    fn test_retryable_kinds() {
        assert!(FetchError::Status(500).is_retryable());
        assert!(FetchError::Status(503).is_retryable());
        assert!(!FetchError::Status(404).is_retryable());
        assert!(!FetchError::Stream("reset".to_string()).is_retryable());
        assert!(!FetchError::Cancelled.is_retryable());
    }

    #[test]
    fn test_backoff_grows_with_attempt() {
        let base = default_config::DOWNLOAD_RETRY_BASE_DELAY_MS;

        for attempt in 1..=3u32 {
            let backoff = base * (1 << (attempt - 1));
            let delay = backoff_delay(attempt).as_millis() as u64;
            assert!(delay >= backoff);
            assert!(delay <= backoff + base / 2);
        }
    }

    #[tokio::test]
    async fn test_cancelled_before_open_skips_network() {
        let token: CancelToken = Arc::new(AsyncMutex::new(true));
        let http = reqwest::Client::new();

        let result = open_log_stream(&http, "http://127.0.0.1:9/never", Some(token)).await;

        assert!(matches!(result, Err(FetchError::Cancelled)));
    }
}
