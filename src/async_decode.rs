//! Async decoding module
//!
//! Decoding itself is synchronous CPU work, so these helpers read input
//! asynchronously and run the decoder on tokio's blocking pool.

#[cfg(feature = "async")]
pub mod functions {
    use crate::{decode, DecoderConfig, LzwError, Result};
    use std::io;
    use std::time::Duration;
    use tokio::io::{AsyncRead, AsyncReadExt};

    /// Read a whole packed stream from an async reader and decode it
    pub async fn decode_async<R: AsyncRead + Unpin>(
        mut reader: R,
        config: DecoderConfig,
    ) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data).await?;
        decode_blocking(data, config).await
    }

    /// Decode a buffer on the blocking pool
    pub async fn decode_blocking(data: Vec<u8>, config: DecoderConfig) -> Result<Vec<u8>> {
        tokio::task::spawn_blocking(move || decode::decode_bytes(&data, &config))
            .await
            .map_err(|e| LzwError::Io(io::Error::other(e)))?
    }

    /// Decode a buffer, giving up after `limit`
    ///
    /// A timed out decode yields [`LzwError::Timeout`] and no partial output.
    /// The worker finishes in the background and its result is dropped.
    pub async fn decode_with_timeout(
        data: Vec<u8>,
        config: DecoderConfig,
        limit: Duration,
    ) -> Result<Vec<u8>> {
        let input_bytes = data.len();
        match tokio::time::timeout(limit, decode_blocking(data, config)).await {
            Ok(result) => result,
            Err(_) => {
                log::warn!("Decoding {input_bytes} bytes timed out after {limit:?}");
                Err(LzwError::Timeout(limit))
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_decode_async() {
            let data: &[u8] = &[0x04, 0x11, 0x00, 0x00, 0x42];
            let output = decode_async(data, DecoderConfig::default()).await.unwrap();
            assert_eq!(output, b"AAAB");
        }

        #[tokio::test]
        async fn test_decode_async_propagates_errors() {
            let data: &[u8] = &[0x04, 0x10, 0x42, 0x43];
            let err = decode_async(data, DecoderConfig::default())
                .await
                .unwrap_err();
            assert!(matches!(err, LzwError::TruncatedInput { .. }));
        }

        #[tokio::test]
        async fn test_decode_with_generous_timeout() {
            let output = decode_with_timeout(
                vec![0x04, 0x10, 0x42],
                DecoderConfig::default(),
                Duration::from_secs(30),
            )
            .await
            .unwrap();
            assert_eq!(output, b"AB");
        }
    }
}

#[cfg(feature = "async")]
pub use functions::{decode_async, decode_blocking, decode_with_timeout};
