//! Async batch processing module
//!
//! This module decodes many independent files concurrently. Each file owns
//! its own decoder state, so a failure in one input never affects another.

#[cfg(feature = "async")]
/// Concurrent file decoding with a configurable concurrency limit
pub mod processor {
    use crate::async_decode::{decode_blocking, decode_with_timeout};
    use crate::{DecodeStats, DecoderConfig, Result};
    use futures::stream::{self, StreamExt};
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    /// Outcome of decoding one file
    pub type FileResult = (PathBuf, Result<Vec<u8>>);

    /// Concurrent file decoder
    #[derive(Debug, Clone)]
    pub struct AsyncBatchDecoder {
        concurrency_limit: usize,
        config: DecoderConfig,
        timeout: Option<Duration>,
    }

    impl AsyncBatchDecoder {
        /// Create a batch decoder with one task per CPU and default limits
        pub fn new() -> Self {
            Self {
                concurrency_limit: num_cpus::get(),
                config: DecoderConfig::default(),
                timeout: None,
            }
        }

        /// Set the concurrency limit
        pub fn with_concurrency(mut self, limit: usize) -> Self {
            self.concurrency_limit = limit.max(1);
            self
        }

        /// Set the dictionary limits used for every file
        pub fn with_config(mut self, config: DecoderConfig) -> Self {
            self.config = config;
            self
        }

        /// Abort any single decode that runs longer than `limit`
        pub fn with_timeout(mut self, limit: Duration) -> Self {
            self.timeout = Some(limit);
            self
        }

        /// Decode files concurrently, returning results in completion order
        pub async fn decode_files<P: AsRef<Path> + Send + Sync>(
            &self,
            files: Vec<P>,
        ) -> Vec<FileResult> {
            stream::iter(files.into_iter().map(|path| {
                let processor = self.clone();
                async move { processor.decode_single_file(path.as_ref()).await }
            }))
            .buffer_unordered(self.concurrency_limit)
            .collect()
            .await
        }

        /// Decode in-memory buffers concurrently, keeping input order
        pub async fn decode_buffers(&self, buffers: Vec<Vec<u8>>) -> Vec<Result<Vec<u8>>> {
            stream::iter(buffers.into_iter().map(|data| {
                let processor = self.clone();
                async move { processor.decode_buffer(data).await }
            }))
            .buffered(self.concurrency_limit)
            .collect()
            .await
        }

        /// Stream per-file statistics as decodes complete
        pub fn decode_files_streaming<P: AsRef<Path> + Send + Sync + 'static>(
            &self,
            files: Vec<P>,
        ) -> impl futures::Stream<Item = (PathBuf, Result<DecodeStats>)> + '_ {
            stream::iter(files.into_iter().map(move |path| {
                let processor = self.clone();
                async move {
                    let path = path.as_ref().to_path_buf();
                    let stats = match tokio::fs::read(&path).await {
                        Ok(data) => {
                            let config = processor.config;
                            tokio::task::spawn_blocking(move || {
                                crate::decode_with_stats(&data, &config).map(|(_, stats)| stats)
                            })
                            .await
                            .unwrap_or_else(|e| Err(std::io::Error::other(e).into()))
                        }
                        Err(e) => Err(e.into()),
                    };
                    (path, stats)
                }
            }))
            .buffer_unordered(self.concurrency_limit)
        }

        async fn decode_single_file(&self, path: &Path) -> FileResult {
            let result = match tokio::fs::read(path).await {
                Ok(data) => self.decode_buffer(data).await,
                Err(e) => Err(e.into()),
            };

            match &result {
                Ok(output) => log::debug!("Decoded {} ({} bytes)", path.display(), output.len()),
                Err(e) => log::warn!("Failed to decode {}: {}", path.display(), e),
            }

            (path.to_path_buf(), result)
        }

        async fn decode_buffer(&self, data: Vec<u8>) -> Result<Vec<u8>> {
            match self.timeout {
                Some(limit) => decode_with_timeout(data, self.config, limit).await,
                None => decode_blocking(data, self.config).await,
            }
        }
    }

    impl Default for AsyncBatchDecoder {
        fn default() -> Self {
            Self::new()
        }
    }

}

#[cfg(feature = "async")]
pub use processor::AsyncBatchDecoder;
