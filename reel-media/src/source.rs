use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;

use crate::{ByteStream, MediaError, MediaHead, MediaResult, RangeWindow};

/// Where the streamer gets its bytes and metadata from.
///
/// Implementations must not cache `head`: the size is read on every request.
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Current metadata of the resource
    async fn head(&self) -> MediaResult<MediaHead>;

    /// Open a stream over exactly the bytes of `window`
    async fn open(&self, window: &RangeWindow) -> MediaResult<ByteStream>;

    /// Human-readable identity, used in logs
    fn describe(&self) -> String;
}

/// A media file on the local filesystem
#[derive(Debug, Clone)]
pub struct FsMediaSource {
    path: PathBuf,
    read_buffer_bytes: usize,
}

impl FsMediaSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            read_buffer_bytes: 64 * 1024,
        }
    }

    pub fn with_read_buffer(mut self, bytes: usize) -> Self {
        self.read_buffer_bytes = bytes.max(1);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

#[async_trait]
impl MediaSource for FsMediaSource {
    async fn head(&self) -> MediaResult<MediaHead> {
        let meta = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| MediaError::from_io(&self.display_path(), e))?;

        if !meta.is_file() {
            return Err(MediaError::not_found(self.display_path()));
        }

        let last_modified = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_millis() as i64);

        Ok(MediaHead {
            size_bytes: meta.len(),
            last_modified,
        })
    }

    async fn open(&self, window: &RangeWindow) -> MediaResult<ByteStream> {
        let mut file = tokio::fs::File::open(&self.path)
            .await
            .map_err(|e| MediaError::from_io(&self.display_path(), e))?;
        file.seek(SeekFrom::Start(window.start)).await?;

        let reader = file.take(window.content_length());
        Ok(Box::pin(ReaderStream::with_capacity(reader, self.read_buffer_bytes)))
    }

    fn describe(&self) -> String {
        self.display_path()
    }
}

/// In-memory media, handy for tests and embedded assets
#[derive(Debug, Clone)]
pub struct MemoryMediaSource {
    name: String,
    data: Bytes,
}

impl MemoryMediaSource {
    pub fn new<S: Into<String>, B: Into<Bytes>>(name: S, data: B) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

#[async_trait]
impl MediaSource for MemoryMediaSource {
    async fn head(&self) -> MediaResult<MediaHead> {
        Ok(MediaHead {
            size_bytes: self.data.len() as u64,
            last_modified: None,
        })
    }

    async fn open(&self, window: &RangeWindow) -> MediaResult<ByteStream> {
        let len = self.data.len() as u64;
        if window.end >= len {
            return Err(MediaError::RangeNotSatisfiable { total: len });
        }
        let slice = self.data.slice(window.start as usize..=window.end as usize);
        Ok(Box::pin(futures_util::stream::once(async move { Ok(slice) })))
    }

    fn describe(&self) -> String {
        format!("memory:{}", self.name)
    }
}
