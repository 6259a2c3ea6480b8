//! Block feeds.
//!
//! - [`VecFeed`]: blocks already in memory
//! - [`JsonFileFeed`]: a file holding a JSON array of blocks, or one block
//!   per line (NDJSON)

use async_trait::async_trait;
use chainassets_core::{error::FeedError, event::Block, feed::BlockFeed};
use std::collections::VecDeque;
use std::path::Path;
use tracing::debug;

/// Feed over an in-memory list of blocks.
#[derive(Debug, Default, Clone)]
pub struct VecFeed {
    blocks: VecDeque<Block>,
}

impl VecFeed {
    pub fn new(blocks: impl IntoIterator<Item = Block>) -> Self {
        Self {
            blocks: blocks.into_iter().collect(),
        }
    }

    /// Blocks not yet handed out.
    pub fn remaining(&self) -> usize {
        self.blocks.len()
    }
}

#[async_trait]
impl BlockFeed for VecFeed {
    async fn next_blocks(&mut self, max: usize) -> Result<Option<Vec<Block>>, FeedError> {
        if self.blocks.is_empty() {
            return Ok(None);
        }
        let take = max.max(1).min(self.blocks.len());
        Ok(Some(self.blocks.drain(..take).collect()))
    }
}

/// Feed backed by a JSON or NDJSON file of blocks.
#[derive(Debug)]
pub struct JsonFileFeed {
    inner: VecFeed,
}

impl JsonFileFeed {
    /// Read and parse the whole file.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, FeedError> {
        let text = tokio::fs::read_to_string(path.as_ref()).await?;
        let blocks = parse_blocks(&text)?;
        debug!(path = %path.as_ref().display(), blocks = blocks.len(), "block file loaded");
        Ok(Self {
            inner: VecFeed::new(blocks),
        })
    }

    pub fn from_json(text: &str) -> Result<Self, FeedError> {
        Ok(Self {
            inner: VecFeed::new(parse_blocks(text)?),
        })
    }

    pub fn remaining(&self) -> usize {
        self.inner.remaining()
    }
}

#[async_trait]
impl BlockFeed for JsonFileFeed {
    async fn next_blocks(&mut self, max: usize) -> Result<Option<Vec<Block>>, FeedError> {
        self.inner.next_blocks(max).await
    }
}

/// A document starting with `[` is one JSON array; anything else is NDJSON.
fn parse_blocks(text: &str) -> Result<Vec<Block>, FeedError> {
    if text.trim_start().starts_with('[') {
        return serde_json::from_str(text).map_err(|e| FeedError::Parse {
            line: e.line(),
            reason: e.to_string(),
        });
    }

    let mut blocks = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let block = serde_json::from_str(line).map_err(|e| FeedError::Parse {
            line: n + 1,
            reason: e.to_string(),
        })?;
        blocks.push(block);
    }
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(height: u32) -> Block {
        Block {
            height,
            hash: None,
            timestamp: None,
            events: vec![],
        }
    }

    #[tokio::test]
    async fn vec_feed_chunks() {
        let mut feed = VecFeed::new((1..=5).map(block));
        let first = feed.next_blocks(2).await.unwrap().unwrap();
        assert_eq!(first.iter().map(|b| b.height).collect::<Vec<_>>(), [1, 2]);
        assert_eq!(feed.next_blocks(10).await.unwrap().unwrap().len(), 3);
        assert!(feed.next_blocks(10).await.unwrap().is_none());
    }

    #[test]
    fn parses_array_and_ndjson() {
        let array = r#"[{"height": 1, "events": []}, {"height": 2}]"#;
        assert_eq!(JsonFileFeed::from_json(array).unwrap().remaining(), 2);

        let ndjson = "{\"height\": 1}\n\n{\"height\": 2, \"hash\": \"0x01\"}\n";
        assert_eq!(JsonFileFeed::from_json(ndjson).unwrap().remaining(), 2);
    }

    #[test]
    fn ndjson_error_names_line() {
        let ndjson = "{\"height\": 1}\n{\"height\": \"x\"}\n";
        let err = JsonFileFeed::from_json(ndjson).unwrap_err();
        assert!(matches!(err, FeedError::Parse { line: 2, .. }));
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let err = JsonFileFeed::open("/nonexistent/blocks.json").await.unwrap_err();
        assert!(matches!(err, FeedError::Io(_)));
    }
}
