use crate::domain::model::LandmarkFrame;
use crate::domain::ports::PoseSource;
use crate::utils::error::{Result, TrainerError};
use async_trait::async_trait;
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Replays pose-model output recorded as JSON lines, one frame object per line.
pub struct JsonLinesPoseSource {
    reader: Box<dyn AsyncBufRead + Unpin + Send>,
    line_number: usize,
    buffer: String,
}

impl JsonLinesPoseSource {
    pub fn new<R>(reader: R) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        Self {
            reader: Box::new(reader),
            line_number: 0,
            buffer: String::new(),
        }
    }

    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = tokio::fs::File::open(path.as_ref()).await?;
        tracing::debug!("Opened landmark stream {}", path.as_ref().display());
        Ok(Self::new(BufReader::new(file)))
    }

    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }

    /// `-` selects stdin, anything else is a file path.
    pub async fn from_arg(input: &str) -> Result<Self> {
        if input == "-" {
            Ok(Self::stdin())
        } else {
            Self::open(input).await
        }
    }

    pub fn lines_read(&self) -> usize {
        self.line_number
    }
}

#[async_trait]
impl PoseSource for JsonLinesPoseSource {
    async fn next_frame(&mut self) -> Result<Option<LandmarkFrame>> {
        loop {
            self.buffer.clear();
            let read = self.reader.read_line(&mut self.buffer).await?;
            if read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let line = self.buffer.trim();
            if line.is_empty() {
                continue;
            }

            return serde_json::from_str(line)
                .map(Some)
                .map_err(|e| TrainerError::SourceError {
                    line: self.line_number,
                    message: e.to_string(),
                });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(text: &'static str) -> JsonLinesPoseSource {
        JsonLinesPoseSource::new(BufReader::new(text.as_bytes()))
    }

    #[tokio::test]
    async fn test_reads_frames_and_skips_blank_lines() {
        let mut src = source(
            "{\"timestamp_ms\":0,\"landmarks\":[{\"x\":0.1,\"y\":0.2,\"visibility\":0.9}]}\n\n{\"landmarks\":null}\n",
        );

        let first = src.next_frame().await.unwrap().unwrap();
        assert_eq!(first.landmarks.len(), 1);
        assert_eq!(first.landmarks[0].map(|lm| lm.visibility), Some(0.9));

        let second = src.next_frame().await.unwrap().unwrap();
        assert!(!second.has_subject());

        assert!(src.next_frame().await.unwrap().is_none());
        assert_eq!(src.lines_read(), 3);
    }

    #[tokio::test]
    async fn test_malformed_line_reports_line_number() {
        let mut src = source("{\"landmarks\":[]}\nnot json\n");
        assert!(src.next_frame().await.unwrap().is_some());

        match src.next_frame().await {
            Err(TrainerError::SourceError { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected source error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let result = JsonLinesPoseSource::open("/nonexistent/landmarks.jsonl").await;
        assert!(matches!(result, Err(TrainerError::IoError(_))));
    }
}
