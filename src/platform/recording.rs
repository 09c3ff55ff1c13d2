//! Landmark recordings
//!
//! A recording stands in for camera + model + keyboard: each line is one
//! JSON-encoded [`RecordedFrame`] holding the frame size, capture time, what
//! the landmark model saw and an optional key press. Blank lines and lines
//! starting with `#` are skipped.
//!
//! ```text
//! {"width":640,"height":480,"timestamp":0.0,"observation":{"faces":[...]}}
//! {"width":640,"height":480,"timestamp":0.033,"key":"r"}
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Frame, FrameSource, KeyCommand, KeySource, LandmarkModel};
use crate::error::{ArcadeError, Result};
use crate::landmarks::Observation;

/// One line of a recording
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    pub width: u32,
    pub height: u32,
    pub timestamp: f64,
    #[serde(default)]
    pub observation: Observation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<char>,
}

/// Replays a landmark recording as capture device, model and keyboard
pub struct Recording {
    lines: Box<dyn BufRead>,
    line_no: usize,
    current: Option<RecordedFrame>,
    pending_key: Option<KeyCommand>,
    frames_read: u64,
}

impl Recording {
    /// Open a recording file. Failure here is a capture open failure.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| ArcadeError::CaptureOpen {
            source_name: path.display().to_string(),
            reason: e.to_string(),
        })?;
        log::info!("Opened landmark recording {:?}", path);
        Ok(Self::from_reader(BufReader::new(file)))
    }

    pub fn from_reader<R: BufRead + 'static>(reader: R) -> Self {
        Self {
            lines: Box::new(reader),
            line_no: 0,
            current: None,
            pending_key: None,
            frames_read: 0,
        }
    }

    /// Build an in-memory recording from frames
    pub fn from_frames(frames: &[RecordedFrame]) -> Result<Self> {
        let mut text = String::new();
        for frame in frames {
            let line = serde_json::to_string(frame).map_err(|source| ArcadeError::Recording {
                line: 0,
                source,
            })?;
            text.push_str(&line);
            text.push('\n');
        }
        Ok(Self::from_reader(Cursor::new(text.into_bytes())))
    }

    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    fn read_record(&mut self) -> Result<Option<RecordedFrame>> {
        let mut buf = String::new();
        loop {
            buf.clear();
            let n = self
                .lines
                .read_line(&mut buf)
                .map_err(|e| ArcadeError::CaptureRead(e.to_string()))?;
            if n == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let line = buf.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let record = serde_json::from_str(line).map_err(|source| ArcadeError::Recording {
                line: self.line_no,
                source,
            })?;
            return Ok(Some(record));
        }
    }
}

impl FrameSource for Recording {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        let Some(record) = self.read_record()? else {
            log::info!("Recording ended after {} frames", self.frames_read);
            self.current = None;
            return Ok(None);
        };

        self.frames_read += 1;
        self.pending_key = record.key.and_then(KeyCommand::from_char);
        let frame = Frame::blank(record.width, record.height, record.timestamp);
        self.current = Some(record);
        Ok(Some(frame))
    }
}

impl LandmarkModel for Recording {
    fn detect(&mut self, _frame: &Frame) -> Observation {
        self.current
            .as_ref()
            .map(|r| r.observation.clone())
            .unwrap_or_default()
    }
}

impl KeySource for Recording {
    fn poll_key(&mut self) -> Option<KeyCommand> {
        self.pending_key.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{HandLandmarks, Landmark};

    #[test]
    fn test_replays_frames_keys_and_observations() {
        let frames = vec![
            RecordedFrame {
                width: 640,
                height: 480,
                timestamp: 0.0,
                observation: Observation {
                    faces: Vec::new(),
                    hands: vec![HandLandmarks { points: vec![Landmark::new(0.5, 0.5)] }],
                },
                key: None,
            },
            RecordedFrame {
                width: 640,
                height: 480,
                timestamp: 0.033,
                key: Some('r'),
                ..Default::default()
            },
        ];
        let mut rec = Recording::from_frames(&frames).unwrap();

        let f = rec.next_frame().unwrap().unwrap();
        assert_eq!((f.width, f.height), (640, 480));
        assert_eq!(rec.detect(&f).hands.len(), 1);
        assert_eq!(rec.poll_key(), None);

        let f = rec.next_frame().unwrap().unwrap();
        assert!(rec.detect(&f).is_empty());
        assert_eq!(rec.poll_key(), Some(KeyCommand::Restart));
        assert_eq!(rec.poll_key(), None);

        assert!(rec.next_frame().unwrap().is_none());
        assert_eq!(rec.frames_read(), 2);
    }

    #[test]
    fn test_skips_comments_and_blank_lines() {
        let text = "# header\n\n{\"width\":10,\"height\":10,\"timestamp\":1.5}\n";
        let mut rec = Recording::from_reader(Cursor::new(text.as_bytes().to_vec()));
        let f = rec.next_frame().unwrap().unwrap();
        assert_eq!(f.timestamp, 1.5);
        assert!(rec.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let text = "{\"width\":10,\"height\":10,\"timestamp\":0.0}\nnot json\n";
        let mut rec = Recording::from_reader(Cursor::new(text.as_bytes().to_vec()));
        assert!(rec.next_frame().unwrap().is_some());
        match rec.next_frame() {
            Err(ArcadeError::Recording { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected recording error, got {:?}", other.map(|f| f.is_some())),
        }
    }

    #[test]
    fn test_open_missing_file_is_capture_error() {
        match Recording::open(Path::new("/nonexistent/landmarks.jsonl")) {
            Err(ArcadeError::CaptureOpen { .. }) => {}
            Err(e) => panic!("unexpected error {}", e),
            Ok(_) => panic!("opened a missing file"),
        }
    }
}
