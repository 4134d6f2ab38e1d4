//! Line-delimited JSON log of committed games and clicks.
//!
//! Each record is one JSON object on its own line:
//!
//! ```text
//! {"type":"new_game","snapshot":{...}}
//! {"type":"resolved","seq":1,"result":{...}}
//! ```
//!
//! The journal is best-effort. The first write error disables it and the
//! game keeps running.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::{BoardObserver, BoardSnapshot, ResolutionResult};

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Record<'a> {
    NewGame {
        snapshot: &'a BoardSnapshot,
    },
    Resolved {
        seq: u64,
        result: &'a ResolutionResult,
    },
}

/// A [`BoardObserver`] that appends every committed event to a writer.
#[derive(Debug)]
pub struct Journal<W: Write> {
    writer: W,
    buf: Vec<u8>,
    /// Resolved records written so far.
    seq: u64,
    failed: bool,
}

impl Journal<BufWriter<File>> {
    /// Open (or create) `path` for appending.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open journal {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> Journal<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buf: Vec::with_capacity(4096),
            seq: 0,
            failed: false,
        }
    }

    /// True once a write has failed; nothing more is written after that.
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_record(&mut self, record: &Record<'_>) {
        if self.failed {
            return;
        }
        self.buf.clear();
        if serde_json::to_writer(&mut self.buf, record).is_err() {
            return;
        }
        self.buf.push(b'\n');
        if self.writer.write_all(&self.buf).is_err() || self.writer.flush().is_err() {
            self.failed = true;
        }
    }
}

impl<W: Write> BoardObserver for Journal<W> {
    fn new_game(&mut self, snapshot: &BoardSnapshot) {
        self.write_record(&Record::NewGame { snapshot });
    }

    fn resolved(&mut self, result: &ResolutionResult) {
        self.seq += 1;
        let seq = self.seq;
        self.write_record(&Record::Resolved { seq, result });
    }
}
