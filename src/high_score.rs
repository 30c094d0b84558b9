//! High score persistence.
//!
//! The score is a single integer-like scalar. A missing or malformed file
//! reads as zero; write failures are the caller's to swallow.

use crate::constants::HIGH_SCORE_FILE;
use crate::utils::persistence::{load_json_or_default, save_json};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::io;
use std::rc::Rc;

/// Backing store for the session's best score.
pub trait HighScoreStore {
    /// Read the persisted score. Absence is not an error.
    fn load(&self) -> u64;
    /// Persist a new best score.
    fn save(&mut self, score: u64) -> io::Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HighScoreFile {
    #[serde(default)]
    high_score: u64,
}

/// Stores the score as `{"high_score": n}` in ~/.dino-runner/high_score.json.
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    filename: String,
}

impl FileHighScoreStore {
    pub fn new() -> Self {
        Self::with_filename(HIGH_SCORE_FILE)
    }

    /// Use a different file under ~/.dino-runner/.
    pub fn with_filename(filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
        }
    }
}

impl Default for FileHighScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> u64 {
        load_json_or_default::<HighScoreFile>(&self.filename).high_score
    }

    fn save(&mut self, score: u64) -> io::Result<()> {
        save_json(&self.filename, &HighScoreFile { high_score: score })
    }
}

/// In-process store. Clones share the same slot, so a test can keep a handle
/// after moving one into the world.
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    value: Rc<Cell<u64>>,
    writes: Rc<Cell<u32>>,
}

impl MemoryHighScoreStore {
    pub fn with_value(value: u64) -> Self {
        let store = Self::default();
        store.value.set(value);
        store
    }

    pub fn value(&self) -> u64 {
        self.value.get()
    }

    /// Number of `save` calls so far.
    pub fn writes(&self) -> u32 {
        self.writes.get()
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> u64 {
        self.value.get()
    }

    fn save(&mut self, score: u64) -> io::Result<()> {
        self.value.set(score);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
