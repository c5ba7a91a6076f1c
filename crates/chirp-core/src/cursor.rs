use crate::corpus::Corpus;
use crate::store::{self, StateStore};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Persisted pointer to the next minor unit to post.
///
/// Stored as `{"major": _, "minor": _}`; mutated only by the sequential
/// poster after a confirmed successful post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub major: usize,
    pub minor: usize,
}

impl Cursor {
    pub const START: Cursor = Cursor { major: 0, minor: 0 };

    /// Bounds check against a concrete corpus.
    pub fn is_valid(&self, corpus: &Corpus) -> bool {
        self.major < corpus.majors.len() && self.minor < corpus.majors[self.major].minors.len()
    }

    /// The next position: minor + 1, wrapping into the next major unit and
    /// cyclically back to the first major unit after the last.
    pub fn advanced(&self, corpus: &Corpus) -> Cursor {
        let mut major = self.major;
        let mut minor = self.minor + 1;
        if minor >= corpus.majors[major].minors.len() {
            minor = 0;
            major = (major + 1) % corpus.majors.len();
        }
        Cursor { major, minor }
    }

    /// Load the cursor for `key`, falling back to `START` on a missing
    /// document, unreadable store, malformed JSON, or out-of-bounds position.
    /// Recovery, not an error: the next post restarts from the beginning.
    pub fn load(store: &dyn StateStore, key: &str, corpus: &Corpus) -> Cursor {
        match store::read_json::<Cursor>(store, key) {
            Ok(Some(cursor)) if cursor.is_valid(corpus) => cursor,
            Ok(Some(cursor)) => {
                warn!(
                    "invalid cursor in '{key}': major={}, minor={}; resetting to 0,0",
                    cursor.major, cursor.minor
                );
                Cursor::START
            }
            Ok(None) => Cursor::START,
            Err(e) => {
                warn!("failed to load cursor from '{key}': {e}; resetting to 0,0");
                Cursor::START
            }
        }
    }
}
