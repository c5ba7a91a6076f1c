//! Shared test doubles for the poster tests.

use crate::config::Credentials;
use crate::corpus::{Corpus, MajorUnit, MinorUnit};
use crate::error::{ChirpError, Result};
use crate::publisher::{PostId, Publisher};
use crate::store::StateStore;
use std::collections::HashMap;
use std::sync::Mutex;

// ---------------------------------------------------------------------------
// MemStore
// ---------------------------------------------------------------------------

/// In-memory `StateStore` with switchable read/write failure.
pub struct MemStore {
    docs: Mutex<HashMap<String, Vec<u8>>>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            docs: Mutex::new(HashMap::new()),
            fail_reads: false,
            fail_writes: false,
        }
    }

    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn put(&self, key: &str, data: &[u8]) {
        self.docs
            .lock()
            .unwrap()
            .insert(key.to_string(), data.to_vec());
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.docs.lock().unwrap().get(key).cloned()
    }
}

impl StateStore for MemStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        if self.fail_reads {
            return Err(ChirpError::StoreRead {
                key: key.to_string(),
                reason: "simulated outage".to_string(),
            });
        }
        Ok(self.docs.lock().unwrap().get(key).cloned())
    }

    fn write(&self, key: &str, data: &[u8]) -> Result<()> {
        if self.fail_writes {
            return Err(ChirpError::StoreWrite {
                key: key.to_string(),
                reason: "simulated outage".to_string(),
            });
        }
        self.docs
            .lock()
            .unwrap()
            .insert(key.to_string(), data.to_vec());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MockPublisher
// ---------------------------------------------------------------------------

/// `Publisher` double recording posted texts and description updates.
pub struct MockPublisher {
    pub posts: Mutex<Vec<String>>,
    pub descriptions: Mutex<Vec<String>>,
    fail_publish: bool,
    fail_description: bool,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self {
            posts: Mutex::new(Vec::new()),
            descriptions: Mutex::new(Vec::new()),
            fail_publish: false,
            fail_description: false,
        }
    }

    pub fn failing_publish(mut self) -> Self {
        self.fail_publish = true;
        self
    }

    pub fn failing_description(mut self) -> Self {
        self.fail_description = true;
        self
    }

    pub fn posted(&self) -> Vec<String> {
        self.posts.lock().unwrap().clone()
    }
}

impl Publisher for MockPublisher {
    fn publish(&self, text: &str) -> Result<PostId> {
        if self.fail_publish {
            return Err(ChirpError::Publish("simulated API error".to_string()));
        }
        let mut posts = self.posts.lock().unwrap();
        posts.push(text.to_string());
        Ok(PostId(format!("{}", posts.len())))
    }

    fn update_profile_description(&self, description: &str) -> Result<()> {
        if self.fail_description {
            return Err(ChirpError::ProfileUpdate("simulated API error".to_string()));
        }
        self.descriptions
            .lock()
            .unwrap()
            .push(description.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A corpus with one major unit per entry, `sizes[i]` minor units each.
/// Major unit `i` is labelled `M{i}`; minor unit `j` has text `t{i}.{j}` and
/// embedded label `L{j}`.
pub fn corpus_of(sizes: &[usize]) -> Corpus {
    Corpus {
        majors: sizes
            .iter()
            .enumerate()
            .map(|(i, &n)| MajorUnit {
                label: format!("M{i}"),
                minors: (0..n)
                    .map(|j| MinorUnit {
                        text: format!("t{i}.{j}"),
                        label: Some(format!("L{j}")),
                    })
                    .collect(),
            })
            .collect(),
    }
}

pub fn test_credentials() -> Credentials {
    Credentials {
        consumer_key: "ck".to_string(),
        consumer_secret: "cs".to_string(),
        access_token: "at".to_string(),
        access_token_secret: "ats".to_string(),
    }
}
