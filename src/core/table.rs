//! Shared word frequency table
//!
//! `WordTable` is a multiset of words guarded by one mutex. Workers share it
//! by reference during the ingest phase; once they have all joined, the owner
//! takes `&mut` (or ownership) and reads entries without locking.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::core::error::CountError;

/// One distinct word and the number of times it was seen
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    pub word: String,
    pub count: u64,
}

impl Entry {
    pub fn new(word: impl Into<String>, count: u64) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// Concurrent word -> count table
#[derive(Debug, Default)]
pub struct WordTable {
    words: Mutex<HashMap<Box<str>, u64>>,
}

impl WordTable {
    pub fn new() -> Self {
        Self::default()
    }

    // Every update is a single map operation, so a poisoned map is still
    // consistent and can be used as is.
    fn lock(&self) -> MutexGuard<'_, HashMap<Box<str>, u64>> {
        self.words.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up the current entry for `word`
    #[allow(dead_code)]
    pub fn find(&self, word: &str) -> Option<Entry> {
        self.lock().get(word).map(|&count| Entry::new(word, count))
    }

    /// Count one more occurrence of `word`, inserting it with count 1 if absent
    pub fn increment_or_insert(&self, word: &str) -> Result<Entry, CountError> {
        self.increment_or_insert_by(word, 1)
    }

    /// Count `n` more occurrences of `word` in one atomic step
    pub fn increment_or_insert_by(&self, word: &str, n: u64) -> Result<Entry, CountError> {
        debug_assert!(n >= 1, "increments must be positive");

        let mut words = self.lock();
        if let Some(count) = words.get_mut(word) {
            *count += n;
            return Ok(Entry::new(word, *count));
        }

        words
            .try_reserve(1)
            .map_err(|_| CountError::AllocationFailure {
                word_len: word.len(),
            })?;
        words.insert(Box::from(word), n);
        Ok(Entry::new(word, n))
    }

    /// Add a whole tally in one step: either every word is counted or none is
    pub fn merge(&self, tally: HashMap<String, u64>) -> Result<u64, CountError> {
        let mut words = self.lock();
        let missing = tally.keys().filter(|w| !words.contains_key(w.as_str())).count();
        words
            .try_reserve(missing)
            .map_err(|_| CountError::AllocationFailure {
                word_len: tally.keys().map(String::len).max().unwrap_or(0),
            })?;

        let mut merged = 0u64;
        for (word, n) in tally {
            match words.get_mut(word.as_str()) {
                Some(count) => *count += n,
                None => {
                    words.insert(word.into_boxed_str(), n);
                }
            }
            merged += n;
        }
        Ok(merged)
    }

    /// Number of distinct words
    ///
    /// Only a consistent snapshot once every mutator has stopped.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of every entry, in unspecified order
    #[allow(dead_code)]
    pub fn entries(&mut self) -> Vec<Entry> {
        self.words
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(word, &count)| Entry::new(word.as_ref(), count))
            .collect()
    }

    /// Consume the table, yielding its entries without copying the words
    pub fn into_entries(self) -> Vec<Entry> {
        self.words
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .into_iter()
            .map(|(word, count)| Entry::new(String::from(word), count))
            .collect()
    }

    /// Total number of word occurrences counted so far
    pub fn total(&self) -> u64 {
        self.lock().values().sum()
    }
}
