//! Word tokenizer
//!
//! Splits a byte stream into words lazily, reading through `BufRead` so a
//! source is never held in memory as a whole.
//!
//! Rules:
//! - a word is a run of ASCII letters; every other byte separates words
//! - words are lowercased unless `lowercase` is off
//! - runs shorter than `min_len` are dropped
//! - runs longer than `max_len` are cut into `max_len`-sized words

use serde::{Deserialize, Serialize};
use std::io::{self, BufRead};

/// Default minimum word length (single letters are not words)
pub const DEFAULT_MIN_LEN: usize = 2;

/// Default maximum word length
pub const DEFAULT_MAX_LEN: usize = 64;

/// Tokenizer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizerConfig {
    pub min_len: usize,
    pub max_len: usize,
    pub lowercase: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            min_len: DEFAULT_MIN_LEN,
            max_len: DEFAULT_MAX_LEN,
            lowercase: true,
        }
    }
}

impl TokenizerConfig {
    /// Tokenize `reader` with this configuration
    pub fn words<R: BufRead>(&self, reader: R) -> Words<R> {
        Words::new(reader, *self)
    }
}

/// Lazy iterator over the words of a reader
///
/// Yields at most one `Err`, after which the sequence is finished.
pub struct Words<R> {
    reader: R,
    config: TokenizerConfig,
    current: Vec<u8>,
    done: bool,
}

impl<R: BufRead> Words<R> {
    pub fn new(reader: R, config: TokenizerConfig) -> Self {
        let max_len = config.max_len.max(1);
        Self {
            reader,
            config: TokenizerConfig { max_len, ..config },
            current: Vec::with_capacity(max_len),
            done: false,
        }
    }
}

/// Scan `buf` for the next word boundary.
///
/// Returns how many bytes were consumed and the word completed within them,
/// if any. Letters of an unfinished word stay in `current`.
fn scan(buf: &[u8], current: &mut Vec<u8>, config: &TokenizerConfig) -> (usize, Option<String>) {
    for (i, &b) in buf.iter().enumerate() {
        if b.is_ascii_alphabetic() {
            if current.len() == config.max_len {
                // Leave `b` unconsumed; it starts the next word.
                if let Some(word) = take_word(current, config) {
                    return (i, Some(word));
                }
            }
            current.push(if config.lowercase {
                b.to_ascii_lowercase()
            } else {
                b
            });
        } else if let Some(word) = take_word(current, config) {
            return (i + 1, Some(word));
        }
    }
    (buf.len(), None)
}

fn take_word(current: &mut Vec<u8>, config: &TokenizerConfig) -> Option<String> {
    if current.is_empty() {
        return None;
    }
    let long_enough = current.len() >= config.min_len;
    // Only ASCII letters are ever pushed.
    let word: String = current.drain(..).map(char::from).collect();
    long_enough.then_some(word)
}

impl<R: BufRead> Iterator for Words<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let (consumed, word) = match self.reader.fill_buf() {
                Ok([]) => {
                    self.done = true;
                    (0, take_word(&mut self.current, &self.config))
                }
                Ok(buf) => scan(buf, &mut self.current, &self.config),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };
            self.reader.consume(consumed);
            if word.is_some() {
                return word.map(Ok);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor, Read};

    fn words_of(input: &str, config: TokenizerConfig) -> Vec<String> {
        config
            .words(Cursor::new(input.as_bytes()))
            .collect::<io::Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_basic_split_and_lowercase() {
        let words = words_of("The quick, brown FOX!", TokenizerConfig::default());
        assert_eq!(words, vec!["the", "quick", "brown", "fox"]);
    }

    #[test]
    fn test_drops_short_runs() {
        let words = words_of("a bb c dd", TokenizerConfig::default());
        assert_eq!(words, vec!["bb", "dd"]);

        let config = TokenizerConfig {
            min_len: 1,
            ..Default::default()
        };
        assert_eq!(words_of("a bb c", config), vec!["a", "bb", "c"]);
    }

    #[test]
    fn test_digits_and_non_ascii_separate() {
        let words = words_of("abc123def caf\u{e9}s", TokenizerConfig::default());
        assert_eq!(words, vec!["abc", "def", "caf"]);
    }

    #[test]
    fn test_keep_case() {
        let config = TokenizerConfig {
            lowercase: false,
            ..Default::default()
        };
        assert_eq!(words_of("Hello World", config), vec!["Hello", "World"]);
    }

    #[test]
    fn test_long_runs_are_split() {
        let config = TokenizerConfig {
            min_len: 1,
            max_len: 4,
            lowercase: true,
        };
        assert_eq!(words_of("abcdefghij", config), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_empty_and_separator_only_input() {
        assert!(words_of("", TokenizerConfig::default()).is_empty());
        assert!(words_of(" \n\t...42", TokenizerConfig::default()).is_empty());
    }

    #[test]
    fn test_words_span_buffer_boundaries() {
        // A two-byte buffer forces every word across several fill_buf calls.
        let reader = BufReader::with_capacity(2, Cursor::new(b"hello there world".to_vec()));
        let words: Vec<String> = TokenizerConfig::default()
            .words(reader)
            .collect::<io::Result<_>>()
            .unwrap();
        assert_eq!(words, vec!["hello", "there", "world"]);
    }

    struct FailAfter {
        data: Cursor<Vec<u8>>,
    }

    impl Read for FailAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(io::Error::new(io::ErrorKind::Other, "device lost")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn test_read_error_ends_sequence() {
        let reader = BufReader::new(FailAfter {
            data: Cursor::new(b"one two ".to_vec()),
        });
        let mut words = TokenizerConfig::default().words(reader);
        assert_eq!(words.next().unwrap().unwrap(), "one");
        assert_eq!(words.next().unwrap().unwrap(), "two");
        assert!(words.next().unwrap().is_err());
        assert!(words.next().is_none());
    }
}
