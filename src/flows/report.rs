//! Report ordering
//!
//! Turns the quiescent table into a deterministic sequence of entries. Words
//! are unique within a table, so breaking count ties by word makes every
//! built-in order total and the output independent of table layout or worker
//! interleaving.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "parallel")]
use rayon::slice::ParallelSliceMut;

use crate::core::table::{Entry, WordTable};

/// Built-in report orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Most frequent first; ties in ascending word order
    #[default]
    CountDesc,
    /// Least frequent first; ties in ascending word order
    CountAsc,
    /// Ascending word order
    Word,
}

impl SortOrder {
    pub fn compare(&self, a: &Entry, b: &Entry) -> Ordering {
        match self {
            SortOrder::CountDesc => b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)),
            SortOrder::CountAsc => a.count.cmp(&b.count).then_with(|| a.word.cmp(&b.word)),
            SortOrder::Word => a.word.cmp(&b.word),
        }
    }

    pub fn available() -> &'static [&'static str] {
        &["count", "count-asc", "word"]
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortOrder::CountDesc => "count",
            SortOrder::CountAsc => "count-asc",
            SortOrder::Word => "word",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "count" | "count-desc" | "desc" => Ok(SortOrder::CountDesc),
            "count-asc" | "asc" => Ok(SortOrder::CountAsc),
            "word" | "alpha" => Ok(SortOrder::Word),
            _ => Err(format!(
                "Unknown sort order: {}. Available: {}",
                s,
                SortOrder::available().join(", ")
            )),
        }
    }
}

/// Stable sort by a caller-supplied ordering
pub fn sort_entries_by<F>(entries: &mut [Entry], compare: F)
where
    F: Fn(&Entry, &Entry) -> Ordering + Sync,
{
    #[cfg(feature = "parallel")]
    entries.par_sort_by(compare);

    #[cfg(not(feature = "parallel"))]
    entries.sort_by(compare);
}

pub fn sort_entries(entries: &mut [Entry], order: SortOrder) {
    sort_entries_by(entries, |a, b| order.compare(a, b));
}

/// Drain a finished table into its sorted report, keeping at most `top` entries
pub fn build_report(table: WordTable, order: SortOrder, top: Option<usize>) -> Vec<Entry> {
    let mut entries = table.into_entries();
    sort_entries(&mut entries, order);
    if let Some(top) = top {
        entries.truncate(top);
    }
    entries
}
