//! # Tag Index
//!
//! Tags are `#word` tokens in note content (`#project`, `#weekly-review`).
//! Markdown headings (`## Heading`) and mid-word hashes (`issue#12`) are not
//! tags. Tags are case-insensitive and always stored lowercase.
//!
//! Nothing here is persisted: the index is rebuilt from disk whenever the
//! tags view is opened.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;
use std::sync::LazyLock;

use log::warn;
use regex::Regex;

use crate::core::error::StoreError;
use crate::core::store::{Collection, ContentStore, ListEntry};

/// `#tag` at the start of the text or after a character that is neither
/// `#` nor a word character.
static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^#\w])#([\w-]+)").expect("tag pattern is valid")
});

/// Collections in scan order.
const SCAN_ORDER: [Collection; 2] = [Collection::Journal, Collection::Notes];

/// Extract the distinct, lowercased tags in `content`.
pub fn extract_tags(content: &str) -> BTreeSet<String> {
    TAG_PATTERN
        .captures_iter(content)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Byte ranges of every `#tag` token in `content`, hash included.
pub fn tag_ranges(content: &str) -> Vec<Range<usize>> {
    TAG_PATTERN
        .captures_iter(content)
        .filter_map(|c| c.get(1))
        .map(|m| m.start() - 1..m.end())
        .collect()
}

/// Count, for every tag, how many files mention it at least once.
pub fn index_all(store: &dyn ContentStore) -> Result<BTreeMap<String, usize>, StoreError> {
    let mut counts = BTreeMap::new();
    for (_, content) in scan(store)? {
        for tag in extract_tags(&content) {
            *counts.entry(tag).or_insert(0) += 1;
        }
    }
    Ok(counts)
}

/// Files containing `tag` (leading `#` and case ignored): journal entries
/// first, then notes, each in list order.
pub fn find_by_tag(store: &dyn ContentStore, tag: &str) -> Result<Vec<ListEntry>, StoreError> {
    let wanted = normalize(tag);
    Ok(scan(store)?
        .into_iter()
        .filter(|(_, content)| extract_tags(content).contains(&wanted))
        .map(|(entry, _)| entry)
        .collect())
}

/// Tags ordered by count descending, then name ascending.
pub fn sorted_counts(index: &BTreeMap<String, usize>) -> Vec<(String, usize)> {
    let mut tags: Vec<(String, usize)> = index.iter().map(|(t, c)| (t.clone(), *c)).collect();
    tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    tags
}

fn normalize(tag: &str) -> String {
    tag.trim().trim_start_matches('#').to_lowercase()
}

/// Every readable file across both collections with its content.
fn scan(store: &dyn ContentStore) -> Result<Vec<(ListEntry, String)>, StoreError> {
    let mut files = Vec::new();
    for collection in SCAN_ORDER {
        for entry in store.list(collection)? {
            match store.read(collection, &entry.id) {
                Ok(content) => files.push((entry, content)),
                Err(e) => warn!("Skipping {} while indexing tags: {}", entry.id, e),
            }
        }
    }
    Ok(files)
}
