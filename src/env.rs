//! Environment list merging.
//!
//! Entries are `KEY=VALUE` strings. The key is everything before the first
//! `=`; an entry without `=` is its own key. The empty key (`"=value"`) is an
//! ordinary key.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Return the key of an environment entry.
pub fn env_key(entry: &str) -> &str {
    split_env(entry).0
}

/// Split an environment entry into its key and value.
///
/// The value is `None` when the entry contains no `=`.
pub fn split_env(entry: &str) -> (&str, Option<&str>) {
    match entry.split_once('=') {
        Some((key, value)) => (key, Some(value)),
        None => (entry, None),
    }
}

/// Parse a `KEY=VALUE` command line argument.
///
/// Stricter than [`split_env`]: the `=` is required. The key may be empty,
/// matching how [`merge_env`] treats `"=value"`.
pub fn parse_env_spec(spec: &str) -> Result<(String, String)> {
    let (key, value) = spec.split_once('=').ok_or_else(|| Error::InvalidEnv {
        spec: spec.to_string(),
        reason: "expected KEY=VALUE",
    })?;
    Ok((key.to_string(), value.to_string()))
}

/// Merge `new` into `old`.
///
/// Entries of `new` whose key already appears in `old` replace the old entry
/// at its original position. All other entries of `new` are appended in the
/// order they appear. Entries are replaced whole; values are never combined.
///
/// The result holds at most one entry per key. A key repeated in `old` keeps
/// its first position and first entry (or the override, if any); the later
/// copies are dropped.
pub fn merge_env<S, T>(old: &[S], new: &[T]) -> Vec<String>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    let mut merged: Vec<String> = old.iter().map(|e| e.as_ref().to_owned()).collect();

    let mut slots: HashMap<&str, usize> = HashMap::with_capacity(old.len() + new.len());
    for (i, entry) in old.iter().enumerate() {
        slots.entry(env_key(entry.as_ref())).or_insert(i);
    }

    for entry in new {
        let entry = entry.as_ref();
        let key = env_key(entry);
        match slots.get(key) {
            Some(&i) => merged[i] = entry.to_owned(),
            None => {
                slots.insert(key, merged.len());
                merged.push(entry.to_owned());
            }
        }
    }

    tracing::trace!(
        base = old.len(),
        overrides = new.len(),
        merged = merged.len(),
        "merged environment"
    );

    if merged.len() == slots.len() {
        return merged;
    }

    // Duplicate keys in `old`: keep only the slot each key was first seen at.
    merged
        .into_iter()
        .enumerate()
        .filter(|(i, entry)| slots.get(env_key(entry)) == Some(i))
        .map(|(_, entry)| entry)
        .collect()
}
