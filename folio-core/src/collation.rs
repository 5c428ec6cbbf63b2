//! Locale-aware string ordering for title and category sorts.
//!
//! Approximates the default (root/`en`) collation: strings are first compared
//! on a primary key that ignores accents and case, then accents, then case
//! with lowercase ordered before uppercase. Strings that differ in none of
//! these compare equal, which leaves their order to the stable sort.

use deunicode::deunicode;
use std::cmp::Ordering;

/// Compare two strings the way a reader expects an alphabetical list
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| tertiary_cmp(a, b))
}

/// Transliterated, lowercased text
fn primary_key(s: &str) -> String {
    deunicode(s).to_lowercase()
}

/// Lowercased text with accents intact
fn secondary_key(s: &str) -> String {
    s.to_lowercase()
}

fn tertiary_cmp(a: &str, b: &str) -> Ordering {
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca == cb {
            continue;
        }
        match (ca.is_lowercase(), cb.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => return ca.cmp(&cb),
        }
    }
    a.chars().count().cmp(&b.chars().count())
}
