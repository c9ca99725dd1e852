//! Locale-aware string ordering for catalog labels.
//!
//! Product names and categories are Portuguese, so plain byte ordering would
//! put "Áudio" after "Wearables" and "apple" after "Zebra". Comparison here
//! follows the usual collation levels:
//!
//! 1. base letters, ignoring case and Latin diacritics
//! 2. diacritics (unaccented sorts first)
//! 3. case (lowercase sorts first)

use std::cmp::Ordering;

/// Compare two strings the way a pt-BR collator would for catalog labels.
pub fn compare(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| lowercase(a).cmp(lowercase(b)))
        .then_with(|| case_order(a, b))
}

fn primary_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase).map(strip_diacritic)
}

fn lowercase(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

fn case_order(a: &str, b: &str) -> Ordering {
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca == cb {
            continue;
        }
        match (ca.is_uppercase(), cb.is_uppercase()) {
            (false, true) => return Ordering::Less,
            (true, false) => return Ordering::Greater,
            _ => return ca.cmp(&cb),
        }
    }
    a.chars().count().cmp(&b.chars().count())
}

fn strip_diacritic(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}
