use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical text form of a status: trimmed, diacritics stripped, upper-cased,
/// every run of characters outside `A-Z0-9` collapsed into one `_`, with no
/// leading or trailing `_`.
///
/// `"  Em análise "` becomes `"EM_ANALISE"`. The function is idempotent.
pub fn normalize_text(raw: &str) -> String {
    let folded = raw
        .trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_uppercase);

    let mut out = String::with_capacity(raw.len());
    let mut gap = false;
    for c in folded {
        if c.is_ascii_alphanumeric() {
            if gap && !out.is_empty() {
                out.push('_');
            }
            gap = false;
            out.push(c);
        } else {
            gap = true;
        }
    }
    out
}

/// Lower-cased, diacritic-free form used as a collation key for text sorting.
pub(crate) fn fold_for_collation(raw: &str) -> String {
    raw.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
