use rapidfuzz::distance::levenshtein as lev;

/// Unit-cost Levenshtein distance over Unicode scalar values
pub fn levenshtein(a: &str, b: &str) -> usize {
    lev::distance(a.chars(), b.chars())
}
