//! Keyword extraction
//!
//! Not a real keyphrase model: the first few distinct long tokens, kept in
//! order of appearance and in their original casing.

/// Extract up to `limit` distinct whitespace-delimited tokens longer than
/// `min_chars` characters
///
/// # Example
///
/// ```
/// use mindguard::features::text::keywords::extract_keywords;
///
/// let keywords = extract_keywords("work has been really really heavy lately", 5, 4);
/// assert_eq!(keywords, vec!["really", "heavy", "lately"]);
/// ```
pub fn extract_keywords(text: &str, limit: usize, min_chars: usize) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::with_capacity(limit);

    for token in text.split_whitespace() {
        if keywords.len() >= limit {
            break;
        }
        if token.chars().count() <= min_chars {
            continue;
        }
        if keywords.iter().any(|k| k == token) {
            continue;
        }
        keywords.push(token.to_string());
    }

    keywords
}
