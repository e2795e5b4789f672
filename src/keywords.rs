//! Frequency-based keyword extraction.
//!
//! Plain token counting with a stopword list; deliberately not a
//! statistical NLP pipeline.

const STOPWORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "be", "because",
    "been", "but", "by", "can", "could", "do", "does", "for", "from", "had", "has", "have", "he",
    "her", "his", "how", "i", "if", "in", "into", "is", "it", "its", "just", "like", "may", "more",
    "most", "my", "no", "not", "of", "on", "one", "only", "or", "other", "our", "out", "over",
    "she", "should", "so", "some", "such", "than", "that", "the", "their", "them", "then", "there",
    "these", "they", "this", "to", "up", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "will", "with", "would", "you", "your",
];

/// Extract the most frequent non-stopword tokens from free text, most
/// frequent first. Ties keep first-seen order.
pub fn extract_keywords(text: &str, limit: usize) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();

    for token in text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() > 2 && !STOPWORDS.contains(t))
    {
        match counts.iter_mut().find(|(word, _)| word == token) {
            Some((_, count)) => *count += 1,
            None => counts.push((token.to_string(), 1)),
        }
    }

    // Stable sort keeps first-seen order on ties
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    counts.into_iter().map(|(word, _)| word).collect()
}
