//! Paragraph-aligned chunking for rewrite requests.

/// Greedily packs paragraphs into chunks of at most `limit` characters,
/// counting the two-character paragraph separator. A paragraph is never
/// split across chunks; a single paragraph longer than `limit` becomes
/// a chunk of its own.
pub fn pack_paragraphs(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0usize;

    for paragraph in text.split("\n\n") {
        let paragraph_len = paragraph.chars().count();
        if current_len + paragraph_len + 2 > limit && !current.is_empty() {
            chunks.push(current.join("\n\n"));
            current = vec![paragraph];
            current_len = paragraph_len;
        } else {
            current.push(paragraph);
            current_len += paragraph_len + 2;
        }
    }

    if !current.is_empty() {
        chunks.push(current.join("\n\n"));
    }

    chunks
}
