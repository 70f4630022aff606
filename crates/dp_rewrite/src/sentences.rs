//! Re-wraps rewritten text so paragraphs stay short.

/// Splits a paragraph into naive sentences, keeping the terminating
/// punctuation with each sentence.
fn split_sentences(paragraph: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    for c in paragraph.chars() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            let sentence = current.trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            current.clear();
        }
    }

    let rest = current.trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }
    sentences
}

/// Caps every paragraph at `max_sentences` sentences, starting a new
/// paragraph for the overflow. Existing paragraph breaks are kept.
pub fn limit_sentences_per_paragraph(text: &str, max_sentences: usize) -> String {
    if text.trim().is_empty() {
        return String::new();
    }
    let max_sentences = max_sentences.max(1);

    let mut paragraphs = Vec::new();
    for paragraph in text.split("\n\n") {
        if paragraph.trim().is_empty() {
            paragraphs.push(String::new());
            continue;
        }
        for group in split_sentences(paragraph).chunks(max_sentences) {
            paragraphs.push(group.join(" "));
        }
    }

    paragraphs.join("\n\n").trim().to_string()
}
