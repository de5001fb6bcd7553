/// Messenger text message size limit, in characters.
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 2000;

/// Split text into chunks of at most `max_len` characters without breaking
/// words.
///
/// Words are accumulated greedily and joined with single spaces; runs of
/// whitespace (including newlines) between words collapse to one space. A
/// word longer than `max_len` is emitted as its own oversized chunk.
pub fn split(text: &str, max_len: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
            continue;
        }

        if current_len + 1 + word_len > max_len {
            chunks.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        } else {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
