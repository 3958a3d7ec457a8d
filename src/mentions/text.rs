//! Char-indexed string helpers
//!
//! Every offset handled by this crate counts Unicode scalar values, not bytes.
//! These helpers convert between the two and never panic on out-of-range
//! offsets: anything past the end is clamped to the end, and an inverted
//! range yields an empty slice.

/// Number of chars in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset of the char at `char_index`, clamped to `text.len()`.
pub fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Char offset of the byte offset `byte_index` (which must sit on a char boundary).
pub fn char_offset(text: &str, byte_index: usize) -> usize {
    char_len(&text[..byte_index.min(text.len())])
}

/// Slice `text` between two char offsets.
pub fn slice(text: &str, start: usize, end: usize) -> &str {
    if start >= end {
        return "";
    }
    let start_byte = byte_offset(text, start);
    let end_byte = byte_offset(text, end);
    &text[start_byte..end_byte]
}

/// Everything from the char offset `start` to the end of `text`.
pub fn slice_from(text: &str, start: usize) -> &str {
    &text[byte_offset(text, start)..]
}

/// Replace the chars in `start..end` with `insert`, returning a new string.
///
/// When `end < start` the text between them is kept twice, matching a plain
/// `prefix + insert + suffix` concatenation.
pub fn splice_string(text: &str, start: usize, end: usize, insert: &str) -> String {
    let start_byte = byte_offset(text, start);
    let end_byte = byte_offset(text, end);
    let mut result = String::with_capacity(text.len() + insert.len());
    result.push_str(&text[..start_byte]);
    result.push_str(insert);
    result.push_str(&text[end_byte..]);
    result
}

/// Length (in chars) of the longest common prefix of `a` and `b`.
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

/// Char offset of the last occurrence of `needle` in `haystack`.
pub fn rfind(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .rfind(needle)
        .map(|byte| char_offset(haystack, byte))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_counts_chars() {
        assert_eq!(slice("héllo", 1, 3), "él");
        assert_eq!(slice("héllo", 3, 1), "");
        assert_eq!(slice("héllo", 2, 99), "llo");
    }

    #[test]
    fn test_splice_string() {
        assert_eq!(splice_string("Hi John", 3, 7, "Jane"), "Hi Jane");
        assert_eq!(splice_string("abc", 1, 1, "X"), "aXbc");
        assert_eq!(splice_string("abc", 5, 9, "!"), "abc!");
    }

    #[test]
    fn test_common_prefix_len() {
        assert_eq!(common_prefix_len("teh cat", "the cat"), 1);
        assert_eq!(common_prefix_len("same", "same"), 4);
        assert_eq!(common_prefix_len("", "x"), 0);
    }

    #[test]
    fn test_rfind_returns_char_offset() {
        assert_eq!(rfind("çaça", "ça"), Some(2));
        assert_eq!(rfind("abc", "z"), None);
        assert_eq!(rfind("abc", ""), Some(3));
    }

    #[test]
    fn test_char_offset() {
        assert_eq!(char_offset("héllo", 3), 2);
        assert_eq!(char_offset("abc", 10), 3);
    }
}
