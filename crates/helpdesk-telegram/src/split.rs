// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Splitting of long replies into Telegram-sized chunks.

/// Largest chunk sent in one message, in bytes.
///
/// Telegram counts UTF-16 code units up to 4096; a byte budget below that
/// is always within the limit.
pub const MAX_CHUNK_BYTES: usize = 3800;

/// Splits `text` at the last boundary before `max_len` bytes.
///
/// Priority: double newline > single newline > space > hard split at a
/// character boundary. Whitespace at the split point is dropped.
pub fn split_at_paragraph_boundary(text: &str, max_len: usize) -> (&str, &str) {
    if text.len() <= max_len {
        return (text, "");
    }

    let mut cut = max_len;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    let search_region = &text[..cut];

    if let Some(pos) = search_region.rfind("\n\n").filter(|&p| p > 0) {
        return (&text[..pos], text[pos + 2..].trim_start());
    }

    if let Some(pos) = search_region.rfind('\n').filter(|&p| p > 0) {
        return (&text[..pos], text[pos + 1..].trim_start());
    }

    if let Some(pos) = search_region.rfind(' ').filter(|&p| p > 0) {
        return (&text[..pos], &text[pos + 1..]);
    }

    if cut == 0 {
        // A single character wider than the budget.
        cut = text.chars().next().map_or(text.len(), char::len_utf8);
    }
    (&text[..cut], &text[cut..])
}

/// Splits `text` into consecutive chunks of at most `max_len` bytes.
///
/// Text that fits is returned as a single chunk; empty text yields none.
pub fn split_message(text: &str, max_len: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let (chunk, tail) = split_at_paragraph_boundary(rest, max_len);
        if !chunk.is_empty() {
            chunks.push(chunk);
        }
        rest = tail;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(split_at_paragraph_boundary("Short text", 100), ("Short text", ""));
        assert_eq!(split_message("Short text", 100), vec!["Short text"]);
    }

    #[test]
    fn prefers_double_newline_over_single() {
        let text = "A\nB\n\nC\nD";
        let (first, rest) = split_at_paragraph_boundary(text, 6);
        assert_eq!(first, "A\nB");
        assert_eq!(rest, "C\nD");
    }

    #[test]
    fn falls_back_to_single_newline() {
        let text = "First line\nSecond line that is longer";
        let (first, rest) = split_at_paragraph_boundary(text, 20);
        assert_eq!(first, "First line");
        assert_eq!(rest, "Second line that is longer");
    }

    #[test]
    fn falls_back_to_space() {
        let text = "OneLongWordThen another word";
        let (first, rest) = split_at_paragraph_boundary(text, 20);
        assert_eq!(first, "OneLongWordThen");
        assert_eq!(rest, "another word");
    }

    #[test]
    fn hard_split_respects_char_boundaries() {
        // Each Cyrillic letter is two bytes; 7 is mid-character.
        let text = "абвгдежзий";
        let (first, rest) = split_at_paragraph_boundary(text, 7);
        assert_eq!(first, "абв");
        assert_eq!(rest, "гдежзий");
    }

    #[test]
    fn oversized_single_char_still_progresses() {
        let text = "😀😀";
        let (first, rest) = split_at_paragraph_boundary(text, 2);
        assert_eq!(first, "😀");
        assert_eq!(rest, "😀");
    }

    #[test]
    fn split_message_covers_all_text_within_budget() {
        let paragraph = "Тарифы на рассылку: 1 неделя — 2900 рублей.";
        let text = vec![paragraph; 200].join("\n\n");

        let chunks = split_message(&text, MAX_CHUNK_BYTES);
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.len() <= MAX_CHUNK_BYTES));
        assert_eq!(chunks.join("\n\n"), text);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(split_message("", MAX_CHUNK_BYTES).is_empty());
    }
}
