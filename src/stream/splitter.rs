//! Newline-delimited record splitting.
//!
//! Text fragments arrive with arbitrary boundaries. The splitter keeps the
//! unterminated tail between calls and only ever hands out complete lines.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// What to do with an unterminated record left over at end-of-stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailingRecordPolicy {
    /// Drop the tail; only newline-terminated records count
    #[default]
    Discard,
    /// Emit the tail as one final record
    Flush,
}

/// Splits decoded text into records.
#[derive(Debug, Default)]
pub struct RecordSplitter {
    buffer: String,
    policy: TrailingRecordPolicy,
}

impl RecordSplitter {
    pub fn new(policy: TrailingRecordPolicy) -> Self {
        Self {
            buffer: String::new(),
            policy,
        }
    }

    /// Feed one fragment and return every record it completed.
    ///
    /// A trailing `\r` is removed from each record and blank records are
    /// skipped.
    pub fn push(&mut self, fragment: &str) -> Vec<String> {
        self.buffer.push_str(fragment);

        if !fragment.contains('\n') {
            return Vec::new();
        }

        let Some(last_newline) = self.buffer.rfind('\n') else {
            return Vec::new();
        };

        let tail = self.buffer.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.buffer, tail);

        complete
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect()
    }

    /// End of stream: apply the trailing record policy to whatever is left.
    pub fn finish(&mut self) -> Option<String> {
        let tail = std::mem::take(&mut self.buffer);
        let tail = tail.strip_suffix('\r').unwrap_or(&tail);

        if tail.trim().is_empty() {
            return None;
        }

        match self.policy {
            TrailingRecordPolicy::Discard => {
                debug!(bytes = tail.len(), "Discarding unterminated trailing record");
                None
            }
            TrailingRecordPolicy::Flush => Some(tail.to_string()),
        }
    }

    /// The buffered, not yet terminated text
    pub fn pending(&self) -> &str {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_all(fragments: &[&str], policy: TrailingRecordPolicy) -> Vec<String> {
        let mut splitter = RecordSplitter::new(policy);
        let mut records: Vec<String> = fragments.iter().flat_map(|f| splitter.push(f)).collect();
        records.extend(splitter.finish());
        records
    }

    #[test]
    fn test_single_fragment_many_records() {
        let records = split_all(&["a\nb\nc\n"], TrailingRecordPolicy::Discard);
        assert_eq!(records, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_record_split_across_fragments() {
        let mut splitter = RecordSplitter::default();
        assert!(splitter.push(r#"{"type":"te"#).is_empty());
        assert_eq!(splitter.pending(), r#"{"type":"te"#);
        assert_eq!(
            splitter.push("xt\",\"content\":\"Hi\"}\n{\"ty"),
            vec![r#"{"type":"text","content":"Hi"}"#]
        );
        assert_eq!(splitter.pending(), r#"{"ty"#);
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let records = split_all(&["one\r\n\r\n   \ntwo\r", "\n\n"], TrailingRecordPolicy::Discard);
        assert_eq!(records, vec!["one", "two"]);
    }

    #[test]
    fn test_trailing_record_discarded_by_default() {
        let records = split_all(&["done\npartial"], TrailingRecordPolicy::default());
        assert_eq!(records, vec!["done"]);
    }

    #[test]
    fn test_trailing_record_flushed() {
        let records = split_all(&["done\npartial\r"], TrailingRecordPolicy::Flush);
        assert_eq!(records, vec!["done", "partial"]);
    }

    #[test]
    fn test_whitespace_tail_never_flushed() {
        let records = split_all(&["done\n  "], TrailingRecordPolicy::Flush);
        assert_eq!(records, vec!["done"]);
    }

    #[test]
    fn test_chunk_boundary_invariance() {
        let input = "{\"type\":\"text\",\"content\":\"Hi\"}\r\nnot json\n\n{\"type\":\"audio\",\"audio_url\":\"u\",\"unit\":\"U1\"}\nlast";
        let expected = split_all(&[input], TrailingRecordPolicy::Flush);

        // every way of cutting the input in two
        for cut in 0..=input.len() {
            if !input.is_char_boundary(cut) {
                continue;
            }
            let (left, right) = input.split_at(cut);
            assert_eq!(
                split_all(&[left, right], TrailingRecordPolicy::Flush),
                expected,
                "cut at {}",
                cut
            );
        }

        // one character at a time
        let singles: Vec<String> = input.chars().map(String::from).collect();
        let singles: Vec<&str> = singles.iter().map(String::as_str).collect();
        assert_eq!(split_all(&singles, TrailingRecordPolicy::Flush), expected);
    }
}
