//! Recursive character splitter.
//!
//! Tries coarse separators first (paragraphs, lines, sentences, words) and
//! only falls back to single characters for runs with no break at all.
//! Pieces are then packed greedily into chunks of at most `chunk_size`
//! characters, carrying up to `chunk_overlap` characters into the next chunk.
//! Lengths are counted in `char`s so CJK text splits cleanly.

use std::collections::VecDeque;

/// Separators in the order they are tried. The empty string means
/// "split into characters".
const SEPARATORS: &[&str] = &["\n\n", "\n", ". ", "。", "! ", "? ", "; ", " ", ""];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextSplitter {
    /// `chunk_size` is clamped to at least 1 and `chunk_overlap` to below it.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            chunk_overlap: chunk_overlap.min(chunk_size - 1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Split `text` into trimmed, non-empty chunks.
    pub fn split(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        if char_len(text) <= self.chunk_size {
            return vec![text.trim().to_string()];
        }
        let mut pieces = Vec::new();
        self.atomize(text, SEPARATORS, &mut pieces);
        self.merge(pieces)
    }

    /// Break `text` into pieces no longer than `chunk_size`, keeping each
    /// separator attached to the piece it ends.
    fn atomize<'a>(&self, text: &'a str, separators: &[&str], out: &mut Vec<&'a str>) {
        if char_len(text) <= self.chunk_size {
            out.push(text);
            return;
        }
        let Some(pos) = separators
            .iter()
            .position(|sep| sep.is_empty() || text.contains(sep))
        else {
            out.push(text);
            return;
        };
        let separator = separators[pos];
        let rest = &separators[pos + 1..];

        if separator.is_empty() {
            let mut start = 0;
            for (i, _) in text.char_indices().skip(1) {
                out.push(&text[start..i]);
                start = i;
            }
            out.push(&text[start..]);
            return;
        }
        for piece in text.split_inclusive(separator) {
            self.atomize(piece, rest, out);
        }
    }

    fn merge(&self, pieces: Vec<&str>) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut window: VecDeque<(&str, usize)> = VecDeque::new();
        let mut total = 0;

        for piece in pieces {
            let len = char_len(piece);
            if total + len > self.chunk_size && !window.is_empty() {
                push_chunk(&mut chunks, &window);
                while total > self.chunk_overlap || (total > 0 && total + len > self.chunk_size) {
                    match window.pop_front() {
                        Some((_, front)) => total -= front,
                        None => break,
                    }
                }
            }
            window.push_back((piece, len));
            total += len;
        }
        if !window.is_empty() {
            push_chunk(&mut chunks, &window);
        }
        chunks
    }
}

fn push_chunk(chunks: &mut Vec<String>, window: &VecDeque<(&str, usize)>) {
    let joined: String = window.iter().map(|(p, _)| *p).collect();
    let trimmed = joined.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
