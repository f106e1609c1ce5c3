// Character-budget text splitter that prefers sentence and paragraph
// boundaries, with a configurable overlap carried between consecutive chunks.

use crate::document::{Chunk, Document};

#[derive(Debug, Clone)]
pub struct SplitterConfig {
    /// Soft maximum chunk length in bytes. A single segment longer than this
    /// still becomes one chunk rather than being cut mid-sentence.
    pub chunk_size: usize,
    /// How many trailing bytes of the previous chunk to repeat at the start
    /// of the next one, rounded down to whole segments.
    pub chunk_overlap: usize,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

pub struct TextSplitter {
    config: SplitterConfig,
}

impl TextSplitter {
    pub fn new(config: SplitterConfig) -> Self {
        Self { config }
    }

    /// Splits a document into chunks carrying its metadata and a sequential
    /// chunk index. Empty or whitespace-only content yields no chunks.
    pub fn split(&self, document: &Document) -> Vec<Chunk> {
        if document.content.trim().is_empty() {
            return Vec::new();
        }

        let segments = segment(&document.content);
        let merged = merge(&segments, self.config.chunk_size, self.config.chunk_overlap);

        merged
            .into_iter()
            .enumerate()
            .map(|(chunk_index, content)| Chunk {
                content,
                metadata: document.metadata.clone(),
                chunk_index,
            })
            .collect()
    }
}

/// Cuts text into segments ending at sentence boundaries (". ", "! ", "? ")
/// or paragraph breaks ("\n\n"). Every byte of the input lands in exactly
/// one segment, so concatenating the segments reproduces the text.
fn segment(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        // Boundary bytes are all ASCII, so slicing at i + 2 stays on a
        // char boundary even in multi-byte text.
        let is_boundary = match bytes[i] {
            b'.' | b'!' | b'?' => i + 1 < bytes.len() && bytes[i + 1] == b' ',
            b'\n' => i + 1 < bytes.len() && bytes[i + 1] == b'\n',
            _ => false,
        };

        if is_boundary {
            let end = i + 2;
            segments.push(&text[start..end]);
            start = end;
            i = end;
        } else {
            i += 1;
        }
    }

    if start < bytes.len() {
        segments.push(&text[start..]);
    }

    segments
}

/// Greedily packs segments into chunks of at most `chunk_size` bytes, then
/// seeds each new chunk with the trailing segments of the previous one up to
/// the `chunk_overlap` budget.
fn merge(segments: &[&str], chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();
    // Segments that make up `current`, kept so the overlap can be rebuilt
    // from whole segments instead of a byte slice.
    let mut current_segments: Vec<&str> = Vec::new();

    for &seg in segments {
        if !current.is_empty() && current.len() + seg.len() > chunk_size {
            if current.trim().is_empty() {
                // A whitespace-only run (extracted PDFs emit long blank
                // stretches) is dropped, not emitted or carried as overlap.
                current.clear();
                current_segments.clear();
            } else {
                chunks.push(std::mem::take(&mut current));

                let mut overlap_len = 0;
                let mut carried: Vec<&str> = Vec::new();
                for &prev in current_segments.iter().rev() {
                    if overlap_len + prev.len() > chunk_overlap {
                        break;
                    }
                    overlap_len += prev.len();
                    carried.push(prev);
                }
                carried.reverse();

                for prev in &carried {
                    current.push_str(prev);
                }
                current_segments = carried;
            }
        }

        current.push_str(seg);
        current_segments.push(seg);
    }

    if !current.trim().is_empty() {
        chunks.push(current);
    }

    chunks
}
