// Core document types shared by extraction, splitting, and the vector store.

/// Source metadata carried from extraction through chunking into the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMetadata {
    /// Path of the originating file, as logged and persisted.
    pub source: String,
    pub content_type: String,
}

/// The extracted text of one input file.
#[derive(Debug, Clone)]
pub struct Document {
    pub content: String,
    pub metadata: DocumentMetadata,
}

/// One split piece of a `Document`, ready for embedding.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub content: String,
    pub metadata: DocumentMetadata,
    /// Position of this chunk within its source document, starting at 0.
    pub chunk_index: usize,
}
