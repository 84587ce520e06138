//! In-memory knowledge store.
//!
//! Holds the single growing text blob the assistant is grounded on.
//! Append-only: fragments arrive from the ingestors ([`crate::ingest`])
//! already labelled with their provenance, and are joined with one blank
//! line between them. Nothing is persisted; the store lives for the
//! session and is lost on exit.

/// The session's knowledge base: one ordered text value, mutated only by
/// [`append`](KnowledgeBase::append).
///
/// Individual fragments lose their identity once merged — there is no
/// per-fragment deletion or lookup. The full text is re-sent to the model
/// on every turn, so growth here grows every subsequent request payload.
#[derive(Debug, Default, Clone)]
pub struct KnowledgeBase {
    text: String,
}

impl KnowledgeBase {
    /// Create an empty knowledge base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment, separated from existing content by a blank line.
    ///
    /// The first fragment is not preceded by a separator, so after N
    /// appends the text is exactly the fragments joined by `"\n\n"`.
    pub fn append(&mut self, fragment: &str) {
        if !self.text.is_empty() {
            self.text.push_str("\n\n");
        }
        self.text.push_str(fragment);
    }

    /// The full knowledge text, as handed to the prompt builder.
    pub fn as_text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Size of the knowledge text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }
}
