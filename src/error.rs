use thiserror::Error;

/// Failures while turning tabular text into a [`crate::ir::FishboneTree`].
///
/// The tree itself cannot be malformed once built (its depth is fixed by the
/// types), so ingestion is the only place structural problems can surface.
/// Empty input is not an error: it yields an empty tree, which renders as a
/// bare spine and head.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("line {line}: unterminated quoted cell")]
    UnterminatedQuote { line: usize },
}
