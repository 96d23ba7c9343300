//! Work limits for malformed or hostile input
//!
//! The physics text carries no explicit lengths, so every loop that follows
//! links inside the data is bounded by one of these.

/// Maximum `next` hops taken while walking one hull face ring
///
/// A ring that has not closed after this many steps is cyclic without
/// passing through its start edge; the walk stops and the face is reported
/// as truncated.
pub const FACE_WALK_STEP_LIMIT: usize = 1000;

/// Maximum container nesting accepted by the document parser
///
/// Physics blocks nest well under a dozen levels. Parsing stops at this
/// depth and the tree built so far is kept.
pub const MAX_NESTING_DEPTH: usize = 128;
