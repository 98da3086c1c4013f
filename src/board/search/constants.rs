//! Search constants.

// ============================================================================
// SCORES
// ============================================================================

/// Score bound standing in for infinity. Negation never overflows.
pub const INFINITY: i32 = 9_999_999;

/// Base score of a side that is checkmated. The remaining depth is subtracted
/// so mates nearer the root score lower for the mated side.
pub const CHECKMATE: i32 = -1_000_000;

/// Score of a side with no legal moves that is not in check
pub const STALEMATE: i32 = 0;

/// Returned by any node once cancellation is observed; never trusted
pub const CANCELLED: i32 = 0;

/// Scores at or below `-MATE_THRESHOLD` (or at or above it) are forced mates
pub const MATE_THRESHOLD: i32 = -CHECKMATE - 1_000;

// ============================================================================
// MOVE ORDERING PRIORITIES
// ============================================================================
// Higher scores = tried earlier. Killers > captures (MVV-LVA) > quiet

/// Quiet move that caused a beta cutoff at the same ply
pub const KILLER_SCORE: i32 = 1000;

/// Tie-break added to any promotion
pub const PROMOTION_BONUS: i32 = 1;

// ============================================================================
// CANCELLATION
// ============================================================================

/// Nodes between stop-flag polls, as a power of two
pub const DEFAULT_POLL_INTERVAL_LOG2: u32 = 14;
