//! Typed ID definitions for all domain entities.
//!
//! ```rust
//! use classroom_core::common::{GroupId, SessionId};
//!
//! let group_id = GroupId::from_i64(7);
//! let session_id = SessionId::from_i64(42);
//!
//! // This would be a compile error:
//! // let wrong: SessionId = group_id;
//! ```

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Member entities (authenticated actors).
pub struct Member;

/// Marker type for Group entities (class rosters).
pub struct Group;

/// Marker type for Session entities (scheduled occurrences of a group).
pub struct Session;

/// Marker type for AbsenceRequest entities.
pub struct AbsenceRequest;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for Member entities. Actors are not persisted by this crate.
pub type MemberId = Id<Member>;

/// Typed ID for Group entities.
pub type GroupId = Id<Group>;

/// Typed ID for Session entities.
pub type SessionId = Id<Session>;

/// Typed ID for AbsenceRequest entities.
pub type AbsenceRequestId = Id<AbsenceRequest>;
