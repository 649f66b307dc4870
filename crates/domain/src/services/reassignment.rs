//! Break-mode reassignment selection.
//!
//! When a member is paused, all of their pending assignments move to the
//! single lowest-scoring active member of the home. The ranking rule is
//! current-month points ascending, ties broken by user id ascending so the
//! outcome is deterministic.

use crate::models::leaderboard::MemberScore;

/// Selects the reassignment target from the eligible pool.
///
/// The pool must already exclude the paused member. Members with no
/// leaderboard entry carry a score of 0. Returns `None` for an empty pool,
/// in which case assignments stay with the paused member.
pub fn select_reassignee(pool: &[MemberScore]) -> Option<&MemberScore> {
    pool.iter().min_by(|a, b| {
        a.total_points
            .cmp(&b.total_points)
            .then(a.user_id.cmp(&b.user_id))
    })
}
