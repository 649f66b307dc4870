//! Domain services for Chorely.
//!
//! Services contain pure business rules that operate on domain models.

pub mod membership;
pub mod reassignment;

pub use membership::{require_admin, require_member, require_self_or_admin};
pub use reassignment::select_reassignee;
