//! Ownership guard: existence and ownership checks for mutating operations.
//!
//! Callers must run these in order: lookup, [`resolve_or_404`],
//! [`require_ownership`], then mutate. A record that does not exist reports
//! `NotFound` to every caller, owner or not.
//!
//! - No IO
//! - No panics

use crate::entity::Owned;
use crate::error::{DomainError, DomainResult};
use crate::id::UserId;

/// Turn an empty lookup into `NotFound`.
pub fn resolve_or_404<T>(record: Option<T>) -> DomainResult<T> {
    record.ok_or_else(DomainError::not_found)
}

/// Fail with `Forbidden` unless `caller` owns `record`.
pub fn require_ownership<T: Owned + ?Sized>(caller: UserId, record: &T) -> DomainResult<()> {
    if record.owner() == caller {
        Ok(())
    } else {
        Err(DomainError::Forbidden)
    }
}
