//! Ownership trait shared by owned records.

use crate::id::UserId;

/// A record that belongs to exactly one user.
///
/// The owner is fixed when the record is created.
pub trait Owned {
    fn owner(&self) -> UserId;
}
