//! Identity types supplied by the access-control collaborator.
//!
//! Taskquest never authenticates anyone. The transport layer resolves the
//! caller and hands the core a [`Principal`]; the core only stores employee
//! references.

use serde::{Deserialize, Serialize};

uuid_id! {
    /// Unique identifier for an employee (a user of the platform).
    EmployeeId
}

/// Authenticated caller as resolved by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    user_id: EmployeeId,
    is_superuser: bool,
}

impl Principal {
    /// Creates a principal for a regular employee.
    #[must_use]
    pub const fn employee(user_id: EmployeeId) -> Self {
        Self {
            user_id,
            is_superuser: false,
        }
    }

    /// Creates a principal with superuser rights.
    #[must_use]
    pub const fn superuser(user_id: EmployeeId) -> Self {
        Self {
            user_id,
            is_superuser: true,
        }
    }

    /// Returns the authenticated employee identifier.
    #[must_use]
    pub const fn user_id(self) -> EmployeeId {
        self.user_id
    }

    /// Returns whether the principal holds superuser rights.
    #[must_use]
    pub const fn is_superuser(self) -> bool {
        self.is_superuser
    }
}
