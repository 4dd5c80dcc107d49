//! Permission system for account roles

use crate::error::{Error, Result};
use crate::models::{AccountRole, Caller};

/// Actions an authenticated caller can attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Own time tracking
    TrackTime,

    // Catalog
    ReadCatalog,
    ManageCatalog,

    // Administration
    ManageEmployees,
    ViewStatistics,
    ExportData,
    GenerateReports,
}

/// Permission matrix for account roles
pub struct PermissionMatrix;

impl PermissionMatrix {
    /// Check if a role has permission to perform an action
    pub fn can_perform(role: AccountRole, action: Action) -> bool {
        match action {
            // Open to every authenticated account
            Action::TrackTime | Action::ReadCatalog => role >= AccountRole::Employee,

            // Admin only
            Action::ManageCatalog
            | Action::ManageEmployees
            | Action::ViewStatistics
            | Action::ExportData
            | Action::GenerateReports => role == AccountRole::Admin,
        }
    }

    /// Fail with `PermissionDenied` unless the caller may perform the action
    pub fn require(caller: &Caller, action: Action) -> Result<()> {
        if Self::can_perform(caller.role, action) {
            Ok(())
        } else {
            Err(Error::PermissionDenied(format!(
                "{:?} requires a higher role than {}",
                action,
                caller.role.as_str()
            )))
        }
    }

    /// Fail with `PermissionDenied` unless the caller is an administrator
    pub fn require_admin(caller: &Caller) -> Result<()> {
        if caller.role == AccountRole::Admin {
            Ok(())
        } else {
            Err(Error::PermissionDenied("administrator role required".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn caller(role: AccountRole) -> Caller {
        Caller {
            id: Uuid::new_v4(),
            email: "someone@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn test_admin_permissions() {
        assert!(PermissionMatrix::can_perform(AccountRole::Admin, Action::ManageEmployees));
        assert!(PermissionMatrix::can_perform(AccountRole::Admin, Action::GenerateReports));
        assert!(PermissionMatrix::can_perform(AccountRole::Admin, Action::ReadCatalog));
    }

    #[test]
    fn test_employee_permissions() {
        assert!(PermissionMatrix::can_perform(AccountRole::Employee, Action::TrackTime));
        assert!(PermissionMatrix::can_perform(AccountRole::Employee, Action::ReadCatalog));
        assert!(!PermissionMatrix::can_perform(AccountRole::Employee, Action::ManageCatalog));
        assert!(!PermissionMatrix::can_perform(AccountRole::Employee, Action::ExportData));
    }

    #[test]
    fn test_require_admin() {
        assert!(PermissionMatrix::require_admin(&caller(AccountRole::Admin)).is_ok());
        assert!(matches!(
            PermissionMatrix::require_admin(&caller(AccountRole::Employee)),
            Err(Error::PermissionDenied(_))
        ));
        assert!(PermissionMatrix::require(&caller(AccountRole::Employee), Action::TrackTime).is_ok());
    }
}
