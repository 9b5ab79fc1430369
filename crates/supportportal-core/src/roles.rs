//! Role definitions and the role → authority registry.
//!
//! Roles form a closed set. Each one maps to a fixed, ordered slice of
//! authority strings from [`crate::authorities`]. The registry is built once,
//! never mutated, and shared by every request without synchronization.
//!
//! Role names are matched case-insensitively, with or without the stored
//! `ROLE_` prefix, so `"admin"`, `"ADMIN"` and `"ROLE_ADMIN"` resolve to the
//! same role. Anything else is a [`RoleError::UnknownRole`]; there is no
//! default role.
//!
//! Authorities grow with rank by convention (ADMIN holds everything USER
//! holds), but the registry stores each set explicitly and never derives one
//! from another.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::authorities::{
    ADMIN_AUTHORITIES, HR_AUTHORITIES, MANAGER_AUTHORITIES, SUPER_ADMIN_AUTHORITIES,
    USER_AUTHORITIES,
};

const ROLE_PREFIX: &str = "ROLE_";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoleError {
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

/// A role assignable to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_USER")]
    User,
    #[serde(rename = "ROLE_HR")]
    Hr,
    #[serde(rename = "ROLE_MANAGER")]
    Manager,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
    #[serde(rename = "ROLE_SUPER_ADMIN")]
    SuperAdmin,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::User,
        Role::Hr,
        Role::Manager,
        Role::Admin,
        Role::SuperAdmin,
    ];

    /// Stored name of the role, e.g. `ROLE_ADMIN`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "ROLE_USER",
            Role::Hr => "ROLE_HR",
            Role::Manager => "ROLE_MANAGER",
            Role::Admin => "ROLE_ADMIN",
            Role::SuperAdmin => "ROLE_SUPER_ADMIN",
        }
    }

    fn bare_name(&self) -> &'static str {
        &self.as_str()[ROLE_PREFIX.len()..]
    }

    /// Authorities granted to this role, in issuance order.
    pub fn authorities(&self) -> &'static [&'static str] {
        RoleAuthorityRegistry::global().authorities_of(*self)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let trimmed = name.trim();
        let bare = match trimmed.get(..ROLE_PREFIX.len()) {
            Some(prefix) if prefix.eq_ignore_ascii_case(ROLE_PREFIX) => &trimmed[ROLE_PREFIX.len()..],
            _ => trimmed,
        };

        Role::ALL
            .into_iter()
            .find(|role| role.bare_name().eq_ignore_ascii_case(bare))
            .ok_or_else(|| RoleError::UnknownRole(name.to_string()))
    }
}

static REGISTRY: LazyLock<RoleAuthorityRegistry> = LazyLock::new(RoleAuthorityRegistry::new);

/// Read-only mapping from [`Role`] to its authority set.
#[derive(Debug)]
pub struct RoleAuthorityRegistry {
    grants: HashMap<Role, &'static [&'static str]>,
}

impl RoleAuthorityRegistry {
    fn new() -> Self {
        let grants = HashMap::from([
            (Role::User, USER_AUTHORITIES),
            (Role::Hr, HR_AUTHORITIES),
            (Role::Manager, MANAGER_AUTHORITIES),
            (Role::Admin, ADMIN_AUTHORITIES),
            (Role::SuperAdmin, SUPER_ADMIN_AUTHORITIES),
        ]);

        Self { grants }
    }

    /// The process-wide registry.
    pub fn global() -> &'static RoleAuthorityRegistry {
        &REGISTRY
    }

    /// Looks up the authorities of a role by name.
    ///
    /// # Errors
    ///
    /// Returns [`RoleError::UnknownRole`] if `role_name` is not one of the
    /// closed set of roles.
    pub fn authorities_for(&self, role_name: &str) -> Result<&'static [&'static str], RoleError> {
        let role: Role = role_name.parse()?;
        Ok(self.authorities_of(role))
    }

    pub fn authorities_of(&self, role: Role) -> &'static [&'static str] {
        // Every variant is inserted in `new`.
        self.grants.get(&role).copied().unwrap_or_default()
    }

    /// Owned copy of a role's authorities, ready to snapshot onto an account.
    pub fn snapshot(&self, role: Role) -> Vec<String> {
        self.authorities_of(role)
            .iter()
            .map(|authority| authority.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authorities::{USER_CREATE, USER_DELETE, USER_READ, USER_UPDATE};

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = RoleAuthorityRegistry::global();
        assert_eq!(
            registry.authorities_for("admin").unwrap(),
            registry.authorities_for("ADMIN").unwrap()
        );
        assert_eq!(
            registry.authorities_for("Admin").unwrap(),
            registry.authorities_for("role_admin").unwrap()
        );
    }

    #[test]
    fn test_unknown_role_is_an_error() {
        let result = RoleAuthorityRegistry::global().authorities_for("bogus");
        assert_eq!(result, Err(RoleError::UnknownRole("bogus".to_string())));
    }

    #[test]
    fn test_empty_role_name_is_an_error() {
        assert!(RoleAuthorityRegistry::global().authorities_for("").is_err());
        assert!(RoleAuthorityRegistry::global().authorities_for("ROLE_").is_err());
    }

    #[test]
    fn test_every_role_has_authorities() {
        for role in Role::ALL {
            assert!(!role.authorities().is_empty(), "{role} has no authorities");
        }
    }

    #[test]
    fn test_user_authorities() {
        assert_eq!(Role::User.authorities(), &[USER_READ]);
    }

    #[test]
    fn test_super_admin_authorities_are_ordered() {
        assert_eq!(
            Role::SuperAdmin.authorities(),
            &[USER_READ, USER_CREATE, USER_UPDATE, USER_DELETE]
        );
    }

    #[test]
    fn test_higher_ranks_include_user_authorities() {
        for role in Role::ALL {
            for authority in Role::User.authorities() {
                assert!(role.authorities().contains(authority));
            }
        }
        for authority in Role::Admin.authorities() {
            assert!(Role::SuperAdmin.authorities().contains(authority));
        }
    }

    #[test]
    fn test_role_round_trips_through_name() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_role_serializes_with_prefix() {
        let json = serde_json::to_string(&Role::SuperAdmin).unwrap();
        assert_eq!(json, r#""ROLE_SUPER_ADMIN""#);
    }

    #[test]
    fn test_snapshot_is_owned_copy() {
        let snapshot = RoleAuthorityRegistry::global().snapshot(Role::Hr);
        assert_eq!(snapshot, vec![USER_READ.to_string(), USER_UPDATE.to_string()]);
    }
}
