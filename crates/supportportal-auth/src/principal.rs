use serde::{Deserialize, Serialize};

/// The authenticated identity resolved for a request.
///
/// Authorities keep the order they were given in (first occurrence wins on
/// duplicates) so that issuing twice from the same inputs yields the same
/// claims. Authorization checks treat them as a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    username: String,
    authorities: Vec<String>,
}

impl Principal {
    pub fn new<I, A>(username: impl Into<String>, authorities: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for authority in authorities {
            let authority = authority.into();
            if !unique.contains(&authority) {
                unique.push(authority);
            }
        }

        Self {
            username: username.into(),
            authorities: unique,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn authorities(&self) -> &[String] {
        &self.authorities
    }

    /// Check if the principal has a specific authority
    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a == authority)
    }

    /// Check if the principal has any of the specified authorities
    pub fn has_any_authority(&self, authorities: &[&str]) -> bool {
        authorities.iter().any(|a| self.has_authority(a))
    }

    /// Check if the principal has all of the specified authorities
    pub fn has_all_authorities(&self, authorities: &[&str]) -> bool {
        authorities.iter().all(|a| self.has_authority(a))
    }
}
