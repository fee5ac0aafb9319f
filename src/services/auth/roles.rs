/*
 * Responsibility
 * - 通過を許す role の集合 (ValidRoles) と VALID_ROLES のパース
 * - role 判定 (is_valid_role): role なし / 空 role は拒否
 */
use std::collections::BTreeSet;

/// Roles allowed through the access middleware.
pub const DEFAULT_VALID_ROLES: &[&str] = &["admin", "member"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRoles(BTreeSet<String>);

impl ValidRoles {
    /// Comma separated list, e.g. `admin,member`. Blank entries are dropped.
    pub fn parse(raw: &str) -> Self {
        raw.split(',').collect()
    }

    pub fn contains(&self, role: &str) -> bool {
        self.0.contains(role)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for ValidRoles {
    fn default() -> Self {
        DEFAULT_VALID_ROLES.iter().copied().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ValidRoles {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|s| s.as_ref().trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }
}

/// A user without a role is never authorized.
pub fn is_valid_role(role: Option<&str>, valid_roles: &ValidRoles) -> bool {
    role.is_some_and(|r| valid_roles.contains(r))
}
