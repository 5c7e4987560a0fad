//! Owner filter selection.

/// Owner restriction applied to the repository listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FilterMode {
    /// Every repository visible to the token.
    #[default]
    None,

    /// Only repositories owned by the token's own user.
    CurrentUser,

    /// Only repositories owned by the named account or organization.
    NamedUser(String),
}

impl FilterMode {
    /// Resolves the filter from the `--onlyme` and `--user` flags.
    ///
    /// `--onlyme` takes precedence when both are given. An empty user name
    /// counts as no filter.
    #[must_use]
    pub fn from_flags(only_me: bool, user: Option<&str>) -> Self {
        if only_me {
            return Self::CurrentUser;
        }
        match user {
            Some(name) if !name.is_empty() => Self::NamedUser(name.to_string()),
            _ => Self::None,
        }
    }
}
