//! Repository descriptors returned by the Gitea API.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// A repository visible to the access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDescriptor {
    /// Repository name.
    pub name: String,

    /// URL passed to `git clone`.
    pub clone_url: String,

    /// Full repository name in "owner/name" format.
    pub full_name: String,
}

impl RepositoryDescriptor {
    /// Returns the owner segment: everything before the first `/`.
    #[must_use]
    pub fn owner(&self) -> &str {
        self.full_name
            .split_once('/')
            .map_or(self.full_name.as_str(), |(owner, _)| owner)
    }

    /// Returns the local destination of this repository under `base`.
    ///
    /// Returns `None` when the full name would resolve outside `base`.
    #[must_use]
    pub fn destination(&self, base: &Path) -> Option<PathBuf> {
        let relative = Path::new(&self.full_name);
        let mut components = 0;
        for component in relative.components() {
            match component {
                Component::Normal(_) => components += 1,
                Component::CurDir => {}
                _ => return None,
            }
        }

        (components > 0).then(|| base.join(relative))
    }
}
