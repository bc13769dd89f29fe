//! Remote URL classification
//!
//! Turns a GitHub/GitLab URL into the flat record the clone pipeline
//! needs: platform, owner, repo, optional branch, optional subdirectory.

use crate::error::SliceError;
use anyhow::Result;
use regex::Regex;
use std::sync::LazyLock;

/// HTTPS repository root: `https://host/owner/repo[.git][/]`
static ROOT_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(github\.com|gitlab\.com)/([^/\s]+)/([^/\s]+?)(?:\.git)?/?$")
        .expect("valid regex")
});

/// GitHub tree URL: `https://github.com/owner/repo/tree/branch[/subdir...]`
static GITHUB_TREE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://github\.com/([^/\s]+)/([^/\s]+)/tree/([^/\s]+)(?:/(\S*?))?/?$")
        .expect("valid regex")
});

/// GitLab tree URL: `https://gitlab.com/owner/repo/-/tree/branch[/subdir...]`
static GITLAB_TREE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://gitlab\.com/([^/\s]+)/([^/\s]+)/-/tree/([^/\s]+)(?:/(\S*?))?/?$")
        .expect("valid regex")
});

/// SSH form: `git@host:owner/repo[.git]`
static SSH_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^git@(github\.com|gitlab\.com):([^/\s]+)/([^/\s]+?)(?:\.git)?$")
        .expect("valid regex")
});

/// Supported hosting platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    GitHub,
    GitLab,
}

impl Platform {
    /// Host name used in clone URLs
    #[must_use]
    pub const fn host(self) -> &'static str {
        match self {
            Self::GitHub => "github.com",
            Self::GitLab => "gitlab.com",
        }
    }

    fn from_host(host: &str) -> Option<Self> {
        match host {
            "github.com" => Some(Self::GitHub),
            "gitlab.com" => Some(Self::GitLab),
            _ => None,
        }
    }
}

/// A classified remote reference
#[derive(Debug, Clone)]
pub struct RemoteRef {
    /// Original URL as provided by the user
    pub url: String,
    pub platform: Platform,
    pub owner: String,
    pub repo: String,
    /// Branch from a tree URL; `None` means the remote default branch
    pub branch: Option<String>,
    /// Subdirectory from a tree URL; `None` means the whole tree
    pub subdir: Option<String>,
    /// Whether the URL was given in SSH form (clone keeps the SSH transport)
    ssh: bool,
}

impl RemoteRef {
    /// Classify a repository URL
    ///
    /// Tree URLs do not mark where a branch name ends and the path begins,
    /// so the first segment after `tree/` is taken as the branch. Use the
    /// `--branch` override for branch names containing `/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not match any supported shape.
    pub fn parse(url: &str) -> Result<Self> {
        if let Some(caps) = GITHUB_TREE_URL.captures(url) {
            return Ok(Self {
                url: url.to_owned(),
                platform: Platform::GitHub,
                owner: caps[1].to_owned(),
                repo: caps[2].to_owned(),
                branch: Some(caps[3].to_owned()),
                subdir: caps.get(4).map(|m| m.as_str().to_owned()).filter(|s| !s.is_empty()),
                ssh: false,
            });
        }

        if let Some(caps) = GITLAB_TREE_URL.captures(url) {
            return Ok(Self {
                url: url.to_owned(),
                platform: Platform::GitLab,
                owner: caps[1].to_owned(),
                repo: caps[2].to_owned(),
                branch: Some(caps[3].to_owned()),
                subdir: caps.get(4).map(|m| m.as_str().to_owned()).filter(|s| !s.is_empty()),
                ssh: false,
            });
        }

        if let Some(caps) = ROOT_URL.captures(url) {
            // Platform::from_host cannot fail here, the host alternation is closed
            if let Some(platform) = Platform::from_host(&caps[1]) {
                return Ok(Self {
                    url: url.to_owned(),
                    platform,
                    owner: caps[2].to_owned(),
                    repo: caps[3].to_owned(),
                    branch: None,
                    subdir: None,
                    ssh: false,
                });
            }
        }

        if let Some(caps) = SSH_URL.captures(url) {
            if let Some(platform) = Platform::from_host(&caps[1]) {
                return Ok(Self {
                    url: url.to_owned(),
                    platform,
                    owner: caps[2].to_owned(),
                    repo: caps[3].to_owned(),
                    branch: None,
                    subdir: None,
                    ssh: true,
                });
            }
        }

        Err(SliceError::url(format!(
            "Unsupported repository URL: '{url}'\n\
            Supported shapes:\n\
            - https://github.com/owner/repo\n\
            - https://github.com/owner/repo/tree/branch[/subdir]\n\
            - https://gitlab.com/owner/repo/-/tree/branch[/subdir]\n\
            - git@github.com:owner/repo.git"
        ))
        .into())
    }

    /// URL handed to `git clone`
    ///
    /// SSH input keeps the SSH transport; everything else clones over HTTPS.
    #[must_use]
    pub fn clone_url(&self) -> String {
        if self.ssh {
            format!("git@{}:{}/{}.git", self.platform.host(), self.owner, self.repo)
        } else {
            format!(
                "https://{}/{}/{}.git",
                self.platform.host(),
                self.owner,
                self.repo
            )
        }
    }

    /// Default name for the output directory
    ///
    /// The last component of the requested subdirectory, or the repository
    /// name when the whole tree was requested.
    #[must_use]
    pub fn default_output_name(&self) -> &str {
        self.subdir
            .as_deref()
            .and_then(|s| s.trim_end_matches('/').rsplit('/').next())
            .unwrap_or(&self.repo)
    }

    /// Get the original URL as provided
    #[must_use]
    pub fn original_url(&self) -> &str {
        &self.url
    }

    /// Check if the URL was given in SSH form
    #[must_use]
    pub const fn is_ssh(&self) -> bool {
        self.ssh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_github_root() {
        let remote = RemoteRef::parse("https://github.com/myorg/repo").unwrap();
        assert_eq!(remote.platform, Platform::GitHub);
        assert_eq!(remote.owner, "myorg");
        assert_eq!(remote.repo, "repo");
        assert_eq!(remote.branch, None);
        assert_eq!(remote.subdir, None);
        assert_eq!(remote.clone_url(), "https://github.com/myorg/repo.git");
    }

    #[test]
    fn test_parse_root_suffix_variants() {
        // .git suffix
        let remote = RemoteRef::parse("https://github.com/myorg/repo.git").unwrap();
        assert_eq!(remote.repo, "repo");

        // Trailing slash
        let remote = RemoteRef::parse("https://gitlab.com/myorg/repo/").unwrap();
        assert_eq!(remote.platform, Platform::GitLab);
        assert_eq!(remote.repo, "repo");
    }

    #[test]
    fn test_parse_github_tree() {
        let remote =
            RemoteRef::parse("https://github.com/myorg/repo/tree/main/src/utils").unwrap();
        assert_eq!(remote.owner, "myorg");
        assert_eq!(remote.branch.as_deref(), Some("main"));
        assert_eq!(remote.subdir.as_deref(), Some("src/utils"));
        assert_eq!(remote.default_output_name(), "utils");
    }

    #[test]
    fn test_parse_github_tree_branch_only() {
        let remote = RemoteRef::parse("https://github.com/myorg/repo/tree/develop").unwrap();
        assert_eq!(remote.branch.as_deref(), Some("develop"));
        assert_eq!(remote.subdir, None);
        assert_eq!(remote.default_output_name(), "repo");

        // Trailing slash after the branch leaves subdir empty, not Some("")
        let remote = RemoteRef::parse("https://github.com/myorg/repo/tree/develop/").unwrap();
        assert_eq!(remote.subdir, None);
    }

    #[test]
    fn test_parse_gitlab_tree() {
        let remote =
            RemoteRef::parse("https://gitlab.com/group/project/-/tree/main/lib").unwrap();
        assert_eq!(remote.platform, Platform::GitLab);
        assert_eq!(remote.owner, "group");
        assert_eq!(remote.repo, "project");
        assert_eq!(remote.branch.as_deref(), Some("main"));
        assert_eq!(remote.subdir.as_deref(), Some("lib"));
    }

    #[test]
    fn test_parse_ssh() {
        let remote = RemoteRef::parse("git@github.com:myorg/repo.git").unwrap();
        assert!(remote.is_ssh());
        assert_eq!(remote.owner, "myorg");
        assert_eq!(remote.repo, "repo");
        assert_eq!(remote.clone_url(), "git@github.com:myorg/repo.git");

        // .git suffix is optional in SSH form
        let remote = RemoteRef::parse("git@gitlab.com:group/project").unwrap();
        assert_eq!(remote.clone_url(), "git@gitlab.com:group/project.git");
    }

    #[test]
    fn test_parse_invalid_urls() {
        assert!(RemoteRef::parse("").is_err());
        assert!(RemoteRef::parse("not a url").is_err());
        assert!(RemoteRef::parse("https://example.com/owner/repo").is_err());
        assert!(RemoteRef::parse("https://github.com/only-owner").is_err());
        assert!(RemoteRef::parse("git@bitbucket.org:owner/repo.git").is_err());
    }

    #[test]
    fn test_branch_with_slash_is_split_at_first_segment() {
        // The URL shape cannot distinguish "feature/x" from "feature" + "x"
        let remote =
            RemoteRef::parse("https://github.com/myorg/repo/tree/feature/login").unwrap();
        assert_eq!(remote.branch.as_deref(), Some("feature"));
        assert_eq!(remote.subdir.as_deref(), Some("login"));
    }
}
