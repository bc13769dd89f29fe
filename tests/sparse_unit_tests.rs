//! Unit tests for the sparse clone pipeline helpers

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {

    use gitslice::git::RemoteRef;
    use gitslice::git::sparse::{build_clone_args, parse_git_version};

    #[test]
    fn parse_git_version_tst() {
        assert_eq!(parse_git_version("2.34.1").unwrap(), (2, 34, 1));
        assert_eq!(parse_git_version("2.25.0").unwrap(), (2, 25, 0));
        parse_git_version("invalid").unwrap_err();
    }

    #[test]
    fn clone_args_without_branch() {
        let remote = RemoteRef::parse("https://github.com/myorg/repo").unwrap();
        let args = build_clone_args(&remote, None, "/tmp/staging");

        assert_eq!(
            args,
            vec![
                "clone",
                "--depth",
                "1",
                "--filter=blob:none",
                "--sparse",
                "https://github.com/myorg/repo.git",
                "/tmp/staging",
            ]
        );
    }

    #[test]
    fn clone_args_with_branch() {
        let remote =
            RemoteRef::parse("https://github.com/myorg/repo/tree/develop/src").unwrap();
        let args = build_clone_args(&remote, remote.branch.as_deref(), "/tmp/staging");

        assert!(args.contains(&"--branch".to_owned()));
        assert!(args.contains(&"develop".to_owned()));
        // Clone always targets the repository root; narrowing happens later
        assert!(args.contains(&"https://github.com/myorg/repo.git".to_owned()));
    }

    #[test]
    fn clone_args_keep_ssh_transport() {
        let remote = RemoteRef::parse("git@gitlab.com:group/project.git").unwrap();
        let args = build_clone_args(&remote, None, "/tmp/staging");

        assert!(args.contains(&"git@gitlab.com:group/project.git".to_owned()));
    }
}
