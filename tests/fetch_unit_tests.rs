//! Unit tests for fetch operation planning against the mock system

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {

    use gitslice::cli::Args;
    use gitslice::error::SliceError;
    use gitslice::operations::FetchOperation;
    use gitslice::system::MockSystem;
    use std::path::Path;

    fn args(url: &str) -> Args {
        Args {
            url: url.to_owned(),
            output: None,
            branch: None,
            keep_git: false,
            dry_run: true,
            verbose: false,
        }
    }

    #[test]
    fn default_output_uses_repo_name_for_root_url() {
        let system = MockSystem::new().with_current_dir("/work");
        let op = FetchOperation::new(&args("git@github.com:myorg/tooling.git"), &system).unwrap();
        assert_eq!(op.output_path(), Path::new("/work/tooling"));
    }

    #[test]
    fn default_output_uses_last_subdir_component() {
        let system = MockSystem::new().with_current_dir("/work");
        let op = FetchOperation::new(
            &args("https://gitlab.com/group/project/-/tree/main/lib/core"),
            &system,
        )
        .unwrap();
        assert_eq!(op.output_path(), Path::new("/work/core"));
    }

    #[test]
    fn absolute_output_is_used_as_given() {
        let system = MockSystem::new().with_current_dir("/work");
        let mut a = args("https://github.com/myorg/repo");
        a.output = Some("/elsewhere/slice".to_owned());
        let op = FetchOperation::new(&a, &system).unwrap();
        assert_eq!(op.output_path(), Path::new("/elsewhere/slice"));
    }

    #[test]
    fn existing_output_file_is_also_rejected() {
        // A file at the output path blocks the fetch just like a directory
        let system = MockSystem::new()
            .with_current_dir("/work")
            .with_file("/work/repo", b"in the way");

        let err =
            FetchOperation::new(&args("https://github.com/myorg/repo"), &system).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SliceError>().map(SliceError::exit_code),
            Some(2)
        );
    }

    #[test]
    fn unsupported_url_reports_exit_code_one() {
        let system = MockSystem::new();
        let err = FetchOperation::new(&args("https://sr.ht/~owner/repo"), &system).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SliceError>().map(SliceError::exit_code),
            Some(1)
        );
    }
}
