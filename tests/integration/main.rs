//! Integration tests for gh-outbound

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn gh_outbound() -> Command {
        cargo_bin_cmd!("gh-outbound")
    }

    #[test]
    fn help_displays() {
        gh_outbound()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--ignore-cache"))
            .stdout(predicate::str::contains("--cache"));
    }

    #[test]
    fn version_displays() {
        gh_outbound()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("gh-outbound"));
    }

    #[test]
    fn empty_input_prints_nothing() {
        let temp = TempDir::new().unwrap();
        let cache = temp.path().join("cache");

        gh_outbound()
            .arg("--config")
            .arg(temp.path().join("missing.toml"))
            .arg("--cache")
            .arg(&cache)
            .write_stdin("")
            .assert()
            .success()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("no input for flict"));

        assert!(cache.exists());
    }

    #[test]
    fn invalid_config_fails() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("config.toml");
        std::fs::write(&config, "[cache\n").unwrap();

        gh_outbound()
            .arg("--config")
            .arg(&config)
            .write_stdin("")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }
}

#[cfg(unix)]
mod fake_tools {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const FAKE_GH: &str = r#"#!/bin/sh
case "$3" in
  org/a) echo '{"nameWithOwner":"org/a","url":"https://github.com/org/a","licenseInfo":{"key":"mit","name":"MIT License"}}' ;;
  org/b) echo '{"nameWithOwner":"org/b","url":"https://github.com/org/b","licenseInfo":{"key":"apache-2.0","name":"Apache License 2.0"}}' ;;
  org/weird) echo '{"nameWithOwner":"org/weird","url":"https://github.com/org/weird","licenseInfo":{"key":"other","name":"Other"}}' ;;
  *) echo "GraphQL: Could not resolve to a Repository with the name '$3'." >&2; exit 1 ;;
esac
"#;

    const FAKE_FLICT: &str = r#"#!/bin/sh
echo "$@" > flict-args.txt
echo '["Apache-2.0","MIT"]'
"#;

    const FAILING_FLICT: &str = "#!/bin/sh\necho 'flict: unknown license' >&2\nexit 1\n";

    const FAILING_GH: &str = "#!/bin/sh\necho 'gh should not be called' >&2\nexit 1\n";

    struct Sandbox {
        dir: TempDir,
    }

    impl Sandbox {
        fn new(gh: &str, flict: &str) -> Self {
            let dir = TempDir::new().unwrap();
            write_script(&dir.path().join("gh"), gh);
            write_script(&dir.path().join("flict"), flict);

            let config = format!(
                "[github]\nprogram = {:?}\n\n[solver]\nprogram = \"./flict\"\nworking_dir = {:?}\n",
                dir.path().join("gh"),
                dir.path(),
            );
            fs::write(dir.path().join("config.toml"), config).unwrap();

            Self { dir }
        }

        fn path(&self) -> &Path {
            self.dir.path()
        }

        fn cache(&self) -> PathBuf {
            self.path().join("cache")
        }

        fn cmd(&self) -> Command {
            let mut cmd = cargo_bin_cmd!("gh-outbound");
            cmd.arg("--config")
                .arg(self.path().join("config.toml"))
                .arg("--cache")
                .arg(self.cache())
                .arg("--interval")
                .arg("0");
            cmd
        }

        fn cache_content(&self) -> String {
            fs::read_to_string(self.cache()).unwrap()
        }
    }

    fn write_script(path: &Path, content: &str) {
        fs::write(path, content).unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn resolves_and_prints_outbound() {
        let sandbox = Sandbox::new(FAKE_GH, FAKE_FLICT);

        sandbox
            .cmd()
            .write_stdin("org/a\norg/b\n")
            .assert()
            .success()
            .stdout("Apache-2.0\nMIT\n");

        let args = fs::read_to_string(sandbox.path().join("flict-args.txt")).unwrap();
        assert_eq!(args.trim(), "outbound-candidate MIT and Apache-2.0");

        let cache = sandbox.cache_content();
        assert_eq!(cache.lines().count(), 2);
        assert!(cache.contains(r#""nameWithOwner":"org/a""#));
        assert!(cache.contains(r#""licenseInfo":{"key":"apache-2.0","name":"Apache License 2.0"}"#));
    }

    #[test]
    fn failed_lookup_is_skipped_and_not_cached() {
        let sandbox = Sandbox::new(FAKE_GH, FAKE_FLICT);

        sandbox
            .cmd()
            .write_stdin("org/missing\n")
            .assert()
            .success()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("license unknown: repo=org/missing license=UNKNOWN"));

        assert!(!sandbox.path().join("flict-args.txt").exists());
        assert!(!sandbox.cache_content().contains("org/missing"));
    }

    #[test]
    fn unmapped_license_is_excluded() {
        let sandbox = Sandbox::new(FAKE_GH, FAKE_FLICT);

        sandbox
            .cmd()
            .write_stdin("org/weird\norg/a\n")
            .assert()
            .success()
            .stderr(predicate::str::contains("license=other"));

        let args = fs::read_to_string(sandbox.path().join("flict-args.txt")).unwrap();
        assert_eq!(args.trim(), "outbound-candidate MIT");
        assert!(sandbox.cache_content().contains("org/weird"));
    }

    #[test]
    fn cached_repos_skip_gh() {
        let sandbox = Sandbox::new(FAILING_GH, FAKE_FLICT);
        fs::write(
            sandbox.cache(),
            "{\"nameWithOwner\":\"org/a\",\"url\":\"\",\"licenseInfo\":{\"key\":\"mit\",\"name\":\"MIT License\"}}\n{corrupt\n",
        )
        .unwrap();

        sandbox
            .cmd()
            .write_stdin("org/a\n")
            .assert()
            .success()
            .stdout("Apache-2.0\nMIT\n")
            .stderr(predicate::str::contains("gh should not be called").not());

        let cache = sandbox.cache_content();
        assert_eq!(cache.lines().count(), 1);
        assert!(!cache.contains("corrupt"));
    }

    #[test]
    fn ignore_cache_forces_lookup() {
        let sandbox = Sandbox::new(FAILING_GH, FAKE_FLICT);
        fs::write(
            sandbox.cache(),
            "{\"nameWithOwner\":\"org/a\",\"url\":\"\",\"licenseInfo\":{\"key\":\"mit\",\"name\":\"MIT License\"}}\n",
        )
        .unwrap();

        sandbox
            .cmd()
            .arg("--ignore-cache")
            .write_stdin("org/a\n")
            .assert()
            .success()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("gh should not be called"));

        // The failed lookup leaves the existing entry alone.
        assert!(sandbox.cache_content().contains("org/a"));
    }

    #[test]
    fn solver_failure_is_fatal_but_cache_survives() {
        let sandbox = Sandbox::new(FAKE_GH, FAILING_FLICT);

        sandbox
            .cmd()
            .write_stdin("org/a\n")
            .assert()
            .failure()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("Outbound license solver failed"));

        assert!(sandbox.cache_content().contains("org/a"));
    }

    #[test]
    fn missing_solver_reports_hint() {
        let sandbox = Sandbox::new(FAKE_GH, FAKE_FLICT);
        fs::remove_file(sandbox.path().join("flict")).unwrap();

        sandbox
            .cmd()
            .write_stdin("org/a\n")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Required CLI not found"))
            .stderr(predicate::str::contains("Hint:"));

        assert!(sandbox.cache_content().contains("org/a"));
    }

    #[test]
    fn blank_line_is_reported_and_skipped() {
        let sandbox = Sandbox::new(FAKE_GH, FAKE_FLICT);

        sandbox
            .cmd()
            .write_stdin("\norg/a\n")
            .assert()
            .success()
            .stdout("Apache-2.0\nMIT\n")
            .stderr(predicate::str::contains("empty repository name"));

        let args = fs::read_to_string(sandbox.path().join("flict-args.txt")).unwrap();
        assert_eq!(args.trim(), "outbound-candidate MIT");
    }
}
