use anyhow::Result;
use git2::Repository;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use xp_coauthors::config::Config;
use xp_coauthors::git::HookInstaller;
use xp_coauthors::message::{RewriteError, Rewriter};

const ALICE: &str = "Alice A <a@x.com> 1700000000 +0000";

/// Test setup with a temporary git repository and a config file next to it.
struct TestRepo {
    _temp_dir: TempDir,
    repo_path: PathBuf,
    config_path: PathBuf,
    repo: Repository,
}

impl TestRepo {
    fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let repo_path = fs::canonicalize(temp_dir.path())?.join("app");
        fs::create_dir_all(&repo_path)?;
        let repo = Repository::init(&repo_path)?;
        let config_path = repo_path.parent().unwrap().join("xp.yaml");

        let mut config = Config::default();
        config.add_developer("alice", "Alice A", "a@x.com");
        config.add_developer("bob", "Bob B", "b@x.com");
        config.add_developer("carol", "Carol C", "c@x.com");
        config.add_repo(
            &repo_path.to_string_lossy(),
            vec!["alice".to_string(), "bob".to_string()],
            None,
        )?;
        config.save(&config_path)?;

        Ok(TestRepo {
            _temp_dir: temp_dir,
            repo_path,
            config_path,
            repo,
        })
    }

    fn repo_key(&self) -> String {
        self.repo_path.to_string_lossy().into_owned()
    }

    fn config(&self) -> Result<Config> {
        Config::load(&self.config_path)
    }

    fn write_message(&self, message: &str) -> Result<PathBuf> {
        let msg_path = self.repo.path().join("COMMIT_EDITMSG");
        fs::write(&msg_path, message)?;
        Ok(msg_path)
    }
}

#[test]
fn rewrites_message_file_in_place() -> Result<()> {
    let test_repo = TestRepo::new()?;
    let config = test_repo.config()?;
    let msg_path = test_repo.write_message("[42,carol,bob] Fix bug\n")?;

    Rewriter::new(&config).rewrite_file(&msg_path, &test_repo.repo_key(), ALICE)?;

    let rewritten = fs::read_to_string(&msg_path)?;
    insta::assert_snapshot!(rewritten, @r"
    Fix bug

    Issue-id: #42

    Co-authored-by: Bob B <b@x.com>
    Co-authored-by: Carol C <c@x.com>
    ");
    Ok(())
}

#[test]
fn repo_defaults_skip_the_author() -> Result<()> {
    let test_repo = TestRepo::new()?;
    let config = test_repo.config()?;
    let msg_path = test_repo.write_message("Fix bug\n")?;

    Rewriter::new(&config).rewrite_file(&msg_path, &test_repo.repo_key(), ALICE)?;

    assert_eq!(
        fs::read_to_string(&msg_path)?,
        "Fix bug\n\nCo-authored-by: Bob B <b@x.com>\n"
    );
    Ok(())
}

#[test]
fn failed_rewrite_leaves_file_untouched() -> Result<()> {
    let test_repo = TestRepo::new()?;
    let config = test_repo.config()?;
    let original = "[bob,dave] Fix bug\n";
    let msg_path = test_repo.write_message(original)?;

    let err = Rewriter::new(&config)
        .rewrite_file(&msg_path, &test_repo.repo_key(), ALICE)
        .unwrap_err();

    let cause = err.downcast_ref::<RewriteError>().unwrap();
    assert_eq!(cause.to_string(), "non-existing dev dave provided in the first line");
    assert_eq!(fs::read_to_string(&msg_path)?, original);
    Ok(())
}

#[test]
fn unknown_repository_leaves_file_untouched() -> Result<()> {
    let test_repo = TestRepo::new()?;
    let config = test_repo.config()?;
    let msg_path = test_repo.write_message("Fix bug\n")?;
    let elsewhere = test_repo.repo_path.parent().unwrap().join("other");

    let err = Rewriter::new(&config)
        .rewrite_file(&msg_path, &elsewhere.to_string_lossy(), ALICE)
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<RewriteError>(),
        Some(RewriteError::UnresolvableRepository(_))
    ));
    assert_eq!(fs::read_to_string(&msg_path)?, "Fix bug\n");
    Ok(())
}

#[test]
fn both_hooks_running_give_a_stable_message() -> Result<()> {
    let test_repo = TestRepo::new()?;
    let config = test_repo.config()?;
    let rewriter = Rewriter::new(&config);
    let msg_path = test_repo.write_message("[7|carol] Fix bug\n\n# Please enter the commit message\n")?;

    rewriter.rewrite_file(&msg_path, &test_repo.repo_key(), ALICE)?;
    let after_prepare = fs::read_to_string(&msg_path)?;
    rewriter.rewrite_file(&msg_path, &test_repo.repo_key(), ALICE)?;
    let after_commit_msg = fs::read_to_string(&msg_path)?;

    assert_eq!(after_prepare, after_commit_msg);
    assert!(after_commit_msg.ends_with("Issue-id: #7\n\nCo-authored-by: Carol C <c@x.com>\n"));
    Ok(())
}

#[test]
fn update_repo_devs_persists() -> Result<()> {
    let test_repo = TestRepo::new()?;
    let mut config = test_repo.config()?;
    config.update_repo_developers(&test_repo.repo_key(), vec!["carol".to_string()])?;
    config.save(&test_repo.config_path)?;

    let config = test_repo.config()?;
    let msg_path = test_repo.write_message("Fix bug\n")?;
    Rewriter::new(&config).rewrite_file(&msg_path, &test_repo.repo_key(), ALICE)?;

    assert_eq!(
        fs::read_to_string(&msg_path)?,
        "Fix bug\n\nCo-authored-by: Carol C <c@x.com>\n"
    );
    Ok(())
}

fn git(repo_path: &Path, config_path: &Path, args: &[&str]) -> Result<std::process::Output> {
    Ok(Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .env("XP_CONFIG", config_path)
        .env("GIT_AUTHOR_NAME", "Alice A")
        .env("GIT_AUTHOR_EMAIL", "a@x.com")
        .env("GIT_COMMITTER_NAME", "Alice A")
        .env("GIT_COMMITTER_EMAIL", "a@x.com")
        .env_remove("RUST_LOG")
        .output()?)
}

#[test]
fn installed_hooks_rewrite_real_commits() -> Result<()> {
    let test_repo = TestRepo::new()?;
    HookInstaller::open(&test_repo.repo_path)?.install(env!("CARGO_BIN_EXE_xp"), false)?;

    let output = git(
        &test_repo.repo_path,
        &test_repo.config_path,
        &["commit", "--allow-empty", "-m", "[bob] Fix bug"],
    )?;
    assert!(
        output.status.success(),
        "git commit failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let head = test_repo.repo.head()?.peel_to_commit()?;
    assert_eq!(
        head.message().unwrap(),
        "Fix bug\n\nCo-authored-by: Bob B <b@x.com>\n"
    );
    Ok(())
}

#[test]
fn hook_failure_blocks_the_commit() -> Result<()> {
    let test_repo = TestRepo::new()?;
    HookInstaller::open(&test_repo.repo_path)?.install(env!("CARGO_BIN_EXE_xp"), false)?;

    let output = git(
        &test_repo.repo_path,
        &test_repo.config_path,
        &["commit", "--allow-empty", "-m", "[zed] Fix bug"],
    )?;

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("non-existing dev zed"));
    assert!(test_repo.repo.head().is_err());
    Ok(())
}

#[test]
fn hooks_installed_from_a_worktree_rewrite_its_commits() -> Result<()> {
    let test_repo = TestRepo::new()?;
    let output = git(
        &test_repo.repo_path,
        &test_repo.config_path,
        &["commit", "--allow-empty", "-m", "init"],
    )?;
    assert!(output.status.success());
    let output = git(
        &test_repo.repo_path,
        &test_repo.config_path,
        &["worktree", "add", "wt"],
    )?;
    assert!(
        output.status.success(),
        "git worktree add failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let worktree_path = test_repo.repo_path.join("wt");
    HookInstaller::open(&worktree_path)?.install(env!("CARGO_BIN_EXE_xp"), false)?;

    let output = git(
        &worktree_path,
        &test_repo.config_path,
        &["commit", "--allow-empty", "-m", "[bob] Fix bug"],
    )?;
    assert!(
        output.status.success(),
        "git commit failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let worktree = Repository::open(&worktree_path)?;
    let head = worktree.head()?.peel_to_commit()?;
    assert_eq!(
        head.message().unwrap(),
        "Fix bug\n\nCo-authored-by: Bob B <b@x.com>\n"
    );
    Ok(())
}

fn xp(config_path: &Path, args: &[&str]) -> Result<std::process::Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_xp"))
        .arg("--config")
        .arg(config_path)
        .args(args)
        .env("GIT_AUTHOR_NAME", "Alice A")
        .env("GIT_AUTHOR_EMAIL", "a@x.com")
        .env_remove("XP_CONFIG")
        .env_remove("RUST_LOG")
        .output()?)
}

#[test]
fn dry_run_prints_without_writing() -> Result<()> {
    let test_repo = TestRepo::new()?;
    let original = "[42,carol] Fix bug\n\n# Please enter the commit message\n";
    let msg_path = test_repo.write_message(original)?;

    let output = xp(
        &test_repo.config_path,
        &[
            "add-info",
            "--dry-run",
            "--repo",
            &test_repo.repo_key(),
            &msg_path.to_string_lossy(),
        ],
    )?;
    assert!(
        output.status.success(),
        "xp add-info failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert_eq!(
        String::from_utf8(output.stdout)?,
        "Fix bug\n\n# Please enter the commit message\n\nIssue-id: #42\n\nCo-authored-by: Carol C <c@x.com>\n"
    );
    assert_eq!(fs::read(&msg_path)?, original.as_bytes());
    Ok(())
}

#[test]
fn add_info_rewrites_through_the_binary() -> Result<()> {
    let test_repo = TestRepo::new()?;
    let msg_path = test_repo.write_message("Fix bug\n")?;

    let output = xp(
        &test_repo.config_path,
        &[
            "add-info",
            "--repo",
            &test_repo.repo_key(),
            &msg_path.to_string_lossy(),
        ],
    )?;
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(
        fs::read_to_string(&msg_path)?,
        "Fix bug\n\nCo-authored-by: Bob B <b@x.com>\n"
    );
    Ok(())
}

#[test]
fn config_commands_round_trip_through_the_binary() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let root = fs::canonicalize(temp_dir.path())?;
    let config_path = root.join("conf").join("xp.yaml");
    let repo_path = root.join("svc");
    fs::create_dir_all(&repo_path)?;
    let repo_key = repo_path.to_string_lossy().into_owned();

    let output = xp(&config_path, &["add-dev", "dana", "Dana D", "d@x.com"])?;
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "✅ Added dana: Dana D <d@x.com>\n"
    );
    let output = xp(&config_path, &["add-dev", "erin", "Erin E", "e@x.com"])?;
    assert!(output.status.success());

    let output = xp(
        &config_path,
        &["add-repo", &repo_key, "--devs", "dana,erin", "--issue-id", "12"],
    )?;
    assert!(
        output.status.success(),
        "xp add-repo failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8(output.stdout)?,
        format!("✅ Added repo {repo_key}\n")
    );

    let output = xp(&config_path, &["add-repo", &repo_key, "--devs", "zed"])?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no dev with id zed found"));

    let output = xp(
        &config_path,
        &["update-repo-devs", "erin", "--repo", &repo_key],
    )?;
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout)?,
        format!("✅ Updated devs for {repo_key}\n")
    );

    let config = Config::load(&config_path)?;
    assert_eq!(config.devs.len(), 2);
    assert_eq!(config.repos[&repo_key].devs, ["erin"]);
    assert_eq!(config.repos[&repo_key].issue_id.as_deref(), Some("12"));

    let output = xp(&config_path, &["show"])?;
    assert!(output.status.success());
    let shown = String::from_utf8(output.stdout)?;
    let (header, yaml) = shown.split_once('\n').unwrap();
    assert_eq!(header, format!("# {}", config_path.display()));
    assert_eq!(serde_yaml::from_str::<Config>(yaml)?, config);
    Ok(())
}

#[test]
fn install_hooks_does_not_need_a_config_location() -> Result<()> {
    let test_repo = TestRepo::new()?;

    let output = Command::new(env!("CARGO_BIN_EXE_xp"))
        .args(["install-hooks", &test_repo.repo_key()])
        .env_remove("HOME")
        .env_remove("XP_CONFIG")
        .env_remove("RUST_LOG")
        .output()?;
    assert!(
        output.status.success(),
        "xp install-hooks failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let hook = test_repo.repo.path().join("hooks").join("commit-msg");
    assert_eq!(
        fs::read_to_string(hook)?,
        xp_coauthors::git::hook_script(env!("CARGO_BIN_EXE_xp"))
    );
    Ok(())
}
