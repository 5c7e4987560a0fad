use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gitea_mirror::{
    CloneError, Cloner, FilterMode, MirrorConfig, Runner, RunnerConfig, RunnerError,
};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Records clone requests and creates the destination directory.
#[derive(Default)]
struct RecordingCloner {
    destinations: Mutex<Vec<PathBuf>>,
    failing: HashSet<String>,
}

#[async_trait]
impl Cloner for RecordingCloner {
    async fn clone_repository(&self, clone_url: &str, destination: &Path) -> Result<(), CloneError> {
        self.destinations
            .lock()
            .unwrap()
            .push(destination.to_path_buf());

        if self.failing.contains(clone_url) {
            return Err(CloneError::Failed {
                status: "exit status: 128".to_string(),
                stderr: "fatal: could not read from remote repository".to_string(),
            });
        }

        tokio::fs::create_dir_all(destination).await.unwrap();
        Ok(())
    }
}

fn repo_json(full_name: &str) -> serde_json::Value {
    let name = full_name.rsplit('/').next().unwrap();
    json!({
        "name": name,
        "full_name": full_name,
        "clone_url": format!("https://git.example.com/{full_name}.git"),
    })
}

async fn mount_pages(server: &MockServer, pages: &[&[&str]]) {
    for (index, entries) in pages.iter().enumerate() {
        let body: Vec<_> = entries.iter().map(|name| repo_json(name)).collect();
        Mock::given(method("GET"))
            .and(path("/api/v1/user/repos"))
            .and(header("authorization", "token abc"))
            .and(query_param("page", (index + 1).to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }
}

fn mirror_config(server: &MockServer, target_dir: &Path) -> MirrorConfig {
    MirrorConfig {
        host: server.uri(),
        access_token: "abc".to_string(),
        target_dir: target_dir.to_path_buf(),
    }
}

#[test]
fn load_config_from_fixture() {
    let fixture = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/config.env");
    let config = temp_env::with_vars_unset(
        ["GITEA_HOST", "GITEA_ACCESS_TOKEN", "TARGET_DIR"],
        || MirrorConfig::load(&fixture),
    )
    .unwrap();

    assert_eq!(config.host, "https://git.example.com");
    assert_eq!(config.access_token, "abc");
    assert_eq!(config.target_dir, PathBuf::from("./backups"));
}

#[tokio::test]
async fn mirrors_only_missing_repositories() {
    let server = MockServer::start().await;
    mount_pages(&server, &[&["org/a", "org/b"], &[]]).await;

    let temp = TempDir::new().unwrap();
    let backups = temp.path().join("backups");
    std::fs::create_dir_all(backups.join("org/a")).unwrap();

    let cloner = Arc::new(RecordingCloner::default());
    let config = RunnerConfig::new(mirror_config(&server, &backups), FilterMode::None);
    let summary = Runner::with_cloner(config, cloner.clone())
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(summary.repositories_discovered, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.cloned, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(
        *cloner.destinations.lock().unwrap(),
        vec![backups.join("org/b")]
    );
}

#[tokio::test]
async fn creates_missing_target_directory() {
    let server = MockServer::start().await;
    mount_pages(&server, &[&["org/a"], &[]]).await;

    let temp = TempDir::new().unwrap();
    let backups = temp.path().join("nested/backups");

    let cloner = Arc::new(RecordingCloner::default());
    let config = RunnerConfig::new(mirror_config(&server, &backups), FilterMode::None);
    let summary = Runner::with_cloner(config, cloner)
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(summary.cloned, 1);
    assert!(backups.join("org/a").is_dir());
}

#[tokio::test]
async fn clone_failures_are_counted_not_escalated() {
    let server = MockServer::start().await;
    mount_pages(&server, &[&["org/a", "org/b", "org/c"], &[]]).await;

    let temp = TempDir::new().unwrap();
    let cloner = Arc::new(RecordingCloner {
        failing: HashSet::from(["https://git.example.com/org/b.git".to_string()]),
        ..Default::default()
    });
    let config = RunnerConfig::new(mirror_config(&server, temp.path()), FilterMode::None);
    let summary = Runner::with_cloner(config, cloner)
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(summary.cloned, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.processed(), 3);
    assert!(summary.has_failures());
}

#[tokio::test]
async fn listing_failure_clones_nothing() {
    let server = MockServer::start().await;
    mount_pages(&server, &[&["org/a"]]).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/user/repos"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let cloner = Arc::new(RecordingCloner::default());
    let config = RunnerConfig::new(mirror_config(&server, temp.path()), FilterMode::None);
    let result = Runner::with_cloner(config, cloner.clone())
        .unwrap()
        .run()
        .await;

    assert!(matches!(result, Err(RunnerError::Discovery(_))));
    assert!(cloner.destinations.lock().unwrap().is_empty());
}

#[tokio::test]
async fn only_me_filters_to_token_owner() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": "alice"})))
        .mount(&server)
        .await;
    mount_pages(&server, &[&["alice/a", "org/b"], &["alice/c"], &[]]).await;

    let temp = TempDir::new().unwrap();
    let cloner = Arc::new(RecordingCloner::default());
    let config = RunnerConfig::new(mirror_config(&server, temp.path()), FilterMode::CurrentUser);
    let summary = Runner::with_cloner(config, cloner.clone())
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(summary.repositories_discovered, 2);
    let mut destinations = cloner.destinations.lock().unwrap().clone();
    destinations.sort();
    assert_eq!(
        destinations,
        vec![temp.path().join("alice/a"), temp.path().join("alice/c")]
    );
}

#[tokio::test]
async fn dry_run_clones_nothing() {
    let server = MockServer::start().await;
    mount_pages(&server, &[&["org/a", "org/b"], &[]]).await;

    let temp = TempDir::new().unwrap();
    let backups = temp.path().join("backups");
    let cloner = Arc::new(RecordingCloner::default());
    let config = RunnerConfig::new(mirror_config(&server, &backups), FilterMode::None)
        .with_dry_run(true);
    let summary = Runner::with_cloner(config, cloner.clone())
        .unwrap()
        .run()
        .await
        .unwrap();

    assert!(summary.dry_run);
    assert_eq!(summary.repositories_discovered, 2);
    assert_eq!(summary.processed(), 0);
    assert!(cloner.destinations.lock().unwrap().is_empty());
    assert!(!backups.exists());
}
