//! Integration tests for full project analysis and the result store.

use std::fs;
use std::path::PathBuf;

use archlens::{AnalysisResult, AnalyzeError, AnalyzerConfig, ProjectKind, Runner};
use tempfile::TempDir;

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn runner(store: &TempDir) -> Runner {
    archlens::init();
    Runner::new(AnalyzerConfig {
        store_dir: store.path().to_path_buf(),
        ..Default::default()
    })
    .expect("runner should build")
}

fn analyze_shop(store: &TempDir) -> AnalysisResult {
    runner(store)
        .analyze("spring-shop", &testdata_path().join("spring-shop"))
        .expect("analysis should succeed")
}

#[test]
fn test_shop_is_supported() {
    let store = TempDir::new().unwrap();
    let result = analyze_shop(&store);

    assert_eq!(result.kind, ProjectKind::Supported);
    assert_eq!(result.project_name, "spring-shop");
    assert!(result.error.is_empty());
}

#[test]
fn test_shop_endpoints() {
    let store = TempDir::new().unwrap();
    let result = analyze_shop(&store);

    let endpoints: Vec<_> = result
        .endpoints
        .iter()
        .map(|e| (e.http_method.as_str(), e.path.as_str(), e.controller_name.as_str()))
        .collect();
    assert_eq!(
        endpoints,
        vec![
            ("GET", "/users/", "UserController"),
            ("GET", "/users/{id}", "UserController"),
            ("POST", "/users/", "UserController"),
        ]
    );
    assert!(result.endpoints.iter().all(|e| !e.path.contains("//")));
}

#[test]
fn test_shop_entities_and_dependencies() {
    let store = TempDir::new().unwrap();
    let result = analyze_shop(&store);

    let entities: Vec<_> = result
        .entities
        .iter()
        .map(|e| (e.name.as_str(), e.table_name.as_str()))
        .collect();
    assert_eq!(entities, vec![("Order", ""), ("User", "users")]);

    let deps: Vec<_> = result.dependencies.iter().map(|d| d.coordinates()).collect();
    assert_eq!(
        deps,
        vec![
            "org.springframework.boot:spring-boot-starter-web",
            "org.springframework.boot:spring-boot-starter-data-jpa",
            "org.postgresql:postgresql:42.7.1",
            "org.projectlombok:lombok:1.18.30",
        ]
    );
    assert_eq!(
        result.summary,
        "3 endpoints across 1 controller, 2 entities, 4 dependencies"
    );
}

#[test]
fn test_shop_configuration_and_url() {
    let store = TempDir::new().unwrap();
    let result = analyze_shop(&store);

    let keys: Vec<_> = result.configuration.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "server.port",
            "server.servlet.context-path",
            "spring.datasource.url",
            "spring.jpa.hibernate.ddl-auto",
        ]
    );
    assert_eq!(result.project_url, "http://localhost:8081/api");
}

#[test]
fn test_analysis_is_idempotent() {
    let store = TempDir::new().unwrap();
    let first = analyze_shop(&store);
    let second = analyze_shop(&store);

    assert_eq!(first.endpoints, second.endpoints);
    assert_eq!(first.entities, second.entities);
    assert_eq!(first.dependencies, second.dependencies);
    assert_eq!(first.configuration, second.configuration);
}

#[test]
fn test_stored_analysis_is_last_write() {
    let store = TempDir::new().unwrap();
    let runner = runner(&store);

    assert!(runner.stored_analysis("spring-shop").unwrap().is_none());

    let result = runner
        .analyze("spring-shop", &testdata_path().join("spring-shop"))
        .unwrap();
    let stored = runner.stored_analysis("spring-shop").unwrap().unwrap();
    assert_eq!(stored, result);

    let path = store.path().join("spring-shop").join("analysis.json");
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(json["kind"], "supported");
    assert_eq!(json["projectUrl"], "http://localhost:8081/api");
}

#[test]
fn test_plain_project_is_unsupported() {
    let store = TempDir::new().unwrap();
    let result = runner(&store)
        .analyze("plain-java", &testdata_path().join("plain-java"))
        .expect("unsupported is not an error");

    assert_eq!(result.kind, ProjectKind::Unsupported);
    assert!(!result.error.is_empty());
    assert!(result.endpoints.is_empty());
    assert!(result.entities.is_empty());
    assert!(result.dependencies.is_empty());
    assert!(result.project_url.is_empty());
}

#[test]
fn test_manifest_starter_alone_is_enough() {
    let project = TempDir::new().unwrap();
    fs::write(
        project.path().join("build.gradle"),
        "dependencies {\n    implementation 'org.springframework.boot:spring-boot-starter-web'\n}\n",
    )
    .unwrap();

    let store = TempDir::new().unwrap();
    let result = runner(&store).analyze("gradle-only", project.path()).unwrap();
    assert_eq!(result.kind, ProjectKind::Supported);
    assert_eq!(result.dependencies.len(), 1);
    assert_eq!(result.project_url, "http://localhost:8080");
}

#[test]
fn test_missing_root_is_fatal() {
    let store = TempDir::new().unwrap();
    let runner = runner(&store);
    let missing = testdata_path().join("no-such-project");

    assert!(matches!(
        runner.analyze("ghost", &missing),
        Err(AnalyzeError::NotFound(_))
    ));
    assert!(matches!(runner.graph(&missing), Err(AnalyzeError::NotFound(_))));
}

#[test]
fn test_invalid_project_name_is_rejected() {
    let store = TempDir::new().unwrap();
    let result = runner(&store).analyze("../escape", &testdata_path().join("spring-shop"));
    assert!(matches!(result, Err(AnalyzeError::InvalidProjectName(_))));
}
