//! End-to-end tests for the stats command, driving `run` against a wiremock server.

use serde_json::{Value, json};
use sonar_stats_lib::Host;
use sonar_stats_lib::metrics::METRIC_CATALOG;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PATH: &str = "/api/projects/search";
const MEASURES_PATH: &str = "/api/measures/component";

/// Test host that captures output to in-memory buffers.
#[derive(Debug, Default)]
struct TestHost {
    output_buf: Vec<u8>,
    error_buf: Vec<u8>,
    exit_code: Option<i32>,
}

impl TestHost {
    fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }

    fn error_str(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }
}

impl Host for TestHost {
    fn output(&mut self) -> impl std::io::Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl std::io::Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

fn project_key(index: usize) -> String {
    format!("proj-{index:03}")
}

async fn mount_projects(server: &MockServer, count: usize) {
    let pages = (count + 1).div_ceil(100);
    for page in 1..=pages {
        let start = (page - 1) * 100;
        let end = (start + 100).min(count);
        let components: Vec<Value> = (start..end)
            .map(|i| json!({"key": project_key(i), "name": format!("Project {i}")}))
            .collect();

        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .and(query_param("p", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"components": components})))
            .mount(server)
            .await;
    }
}

async fn mount_full_measures(server: &MockServer) {
    let measures: Vec<Value> = METRIC_CATALOG
        .iter()
        .map(|def| match def.key {
            "alert_status" => json!({"metric": def.key, "value": "OK"}),
            "coverage" => json!({"metric": def.key, "value": "87.456"}),
            "sqale_index" => json!({"metric": def.key, "value": "500"}),
            key if key.starts_with("new_") => json!({"metric": def.key, "period": {"index": 1, "value": "7"}}),
            _ => json!({"metric": def.key, "value": "3"}),
        })
        .collect();

    Mock::given(method("GET"))
        .and(path(MEASURES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"component": {"measures": measures}})))
        .mount(server)
        .await;
}

async fn run(host: &mut TestHost, server: &MockServer, extra: &[&str]) -> sonar_stats_lib::Result<()> {
    let uri = server.uri();
    let mut args = vec!["sonar-stats", "--url", uri.as_str(), "--token", "tok", "--log-level", "none", "--color", "never"];
    args.extend_from_slice(extra);
    sonar_stats_lib::run(host, args).await
}

#[tokio::test]
async fn test_report_with_one_failing_project() {
    let server = MockServer::start().await;
    mount_projects(&server, 150).await;

    Mock::given(method("GET"))
        .and(path(MEASURES_PATH))
        .and(query_param("component", project_key(42)))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .with_priority(1)
        .mount(&server)
        .await;

    mount_full_measures(&server).await;

    let mut host = TestHost::default();
    let result = run(&mut host, &server, &[]).await;

    assert!(result.is_ok(), "run failed: {result:?}, stderr: {}", host.error_str());
    assert_eq!(host.exit_code, None);

    let output = host.output_str();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 151, "expected a header and 150 rows");
    assert!(lines[0].starts_with("ProjectKey,ProjectName,alert_status,"));

    let rows = &lines[1..];
    let failed: Vec<&&str> = rows.iter().filter(|row| row.contains(",UNKNOWN,")).collect();
    assert_eq!(failed.len(), 1);
    assert!(failed[0].starts_with("proj-042,Project 42,UNKNOWN,"));
    assert!(failed[0].split(',').skip(3).all(|field| field == "0"));

    let populated = rows.iter().filter(|row| row.contains(",PASSED,")).count();
    assert_eq!(populated, 149);

    let search_requests = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == SEARCH_PATH)
        .count();
    assert_eq!(search_requests, 2);
}

#[tokio::test]
async fn test_rows_follow_enumeration_order() {
    let server = MockServer::start().await;
    mount_projects(&server, 3).await;
    mount_full_measures(&server).await;

    let mut host = TestHost::default();
    run(&mut host, &server, &[]).await.unwrap();

    let output = host.output_str();
    let keys: Vec<&str> = output.lines().skip(1).filter_map(|l| l.split(',').next()).collect();
    assert_eq!(keys, ["proj-000", "proj-001", "proj-002"]);
}

#[tokio::test]
async fn test_table_precedes_csv() {
    let server = MockServer::start().await;
    mount_projects(&server, 2).await;
    mount_full_measures(&server).await;

    let mut host = TestHost::default();
    run(&mut host, &server, &["--table"]).await.unwrap();

    let output = host.output_str();
    let table_pos = output.find("Quality Gate").unwrap();
    let csv_pos = output.find("ProjectKey,ProjectName").unwrap();
    assert!(table_pos < csv_pos);
    assert!(output.contains("87.5%"));
    assert!(output.contains("1d"));
    assert!(output.contains("\n\nProjectKey,ProjectName,"));
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
async fn test_csv_written_to_file() {
    let server = MockServer::start().await;
    mount_projects(&server, 2).await;
    mount_full_measures(&server).await;

    let tmp = tempfile::tempdir().unwrap();
    let csv_path = tmp.path().join("report.csv");
    let csv_arg = csv_path.to_str().unwrap();

    let mut host = TestHost::default();
    run(&mut host, &server, &["--csv", csv_arg]).await.unwrap();

    assert!(host.output_buf.is_empty());
    let written = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(written.lines().count(), 3);
    assert!(written.contains("proj-001,Project 1,PASSED,"));
}

#[tokio::test]
async fn test_no_projects_is_not_an_error() {
    let server = MockServer::start().await;
    mount_projects(&server, 0).await;

    let mut host = TestHost::default();
    let result = run(&mut host, &server, &[]).await;

    assert!(result.is_ok());
    assert_eq!(host.exit_code, None);
    assert!(host.output_buf.is_empty());
    assert!(host.error_str().contains("No projects found"));
}

#[tokio::test]
async fn test_enumeration_failure_exits_non_zero() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let mut host = TestHost::default();
    let result = run(&mut host, &server, &[]).await;

    assert!(result.is_err());
    assert_eq!(host.exit_code, Some(1));
    assert!(host.output_buf.is_empty());
    assert!(!host.error_str().is_empty());
}

#[tokio::test]
async fn test_parse_error_exits_non_zero() {
    let server = MockServer::start().await;
    mount_projects(&server, 1).await;

    Mock::given(method("GET"))
        .and(path(MEASURES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"component": {"key": "proj-000"}})))
        .mount(&server)
        .await;

    let mut host = TestHost::default();
    let result = run(&mut host, &server, &[]).await;

    assert!(result.is_err());
    assert_eq!(host.exit_code, Some(1));
    assert!(host.output_buf.is_empty());
}

#[tokio::test]
async fn test_placeholder_token_fails_before_any_request() {
    let server = MockServer::start().await;
    let uri = server.uri();

    let mut host = TestHost::default();
    let result = sonar_stats_lib::run(
        &mut host,
        ["sonar-stats", "--url", uri.as_str(), "--token", "your_token_here", "--log-level", "none"],
    )
    .await;

    assert!(result.is_err());
    assert_eq!(host.exit_code, Some(1));
    assert!(host.error_str().contains("placeholder"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_placeholder_url_fails() {
    let mut host = TestHost::default();
    let result = sonar_stats_lib::run(
        &mut host,
        ["sonar-stats", "--url", "YOUR_SONARQUBE_URL", "--token", "tok", "--log-level", "none"],
    )
    .await;

    assert!(result.is_err());
    assert_eq!(host.exit_code, Some(1));
    assert!(host.output_buf.is_empty());
}
