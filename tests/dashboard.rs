use std::io::Write;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use hr_dashboard::data::{DataLoader, HrColumns};
use hr_dashboard::web::{build_router, AppState};
use serde_json::Value;
use tower::ServiceExt;

const HR_CSV: &str = "\
Employee_Name,Department,GenderID,Sex,Age,PerfScoreID,PerformanceScore,Termd,TermReason
\"Adinolfi, Wilson\",Production,1,M,40,4,Exceeds,0,N/A-StillEmployed
\"Ait Sidi, Karthikeyan\",IT/IS,1,M,47,3,Fully Meets,1,career change
\"Akinkuolie, Sarah\",Production,0,F,33,3,Fully Meets,1,hours
\"Alagbe, Trina\",Production,0,F,35,3,Fully Meets,0,N/A-StillEmployed
\"Anderson, Carol\",Sales,0,F,41,3,Fully Meets,1,return to school
\"Anderson, Linda\",Sales,0,F,44,4,Exceeds,0,N/A-StillEmployed
\"Andreola, Colby\",IT/IS,0,F,,1,PIP,0,N/A-StillEmployed
";

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

async fn get(router: &Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(router, uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

fn hr_router() -> (Router, tempfile::NamedTempFile) {
    let file = write_csv(HR_CSV);
    let router = build_router(AppState::load(file.path()));
    (router, file)
}

#[tokio::test]
async fn dashboard_renders_metrics_and_charts() {
    let (router, _file) = hr_router();
    let (status, html) = get(&router, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Human Resources Analytics Dashboard"));
    assert!(html.contains("Total Employees"));
    assert!(html.contains(">7<"));
    assert!(html.contains(">4 / 3<"));
    assert_eq!(html.matches("<svg").count(), 6);
    assert!(!html.contains(r#"class="error""#));
}

#[tokio::test]
async fn dashboard_applies_sidebar_selection() {
    let (router, _file) = hr_router();
    let (status, html) = get(&router, "/?filtered=1&department=Sales&gender=0").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(">2<"));
    assert!(html.contains(r#"value="Sales" checked"#));
    assert!(!html.contains(r#"value="Production" checked"#));
}

#[tokio::test]
async fn dashboard_with_nothing_selected_shows_empty_panels() {
    let (router, _file) = hr_router();
    let (status, html) = get(&router, "/?filtered=1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(html.matches("No data for the current selection").count(), 6);
}

#[tokio::test]
async fn missing_dataset_is_shown_not_fatal() {
    let router = build_router(AppState::load("no/such/HRDataset_v14.csv"));

    let (status, html) = get(&router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("could not be loaded"));
    assert!(html.contains("no/such/HRDataset_v14.csv"));

    let (status, body) = get_json(&router, "/api/count/Department").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().contains("Dataset unavailable"));

    let (status, _) = get(&router, "/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn malformed_dataset_is_shown_not_fatal() {
    let file = write_csv("Department,Sex\nSales,F,extra,more\n");
    let router = build_router(AppState::load(file.path()));

    let (status, html) = get(&router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("could not be loaded: Failed to load CSV"));

    let (status, _) = get_json(&router, "/api/summary").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn missing_role_column_only_breaks_its_chart() {
    let file = write_csv(HR_CSV);
    let dataset = DataLoader::load_csv(file.path()).unwrap();
    let columns = HrColumns {
        term_reason: "ReasonForLeaving".to_string(),
        ..HrColumns::default()
    };
    let router = build_router(AppState::from_dataset(dataset).with_columns(columns));

    let (status, html) = get(&router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(html.matches("<svg").count(), 5);
    assert!(html.contains(
        r#"id="chart-term-reason"><h3>Termination Reasons</h3><div class="error">"#
    ));
    assert!(html.contains("ReasonForLeaving"));

    let (_, body) = get_json(&router, "/api/columns").await;
    assert_eq!(body["roles"]["term_reason"], "ReasonForLeaving");
}

#[tokio::test]
async fn count_endpoint_orders_and_totals() {
    let (router, _file) = hr_router();
    let (status, body) = get_json(&router, "/api/count/Department").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["column"], "Department");
    assert_eq!(body["total"], 7);
    let counts = body["counts"].as_array().unwrap();
    assert_eq!(counts[0]["category"], "Production");
    assert_eq!(counts[0]["count"], 3);
    assert_eq!(counts[1]["category"], "IT/IS");
    assert_eq!(counts[2]["category"], "Sales");
}

#[tokio::test]
async fn count_endpoint_buckets_blank_cells() {
    let (router, _file) = hr_router();
    let (_, body) = get_json(&router, "/api/count/Age").await;

    assert_eq!(body["total"], 7);
    let unknown = body["counts"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["category"] == "Unknown")
        .unwrap();
    assert_eq!(unknown["count"], 1);
}

#[tokio::test]
async fn unknown_column_is_not_found() {
    let (router, _file) = hr_router();
    let (status, body) = get_json(&router, "/api/count/nonexistent_column").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("nonexistent_column"));
}

#[tokio::test]
async fn crosstab_rows_match_counts() {
    let (router, _file) = hr_router();
    let (status, table) = get_json(&router, "/api/crosstab/PerformanceScore/Termd").await;
    let (_, counts) = get_json(&router, "/api/count/PerformanceScore").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(table["row_column"], "PerformanceScore");
    assert_eq!(table["columns"], serde_json::json!(["0", "1"]));

    let rows = table["rows"].as_array().unwrap();
    let counts = counts["counts"].as_array().unwrap();
    assert_eq!(rows.len(), counts.len());
    for (row, count) in rows.iter().zip(counts) {
        assert_eq!(row["category"], count["category"]);
        let row_total: u64 = row["counts"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["count"].as_u64().unwrap())
            .sum();
        assert_eq!(row_total, count["count"].as_u64().unwrap());
    }
}

#[tokio::test]
async fn summary_respects_selection() {
    let (router, _file) = hr_router();
    let (status, summary) = get_json(
        &router,
        "/api/summary?filtered=1&department=Production&gender=0&gender=1",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total_employees"], 3);
    assert_eq!(summary["active"], 2);
    assert_eq!(summary["terminated"], 1);
    assert_eq!(summary["avg_age"], 36.0);
    assert_eq!(summary["avg_performance"], 3.33);
}

#[tokio::test]
async fn columns_endpoint_lists_schema() {
    let (router, _file) = hr_router();
    let (status, body) = get_json(&router, "/api/columns").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rows"], 7);
    assert_eq!(body["columns"][1], "Department");
    assert_eq!(body["roles"]["terminated"], "Termd");
}

#[tokio::test]
async fn empty_dataset_counts_nothing() {
    let file =
        write_csv("Department,GenderID,Sex,Age,PerfScoreID,PerformanceScore,Termd,TermReason\n");
    let router = build_router(AppState::load(file.path()));

    let (status, body) = get_json(&router, "/api/count/Department").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert_eq!(body["counts"], serde_json::json!([]));

    let (status, html) = get(&router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("No data for the current selection"));
}
