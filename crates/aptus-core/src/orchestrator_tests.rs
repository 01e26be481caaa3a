use aptus_config::AptusConfig;
use chrono::TimeZone;
use serde_json::{json, Value};
use tempfile::TempDir;

use super::*;
use crate::error::ScrapeError;
use crate::fake_browser::fixtures::{index, key_details_nine_rows, with_customer, without_customer};
use crate::fake_browser::pages::{page, timezone_table};
use crate::fake_browser::{FakeBrowser, BASE, PASSWORD, USERNAME};

fn navigator(browser: FakeBrowser) -> Navigator<FakeBrowser> {
    let config = AptusConfig {
        base_url: BASE.to_string(),
        username: USERNAME.to_string(),
        password: PASSWORD.to_string(),
        ..Default::default()
    };
    Navigator::new(browser, &config)
}

fn authorities(browser: FakeBrowser) -> FakeBrowser {
    browser
        .page("Authority/Index", index("Authority", &["7", "12"]))
        .page(
            "Authority/Details/7",
            page(&timezone_table(&["Vardagar", "Helger", "Alltid"])),
        )
        .page("Authority/Details/12", page(&timezone_table(&[])))
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_dump_family_parse() {
    assert_eq!("authorities".parse::<DumpFamily>().unwrap(), DumpFamily::Authorities);
    assert_eq!("Customers".parse::<DumpFamily>().unwrap(), DumpFamily::Customers);
    assert!("keys".parse::<DumpFamily>().is_err());
    assert_eq!(DumpFamily::Customers.to_string(), "customers");
}

#[test]
fn test_dump_dir_name() {
    let now = Local.with_ymd_and_hms(2024, 5, 1, 9, 7, 33).unwrap();
    assert_eq!(dump_dir_name(now), "2024-05-01-0907");
}

#[tokio::test]
async fn test_create_dump_dir_is_reused() {
    let root = TempDir::new().unwrap();
    let now = Local.with_ymd_and_hms(2024, 5, 1, 9, 7, 0).unwrap();

    let first = create_dump_dir(root.path(), now).await.unwrap();
    let second = create_dump_dir(root.path(), now).await.unwrap();
    assert_eq!(first, second);
    assert!(first.is_dir());
    assert!(first.ends_with("2024-05-01-0907"));
}

#[tokio::test]
async fn test_write_document_is_pretty_utf8() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("doc.json");

    write_document(&path, &json!([{"name": "Tvättstuga"}])).await.unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text, "[\n  {\n    \"name\": \"Tvättstuga\"\n  }\n]");
}

#[tokio::test]
async fn test_authorities_document() {
    let root = TempDir::new().unwrap();
    let mut nav = navigator(authorities(FakeBrowser::new()));

    let summary = Orchestrator::new(&mut nav, 0..0, root.path())
        .dump_all(&[DumpFamily::Authorities])
        .await
        .unwrap();

    assert_eq!(summary.authorities, Some(2));
    assert_eq!(summary.customers, None);
    assert_eq!(summary.files.len(), 1);

    let doc = read_json(&summary.dump_dir.join("authorities_dump.json"));
    assert_eq!(
        doc,
        json!([
            {"id": "7", "name": "7", "timezones": ["Vardagar", "Helger", "Alltid"]},
            {"id": "12", "name": "12", "timezones": []}
        ])
    );
    assert!(!summary.dump_dir.join("customer_dump.json").exists());
}

#[tokio::test]
async fn test_customer_range_skips_absent_ids() {
    let root = TempDir::new().unwrap();
    let mut browser = FakeBrowser::new();
    for id in [0, 2, 4] {
        browser = with_customer(browser, id, &[]);
    }
    for id in [1, 3] {
        browser = without_customer(browser, id);
    }
    let mut nav = navigator(browser);

    let summary = Orchestrator::new(&mut nav, 0..5, root.path())
        .dump_all(&[DumpFamily::Customers])
        .await
        .unwrap();

    assert_eq!(summary.customers, Some(3));
    assert_eq!(summary.absent_customers, 2);

    let doc = read_json(&summary.dump_dir.join("customer_dump.json"));
    let ids: Vec<u64> = doc
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![0, 2, 4]);
    assert_eq!(doc[0]["entryPhone"], Value::Null);
    assert_eq!(doc[0]["keys"], json!([]));
}

#[tokio::test]
async fn test_absent_customer_is_left_out() {
    let root = TempDir::new().unwrap();
    let browser = without_customer(with_customer(FakeBrowser::new(), 41, &["5"]), 42);
    let mut nav = navigator(browser);

    let summary = Orchestrator::new(&mut nav, 41..43, root.path())
        .dump_all(&[DumpFamily::Customers])
        .await
        .unwrap();

    let doc = read_json(&summary.dump_dir.join("customer_dump.json"));
    assert_eq!(doc.as_array().unwrap().len(), 1);
    assert_eq!(doc[0]["id"], 41);
    assert_eq!(doc[0]["keys"][0]["id"], "5");
}

#[tokio::test]
async fn test_shape_error_writes_no_customer_file() {
    let root = TempDir::new().unwrap();
    let browser = authorities(with_customer(FakeBrowser::new(), 1, &["5"]))
        .page("CustomerKeys/Details/5", key_details_nine_rows());
    let mut nav = navigator(browser);

    let err = Orchestrator::new(&mut nav, 1..2, root.path())
        .dump_all(&[])
        .await
        .unwrap_err();
    assert!(matches!(err, ScrapeError::SchemaViolation { .. }));

    let dirs: Vec<PathBuf> = std::fs::read_dir(root.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(dirs.len(), 1);
    assert!(dirs[0].join("authorities_dump.json").exists());
    assert!(!dirs[0].join("customer_dump.json").exists());
}

#[tokio::test]
async fn test_families_run_in_fixed_order_once() {
    let root = TempDir::new().unwrap();
    let browser = with_customer(authorities(FakeBrowser::new()), 0, &[]);
    let mut nav = navigator(browser);

    let summary = Orchestrator::new(&mut nav, 0..1, root.path())
        .dump_all(&[
            DumpFamily::Customers,
            DumpFamily::Authorities,
            DumpFamily::Customers,
        ])
        .await
        .unwrap();

    let names: Vec<String> = summary
        .files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["authorities_dump.json", "customer_dump.json"]);
    assert_eq!(nav.browser().navigations()[0], "Authority/Index");
}
