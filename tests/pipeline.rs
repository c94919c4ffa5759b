use bigdecimal::BigDecimal;
use bill_breakup_rust::config::{ReportConfig, StorageConfig};
use bill_breakup_rust::models::{BillingPeriod, ProductKey, SpendColumn};
use bill_breakup_rust::{aggregate, create_store, render, LedgerLoader};
use chrono::NaiveDate;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use tempfile::TempDir;

const CSV_HEADER: &str = "identity/LineItemId,lineItem/UsageAccountId,product/ProductName,product/productFamily,resourceTags/user:PID,lineItem/UnblendedCost";

fn gzip(data: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

fn amount(s: &str) -> BigDecimal {
    s.parse().unwrap()
}

#[tokio::test]
async fn full_month_report_pipeline() {
    let dir = TempDir::new().unwrap();
    let prefix = dir
        .path()
        .join("costandusagereports/MyCostAndUsageReport/20240201-20240301");
    std::fs::create_dir_all(&prefix).unwrap();

    let csv = format!(
        "{CSV_HEADER}\n\
         i-1,111,Amazon Elastic Compute Cloud,Compute Instance,crm,120.50\n\
         i-2,111,Amazon Elastic Compute Cloud,Compute Instance,,7.25\n\
         i-3,111,Amazon Simple Storage Service,Storage,crm,2.25\n\
         i-4,111,AWS Lambda,Serverless,portal,0.001\n"
    );
    std::fs::write(prefix.join("report-1.csv.gz"), gzip(&csv)).unwrap();
    std::fs::write(
        prefix.join("MyCostAndUsageReport-Manifest.json"),
        r#"{"assemblyId":"20240201T000000Z","reportKeys":["costandusagereports/MyCostAndUsageReport/20240201-20240301/report-1.csv.gz"]}"#,
    )
    .unwrap();

    let store = create_store(&StorageConfig {
        provider: "local".to_string(),
        bucket: dir.path().to_string_lossy().to_string(),
        region: None,
        endpoint: None,
        access_key_id: None,
        secret_access_key: None,
    })
    .unwrap();

    let loader = LedgerLoader::new(
        store,
        ReportConfig {
            path_prefix: "costandusagereports/MyCostAndUsageReport".to_string(),
            manifest_file_name: "MyCostAndUsageReport-Manifest.json".to_string(),
        },
    );

    let period = BillingPeriod::last_full_month(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    assert_eq!(period.date_range(), "20240201-20240301");

    let ledger = loader.load(&period).await.unwrap();
    assert_eq!(ledger.len(), 4);
    assert!(ledger[1].project_tag.is_none());

    let matrix = aggregate(&ledger);
    assert_eq!(matrix.grand_total(), amount("130.001"));
    assert_eq!(
        matrix.cell(
            &ProductKey::new("Amazon Elastic Compute Cloud", "Compute Instance"),
            &SpendColumn::Tag("crm".to_string())
        ),
        amount("120.50")
    );
    assert_eq!(matrix.total(&SpendColumn::Untagged), amount("7.25"));

    let report = render(&matrix, &period);
    assert_eq!(report.subject, "AWS Bill Breakup 20240201-20240301");
    assert!(report.body.contains(&"=".repeat(50)));
    assert!(report.body.contains("Amazon Elastic Compute Cloud"));
    assert!(report.body.contains("122.75")); // crm列合计
    assert!(report.body.contains("(blank)"));
    // portal列唯一一行为0.001, 四舍五入后整列为0, 标记为不显著
    assert!(report.body.contains("portal Insignificant"));
    assert!(!report.body.contains("AWS Lambda"));
}
