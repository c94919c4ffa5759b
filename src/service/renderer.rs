use comfy_table::{presets, CellAlignment, Table};

use crate::models::{BillingPeriod, ColumnReport, SpendColumn, SpendMatrix};

const DIVIDER_WIDTH: usize = 50;

/// 渲染结果: 推送主题 + 正文
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub subject: String,
    pub body: String,
}

/// 按列渲染纯文本报表, 整体缓冲成一条消息
///
/// 诊断信息只走日志, 不进正文.
pub fn render(matrix: &SpendMatrix, period: &BillingPeriod) -> RenderedReport {
    let mut body = String::new();

    for column in matrix.columns() {
        // 行合计列不单独出报表
        if *column == SpendColumn::Total {
            continue;
        }

        let report = matrix.column_report(column);
        if report.entries.is_empty() {
            tracing::info!("# {} Insignificant", column.label());
            body.push_str(column.label());
            body.push_str(" Insignificant\n");
        } else {
            body.push_str(&"=".repeat(DIVIDER_WIDTH));
            body.push('\n');
            body.push_str(&column_table(&report));
            body.push('\n');
        }
        body.push('\n');
    }

    RenderedReport {
        subject: format!("AWS Bill Breakup {}", period.date_range()),
        body,
    }
}

fn column_table(report: &ColumnReport) -> String {
    let mut table = Table::new();
    table.load_preset(presets::ASCII_HORIZONTAL_ONLY);
    table.set_header(vec!["ProductName", "ProductFamily", report.column.label()]);
    for entry in &report.entries {
        table.add_row(vec![
            entry.product_name.clone(),
            entry.product_family.clone(),
            entry.amount.to_string(),
        ]);
    }
    if let Some(amount_column) = table.column_mut(2) {
        amount_column.set_cell_alignment(CellAlignment::Right);
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LineItem;
    use crate::service::aggregate;
    use chrono::NaiveDate;

    fn item(product: &str, family: &str, tag: Option<&str>, cost: &str) -> LineItem {
        LineItem {
            line_item_id: format!("{product}-{cost}"),
            product_name: product.to_string(),
            product_family: family.to_string(),
            project_tag: tag.map(str::to_string),
            unblended_cost: cost.parse().unwrap(),
        }
    }

    fn march_period() -> BillingPeriod {
        BillingPeriod::last_full_month(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
    }

    #[test]
    fn subject_carries_the_date_range() {
        let matrix = aggregate(&Vec::new());
        let report = render(&matrix, &march_period());
        assert_eq!(report.subject, "AWS Bill Breakup 20240201-20240301");
    }

    #[test]
    fn significant_column_gets_divider_and_table() {
        let ledger = vec![
            item("Amazon EC2", "Compute", Some("crm"), "10.00"),
            item("Amazon S3", "Storage", Some("crm"), "2.50"),
        ];
        let report = render(&aggregate(&ledger), &march_period());

        assert!(report.body.contains(&"=".repeat(DIVIDER_WIDTH)));
        assert!(report.body.contains("Amazon EC2"));
        assert!(report.body.contains("10.00"));
        assert!(report.body.contains("12.50")); // 合计行
    }

    #[test]
    fn column_rounding_to_zero_is_marked_insignificant() {
        let ledger = vec![
            item("Amazon EC2", "Compute", Some("crm"), "10.00"),
            item("AWS Lambda", "Serverless", Some("portal"), "0.001"),
        ];
        let report = render(&aggregate(&ledger), &march_period());

        assert!(report.body.contains("portal Insignificant"));
        // 不显著的列不出表格
        assert!(!report.body.contains("AWS Lambda"));
    }

    #[test]
    fn untagged_spend_reports_under_blank_label() {
        let ledger = vec![
            item("Amazon EC2", "Compute", Some("crm"), "10.00"),
            item("Amazon EC2", "Compute", None, "5.00"),
        ];
        let report = render(&aggregate(&ledger), &march_period());
        assert!(report.body.contains("(blank)"));
    }

    #[test]
    fn empty_ledger_marks_untagged_column_insignificant() {
        let report = render(&aggregate(&Vec::new()), &march_period());
        assert!(report.body.contains("(blank) Insignificant"));
        assert!(!report.body.contains(&"=".repeat(DIVIDER_WIDTH)));
    }

    #[test]
    fn column_blocks_are_separated_by_blank_lines() {
        let ledger = vec![item("Amazon EC2", "Compute", Some("crm"), "10.00")];
        let report = render(&aggregate(&ledger), &march_period());
        // 每个列块后跟一个空行
        assert!(report.body.ends_with("\n\n"));
    }
}
