use bill_breakup_rust::models::BillingPeriod;
use bill_breakup_rust::{
    aggregate, create_notifier, create_store, render, AppConfig, LedgerLoader,
};
use chrono::Utc;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 本地时间格式; 诊断信息走stderr, 报表正文独占stdout
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    // 加载配置
    let config = AppConfig::from_env();
    info!("Starting bill breakup job with config: {:?}", config);

    // 账期: 上一个完整自然月
    let period = BillingPeriod::last_full_month(Utc::now().date_naive());
    info!("Billing period {}", period.date_range());

    // 构建存储与推送
    let store = create_store(&config.storage)?;
    let notifier = create_notifier(&config.notify)?;

    // 加载 -> 汇总 -> 渲染 -> 推送, 单条流水线, 失败即中止
    let loader = LedgerLoader::new(store, config.report.clone());
    let ledger = loader.load(&period).await?;
    info!("{} line items loaded", ledger.len());

    let matrix = aggregate(&ledger);
    let report = render(&matrix, &period);

    notifier.publish(&report.subject, &report.body).await?;
    info!("Bill breakup {} completed", period.date_range());

    Ok(())
}
