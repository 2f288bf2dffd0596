//! mail-labeler - classifies a demo batch of emails and prints insights.
//!
//! Usage: `mail-labeler [settings.json]`

use anyhow::Context;
use mail_labeler::config::Settings;
use mail_labeler::services::AnalysisService;
use mail_labeler::storage::Database;

const SEED_EMAILS: &[&str] = &[
    "本周五下午3点召开项目进度会议，请准时参加。",
    "双十一大促销，全场5折起，买一送一！",
    "亲爱的用户，您的账户有重要更新，请及时查看。",
    "免费赢取iPhone15，立即点击链接参与！",
    "紧急：服务器出现故障，请立即处理！",
    "周末家庭聚会，记得准时到场。",
];

const NEW_EMAILS: &[&str] = &[
    "尊敬的客户，我们推出了新的优惠活动，全场商品享受8折优惠！",
    "明天下午2点团队会议，讨论季度报告事宜。",
    "恭喜您获得免费旅游机会，立即回复领取大奖！",
    "系统维护通知：今晚10点至12点进行系统升级。",
];

#[tokio::main]
async fn main() {
    let settings_path = match std::env::args().nth(1) {
        Some(path) => Ok(path.into()),
        None => Settings::default_path(),
    };
    let settings = match settings_path.and_then(Settings::load) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load settings: {e}");
            std::process::exit(1);
        }
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.logging.filter)),
        )
        .init();

    tracing::info!("Starting mail-labeler");

    if let Err(e) = run(settings).await {
        tracing::error!("Application error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(settings: Settings) -> anyhow::Result<()> {
    let db_path = settings.database.resolve_path()?;
    let db = Database::open(&db_path)
        .await
        .with_context(|| format!("opening database at {}", db_path.display()))?;

    let service = AnalysisService::with_rules(
        db.clone(),
        db.clone(),
        settings.classifier.registry(),
        settings.classifier.matcher(),
    );

    let catalog = db.label_catalog().await?;
    tracing::info!(labels = catalog.len(), "label catalog loaded");

    let outcomes = service.batch_classify_and_save(SEED_EMAILS.iter()).await;
    let saved = outcomes.iter().filter(|o| o.is_ok()).count();
    tracing::info!(saved, total = outcomes.len(), "seed emails processed");

    for email in NEW_EMAILS {
        let report = service.classify_and_report(email).await?;
        tracing::info!(
            sample_id = %report.sample_id,
            label = %report.analysis.primary_label,
            matches = report.analysis.match_count(),
            "analyzed email: {}",
            email
        );
    }

    tracing::info!("=== work samples ===");
    for sample in service.query_by_label("work", 10).await? {
        tracing::info!(id = %sample.id, "{}", sample.content);
    }

    tracing::info!("=== samples mentioning 会议 ===");
    for sample in service.search("会议", None).await? {
        tracing::info!(label = %sample.label, "{}", sample.content);
    }

    let insights = service.insights().await?;
    tracing::info!(
        rule_count = insights.rule_count,
        labels = ?insights.label_names,
        "insights"
    );
    println!("{}", serde_json::to_string_pretty(&insights)?);

    Ok(())
}
