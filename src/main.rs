//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.
//!
//! Usage:
//!   exam-grader                              interactive menu
//!   exam-grader parse-key <key.pdf> <out.json>
//!   exam-grader grade <key.pdf> <paper.pdf>

use exam_grader::adapters::ai::OpenAiAdapter;
use exam_grader::adapters::documents::PdfTextExtractor;
use exam_grader::adapters::ocr::HttpOcrAdapter;
use exam_grader::adapters::persistence::FsArtifactStore;
use exam_grader::adapters::report::MarkdownReportAdapter;
use exam_grader::adapters::ui::tui::TuiInputPort;
use exam_grader::ports::{GenerationPort, InputPort, TextExtractorPort};
use exam_grader::shared::config::AppConfig;
use exam_grader::usecases::{AnswerKeyService, EvaluationService, GradingWorkflow};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv::dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "config load failed, falling back to environment defaults");
        AppConfig::default()
    });

    let output_dir = PathBuf::from(cfg.output_dir_or_default());
    let extractor: Arc<dyn TextExtractorPort> = Arc::new(PdfTextExtractor::new());
    let answer_keys = Arc::new(AnswerKeyService::new(
        Arc::clone(&extractor),
        cfg.keyword_count_or_default(),
    ));

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["parse-key", key, out] => {
            let count = answer_keys.export_json(Path::new(key), Path::new(out)).await?;
            if count == 0 {
                anyhow::bail!("No questions parsed. Check the PDF format.");
            }
            println!("Answer key JSON created: {} questions -> {}", count, out);
            Ok(())
        }
        ["grade", key, paper] => {
            let grading = build_grading(&cfg, extractor, &output_dir)?;
            let outcome = grading.grade_paper(Path::new(key), Path::new(paper)).await?;
            println!("{}", serde_json::to_string_pretty(&outcome.result)?);
            for path in &outcome.reports {
                println!("Report: {}", path.display());
            }
            Ok(())
        }
        [] => {
            exam_grader::adapters::ui::init_ui();
            let grading = match build_grading(&cfg, extractor, &output_dir) {
                Ok(g) => Some(Arc::new(g)),
                Err(e) => {
                    warn!(error = %e, "grading disabled");
                    None
                }
            };
            let input_port: Arc<dyn InputPort> =
                Arc::new(TuiInputPort::new(answer_keys, grading, output_dir));
            input_port
                .run()
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            Ok(())
        }
        _ => {
            anyhow::bail!(
                "usage: exam-grader [parse-key <key.pdf> <out.json> | grade <key.pdf> <paper.pdf>]"
            )
        }
    }
}

/// Build the grading workflow. Fails when the generation key or OCR endpoint is missing.
fn build_grading(
    cfg: &AppConfig,
    extractor: Arc<dyn TextExtractorPort>,
    output_dir: &Path,
) -> anyhow::Result<GradingWorkflow> {
    let api_key = cfg.require_ai_api_key()?;
    let ocr_url = cfg.require_ocr_api_url()?;

    info!(
        model = %cfg.ai_model_or_default(),
        url = %cfg.ai_api_url_or_default(),
        "generation service configured"
    );
    let generator: Arc<dyn GenerationPort> = Arc::new(OpenAiAdapter::new(
        cfg.ai_api_url_or_default(),
        api_key,
        cfg.ai_model_or_default(),
    ));

    let ocr = HttpOcrAdapter::new(
        ocr_url,
        Duration::from_secs(cfg.ocr_timeout_secs_or_default()),
    )?;

    Ok(GradingWorkflow::new(
        Arc::new(ocr),
        extractor,
        Arc::new(EvaluationService::new(generator)),
        Arc::new(FsArtifactStore::new(output_dir)),
        Arc::new(MarkdownReportAdapter::new(output_dir)),
    ))
}
