//! Bulk featured-task import.
//!
//! Reads a local JSON array of task drafts and writes each as a new task
//! flagged `featured: true`. Records are independent: one malformed draft
//! is counted and skipped, the rest still import.

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

use wave_config::WaveConfig;
use wave_core::entities::TaskDraft;
use wave_store::WaveStore;

use crate::cli::ImportFeaturedArgs;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub failed: usize,
}

pub async fn handle(args: &ImportFeaturedArgs, config: &WaveConfig) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let drafts: Vec<TaskDraft> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of task drafts", args.file.display()))?;

    let db_path = args.db.clone().unwrap_or_else(|| config.store.path.clone());
    let store = WaveStore::open_local(&db_path)
        .await
        .with_context(|| format!("failed to open store at {db_path}"))?;

    let bar = ProgressBar::new(drafts.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{wide_bar:.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.set_message("importing featured tasks");

    let summary = import_drafts(&store, drafts, Some(&bar)).await;
    bar.finish_with_message("done");

    println!(
        "Imported {} featured task(s), {} failed",
        summary.imported, summary.failed
    );
    Ok(())
}

/// Import drafts one by one, counting per-record outcomes.
pub async fn import_drafts(
    store: &WaveStore,
    drafts: Vec<TaskDraft>,
    bar: Option<&ProgressBar>,
) -> ImportSummary {
    let mut summary = ImportSummary::default();

    for draft in drafts {
        if let Some(bar) = bar {
            bar.inc(1);
        }

        let title = draft.title.trim();
        if title.is_empty() {
            tracing::warn!("skipping draft with empty title");
            summary.failed += 1;
            continue;
        }

        let result = store
            .add(
                "tasks",
                json!({
                    "title": title,
                    "category": draft.category,
                    "description": draft.description,
                    "deadline": draft.deadline,
                    "budget": draft.budget,
                    "featured": true,
                    "status": draft.status.unwrap_or_default(),
                    "symbolic_logo": draft.symbolic_logo,
                }),
            )
            .await;

        match result {
            Ok(doc) => {
                tracing::debug!(task_id = %doc.id, title, "imported featured task");
                summary.imported += 1;
            }
            Err(error) => {
                tracing::warn!(title, %error, "failed to import draft");
                summary.failed += 1;
            }
        }
    }

    summary
}
