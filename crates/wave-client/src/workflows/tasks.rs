//! Task posting.

use serde_json::json;

use wave_auth::SessionContext;
use wave_core::entities::{Task, TaskDraft};
use wave_core::enums::TaskStatus;
use wave_store::WaveStore;

use crate::error::ClientError;
use crate::views::map_document;

/// Post a new task owned by the signed-in user.
///
/// Tasks posted in-app always start `open` and non-featured; promotional
/// placement goes through the import utility instead.
///
/// # Errors
///
/// - `ClientError::Unauthenticated` when signed out;
/// - `ClientError::InvalidTitle` for an empty trimmed title (raised
///   before any store call).
pub async fn post_task(
    store: &WaveStore,
    session: &SessionContext,
    draft: TaskDraft,
) -> Result<Task, ClientError> {
    let Some(identity) = session.current() else {
        return Err(ClientError::Unauthenticated {
            resume_to: "/post-task".to_string(),
        });
    };

    let title = draft.title.trim();
    if title.is_empty() {
        return Err(ClientError::InvalidTitle);
    }

    let doc = store
        .add(
            "tasks",
            json!({
                "title": title,
                "category": draft.category,
                "description": draft.description,
                "deadline": draft.deadline,
                "budget": draft.budget,
                "owner": identity.as_user_ref(),
                "featured": false,
                "status": TaskStatus::Open,
                "symbolic_logo": draft.symbolic_logo,
            }),
        )
        .await?;

    tracing::info!(task_id = %doc.id, "task posted");
    Ok(map_document(&doc)?)
}
