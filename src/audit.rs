use serde_json::Value;
use uuid::Uuid;

use crate::db::DbPool;

/// Append to `audit_logs` after a successful write.
///
/// The write being audited has already committed, so a failed insert is
/// logged and otherwise ignored.
pub async fn record(
    pool: &DbPool,
    user_id: Option<Uuid>,
    action: &str,
    resource: &str,
    metadata: Value,
) {
    let inserted = sqlx::query(
        r#"
        INSERT INTO audit_logs (id, user_id, action, resource, metadata)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(action)
    .bind(resource)
    .bind(&metadata)
    .execute(pool)
    .await;

    match inserted {
        Ok(_) => tracing::debug!(action, resource, "audit recorded"),
        Err(err) => tracing::warn!(error = %err, action, resource, %metadata, "audit log failed"),
    }
}
