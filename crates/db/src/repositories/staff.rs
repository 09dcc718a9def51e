use crate::models::DbStaff;
use eyre::Result;
use sqlx::{Pool, Postgres};
use tourdesk_core::models::assignment::StaffRole;

pub async fn get_active_staff_by_role(pool: &Pool<Postgres>, role: StaffRole) -> Result<Vec<DbStaff>> {
    let rows = sqlx::query_as::<_, DbStaff>(
        r#"
        SELECT id, name, role
        FROM staff
        WHERE role = $1 AND active
        ORDER BY name ASC
        "#,
    )
    .bind(role.as_str())
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
