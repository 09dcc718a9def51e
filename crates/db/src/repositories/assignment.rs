use crate::models::DbAssignment;
use chrono::NaiveDate;
use eyre::{eyre, Result};
use sqlx::{Pool, Postgres};
use tourdesk_core::{models::assignment::StaffRole, time_key::TimeKey};

pub async fn get_assignments_in_range(
    pool: &Pool<Postgres>,
    from: NaiveDate,
    to: NaiveDate,
    activity_id: Option<&str>,
) -> Result<Vec<DbAssignment>> {
    let rows = sqlx::query_as::<_, DbAssignment>(
        r#"
        SELECT a.activity_id,
               a.local_date::text AS local_date, a.local_time::text AS local_time,
               a.staff_id, s.name AS staff_name, a.role
        FROM staff_assignments a
        JOIN staff s ON s.id = a.staff_id
        WHERE a.local_date BETWEEN $1 AND $2
          AND ($3::text IS NULL OR a.activity_id = $3)
        ORDER BY a.local_date ASC, a.local_time ASC, a.created_at ASC
        "#,
    )
    .bind(from)
    .bind(to)
    .bind(activity_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn insert_assignment(
    pool: &Pool<Postgres>,
    slot: &TimeKey,
    staff_id: &str,
    role: StaffRole,
) -> Result<()> {
    tracing::debug!("Adding {} {} to slot {}", role, staff_id, slot);

    sqlx::query(
        r#"
        INSERT INTO staff_assignments (activity_id, local_date, local_time, staff_id, role)
        VALUES ($1, $2::date, $3::time, $4, $5)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(slot.resource_id())
    .bind(slot.date())
    .bind(slot.time())
    .bind(staff_id)
    .bind(role.as_str())
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn delete_assignment(
    pool: &Pool<Postgres>,
    slot: &TimeKey,
    staff_id: &str,
    role: StaffRole,
) -> Result<()> {
    tracing::debug!("Removing {} {} from slot {}", role, staff_id, slot);

    let result = sqlx::query(
        r#"
        DELETE FROM staff_assignments
        WHERE activity_id = $1
          AND local_date = $2::date
          AND local_time = $3::time
          AND staff_id = $4
          AND role = $5
        "#,
    )
    .bind(slot.resource_id())
    .bind(slot.date())
    .bind(slot.time())
    .bind(staff_id)
    .bind(role.as_str())
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(eyre!("No {} assignment for {} on slot {}", role, staff_id, slot));
    }

    Ok(())
}
