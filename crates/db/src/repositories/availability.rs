use crate::models::DbAvailability;
use chrono::NaiveDate;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn get_availabilities_in_range(
    pool: &Pool<Postgres>,
    from: NaiveDate,
    to: NaiveDate,
    activity_id: Option<&str>,
) -> Result<Vec<DbAvailability>> {
    let rows = sqlx::query_as::<_, DbAvailability>(
        r#"
        SELECT activity_id, activity_title,
               local_date::text AS local_date, local_time::text AS local_time,
               vacancy_opening, vacancy_sold, vacancy_available, status
        FROM activity_availability
        WHERE local_date BETWEEN $1 AND $2
          AND ($3::text IS NULL OR activity_id = $3)
        ORDER BY local_date ASC, local_time ASC
        "#,
    )
    .bind(from)
    .bind(to)
    .bind(activity_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
