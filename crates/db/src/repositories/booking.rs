use crate::models::{DbBooking, DbParticipant};
use chrono::NaiveDate;
use eyre::Result;
use sqlx::{Pool, Postgres};

/// Every stored revision whose start falls within `[from, to]`.
pub async fn get_bookings_in_range(
    pool: &Pool<Postgres>,
    from: NaiveDate,
    to: NaiveDate,
    activity_id: Option<&str>,
) -> Result<Vec<DbBooking>> {
    let rows = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, booking_id, activity_id, activity_title,
               start_date_time::text AS start_date_time,
               status, created_at, total_price
        FROM activity_bookings
        WHERE start_date_time >= $1::date
          AND start_date_time < ($2::date + 1)
          AND ($3::text IS NULL OR activity_id = $3)
        ORDER BY start_date_time ASC, id ASC
        "#,
    )
    .bind(from)
    .bind(to)
    .bind(activity_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_participants_for_bookings(
    pool: &Pool<Postgres>,
    booking_row_ids: &[i64],
) -> Result<Vec<DbParticipant>> {
    if booking_row_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = sqlx::query_as::<_, DbParticipant>(
        r#"
        SELECT booking_row_id, category, quantity, passenger_name, age
        FROM booking_participants
        WHERE booking_row_id = ANY($1)
        ORDER BY booking_row_id ASC, id ASC
        "#,
    )
    .bind(booking_row_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
