use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Bookable slots per activity
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS activity_availability (
            id BIGSERIAL PRIMARY KEY,
            activity_id VARCHAR(64) NOT NULL,
            activity_title VARCHAR(255) NOT NULL,
            local_date DATE NOT NULL,
            local_time TIME NOT NULL,
            vacancy_opening INTEGER NOT NULL DEFAULT 0,
            vacancy_sold INTEGER NOT NULL DEFAULT 0,
            vacancy_available INTEGER NOT NULL DEFAULT 0,
            status VARCHAR(32) NOT NULL DEFAULT 'AVAILABLE'
        );
        "#,
    )
    .execute(pool)
    .await?;

    // One row per booking revision; booking_id is shared across revisions
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS activity_bookings (
            id BIGSERIAL PRIMARY KEY,
            booking_id VARCHAR(64) NOT NULL,
            activity_id VARCHAR(64) NOT NULL,
            activity_title VARCHAR(255) NOT NULL,
            start_date_time TIMESTAMP NOT NULL,
            status VARCHAR(32) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            total_price DOUBLE PRECISION NOT NULL DEFAULT 0
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS booking_participants (
            id BIGSERIAL PRIMARY KEY,
            booking_row_id BIGINT NOT NULL REFERENCES activity_bookings(id) ON DELETE CASCADE,
            category VARCHAR(255) NULL,
            quantity INTEGER NULL,
            passenger_name VARCHAR(255) NULL,
            age INTEGER NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS staff (
            id VARCHAR(64) PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            role VARCHAR(32) NOT NULL,
            active BOOLEAN NOT NULL DEFAULT TRUE
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS staff_assignments (
            activity_id VARCHAR(64) NOT NULL,
            local_date DATE NOT NULL,
            local_time TIME NOT NULL,
            staff_id VARCHAR(64) NOT NULL REFERENCES staff(id),
            role VARCHAR(32) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            PRIMARY KEY (activity_id, local_date, local_time, staff_id, role)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_availability_date ON activity_availability(local_date);
        CREATE INDEX IF NOT EXISTS idx_availability_activity ON activity_availability(activity_id);
        CREATE INDEX IF NOT EXISTS idx_bookings_start ON activity_bookings(start_date_time);
        CREATE INDEX IF NOT EXISTS idx_bookings_booking_id ON activity_bookings(booking_id);
        CREATE INDEX IF NOT EXISTS idx_participants_booking_row ON booking_participants(booking_row_id);
        CREATE INDEX IF NOT EXISTS idx_assignments_date ON staff_assignments(local_date);
        CREATE INDEX IF NOT EXISTS idx_assignments_staff ON staff_assignments(staff_id);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
