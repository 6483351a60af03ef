use crate::domain::{
    models::booking::{Booking, BookingView, STATUS_CANCELLED},
    ports::BookingRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

const VIEW_SELECT: &str = r#"
    SELECT b.id, b.user_id, b.event_id, b.seats, b.total_amount, b.status, b.created_at,
           e.title AS event_title, e.date AS event_date, e.time AS event_time,
           e.location AS event_location, e.image_url AS event_image_url
    FROM bookings b
    JOIN events e ON e.id = b.event_id
"#;

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, user_id, event_id, seats, total_amount, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(&booking.id)
        .bind(&booking.user_id)
        .bind(&booking.event_id)
        .bind(booking.seats)
        .bind(booking.total_amount)
        .bind(&booking.status)
        .bind(booking.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_view_by_id(&self, id: &str) -> Result<Option<BookingView>, AppError> {
        let sql = format!("{} WHERE b.id = $1", VIEW_SELECT);
        sqlx::query_as::<_, BookingView>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<BookingView>, AppError> {
        let sql = format!("{} WHERE b.user_id = $1 ORDER BY b.created_at DESC", VIEW_SELECT);
        sqlx::query_as::<_, BookingView>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE event_id = $1 ORDER BY created_at DESC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn cancel(&self, id: &str) -> Result<Booking, AppError> {
        let cancelled = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $1 WHERE id = $2 AND status != $1 RETURNING *",
        )
        .bind(STATUS_CANCELLED)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        match cancelled {
            Some(booking) => Ok(booking),
            None => {
                let exists = sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM bookings WHERE id = $1",
                )
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

                if exists == 0 {
                    Err(AppError::NotFound("Booking not found".into()))
                } else {
                    Err(AppError::AlreadyCancelled)
                }
            }
        }
    }
}
