use crate::domain::{
    models::event::{Event, EventFilter},
    ports::EventRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteEventRepo {
    pool: SqlitePool,
}

impl SqliteEventRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for SqliteEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            r#"INSERT INTO events (
                id, title, description, image_url, date, time, location,
                organizer_id, ticket_price, total_seats, available_seats,
                category, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *"#,
        )
        .bind(&event.id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.image_url)
        .bind(event.date)
        .bind(&event.time)
        .bind(&event.location)
        .bind(&event.organizer_id)
        .bind(event.ticket_price)
        .bind(event.total_seats)
        .bind(event.available_seats)
        .bind(&event.category)
        .bind(event.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, filter: &EventFilter) -> Result<Vec<Event>, AppError> {
        let mut sql = String::from("SELECT * FROM events");
        let mut clauses: Vec<&str> = Vec::new();

        if filter.category().is_some() {
            clauses.push("category = ?");
        }
        if filter.search().is_some() {
            clauses.push(
                "(LOWER(title) LIKE ? OR LOWER(description) LIKE ? OR LOWER(location) LIKE ?)",
            );
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY date ASC, time ASC");

        let mut query = sqlx::query_as::<_, Event>(&sql);
        if let Some(category) = filter.category() {
            query = query.bind(category.to_string());
        }
        if let Some(term) = filter.search() {
            let pattern = format!("%{}%", term.to_lowercase());
            query = query.bind(pattern.clone()).bind(pattern.clone()).bind(pattern);
        }

        query.fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            r#"UPDATE events SET
                title=?, description=?, image_url=?, date=?, time=?, location=?,
                ticket_price=?, category=?
               WHERE id=? RETURNING *"#,
        )
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.image_url)
        .bind(event.date)
        .bind(&event.time)
        .bind(&event.location)
        .bind(event.ticket_price)
        .bind(&event.category)
        .bind(&event.id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Event not found".into()));
        }
        Ok(())
    }

    async fn resize_capacity(&self, id: &str, new_total: i32) -> Result<Event, AppError> {
        // Both assignments evaluate against the current row, so a
        // reservation racing this edit is folded into the booked count
        // instead of being overwritten.
        let resized = sqlx::query_as::<_, Event>(
            "UPDATE events
             SET available_seats = ? - (total_seats - available_seats), total_seats = ?
             WHERE id = ? AND total_seats - available_seats <= ?
             RETURNING *",
        )
        .bind(new_total)
        .bind(new_total)
        .bind(id)
        .bind(new_total)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        match resized {
            Some(event) => Ok(event),
            None => {
                let exists = sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM events WHERE id = ?",
                )
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

                if exists == 0 {
                    Err(AppError::NotFound("Event not found".into()))
                } else {
                    Err(AppError::Validation(
                        "Capacity cannot drop below the seats already booked".into(),
                    ))
                }
            }
        }
    }

    async fn reserve_seats(&self, id: &str, seats: i32) -> Result<i32, AppError> {
        // Guard and decrement in one statement. Two racing reservations
        // serialize on this row write; the loser re-evaluates the guard
        // against the committed count and fails cleanly.
        let remaining = sqlx::query_scalar::<_, i32>(
            "UPDATE events SET available_seats = available_seats - ?
             WHERE id = ? AND available_seats >= ?
             RETURNING available_seats",
        )
        .bind(seats)
        .bind(id)
        .bind(seats)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        match remaining {
            Some(remaining) => Ok(remaining),
            None => {
                let exists = sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM events WHERE id = ?",
                )
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

                if exists == 0 {
                    Err(AppError::NotFound("Event not found".into()))
                } else {
                    Err(AppError::InsufficientSeats)
                }
            }
        }
    }

    async fn release_seats(&self, id: &str, seats: i32) -> Result<i32, AppError> {
        sqlx::query_scalar::<_, i32>(
            "UPDATE events SET available_seats = MIN(total_seats, available_seats + ?)
             WHERE id = ? RETURNING available_seats",
        )
        .bind(seats)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or(AppError::NotFound("Event not found".into()))
    }
}
