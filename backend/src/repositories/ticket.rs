//! Ticket repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use ticketly_shared::models::Ticket;
use uuid::Uuid;

/// Ticket record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TicketRecord {
    pub id: Uuid,
    pub order_id: Uuid,
    pub ticket_type_id: Uuid,
    pub ticket_code: String,
    pub is_checked_in: bool,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<TicketRecord> for Ticket {
    fn from(record: TicketRecord) -> Self {
        Self {
            id: record.id,
            order_id: record.order_id,
            ticket_type_id: record.ticket_type_id,
            ticket_code: record.ticket_code,
            is_checked_in: record.is_checked_in,
            checked_in_at: record.checked_in_at,
            created_at: record.created_at,
        }
    }
}

/// Ticket repository for database operations
pub struct TicketRepository;

impl TicketRepository {
    /// Insert a ticket within the caller's transaction
    pub async fn create(
        conn: &mut sqlx::PgConnection,
        order_id: Uuid,
        ticket_type_id: Uuid,
        ticket_code: &str,
    ) -> Result<TicketRecord> {
        let record = sqlx::query_as::<_, TicketRecord>(
            r#"
            INSERT INTO tickets (order_id, ticket_type_id, ticket_code)
            VALUES ($1, $2, $3)
            RETURNING id, order_id, ticket_type_id, ticket_code, is_checked_in,
                      checked_in_at, created_at
            "#,
        )
        .bind(order_id)
        .bind(ticket_type_id)
        .bind(ticket_code)
        .fetch_one(conn)
        .await?;

        Ok(record)
    }

    /// List tickets belonging to an order
    pub async fn list_for_order(pool: &PgPool, order_id: Uuid) -> Result<Vec<TicketRecord>> {
        let records = sqlx::query_as::<_, TicketRecord>(
            r#"
            SELECT id, order_id, ticket_type_id, ticket_code, is_checked_in,
                   checked_in_at, created_at
            FROM tickets
            WHERE order_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(order_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Find ticket by its unique code
    pub async fn find_by_code(pool: &PgPool, ticket_code: &str) -> Result<Option<TicketRecord>> {
        let record = sqlx::query_as::<_, TicketRecord>(
            r#"
            SELECT id, order_id, ticket_type_id, ticket_code, is_checked_in,
                   checked_in_at, created_at
            FROM tickets
            WHERE ticket_code = $1
            "#,
        )
        .bind(ticket_code)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Mark a ticket checked in. Returns the updated row, or None when the
    /// ticket was already checked in (the guard is in the WHERE clause so
    /// a double scan cannot race).
    pub async fn check_in(pool: &PgPool, ticket_code: &str) -> Result<Option<TicketRecord>> {
        let record = sqlx::query_as::<_, TicketRecord>(
            r#"
            UPDATE tickets
            SET is_checked_in = TRUE, checked_in_at = NOW()
            WHERE ticket_code = $1 AND is_checked_in = FALSE
            RETURNING id, order_id, ticket_type_id, ticket_code, is_checked_in,
                      checked_in_at, created_at
            "#,
        )
        .bind(ticket_code)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    // Queries are exercised by the integration suite (requires database).
}
