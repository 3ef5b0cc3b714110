//! Ticket type repository for database operations

use anyhow::Result;
use rust_decimal::Decimal;
use sqlx::PgPool;
use ticketly_shared::models::TicketType;
use uuid::Uuid;

/// Ticket type record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TicketTypeRecord {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity_available: i32,
    pub quantity_sold: i32,
}

impl From<TicketTypeRecord> for TicketType {
    fn from(record: TicketTypeRecord) -> Self {
        Self {
            id: record.id,
            event_id: record.event_id,
            name: record.name,
            description: record.description,
            price: record.price,
            quantity_available: record.quantity_available,
            quantity_sold: record.quantity_sold,
        }
    }
}

/// Input for creating a ticket type
#[derive(Debug, Clone)]
pub struct NewTicketType {
    pub event_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity_available: i32,
}

/// Ticket type repository for database operations
pub struct TicketTypeRepository;

impl TicketTypeRepository {
    /// Create a ticket type for an event
    pub async fn create(pool: &PgPool, ticket_type: NewTicketType) -> Result<TicketTypeRecord> {
        let record = sqlx::query_as::<_, TicketTypeRecord>(
            r#"
            INSERT INTO ticket_types (event_id, name, description, price, quantity_available)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, event_id, name, description, price, quantity_available, quantity_sold
            "#,
        )
        .bind(ticket_type.event_id)
        .bind(ticket_type.name)
        .bind(ticket_type.description)
        .bind(ticket_type.price)
        .bind(ticket_type.quantity_available)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// List ticket types for an event
    pub async fn list_for_event(pool: &PgPool, event_id: Uuid) -> Result<Vec<TicketTypeRecord>> {
        let records = sqlx::query_as::<_, TicketTypeRecord>(
            r#"
            SELECT id, event_id, name, description, price, quantity_available, quantity_sold
            FROM ticket_types
            WHERE event_id = $1
            ORDER BY price
            "#,
        )
        .bind(event_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Find ticket type by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<TicketTypeRecord>> {
        let record = sqlx::query_as::<_, TicketTypeRecord>(
            r#"
            SELECT id, event_id, name, description, price, quantity_available, quantity_sold
            FROM ticket_types
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Atomically reserve `quantity` tickets of this type
    ///
    /// Returns false when not enough remain; the guard lives in the WHERE
    /// clause so concurrent orders cannot oversell.
    pub async fn reserve(
        pool: &mut sqlx::PgConnection,
        id: Uuid,
        quantity: i32,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE ticket_types
            SET quantity_sold = quantity_sold + $2
            WHERE id = $1 AND quantity_sold + $2 <= quantity_available
            "#,
        )
        .bind(id)
        .bind(quantity)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    // Queries are exercised by the integration suite (requires database).
}
