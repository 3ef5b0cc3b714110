//! Order repository for database operations
//!
//! Order status is stored as text; parsing back into `OrderStatus` is
//! fallible and surfaces schema drift instead of hiding it.

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use ticketly_shared::models::{Order, OrderStatus};
use uuid::Uuid;

/// Order record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub total_amount: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderRecord {
    /// Convert to the domain model, parsing the stored status
    pub fn into_order(self) -> Result<Order> {
        let status: OrderStatus = self.status.parse()?;
        Ok(Order {
            id: self.id,
            user_id: self.user_id,
            event_id: self.event_id,
            total_amount: self.total_amount,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Input for creating an order
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub total_amount: Decimal,
    pub status: OrderStatus,
}

/// Order repository for database operations
pub struct OrderRepository;

impl OrderRepository {
    /// Insert an order. Takes a connection so it can join the caller's
    /// transaction alongside ticket issuance.
    pub async fn create(conn: &mut sqlx::PgConnection, order: NewOrder) -> Result<OrderRecord> {
        let record = sqlx::query_as::<_, OrderRecord>(
            r#"
            INSERT INTO orders (user_id, event_id, total_amount, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, event_id, total_amount, status, created_at, updated_at
            "#,
        )
        .bind(order.user_id)
        .bind(order.event_id)
        .bind(order.total_amount)
        .bind(order.status.as_str())
        .fetch_one(conn)
        .await?;

        Ok(record)
    }

    /// List a user's orders, newest first
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<OrderRecord>> {
        let records = sqlx::query_as::<_, OrderRecord>(
            r#"
            SELECT id, user_id, event_id, total_amount, status, created_at, updated_at
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Find order by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<OrderRecord>> {
        let record = sqlx::query_as::<_, OrderRecord>(
            r#"
            SELECT id, user_id, event_id, total_amount, status, created_at, updated_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_order_rejects_unknown_status() {
        let record = OrderRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            total_amount: Decimal::new(1000, 2),
            status: "mangled".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(record.into_order().is_err());
    }

    #[test]
    fn test_into_order_parses_status() {
        let record = OrderRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            total_amount: Decimal::new(2500, 2),
            status: "completed".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let order = record.into_order().unwrap();
        assert_eq!(order.status, OrderStatus::Completed);
    }
}
