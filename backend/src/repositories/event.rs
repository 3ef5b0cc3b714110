//! Event repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use ticketly_shared::models::Event;
use uuid::Uuid;

/// Event record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRecord {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub max_tickets: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventRecord> for Event {
    fn from(record: EventRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            location: record.location,
            starts_at: record.starts_at,
            ends_at: record.ends_at,
            max_tickets: record.max_tickets,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Input for creating an event
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub max_tickets: Option<i32>,
}

/// Event repository for database operations
pub struct EventRepository;

impl EventRepository {
    /// Create a new event
    pub async fn create(pool: &PgPool, event: NewEvent) -> Result<EventRecord> {
        let record = sqlx::query_as::<_, EventRecord>(
            r#"
            INSERT INTO events (title, description, location, starts_at, ends_at, max_tickets)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, description, location, starts_at, ends_at, max_tickets,
                      created_at, updated_at
            "#,
        )
        .bind(event.title)
        .bind(event.description)
        .bind(event.location)
        .bind(event.starts_at)
        .bind(event.ends_at)
        .bind(event.max_tickets)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// List events, newest start date first
    pub async fn list(pool: &PgPool) -> Result<Vec<EventRecord>> {
        let records = sqlx::query_as::<_, EventRecord>(
            r#"
            SELECT id, title, description, location, starts_at, ends_at, max_tickets,
                   created_at, updated_at
            FROM events
            ORDER BY starts_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Find event by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<EventRecord>> {
        let record = sqlx::query_as::<_, EventRecord>(
            r#"
            SELECT id, title, description, location, starts_at, ends_at, max_tickets,
                   created_at, updated_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }
}
