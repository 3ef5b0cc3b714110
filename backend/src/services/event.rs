//! Event catalog service

use crate::error::ApiError;
use crate::repositories::{
    EventRepository, NewEvent, NewTicketType, TicketTypeRepository,
};
use rust_decimal::Decimal;
use sqlx::PgPool;
use ticketly_shared::models::{Event, TicketType};
use ticketly_shared::types::{CreateEventRequest, CreateTicketTypeRequest};
use ticketly_shared::validation;
use uuid::Uuid;

/// Event catalog operations
pub struct EventService;

impl EventService {
    /// Create an event
    pub async fn create_event(pool: &PgPool, req: CreateEventRequest) -> Result<Event, ApiError> {
        validation::validate_event_title(&req.title).map_err(ApiError::Validation)?;
        if let Some(ends_at) = req.ends_at {
            if ends_at < req.starts_at {
                return Err(ApiError::Validation(
                    "Event cannot end before it starts".to_string(),
                ));
            }
        }
        if matches!(req.max_tickets, Some(n) if n < 1) {
            return Err(ApiError::Validation(
                "max_tickets must be positive".to_string(),
            ));
        }

        let record = EventRepository::create(
            pool,
            NewEvent {
                title: req.title,
                description: req.description,
                location: req.location,
                starts_at: req.starts_at,
                ends_at: req.ends_at,
                max_tickets: req.max_tickets,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        Ok(record.into())
    }

    /// List all events
    pub async fn list_events(pool: &PgPool) -> Result<Vec<Event>, ApiError> {
        let records = EventRepository::list(pool).await.map_err(ApiError::Internal)?;
        Ok(records.into_iter().map(Event::from).collect())
    }

    /// Fetch a single event
    pub async fn get_event(pool: &PgPool, id: Uuid) -> Result<Event, ApiError> {
        EventRepository::find_by_id(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .map(Event::from)
            .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))
    }

    /// Add a ticket type to an event
    pub async fn create_ticket_type(
        pool: &PgPool,
        event_id: Uuid,
        req: CreateTicketTypeRequest,
    ) -> Result<TicketType, ApiError> {
        if req.name.trim().is_empty() {
            return Err(ApiError::Validation("Name cannot be empty".to_string()));
        }
        if req.price < Decimal::ZERO {
            return Err(ApiError::Validation(
                "Price cannot be negative".to_string(),
            ));
        }
        if req.quantity_available < 1 {
            return Err(ApiError::Validation(
                "quantity_available must be positive".to_string(),
            ));
        }

        // The event must exist before anything can be sold for it
        Self::get_event(pool, event_id).await?;

        let record = TicketTypeRepository::create(
            pool,
            NewTicketType {
                event_id,
                name: req.name,
                description: req.description,
                price: req.price,
                quantity_available: req.quantity_available,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        Ok(record.into())
    }

    /// List ticket types for an event
    pub async fn list_ticket_types(
        pool: &PgPool,
        event_id: Uuid,
    ) -> Result<Vec<TicketType>, ApiError> {
        Self::get_event(pool, event_id).await?;

        let records = TicketTypeRepository::list_for_event(pool, event_id)
            .await
            .map_err(ApiError::Internal)?;
        Ok(records.into_iter().map(TicketType::from).collect())
    }
}
