//! Order placement and ticket issuance
//!
//! Placing an order reserves inventory, creates the order row, and issues
//! one ticket per requested seat inside a single transaction.

use crate::error::ApiError;
use crate::repositories::{
    NewOrder, OrderRepository, TicketRepository, TicketTypeRepository,
};
use rust_decimal::Decimal;
use sqlx::PgPool;
use ticketly_shared::models::{OrderStatus, Ticket};
use ticketly_shared::types::{OrderResponse, PlaceOrderRequest};
use ticketly_shared::validation;
use uuid::Uuid;

/// Order operations
pub struct OrderService;

impl OrderService {
    /// Place an order for a ticket type
    pub async fn place_order(
        pool: &PgPool,
        user_id: Uuid,
        req: PlaceOrderRequest,
    ) -> Result<OrderResponse, ApiError> {
        validation::validate_quantity(req.quantity).map_err(ApiError::Validation)?;

        let ticket_type = TicketTypeRepository::find_by_id(pool, req.ticket_type_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Ticket type not found".to_string()))?;

        if ticket_type.event_id != req.event_id {
            return Err(ApiError::BadRequest(
                "Ticket type does not belong to this event".to_string(),
            ));
        }

        let total_amount = ticket_type.price * Decimal::from(req.quantity);

        let mut tx = pool.begin().await.map_err(ApiError::Database)?;

        let reserved = TicketTypeRepository::reserve(&mut *tx, req.ticket_type_id, req.quantity)
            .await
            .map_err(ApiError::Internal)?;
        if !reserved {
            return Err(ApiError::Conflict(
                "Not enough tickets available".to_string(),
            ));
        }

        let order = OrderRepository::create(
            &mut *tx,
            NewOrder {
                user_id,
                event_id: req.event_id,
                total_amount,
                status: OrderStatus::Completed,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        let mut tickets = Vec::with_capacity(req.quantity as usize);
        for _ in 0..req.quantity {
            let code = Uuid::new_v4().simple().to_string();
            let ticket = TicketRepository::create(&mut *tx, order.id, req.ticket_type_id, &code)
                .await
                .map_err(ApiError::Internal)?;
            tickets.push(Ticket::from(ticket));
        }

        tx.commit().await.map_err(ApiError::Database)?;

        let order = order.into_order().map_err(ApiError::Internal)?;
        Ok(OrderResponse::from_parts(order, tickets))
    }

    /// List the user's orders with their tickets
    pub async fn list_orders(pool: &PgPool, user_id: Uuid) -> Result<Vec<OrderResponse>, ApiError> {
        let records = OrderRepository::list_for_user(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;

        let mut responses = Vec::with_capacity(records.len());
        for record in records {
            let tickets = TicketRepository::list_for_order(pool, record.id)
                .await
                .map_err(ApiError::Internal)?
                .into_iter()
                .map(Ticket::from)
                .collect();
            let order = record.into_order().map_err(ApiError::Internal)?;
            responses.push(OrderResponse::from_parts(order, tickets));
        }
        Ok(responses)
    }

    /// Fetch one of the user's orders
    ///
    /// Another user's order reads as not-found rather than forbidden, so
    /// order IDs can't be enumerated.
    pub async fn get_order(
        pool: &PgPool,
        user_id: Uuid,
        order_id: Uuid,
    ) -> Result<OrderResponse, ApiError> {
        let record = OrderRepository::find_by_id(pool, order_id)
            .await
            .map_err(ApiError::Internal)?
            .filter(|record| record.user_id == user_id)
            .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))?;

        let tickets = TicketRepository::list_for_order(pool, record.id)
            .await
            .map_err(ApiError::Internal)?
            .into_iter()
            .map(Ticket::from)
            .collect();
        let order = record.into_order().map_err(ApiError::Internal)?;
        Ok(OrderResponse::from_parts(order, tickets))
    }

    /// Check a ticket in by its code
    pub async fn check_in(pool: &PgPool, ticket_code: &str) -> Result<Ticket, ApiError> {
        let existing = TicketRepository::find_by_code(pool, ticket_code)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Ticket not found".to_string()))?;

        if existing.is_checked_in {
            return Err(ApiError::Conflict(
                "Ticket already checked in".to_string(),
            ));
        }

        TicketRepository::check_in(pool, ticket_code)
            .await
            .map_err(ApiError::Internal)?
            .map(Ticket::from)
            .ok_or_else(|| ApiError::Conflict("Ticket already checked in".to_string()))
    }
}

#[cfg(test)]
mod tests {
    // Order flows need a database; covered by the integration suite.
}
