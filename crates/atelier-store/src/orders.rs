//! Accessors for [`Order`] records.
//!
//! An order is the canonical record of a hire.  The client's "orders"
//! list and the creator's "bookings" list are role views over the same
//! collection, so confirming a payment updates both sides in one write.

use atelier_shared::constants::{KEY_CONVERSATIONS, KEY_ORDERS};
use atelier_shared::types::{OrderId, UserId};
use chrono::Utc;

use crate::conversations::touch_or_create;
use crate::error::{Result, StoreError};
use crate::models::{Order, OrderStatus, PartyRole};
use crate::store::{read_collection, write_collection, Store};

impl Store {
    /// Append a pending order and create-or-touch the conversation
    /// between client and creator, atomically.
    pub fn record_hire(&self, order: Order) -> Result<Order> {
        let client = order.counterpart(PartyRole::Creator);
        let creator = order.counterpart(PartyRole::Client);
        let note = format!("{} sent a booking request", client.name);

        self.transaction(&[KEY_ORDERS, KEY_CONVERSATIONS], |conn| {
            let mut orders: Vec<Order> = read_collection(conn, KEY_ORDERS)?;
            orders.push(order.clone());
            write_collection(conn, KEY_ORDERS, &orders)?;

            touch_or_create(conn, &client, &creator, &note)?;

            tracing::info!(
                order = %order.id,
                client = %order.client_id,
                creator = %order.creator_id,
                service = %order.service_id,
                "hire recorded"
            );
            Ok(order)
        })
    }

    /// Fetch a single order by id.
    pub fn order(&self, id: OrderId) -> Result<Order> {
        self.read::<Order>(KEY_ORDERS)?
            .into_iter()
            .find(|o| o.id == id)
            .ok_or(StoreError::NotFound)
    }

    /// Orders placed by `user` (the client-side view), newest first.
    pub fn orders_for_client(&self, user: UserId) -> Result<Vec<Order>> {
        let mut orders: Vec<Order> = self.read(KEY_ORDERS)?;
        orders.retain(|o| o.client_id == user);
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Orders received by `user` (the creator-side "bookings" view),
    /// newest first.
    pub fn bookings_for_creator(&self, user: UserId) -> Result<Vec<Order>> {
        let mut orders: Vec<Order> = self.read(KEY_ORDERS)?;
        orders.retain(|o| o.creator_id == user);
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Confirm payment: flip status to `confirmed` and stamp `paidAt`.
    ///
    /// Targets exactly one record by id; a repeat booking of the same
    /// service by the same client is a distinct order and is unaffected.
    pub fn mark_order_paid(&self, id: OrderId) -> Result<Order> {
        self.mutate_order(id, |order| {
            order.status = OrderStatus::Confirmed;
            order.paid_at = Some(Utc::now());
        })
    }

    /// Flag a confirmed order as delivered.
    pub fn mark_order_completed(&self, id: OrderId) -> Result<Order> {
        self.mutate_order(id, |order| {
            order.status = OrderStatus::Completed;
        })
    }

    fn mutate_order(&self, id: OrderId, f: impl FnOnce(&mut Order)) -> Result<Order> {
        self.transaction(&[KEY_ORDERS], |conn| {
            let mut orders: Vec<Order> = read_collection(conn, KEY_ORDERS)?;
            let order = orders
                .iter_mut()
                .find(|o| o.id == id)
                .ok_or(StoreError::NotFound)?;
            f(order);
            let updated = order.clone();
            write_collection(conn, KEY_ORDERS, &orders)?;
            Ok(updated)
        })
    }
}

#[cfg(test)]
mod tests {
    use atelier_shared::types::ServiceId;

    use super::*;
    use crate::database::Database;
    use crate::models::{Conversation, Party};

    fn open_temp() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("test.db")).expect("should open");
        (dir, Store::open(db))
    }

    fn party(name: &str) -> Party {
        Party {
            id: UserId::new(),
            name: name.to_string(),
            avatar: format!("https://example.com/{name}.png"),
        }
    }

    fn order(client: &Party, creator: &Party, service: ServiceId) -> Order {
        Order {
            id: OrderId::new(),
            client_id: client.id,
            client_name: client.name.clone(),
            client_avatar: client.avatar.clone(),
            creator_id: creator.id,
            creator_name: creator.name.clone(),
            creator_avatar: creator.avatar.clone(),
            service_id: service,
            service_name: "Logo design".to_string(),
            description: "A new logo".to_string(),
            budget: "$120".to_string(),
            deadline: "To be discussed".to_string(),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            paid_at: None,
        }
    }

    #[test]
    fn hire_appends_order_and_creates_conversation() {
        let (_dir, store) = open_temp();
        let ana = party("ana");
        let bea = party("bea");
        let service = ServiceId::new();

        let placed = store.record_hire(order(&ana, &bea, service)).unwrap();
        assert_eq!(placed.status, OrderStatus::Pending);

        let orders: Vec<Order> = store.read(KEY_ORDERS).unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].client_id, ana.id);
        assert_eq!(orders[0].creator_id, bea.id);
        assert_eq!(orders[0].service_id, service);

        let convo = store
            .conversation_between(ana.id, bea.id)
            .unwrap()
            .expect("conversation created");
        assert_eq!(convo.last_message, "ana sent a booking request");
    }

    #[test]
    fn repeat_hire_touches_existing_conversation() {
        let (_dir, store) = open_temp();
        let ana = party("ana");
        let bea = party("bea");
        let service = ServiceId::new();

        store.record_hire(order(&ana, &bea, service)).unwrap();
        store.record_hire(order(&ana, &bea, service)).unwrap();

        let orders: Vec<Order> = store.read(KEY_ORDERS).unwrap();
        assert_eq!(orders.len(), 2, "repeat bookings are distinct orders");
        assert_ne!(orders[0].id, orders[1].id);

        let conversations: Vec<Conversation> = store.read(KEY_CONVERSATIONS).unwrap();
        assert_eq!(conversations.len(), 1);
    }

    #[test]
    fn payment_confirms_one_record_visible_to_both_roles() {
        let (_dir, store) = open_temp();
        let ana = party("ana");
        let bea = party("bea");
        let service = ServiceId::new();

        let first = store.record_hire(order(&ana, &bea, service)).unwrap();
        let repeat = store.record_hire(order(&ana, &bea, service)).unwrap();

        let paid = store.mark_order_paid(first.id).unwrap();
        assert_eq!(paid.status, OrderStatus::Confirmed);
        assert!(paid.paid_at.is_some());

        // the same record through each role view
        let as_client = store.orders_for_client(ana.id).unwrap();
        let as_creator = store.bookings_for_creator(bea.id).unwrap();
        let client_side = as_client.iter().find(|o| o.id == first.id).unwrap();
        let creator_side = as_creator.iter().find(|o| o.id == first.id).unwrap();
        assert_eq!(client_side.status, OrderStatus::Confirmed);
        assert_eq!(creator_side.status, OrderStatus::Confirmed);
        assert_eq!(client_side.paid_at, creator_side.paid_at);

        // the repeat booking for the same tuple is untouched
        assert_eq!(store.order(repeat.id).unwrap().status, OrderStatus::Pending);
    }

    #[test]
    fn completion_follows_confirmation() {
        let (_dir, store) = open_temp();
        let ana = party("ana");
        let bea = party("bea");

        let placed = store
            .record_hire(order(&ana, &bea, ServiceId::new()))
            .unwrap();
        store.mark_order_paid(placed.id).unwrap();
        let done = store.mark_order_completed(placed.id).unwrap();
        assert_eq!(done.status, OrderStatus::Completed);
    }

    #[test]
    fn paying_a_missing_order_is_not_found() {
        let (_dir, store) = open_temp();
        let err = store.mark_order_paid(OrderId::new()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }
}
