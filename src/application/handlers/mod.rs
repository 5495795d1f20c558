//! Application use case handlers.
//!
//! Each handler owns its ports behind `Arc<dyn ..>` trait objects, performs
//! the durable write first, then runs live emissions and notification records
//! as post-commit steps.

pub mod admin;
pub mod booking;
pub mod expense;
pub mod notification;
pub mod order;

/// In-memory port implementations shared by handler tests.
#[cfg(test)]
pub(crate) mod support {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::domain::booking::{Booking, BookingStats, Scooter};
    use crate::domain::catalog::{Canteen, MenuItem};
    use crate::domain::expense::Expense;
    use crate::domain::foundation::{
        CanteenId, DomainError, ErrorCode, MenuItemId, NotificationId, OrderId, UserId,
    };
    use crate::domain::live::LiveEvent;
    use crate::domain::notification::Notification;
    use crate::domain::order::{Order, OrderStats};
    use crate::ports::{
        BookingRepository, CatalogReader, ExpenseRepository, LiveEventEmitter,
        NotificationRepository, OrderRepository, ScooterRepository,
    };

    #[derive(Default)]
    pub struct RecordingEmitter {
        broadcasts: Mutex<Vec<LiveEvent>>,
        targeted: Mutex<Vec<(UserId, LiveEvent)>>,
    }

    impl RecordingEmitter {
        pub fn broadcasts(&self) -> Vec<LiveEvent> {
            self.broadcasts.lock().unwrap().clone()
        }

        pub fn sent(&self) -> Vec<(UserId, LiveEvent)> {
            self.targeted.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LiveEventEmitter for RecordingEmitter {
        async fn broadcast(&self, event: LiveEvent) {
            self.broadcasts.lock().unwrap().push(event);
        }

        async fn send_to_user(&self, user_id: &UserId, event: LiveEvent) {
            self.targeted.lock().unwrap().push((user_id.clone(), event));
        }
    }

    #[derive(Default)]
    pub struct StubNotificationRepo {
        rows: Mutex<Vec<Notification>>,
    }

    impl StubNotificationRepo {
        pub fn inserted(&self) -> Vec<Notification> {
            self.rows.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NotificationRepository for StubNotificationRepo {
        async fn insert(&self, notification: &Notification) -> Result<(), DomainError> {
            self.rows.lock().unwrap().push(notification.clone());
            Ok(())
        }

        async fn list_for_owner(
            &self,
            owner: &UserId,
            limit: u32,
        ) -> Result<Vec<Notification>, DomainError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .rev()
                .filter(|n| n.owner == *owner)
                .take(limit as usize)
                .cloned()
                .collect())
        }

        async fn unread_count(&self, owner: &UserId) -> Result<u64, DomainError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().filter(|n| n.owner == *owner && !n.read).count() as u64)
        }

        async fn mark_read(
            &self,
            id: &NotificationId,
            owner: &UserId,
        ) -> Result<Notification, DomainError> {
            let mut rows = self.rows.lock().unwrap();
            match rows.iter_mut().find(|n| n.id == *id && n.owner == *owner) {
                Some(row) => {
                    row.read = true;
                    Ok(row.clone())
                }
                None => Err(DomainError::new(
                    ErrorCode::NotificationNotFound,
                    "Notification not found",
                )),
            }
        }

        async fn mark_all_read(&self, owner: &UserId) -> Result<u64, DomainError> {
            let mut rows = self.rows.lock().unwrap();
            let mut changed = 0;
            for row in rows.iter_mut().filter(|n| n.owner == *owner && !n.read) {
                row.read = true;
                changed += 1;
            }
            Ok(changed)
        }

        async fn delete(&self, id: &NotificationId, owner: &UserId) -> Result<(), DomainError> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|n| !(n.id == *id && n.owner == *owner));
            if rows.len() == before {
                return Err(DomainError::new(
                    ErrorCode::NotificationNotFound,
                    "Notification not found",
                ));
            }
            Ok(())
        }
    }

    pub struct FailingNotificationRepo;

    #[async_trait]
    impl NotificationRepository for FailingNotificationRepo {
        async fn insert(&self, _notification: &Notification) -> Result<(), DomainError> {
            Err(DomainError::database("insert failed"))
        }

        async fn list_for_owner(
            &self,
            _owner: &UserId,
            _limit: u32,
        ) -> Result<Vec<Notification>, DomainError> {
            Err(DomainError::database("query failed"))
        }

        async fn unread_count(&self, _owner: &UserId) -> Result<u64, DomainError> {
            Err(DomainError::database("query failed"))
        }

        async fn mark_read(
            &self,
            _id: &NotificationId,
            _owner: &UserId,
        ) -> Result<Notification, DomainError> {
            Err(DomainError::database("update failed"))
        }

        async fn mark_all_read(&self, _owner: &UserId) -> Result<u64, DomainError> {
            Err(DomainError::database("update failed"))
        }

        async fn delete(&self, _id: &NotificationId, _owner: &UserId) -> Result<(), DomainError> {
            Err(DomainError::database("delete failed"))
        }
    }

    #[derive(Default)]
    pub struct StubOrderRepo {
        rows: Mutex<Vec<Order>>,
    }

    impl StubOrderRepo {
        pub fn with_order(order: Order) -> Self {
            Self {
                rows: Mutex::new(vec![order]),
            }
        }

        pub fn stored(&self, id: &OrderId) -> Option<Order> {
            self.rows.lock().unwrap().iter().find(|o| o.id == *id).cloned()
        }
    }

    #[async_trait]
    impl OrderRepository for StubOrderRepo {
        async fn insert(&self, order: &Order) -> Result<(), DomainError> {
            self.rows.lock().unwrap().push(order.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError> {
            Ok(self.stored(id))
        }

        async fn update(&self, order: &Order) -> Result<(), DomainError> {
            let mut rows = self.rows.lock().unwrap();
            if let Some(row) = rows.iter_mut().find(|o| o.id == order.id) {
                *row = order.clone();
            }
            Ok(())
        }

        async fn list_for_user(&self, user: &UserId) -> Result<Vec<Order>, DomainError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().rev().filter(|o| o.user == *user).cloned().collect())
        }

        async fn list_all(&self) -> Result<Vec<Order>, DomainError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().rev().cloned().collect())
        }

        async fn stats(&self) -> Result<OrderStats, DomainError> {
            let rows = self.rows.lock().unwrap();
            Ok(OrderStats {
                total_orders: rows.len() as u64,
                total_revenue: rows.iter().map(|o| o.total).sum(),
            })
        }
    }

    pub struct StubCatalog {
        pub canteens: Vec<Canteen>,
        pub items: Vec<MenuItem>,
    }

    #[async_trait]
    impl CatalogReader for StubCatalog {
        async fn list_canteens(&self) -> Result<Vec<Canteen>, DomainError> {
            Ok(self.canteens.clone())
        }

        async fn list_menu(&self, canteen: &CanteenId) -> Result<Vec<MenuItem>, DomainError> {
            Ok(self
                .items
                .iter()
                .filter(|i| i.canteen == *canteen)
                .cloned()
                .collect())
        }

        async fn find_item(&self, id: &MenuItemId) -> Result<Option<MenuItem>, DomainError> {
            Ok(self.items.iter().find(|i| i.id == *id).cloned())
        }
    }

    pub struct StubScooterRepo {
        fleet: Mutex<Vec<Scooter>>,
    }

    impl StubScooterRepo {
        pub fn with_fleet(fleet: Vec<Scooter>) -> Self {
            Self {
                fleet: Mutex::new(fleet),
            }
        }

        pub fn availability(&self, code: &str) -> Option<bool> {
            self.fleet
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.scooter_id == code)
                .map(|s| s.available)
        }
    }

    #[async_trait]
    impl ScooterRepository for StubScooterRepo {
        async fn list(&self) -> Result<Vec<Scooter>, DomainError> {
            Ok(self.fleet.lock().unwrap().clone())
        }

        async fn find_by_code(&self, code: &str) -> Result<Option<Scooter>, DomainError> {
            Ok(self
                .fleet
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.scooter_id == code)
                .cloned())
        }

        async fn reserve(&self, code: &str) -> Result<bool, DomainError> {
            let mut fleet = self.fleet.lock().unwrap();
            match fleet.iter_mut().find(|s| s.scooter_id == code && s.available) {
                Some(scooter) => {
                    scooter.available = false;
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn set_available(&self, code: &str, available: bool) -> Result<(), DomainError> {
            let mut fleet = self.fleet.lock().unwrap();
            if let Some(scooter) = fleet.iter_mut().find(|s| s.scooter_id == code) {
                scooter.available = available;
            }
            Ok(())
        }
    }

    #[derive(Default)]
    pub struct StubBookingRepo {
        rows: Mutex<Vec<Booking>>,
    }

    impl StubBookingRepo {
        pub fn inserted(&self) -> Vec<Booking> {
            self.rows.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BookingRepository for StubBookingRepo {
        async fn insert(&self, booking: &Booking) -> Result<(), DomainError> {
            self.rows.lock().unwrap().push(booking.clone());
            Ok(())
        }

        async fn list_for_user(&self, user: &UserId) -> Result<Vec<Booking>, DomainError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().rev().filter(|b| b.user == *user).cloned().collect())
        }

        async fn list_all(&self) -> Result<Vec<Booking>, DomainError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().rev().cloned().collect())
        }

        async fn stats(&self) -> Result<BookingStats, DomainError> {
            let rows = self.rows.lock().unwrap();
            Ok(BookingStats {
                total_bookings: rows.len() as u64,
                total_revenue: rows.iter().map(|b| b.total_fare).sum(),
                total_distance_km: rows.iter().map(|b| b.distance_km).sum(),
            })
        }
    }

    #[derive(Default)]
    pub struct StubExpenseRepo {
        rows: Mutex<Vec<Expense>>,
    }

    impl StubExpenseRepo {
        pub fn inserted(&self) -> Vec<Expense> {
            self.rows.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ExpenseRepository for StubExpenseRepo {
        async fn insert(&self, expense: &Expense) -> Result<(), DomainError> {
            self.rows.lock().unwrap().push(expense.clone());
            Ok(())
        }

        async fn list_for_user(&self, user: &UserId) -> Result<Vec<Expense>, DomainError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().rev().filter(|e| e.user == *user).cloned().collect())
        }
    }
}
