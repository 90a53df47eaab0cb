//! Database Models

// Serde helpers
pub mod serde_helpers;

// People
pub mod user;

// Catalog
pub mod menu_item;

// Location
pub mod dining_table;

// Commerce
pub mod cart;
pub mod order;

// Booking
pub mod reservation;

// System
pub mod audit_log;
pub mod notification;

// Re-exports
pub use audit_log::AuditLog;
pub use cart::{Cart, CartItem, CartItemsUpdate};
pub use dining_table::{DiningTable, DiningTableCreate, DiningTableUpdate};
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate};
pub use notification::Notification;
pub use order::{Order, OrderCreate, OrderItem, OrderItemInput, OrderStatusUpdate};
pub use reservation::{Reservation, ReservationCreate, ReservationStatusUpdate};
pub use user::{User, UserCreate, UserUpdate};
