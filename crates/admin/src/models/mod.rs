//! Domain models for the admin console.

pub mod content;
pub mod employee;
pub mod flash;
pub mod layout;
pub mod order;
pub mod product;
pub mod session;
pub mod user;

pub use content::{AppLabel, CategoryIcon};
pub use employee::Employee;
pub use flash::{Flash, FlashLevel};
pub use layout::{LayoutSection, MoveDirection};
pub use order::{Order, OrderItem, OrderListEntry};
pub use product::Product;
pub use session::{CurrentUser, keys as session_keys};
pub use user::User;
