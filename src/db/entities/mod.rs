//! Database entities

pub mod menu;
pub mod vendor;

pub use menu::Entity as Menu;
pub use vendor::Entity as Vendor;
