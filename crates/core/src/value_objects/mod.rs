//! Immutable, self-validating domain primitives.

pub mod email;
pub mod nit;
pub mod phone;
pub mod product_code;
pub mod quantity;

pub use email::Email;
pub use nit::Nit;
pub use phone::Phone;
pub use product_code::ProductCode;
pub use quantity::Quantity;
