pub mod error;
mod reading;
mod schema;
mod validate;

pub use reading::*;
pub use schema::*;
pub use validate::*;
