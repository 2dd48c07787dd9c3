// Re-export all model types
pub use self::add_on::*;
pub use self::errors::*;
pub use self::food::*;
pub use self::outlet::*;
pub use self::response::*;

mod add_on;
mod errors;
mod food;
mod outlet;
mod response;
