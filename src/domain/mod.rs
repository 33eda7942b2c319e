pub mod catalog;
pub mod checkout;
pub mod commands;
pub mod errors;
pub mod records;
pub mod value_objects;

pub use catalog::*;
pub use commands::*;
pub use errors::*;
pub use records::*;
pub use value_objects::*;
