pub mod address;
pub mod errors;
pub mod server;

pub use address::validate_address;
pub use errors::ValidationError;
pub use server::ServerRecord;
