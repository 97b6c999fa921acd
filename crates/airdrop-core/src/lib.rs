pub mod constants;
pub mod error;
pub mod source;
pub mod types;

pub use constants::*;
pub use error::AirdropError;
pub use source::{NameLookup, SignatureSource, TicketSource};
pub use types::*;
