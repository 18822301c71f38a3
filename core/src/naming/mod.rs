pub mod convention;
pub mod reserved;
pub mod strategy;

pub use convention::{IndexKind, NamingConvention, UnderscoreConvention, underscore};
pub use reserved::{PG_RESERVED, is_reserved};
pub use strategy::{IdentifierTooLong, Operation, PG_IDENT_MAX, PgNamingStrategy};
