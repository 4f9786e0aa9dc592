//! Record schema, coercion and the parser that drives the sources.

mod builder;
mod field;
mod loader;
mod record;
mod tag;

pub use builder::{ConfigParser, ConfigParserBuilder};
pub use field::{AsSlot, Integer, Kind, Slot, parse_bool};
pub use record::{Field, FieldDescriptor, Record};
pub use tag::Tag;
