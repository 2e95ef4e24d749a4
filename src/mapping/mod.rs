//! Item mapping module
//!
//! Turns an assembled record into a typed item.
//!
//! # Overview
//!
//! The mapping module provides:
//! - `LineMapper` - The record-to-item contract, also implemented by closures
//! - `Mapped` - An item, or a request to skip the record
//! - `PassThroughLineMapper` - The record text itself
//! - `JsonLineMapper` - One JSON value per record
//! - `PatternSkipMapper` - Drops records matching a regex, maps the rest
//! - `MapperConfig` - Declarative selection for job definitions

mod mappers;
mod types;

pub use mappers::{JsonLineMapper, PassThroughLineMapper, PatternSkipMapper};
pub use types::{LineMapper, Mapped, MapperConfig, MapperKind};

#[cfg(test)]
mod tests;
