//! A minimal two-unit tactics skirmish built on the movement engine.
//!
//! The binary is a harness for poking at `tactics-paths` from the
//! command line; this library holds the parts worth testing: level
//! loading ([`map`]) and unit/turn bookkeeping ([`unit`]).

pub mod map;
pub mod unit;
