//! Instruction record to YAML document serializer.
//!
//! [`yaml_emit::write_document`] streams one [`record::InstructionRecord`] into
//! any [`std::io::Write`] sink in a fixed key order.

pub mod block;
pub mod diagnostics;
pub mod load;
pub mod record;
pub mod yaml_emit;

pub use record::InstructionRecord;
pub use yaml_emit::{emit_document, write_document};
