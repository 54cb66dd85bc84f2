//! # Tessera Engine
//!
//! **Typed fact signatures in, editor blocks and logic programs out**
//!
//! Tessera takes a catalogue of fact signatures and derives two things from it:
//! block schemas for a structured editor, and a code generator that compiles
//! the assembled block tree back into program text.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tessera::{Engine, MemoryStore, Session, TesseraResult, Value};
//!
//! fn main() -> TesseraResult<()> {
//!     let engine = Engine::from_json(r#"[
//!         {"name": "has_count", "kind": "Annotation", "params": [{"name": "n", "type": "Int"}]},
//!         {"name": "find", "kind": "Analysis", "params": [{"name": "species", "type": "Str"}]}
//!     ]"#)?;
//!
//!     let catalogue = engine.catalogue();
//!     let mut session = Session::new(MemoryStore::new());
//!     session
//!         .tree_mut()
//!         .push_statement(catalogue, catalogue.node("has_count")?.set("n", Value::Integer(3))?.build())?;
//!     session
//!         .tree_mut()
//!         .set_goal(catalogue, catalogue.node("find")?.set("species", "bee".into())?.build())?;
//!
//!     let program = session.compile(&engine)?;
//!     assert!(program.starts_with("(facts"));
//!     session.save()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Signatures
//! A fact signature names a fact and lists its typed parameters. Annotations
//! are statements used in sequence; analyses are expressions that fill the
//! single goal slot.
//!
//! ### Blocks
//! Every signature derives one block schema: a display label, one field per
//! parameter, a shape and a palette group.
//!
//! ### Programs
//! A program is a `(facts ...)` block followed by a `(goal ...)` block. The
//! text is never stored; only the node tree is persisted.

pub mod assembler;
pub mod ast;
pub mod catalogue;
pub mod emitter;
pub mod engine;
pub mod error;
pub mod node;
pub mod parser;
pub mod persistence;
pub mod resource_limits;
pub mod schema;
pub mod session;
pub mod signature;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use assembler::assemble;
pub use ast::Span;
pub use catalogue::{Catalogue, NodeBuilder};
pub use emitter::{EmitRule, Fragment, Order, Registry};
pub use engine::Engine;
pub use error::TesseraError;
pub use node::{FactNode, ProgramNode, RootNode, Value};
pub use parser::{parse_program, parse_program_with};
pub use persistence::{BlobStore, FileStore, LoadOutcome, MemoryStore, Persistence, StoreConfig};
pub use resource_limits::ResourceLimits;
pub use schema::{derive, BlockSchema, FieldKind, FieldSpec, Palette, ShapeCategory, VisualGroup};
pub use session::Session;
pub use signature::{FactSignature, ParamType, RawParam, RawSignature, SignatureKind};

/// Result type for Tessera operations
pub type TesseraResult<T> = Result<T, TesseraError>;

#[cfg(test)]
mod tests;
