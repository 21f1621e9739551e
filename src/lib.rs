#![deny(missing_docs)]

//! RDF graph values and a Turtle parser.
//!
//! The data model ([`node`], [`graph`]) is format-independent; [`parse`]
//! builds a [`graph::Graph`] from Turtle source. [`namespace`] holds the
//! prefix/base-URI machinery both depend on, and [`lexicon`] holds the
//! grammar's lexical terminals.

pub mod error;
pub mod graph;
pub mod lexicon;
pub mod namespace;
pub mod node;
pub mod parse;

pub use self::error::{Error, Result};
pub use self::graph::Graph;
pub use self::namespace::{find_mapping, write_iri};
pub use self::node::{LValue, Node, Triple};
pub use self::parse::TurtleParser;
