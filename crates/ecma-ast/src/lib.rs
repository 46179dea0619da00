// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Syntax tree types for ECMAScript source.
//!
//! This crate defines the nodes shared between the lexer, parser and the
//! renderers in `ecma-fmt`.

pub mod span;
pub mod token;
pub mod ops;
pub mod node;

pub use span::{Span, LineMap};
pub use ops::{AssignOp, BinOp, UnaryOp};
pub use node::Node;
