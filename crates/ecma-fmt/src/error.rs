// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Rendering and formatting errors.

use ecma_ast::Node;
use ecma_parser::ParseError;
use thiserror::Error;

/// A node of a known kind whose children do not have the shape its rule
/// needs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A child slot holds the wrong kind of node.
    #[error("{owner}: expected {expected} in `{slot}`, found {found}")]
    UnexpectedChild {
        owner: &'static str,
        slot: &'static str,
        expected: &'static str,
        found: String,
    },

    /// The node's children are individually valid but do not fit together.
    #[error("{owner}: {reason}")]
    Malformed { owner: &'static str, reason: String },
}

impl RenderError {
    pub fn unexpected(owner: &'static str, slot: &'static str, expected: &'static str, found: &Node) -> Self {
        RenderError::UnexpectedChild {
            owner,
            slot,
            expected,
            found: found.kind_name().to_string(),
        }
    }

    /// Kind of the node whose rule failed.
    pub fn owner(&self) -> &'static str {
        match self {
            RenderError::UnexpectedChild { owner, .. } | RenderError::Malformed { owner, .. } => owner,
        }
    }
}

/// Failure of a source-to-source pass.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("source has {} syntax error(s)", .0.len())]
    Syntax(Vec<ParseError>),

    #[error(transparent)]
    Render(#[from] RenderError),
}
