// SPDX-License-Identifier: (MIT OR Apache-2.0)

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    /// Spaces per nesting level.
    pub indent_width: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self { indent_width: 2 }
    }
}
