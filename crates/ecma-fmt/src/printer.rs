// SPDX-License-Identifier: (MIT OR Apache-2.0)

use crate::config::FormatConfig;
use crate::indent::Indent;
use crate::rules::Rules;

/// The house-style renderer: every rule at its default.
pub struct Printer {
    indent: Indent,
}

impl Printer {
    pub fn new(config: &FormatConfig) -> Self {
        Self {
            indent: Indent::new(config.indent_width),
        }
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(&FormatConfig::default())
    }
}

impl Rules for Printer {
    fn indent(&self) -> &Indent {
        &self.indent
    }

    fn indent_mut(&mut self) -> &mut Indent {
        &mut self.indent
    }
}
