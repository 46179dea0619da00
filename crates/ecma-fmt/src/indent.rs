// SPDX-License-Identifier: (MIT OR Apache-2.0)

/// Current nesting depth and the spaces emitted per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent {
    level: usize,
    step: usize,
}

impl Indent {
    pub fn new(step: usize) -> Self {
        Self { level: 0, step }
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn step(&self) -> usize {
        self.step
    }

    /// Leading whitespace for a line at the current level.
    pub fn prefix(&self) -> String {
        " ".repeat(self.level * self.step)
    }

    pub(crate) fn raise(&mut self) {
        self.level += 1;
    }

    pub(crate) fn lower(&mut self) {
        debug_assert!(self.level > 0, "indent lowered below zero");
        self.level = self.level.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_grows_with_level() {
        let mut indent = Indent::new(2);
        assert_eq!(indent.prefix(), "");
        indent.raise();
        indent.raise();
        assert_eq!(indent.prefix(), "    ");
        indent.lower();
        assert_eq!(indent.level(), 1);
        assert_eq!(indent.prefix(), "  ");
    }

    #[test]
    fn zero_step_never_indents() {
        let mut indent = Indent::new(0);
        indent.raise();
        assert_eq!(indent.prefix(), "");
        assert_eq!(indent.step(), 0);
    }
}
