//! Indented text sink shared by the backends

use cgen_core::CgenError;

/// Accumulates lines of generated source at a tracked indentation depth
#[derive(Debug)]
pub struct Emitter {
    out: String,
    level: usize,
    indent: &'static str,
}

impl Emitter {
    /// Create an empty emitter using `indent` per level
    pub fn new(indent: &'static str) -> Self {
        Self {
            out: String::new(),
            level: 0,
            indent,
        }
    }

    /// Write one line at the current depth
    ///
    /// The text is written as is; a quoted token spanning lines keeps its
    /// content.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            self.push_indent();
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    /// Write a block of source, indenting every line
    ///
    /// Used for the built-in helper templates. Empty lines carry no
    /// trailing whitespace.
    pub fn block(&mut self, text: &str) {
        for line in text.trim_end().lines() {
            if !line.trim().is_empty() {
                self.push_indent();
                self.out.push_str(line);
            }
            self.out.push('\n');
        }
    }

    /// Write user supplied source verbatim, starting at column zero
    ///
    /// Indenting it could move a here-doc terminator or change a multi-line
    /// string. Only trailing newlines are dropped.
    pub fn raw(&mut self, text: &str) {
        let text = text.trim_end_matches(['\n', '\r']);
        if !text.is_empty() {
            self.out.push_str(text);
            self.out.push('\n');
        }
    }

    fn push_indent(&mut self) {
        for _ in 0..self.level {
            self.out.push_str(self.indent);
        }
    }

    /// Write an empty line
    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Run `f` one level deeper
    pub fn indented<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, CgenError>,
    ) -> Result<T, CgenError> {
        self.level += 1;
        let result = f(self);
        self.level -= 1;
        result
    }

    /// Current depth
    pub fn level(&self) -> usize {
        self.level
    }

    /// Take the accumulated text
    pub fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_indentation() {
        let mut em = Emitter::new("  ");
        em.line("f() {");
        em.indented(|em| {
            em.line("if true; then");
            em.indented(|em| {
                em.line("echo hi");
                Ok(())
            })?;
            em.line("fi");
            Ok(())
        })
        .unwrap();
        em.line("}");

        assert_eq!(em.finish(), "f() {\n  if true; then\n    echo hi\n  fi\n}\n");
    }

    #[test]
    fn test_block_is_indented_per_line() {
        let mut em = Emitter::new("    ");
        em.indented(|em| {
            em.block("a\n\nb\n");
            Ok(())
        })
        .unwrap();
        assert_eq!(em.finish(), "    a\n\n    b\n");
    }

    #[test]
    fn test_line_keeps_embedded_newlines() {
        let mut em = Emitter::new("  ");
        em.indented(|em| {
            em.line("values=('one\ntwo')");
            Ok(())
        })
        .unwrap();
        assert_eq!(em.finish(), "  values=('one\ntwo')\n");
    }

    #[test]
    fn test_raw_ignores_depth() {
        let mut em = Emitter::new("  ");
        em.indented(|em| {
            em.line("x=$(");
            em.raw("cat <<EOF\n  alpha\nEOF\n\n");
            em.line(")");
            Ok(())
        })
        .unwrap();
        assert_eq!(em.finish(), "  x=$(\ncat <<EOF\n  alpha\nEOF\n  )\n");
    }

    #[test]
    fn test_level_restored_after_error() {
        let mut em = Emitter::new("  ");
        let result: Result<(), CgenError> =
            em.indented(|_| Err(CgenError::Escape("boom".to_string())));
        assert!(result.is_err());
        assert_eq!(em.level(), 0);
    }
}
