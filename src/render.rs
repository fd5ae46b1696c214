//! Canonical text serialization.

/// Serialize a node to its canonical SPARQL surface form.
///
/// Rendering is pure and restartable: implementations only append to the
/// buffer, hold no state between calls, and repeated calls on the same
/// tree produce byte-identical output. Every constructed tree renders;
/// there is no failure path.
pub trait Render {
    /// Append this node's canonical text to `buf`.
    fn render(&self, buf: &mut String);

    /// Render into a fresh string.
    fn to_sparql(&self) -> String {
        let mut buf = String::new();
        self.render(&mut buf);
        buf
    }
}

impl<T: Render> Render for Box<T> {
    fn render(&self, buf: &mut String) {
        (**self).render(buf);
    }
}

/// Render `items` into `buf` with `sep` between consecutive items.
pub(crate) fn render_joined<T: Render>(items: &[T], sep: &str, buf: &mut String) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            buf.push_str(sep);
        }
        item.render(buf);
    }
}
