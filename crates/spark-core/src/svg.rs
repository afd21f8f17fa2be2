// File: crates/spark-core/src/svg.rs
// Summary: Lightweight SVG element tree the orchestrator assembles into,
// plus a string writer and uid generation.

use std::sync::atomic::{AtomicU64, Ordering};

pub const XMLNS: &str = "http://www.w3.org/2000/svg";

/// One visual node. Attribute names are static in engine code; values are
/// formatted strings. Children keep document order.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub name: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Element>,
    text: Option<String>,
}

impl Element {
    pub fn new(name: &'static str) -> Self {
        Self { name, attrs: Vec::new(), children: Vec::new(), text: None }
    }

    /// Builder-style attribute setter; last write for a name wins.
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        if let Some(slot) = self.attrs.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.attrs.push((name, value));
        }
        self
    }

    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.text = Some(content.into());
        self
    }

    pub fn child(&mut self, el: Element) -> &mut Self {
        self.children.push(el);
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Depth-first lookup of descendants by element name.
    pub fn find_all(&self, name: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        for c in &self.children {
            if c.name == name {
                found.push(c);
            }
            found.extend(c.find_all(name));
        }
        found
    }

    /// Serialize to SVG markup. Deterministic: attribute insertion order.
    pub fn write_svg(&self) -> String {
        let mut out = String::new();
        self.write_into(&mut out);
        out
    }

    fn write_into(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.name);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }
        if self.children.is_empty() && self.text.is_none() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        if let Some(text) = &self.text {
            out.push_str(&escape(text));
        }
        for c in &self.children {
            c.write_into(out);
        }
        out.push_str("</");
        out.push_str(self.name);
        out.push('>');
    }
}

/// Root `<svg>` element sized to its container, with the given viewport.
pub fn document(view_min_x: f64, view_width: f64, view_height: f64) -> Element {
    Element::new("svg")
        .attr("xmlns", XMLNS)
        .attr(
            "viewBox",
            format!("{} 0 {} {}", view_min_x, view_width, view_height),
        )
        .attr("width", "100%")
        .attr("height", "100%")
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

static UID_COUNTER: AtomicU64 = AtomicU64::new(0x9e37_79b9_7f4a_7c15);

fn next_word(state: u64) -> u64 {
    // splitmix64 finalizer; good enough dispersion for identity tokens.
    let mut z = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Generate a `xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx` style identity token
/// for instances without a configured id. Process-unique, not cryptographic.
pub fn create_uid() -> String {
    let seed = UID_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut word = next_word(seed);
    let mut bits_left = 64;
    let mut next_nibble = || {
        if bits_left == 0 {
            word = next_word(word);
            bits_left = 64;
        }
        let nibble = (word & 0xf) as u32;
        word >>= 4;
        bits_left -= 4;
        nibble
    };
    let mut out = String::with_capacity(36);
    for c in "xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx".chars() {
        match c {
            'x' => out.push(char::from_digit(next_nibble(), 16).unwrap_or('0')),
            'y' => out.push(char::from_digit((next_nibble() & 0x3) | 0x8, 16).unwrap_or('8')),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_nested_markup() {
        let mut root = document(0.0, 300.0, 100.0);
        root.child(Element::new("path").attr("d", "M 0,0 L 1,1").attr("fill", "none"));
        let markup = root.write_svg();
        assert!(markup.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(markup.contains("viewBox=\"0 0 300 100\""));
        assert!(markup.contains("<path d=\"M 0,0 L 1,1\" fill=\"none\"/>"));
        assert!(markup.ends_with("</svg>"));
    }

    #[test]
    fn escapes_attr_and_text() {
        let el = Element::new("text").attr("fill", "a\"b").text("1 < 2 & 3");
        let markup = el.write_svg();
        assert!(markup.contains("fill=\"a&quot;b\""));
        assert!(markup.contains("1 &lt; 2 &amp; 3"));
    }

    #[test]
    fn uid_shape_and_uniqueness() {
        let a = create_uid();
        let b = create_uid();
        assert_eq!(a.len(), 36);
        assert_eq!(a.as_bytes()[14], b'4');
        assert_ne!(a, b);
    }
}
