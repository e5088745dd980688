#![forbid(unsafe_code)]

//! Reference markup backend: serializes virtual trees to an HTML string.
//!
//! This backend exists for server-side rendering and tests. It performs no
//! diffing — `update` replaces the held state and the next serialization
//! rebuilds from scratch — and reports itself as non-interactive, so the
//! app façade never wires a live-update subscription against it.
//!
//! # Selector syntax
//!
//! `tag#id.class.class` — the tag may be omitted (`.app` means
//! `div.app`). Names accept ASCII alphanumerics, `-`, and `_`. At most one
//! `#id` segment is allowed.
//!
//! # Invariants
//!
//! 1. Text, attribute names, and attribute values are HTML-escaped on
//!    serialization.
//! 2. [`MarkupNode::element`] only accepts attribute names made of ASCII
//!    alphanumerics, `-`, and `_`.
//! 3. Void elements (`br`, `hr`, `img`, `input`, `link`, `meta`) render
//!    without a closing tag and never render children.
//! 4. [`parse_selector`] never panics, for any input.

use std::fmt::Write as _;

use tracing::warn;

use frond_core::{ConfigError, Result};

use crate::backend::{Backend, BuildTree, TreeLoop};

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// A parsed `tag#id.class` selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

/// Parse a `tag#id.class.class` selector.
///
/// An omitted tag defaults to `div`. Fails with
/// [`ConfigError::InvalidArgument`] on an empty selector, an empty
/// segment, a duplicate id, or a name containing characters outside
/// `[A-Za-z0-9_-]`.
pub fn parse_selector(input: &str) -> Result<Selector> {
    if input.is_empty() {
        return Err(ConfigError::invalid("empty selector"));
    }

    let mut tag = String::new();
    let mut id = None;
    let mut classes = Vec::new();

    // Split into segments at '.' and '#', remembering which delimiter
    // opened each segment.
    let mut current = String::new();
    let mut current_delim = None::<char>;

    let mut flush = |segment: &mut String, delim: Option<char>| -> Result<()> {
        let name = std::mem::take(segment);
        match delim {
            None => {
                if name.is_empty() {
                    // Leading '.' or '#': tag defaults to div.
                    tag = "div".to_owned();
                } else {
                    check_name(&name)?;
                    tag = name;
                }
            }
            Some('#') => {
                if name.is_empty() {
                    return Err(ConfigError::invalid("empty id segment in selector"));
                }
                check_name(&name)?;
                if id.replace(name).is_some() {
                    return Err(ConfigError::invalid("duplicate id in selector"));
                }
            }
            Some(_) => {
                if name.is_empty() {
                    return Err(ConfigError::invalid("empty class segment in selector"));
                }
                check_name(&name)?;
                classes.push(name);
            }
        }
        Ok(())
    };

    for ch in input.chars() {
        if ch == '.' || ch == '#' {
            flush(&mut current, current_delim)?;
            current_delim = Some(ch);
        } else {
            current.push(ch);
        }
    }
    flush(&mut current, current_delim)?;

    Ok(Selector { tag, id, classes })
}

fn valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn check_name(name: &str) -> Result<()> {
    if valid_name(name) {
        Ok(())
    } else {
        Err(ConfigError::invalid(format!(
            "invalid character in selector segment: {name:?}"
        )))
    }
}

/// A node in the markup tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkupNode {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
        children: Vec<MarkupNode>,
    },
    Text(String),
}

impl MarkupNode {
    /// Build an element from a selector, failing on a malformed selector
    /// or an attribute name outside `[A-Za-z0-9_-]`.
    ///
    /// The selector's id and classes become `id`/`class` attributes,
    /// placed before the caller-supplied attribute pairs.
    pub fn element(
        selector: &str,
        attrs: Vec<(String, String)>,
        children: Vec<MarkupNode>,
    ) -> Result<Self> {
        let parsed = parse_selector(selector)?;
        for (name, _) in &attrs {
            if !valid_name(name) {
                return Err(ConfigError::invalid(format!(
                    "invalid attribute name: {name:?}"
                )));
            }
        }
        let mut all_attrs = Vec::with_capacity(attrs.len() + 2);
        if let Some(id) = parsed.id {
            all_attrs.push(("id".to_owned(), id));
        }
        if !parsed.classes.is_empty() {
            all_attrs.push(("class".to_owned(), parsed.classes.join(" ")));
        }
        all_attrs.extend(attrs);
        Ok(MarkupNode::Element {
            tag: parsed.tag,
            attrs: all_attrs,
            children,
        })
    }

    /// A text node. Content is escaped on serialization.
    pub fn text(content: impl Into<String>) -> Self {
        MarkupNode::Text(content.into())
    }

    /// Serialize the tree to an HTML string.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            MarkupNode::Text(content) => escape_into(content, out),
            MarkupNode::Element {
                tag,
                attrs,
                children,
            } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attrs {
                    out.push(' ');
                    // Names are validated by `element`, but a directly
                    // constructed node bypasses that path.
                    escape_into(name, out);
                    out.push_str("=\"");
                    escape_into(value, out);
                    out.push('"');
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }
                for child in children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

fn escape_into(raw: &str, out: &mut String) {
    let _ = write!(out, "{}", v_htmlescape::escape(raw));
}

/// Server-side markup backend. `Artifact` is the serialized HTML string.
#[derive(Clone, Copy, Debug, Default)]
pub struct MarkupBackend;

impl Backend for MarkupBackend {
    type Attrs = Vec<(String, String)>;
    type Node = MarkupNode;
    type Artifact = String;
    type Loop<S: Clone + 'static> = MarkupLoop<S>;

    fn node(&self, selector: &str, attrs: Self::Attrs, children: Vec<Self::Node>) -> Self::Node {
        // The unchecked `h` path falls back to a bare div on a malformed
        // selector; use MarkupNode::element for checked construction.
        MarkupNode::element(selector, attrs, children).unwrap_or_else(|err| {
            warn!(selector, %err, "malformed selector, falling back to div");
            MarkupNode::Element {
                tag: "div".to_owned(),
                attrs: Vec::new(),
                children: Vec::new(),
            }
        })
    }

    fn tree_loop<S: Clone + 'static>(
        &self,
        initial: &S,
        build: BuildTree<S, Self::Node>,
    ) -> Self::Loop<S> {
        MarkupLoop {
            state: initial.clone(),
            build,
        }
    }

    fn interactive(&self) -> bool {
        false
    }
}

/// Tree loop for [`MarkupBackend`]: rebuilds on demand, no diffing.
pub struct MarkupLoop<S> {
    state: S,
    build: BuildTree<S, MarkupNode>,
}

impl<S> TreeLoop<S> for MarkupLoop<S>
where
    S: Clone + 'static,
{
    type Artifact = String;

    fn render(&mut self) -> String {
        (self.build)(&self.state).to_html()
    }

    fn update(&mut self, state: &S) {
        self.state = state.clone();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_tag_only() {
        let s = parse_selector("h1").unwrap();
        assert_eq!(s.tag, "h1");
        assert_eq!(s.id, None);
        assert!(s.classes.is_empty());
    }

    #[test]
    fn selector_full() {
        let s = parse_selector("section#main.wide.dark").unwrap();
        assert_eq!(s.tag, "section");
        assert_eq!(s.id.as_deref(), Some("main"));
        assert_eq!(s.classes, vec!["wide", "dark"]);
    }

    #[test]
    fn selector_class_only_defaults_to_div() {
        let s = parse_selector(".app").unwrap();
        assert_eq!(s.tag, "div");
        assert_eq!(s.classes, vec!["app"]);
    }

    #[test]
    fn selector_rejects_garbage() {
        assert!(parse_selector("").is_err());
        assert!(parse_selector("div.").is_err());
        assert!(parse_selector("div#").is_err());
        assert!(parse_selector("div#a#b").is_err());
        assert!(parse_selector("di v").is_err());
    }

    #[test]
    fn element_renders_nested_markup() {
        let tree = MarkupNode::element(
            ".app",
            vec![],
            vec![
                MarkupNode::element("h1", vec![], vec![MarkupNode::text("Hello")]).unwrap(),
            ],
        )
        .unwrap();
        assert_eq!(tree.to_html(), r#"<div class="app"><h1>Hello</h1></div>"#);
    }

    #[test]
    fn id_and_classes_precede_user_attrs() {
        let tree = MarkupNode::element(
            "a#home.nav",
            vec![("href".to_owned(), "index.html".to_owned())],
            vec![],
        )
        .unwrap();
        assert_eq!(
            tree.to_html(),
            r#"<a id="home" class="nav" href="index.html"></a>"#
        );
    }

    #[test]
    fn element_rejects_invalid_attr_names() {
        assert!(
            MarkupNode::element("p", vec![("data-x".to_owned(), "1".to_owned())], vec![]).is_ok()
        );
        assert!(MarkupNode::element("p", vec![(String::new(), "x".to_owned())], vec![]).is_err());
        assert!(
            MarkupNode::element("p", vec![(r#"on"load"#.to_owned(), "x".to_owned())], vec![])
                .is_err()
        );
        assert!(
            MarkupNode::element("p", vec![("a>b".to_owned(), "x".to_owned())], vec![]).is_err()
        );
    }

    #[test]
    fn hand_built_nodes_escape_attr_names() {
        // Direct construction skips `element` validation; serialization
        // must still not emit a raw quote or angle bracket.
        let node = MarkupNode::Element {
            tag: "p".to_owned(),
            attrs: vec![(r#"da"ta>"#.to_owned(), "v".to_owned())],
            children: vec![],
        };
        assert_eq!(node.to_html(), r#"<p da&quot;ta&gt;="v"></p>"#);
    }

    #[test]
    fn text_and_attrs_are_escaped() {
        let tree = MarkupNode::element(
            "p",
            vec![("title".to_owned(), r#"a "quote" & more"#.to_owned())],
            vec![MarkupNode::text("1 < 2 > 0 & true")],
        )
        .unwrap();
        assert_eq!(
            tree.to_html(),
            r#"<p title="a &quot;quote&quot; &amp; more">1 &lt; 2 &gt; 0 &amp; true</p>"#
        );
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let tree = MarkupNode::element("br", vec![], vec![MarkupNode::text("ignored")]).unwrap();
        assert_eq!(tree.to_html(), "<br>");
    }

    #[test]
    fn backend_node_falls_back_to_div() {
        let node = MarkupBackend.node("not a selector", vec![], vec![]);
        assert_eq!(node.to_html(), "<div></div>");
    }

    #[test]
    fn loop_update_replaces_state() {
        let mut tree_loop = MarkupBackend.tree_loop(
            &"first".to_owned(),
            Box::new(|state: &String| {
                MarkupNode::element("h1", vec![], vec![MarkupNode::text(state.clone())]).unwrap()
            }),
        );
        assert_eq!(tree_loop.render(), "<h1>first</h1>");

        tree_loop.update(&"second".to_owned());
        assert_eq!(tree_loop.render(), "<h1>second</h1>");
    }

    #[test]
    fn backend_is_not_interactive() {
        assert!(!MarkupBackend.interactive());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// The selector parser never panics, whatever the input.
            #[test]
            fn parse_never_panics(input in ".{0,64}") {
                let _ = parse_selector(&input);
            }

            /// Well-formed selectors round-trip into their parts.
            #[test]
            fn wellformed_selectors_parse(
                tag in "[a-z][a-z0-9]{0,7}",
                id in "[a-z][a-z0-9_-]{0,7}",
                classes in prop::collection::vec("[a-z][a-z0-9_-]{0,7}", 0..4),
            ) {
                let mut input = format!("{tag}#{id}");
                for class in &classes {
                    input.push('.');
                    input.push_str(class);
                }
                let parsed = parse_selector(&input).unwrap();
                prop_assert_eq!(parsed.tag, tag);
                prop_assert_eq!(parsed.id.as_deref(), Some(id.as_str()));
                prop_assert_eq!(parsed.classes, classes);
            }
        }
    }
}
