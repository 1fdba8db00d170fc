//! HTML document tree handed to filters and preprocessors.
//!
//! Wraps a parsed [`NodeRef`] so mutation goes through `&mut Document`:
//! whoever holds the document exclusively may edit it, nobody else can.

pub mod filter;

pub use filter::{filter, should_remove};

use kuchikiki::{NodeRef, traits::TendrilSink};
use std::io;

/// A parsed, mutable HTML document.
#[derive(Debug, Clone)]
pub struct Document {
    root: NodeRef,
}

impl Document {
    /// Parse HTML into a document tree.
    ///
    /// Fragments are wrapped into `<html><head></head><body>...</body></html>`.
    pub fn parse(html: &str) -> Self {
        Self {
            root: kuchikiki::parse_html().one(html),
        }
    }

    /// Root (document) node.
    #[inline]
    pub fn root(&self) -> &NodeRef {
        &self.root
    }

    /// Replace the whole tree with freshly parsed HTML.
    pub fn replace(&mut self, html: &str) {
        self.root = kuchikiki::parse_html().one(html);
    }

    /// Elements matching a CSS selector, in document order.
    ///
    /// Returns `None` when the selector does not parse.
    pub fn select(&self, selector: &str) -> Option<Vec<NodeRef>> {
        let matches = self.root.select(selector).ok()?;
        Some(matches.map(|elem| elem.as_node().clone()).collect())
    }

    /// Detach every node matching `pred`, together with its subtree.
    ///
    /// Nodes are gathered in one walk that does not descend into a matched
    /// node, then detached, so no detached node is visited twice.
    /// Returns the number of detached subtrees.
    pub fn remove_where<F>(&mut self, pred: F) -> usize
    where
        F: Fn(&NodeRef) -> bool,
    {
        let mut doomed = Vec::new();
        collect_matching(&self.root, &pred, &mut doomed);
        for node in &doomed {
            node.detach();
        }
        doomed.len()
    }

    /// Serialize the document back to HTML.
    pub fn to_html(&self) -> io::Result<String> {
        let mut buf = Vec::new();
        self.root.serialize(&mut buf)?;
        String::from_utf8(buf).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }
}

fn collect_matching<F>(node: &NodeRef, pred: &F, out: &mut Vec<NodeRef>)
where
    F: Fn(&NodeRef) -> bool,
{
    for child in node.children() {
        if pred(&child) {
            out.push(child);
        } else {
            collect_matching(&child, pred, out);
        }
    }
}

/// Local tag name of an element node.
#[inline]
pub(crate) fn tag_name(node: &NodeRef) -> Option<&str> {
    node.as_element().map(|elem| &*elem.name.local)
}
