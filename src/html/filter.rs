//! Element filter applied to every manual page before conversion.
//!
//! Images and inline SVG have no man page rendering, and permalink anchors
//! next to headings would show up as stray symbols, so all of them are
//! stripped along with their content.

use super::{Document, tag_name};
use kuchikiki::NodeRef;

/// Tags dropped unconditionally.
const IMAGE_TAGS: &[&str] = &["img", "svg"];

/// Classes marking a heading's self-link.
const PERMALINK_CLASSES: &[&str] = &["headerlink", "permalink"];

/// Whether `node` is stripped from the document.
pub fn should_remove(node: &NodeRef) -> bool {
    match tag_name(node) {
        Some(tag) if IMAGE_TAGS.contains(&tag) => true,
        Some("a") => has_permalink_class(node) || wraps_only_image(node),
        _ => false,
    }
}

/// Strip every removable element from `document`.
///
/// Returns the number of removed subtrees. Running it again on the result
/// removes nothing.
pub fn filter(document: &mut Document) -> usize {
    document.remove_where(should_remove)
}

fn has_permalink_class(node: &NodeRef) -> bool {
    let Some(elem) = node.as_element() else {
        return false;
    };
    let attrs = elem.attributes.borrow();
    attrs
        .get("class")
        .is_some_and(|class| class.split_ascii_whitespace().any(|c| PERMALINK_CLASSES.contains(&c)))
}

/// A link whose only content is an image (icon links).
///
/// Whitespace text and comments around the image are ignored; any other
/// text or element keeps the link.
fn wraps_only_image(node: &NodeRef) -> bool {
    let mut image = None;
    for child in node.children() {
        if let Some(text) = child.as_text() {
            if text.borrow().trim().is_empty() {
                continue;
            }
            return false;
        }
        if child.as_comment().is_some() {
            continue;
        }
        if image.is_some() {
            return false;
        }
        image = Some(child);
    }
    image.is_some_and(|child| matches!(tag_name(&child), Some(tag) if IMAGE_TAGS.contains(&tag)))
}
