mod node;
mod query;

pub use node::Element;
pub use query::Walk;

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    root.find(id)
}
