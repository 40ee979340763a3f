//! Tree traversal and lookup.

use super::Element;

/// Pre-order iterator over an element and all of its descendants.
pub struct Walk<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        // Push in reverse so the first child is visited first.
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

impl Element {
    /// Iterate this element and its descendants in document order.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// All descendants (and self) matching a predicate, in document order.
    pub fn select<F>(&self, pred: F) -> Vec<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        self.walk().filter(|el| pred(el)).collect()
    }

    pub fn find(&self, id: &str) -> Option<&Element> {
        self.walk().find(|el| el.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Child-index path from this element to the element with `id`.
    ///
    /// The path is empty when `id` names this element.
    pub fn path_to(&self, id: &str) -> Option<Vec<usize>> {
        if self.id == id {
            return Some(Vec::new());
        }
        for (index, child) in self.children.iter().enumerate() {
            if let Some(mut path) = child.path_to(id) {
                path.insert(0, index);
                return Some(path);
            }
        }
        None
    }

    /// Follow a child-index path.
    pub fn at_path(&self, path: &[usize]) -> Option<&Element> {
        path.iter()
            .try_fold(self, |el, &index| el.children.get(index))
    }

    /// Follow a child-index path mutably.
    pub fn at_path_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        let mut current = self;
        for &index in path {
            current = current.children.get_mut(index)?;
        }
        Some(current)
    }

    /// The element with `id` or its nearest ancestor matching `pred`.
    pub fn closest<F>(&self, id: &str, pred: F) -> Option<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        let path = self.path_to(id)?;
        (0..=path.len())
            .rev()
            .filter_map(|len| self.at_path(&path[..len]))
            .find(|el| pred(el))
    }

    /// Parent of the element with `id`, plus the element's index in it.
    pub fn parent_of_mut(&mut self, id: &str) -> Option<(&mut Element, usize)> {
        let path = self.path_to(id)?;
        let (&index, parent_path) = path.split_last()?;
        let parent = self.at_path_mut(parent_path)?;
        Some((parent, index))
    }

    /// Remove every descendant matching `pred`. Returns how many were removed.
    pub fn remove_where<F>(&mut self, pred: &F) -> usize
    where
        F: Fn(&Element) -> bool,
    {
        let before = self.children.len();
        self.children.retain(|child| !pred(child));
        let mut removed = before - self.children.len();
        for child in &mut self.children {
            removed += child.remove_where(pred);
        }
        removed
    }
}
