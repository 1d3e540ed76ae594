//! Owned XML element tree.
//!
//! [`Element`] is the tree shape shared by both directions of the
//! conversion: the [`reader`](crate::reader) produces one from the input
//! bytes, and the [`encoder`](crate::encoder) builds one for the
//! [`writer`](crate::writer) to serialize. Attribute and child order is
//! insertion order, which is also document order.

/// An XML element with its attributes and child elements.
///
/// Text content is not retained; neither dialect carries any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Local tag name
    pub name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
}

impl Element {
    /// Creates an element without attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds an attribute and returns the element.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Adds an attribute, replacing an existing one with the same key.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Returns the value of an attribute.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns all attributes in insertion order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Appends a child element and returns the element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Appends a child element.
    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Appends a new child element and returns a mutable reference to it.
    pub fn append(&mut self, name: impl Into<String>) -> &mut Element {
        self.children.push(Element::new(name));
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Returns the child elements in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Returns the first child element, if any.
    pub fn first_child(&self) -> Option<&Element> {
        self.children.first()
    }

    /// Returns the first child element with the given name.
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Iterates over child elements with the given name.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Returns true if the element has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Iterates depth-first over this element and all of its descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Depth-first, document-order iterator returned by [`Element::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_returns_new_child() {
        let mut root = Element::new("Domain");
        root.append("Devices").append("Device");
        assert_eq!(root.children().len(), 1);
        assert_eq!(root.children()[0].children()[0].name, "Device");
    }

    #[test]
    fn test_set_attribute_keeps_order_and_replaces() {
        let mut e = Element::new("extends")
            .with_attribute("domain", "a")
            .with_attribute("class", "OnOff");
        e.set_attribute("domain", "b");
        assert_eq!(
            e.attributes(),
            &[
                ("domain".to_string(), "b".to_string()),
                ("class".to_string(), "OnOff".to_string())
            ]
        );
        assert_eq!(e.attribute("class"), Some("OnOff"));
        assert_eq!(e.attribute("missing"), None);
    }

    #[test]
    fn test_descendants_document_order() {
        let mut root = Element::new("a");
        let b = root.append("b");
        b.append("c");
        root.append("d");

        let names: Vec<_> = root.descendants().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_find_all() {
        let mut root = Element::new("Modules");
        root.append("Module").set_attribute("name", "OnOff");
        root.append("Other");
        root.append("Module").set_attribute("name", "Level");

        let names: Vec<_> = root
            .find_all("Module")
            .filter_map(|m| m.attribute("name"))
            .collect();
        assert_eq!(names, vec!["OnOff", "Level"]);
        assert_eq!(root.find("Other").map(|e| e.is_empty()), Some(true));
    }
}
