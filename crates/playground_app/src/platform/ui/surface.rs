//! Element capability layer.
//!
//! Everything the playground does to its user interface goes through the
//! [`Surface`] trait. [`ElementTree`] is the in-memory adapter used by the
//! console front end and by tests.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("element not found: {0}")]
    ElementNotFound(String),
    #[error("duplicate element id: {0}")]
    DuplicateId(String),
}

pub trait Surface {
    /// Create `id` under `parent` (or at the root) with initial attributes.
    fn create_element(
        &mut self,
        parent: Option<&str>,
        tag: &str,
        id: &str,
        attributes: &[(&str, &str)],
    ) -> Result<(), SurfaceError>;

    fn set_text(&mut self, id: &str, text: &str) -> Result<(), SurfaceError>;

    fn text(&self, id: &str) -> Result<String, SurfaceError>;

    fn set_attribute(&mut self, id: &str, name: &str, value: &str) -> Result<(), SurfaceError>;

    fn attribute(&self, id: &str, name: &str) -> Result<Option<String>, SurfaceError>;

    fn set_value(&mut self, id: &str, value: &str) -> Result<(), SurfaceError>;

    fn value(&self, id: &str) -> Result<String, SurfaceError>;

    fn set_hidden(&mut self, id: &str, hidden: bool) -> Result<(), SurfaceError>;

    fn is_hidden(&self, id: &str) -> Result<bool, SurfaceError>;

    fn set_enabled(&mut self, id: &str, enabled: bool) -> Result<(), SurfaceError>;

    fn is_enabled(&self, id: &str) -> Result<bool, SurfaceError>;

    /// Add (`on`) or remove a class.
    fn set_class(&mut self, id: &str, class: &str, on: bool) -> Result<(), SurfaceError>;

    fn has_class(&self, id: &str, class: &str) -> Result<bool, SurfaceError>;

    /// Register interest in `event` on `id`. Events without a listener are
    /// never delivered.
    fn listen(&mut self, id: &str, event: &str) -> Result<(), SurfaceError>;

    fn is_listening(&self, id: &str, event: &str) -> Result<bool, SurfaceError>;
}

#[derive(Debug, Clone, Default)]
struct Element {
    tag: String,
    children: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    value: String,
    hidden: bool,
    disabled: bool,
    classes: BTreeSet<String>,
    listeners: BTreeSet<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ElementTree {
    elements: BTreeMap<String, Element>,
    roots: Vec<String>,
}

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    /// Hidden if the element or any ancestor is hidden.
    pub fn is_displayed(&self, id: &str) -> Result<bool, SurfaceError> {
        self.get(id)?;
        let mut current = Some(id.to_string());
        while let Some(id) = current {
            let element = self.get(&id)?;
            if element.hidden {
                return Ok(false);
            }
            current = self.parent_of(&id);
        }
        Ok(true)
    }

    /// Indented outline of the displayed elements that carry content.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for root in &self.roots {
            self.outline_into(root, 0, &mut out);
        }
        out
    }

    fn outline_into(&self, id: &str, depth: usize, out: &mut String) {
        let Some(element) = self.elements.get(id) else {
            return;
        };
        if element.hidden {
            return;
        }
        let mut line = format!("{}{}#{}", "  ".repeat(depth), element.tag, id);
        if !element.classes.is_empty() {
            let classes: Vec<_> = element.classes.iter().map(String::as_str).collect();
            let _ = write!(line, ".{}", classes.join("."));
        }
        if element.disabled {
            line.push_str(" [disabled]");
        }
        if let Some(checked) = element.attributes.get("checked") {
            let _ = write!(line, " [checked={checked}]");
        }
        if !element.text.is_empty() {
            let _ = write!(line, " {:?}", element.text);
        }
        if !element.value.is_empty() {
            let _ = write!(line, " value={:?}", element.value);
        }
        out.push_str(&line);
        out.push('\n');
        for child in &element.children {
            self.outline_into(child, depth + 1, out);
        }
    }

    fn parent_of(&self, id: &str) -> Option<String> {
        self.elements
            .iter()
            .find(|(_, element)| element.children.iter().any(|child| child == id))
            .map(|(parent, _)| parent.clone())
    }

    fn get(&self, id: &str) -> Result<&Element, SurfaceError> {
        self.elements
            .get(id)
            .ok_or_else(|| SurfaceError::ElementNotFound(id.to_string()))
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Element, SurfaceError> {
        self.elements
            .get_mut(id)
            .ok_or_else(|| SurfaceError::ElementNotFound(id.to_string()))
    }
}

impl Surface for ElementTree {
    fn create_element(
        &mut self,
        parent: Option<&str>,
        tag: &str,
        id: &str,
        attributes: &[(&str, &str)],
    ) -> Result<(), SurfaceError> {
        if self.elements.contains_key(id) {
            return Err(SurfaceError::DuplicateId(id.to_string()));
        }
        match parent {
            Some(parent) => self.get_mut(parent)?.children.push(id.to_string()),
            None => self.roots.push(id.to_string()),
        }
        let element = Element {
            tag: tag.to_string(),
            attributes: attributes
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            ..Element::default()
        };
        self.elements.insert(id.to_string(), element);
        Ok(())
    }

    fn set_text(&mut self, id: &str, text: &str) -> Result<(), SurfaceError> {
        self.get_mut(id)?.text = text.to_string();
        Ok(())
    }

    fn text(&self, id: &str) -> Result<String, SurfaceError> {
        Ok(self.get(id)?.text.clone())
    }

    fn set_attribute(&mut self, id: &str, name: &str, value: &str) -> Result<(), SurfaceError> {
        self.get_mut(id)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn attribute(&self, id: &str, name: &str) -> Result<Option<String>, SurfaceError> {
        Ok(self.get(id)?.attributes.get(name).cloned())
    }

    fn set_value(&mut self, id: &str, value: &str) -> Result<(), SurfaceError> {
        self.get_mut(id)?.value = value.to_string();
        Ok(())
    }

    fn value(&self, id: &str) -> Result<String, SurfaceError> {
        Ok(self.get(id)?.value.clone())
    }

    fn set_hidden(&mut self, id: &str, hidden: bool) -> Result<(), SurfaceError> {
        self.get_mut(id)?.hidden = hidden;
        Ok(())
    }

    fn is_hidden(&self, id: &str) -> Result<bool, SurfaceError> {
        Ok(self.get(id)?.hidden)
    }

    fn set_enabled(&mut self, id: &str, enabled: bool) -> Result<(), SurfaceError> {
        self.get_mut(id)?.disabled = !enabled;
        Ok(())
    }

    fn is_enabled(&self, id: &str) -> Result<bool, SurfaceError> {
        Ok(!self.get(id)?.disabled)
    }

    fn set_class(&mut self, id: &str, class: &str, on: bool) -> Result<(), SurfaceError> {
        let classes = &mut self.get_mut(id)?.classes;
        if on {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
        Ok(())
    }

    fn has_class(&self, id: &str, class: &str) -> Result<bool, SurfaceError> {
        Ok(self.get(id)?.classes.contains(class))
    }

    fn listen(&mut self, id: &str, event: &str) -> Result<(), SurfaceError> {
        self.get_mut(id)?.listeners.insert(event.to_string());
        Ok(())
    }

    fn is_listening(&self, id: &str, event: &str) -> Result<bool, SurfaceError> {
        Ok(self.get(id)?.listeners.contains(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_elements_are_reported() {
        let mut tree = ElementTree::new();
        assert_eq!(
            tree.set_text("nope", "x"),
            Err(SurfaceError::ElementNotFound("nope".into()))
        );
        assert_eq!(
            tree.create_element(Some("nope"), "div", "child", &[]),
            Err(SurfaceError::ElementNotFound("nope".into()))
        );
        assert!(!tree.contains("child"));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut tree = ElementTree::new();
        tree.create_element(None, "div", "a", &[]).unwrap();
        assert_eq!(
            tree.create_element(None, "div", "a", &[]),
            Err(SurfaceError::DuplicateId("a".into()))
        );
    }

    #[test]
    fn hidden_ancestor_hides_descendants() {
        let mut tree = ElementTree::new();
        tree.create_element(None, "section", "outer", &[]).unwrap();
        tree.create_element(Some("outer"), "div", "inner", &[])
            .unwrap();
        assert!(tree.is_displayed("inner").unwrap());

        tree.set_hidden("outer", true).unwrap();
        assert!(!tree.is_hidden("inner").unwrap());
        assert!(!tree.is_displayed("inner").unwrap());
        assert!(tree.outline().is_empty());
    }

    #[test]
    fn attributes_classes_and_listeners() {
        let mut tree = ElementTree::new();
        tree.create_element(None, "input", "box", &[("type", "checkbox")])
            .unwrap();
        assert_eq!(tree.attribute("box", "type").unwrap().as_deref(), Some("checkbox"));

        tree.set_class("box", "half", true).unwrap();
        assert!(tree.has_class("box", "half").unwrap());
        tree.set_class("box", "half", false).unwrap();
        assert!(!tree.has_class("box", "half").unwrap());

        assert!(!tree.is_listening("box", "change").unwrap());
        tree.listen("box", "change").unwrap();
        assert!(tree.is_listening("box", "change").unwrap());

        tree.set_enabled("box", false).unwrap();
        assert!(!tree.is_enabled("box").unwrap());
    }

    #[test]
    fn outline_lists_content() {
        let mut tree = ElementTree::new();
        tree.create_element(None, "section", "info", &[]).unwrap();
        tree.create_element(Some("info"), "span", "info-compression", &[])
            .unwrap();
        tree.set_text("info-compression", "45.45%").unwrap();

        assert_eq!(
            tree.outline(),
            "section#info\n  span#info-compression \"45.45%\"\n"
        );
    }
}
