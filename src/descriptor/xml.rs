//! Minimal XML element tree built from `quick-xml` events.
//!
//! Maven descriptors only need element names, text, and nesting; attributes and
//! namespaces are dropped. Element names are stored without their namespace
//! prefix.

use quick_xml::Reader;
use quick_xml::events::Event;

/// One XML element with its trimmed text and child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    /// First child with the given name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All children with the given name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Trimmed text of the first child with the given name, if non-empty.
    #[must_use]
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.child(name).map(|c| c.text.trim().to_string()).filter(|t| !t.is_empty())
    }

    /// Follow a path of child names, e.g. `["build", "plugins"]`.
    #[must_use]
    pub fn descend(&self, path: &[&str]) -> Option<&Element> {
        path.iter().try_fold(self, |element, name| element.child(name))
    }
}

/// Parse a document and return its root element.
pub fn parse_document(content: &str) -> Result<Element, String> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    // Open elements, innermost last
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                stack.push(Element {
                    name: String::from_utf8_lossy(e.local_name().as_ref()).to_string(),
                    ..Element::default()
                });
            }
            Ok(Event::Empty(ref e)) => {
                let element = Element {
                    name: String::from_utf8_lossy(e.local_name().as_ref()).to_string(),
                    ..Element::default()
                };
                attach(&mut stack, &mut root, element);
            }
            Ok(Event::End(_)) => {
                let element = stack.pop().ok_or_else(|| "unbalanced closing tag".to_string())?;
                attach(&mut stack, &mut root, element);
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().map_err(|err| err.to_string())?;
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(text.trim());
                }
            }
            Ok(Event::CData(ref e)) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(format!("at byte {}: {e}", reader.buffer_position()));
            }
        }
    }

    if !stack.is_empty() {
        return Err(format!("unexpected end of document inside <{}>", stack[stack.len() - 1].name));
    }
    root.ok_or_else(|| "document has no root element".to_string())
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}
