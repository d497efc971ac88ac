//! # Tree Loader
//!
//! Event-based XML reader producing a [`Node`] tree. Elements are pushed on
//! a stack as they open and attached to their parent as they close, so
//! child and attribute order match document order.

use std::fs;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::errors::{TreeError, TreeResult};
use super::node::Node;

/// Parses an XML document from a file into a node tree.
pub fn parse_file(path: &Path) -> TreeResult<Node> {
    let text = fs::read_to_string(path).map_err(|e| TreeError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    parse_str(&text)
}

/// Parses an XML document from a string into a node tree.
pub fn parse_str(text: &str) -> TreeResult<Node> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                stack.push(node_from_start(&start)?);
            }
            Ok(Event::Empty(start)) => {
                let node = node_from_start(&start)?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::End(_)) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| TreeError::Malformed("unbalanced end tag".to_string()))?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::Text(chars)) => {
                let data = chars
                    .unescape()
                    .map_err(|e| TreeError::Malformed(e.to_string()))?;
                if let Some(top) = stack.last_mut() {
                    top.chardata.push_str(data.trim());
                }
            }
            Ok(Event::Eof) => break,
            // declarations, comments, processing instructions, CDATA
            Ok(_) => {}
            Err(e) => return Err(TreeError::Malformed(e.to_string())),
        }
    }

    if !stack.is_empty() {
        return Err(TreeError::Malformed("unclosed element".to_string()));
    }
    root.ok_or(TreeError::Empty)
}

/// Builds a node from an element start tag, copying its attributes.
fn node_from_start(start: &BytesStart<'_>) -> TreeResult<Node> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut node = Node::new(name);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| TreeError::Malformed(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| TreeError::Malformed(e.to_string()))?
            .into_owned();
        node.set_attr(key, value);
    }
    Ok(node)
}

/// Attaches a completed node to its parent, or records it as the root.
fn attach(stack: &mut Vec<Node>, root: &mut Option<Node>, node: Node) -> TreeResult<()> {
    match stack.last_mut() {
        Some(parent) => parent.add_child(node),
        None => {
            if root.is_some() {
                return Err(TreeError::Malformed(
                    "multiple root elements".to_string(),
                ));
            }
            *root = Some(node);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_elements() {
        let root = parse_str(
            r#"<storage-mapping>
                 <lfn-to-pfn protocol="srm" path-match="/store/(.*)" result="srm://x/$1"/>
                 <pfn-to-lfn protocol="srm" path-match=".*" result="/store/$1"/>
               </storage-mapping>"#,
        )
        .unwrap();

        assert_eq!(root.name, "storage-mapping");
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].name, "lfn-to-pfn");
        assert_eq!(root.children[0].attr("protocol"), Some("srm"));
        assert_eq!(root.children[1].attr("result"), Some("/store/$1"));
    }

    #[test]
    fn test_parse_chardata() {
        let root = parse_str("<note>hello world</note>").unwrap();
        assert_eq!(root.chardata, "hello world");
    }

    #[test]
    fn test_parse_declaration_ignored() {
        let root = parse_str("<?xml version=\"1.0\"?><a><b/></a>").unwrap();
        assert_eq!(root.name, "a");
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn test_parse_malformed_fails() {
        assert!(parse_str("<a><b></a>").is_err());
        assert!(matches!(parse_str(""), Err(TreeError::Empty)));
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_file(Path::new("/nonexistent/storage.xml")).unwrap_err();
        assert!(matches!(err, TreeError::Io { .. }));
    }
}
