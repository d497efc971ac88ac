//! # Tree Writer
//!
//! Pretty-printed XML serialization of a node tree.

use std::io;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::errors::{TreeError, TreeResult};
use super::node::Node;

/// Serializes a node tree to indented XML text with a document declaration.
pub fn to_xml(node: &Node) -> TreeResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(|e| TreeError::Serialize(e.to_string()))?;
    write_node(&mut writer, node)?;

    let bytes = writer.into_inner();
    let mut text =
        String::from_utf8(bytes).map_err(|e| TreeError::Serialize(e.to_string()))?;
    text.push('\n');
    Ok(text)
}

fn write_node<W: io::Write>(writer: &mut Writer<W>, node: &Node) -> TreeResult<()> {
    let mut start = BytesStart::new(node.name.as_str());
    for (key, value) in node.attrs() {
        start.push_attribute((key, value));
    }

    if node.children.is_empty() && node.chardata.is_empty() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(|e| TreeError::Serialize(e.to_string()));
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| TreeError::Serialize(e.to_string()))?;
    if !node.chardata.is_empty() {
        writer
            .write_event(Event::Text(BytesText::new(&node.chardata)))
            .map_err(|e| TreeError::Serialize(e.to_string()))?;
    }
    for child in &node.children {
        write_node(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(node.name.as_str())))
        .map_err(|e| TreeError::Serialize(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::super::loader::parse_str;
    use super::*;

    #[test]
    fn test_empty_element_self_closes() {
        let node = Node::new("lfn-to-pfn")
            .with_attr("protocol", "srm")
            .with_attr("path-match", "/store/(.*)");
        let xml = to_xml(&node).unwrap();
        assert!(xml.contains("<lfn-to-pfn protocol=\"srm\" path-match=\"/store/(.*)\"/>"));
    }

    #[test]
    fn test_roundtrip_through_loader() {
        let mut root = Node::new("storage-mapping");
        root.add_child(
            Node::new("lfn-to-pfn")
                .with_attr("protocol", "srm")
                .with_attr("path-match", "/store/(.*)")
                .with_attr("result", "srm://host/$1"),
        );
        let xml = to_xml(&root).unwrap();
        let reloaded = parse_str(&xml).unwrap();
        assert_eq!(reloaded, root);
    }

    #[test]
    fn test_chardata_written() {
        let mut node = Node::new("note");
        node.chardata = "hello".to_string();
        let xml = to_xml(&node).unwrap();
        assert!(xml.contains("<note>hello</note>"));
    }
}
