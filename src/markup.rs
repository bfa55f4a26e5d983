use scraper::{ElementRef, Html, Node};

/// The little a row lookup needs from a document tree.
pub trait MarkupNode: Copy {
    fn children(&self) -> Vec<Self>;
    /// Text carried by this node itself, `None` for elements.
    fn own_text(&self) -> Option<&str>;
    fn tag_name(&self) -> Option<&str>;
}

/// Ancestors (root first) of the first text node, in document order, whose
/// trimmed content equals `target` exactly.
pub fn path_to_text<N: MarkupNode>(root: N, target: &str) -> Option<Vec<N>> {
    let mut path = Vec::new();
    descend(root, target, &mut path).then_some(path)
}

fn descend<N: MarkupNode>(node: N, target: &str, path: &mut Vec<N>) -> bool {
    if let Some(text) = node.own_text() {
        return text.trim() == target;
    }
    path.push(node);
    for child in node.children() {
        if descend(child, target, path) {
            return true;
        }
    }
    path.pop();
    false
}

/// Nearest ancestor of the matching text node that satisfies `is_match`.
pub fn nearest_ancestor_of_text<N, P>(root: N, target: &str, is_match: P) -> Option<N>
where
    N: MarkupNode,
    P: Fn(&N) -> bool,
{
    path_to_text(root, target)?
        .into_iter()
        .rev()
        .find(|node| is_match(node))
}

/// A `scraper` document seen through [`MarkupNode`].
#[derive(Debug, Clone, Copy)]
pub enum HtmlNode<'a> {
    Element(ElementRef<'a>),
    Text(&'a str),
}

impl<'a> HtmlNode<'a> {
    pub fn root(document: &'a Html) -> Self {
        HtmlNode::Element(document.root_element())
    }

    pub fn as_element(&self) -> Option<ElementRef<'a>> {
        match self {
            HtmlNode::Element(element) => Some(*element),
            HtmlNode::Text(_) => None,
        }
    }
}

impl MarkupNode for HtmlNode<'_> {
    fn children(&self) -> Vec<Self> {
        let HtmlNode::Element(element) = self else {
            return Vec::new();
        };
        element
            .children()
            .filter_map(|child| match child.value() {
                Node::Text(text) => Some(HtmlNode::Text(&**text)),
                Node::Element(_) => ElementRef::wrap(child).map(HtmlNode::Element),
                _ => None,
            })
            .collect()
    }

    fn own_text(&self) -> Option<&str> {
        match self {
            HtmlNode::Text(text) => Some(*text),
            HtmlNode::Element(_) => None,
        }
    }

    fn tag_name(&self) -> Option<&str> {
        self.as_element().map(|element| element.value().name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hand-built tree, to exercise the traversal without an HTML parser.
    struct TestNode {
        tag: Option<&'static str>,
        text: Option<&'static str>,
        children: Vec<TestNode>,
    }

    fn element(tag: &'static str, children: Vec<TestNode>) -> TestNode {
        TestNode {
            tag: Some(tag),
            text: None,
            children,
        }
    }

    fn text(text: &'static str) -> TestNode {
        TestNode {
            tag: None,
            text: Some(text),
            children: vec![],
        }
    }

    impl MarkupNode for &TestNode {
        fn children(&self) -> Vec<Self> {
            self.children.iter().collect()
        }

        fn own_text(&self) -> Option<&str> {
            self.text
        }

        fn tag_name(&self) -> Option<&str> {
            self.tag
        }
    }

    fn is_row<N: MarkupNode>(node: &N) -> bool {
        node.tag_name() == Some("tr")
    }

    #[test]
    fn test_finds_enclosing_row() {
        let tree = element(
            "table",
            vec![
                element("tr", vec![element("td", vec![text("1400")])]),
                element("tr", vec![element("td", vec![element("b", vec![text(" 140 ")])])]),
            ],
        );
        let row = nearest_ancestor_of_text(&tree, "140", is_row).unwrap();
        assert!(std::ptr::eq(row, &tree.children[1]));
    }

    #[test]
    fn test_path_lists_ancestors_root_first() {
        let tree = element("div", vec![element("span", vec![text("307")])]);
        let path = path_to_text(&tree, "307").unwrap();
        let tags: Vec<_> = path.iter().map(|node| node.tag_name()).collect();
        assert_eq!(tags, vec![Some("div"), Some("span")]);
    }

    #[test]
    fn test_no_substring_match() {
        let tree = element("tr", vec![text("COMP 140 lecture"), text("1400")]);
        assert!(path_to_text(&tree, "140").is_none());
    }

    #[test]
    fn test_match_outside_row_has_no_ancestor() {
        let tree = element("p", vec![text("307")]);
        assert!(path_to_text(&tree, "307").is_some());
        assert!(nearest_ancestor_of_text(&tree, "307", is_row).is_none());
    }

    #[test]
    fn test_html_node_traversal() {
        let document = Html::parse_document(
            "<html><body><table><tr id='row'><td> 307 </td></tr></table></body></html>",
        );
        let row = nearest_ancestor_of_text(HtmlNode::root(&document), "307", is_row)
            .and_then(|node| node.as_element())
            .unwrap();
        assert_eq!(row.value().attr("id"), Some("row"));
    }
}
