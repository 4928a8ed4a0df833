//! Path-tracking walk over Maven XML documents.
//!
//! POM and `maven-metadata.xml` parsing only care about which element they
//! are in and what text it holds, so both share this walker instead of
//! driving `quick_xml::Reader` themselves.

use quick_xml::events::Event;
use quick_xml::Reader;

/// One step of the walk. The context is the element path joined with `>`,
/// e.g. `project>dependencies>dependency>version`.
pub(crate) enum Node<'a> {
    Open(&'a str),
    Close(&'a str, &'a str),
}

pub(crate) fn walk(xml: &str, mut visit: impl FnMut(Node<'_>)) -> Result<(), quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                path.push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
                text.clear();
                visit(Node::Open(&path.join(">")));
            }
            Event::Empty(e) => {
                path.push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
                let ctx = path.join(">");
                visit(Node::Open(&ctx));
                visit(Node::Close(&ctx, ""));
                path.pop();
            }
            Event::Text(e) => {
                text.push_str(&e.unescape()?);
            }
            Event::CData(e) => {
                text.push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Event::End(_) => {
                visit(Node::Close(&path.join(">"), text.trim()));
                path.pop();
                text.clear();
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_contexts_and_text() {
        let mut seen = Vec::new();
        walk("<a><b>one</b><c/><b>two</b></a>", |node| {
            if let Node::Close(ctx, text) = node {
                seen.push(format!("{ctx}={text}"));
            }
        })
        .unwrap();
        assert_eq!(seen, vec!["a>b=one", "a>c=", "a>b=two", "a="]);
    }

    #[test]
    fn namespace_prefixes_are_ignored() {
        let mut opened = Vec::new();
        walk(r#"<m:project xmlns:m="x"><m:version>1</m:version></m:project>"#, |node| {
            if let Node::Open(ctx) = node {
                opened.push(ctx.to_string());
            }
        })
        .unwrap();
        assert_eq!(opened, vec!["project", "project>version"]);
    }

    #[test]
    fn malformed_input_is_an_error() {
        assert!(walk("<a><b></a>", |_| {}).is_err());
    }
}
