//! Input resolution: read a WXR export and decode its items.
//!
//! The export is parsed with `xml5ever` into the same RcDom type the HTML
//! parser uses, then copied into a [`GenericNode`] tree so reading fields
//! is a plain tree walk. WordPress wraps bodies and titles in CDATA; the
//! tokenizer delivers those as ordinary text.

use crate::error::WxrError;
use crate::item::Item;
use crate::pipeline::markup::GenericNode;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::RcDom;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};
use xml5ever::driver::{parse_document, XmlParseOpts};

/// Where the export comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
}

impl InputSource {
    /// `None` or an empty path means stdin.
    pub fn from_arg(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) if !p.as_os_str().is_empty() => InputSource::File(p),
            _ => InputSource::Stdin,
        }
    }

    fn name(&self) -> String {
        match self {
            InputSource::File(p) => p.display().to_string(),
            InputSource::Stdin => "<stdin>".to_string(),
        }
    }
}

/// Read the raw export bytes.
pub async fn read_input(source: &InputSource) -> Result<Vec<u8>, WxrError> {
    let bytes = match source {
        InputSource::File(path) => {
            if !path.exists() {
                return Err(WxrError::InputNotFound { path: path.clone() });
            }
            tokio::fs::read(path)
                .await
                .map_err(|e| WxrError::ReadFailed {
                    source_name: source.name(),
                    source: e,
                })?
        }
        InputSource::Stdin => {
            let mut buf = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut buf)
                .await
                .map_err(|e| WxrError::ReadFailed {
                    source_name: source.name(),
                    source: e,
                })?;
            buf
        }
    };
    debug!("Read {} bytes from {}", bytes.len(), source.name());
    Ok(bytes)
}

/// Read and decode the export in one step.
pub async fn load_items(source: &InputSource) -> Result<Vec<Item>, WxrError> {
    let bytes = read_input(source).await?;
    let items = parse_wxr(&bytes)?;
    info!("{} items in {}", items.len(), source.name());
    Ok(items)
}

/// Decode every `rss > channel > item` of a WXR document.
pub fn parse_wxr(bytes: &[u8]) -> Result<Vec<Item>, WxrError> {
    let text = std::str::from_utf8(bytes).map_err(|e| WxrError::MalformedExport {
        detail: format!("input is not UTF-8: {e}"),
    })?;
    let text = text.trim_start_matches('\u{FEFF}');

    let dom = parse_document(RcDom::default(), XmlParseOpts::default()).one(text);
    let root = GenericNode::from_rcdom(&dom.document);
    drop(dom);

    let rss = root
        .children
        .iter()
        .find(|c| c.is_element("rss"))
        .ok_or_else(|| WxrError::MalformedExport {
            detail: "no <rss> root element".to_string(),
        })?;

    Ok(rss
        .children
        .iter()
        .filter(|c| c.is_element("channel"))
        .flat_map(|channel| channel.children.iter().filter(|c| c.is_element("item")))
        .map(item_from_node)
        .collect())
}

fn item_from_node(node: &GenericNode) -> Item {
    let mut item = Item::default();
    for child in &node.children {
        let slot = match child.tag.as_str() {
            "title" => &mut item.title,
            "content:encoded" => &mut item.content,
            "wp:post_date" => &mut item.post_date,
            "wp:status" => &mut item.status,
            "wp:post_type" => &mut item.post_type,
            "wp:post_name" => &mut item.post_name,
            _ => continue,
        };
        let value = child.text_content();
        let value = strip_cdata(&value);
        // Bodies keep their whitespace; every other field is a scalar.
        *slot = if child.tag == "content:encoded" {
            value.to_string()
        } else {
            value.trim().to_string()
        };
    }
    item
}

/// Remove a CDATA wrapper that survived as literal text (double-escaped
/// exports from some migration plugins).
pub fn strip_cdata(s: &str) -> &str {
    let t = s.trim();
    match t
        .strip_prefix("<![CDATA[")
        .and_then(|rest| rest.strip_suffix("]]>"))
    {
        Some(inner) => inner,
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<rss version="2.0"
	xmlns:excerpt="http://wordpress.org/export/1.2/excerpt/"
	xmlns:content="http://purl.org/rss/1.0/modules/content/"
	xmlns:dc="http://purl.org/dc/elements/1.1/"
	xmlns:wp="http://wordpress.org/export/1.2/">
<channel>
	<title>Example Site</title>
	<wp:wxr_version>1.2</wp:wxr_version>
	<item>
		<title><![CDATA[Hello & welcome]]></title>
		<dc:creator><![CDATA[admin]]></dc:creator>
		<content:encoded><![CDATA[<p>Hello <strong>world</strong></p>]]></content:encoded>
		<excerpt:encoded><![CDATA[not the body]]></excerpt:encoded>
		<wp:post_date><![CDATA[2021-08-07 07:56:40]]></wp:post_date>
		<wp:post_name><![CDATA[hello-welcome]]></wp:post_name>
		<wp:status><![CDATA[publish]]></wp:status>
		<wp:post_type><![CDATA[post]]></wp:post_type>
	</item>
	<item>
		<title>About</title>
		<content:encoded></content:encoded>
		<wp:post_date>2020-11-29 16:29:33</wp:post_date>
		<wp:post_name>about</wp:post_name>
		<wp:status>draft</wp:status>
		<wp:post_type>page</wp:post_type>
	</item>
</channel>
</rss>"#;

    #[test]
    fn parses_items_in_order() {
        let items = parse_wxr(EXPORT.as_bytes()).unwrap();
        assert_eq!(items.len(), 2);

        let post = &items[0];
        assert_eq!(post.title, "Hello & welcome");
        assert_eq!(post.content, "<p>Hello <strong>world</strong></p>");
        assert_eq!(post.post_date, "2021-08-07 07:56:40");
        assert_eq!(post.post_name, "hello-welcome");
        assert_eq!(post.status, "publish");
        assert_eq!(post.post_type, "post");

        let page = &items[1];
        assert_eq!(page.title, "About");
        assert_eq!(page.content, "");
        assert_eq!(page.status, "draft");
        assert_eq!(page.post_type, "page");
    }

    #[test]
    fn missing_rss_root_is_malformed() {
        let err = parse_wxr(b"<feed><entry/></feed>").unwrap_err();
        assert!(matches!(err, WxrError::MalformedExport { .. }), "got {err:?}");
    }

    #[test]
    fn non_utf8_is_malformed() {
        let err = parse_wxr(&[0x3c, 0xff, 0xfe, 0x3e]).unwrap_err();
        assert!(matches!(err, WxrError::MalformedExport { .. }));
    }

    #[test]
    fn empty_channel_has_no_items() {
        let items = parse_wxr(b"<rss><channel><title>x</title></channel></rss>").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn strip_cdata_only_strips_full_wrapper() {
        assert_eq!(strip_cdata("<![CDATA[post]]>"), "post");
        assert_eq!(strip_cdata("post"), "post");
        assert_eq!(strip_cdata("<![CDATA[half"), "<![CDATA[half");
    }

    #[test]
    fn input_source_from_arg() {
        assert_eq!(InputSource::from_arg(None), InputSource::Stdin);
        assert_eq!(InputSource::from_arg(Some(PathBuf::new())), InputSource::Stdin);
        assert_eq!(
            InputSource::from_arg(Some(PathBuf::from("export.xml"))),
            InputSource::File(PathBuf::from("export.xml"))
        );
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let err = read_input(&InputSource::File(PathBuf::from("/definitely/not/here.xml")))
            .await
            .unwrap_err();
        assert!(matches!(err, WxrError::InputNotFound { .. }));
    }
}
