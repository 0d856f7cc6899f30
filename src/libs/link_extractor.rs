//! # Link Extractor
//!
//! Finds hyperlinks in a parsed page by their position relative to a known anchor
//! element. Each search walks the document tree forward from the anchor, in document
//! order, and returns `None` once the document is exhausted, so a page whose structure
//! has changed produces an explicit "not found" rather than a crash or an endless scan.
//!
//! "Following" an element means every element whose start tag comes after the anchor's
//! start tag, which includes the anchor's own descendants.

use crate::log_debug;
use colored::Colorize;
use scraper::{ElementRef, Html};

/// All elements of `doc`, in document order.
fn elements(doc: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    doc.tree.root().descendants().filter_map(ElementRef::wrap)
}

/// Elements that follow `anchor` in document order.
fn elements_after<'a>(doc: &'a Html, anchor: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    let anchor_id = (*anchor).id();
    doc.tree
        .root()
        .descendants()
        .skip_while(move |node| node.id() != anchor_id)
        .skip(1)
        .filter_map(ElementRef::wrap)
}

fn element_by_id<'a>(doc: &'a Html, id: &str) -> Option<ElementRef<'a>> {
    elements(doc).find(|el| el.value().id() == Some(id))
}

fn first_element_named<'a>(doc: &'a Html, tag: &str) -> Option<ElementRef<'a>> {
    elements(doc).find(|el| el.value().name() == tag)
}

/// The `href` of the `n`-th (1-based) `<a>` after `anchor`.
///
/// The `n`-th anchor is taken even if it has no `href`; a missing attribute means the
/// page no longer looks the way we expect, and is reported as `None`.
fn nth_href_after(doc: &Html, anchor: ElementRef<'_>, n: usize) -> Option<String> {
    let link = elements_after(doc, anchor)
        .filter(|el| el.value().name() == "a")
        .nth(n.checked_sub(1)?)?;
    link.value().attr("href").map(str::to_string)
}

/// Text content of an element with runs of whitespace collapsed to single spaces.
fn normalized_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// First link after the element with `id`.
pub fn link_after_id(doc: &Html, id: &str) -> Option<String> {
    nth_link_after_id(doc, id, 1)
}

/// The `n`-th (1-based) link after the element with `id`.
pub fn nth_link_after_id(doc: &Html, id: &str, n: usize) -> Option<String> {
    let anchor = element_by_id(doc, id)?;
    let href = nth_href_after(doc, anchor, n);
    log_debug!(
        "[Scrape] Link #{} after #{}: {}",
        n,
        id,
        href.as_deref().unwrap_or("<none>")
    );
    href
}

/// First link after the first `<tag>` element of the page.
pub fn link_after_first(doc: &Html, tag: &str) -> Option<String> {
    let anchor = first_element_named(doc, tag)?;
    nth_href_after(doc, anchor, 1)
}

/// Scans the `<td>` cells after the element with `anchor_id` for one whose text equals
/// `label`, and returns the first link after that cell.
///
/// Cells before the anchor are never considered, so a label that also appears in an
/// earlier section of the page (e.g. the Platform Runtime table) is not picked up.
pub fn link_after_cell_text(doc: &Html, anchor_id: &str, label: &str) -> Option<String> {
    let anchor = element_by_id(doc, anchor_id)?;
    let cell = elements_after(doc, anchor)
        .filter(|el| el.value().name() == "td")
        .find(|td| normalized_text(*td) == label);

    let Some(cell) = cell else {
        log_debug!(
            "[Scrape] No cell labelled '{}' after #{}",
            label.yellow(),
            anchor_id
        );
        return None;
    };
    nth_href_after(doc, cell, 1)
}

/// Target URL of the page's `<meta http-equiv="Refresh">` element.
pub fn meta_refresh_target(doc: &Html) -> Option<String> {
    let meta = elements(doc).find(|el| {
        el.value().name() == "meta"
            && el
                .value()
                .attr("http-equiv")
                .is_some_and(|v| v.eq_ignore_ascii_case("refresh"))
    })?;
    parse_refresh_content(meta.value().attr("content")?)
}

/// Pulls the URL out of a refresh `content` value such as `0;url=https://...`.
///
/// Everything after the first `=` of the second field is kept, so query strings in the
/// target survive intact.
pub fn parse_refresh_content(content: &str) -> Option<String> {
    let (_delay, rest) = content.split_once(';')?;
    let (key, target) = rest.trim().split_once('=')?;
    if !key.trim().eq_ignore_ascii_case("url") {
        return None;
    }
    let target = target.trim().trim_matches(|c| c == '\'' || c == '"');
    (!target.is_empty()).then(|| target.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"<html><body>
<h2 id="Latest_Release">Latest Release</h2>
<table>
  <tr><th>Build Name</th><th>Build Date</th></tr>
  <tr><td><a href="drops4/R-4.30-202312010110/">4.30</a></td><td>Fri, 1 Dec 2023</td></tr>
</table>
<h2 id="Stream_Stable_Builds">Stream Stable Builds</h2>
<a href="drops4/S-4.31M3-202311221900/">4.31M3</a>
</body></html>"#;

    const RELEASE: &str = r#"<html><body>
<h3 id="Platform_Runtime">Platform Runtime Binary</h3>
<table>
  <tr><td>Windows (64 bit version)</td><td><a href="download.php?dropFile=eclipse-platform-4.30-win32-x86_64.zip">runtime</a></td></tr>
</table>
<h3 id="SWT">SWT Binary and Source</h3>
<table>
  <tr><td>Status</td><td>Platform</td><td>Download</td></tr>
  <tr><td><img src="OK.gif"/></td><td>Windows (64 bit version)</td>
      <td><a href="download.php?dropFile=swt-4.30-win32-win32-x86_64.zip">swt-4.30-win32-win32-x86_64.zip</a></td></tr>
  <tr><td><img src="OK.gif"/></td><td>Mac OSX (64 bit version)</td>
      <td><a href="download.php?dropFile=swt-4.30-cocoa-macosx-x86_64.zip">swt-4.30-cocoa-macosx-x86_64.zip</a></td></tr>
  <tr><td><img src="OK.gif"/></td><td>Mac OSX (64 bit version for Arm64/AArch64)</td>
      <td><a href="download.php?dropFile=swt-4.30-cocoa-macosx-aarch64.zip">swt-4.30-cocoa-macosx-aarch64.zip</a></td></tr>
</table>
</body></html>"#;

    #[test]
    fn finds_latest_release_link() {
        let doc = Html::parse_document(INDEX);
        assert_eq!(
            link_after_id(&doc, "Latest_Release").as_deref(),
            Some("drops4/R-4.30-202312010110/")
        );
    }

    #[test]
    fn nth_link_counts_from_the_anchor() {
        let doc = Html::parse_document(INDEX);
        assert_eq!(
            nth_link_after_id(&doc, "Latest_Release", 2).as_deref(),
            Some("drops4/S-4.31M3-202311221900/")
        );
        assert_eq!(nth_link_after_id(&doc, "Latest_Release", 3), None);
        assert_eq!(nth_link_after_id(&doc, "Latest_Release", 0), None);
    }

    #[test]
    fn missing_anchor_is_none() {
        let doc = Html::parse_document(INDEX);
        assert_eq!(link_after_id(&doc, "Latest_Milestone"), None);
    }

    #[test]
    fn platform_link_comes_from_the_swt_section() {
        let doc = Html::parse_document(RELEASE);
        assert_eq!(
            link_after_cell_text(&doc, "SWT", "Windows (64 bit version)").as_deref(),
            Some("download.php?dropFile=swt-4.30-win32-win32-x86_64.zip")
        );
        assert_eq!(
            link_after_cell_text(&doc, "SWT", "Mac OSX (64 bit version)").as_deref(),
            Some("download.php?dropFile=swt-4.30-cocoa-macosx-x86_64.zip")
        );
        assert_eq!(
            link_after_cell_text(&doc, "SWT", "Mac OSX (64 bit version for Arm64/AArch64)")
                .as_deref(),
            Some("download.php?dropFile=swt-4.30-cocoa-macosx-aarch64.zip")
        );
    }

    #[test]
    fn absent_label_terminates_with_none() {
        let doc = Html::parse_document(RELEASE);
        assert_eq!(link_after_cell_text(&doc, "SWT", "Solaris (SPARC)"), None);
        assert_eq!(link_after_cell_text(&doc, "No_Such_Section", "Windows (64 bit version)"), None);
    }

    #[test]
    fn cell_text_whitespace_is_normalized() {
        let html = r#"<div id="SWT"></div><table><tr>
            <td>
               Linux   (64 bit version)
            </td><td><a href="linux.zip">x</a></td></tr></table>"#;
        let doc = Html::parse_document(html);
        assert_eq!(
            link_after_cell_text(&doc, "SWT", "Linux (64 bit version)").as_deref(),
            Some("linux.zip")
        );
    }

    #[test]
    fn link_after_first_meta() {
        let html = r#"<html><head><meta charset="utf-8"><title>Mirror</title></head>
            <body><a href="https://www.eclipse.org/downloads/download.php?file=/x.zip">Download</a></body></html>"#;
        let doc = Html::parse_document(html);
        assert_eq!(
            link_after_first(&doc, "meta").as_deref(),
            Some("https://www.eclipse.org/downloads/download.php?file=/x.zip")
        );
    }

    #[test]
    fn meta_refresh_target_is_extracted() {
        let html = r#"<html><head>
            <meta http-equiv="Refresh" content="0; url=https://mirror.example.org/eclipse/swt.zip?x=1">
            </head><body></body></html>"#;
        let doc = Html::parse_document(html);
        assert_eq!(
            meta_refresh_target(&doc).as_deref(),
            Some("https://mirror.example.org/eclipse/swt.zip?x=1")
        );
    }

    #[test]
    fn refresh_content_variants() {
        assert_eq!(
            parse_refresh_content("3;URL='https://a/b.zip'").as_deref(),
            Some("https://a/b.zip")
        );
        assert_eq!(parse_refresh_content("5"), None);
        assert_eq!(parse_refresh_content("0;url="), None);
        assert_eq!(parse_refresh_content("0;target=https://a"), None);
    }
}
