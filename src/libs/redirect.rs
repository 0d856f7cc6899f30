//! # Redirect Follower
//!
//! The download link on a release page does not point at the archive. It leads through
//! three pages, each with a fixed shape:
//!
//! 1. the download page: the mirror link is the first link after its first `<meta>`;
//! 2. the mirror page: the download link is the second link after `#novaContent`, and is
//!    relative to the site's `downloads/` directory;
//! 3. the redirect page: the archive URL sits in a `<meta http-equiv="Refresh">`.
//!
//! A page that does not match its expected shape fails with `LinkNotFound` naming the hop.

use crate::libs::link_extractor::{link_after_first, meta_refresh_target, nth_link_after_id};
use crate::libs::utilities::http::PageSource;
use crate::log_debug;
use crate::schemas::errors::InstallError;
use colored::Colorize;
use scraper::Html;
use url::Url;

/// `id` of the element wrapping the mirror page's main content.
const MIRROR_CONTENT_ID: &str = "novaContent";

/// Resolves `href` found on the page at `page_url` into an absolute URL.
pub fn resolve_href(page_url: &str, href: &str) -> Result<String, InstallError> {
    let base = Url::parse(page_url).map_err(|e| InstallError::Url {
        url: page_url.to_string(),
        source: e,
    })?;
    let joined = base.join(href).map_err(|e| InstallError::Url {
        url: href.to_string(),
        source: e,
    })?;
    Ok(joined.into())
}

/// Prefixes a mirror-page link with the fixed downloads base, unless it is already absolute.
pub fn mirror_link(mirror_base_url: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        format!("{}{}", mirror_base_url, href)
    }
}

fn fetch_document<S: PageSource>(source: &S, url: &str) -> Result<Html, InstallError> {
    Ok(Html::parse_document(&source.fetch_page(url)?))
}

/// Follows the three hops from a platform download page to the direct archive URL.
pub fn resolve_archive_url<S: PageSource>(
    source: &S,
    download_page_url: &str,
    mirror_base_url: &str,
) -> Result<String, InstallError> {
    let page = fetch_document(source, download_page_url)?;
    let href = link_after_first(&page, "meta")
        .ok_or_else(|| InstallError::not_found("the mirror link", download_page_url))?;
    let mirror_page_url = resolve_href(download_page_url, &href)?;
    log_debug!("[Redirect] Mirror page: {}", mirror_page_url.blue());

    let page = fetch_document(source, &mirror_page_url)?;
    let href = nth_link_after_id(&page, MIRROR_CONTENT_ID, 2).ok_or_else(|| {
        InstallError::not_found(
            format!("the download link in #{}", MIRROR_CONTENT_ID),
            mirror_page_url.as_str(),
        )
    })?;
    let redirect_page_url = mirror_link(mirror_base_url, &href);
    log_debug!("[Redirect] Redirect page: {}", redirect_page_url.blue());

    let page = fetch_document(source, &redirect_page_url)?;
    let archive_url = meta_refresh_target(&page)
        .ok_or_else(|| InstallError::not_found("a meta refresh target", redirect_page_url.as_str()))?;
    log_debug!("[Redirect] Archive URL: {}", archive_url.green());
    Ok(archive_url)
}
