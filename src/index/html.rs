//! Scrapers for the pages served by packages.debian.org.
//!
//! Each function takes the raw page and returns the bits of text the
//! locator needs. They never fail on pages that lack the expected
//! elements; they return an empty list instead.

use std::borrow::Cow;

use anyhow::{Result, anyhow};
use tl::{Node, Parser, VDom};

fn parse(html: &str) -> Result<VDom<'_>> {
    tl::parse(html, tl::ParserOptions::default()).map_err(|e| anyhow!("invalid HTML: {e:?}"))
}

fn text<'a>(node: &Node<'a>, parser: &Parser<'a>) -> String {
    decode(&node.inner_text(parser)).trim().to_string()
}

fn decode(raw: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(raw)
}

/// Package names from a "search the contents of packages" result page.
///
/// Results are table rows: a `td.file` cell with the path, followed by a
/// cell linking to each package that ships it.
pub fn parse_file_search(html: &str) -> Result<Vec<String>> {
    let dom = parse(html)?;
    let parser = dom.parser();
    let mut packages = Vec::new();

    for row in dom.query_selector("tr").into_iter().flatten() {
        let Some(row) = row.get(parser).and_then(Node::as_tag) else {
            continue;
        };
        let has_file = row
            .query_selector(parser, ".file")
            .is_some_and(|mut cells| cells.next().is_some());
        if !has_file {
            continue;
        }

        for link in row.query_selector(parser, "a").into_iter().flatten() {
            let Some(link) = link.get(parser) else {
                continue;
            };
            let name = text(link, parser);
            if !name.is_empty() && !packages.contains(&name) {
                packages.push(name);
            }
        }
    }

    Ok(packages)
}

/// Package names from a "search package names" result page (`<h3>Package foo</h3>`).
pub fn parse_name_search(html: &str) -> Result<Vec<String>> {
    let dom = parse(html)?;
    let parser = dom.parser();

    let names = dom
        .query_selector("h3")
        .into_iter()
        .flatten()
        .filter_map(|heading| heading.get(parser))
        .map(|heading| {
            let heading = text(heading, parser);
            heading
                .strip_prefix("Package")
                .unwrap_or(&heading)
                .trim()
                .to_string()
        })
        .collect();

    Ok(names)
}

/// Paths listed on a package's `filelist` page.
pub fn parse_file_list(html: &str) -> Result<Vec<String>> {
    let dom = parse(html)?;
    let parser = dom.parser();

    let mut files = Vec::new();
    for block in dom.query_selector("pre").into_iter().flatten() {
        let Some(block) = block.get(parser) else {
            continue;
        };
        let content = block.inner_text(parser);
        files.extend(
            decode(&content)
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }

    Ok(files)
}

/// Mirror URLs ending in `.deb` from a package's `download` page.
pub fn parse_download_links(html: &str) -> Result<Vec<String>> {
    let dom = parse(html)?;
    let parser = dom.parser();

    let links = dom
        .query_selector("a")
        .into_iter()
        .flatten()
        .filter_map(|anchor| anchor.get(parser).and_then(Node::as_tag))
        .filter_map(|anchor| anchor.attributes().get("href").flatten())
        .map(|href| decode(&href.as_utf8_str()).trim().to_string())
        .filter(|href| href.ends_with(".deb"))
        .collect();

    Ok(links)
}
