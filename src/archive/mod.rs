use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::extract::inline_json;
use crate::models::PageContent;

#[derive(Debug, Clone)]
pub struct ArchivePaths {
    pub html: PathBuf,
    pub json: PathBuf,
}

/// Dump a fetched page next to its embedded JSON: `<name>.html` holds the
/// raw response body, `<name>.json` every inline brace span that parses.
pub fn save_page(dir: &Path, page: &PageContent) -> Result<ArchivePaths> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create archive directory {}", dir.display()))?;

    let base = archive_basename(&page.url);
    let paths = ArchivePaths {
        html: dir.join(format!("{}.html", base)),
        json: dir.join(format!("{}.json", base)),
    };

    fs::write(&paths.html, &page.html)
        .with_context(|| format!("Failed to write {}", paths.html.display()))?;

    let candidates = inline_json::json_candidates(&page.html);
    let json = serde_json::to_string_pretty(&candidates)?;
    fs::write(&paths.json, json)
        .with_context(|| format!("Failed to write {}", paths.json.display()))?;

    info!(
        "Archived {} ({} embedded JSON candidates)",
        page.url,
        candidates.len()
    );
    Ok(paths)
}

/// Turn a URL into a flat filename: scheme stripped, path separators and
/// filesystem-invalid characters replaced with underscores.
pub fn archive_basename(url: &str) -> String {
    let without_scheme = url.split("//").nth(1).unwrap_or(url);
    sanitize_filename(&without_scheme.replace('/', "_"))
}

pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') {
                '_'
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn basename_strips_scheme_and_flattens_path() {
        assert_eq!(
            archive_basename("https://shop.example.com/products/item"),
            "shop.example.com_products_item"
        );
    }

    #[test]
    fn basename_neutralizes_query_characters() {
        assert_eq!(
            archive_basename("https://example.com/p?id=1&x=2"),
            "example.com_p_id=1&x=2"
        );
    }

    #[test]
    fn sanitize_replaces_invalid_characters() {
        assert_eq!(sanitize_filename(r#"a<b>c:d"e/f\g|h?i*j"#), "a_b_c_d_e_f_g_h_i_j");
    }

    #[test]
    fn save_page_writes_html_and_json_dumps() {
        let dir = std::env::temp_dir().join(format!("product-scout-test-{}", std::process::id()));
        let page = PageContent {
            url: "https://example.com/item".to_string(),
            html: r#"<html><script>var p = {"name": "Dumped", "price": "3.00"};</script></html>"#
                .to_string(),
        };

        let paths = save_page(&dir, &page).unwrap();
        let html = fs::read_to_string(&paths.html).unwrap();
        assert_eq!(html, page.html);

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&paths.json).unwrap()).unwrap();
        assert_eq!(json[0]["name"], "Dumped");

        fs::remove_dir_all(&dir).unwrap();
    }
}
