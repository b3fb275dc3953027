use scraper::{Html, Selector};
use url::Url;

use crate::libreg::tools::error::{Result, ToolError};

/// Returns the first `<a href>` in document order whose path ends in
/// `extension`. Query strings and fragments are ignored for the match and
/// the comparison is ASCII case-insensitive.
pub fn find_spreadsheet_link(html: &str, extension: &str) -> Result<Option<String>> {
    let document = Html::parse_document(html);
    let anchors =
        Selector::parse("a[href]").map_err(|err| ToolError::InvalidSelector(err.to_string()))?;
    let extension = extension.to_ascii_lowercase();

    let link = document
        .select(&anchors)
        .filter_map(|element| element.value().attr("href"))
        .map(str::trim)
        .find(|href| link_path(href).to_ascii_lowercase().ends_with(&extension))
        .map(str::to_string);

    Ok(link)
}

/// Makes `href` absolute. Links that already carry a scheme are kept as they
/// are; anything else is resolved against the page it was found on, so
/// `/files/x.xlsx` gains the page's scheme and host.
pub fn resolve_link(page_url: &Url, href: &str) -> Result<Url> {
    match Url::parse(href) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => Ok(page_url.join(href)?),
        Err(err) => Err(err.into()),
    }
}

/// Final path segment of `url`, used as the local file name.
pub fn file_name(url: &Url) -> Result<String> {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ToolError::MissingFileName(url.to_string()))
}

fn link_path(href: &str) -> &str {
    href.split(|c: char| c == '?' || c == '#').next().unwrap_or(href)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <a href="/kontakty">Kontakty</a>
          <a name="anchor">no target</a>
          <a href="/assets/adresar.pdf">PDF</a>
          <a href="/assets/Adresar_knihoven.XLSX?v=3">Adresář</a>
          <a href="https://other.example/second.xlsx">second</a>
        </body></html>
    "#;

    #[test]
    fn picks_first_spreadsheet_link_in_document_order() {
        let link = find_spreadsheet_link(PAGE, ".xlsx").unwrap();
        assert_eq!(link.as_deref(), Some("/assets/Adresar_knihoven.XLSX?v=3"));
    }

    #[test]
    fn page_without_spreadsheet_has_no_link() {
        let html = r#"<a href="/report.pdf">report</a><a href="/data.xlsx.html">x</a>"#;
        assert_eq!(find_spreadsheet_link(html, ".xlsx").unwrap(), None);
    }

    #[test]
    fn relative_links_get_the_page_host() {
        let page = Url::parse("https://mk.gov.cz/evidence-knihoven-cs-341").unwrap();
        let url = resolve_link(&page, "/assets/adresar.xlsx").unwrap();
        assert_eq!(url.as_str(), "https://mk.gov.cz/assets/adresar.xlsx");
    }

    #[test]
    fn absolute_links_are_kept() {
        let page = Url::parse("https://mk.gov.cz/page").unwrap();
        let url = resolve_link(&page, "https://cdn.example.org/a/b.xlsx").unwrap();
        assert_eq!(url.as_str(), "https://cdn.example.org/a/b.xlsx");
    }

    #[test]
    fn file_name_is_last_path_segment() {
        let url = Url::parse("https://mk.gov.cz/assets/adresar.xlsx?v=3").unwrap();
        assert_eq!(file_name(&url).unwrap(), "adresar.xlsx");

        let root = Url::parse("https://mk.gov.cz/assets/").unwrap();
        assert!(matches!(
            file_name(&root),
            Err(ToolError::MissingFileName(_))
        ));
    }
}
