//! Schedule-page scraping: subject index listing and section extraction.
//!
//! Both functions are pure over the page text, so the fixed HTML structure
//! they assume can be pinned down with fixtures. Fetching lives in the
//! binary's orchestration loop.

mod types;

pub use types::RawSection;

use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

/// Column positions within a 12-cell section row.
const DAYS_CELL: usize = 6;
const TIME_CELL: usize = 7;
const LOCATION_CELL: usize = 9;
const INSTRUCTOR_CELL: usize = 10;

/// Extracts subject page URLs from the by-subject index page.
///
/// Subject pages are same-directory `.html` links (e.g. "CECS.html");
/// the index itself and cross-directory links (e.g. "../By_College/...")
/// are excluded. Order follows the document; duplicates are dropped.
pub fn subject_page_urls(index_html: &str, base_url: &str) -> Vec<String> {
    let document = Html::parse_document(index_html);
    let anchor_selector = Selector::parse("a[href]").unwrap();

    let mut seen = HashSet::new();
    let mut urls = Vec::new();
    for anchor in document.select(&anchor_selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if href.ends_with(".html")
            && href != "index.html"
            && !href.contains('/')
            && seen.insert(href.to_string())
        {
            urls.push(format!("{base_url}{href}"));
        }
    }
    urls
}

/// Parses one subject page into raw section rows.
///
/// Each `div.courseBlock` holds the course code/title in its `h4` and one or
/// more `table.sectionTable` blocks (one per section group). Header rows and
/// rows with fewer than 12 cells are skipped.
pub fn parse_subject_page(html: &str) -> Vec<RawSection> {
    let document = Html::parse_document(html);
    let block_selector = Selector::parse("div.courseBlock").unwrap();
    let heading_selector = Selector::parse("h4").unwrap();
    let code_selector = Selector::parse("span.courseCode").unwrap();
    let title_selector = Selector::parse("span.courseTitle").unwrap();
    let table_selector = Selector::parse("table.sectionTable").unwrap();
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("td, th").unwrap();

    let mut sections = Vec::new();

    for block in document.select(&block_selector) {
        let Some(heading) = block.select(&heading_selector).next() else {
            continue;
        };
        let course_code = first_text(&heading, &code_selector);
        let course_title = first_text(&heading, &title_selector);

        for table in block.select(&table_selector) {
            for row in table.select(&row_selector) {
                let cells: Vec<ElementRef> = row.select(&cell_selector).collect();

                // Header rows are all <th scope="col">.
                if cells
                    .first()
                    .is_some_and(|cell| cell.value().attr("scope") == Some("col"))
                {
                    continue;
                }
                // Data rows have 12 cells: one th(scope=row) plus eleven td.
                if cells.len() < 12 {
                    continue;
                }

                sections.push(RawSection {
                    course_code: course_code.clone(),
                    course_title: course_title.clone(),
                    days: cell_text(&cells[DAYS_CELL]),
                    time: cell_text(&cells[TIME_CELL]),
                    location: cell_text(&cells[LOCATION_CELL]),
                    instructor: cell_text(&cells[INSTRUCTOR_CELL]),
                });
            }
        }
    }

    sections
}

fn first_text(scope: &ElementRef, selector: &Selector) -> String {
    scope
        .select(selector)
        .next()
        .map(|el| cell_text(&el))
        .unwrap_or_default()
}

fn cell_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX_FIXTURE: &str = r#"
        <html><body>
            <a href="index.html">Index</a>
            <a href="ART.html">Art</a>
            <a href="CECS.html">Computer Science</a>
            <a href="../By_College/index.html">By College</a>
            <a href="CECS.html">Computer Science (again)</a>
            <a href="http://example.com/other.html">Elsewhere</a>
            <a href="style.css">Stylesheet</a>
        </body></html>
    "#;

    #[test]
    fn test_subject_urls_filtered_and_deduplicated() {
        let urls = subject_page_urls(INDEX_FIXTURE, "https://campus.test/By_Subject/");
        assert_eq!(
            urls,
            vec![
                "https://campus.test/By_Subject/ART.html".to_string(),
                "https://campus.test/By_Subject/CECS.html".to_string(),
            ]
        );
    }

    fn subject_fixture() -> String {
        let header: String = (0..12)
            .map(|i| format!("<th scope=\"col\">H{i}</th>"))
            .collect();
        // Cells 6/7/9/10 carry days/time/location/instructor.
        let data_row = "<tr><th scope=\"row\">01</th><td>1234</td><td>SEM</td>\
             <td>1</td><td>3</td><td></td><td>TuTh</td><td>2:30-3:45PM</td>\
             <td></td><td>ECS-413</td><td>Yu</td><td>OPEN</td></tr>";
        let short_row = "<tr><td>footnote</td></tr>";
        format!(
            "<div class=\"courseBlock\">\
               <h4><span class=\"courseCode\">CECS 491A</span>\
                   <span class=\"courseTitle\">Senior Design I</span></h4>\
               <table class=\"sectionTable\"><tr>{header}</tr>{data_row}{short_row}</table>\
             </div>"
        )
    }

    #[test]
    fn test_parse_subject_page() {
        let sections = parse_subject_page(&subject_fixture());
        assert_eq!(
            sections,
            vec![RawSection {
                course_code: "CECS 491A".to_string(),
                course_title: "Senior Design I".to_string(),
                days: "TuTh".to_string(),
                time: "2:30-3:45PM".to_string(),
                location: "ECS-413".to_string(),
                instructor: "Yu".to_string(),
            }]
        );
    }

    #[test]
    fn test_block_without_heading_is_skipped() {
        let html = "<div class=\"courseBlock\"><table class=\"sectionTable\"></table></div>";
        assert!(parse_subject_page(html).is_empty());
    }
}
