//! Extraction of GapMind pathway pages and the organism index (gapView.cgi).
//!
//! GapMind encodes pathway confidence visually. The current renderer styles
//! the `<a>` elements in the first cell (ScoreToStyle() in the CGI):
//!
//! ```text
//! score > 1 → color: #007000; font-weight: bold;   (high)
//! score = 1 → color: #000000;                      (medium)
//! score < 1 → color: #CC4444;                      (low)
//! ```
//!
//! Older renderings colored the row or cell background instead. Both shapes
//! are supported as an ordered list of strategies tried until one yields a
//! non-unknown tier; new marker variants are additions to the lookup tables.

use scraper::ElementRef;

use crate::extract::dom::{clean_text, enclosing, extract_links, parse_document, selector};
use crate::extract::re;
use crate::models::{Confidence, GapMindResults, Organism, Pathway};

/// Inline-style color markers on first-cell anchors (current renderer).
const ANCHOR_STYLE_MARKERS: &[(&str, Confidence)] = &[
    ("#007000", Confidence::High),
    ("#cc4444", Confidence::Low),
    ("#cc44", Confidence::Low),
    ("#000000", Confidence::Medium),
];

/// Background-color markers from older GapMind renderings.
const BGCOLOR_MARKERS: &[(&str, Confidence)] = &[
    ("green", Confidence::High),
    ("#90", Confidence::High),
    ("yellow", Confidence::Medium),
    ("#ff", Confidence::Medium),
    ("red", Confidence::Low),
    ("#dd", Confidence::Low),
];

/// Decode the confidence tier for one pathway row from its first cell.
pub fn detect_confidence(cell: ElementRef<'_>) -> Confidence {
    for strategy in [confidence_from_anchor_styles, confidence_from_bgcolor] {
        let tier = strategy(cell);
        if tier != Confidence::Unknown {
            return tier;
        }
    }
    Confidence::Unknown
}

fn confidence_from_anchor_styles(cell: ElementRef<'_>) -> Confidence {
    let a_sel = selector("a[style]");
    for a in cell.select(&a_sel) {
        let style = a.value().attr("style").unwrap_or("").to_lowercase();
        for (marker, tier) in ANCHOR_STYLE_MARKERS {
            if style.contains(marker) {
                return *tier;
            }
        }
        // Green rendered as bold without the exact hex is still high.
        if style.contains("bold") && style.contains("#0") {
            return Confidence::High;
        }
    }
    Confidence::Unknown
}

fn confidence_from_bgcolor(cell: ElementRef<'_>) -> Confidence {
    let mut haystack = cell.value().attr("style").unwrap_or("").to_lowercase();
    if let Some(row) = enclosing(cell, "tr") {
        haystack.push_str(&row.value().attr("style").unwrap_or("").to_lowercase());
        haystack.push_str(&row.value().attr("bgcolor").unwrap_or("").to_lowercase());
    }
    for (marker, tier) in BGCOLOR_MARKERS {
        if haystack.contains(marker) {
            return *tier;
        }
    }
    Confidence::Unknown
}

/// Parse a gapView.cgi organism-results page into pathway assessments.
pub fn parse_gapmind(html: &str, base_url: &str) -> GapMindResults {
    let doc = parse_document(html);
    let mut results = GapMindResults::default();

    if let Some(title) = doc.select(&selector("title")).next() {
        results.organism = clean_text(title);
    }

    let cell_sel = selector("td, th");
    for table in doc.select(&selector("table")) {
        for row in table.select(&selector("tr")) {
            let cells: Vec<ElementRef<'_>> = row.select(&cell_sel).collect();
            if cells.len() < 2 {
                continue;
            }
            let name = clean_text(cells[0]);
            // Literal header rows, not data.
            if name.is_empty() || name.starts_with("Pathway") {
                continue;
            }

            let links = extract_links(row, base_url);
            let url = links
                .iter()
                .find(|l| l.href.contains("gapView"))
                .map(|l| l.href.clone())
                .unwrap_or_default();

            results.pathways.push(Pathway {
                name,
                status: clean_text(cells[1]),
                confidence: detect_confidence(cells[0]),
                url,
                links,
            });
        }
    }

    results.total_pathways = results.pathways.len();
    results
}

/// Parse the GapMind organism index into (org_id, display name) records.
///
/// Organisms are listed as links carrying an `orgId` query parameter; each
/// organism is kept once even if linked several times.
pub fn parse_organism_index(html: &str) -> Vec<Organism> {
    let doc = parse_document(html);
    let org_id_re = re(r"orgId=([^&]+)");
    let href_re = re(r"orgId=");

    let mut organisms: Vec<Organism> = Vec::new();
    for a in crate::extract::dom::find_by_attr_regex(&doc, "a", "href", &href_re) {
        let href = a.value().attr("href").unwrap_or("");
        let Some(caps) = org_id_re.captures(href) else {
            continue;
        };
        let org_id = caps[1].to_string();
        let name = clean_text(a);
        if name.is_empty() || org_id.is_empty() {
            continue;
        }
        if organisms.iter().any(|o| o.org_id == org_id) {
            continue;
        }
        organisms.push(Organism {
            org_id,
            name,
            taxonomy: String::new(),
        });
    }
    organisms
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://papers.genomics.lbl.gov";

    const PATHWAY_PAGE: &str = r#"<html>
      <head><title>GapMind for Pseudomonas fluorescens FW300-N1B4</title></head>
      <body><table>
        <tr><td>Pathway</td><td>Steps</td></tr>
        <tr><td><a style="color: #007000; font-weight: bold;" href="/cgi-bin/gapView.cgi?path=his">his</a></td><td>all steps found</td></tr>
        <tr><td><a style="color: #CC4444;" href="/cgi-bin/gapView.cgi?path=met">met</a></td><td>metE missing</td></tr>
        <tr><td><a style="color: #000000;" href="/cgi-bin/gapView.cgi?path=arg">arg</a></td><td>argB weak</td></tr>
        <tr><td><a href="/cgi-bin/gapView.cgi?path=trp">trp</a></td><td>unstyled</td></tr>
      </table></body></html>"#;

    #[test]
    fn test_confidence_tiers_from_anchor_styles() {
        let results = parse_gapmind(PATHWAY_PAGE, BASE);
        assert_eq!(results.total_pathways, 4);
        assert_eq!(results.pathways[0].confidence, Confidence::High);
        assert_eq!(results.pathways[1].confidence, Confidence::Low);
        assert_eq!(results.pathways[2].confidence, Confidence::Medium);
        assert_eq!(results.pathways[3].confidence, Confidence::Unknown);
    }

    #[test]
    fn test_header_row_skipped_and_fields_extracted() {
        let results = parse_gapmind(PATHWAY_PAGE, BASE);
        assert!(results.organism.contains("Pseudomonas fluorescens"));
        assert!(results.pathways.iter().all(|p| p.name != "Pathway"));
        assert_eq!(results.pathways[0].name, "his");
        assert_eq!(results.pathways[0].status, "all steps found");
        assert!(results.pathways[0].url.contains("gapView.cgi?path=his"));
    }

    #[test]
    fn test_pathway_envelope_has_no_unpopulated_fields() {
        let results = parse_gapmind(PATHWAY_PAGE, BASE);
        let value = serde_json::to_value(&results.pathways[0]).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["confidence", "links", "name", "status", "url"]);
    }

    #[test]
    fn test_bgcolor_fallback_for_older_renderings() {
        let html = r##"<table>
          <tr bgcolor="#90EE90"><td><a href="/cgi-bin/gapView.cgi?path=leu">leu</a></td><td>ok</td></tr>
          <tr bgcolor="yellow"><td>ile</td><td>weak</td></tr>
          <tr bgcolor="#DD8888"><td>val</td><td>gap</td></tr>
        </table>"##;
        let results = parse_gapmind(html, BASE);
        assert_eq!(results.pathways[0].confidence, Confidence::High);
        assert_eq!(results.pathways[1].confidence, Confidence::Medium);
        assert_eq!(results.pathways[2].confidence, Confidence::Low);
    }

    #[test]
    fn test_anchor_style_wins_over_bgcolor() {
        let html = r##"<table>
          <tr bgcolor="yellow"><td><a style="color:#007000;font-weight:bold" href="#">his</a></td><td>ok</td></tr>
        </table>"##;
        let results = parse_gapmind(html, BASE);
        assert_eq!(results.pathways[0].confidence, Confidence::High);
    }

    #[test]
    fn test_organism_index_parse_and_dedupe() {
        let html = r#"
          <a href="gapView.cgi?set=aa&orgs=orgsDef&orgId=FitnessBrowser__pseudo1_N1B4">Pseudomonas fluorescens FW300-N1B4</a>
          <a href="gapView.cgi?set=aa&orgs=orgsDef&orgId=FitnessBrowser__Keio">Escherichia coli BW25113</a>
          <a href="gapView.cgi?set=aa&orgs=orgsDef&orgId=FitnessBrowser__Keio">Escherichia coli BW25113</a>
        "#;
        let organisms = parse_organism_index(html);
        assert_eq!(organisms.len(), 2);
        assert_eq!(organisms[0].org_id, "FitnessBrowser__pseudo1_N1B4");
        assert_eq!(organisms[1].name, "Escherichia coli BW25113");
    }
}
