//! Extraction of Curated BLAST genome-search pages (genomeSearch.cgi).
//!
//! The results page carries one `<table>` per genome protein: row 0 is the
//! genome protein itself and the following rows, marked with a `bgcolor`
//! attribute, are its characterized matches from curated databases. Without
//! a genome id the endpoint answers with its query form instead of results,
//! which must be detected and reported rather than returned as an empty
//! success.

use scraper::ElementRef;

use crate::extract::dom::{clean_text, normalize_href, parse_document, selector};
use crate::extract::re;
use crate::models::{CuratedBlastResults, CuratedMatch, ProteinLink};

const MAX_DESCRIPTION_CHARS: usize = 300;
const MAX_DETAILS_CHARS: usize = 400;
const MAX_IDENTITY_CHARS: usize = 60;

/// Char-boundary-safe prefix truncation.
fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

/// Parse a genomeSearch.cgi page, capping the emitted genome proteins.
pub fn parse_genome_search(
    html: &str,
    base_url: &str,
    max_genome_hits: usize,
) -> CuratedBlastResults {
    let doc = parse_document(html);
    let mut results = CuratedBlastResults::default();

    if let Some(title) = doc.select(&selector("title")).next() {
        results.query_info = clean_text(title);
    }

    // Unfilled query form: a genome-db selector but no colored result rows.
    let has_form = doc.select(&selector("select[name=gdb]")).next().is_some();
    let has_rows = doc.select(&selector("tr[bgcolor]")).next().is_some();
    if has_form && !has_rows {
        results.warnings.push(
            "Curated BLAST returned the genome-selection form, not results. \
             Specify genome_id (e.g. 'GCF_000005845.2' for E. coli K-12) and \
             genome_db (default 'NCBI'). Use gapmind_list_organisms or NCBI \
             Assembly to find a genome ID."
                .to_string(),
        );
        return results;
    }

    let page_text = clean_text(doc.root_element());
    let total_genome_proteins = re(r"Found (\d+) relevant proteins?")
        .captures(&page_text)
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(0);

    let tr_sel = selector("tr");
    let td_sel = selector("td");
    let a_sel = selector("a[href]");

    for table in doc.select(&selector("table")) {
        if results.matches.len() >= max_genome_hits {
            break;
        }

        let rows: Vec<ElementRef<'_>> = table.select(&tr_sel).collect();
        let Some(header_row) = rows.first() else {
            continue;
        };
        // A colored first row means this table is not a genome-protein block.
        if header_row.value().attr("bgcolor").is_some() {
            continue;
        }
        let cells: Vec<ElementRef<'_>> = header_row.select(&td_sel).collect();
        if cells.len() < 2 {
            continue;
        }
        let genome_desc = clean_text(cells[0]);
        if genome_desc.len() < 5 {
            continue;
        }

        let mut links: Vec<ProteinLink> = header_row
            .select(&a_sel)
            .filter_map(|a| {
                let href = a.value().attr("href")?;
                let text = clean_text(a);
                if text.is_empty() || href.is_empty() || href.contains("litSearch") {
                    return None;
                }
                Some(ProteinLink::new(text, normalize_href(href, base_url)))
            })
            .take(3)
            .collect();

        // Best (first) curated match among the first few colored rows.
        let mut best_desc = String::new();
        let mut best_identity = String::new();
        for row in rows.iter().skip(1).take(3) {
            if row.value().attr("bgcolor").is_none() {
                continue;
            }
            let curated_cells: Vec<ElementRef<'_>> = row.select(&td_sel).collect();
            if let Some(first) = curated_cells.first() {
                best_desc = truncate(&clean_text(*first), MAX_DESCRIPTION_CHARS);
                if let Some(second) = curated_cells.get(1) {
                    best_identity = truncate(&clean_text(*second), MAX_IDENTITY_CHARS);
                }
                if let Some(link) = row.select(&a_sel).find_map(|a| {
                    let href = a.value().attr("href")?;
                    let text = clean_text(a);
                    if text.is_empty() || href.is_empty() || href.contains("showAlign") {
                        return None;
                    }
                    Some(ProteinLink::new(text, normalize_href(href, base_url)))
                }) {
                    links.push(link);
                }
            }
            break;
        }

        let curated_hits = rows
            .iter()
            .skip(1)
            .filter(|r| r.value().attr("bgcolor").is_some())
            .count();

        results.matches.push(CuratedMatch {
            description: truncate(&genome_desc, MAX_DESCRIPTION_CHARS),
            details: if best_desc.is_empty() {
                String::new()
            } else {
                truncate(
                    &format!("Best curated match ({}): {}", best_identity, best_desc),
                    MAX_DETAILS_CHARS,
                )
            },
            identity: best_identity,
            curated_hits,
            links,
        });
    }

    if total_genome_proteins > 0 && results.matches.len() < total_genome_proteins {
        results.warnings.push(format!(
            "Showing top {} of {} genome proteins. View all results at the search_url.",
            results.matches.len(),
            total_genome_proteins
        ));
    }

    results.total_matches = if total_genome_proteins > 0 {
        total_genome_proteins
    } else {
        results.matches.len()
    };
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://papers.genomics.lbl.gov";

    const RESULTS_PAGE: &str = r##"<html>
      <head><title>Curated BLAST: alcohol dehydrogenase in E. coli</title></head>
      <body>
        <p>Found 3 relevant proteins in Escherichia coli, or try another query</p>
        <table>
          <tr><td><a href="/gene1">adhE</a> b1241 aldehyde-alcohol dehydrogenase</td><td>info</td></tr>
          <tr bgcolor="#F2F2F2"><td><a href="/curated1">ADHE_ECOLI</a> Aldehyde-alcohol dehydrogenase</td><td>98% id, 100% cov</td></tr>
          <tr bgcolor="#FCF3CF"><td><a href="/curated2">Q3Z550</a> other match</td><td>61% id</td></tr>
        </table>
        <table>
          <tr><td><a href="/gene2">adhP</a> b1478 ethanol-active dehydrogenase</td><td>info</td></tr>
          <tr bgcolor="#F2F2F2"><td><a href="/curated3">ADH1_YEAST</a> Alcohol dehydrogenase 1</td><td>44% id</td></tr>
        </table>
        <table>
          <tr><td><a href="/gene3">yqhD</a> b3011 NADP-dependent reductase</td><td>info</td></tr>
          <tr bgcolor="#F2F2F2"><td><a href="/curated4">YQHD_ECOLI</a> reductase</td><td>100% id</td></tr>
        </table>
      </body></html>"##;

    #[test]
    fn test_genome_proteins_with_best_match() {
        let results = parse_genome_search(RESULTS_PAGE, BASE, 20);
        assert_eq!(results.total_matches, 3);
        assert_eq!(results.matches.len(), 3);

        let first = &results.matches[0];
        assert!(first.description.contains("adhE"));
        assert!(first.details.contains("ADHE_ECOLI"));
        assert_eq!(first.identity, "98% id, 100% cov");
        assert_eq!(first.curated_hits, 2);
        assert!(first
            .links
            .iter()
            .any(|l| l.href == "https://papers.genomics.lbl.gov/curated1"));
    }

    #[test]
    fn test_truncation_warning_when_capped() {
        let results = parse_genome_search(RESULTS_PAGE, BASE, 2);
        assert_eq!(results.matches.len(), 2);
        assert_eq!(results.total_matches, 3);
        assert!(results.warnings.iter().any(|w| w.contains("top 2 of 3")));
    }

    #[test]
    fn test_form_page_short_circuits_with_warning() {
        let form = r#"<html><head><title>Curated BLAST</title></head><body>
            <form><select name="gdb"><option>NCBI</option></select></form>
            </body></html>"#;
        let results = parse_genome_search(form, BASE, 20);
        assert_eq!(results.total_matches, 0);
        assert!(results.matches.is_empty());
        assert!(results.warnings.iter().any(|w| w.contains("genome_id")));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("αβγδ", 2), "αβ");
        assert_eq!(truncate("ab", 10), "ab");
    }
}
