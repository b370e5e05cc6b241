//! Extraction of PaperBLAST literature-search pages (litSearch.cgi).
//!
//! The page is produced by a CGI script that writes each hit as one `<p>`
//! block with nested `<UL>` content. html5ever auto-closes the `<p>` when it
//! reaches the block-level `<UL>`, so what is logically a child of the hit
//! arrives as its *sibling*. [`hit_regions`] reconstructs each hit's true
//! extent as an explicit grouping pass; the field heuristics then work over
//! the anchor plus its reclaimed lists.
//!
//! Layout observed on live litSearch.cgi output:
//!
//! ```text
//! <h3>PaperBLAST Hits for {ACC} {NAME} ({ORG}) ({LEN} a.a., {SEQ}...)</h3>
//! <p>Found {N} similar proteins in the literature:</p>
//! <p style="margin-top: 1em; margin-bottom: 0em;">
//!   <a onmousedown="logger(this,'curated::GENE_ID')" title="DB">NAME</a>
//!   <b>description</b> from <i>organism</i>
//!   (see <a onmousedown="logger(this,'curatedpaper::GENE_ID')">N papers</a>)
//!   <a style="font-family: sans-serif; font-size: smaller;">N% identity, M% coverage</a>
//!   <UL><LI><b>function:</b> text <LI><b>subunit:</b> text</UL>
//! </p>
//! ```

use scraper::{ElementRef, Html};

use crate::extract::dom::{
    clean_text, collapse_ws, enclosing, find_by_attr_regex_in, following_elements, normalize_href,
    parse_document, selector,
};
use crate::extract::re;
use crate::models::{GeneEntry, PaperBlastHit, PaperRef, PaperSource, SearchResults};

/// Style marker unique to hit headers.
const HIT_ANCHOR_STYLE: &str = r"margin-top:\s*1em";

/// Inline style of the identity/coverage alignment link.
const SMALL_FONT_STYLE: &str = r"(?i)font-(?:family|size)[^;]*smaller|smaller[^;]*font";

/// Accession shapes accepted by the `more=` drill-down endpoint.
///
/// Best-effort heuristics inferred from observed pages, not a documented
/// contract. Kept here, isolated from the extraction logic, so they can be
/// corrected in one place. Locus tags ("b1175") and `db::id` composites
/// never match either pattern.
const COMPOSITE_ACCESSION: &str = r"^[A-Z0-9]{4,10}$";
const BARE_ACCESSION: &str = r"^[A-Z][A-Z0-9]{4,9}$";

/// Normalize a user-supplied detail identifier.
///
/// Common wrong formats come straight from search output:
/// `"MIND_ECOLI / P0AEZ3"` → `"P0AEZ3"`, `"SwissProt::P0AEZ3"` → `"P0AEZ3"`.
pub fn normalize_detail_id(raw: &str) -> String {
    let mut id = raw.trim();
    if let Some((_, tail)) = id.rsplit_once(" / ") {
        id = tail.trim();
    }
    if let Some((_, tail)) = id.rsplit_once("::") {
        id = tail.trim();
    }
    id.to_string()
}

/// A hit anchor together with the list siblings the parser detached from it.
struct HitRegion<'a> {
    anchor: ElementRef<'a>,
    lists: Vec<ElementRef<'a>>,
}

/// Grouping pass: locate hit anchors and reclaim their trailing `<ul>`
/// siblings, stopping at the next `<p>` (a new hit or unrelated content).
fn hit_regions<'a>(doc: &'a Html) -> Vec<HitRegion<'a>> {
    let style_re = re(HIT_ANCHOR_STYLE);
    let sel = selector("p[style]");
    let mut regions = Vec::new();

    for anchor in doc.select(&sel) {
        let style = anchor.value().attr("style").unwrap_or("");
        if !style_re.is_match(style) {
            continue;
        }
        let mut lists = Vec::new();
        for sib in following_elements(anchor) {
            match sib.value().name() {
                "p" => break,
                "ul" => lists.push(sib),
                _ => {}
            }
        }
        regions.push(HitRegion { anchor, lists });
    }

    regions
}

/// Parse a full litSearch.cgi page into [`SearchResults`].
///
/// Order of hits is the service's own relevance ranking and is preserved.
pub fn parse_search_results(html: &str, base_url: &str) -> SearchResults {
    let doc = parse_document(html);
    let mut results = SearchResults::default();

    if let Some(h3) = doc.select(&selector("h3")).next() {
        results.query_info = clean_text(h3);
    }

    let found_re = re(r"Found\s+(\d+)\s+similar\s+proteins?");
    let notice_re = re(r"(?i)\b(sorry|error|no results|no hits|not found)\b");
    for p in doc.select(&selector("p")) {
        let text = clean_text(p);
        if results.total_found == 0 {
            if let Some(caps) = found_re.captures(&text) {
                results.total_found = caps[1].parse().unwrap_or(0);
            }
        }
        if notice_re.is_match(&text) {
            results.warnings.push(text);
        }
    }

    for region in hit_regions(&doc) {
        if let Some(hit) = parse_hit_region(&region, base_url) {
            results.hits.push(hit);
        }
    }

    if results.total_found > 0 && results.hits.is_empty() {
        results.warnings.push(format!(
            "Found {} proteins but no hit blocks could be extracted; the page \
             layout may have changed.",
            results.total_found
        ));
    }

    results
}

/// Recover the typed fields of one hit from its anchor and reclaimed lists.
///
/// Returns `None` for regions with neither gene entries nor snippets: those
/// are parsing artifacts, not data.
fn parse_hit_region(region: &HitRegion<'_>, base_url: &str) -> Option<PaperBlastHit> {
    let mut hit = PaperBlastHit::default();
    let block = region.anchor;

    // Gene entries: anchors with a curated:: event marker.
    let curated_re = re(r"curated::");
    let marker_re = re(r#"curated::(.+?)['"]"#);
    for a in find_by_attr_regex_in(block, "a", "onmousedown", &curated_re) {
        let onmousedown = a.value().attr("onmousedown").unwrap_or("");
        let gene_id = marker_re
            .captures(onmousedown)
            .map(|c| c[1].trim().to_string())
            .unwrap_or_else(|| clean_text(a));

        let mut entry = GeneEntry {
            name: clean_text(a),
            db: a.value().attr("title").unwrap_or("").to_string(),
            gene_id,
            ..GeneEntry::default()
        };

        // Description: first bold sibling, stopping at entry terminators.
        for sib in following_elements(a) {
            match sib.value().name() {
                "b" => {
                    entry.description = clean_text(sib);
                    break;
                }
                "br" | "a" | "ul" | "p" => break,
                _ => {}
            }
        }

        // Organism: first italic sibling before the next line break, also
        // looking one level down for italics inside an inline wrapper.
        'organism: for sib in following_elements(a) {
            match sib.value().name() {
                "i" => {
                    entry.organism = clean_text(sib);
                    break;
                }
                "br" | "p" => break,
                _ => {
                    for child in sib.children().filter_map(ElementRef::wrap) {
                        if child.value().name() == "i" {
                            entry.organism = clean_text(child);
                            break 'organism;
                        }
                    }
                }
            }
        }

        hit.gene_entries.push(entry);
    }

    // Curated paper counts.
    let paper_marker_re = re(r"curatedpaper::");
    let count_re = re(r"(\d+)\s*papers?");
    for a in find_by_attr_regex_in(block, "a", "onmousedown", &paper_marker_re) {
        let text = clean_text(a);
        if let Some(caps) = count_re.captures(&text) {
            hit.total_curated_papers += caps[1].parse().unwrap_or(0);
        } else if text.to_lowercase().contains("paper") {
            hit.total_curated_papers += 1;
        }
    }

    // Identity / coverage from the smaller-font alignment link. Either
    // percentage may be absent independently.
    let small_font_re = re(SMALL_FONT_STYLE);
    if let Some(link) = find_by_attr_regex_in(block, "a", "style", &small_font_re)
        .into_iter()
        .next()
    {
        let text = clean_text(link);
        if let Some(caps) = re(r"(\d+)%\s*identity").captures(&text) {
            hit.identity = format!("{}%", &caps[1]);
        }
        if let Some(caps) = re(r"(\d+)%\s*coverage").captures(&text) {
            hit.coverage = format!("{}%", &caps[1]);
        }
    }

    recover_annotations(region, &mut hit);
    recover_snippets(region, &mut hit, base_url);
    recover_detail_id(region, &mut hit);

    if !hit.has_content() {
        return None;
    }

    hit.paper_source =
        PaperSource::classify(hit.total_curated_papers, hit.paper_snippets.len());
    Some(hit)
}

/// Function/subunit annotations from the reclaimed list items.
///
/// Only the first occurrence of each label is kept; a `function:` item that
/// the renderer merged with a `subunit:` item is truncated at the marker.
fn recover_annotations(region: &HitRegion<'_>, hit: &mut PaperBlastHit) {
    let li_sel = selector("li");
    let b_sel = selector("b");

    let mut items: Vec<ElementRef<'_>> = Vec::new();
    for ul in &region.lists {
        items.extend(ul.children().filter_map(ElementRef::wrap).filter(|c| {
            c.value().name() == "li"
        }));
    }
    // Fallback for renderers that preserve the original nesting.
    items.extend(region.anchor.select(&li_sel));

    for li in items {
        let li_text = clean_text(li);
        let label = li
            .select(&b_sel)
            .next()
            .map(clean_text)
            .unwrap_or_default()
            .to_lowercase();

        if label.starts_with("function:") && hit.function.is_empty() {
            let text = re(r"(?i)^function:\s*").replace(&li_text, "");
            let text = re(r"(?i)\bsubunit:").split(&text).next().unwrap_or("");
            hit.function = collapse_ws(text);
        } else if label.starts_with("subunit:") && hit.subunit.is_empty() {
            hit.subunit = collapse_ws(&re(r"(?i)^subunit:\s*").replace(&li_text, ""));
        }
    }
}

/// Text-mined paper snippets from `pb::` anchors, deduplicated by title.
fn recover_snippets(region: &HitRegion<'_>, hit: &mut PaperBlastHit, base_url: &str) {
    let pb_re = re(r"pb::");
    let small_sel = selector("small");
    let ul_sel = selector("ul");

    let mut targets: Vec<ElementRef<'_>> = region.lists.clone();
    targets.push(region.anchor);

    for target in targets {
        for a in find_by_attr_regex_in(target, "a", "onmousedown", &pb_re) {
            let title = clean_text(a);
            if title.is_empty() || hit.paper_snippets.iter().any(|s| s.title == title) {
                continue;
            }

            let url = a
                .value()
                .attr("href")
                .map(|h| normalize_href(h, base_url))
                .unwrap_or_default();

            let mut citation = String::new();
            let mut snippet = String::new();
            if let Some(parent_li) = enclosing(a, "li") {
                if let Some(small) = parent_li.select(&small_sel).next() {
                    citation = clean_text(small);
                }
                // The quoted excerpt lives in a nested list under the same
                // item; other nested items are metadata, not excerpts.
                if let Some(inner_ul) = parent_li.select(&ul_sel).next() {
                    for inner_li in inner_ul.children().filter_map(ElementRef::wrap) {
                        if inner_li.value().name() != "li" {
                            continue;
                        }
                        let text = clean_text(inner_li);
                        if !text.is_empty() && (text.contains('\u{201c}') || text.starts_with('"'))
                        {
                            snippet = text;
                            break;
                        }
                    }
                }
            }

            hit.paper_snippets.push(PaperRef {
                title,
                url,
                citation,
                snippet,
            });
        }
    }
}

/// Detail id for the `more=` drill-down endpoint.
///
/// Prefer the explicit "more results" link; otherwise derive a UniProt
/// accession from a SwissProt entry name. `db::id` composites and locus tags
/// are rejected by construction of the accession patterns.
fn recover_detail_id(region: &HitRegion<'_>, hit: &mut PaperBlastHit) {
    let more_href_re = re(r"litSearch\.cgi\?more=");
    let more_param_re = re(r#"more=([^&"'>\s]+)"#);

    let mut targets: Vec<ElementRef<'_>> = region.lists.clone();
    targets.push(region.anchor);
    for target in targets {
        for a in find_by_attr_regex_in(target, "a", "href", &more_href_re) {
            if let Some(caps) = more_param_re.captures(a.value().attr("href").unwrap_or("")) {
                hit.detail_id = caps[1].to_string();
                return;
            }
        }
    }

    let composite_re = re(COMPOSITE_ACCESSION);
    let bare_re = re(BARE_ACCESSION);
    for entry in &hit.gene_entries {
        if !entry.db.contains("SwissProt") {
            continue;
        }
        let name = entry.name.trim();
        if let Some((_, acc)) = name.split_once(" / ") {
            let acc = acc.trim();
            if composite_re.is_match(acc) {
                hit.detail_id = acc.to_string();
                return;
            }
        } else if bare_re.is_match(name) {
            hit.detail_id = name.to_string();
            return;
        }
    }
}
