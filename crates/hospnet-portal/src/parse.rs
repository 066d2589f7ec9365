//! Markup extraction for the portal's search page and provider grid.
//!
//! Deliberately regex-based and lenient: the portal is an unreliable external
//! source and robust HTML parsing is out of scope. Rows that do not match the
//! expected shape are skipped, not errors.

use hospnet_core::RawHospitalRecord;
use regex::Regex;

/// DOM id of the insurer dropdown on the search page.
pub const INSURER_SELECT_ID: &str = "ContentPlaceHolder1_ddinsurance";

/// DOM id of the provider result grid.
pub const PROVIDER_GRID_ID: &str = "ContentPlaceHolder1_grdProviderDetails";

/// Placeholder option the portal prepends to the insurer dropdown.
const INSURER_PLACEHOLDER: &str = "--Select Insurername--";

/// Extracts insurer names from the search page's insurer dropdown.
///
/// Returns `None` when the dropdown is not present in the page at all;
/// the placeholder option and empty options are dropped.
#[must_use]
pub fn extract_insurer_options(html: &str) -> Option<Vec<String>> {
    let select_re = Regex::new(&format!(
        r#"(?is)<select[^>]*id\s*=\s*["']{INSURER_SELECT_ID}["'][^>]*>(.*?)</select>"#
    ))
    .expect("valid select regex");
    let body = select_re.captures(html)?.get(1)?.as_str();

    let option_re = Regex::new(r"(?is)<option[^>]*>(.*?)</option>").expect("valid option regex");
    let insurers = option_re
        .captures_iter(body)
        .filter_map(|c| c.get(1))
        .map(|m| clean_cell(m.as_str()))
        .filter(|name| !name.is_empty() && name != INSURER_PLACEHOLDER)
        .collect();
    Some(insurers)
}

/// Extracts provider rows from the result grid, tagging each with `insurer`.
///
/// The header row and any row with fewer than four cells are skipped. A page
/// without the grid yields an empty vec — a search with no results is valid.
#[must_use]
pub fn extract_provider_rows(html: &str, insurer: &str) -> Vec<RawHospitalRecord> {
    let table_re = Regex::new(&format!(
        r#"(?is)<table[^>]*id\s*=\s*["']{PROVIDER_GRID_ID}["'][^>]*>(.*?)</table>"#
    ))
    .expect("valid table regex");
    let Some(table) = table_re.captures(html).and_then(|c| c.get(1)) else {
        return Vec::new();
    };

    let row_re = Regex::new(r"(?is)<tr[^>]*>(.*?)</tr>").expect("valid row regex");
    let cell_re = Regex::new(r"(?is)<td[^>]*>(.*?)</td>").expect("valid cell regex");

    row_re
        .captures_iter(table.as_str())
        .filter_map(|row| {
            let cells: Vec<String> = cell_re
                .captures_iter(row.get(1)?.as_str())
                .filter_map(|c| c.get(1))
                .map(|m| clean_cell(m.as_str()))
                .collect();
            if cells.len() < 4 {
                // Header rows use <th> and produce zero <td> cells.
                return None;
            }
            Some(RawHospitalRecord {
                insurer: insurer.to_owned(),
                serial_no: cells[0].clone(),
                name: cells[1].clone(),
                address: cells[2].clone(),
                contact: cells[3].clone(),
            })
        })
        .collect()
}

/// Strips nested tags, decodes the few entities the portal emits, and
/// collapses runs of whitespace.
fn clean_cell(fragment: &str) -> String {
    let tags = Regex::new(r"(?is)<[^>]+>").expect("valid tags regex");
    let text = tags.replace_all(fragment, " ");
    let text = text
        .replace("&amp;", "&")
        .replace("&nbsp;", " ")
        .replace("&#39;", "'");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
