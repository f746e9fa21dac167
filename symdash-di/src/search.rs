//! Free-text search over images and candidates
//!
//! [REQ-DI-F-060]: Three matching rules compose:
//! - `0x...` queries parse as crash addresses and select the image whose
//!   mapped range covers them (the null base address never matches),
//! - identifier prefixes match `code_id`/`debug_id` after normalization
//!   (trim, lowercase, dashes and spaces stripped), optionally written as
//!   `{debug_id_prefix}!{rest}`,
//! - everything else is a case-insensitive path substring match.

use symdash_common::candidates::Candidate;
use symdash_common::images::{parse_hex_addr, Image};

/// Normalize an identifier or identifier query for prefix matching
pub fn normalize_id(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .filter(|c| *c != '-' && *c != ' ')
        .collect()
}

/// True if `location` looks purely numeric (an offset, not a path) and is
/// therefore excluded from substring matching.
fn is_purely_numeric(location: &str) -> bool {
    !location.is_empty() && location.chars().all(|c| c.is_ascii_digit())
}

fn contains_ci(haystack: Option<&str>, needle_lower: &str) -> bool {
    haystack
        .map(|h| h.to_lowercase().contains(needle_lower))
        .unwrap_or(false)
}

fn id_prefix_matches(id: Option<&str>, normalized_query: &str) -> bool {
    if normalized_query.is_empty() {
        return false;
    }
    id.map(|i| normalize_id(i).starts_with(normalized_query))
        .unwrap_or(false)
}

/// The identifier-prefix part of a query: the text left of the first `!`,
/// or the whole query when no `!` is present.
fn identifier_part(query: &str) -> &str {
    query.split_once('!').map(|(left, _)| left).unwrap_or(query)
}

/// Does this image match the search query?
///
/// `range` is the image's computed `[start, end)` address range (see
/// [`Image::address_range`]); it is only consulted for `0x` queries.
pub fn image_matches_query(image: &Image, range: Option<(u64, u64)>, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }

    // Address search: a parseable 0x query decides the match outcome by
    // itself; an unparseable one falls through to the other rules.
    if query.starts_with("0x") || query.starts_with("0X") {
        if let Some(addr) = parse_hex_addr(query) {
            return match range {
                // The null base address is excluded: unmapped images would
                // otherwise swallow every low address.
                Some((start, end)) if start != 0 => addr >= start && addr < end,
                _ => false,
            };
        }
    }

    let normalized = normalize_id(identifier_part(query));
    if id_prefix_matches(image.code_id.as_deref(), &normalized)
        || id_prefix_matches(image.debug_id.as_deref(), &normalized)
    {
        return true;
    }

    let query_lower = query.to_lowercase();
    contains_ci(image.code_file.as_deref(), &query_lower)
        || contains_ci(image.debug_file.as_deref(), &query_lower)
}

/// Does this candidate match the search query?
pub fn candidate_matches_query(candidate: &Candidate, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }

    let query_lower = query.to_lowercase();
    if contains_ci(candidate.source_name.as_deref(), &query_lower) {
        return true;
    }
    match candidate.location.as_deref() {
        Some(location) if !is_purely_numeric(location) => {
            location.to_lowercase().contains(&query_lower)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symdash_common::candidates::Download;

    fn image(debug_id: &str, code_file: &str, addr: &str, size: Option<u64>) -> Image {
        Image {
            debug_id: Some(debug_id.to_string()),
            code_id: None,
            code_file: Some(code_file.to_string()),
            debug_file: None,
            arch: None,
            image_addr: Some(addr.to_string()),
            image_size: size,
            debug_status: None,
            unwind_status: None,
            candidates: Vec::new(),
        }
    }

    fn range_of(img: &Image) -> Option<(u64, u64)> {
        img.address_range(None)
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let img = image("abcd1234", "/usr/lib/libfoo.so", "0x1000", Some(0x1000));
        assert!(image_matches_query(&img, range_of(&img), ""));
        assert!(image_matches_query(&img, range_of(&img), "   "));
    }

    #[test]
    fn test_address_query_inside_range_matches() {
        let img = image("abcd1234", "/usr/lib/libfoo.so", "0x1000", Some(0x1000));
        assert!(image_matches_query(&img, range_of(&img), "0x1500"));
    }

    #[test]
    fn test_address_query_outside_range_does_not_match() {
        let img = image("abcd1234", "/usr/lib/libfoo.so", "0x1000", Some(0x1000));
        assert!(!image_matches_query(&img, range_of(&img), "0x3000"));
        // end is exclusive
        assert!(!image_matches_query(&img, range_of(&img), "0x2000"));
    }

    #[test]
    fn test_null_base_address_never_matches_address_query() {
        let img = image("abcd1234", "/usr/lib/libfoo.so", "0x0", Some(0x10000));
        assert!(!image_matches_query(&img, range_of(&img), "0x1500"));
    }

    #[test]
    fn test_unparseable_address_falls_through_to_path_match() {
        let img = image("abcd1234", "/usr/lib/0xylophone.so", "0x1000", Some(0x1000));
        assert!(image_matches_query(&img, range_of(&img), "0xylo"));
    }

    #[test]
    fn test_identifier_prefix_match_is_normalized() {
        let img = image("abcd1234deadbeef", "/usr/lib/libfoo.so", "0x1000", None);
        assert!(image_matches_query(&img, range_of(&img), "ABCD-1234"));
        assert!(image_matches_query(&img, range_of(&img), "  abcd 1234  "));
        assert!(!image_matches_query(&img, range_of(&img), "1234abcd"));
    }

    #[test]
    fn test_bang_query_uses_left_side_as_identifier() {
        let img = image("abcd1234deadbeef", "/usr/lib/libfoo.so", "0x1000", None);
        assert!(image_matches_query(&img, range_of(&img), "ABCD-1234!0x2ac"));
        assert!(!image_matches_query(&img, range_of(&img), "ffff!abcd"));
    }

    #[test]
    fn test_path_substring_match_is_case_insensitive() {
        let img = image("abcd1234", "/usr/lib/LibFoo.so", "0x1000", None);
        assert!(image_matches_query(&img, range_of(&img), "libfoo"));
        assert!(!image_matches_query(&img, range_of(&img), "libbar"));
    }

    #[test]
    fn test_candidate_matches_source_name_and_location() {
        let candidate = Candidate {
            source: "microsoft".to_string(),
            source_name: Some("Microsoft".to_string()),
            location: Some("https://msdl.microsoft.com/foo.pdb".to_string()),
            download: Download::NotFound { details: None },
        };
        assert!(candidate_matches_query(&candidate, "micro"));
        assert!(candidate_matches_query(&candidate, "FOO.PDB"));
        assert!(!candidate_matches_query(&candidate, "linux"));
        assert!(candidate_matches_query(&candidate, ""));
    }

    #[test]
    fn test_purely_numeric_location_is_not_searched() {
        let candidate = Candidate {
            source: "gcs".to_string(),
            source_name: None,
            location: Some("123456".to_string()),
            download: Download::NotFound { details: None },
        };
        assert!(!candidate_matches_query(&candidate, "3456"));
    }
}
