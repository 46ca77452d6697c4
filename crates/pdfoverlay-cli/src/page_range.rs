/// Parse a page range string like "1,3-5" into a sorted list of page numbers.
///
/// Page numbers are 1-based on both sides. Returns an error for page 0,
/// malformed or reversed ranges, and pages beyond `page_count`.
pub fn parse_page_range(input: &str, page_count: u32) -> Result<Vec<u32>, String> {
    let mut pages = Vec::new();

    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let (start, end) = match part.split_once('-') {
            Some((start_str, end_str)) => (parse_page(start_str)?, parse_page(end_str)?),
            None => {
                let page = parse_page(part)?;
                (page, page)
            }
        };

        if start == 0 || end == 0 {
            return Err("page 0 is invalid (pages start at 1)".to_string());
        }
        if start > end {
            return Err(format!("invalid page range: '{part}'"));
        }
        if end > page_count {
            return Err(format!(
                "page {end} exceeds document page count ({page_count})"
            ));
        }

        pages.extend(start..=end);
    }

    pages.sort_unstable();
    pages.dedup();
    Ok(pages)
}

fn parse_page(text: &str) -> Result<u32, String> {
    text.trim()
        .parse()
        .map_err(|_| format!("invalid page number: '{}'", text.trim()))
}
