/// A set of 1-based page numbers, held as sorted, non-overlapping inclusive
/// spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSet {
    spans: Vec<(u32, u32)>,
}

impl PageSet {
    pub fn contains(&self, page: u32) -> bool {
        self.spans
            .binary_search_by(|&(start, end)| {
                if end < page {
                    std::cmp::Ordering::Less
                } else if start > page {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    pub fn spans(&self) -> &[(u32, u32)] {
        &self.spans
    }
}

/// Parse a page range string like "1,3-5" into a [`PageSet`].
///
/// Overlapping and adjacent spans are merged. Returns an error for page 0,
/// reversed ranges, or anything that is not a number.
pub fn parse_page_range(input: &str) -> Result<PageSet, String> {
    let mut spans = Vec::new();

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

        if start > end {
            return Err(format!("reversed page range: '{part}'"));
        }
        spans.push((start, end));
    }

    if spans.is_empty() {
        return Err("empty page range".to_string());
    }

    spans.sort_unstable();
    let mut merged: Vec<(u32, u32)> = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start <= last.1.saturating_add(1) => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    Ok(PageSet { spans: merged })
}

fn parse_page(text: &str) -> Result<u32, String> {
    let page: u32 = text
        .trim()
        .parse()
        .map_err(|_| format!("invalid page number: '{}'", text.trim()))?;
    if page == 0 {
        return Err("page 0 is invalid (pages start at 1)".to_string());
    }
    Ok(page)
}
