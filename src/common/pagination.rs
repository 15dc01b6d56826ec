use serde::Serialize;
use std::num::IntErrorKind;

pub const PAGE_SIZE: u64 = 10;

/// Page number as sent by the client. Anything that is not an integer
/// means the first page. Integers too large to represent saturate, so they
/// still clamp to the nearest end of the listing.
pub fn parse_page(raw: Option<&str>) -> i64 {
    let Some(value) = raw else {
        return 1;
    };
    match value.trim().parse::<i64>() {
        Ok(page) => page,
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => 1,
        },
    }
}

/// Nearest valid 1-based page. An empty listing still has one page.
pub fn clamp_page(requested: i64, num_pages: u64) -> u64 {
    let last = num_pages.max(1);
    if requested < 1 {
        1
    } else {
        (requested as u64).min(last)
    }
}

#[derive(Serialize, Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub num_pages: u64,
    pub count: u64,
    pub page_size: u64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, number: u64, num_pages: u64, count: u64, page_size: u64) -> Self {
        let num_pages = num_pages.max(1);
        Self {
            items,
            number,
            num_pages,
            count,
            page_size,
            has_previous: number > 1,
            has_next: number < num_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            count: self.count,
            page_size: self.page_size,
            has_previous: self.has_previous,
            has_next: self.has_next,
        }
    }
}
