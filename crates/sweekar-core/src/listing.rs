//! Presentation helpers for a published resource list: name search,
//! fixed-size pagination, directions links, and share messages.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::geo::Coordinate;
use crate::resource::PlaceDetail;

pub const ITEMS_PER_PAGE: usize = 9;

const DIRECTIONS_BASE_URL: &str = "https://www.google.com/maps/dir/?api=1";
const MAP_PIN_BASE_URL: &str = "https://www.google.com/maps?q=";
const SHARE_BASE_URL: &str = "https://wa.me/?text=";

/// Characters left as-is in a share link's text component; everything else
/// is percent-encoded.
const SHARE_TEXT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// One page of a filtered resource list. Pages are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub items: Vec<&'a PlaceDetail>,
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

/// Resources whose name contains `term`, ignoring case. A blank term
/// matches everything.
#[must_use]
pub fn search_by_name<'a>(resources: &'a [PlaceDetail], term: &str) -> Vec<&'a PlaceDetail> {
    let needle = term.trim().to_lowercase();
    resources
        .iter()
        .filter(|r| needle.is_empty() || r.name.to_lowercase().contains(&needle))
        .collect()
}

/// Slices `matches` into the requested page.
///
/// `page` is clamped into `1..=total_pages`; an empty list yields page 1 of 0.
#[must_use]
pub fn paginate<'a>(matches: Vec<&'a PlaceDetail>, page: usize, per_page: usize) -> Page<'a> {
    let per_page = per_page.max(1);
    let total_matches = matches.len();
    let total_pages = total_matches.div_ceil(per_page);
    let page = page.clamp(1, total_pages.max(1));

    let items = matches
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();

    Page {
        items,
        page,
        total_pages,
        total_matches,
    }
}

/// Google Maps directions link from `origin` (or the viewer's own location
/// when unknown) to `destination`.
#[must_use]
pub fn directions_url(origin: Option<Coordinate>, destination: Coordinate) -> String {
    match origin {
        Some(o) => format!("{DIRECTIONS_BASE_URL}&origin={o}&destination={destination}"),
        None => format!("{DIRECTIONS_BASE_URL}&destination={destination}"),
    }
}

/// Plain-text summary of a resource for sharing with someone else.
#[must_use]
pub fn share_message(resource: &PlaceDetail) -> String {
    format!(
        "Name: {}\nAddress: {}\nPhone: {}\nLocation: {MAP_PIN_BASE_URL}{}",
        resource.name,
        resource.address,
        resource.phone_display(),
        resource.location,
    )
}

/// Messaging link that opens a new chat pre-filled with
/// [`share_message`].
#[must_use]
pub fn share_url(resource: &PlaceDetail) -> String {
    let text = share_message(resource);
    format!("{SHARE_BASE_URL}{}", utf8_percent_encode(&text, SHARE_TEXT))
}
