//! `discover` command: one discovery cycle, then name search and paging
//! over the published list.

use std::sync::Arc;

use sweekar_core::listing::{directions_url, paginate, search_by_name, Page, ITEMS_PER_PAGE};
use sweekar_core::{AppConfig, Coordinate, PlaceDetail};
use sweekar_discovery::{
    discover_once, DiscoveryPipeline, DiscoverySettings, FixedGeolocator, Geolocator,
    LocationSettings, UnavailableGeolocator,
};
use sweekar_places::PlacesClient;

use crate::categories::load_table;

pub(crate) struct DiscoverRequest<'a> {
    pub category: Option<&'a str>,
    /// `None` behaves like a device without location access.
    pub origin: Option<Coordinate>,
    pub search: &'a str,
    pub page: usize,
    pub json: bool,
}

/// Runs one cycle for the requested category and prints a page of results.
///
/// # Errors
///
/// Returns an error if the category overrides cannot be loaded or the places
/// client cannot be built. Failed searches and lookups only shrink the list.
pub(crate) async fn run_discover(config: &AppConfig, request: &DiscoverRequest<'_>) -> anyhow::Result<()> {
    let table = load_table(config.categories_path.as_deref())?;
    if let Some(key) = request.category {
        if !table.contains(key) {
            tracing::warn!(category = key, "unknown category; using general search");
        }
    }
    let profile = table.lookup(request.category);

    let client = PlacesClient::with_base_url(
        &config.places_api_key,
        config.request_timeout_secs,
        &config.user_agent,
        &config.places_base_url,
    )?;
    let pipeline = DiscoveryPipeline::new(Arc::new(client), DiscoverySettings::from_config(config));

    let geolocator: Box<dyn Geolocator> = match request.origin {
        Some(origin) => Box::new(FixedGeolocator(origin)),
        None => Box::new(UnavailableGeolocator),
    };
    let location = LocationSettings::from_config(config);
    let published = discover_once(&pipeline, geolocator.as_ref(), &location, &profile).await;

    let matches = search_by_name(&published.resources, request.search);
    let page = paginate(matches, request.page, ITEMS_PER_PAGE);

    if request.json {
        println!("{}", serde_json::to_string_pretty(&page.items)?);
    } else {
        print!("{}", render_page(&page, published.origin));
    }
    Ok(())
}

pub(crate) fn render_page(page: &Page<'_>, origin: Coordinate) -> String {
    let mut out = format!(
        "{} resources near {origin} (page {} of {})\n",
        page.total_matches,
        page.page,
        page.total_pages.max(1)
    );
    if page.items.is_empty() {
        out.push_str("No resources found.\n");
    }
    for resource in &page.items {
        out.push_str(&render_resource(resource, origin));
    }
    out
}

fn render_resource(resource: &PlaceDetail, origin: Coordinate) -> String {
    let km = origin.distance_to(&resource.location) / 1_000.0;
    format!(
        "\n{name} [{status}] {km:.1} km\n  address:    {address}\n  phone:      {phone}\n  email:      {email}\n  hours:      {hours}\n  directions: {url}\n",
        name = resource.name,
        status = resource.status,
        address = resource.address,
        phone = resource.phone_display(),
        email = resource.email_display(),
        hours = resource.hours_display(),
        url = directions_url(Some(origin), resource.location),
    )
}
