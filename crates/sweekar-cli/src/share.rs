//! `share` command: look up one place and print its share message and link.

use sweekar_core::listing::{share_message, share_url};
use sweekar_core::{AppConfig, PlaceDetail};
use sweekar_places::{PlacesBackend, PlacesClient};

/// # Errors
///
/// Returns an error if the places client cannot be built or the details
/// lookup fails.
pub(crate) async fn run_share(config: &AppConfig, place_id: &str) -> anyhow::Result<()> {
    let client = PlacesClient::with_base_url(
        &config.places_api_key,
        config.request_timeout_secs,
        &config.user_agent,
        &config.places_base_url,
    )?;
    let resource = client.place_details(place_id).await?;
    print!("{}", render_share(&resource));
    Ok(())
}

pub(crate) fn render_share(resource: &PlaceDetail) -> String {
    format!("{}\n\n{}\n", share_message(resource), share_url(resource))
}
