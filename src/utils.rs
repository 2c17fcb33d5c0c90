//! Browser glue: location, navigation, document metadata and asset URLs.

use chrono::{DateTime, TimeZone};
use log::{debug, warn};
use std::fmt::Display;

/// `"{title} – Countdown to 30 Aug 2025"`, used for `<title>` and the description meta.
pub fn format_meta_title<Tz: TimeZone>(title: &str, target: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    format!("{title} – Countdown to {}", target.format("%d %b %Y"))
}

/// Full URL of the current page, if running in a browser.
pub fn current_href() -> Option<String> {
    web_sys::window()?.location().href().ok()
}

/// Navigate the current tab to `href`.
pub fn navigate_to(href: &str) {
    debug!("Navigating to {href}");
    if let Err(err) = gloo_utils::window().location().set_href(href) {
        warn!("Navigation to {href} failed: {err:?}");
    }
}

/// Write `text` into the document title and the `description` meta tag,
/// creating the meta tag when the page shell lacks one.
pub fn apply_document_metadata(text: &str) {
    let document = gloo_utils::document();
    document.set_title(text);

    match document.query_selector("meta[name=\"description\"]") {
        Ok(Some(meta)) => {
            if let Err(err) = meta.set_attribute("content", text) {
                warn!("Could not update description meta: {err:?}");
            }
        }
        Ok(None) => {
            let created = document.create_element("meta").and_then(|meta| {
                meta.set_attribute("name", "description")?;
                meta.set_attribute("content", text)?;
                gloo_utils::head().append_child(&meta)?;
                Ok(())
            });
            if let Err(err) = created {
                warn!("Could not create description meta: {err:?}");
            }
        }
        Err(err) => warn!("Description meta lookup failed: {err:?}"),
    }
}

/// Milliseconds since the Unix epoch according to the browser clock.
pub fn wall_clock_ms() -> i64 {
    js_sys::Date::now() as i64
}

/// High-resolution timestamp on the same scale as animation-frame callbacks.
pub fn performance_now() -> f64 {
    gloo_utils::window()
        .performance()
        .map(|performance| performance.now())
        .unwrap_or(0.0)
}

/// URL for a static asset, honouring a `PUBLIC_URL` sub-path set at build time
/// (e.g. `/countdown` when hosted on GitHub Pages).
pub fn asset_path(relative: &str) -> String {
    asset_path_with_base(relative, option_env!("PUBLIC_URL").unwrap_or(""))
}

fn asset_path_with_base(relative: &str, base: &str) -> String {
    let base = base.trim_end_matches('/');
    let rel = relative.trim_start_matches('/');

    if base.is_empty() {
        format!("/{rel}")
    } else {
        format!("{base}/{rel}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::TargetDate;
    use chrono::Utc;

    #[test]
    fn meta_title_names_the_target_day() {
        let target = TargetDate::parse("2025-08-30T18:45:00").unwrap().resolve_in(&Utc);
        assert_eq!(
            format_meta_title("Bharath + Vaish 💍", &target),
            "Bharath + Vaish 💍 – Countdown to 30 Aug 2025"
        );
    }

    #[test]
    fn meta_title_pads_single_digit_days() {
        let target = TargetDate::parse("2026-01-05T00:00:00Z").unwrap().resolve_in(&Utc);
        assert_eq!(format_meta_title("Trip", &target), "Trip – Countdown to 05 Jan 2026");
    }

    #[test]
    fn background_image_ships_with_the_page() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join(crate::config::BACKGROUND_IMAGE);
        assert!(path.is_file(), "{} is missing", path.display());
    }

    #[test]
    fn asset_paths_respect_base() {
        assert_eq!(asset_path_with_base("assets/bg.jpg", ""), "/assets/bg.jpg");
        assert_eq!(asset_path_with_base("/assets/bg.jpg", "/countdown/"), "/countdown/assets/bg.jpg");
        assert_eq!(asset_path_with_base("assets/bg.jpg", "/countdown"), "/countdown/assets/bg.jpg");
    }
}
