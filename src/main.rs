//! Countdown page entry point: resolves the page session and mounts the UI.

use chrono::Local;
use countdown_page::components::CountdownPage;
use countdown_page::utils::{apply_document_metadata, current_href, format_meta_title, navigate_to};
use countdown_page::PageSession;
use log::info;
use yew::prelude::*;

/// Root component. Title and target are read from the URL once per page load.
#[function_component]
pub fn App() -> Html {
    let session = use_memo((), |_| {
        let session = current_href()
            .map(|href| PageSession::from_href(&href))
            .unwrap_or_default();
        info!("Counting down to {} ({:?})", session.target, session.title);
        session
    });

    let target = session.target.resolve_in(&Local);
    let meta_title = format_meta_title(&session.title, &target);

    use_effect_with(meta_title, |meta_title| apply_document_metadata(meta_title));

    let on_navigate = Callback::from(|href: String| navigate_to(&href));

    html! {
        <CountdownPage
            session={(*session).clone()}
            target_ms={target.timestamp_millis()}
            {on_navigate}
        />
    }
}

/// Entry point: installs the panic hook and renders the App component.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
