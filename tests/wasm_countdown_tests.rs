#![cfg(target_arch = "wasm32")]

use countdown_page::components::{CountdownPage, CountdownPageProps};
use countdown_page::config::CELEBRATION_HEADLINE;
use countdown_page::PageSession;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_test::*;
use yew::{Callback, Renderer};

wasm_bindgen_test_configure!(run_in_browser);

fn mount_root() -> web_sys::Element {
    let document = gloo_utils::document();
    let root = document.create_element("div").expect("create root");
    gloo_utils::body().append_child(&root).expect("append root");
    root
}

fn render(target_ms: i64) -> web_sys::Element {
    let root = mount_root();
    let props = CountdownPageProps {
        session: PageSession::default(),
        target_ms,
        on_navigate: Callback::noop(),
    };
    Renderer::<CountdownPage>::with_root_and_props(root.clone(), props).render();
    root
}

#[wasm_bindgen_test]
async fn past_target_switches_to_celebration() {
    let root = render(0);
    TimeoutFuture::new(100).await;
    let html = root.inner_html();
    assert!(html.contains(CELEBRATION_HEADLINE));
    assert!(html.contains("is-hidden"));
    assert!(!html.contains("override-form"));
}

#[wasm_bindgen_test]
async fn future_target_counts_days() {
    let two_days_ahead = js_sys::Date::now() as i64 + 2 * 86_400_000 + 60_000;
    let root = render(two_days_ahead);
    TimeoutFuture::new(100).await;
    let html = root.inner_html();
    assert!(html.contains("class=\"stat-value\">2<"));
    assert!(!html.contains(CELEBRATION_HEADLINE));
}
