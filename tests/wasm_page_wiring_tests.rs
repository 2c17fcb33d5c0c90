#![cfg(target_arch = "wasm32")]

use countdown_page::components::{OverrideFormView, OverrideFormViewProps};
use countdown_page::config::FORM_ERROR_MESSAGE;
use countdown_page::query::OverrideForm;
use countdown_page::utils::apply_document_metadata;
use gloo_timers::future::TimeoutFuture;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Element, Event, EventInit, HtmlInputElement, InputEvent, InputEventInit};
use yew::{Callback, Renderer};

wasm_bindgen_test_configure!(run_in_browser);

const DESCRIPTION_SELECTOR: &str = "meta[name=\"description\"]";

fn mount_form(initial: OverrideForm) -> (Element, Rc<RefCell<Vec<String>>>) {
    let root = gloo_utils::document().create_element("div").expect("create root");
    gloo_utils::body().append_child(&root).expect("append root");

    let navigations = Rc::new(RefCell::new(Vec::new()));
    let on_navigate = {
        let navigations = navigations.clone();
        Callback::from(move |href: String| navigations.borrow_mut().push(href))
    };
    let props = OverrideFormViewProps {
        initial,
        on_navigate,
    };
    Renderer::<OverrideFormView>::with_root_and_props(root.clone(), props).render();
    (root, navigations)
}

fn type_into(root: &Element, selector: &str, text: &str) {
    let input: HtmlInputElement = root
        .query_selector(selector)
        .expect("query input")
        .expect("input exists")
        .unchecked_into();
    input.set_value(text);
    let init = InputEventInit::new();
    init.set_bubbles(true);
    let event = InputEvent::new_with_event_init_dict("input", &init).expect("input event");
    input.dispatch_event(&event).expect("dispatch input");
}

fn submit(root: &Element) {
    let form = root
        .query_selector("form.override-form")
        .expect("query form")
        .expect("form exists");
    let init = EventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = Event::new_with_event_init_dict("submit", &init).expect("submit event");
    form.dispatch_event(&event).expect("dispatch submit");
}

fn error_text(root: &Element) -> Option<String> {
    root.query_selector(".form-error")
        .expect("query error")
        .and_then(|el| el.text_content())
}

fn valid_form() -> OverrideForm {
    OverrideForm {
        title: "Launch".to_string(),
        date: "2026-03-01T09:00:00".to_string(),
    }
}

#[wasm_bindgen_test]
async fn invalid_date_shows_inline_error_and_stays_put() {
    let (root, navigations) = mount_form(valid_form());
    TimeoutFuture::new(20).await;

    type_into(&root, "#override-date", "not-a-date");
    TimeoutFuture::new(20).await;
    submit(&root);
    TimeoutFuture::new(20).await;

    assert_eq!(error_text(&root).as_deref(), Some(FORM_ERROR_MESSAGE));
    assert!(navigations.borrow().is_empty());
}

#[wasm_bindgen_test]
async fn empty_title_is_rejected_inline() {
    let (root, navigations) = mount_form(valid_form());
    TimeoutFuture::new(20).await;

    type_into(&root, "#override-title", "");
    TimeoutFuture::new(20).await;
    submit(&root);
    TimeoutFuture::new(20).await;

    assert_eq!(error_text(&root).as_deref(), Some(FORM_ERROR_MESSAGE));
    assert!(navigations.borrow().is_empty());
}

#[wasm_bindgen_test]
async fn valid_form_navigates_with_new_query() {
    let (root, navigations) = mount_form(valid_form());
    TimeoutFuture::new(20).await;

    type_into(&root, "#override-title", "Moon Landing");
    TimeoutFuture::new(20).await;
    submit(&root);
    TimeoutFuture::new(20).await;

    assert_eq!(error_text(&root), None);
    let navigations = navigations.borrow();
    assert_eq!(navigations.len(), 1);
    assert!(navigations[0].contains("title=Moon+Landing"));
    assert!(navigations[0].contains("date=2026-03-01T09%3A00%3A00"));
}

#[wasm_bindgen_test]
fn metadata_creates_missing_description_then_updates_it() {
    let document = gloo_utils::document();
    let existing = document
        .query_selector_all(DESCRIPTION_SELECTOR)
        .expect("query metas");
    for i in 0..existing.length() {
        if let Some(node) = existing.item(i) {
            node.unchecked_into::<Element>().remove();
        }
    }

    apply_document_metadata("Launch – Countdown to 01 Mar 2026");
    assert_eq!(document.title(), "Launch – Countdown to 01 Mar 2026");
    let meta = document
        .query_selector(DESCRIPTION_SELECTOR)
        .expect("query meta")
        .expect("description meta created");
    assert_eq!(
        meta.get_attribute("content").as_deref(),
        Some("Launch – Countdown to 01 Mar 2026")
    );

    apply_document_metadata("Trip – Countdown to 05 Jan 2026");
    assert_eq!(document.title(), "Trip – Countdown to 05 Jan 2026");
    let metas = document
        .query_selector_all(DESCRIPTION_SELECTOR)
        .expect("query metas");
    assert_eq!(metas.length(), 1);
    assert_eq!(
        meta.get_attribute("content").as_deref(),
        Some("Trip – Countdown to 05 Jan 2026")
    );
}
