use crate::config::{FORM_ERROR_MESSAGE, FRAME_THROTTLE_MS};
use crate::query::OverrideForm;
use crate::utils::{current_href, performance_now, wall_clock_ms};
use crate::{countdown_parts, CountdownSnapshot, FrameThrottle};
use log::{info, warn};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::prelude::*;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// A self-rescheduling `requestAnimationFrame` loop.
///
/// Dropping it cancels the pending frame and releases the callback.
pub struct AnimationLoop {
    frame_id: Rc<Cell<Option<i32>>>,
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl AnimationLoop {
    /// Start calling `on_frame` with each frame's timestamp until dropped.
    pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Self {
        let frame_id = Rc::new(Cell::new(None));
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

        let frame_id_tick = frame_id.clone();
        let callback_tick = callback.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            on_frame(timestamp);
            if let Some(next) = callback_tick.borrow().as_ref() {
                frame_id_tick.set(request_frame(next));
            }
        }) as Box<dyn FnMut(f64)>));

        if let Some(first) = callback.borrow().as_ref() {
            frame_id.set(request_frame(first));
        }

        Self { frame_id, callback }
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        if let Some(id) = self.frame_id.take() {
            if let Err(err) = gloo_utils::window().cancel_animation_frame(id) {
                warn!("cancelAnimationFrame failed: {err:?}");
            }
        }
        // breaks the closure -> cell reference cycle
        self.callback.borrow_mut().take();
    }
}

fn request_frame(callback: &FrameCallback) -> Option<i32> {
    gloo_utils::window()
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map_err(|err| warn!("requestAnimationFrame failed: {err:?}"))
        .ok()
}

/// Live countdown to `target_ms` (epoch milliseconds).
///
/// Returns `None` until the first client-side clock sample, so server-rendered
/// and first client-rendered markup agree. Afterwards the clock is resampled on
/// animation frames at most every [`FRAME_THROTTLE_MS`].
#[hook]
pub fn use_countdown(target_ms: i64) -> Option<CountdownSnapshot> {
    let now_ms = use_state(|| None::<i64>);

    {
        let now_ms = now_ms.clone();
        use_effect_with(target_ms, move |_| {
            now_ms.set(Some(wall_clock_ms()));
            let mut throttle = FrameThrottle::new(performance_now(), FRAME_THROTTLE_MS);
            let frame_loop = AnimationLoop::start(move |timestamp| {
                if throttle.ready(timestamp) {
                    now_ms.set(Some(wall_clock_ms()));
                }
            });
            move || drop(frame_loop)
        });
    }

    *use_memo((*now_ms, target_ms), |(now_ms, target_ms)| {
        now_ms.map(|now_ms| countdown_parts(*target_ms, now_ms))
    })
}

/// State and callbacks backing the title/date override form.
#[derive(Clone)]
pub struct OverrideFormHandle {
    pub title: String,
    pub date: String,
    /// Inline message shown after a rejected submission.
    pub error: Option<String>,
    pub on_title_input: Callback<InputEvent>,
    pub on_date_input: Callback<InputEvent>,
    pub on_submit: Callback<SubmitEvent>,
}

/// Form hook: validates both fields on submit and hands the new URL to `navigate`.
/// A rejected form sets `error` and never calls `navigate`.
#[hook]
pub fn use_override_form(initial: OverrideForm, navigate: Callback<String>) -> OverrideFormHandle {
    let title = use_state(|| initial.title.clone());
    let date = use_state(|| initial.date.clone());
    let error = use_state(|| None::<String>);

    let on_title_input = {
        let title = title.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            title.set(input.value());
        })
    };

    let on_date_input = {
        let date = date.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            date.set(input.value());
        })
    };

    let on_submit = {
        let title = title.clone();
        let date = date.clone();
        let error = error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form = OverrideForm {
                title: (*title).clone(),
                date: (*date).clone(),
            };
            let href = current_href().unwrap_or_default();
            match form.submit_href(&href) {
                Ok(next) => {
                    info!("Applying override: title={:?}, date={:?}", form.title, form.date);
                    error.set(None);
                    navigate.emit(next);
                }
                Err(err) => {
                    warn!("Override form rejected: {err}");
                    error.set(Some(FORM_ERROR_MESSAGE.to_string()));
                }
            }
        })
    };

    OverrideFormHandle {
        title: (*title).clone(),
        date: (*date).clone(),
        error: (*error).clone(),
        on_title_input,
        on_date_input,
        on_submit,
    }
}
