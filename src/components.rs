//! Yew view components for the countdown page.
//!
//! `CountdownPage` owns the live countdown; the other components render from props.

use crate::config::{
    BACKGROUND_IMAGE, CELEBRATION_HEADLINE, CONFETTI_COLORS, CONFETTI_MAX_LEAD_PCT,
    CONFETTI_PIECES, CONFETTI_ROTATION_STEP_DEG, DATE_PLACEHOLDER, DEFAULT_TITLE,
    OVERLAY_FADE_DELAY_MS, TITLE_MAX_CHARS,
};
use crate::hooks::{use_countdown, use_override_form};
use crate::query::OverrideForm;
use crate::utils::asset_path;
use crate::{CountdownSnapshot, PageSession};
use gloo_timers::callback::Timeout;
use log::info;
use rand::Rng;
use yew::prelude::*;

/// Label and accent class for each tile, in display order.
const STAT_TILES: [(&str, &str); 4] = [
    ("Days", "accent-days"),
    ("Hours", "accent-hours"),
    ("Minutes", "accent-minutes"),
    ("Seconds", "accent-seconds"),
];

/// Tile values in `STAT_TILES` order; all zero before the first measurement.
pub fn tile_values(snapshot: Option<&CountdownSnapshot>) -> [u64; 4] {
    snapshot
        .map(|s| {
            [
                s.days,
                u64::from(s.hours),
                u64::from(s.minutes),
                u64::from(s.seconds),
            ]
        })
        .unwrap_or_default()
}

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub label: AttrValue,
    pub value: u64,
    pub accent: AttrValue,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="stat-card">
            <div class={classes!("stat-accent", props.accent.to_string())}></div>
            <div class="stat-body">
                <div class="stat-label">{ props.label.clone() }</div>
                <div class="stat-value">{ props.value }</div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct StatGridProps {
    pub snapshot: Option<CountdownSnapshot>,
    #[prop_or_default]
    pub hidden: bool,
}

/// The four countdown tiles.
#[function_component(StatGrid)]
pub fn stat_grid(props: &StatGridProps) -> Html {
    let values = tile_values(props.snapshot.as_ref());
    html! {
        <section class={classes!("stat-section", props.hidden.then_some("is-hidden"))}>
            <div class="stat-grid">
                { STAT_TILES.iter().zip(values).map(|(&(label, accent), value)| html! {
                    <StatCard key={label} label={label} value={value} accent={accent} />
                }).collect::<Html>() }
            </div>
        </section>
    }
}

/// One falling confetti piece.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiPiece {
    pub left_pct: f64,
    /// Start offset above the viewport.
    pub lead_pct: f64,
    pub rotation_deg: usize,
    pub color: &'static str,
}

impl ConfettiPiece {
    fn style(&self) -> String {
        format!(
            "left: {:.3}%; top: -{:.3}%; background-color: {}; transform: rotate({}deg);",
            self.left_pct, self.lead_pct, self.color, self.rotation_deg
        )
    }
}

/// Lay out `count` pieces evenly across the width with random start heights.
pub fn confetti_pieces<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<ConfettiPiece> {
    (0..count)
        .map(|i| ConfettiPiece {
            left_pct: i as f64 / count as f64 * 100.0,
            lead_pct: rng.random_range(0.0..CONFETTI_MAX_LEAD_PCT),
            rotation_deg: (i * CONFETTI_ROTATION_STEP_DEG) % 360,
            color: CONFETTI_COLORS[i % CONFETTI_COLORS.len()],
        })
        .collect()
}

#[function_component(ConfettiParticles)]
pub fn confetti_particles() -> Html {
    // generated once so re-renders on every tick do not reshuffle the burst
    let pieces = use_memo((), |_| confetti_pieces(CONFETTI_PIECES, &mut rand::rng()));

    html! {
        <div class="confetti">
            { pieces.iter().enumerate().map(|(i, piece)| html! {
                <span key={i} class="confetti-piece" style={piece.style()} />
            }).collect::<Html>() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CelebrationOverlayProps {
    pub visible: bool,
}

/// Full-screen confetti and headline, faded in once `visible` turns true.
#[function_component(CelebrationOverlay)]
pub fn celebration_overlay(props: &CelebrationOverlayProps) -> Html {
    let revealed = use_state(|| false);

    {
        let revealed = revealed.clone();
        use_effect_with(props.visible, move |&visible| {
            let fade = visible.then(|| {
                Timeout::new(OVERLAY_FADE_DELAY_MS, move || revealed.set(true))
            });
            move || drop(fade)
        });
    }

    let opacity = if props.visible && *revealed {
        "opacity-100"
    } else {
        "opacity-0"
    };

    html! {
        <div class={classes!("celebration", opacity)} aria-hidden={(!props.visible).to_string()}>
            if props.visible {
                <div class="celebration-stage">
                    <ConfettiParticles />
                    <h2 class="celebration-headline">{ CELEBRATION_HEADLINE }</h2>
                </div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct OverrideFormViewProps {
    pub initial: OverrideForm,
    pub on_navigate: Callback<String>,
}

/// Inline form for picking a different title and target date.
#[function_component(OverrideFormView)]
pub fn override_form_view(props: &OverrideFormViewProps) -> Html {
    let form = use_override_form(props.initial.clone(), props.on_navigate.clone());

    html! {
        <form class="override-form" onsubmit={form.on_submit.clone()}>
            <div class="form-group">
                <label for="override-title">{ "Title" }</label>
                <input id="override-title"
                    type="text"
                    value={form.title.clone()}
                    oninput={form.on_title_input.clone()}
                    placeholder={DEFAULT_TITLE}
                    maxlength={TITLE_MAX_CHARS.to_string()}
                />
            </div>
            <div class="form-group">
                <label for="override-date">{ "ISO Datetime" }</label>
                <input id="override-date"
                    class="mono"
                    type="text"
                    value={form.date.clone()}
                    oninput={form.on_date_input.clone()}
                    placeholder={DATE_PLACEHOLDER}
                />
            </div>
            <button type="submit">{ "Update" }</button>
            if let Some(error) = &form.error {
                <p class="form-error">{ error.clone() }</p>
            }
        </form>
    }
}

#[derive(Properties, PartialEq)]
pub struct CountdownPageProps {
    pub session: PageSession,
    /// Target as epoch milliseconds, already resolved in the viewer's time zone.
    pub target_ms: i64,
    pub on_navigate: Callback<String>,
}

/// Whole page: heading, live tiles, override form and the completion overlay.
#[function_component(CountdownPage)]
pub fn countdown_page(props: &CountdownPageProps) -> Html {
    let snapshot = use_countdown(props.target_ms);
    // latched: a clock stepping backwards must not bring the tiles back
    let latch = use_mut_ref(|| false);
    if snapshot.is_some_and(|s| s.is_complete) {
        *latch.borrow_mut() = true;
    }
    let complete = *latch.borrow();

    use_effect_with(complete, |&complete| {
        if complete {
            info!("Countdown complete, showing celebration");
        }
    });

    let background = format!(
        "background-image: linear-gradient(rgba(0,0,0,0.55), rgba(0,0,0,0.55)), url({});",
        asset_path(BACKGROUND_IMAGE)
    );

    html! {
        <main class="page" style={background}>
            <header class="page-header">
                <h1>{ props.session.title.clone() }</h1>
            </header>

            <StatGrid snapshot={snapshot} hidden={complete} />

            if !complete {
                <footer class="page-footer">
                    <OverrideFormView
                        initial={OverrideForm::from_session(&props.session)}
                        on_navigate={props.on_navigate.clone()}
                    />
                </footer>
            }

            <CelebrationOverlay visible={complete} />
        </main>
    }
}
