//! Orchestrating view.
//!
//! Owns the DOM, the particle canvas, the input listeners and the
//! requestAnimationFrame loop. All session state lives in [`session::Session`]
//! inside a thread-local cell; this module translates pointer events into
//! session calls, drains the session's cues into side effects (audio,
//! confetti) and redraws the presentation from session state every frame.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, window};

pub mod ambient;
pub mod audio;
pub mod evasion;
pub mod particles;
pub mod rng;
pub mod script;
pub mod sequencer;
pub mod session;
pub mod style;
pub mod toasts;

use particles::ParticleField;
use rng::Lcg;
use script::Button;
use sequencer::Screen;
use session::{Cue, Session};

const VISIT_FLAG_KEY: &str = "bq-visited";

struct AppState {
    session: Session,
    rng: Lcg,
    particles: ParticleField,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Generation of the last fully rendered screen; a mismatch triggers a
    /// content rebuild.
    rendered_generation: Option<u64>,
    last_frame_ms: f64,
}

thread_local! {
    static APP_STATE: std::cell::RefCell<Option<AppState>> = std::cell::RefCell::new(None);
}

/// Builds the view, reads the visit flag, wires listeners and starts the
/// frame loop.
pub fn start() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = doc
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?;

    // Stylesheet, once.
    if doc.get_element_by_id("bq-style").is_none() {
        let style_el = doc.create_element("style")?;
        style_el.set_id("bq-style");
        style_el.set_text_content(Some(style::APP_CSS));
        body.append_child(&style_el)?;
    }

    // View skeleton.
    let root = doc.create_element("div")?;
    root.set_id("bq-root");
    root.set_inner_html(concat!(
        "<div id=\"bq-ambient\"></div>",
        "<div id=\"bq-faint\" style=\"display:none;\"></div>",
        "<canvas id=\"bq-particles\"></canvas>",
        "<div id=\"bq-content\"></div>",
        "<div id=\"bq-hearts\"></div>",
        "<div id=\"bq-idle-toast\" class=\"bq-toast-top\" style=\"display:none;\"></div>",
        "<div id=\"bq-clicks-toast\" class=\"bq-toast-top\" style=\"display:none;\"></div>",
        "<div id=\"bq-flash\" style=\"display:none;\"></div>",
    ));
    body.append_child(&root)?;

    let canvas: HtmlCanvasElement = doc
        .get_element_by_id("bq-particles")
        .ok_or_else(|| JsValue::from_str("no particle canvas"))?
        .dyn_into()?;
    canvas.set_width(win.inner_width()?.as_f64().unwrap_or(1280.0) as u32);
    canvas.set_height(win.inner_height()?.as_f64().unwrap_or(720.0) as u32);
    let ctx: CanvasRenderingContext2d = canvas.get_context("2d")?.unwrap().dyn_into()?;

    if let Some(el) = doc.get_element_by_id("bq-faint") {
        el.set_text_content(Some(crate::FAINT_CAPTION));
    }

    let now = win.performance().map(|p| p.now()).unwrap_or(0.0);
    let visited = read_visit_flag();
    mark_visited();

    let mut rng = Lcg::from_clock();
    let session = Session::new(now, visited, &mut rng);
    render_ambient(&doc, &session);

    APP_STATE.with(|cell| {
        cell.replace(Some(AppState {
            session,
            rng,
            particles: ParticleField::new(),
            canvas,
            ctx,
            rendered_generation: None,
            last_frame_ms: now,
        }))
    });

    // One delegated click listener: controls carry data-action, anything
    // else that is not a button counts as a background click.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let now = window()
                .and_then(|w| w.performance())
                .map(|p| p.now())
                .unwrap_or(0.0);
            let target: Option<Element> = evt
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok());
            APP_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    let action = target
                        .as_ref()
                        .and_then(|el| el.closest("[data-action]").ok().flatten())
                        .and_then(|el| el.get_attribute("data-action"));
                    if let Some(button) = action.as_deref().and_then(Button::from_action_id) {
                        let cues = state.session.press(button, now, &mut state.rng);
                        apply_cues(state, &cues, now);
                    } else {
                        let on_button = target
                            .as_ref()
                            .and_then(|el| el.closest("button").ok().flatten())
                            .is_some();
                        if !on_button {
                            state.session.background_click(now);
                        }
                    }
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Keep the particle canvas backing store matched to the viewport.
    {
        let closure = Closure::wrap(Box::new(move || {
            let Some(win) = window() else {
                return;
            };
            let w = win
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(1280.0);
            let h = win
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(720.0);
            APP_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    state.canvas.set_width(w as u32);
                    state.canvas.set_height(h as u32);
                }
            });
        }) as Box<dyn FnMut()>);
        win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    start_frame_loop();
    Ok(())
}

type FrameCallback = std::rc::Rc<std::cell::RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_frame_loop() {
    let f: FrameCallback = std::rc::Rc::new(std::cell::RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        APP_STATE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                frame_tick(state, ts);
            }
        });
        if let Some(w) = window() {
            let _ =
                w.request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        let _ = w.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

fn frame_tick(state: &mut AppState, now: f64) {
    let dt = (now - state.last_frame_ms).clamp(0.0, 100.0);
    state.last_frame_ms = now;

    let cues = state.session.tick(now, &mut state.rng);
    apply_cues(state, &cues, now);

    let view_w = state.canvas.width() as f64;
    let view_h = state.canvas.height() as f64;
    state
        .particles
        .step(&mut state.rng, now, dt, view_w, view_h);

    render(state, now);
}

fn apply_cues(state: &mut AppState, cues: &[Cue], now: f64) {
    let view_w = state.canvas.width() as f64;
    let view_h = state.canvas.height() as f64;
    for cue in cues {
        match cue {
            Cue::PlayPop => audio::play_pop(),
            Cue::PlayDrumroll => audio::play_drumroll(&mut state.rng),
            Cue::ConfettiTeaser => {
                state
                    .particles
                    .spawn_teaser(&mut state.rng, now, view_w, view_h)
            }
            Cue::ConfettiCannons => state.particles.open_cannons(now),
        }
    }
}

// --- Rendering ----------------------------------------------------------

fn render(state: &mut AppState, now: f64) {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };

    let generation = state.session.sequencer.generation();
    if state.rendered_generation != Some(generation) {
        state.rendered_generation = Some(generation);
        rebuild_screen(&doc, &state.session);
    }

    update_root_classes(&doc, &state.session);
    update_toasts(&doc, &state.session, now);

    match state.session.screen() {
        Screen::Landing => update_landing(&doc, &state.session, now),
        Screen::Hook | Screen::Q3a | Screen::Finale => {
            update_gated_cta(&doc, &state.session, now)
        }
        Screen::Drumroll => update_drum_bars(&doc, &state.session, now),
        Screen::Proposal => update_proposal(&doc, &state.session),
        _ => {}
    }

    draw_particles(state, now);
}

/// Rebuilds the content container for the current screen. Runs once per
/// transition; everything per-frame happens in the update_* helpers.
fn rebuild_screen(doc: &Document, session: &Session) {
    let screen = session.screen();
    if let Some(content) = doc.get_element_by_id("bq-content") {
        content.set_inner_html(&screen_html(screen));
    }
    if screen == Screen::Landing {
        // Mount or replay: the decorative field was (re)generated.
        render_ambient(doc, session);
        if let Some(hearts) = doc.get_element_by_id("bq-hearts") {
            hearts.set_inner_html("");
        }
    }
    if screen == Screen::Finale {
        render_hearts(doc, session);
    }
}

fn screen_html(screen: Screen) -> String {
    let desc = script::screen_desc(screen);
    match screen {
        Screen::Landing => format!(
            concat!(
                "<div style=\"font-size:3.5rem;\">🎀</div>",
                "<div style=\"min-height:80px;\"><h1 id=\"bq-typed\" class=\"bq-prompt bq-cursor\"></h1></div>",
                "<div id=\"bq-cta\" style=\"visibility:hidden;\">",
                "<p class=\"bq-sub\">{sub}</p>{buttons}",
                "</div>",
            ),
            sub = desc.sub.unwrap_or(""),
            buttons = buttons_html(desc),
        ),
        Screen::Drumroll => concat!(
            "<div class=\"bq-drum-emoji\">🥁</div>",
            "<p class=\"bq-prompt\" style=\"text-transform:uppercase; letter-spacing:0.15em; font-size:1.8rem;\">Drum roll please…</p>",
            "<div class=\"bq-drum-bars\">",
            "<div id=\"bq-bar-0\" class=\"bq-drum-bar\"></div>",
            "<div id=\"bq-bar-1\" class=\"bq-drum-bar\"></div>",
            "<div id=\"bq-bar-2\" class=\"bq-drum-bar\"></div>",
            "</div>",
        )
        .to_string(),
        Screen::Proposal => format!(
            concat!(
                "<div style=\"font-size:4rem;\">💍</div>",
                "<h1 id=\"bq-prompt\" class=\"bq-prompt\"></h1>",
                "{buttons}",
            ),
            buttons = buttons_html(desc),
        ),
        Screen::Finale => format!(
            concat!(
                "<div style=\"font-size:4rem;\">🥹</div>",
                "<p class=\"bq-heading\">{heading}</p>",
                "<p class=\"bq-prompt\" style=\"color:#7B2CBF; font-size:2rem;\">{sub}</p>",
                "<div id=\"bq-cta\" style=\"visibility:hidden;\">{buttons}</div>",
            ),
            heading = desc.heading,
            sub = desc.sub.unwrap_or(""),
            buttons = buttons_html(desc),
        ),
        Screen::Hook | Screen::Q3a => format!(
            concat!(
                "<div class=\"bq-card\"><p class=\"bq-heading\">{heading}</p></div>",
                "{sub}",
                "<div id=\"bq-cta\" style=\"visibility:hidden;\">{buttons}</div>",
            ),
            heading = desc.heading,
            sub = desc
                .sub
                .map(|s| format!("<p class=\"bq-prompt\" style=\"font-size:1.8rem;\">{s}</p>"))
                .unwrap_or_default(),
            buttons = buttons_html(desc),
        ),
        Screen::Q1 | Screen::Q2 | Screen::Q3b => format!(
            concat!(
                "<div class=\"bq-card\"><p class=\"bq-heading\">{heading}</p></div>",
                "{buttons}",
            ),
            heading = desc.heading,
            buttons = buttons_html(desc),
        ),
    }
}

fn buttons_html(desc: &script::ScreenDesc) -> String {
    let mut out = String::from("<div class=\"bq-btn-row\">");
    for b in desc.buttons {
        let class = if b.primary {
            "bq-btn bq-btn-primary"
        } else {
            "bq-btn bq-btn-secondary"
        };
        let extra_id = match b.button {
            Button::Yes => " id=\"bq-yes\"",
            Button::No => " id=\"bq-no\"",
            _ => "",
        };
        out.push_str(&format!(
            "<button{extra_id} class=\"{class}\" data-action=\"{action}\">{label}</button>",
            action = b.button.action_id(),
            label = b.label,
        ));
    }
    out.push_str("</div>");
    out
}

fn render_ambient(doc: &Document, session: &Session) {
    let Some(layer) = doc.get_element_by_id("bq-ambient") else {
        return;
    };
    let mut html = String::new();
    for item in &session.ambient {
        html.push_str(&format!(
            concat!(
                "<div class=\"bq-ambient-item\" style=\"left:{x:.2}%; top:{y:.2}%; ",
                "font-size:{size:.1}px; animation-delay:{delay:.2}s; ",
                "animation-duration:{dur:.2}s;\">{glyph}</div>",
            ),
            x = item.x_pct,
            y = item.y_pct,
            size = item.size_px,
            delay = item.delay_s,
            dur = item.duration_s,
            glyph = item.glyph,
        ));
    }
    layer.set_inner_html(&html);
}

fn render_hearts(doc: &Document, session: &Session) {
    let Some(layer) = doc.get_element_by_id("bq-hearts") else {
        return;
    };
    let mut html = String::new();
    for h in &session.hearts {
        html.push_str(&format!(
            "<div class=\"bq-heart\" style=\"left:{x:.2}%; animation-delay:{d:.1}s;\">💜</div>",
            x = h.x_pct,
            d = h.delay_s(),
        ));
    }
    layer.set_inner_html(&html);
}

fn update_root_classes(doc: &Document, session: &Session) {
    if let Some(root) = doc.get_element_by_id("bq-root") {
        let mut classes = String::new();
        if session.evasion.shaking {
            classes.push_str("bq-shake ");
        }
        if session.screen() == Screen::Finale {
            classes.push_str("bq-glow");
        }
        root.set_class_name(classes.trim_end());
    }
    if let Some(faint) = doc.get_element_by_id("bq-faint") {
        let display = if session.evasion.faint_caption {
            "display:block;"
        } else {
            "display:none;"
        };
        faint.set_attribute("style", display).ok();
    }
}

fn update_toasts(doc: &Document, session: &Session, now: f64) {
    use toasts::ToastChannel;
    for (id, channel) in [
        ("bq-idle-toast", ToastChannel::Idle),
        ("bq-clicks-toast", ToastChannel::Clicks),
        ("bq-flash", ToastChannel::Flash),
    ] {
        if let Some(el) = doc.get_element_by_id(id) {
            match session.toasts.live(channel, now) {
                Some(msg) => {
                    el.set_text_content(Some(msg));
                    el.set_attribute("style", "display:block;").ok();
                }
                None => {
                    el.set_attribute("style", "display:none;").ok();
                }
            }
        }
    }
}

fn update_landing(doc: &Document, session: &Session, now: f64) {
    if let Some(el) = doc.get_element_by_id("bq-typed") {
        let shown = session.typed_chars(now);
        let prefix: String = crate::LANDING_PHRASE.chars().take(shown).collect();
        el.set_text_content(Some(&prefix));
        el.set_class_name(if session.cursor_visible(now) {
            "bq-prompt bq-cursor"
        } else {
            "bq-prompt"
        });
    }
    if let Some(cta) = doc.get_element_by_id("bq-cta") {
        let vis = if session.landing_revealed(now) {
            "visibility:visible;"
        } else {
            "visibility:hidden;"
        };
        cta.set_attribute("style", vis).ok();
    }
}

/// Shows the single gated control once its reveal delay has passed.
fn update_gated_cta(doc: &Document, session: &Session, now: f64) {
    let desc = script::screen_desc(session.screen());
    if let Some(cta) = doc.get_element_by_id("bq-cta") {
        let vis = if session.sequencer.elapsed(now) >= desc.reveal_delay_ms {
            "visibility:visible;"
        } else {
            "visibility:hidden;"
        };
        cta.set_attribute("style", vis).ok();
    }
}

fn update_drum_bars(doc: &Document, session: &Session, now: f64) {
    let phase = session.drum_phase(now);
    for i in 0..3 {
        if let Some(bar) = doc.get_element_by_id(&format!("bq-bar-{i}")) {
            bar.set_class_name(if phase > i {
                "bq-drum-bar bq-live"
            } else {
                "bq-drum-bar"
            });
        }
    }
}

fn update_proposal(doc: &Document, session: &Session) {
    if let Some(el) = doc.get_element_by_id("bq-prompt") {
        el.set_text_content(Some(session.proposal_caption()));
    }
    if let Some(yes) = doc.get_element_by_id("bq-yes") {
        yes.set_class_name(if session.evasion.attempts >= 3 {
            "bq-btn bq-btn-primary bq-pulse"
        } else {
            "bq-btn bq-btn-primary"
        });
    }
    if let Some(no) = doc.get_element_by_id("bq-no") {
        let ev = &session.evasion;
        let style = format!(
            "transform: translate({x:.1}px, {y:.1}px) scale({s:.2}); display:{d};",
            x = ev.offset.0,
            y = ev.offset.1,
            s = ev.scale,
            d = if ev.visible { "inline-block" } else { "none" },
        );
        no.set_attribute("style", &style).ok();
    }
}

fn draw_particles(state: &mut AppState, now: f64) {
    let w = state.canvas.width() as f64;
    let h = state.canvas.height() as f64;
    if state.particles.live().is_empty() {
        state.ctx.clear_rect(0.0, 0.0, w, h);
        return;
    }
    state.ctx.clear_rect(0.0, 0.0, w, h);
    for p in state.particles.live() {
        state.ctx.set_global_alpha(p.alpha(now));
        state
            .ctx
            .set_fill_style(&wasm_bindgen::JsValue::from_str(p.color));
        state
            .ctx
            .fill_rect(p.x - p.size / 2.0, p.y - p.size / 2.0, p.size, p.size);
    }
    state.ctx.set_global_alpha(1.0);
}

// --- Visit flag ----------------------------------------------------------

/// Best-effort read of the once-per-browsing-session flag.
fn read_visit_flag() -> bool {
    window()
        .and_then(|w| w.session_storage().ok().flatten())
        .and_then(|s| s.get_item(VISIT_FLAG_KEY).ok().flatten())
        .is_some()
}

fn mark_visited() {
    if let Some(storage) = window().and_then(|w| w.session_storage().ok().flatten()) {
        storage.set_item(VISIT_FLAG_KEY, "1").ok();
    }
}
