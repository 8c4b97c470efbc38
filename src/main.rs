//! Flipsketch entry point
//!
//! Handles platform-specific initialization and runs the playback and draw loops.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, HtmlElement, TouchEvent};

    use flipsketch::platform::SurfaceMetrics;
    use flipsketch::renderer::CanvasRenderer;
    use flipsketch::sim::{SketchState, TouchPhase};
    use flipsketch::{Scheduler, Settings};

    /// App instance holding all state
    struct App {
        state: SketchState,
        renderer: CanvasRenderer,
        scheduler: Scheduler,
        metrics: SurfaceMetrics,
        play_toggle: Option<HtmlElement>,
        scrubber: Option<Element>,
    }

    impl App {
        /// Reflect playback state on the toggle button
        fn sync_play_toggle(&self) {
            if let Some(toggle) = &self.play_toggle {
                let color = if self.state.timeline.is_playing() {
                    "green"
                } else {
                    "white"
                };
                let _ = toggle.style().set_property("background", color);
            }
        }

        fn playback_tick(&mut self) {
            let scrubber = self.scrubber.clone();
            self.scheduler
                .playback_tick(&mut self.state, &mut self.renderer, |offset| {
                    if let Some(el) = &scrubber {
                        el.set_scroll_left((offset.round() as i32).into());
                    }
                });
            self.sync_play_toggle();
        }

        fn draw_frame(&mut self) {
            self.scheduler.draw_frame(&mut self.state, &mut self.renderer);
        }

        fn ingest_touches(&mut self, phase: TouchPhase, event: &TouchEvent) {
            let list = event.touches();
            let points = (0..list.length())
                .filter_map(|i| list.get(i))
                .map(|t| (t.page_x() as f32, t.page_y() as f32));
            let touches = self.metrics.touches_from_page(points);
            self.state.on_touch(phase, &touches);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flipsketch starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .query_selector("canvas")
            .ok()
            .flatten()
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Size the canvas to the viewport minus the scrubber strip
        let (client_w, client_h) = document
            .document_element()
            .map(|el| (el.client_width() as f32, el.client_height() as f32))
            .unwrap_or((0.0, 0.0));
        let inner_w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32;
        let inner_h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32;
        let dpr = window.device_pixel_ratio() as f32;

        let metrics = SurfaceMetrics::from_viewport(client_w, client_h, inner_w, inner_h, dpr)
            .with_offset(canvas.offset_left() as f32, canvas.offset_top() as f32);
        let (width, height) = metrics.device_size();
        canvas.set_width(width);
        canvas.set_height(height);
        let style = canvas.style();
        let _ = style.set_property("width", &format!("{}px", metrics.css_size.x));
        let _ = style.set_property("height", &format!("{}px", metrics.css_size.y));

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let settings = Settings::load();
        let play_toggle: Option<HtmlElement> = document
            .query_selector(".play-toggle")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into().ok());
        let scrubber = document.query_selector(".scrubber").ok().flatten();
        if play_toggle.is_none() {
            log::warn!("No .play-toggle element, playback control disabled");
        }
        if scrubber.is_none() {
            log::warn!("No .scrubber element, scrubbing disabled");
        }

        let mut renderer = CanvasRenderer::new(ctx, width, height);
        if settings.show_frame_counter {
            if let Some(toggle) = &play_toggle {
                renderer = renderer.with_label(toggle.clone().into());
            }
        }

        let app = Rc::new(RefCell::new(App {
            state: SketchState::new(&settings, metrics.scale),
            renderer,
            scheduler: Scheduler::from_settings(&settings),
            metrics,
            play_toggle,
            scrubber,
        }));

        setup_canvas_touch(&canvas, app.clone());
        setup_scrubber(app.clone());
        setup_play_toggle(app.clone());
        start_playback_interval(app.clone());

        // Start draw loop
        request_animation_frame(app);

        log::info!("Flipsketch running!");
    }

    fn setup_canvas_touch(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        for (name, phase, prevent) in [
            ("touchstart", TouchPhase::Start, true),
            ("touchmove", TouchPhase::Move, false),
            ("touchend", TouchPhase::End, true),
        ] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if prevent {
                    event.prevent_default();
                }
                app.borrow_mut().ingest_touches(phase, &event);
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_scrubber(app: Rc<RefCell<App>>) {
        let Some(scrubber) = app.borrow().scrubber.clone() else {
            return;
        };

        // Track is one strip width longer than the scroll range
        let extent = app.borrow().state.timeline.scrub_extent();
        let track: Option<HtmlElement> = scrubber
            .first_element_child()
            .and_then(|el| el.dyn_into().ok());
        match track {
            Some(track) => {
                let width = extent + scrubber.client_width() as f32;
                let _ = track.style().set_property("width", &format!("{}px", width));
                log::debug!("scrubber track sized to {}px", width);
            }
            None => log::warn!("Scrubber has no track element, scroll range left as styled"),
        }

        // Touch down pauses
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                let mut a = app.borrow_mut();
                a.state.on_scrub_touch_start();
                a.sync_play_toggle();
            });
            let _ = scrubber
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Dragging pauses and scrubs
        {
            let app = app.clone();
            let el = scrubber.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                let mut a = app.borrow_mut();
                a.state.on_scrub_gesture(el.scroll_left() as f32);
                a.sync_play_toggle();
            });
            let _ = scrubber
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Scroll (momentum and playback mirroring) scrubs without pausing
        {
            let el = scrubber.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                // Skip if the app is mid-update; the playhead already matches
                if let Ok(mut a) = app.try_borrow_mut() {
                    a.state.on_scrub_scroll(el.scroll_left() as f32);
                }
            });
            let _ = scrubber
                .add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_play_toggle(app: Rc<RefCell<App>>) {
        let Some(toggle) = app.borrow().play_toggle.clone() else {
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let mut a = app.borrow_mut();
            a.state.on_play_toggle();
            a.sync_play_toggle();
        });
        let _ = toggle.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn start_playback_interval(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let period = app.borrow().scheduler.period_ms().round().max(1.0) as i32;
        let closure = Closure::<dyn FnMut()>::new(move || {
            app.borrow_mut().playback_tick();
        });
        if window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period,
            )
            .is_err()
        {
            log::warn!("Failed to start playback interval");
        }
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            draw_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn draw_loop(app: Rc<RefCell<App>>) {
        app.borrow_mut().draw_frame();
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flipsketch (native) starting...");
    log::info!("Native mode runs a scripted headless session - use `trunk serve` for the web version");

    headless_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drag the first subject at two points along the timeline, then play it back
#[cfg(not(target_arch = "wasm32"))]
fn headless_session() {
    use flipsketch::platform::SurfaceMetrics;
    use flipsketch::renderer::RecordingRenderer;
    use flipsketch::sim::{SketchState, TouchPhase};
    use flipsketch::{Scheduler, Settings};

    let settings = Settings::load();
    let metrics = SurfaceMetrics::from_viewport(1024.0, 868.0, 1024.0, 868.0, 1.0);
    let mut state = SketchState::new(&settings, metrics.scale);
    let mut scheduler = Scheduler::from_settings(&settings);
    let mut renderer = RecordingRenderer::default();
    let mut now = 0.0;
    let refresh_ms = 1000.0 / 60.0;

    // Frame 0: nudge subject 0 to the right
    let drag = metrics.touches_from_page([(260.0, 200.0)]);
    state.on_touch(TouchPhase::Start, &drag);
    scheduler.pump(now, &mut state, &mut renderer, |_| {});
    state.on_touch(TouchPhase::End, &[]);

    // Frame 120: pull it down
    state.on_scrub_gesture(state.timeline.scroll_offset_for(120));
    let drag = metrics.touches_from_page([(260.0, 260.0)]);
    state.on_touch(TouchPhase::Start, &drag);
    scheduler.pump(now, &mut state, &mut renderer, |_| {});
    state.on_touch(TouchPhase::End, &[]);

    // Play from the top until playback stops at the end
    state.on_scrub_gesture(0.0);
    state.on_play_toggle();
    while state.timeline.is_playing() {
        now += refresh_ms;
        scheduler.pump(now, &mut state, &mut renderer, |_| {});
    }

    for frame in [0usize, 119, 120, 240] {
        if let Some(subject) = state.frames().read(frame).and_then(|f| f.subjects.first()) {
            log::info!("frame {:>3}: subject 0 at {:?}", frame, subject.pos);
        }
    }
    println!(
        "Played to frame {} in {:.1}s (label {:?})",
        state.timeline.current_frame(),
        now / 1000.0,
        renderer.last_text().unwrap_or("-")
    );
}

