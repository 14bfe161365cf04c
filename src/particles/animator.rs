//! Browser binding of `ParticleField`: owns a canvas overlaid on a container,
//! drives it from `requestAnimationFrame` and re-seeds on window resize.

use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, window};

use super::{Bounds, ParticleField, ParticleOptions, Rgb, Surface};
use crate::error::{GalleryError, Result};

pub const INITIALIZED_ATTR: &str = "data-particles-initialized";
const THEME_COLOR_VAR: &str = "--secondary-color";
const CANVAS_STYLE: &str =
    "position:absolute; top:0; left:0; width:100%; height:100%; pointer-events:none; z-index:1;";

impl Surface for CanvasRenderingContext2d {
    fn clear(&mut self, bounds: Bounds) {
        self.clear_rect(0.0, 0.0, bounds.width, bounds.height);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgb, opacity: f64) {
        self.begin_path();
        if self.arc(x, y, radius, 0.0, TAU).is_ok() {
            self.set_fill_style_str(&color.rgba(opacity));
            self.fill();
        }
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgb, opacity: f64) {
        self.begin_path();
        self.move_to(from.0, from.1);
        self.line_to(to.0, to.1);
        self.set_stroke_style_str(&color.rgba(opacity));
        self.set_line_width(1.0);
        self.stroke();
    }
}

// --- Frame loop ---------------------------------------------------------------

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Self-rescheduling `requestAnimationFrame` loop with an explicit stop.
/// The callback never overlaps itself; `stop` cancels the pending frame and
/// releases the closure.
pub struct FrameLoop {
    callback: FrameCallback,
    pending: Rc<Cell<Option<i32>>>,
}

fn request_frame(f: &Closure<dyn FnMut(f64)>) -> Option<i32> {
    window().and_then(|w| w.request_animation_frame(f.as_ref().unchecked_ref()).ok())
}

impl FrameLoop {
    pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Self {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));
        let cb = callback.clone();
        let pend = pending.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
            pend.set(None);
            on_frame(ts);
            // `stop()` inside `on_frame` clears the slot; then we do not reschedule.
            if let Some(f) = cb.borrow().as_ref() {
                pend.set(request_frame(f));
            }
        }) as Box<dyn FnMut(f64)>));
        if let Some(f) = callback.borrow().as_ref() {
            pending.set(request_frame(f));
        }
        Self { callback, pending }
    }

    pub fn is_running(&self) -> bool {
        self.callback.borrow().is_some()
    }

    pub fn stop(&self) {
        if let Some(id) = self.pending.take() {
            if let Some(w) = window() {
                let _ = w.cancel_animation_frame(id);
            }
        }
        // Breaks the closure's Rc cycle back to `callback`.
        let _ = self.callback.borrow_mut().take();
    }
}

// --- Animator -----------------------------------------------------------------

struct AnimatorState {
    container: HtmlElement,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    field: ParticleField,
    rng: SmallRng,
}

impl AnimatorState {
    /// Match the canvas to the container box; returns the new bounds.
    fn fit_canvas(&self) -> Bounds {
        let rect = self.container.get_bounding_client_rect();
        let bounds = Bounds::new(rect.width(), rect.height());
        self.canvas.set_width(bounds.width as u32);
        self.canvas.set_height(bounds.height as u32);
        bounds
    }

    fn frame(&mut self) {
        self.field.tick();
        self.field.render(&mut self.ctx);
    }

    fn on_resize(&mut self) {
        let bounds = self.fit_canvas();
        self.field.reseed(bounds, &mut self.rng);
    }
}

/// Particle backdrop attached to one container element.
#[wasm_bindgen]
pub struct ParticleAnimator {
    canvas: Option<HtmlCanvasElement>,
    frame: Option<FrameLoop>,
    resize: Option<Closure<dyn FnMut()>>,
}

/// Theme color from the document root's `--secondary-color`, if any.
fn theme_color() -> Option<String> {
    let win = window()?;
    let root = win.document()?.document_element()?;
    let style = win.get_computed_style(&root).ok()??;
    style
        .get_property_value(THEME_COLOR_VAR)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ParticleAnimator {
    pub fn new(container: &HtmlElement, options: ParticleOptions) -> Result<Self> {
        let mut animator = Self { canvas: None, frame: None, resize: None };
        if let Err(e) = animator.attach(container, options) {
            animator.destroy();
            return Err(e);
        }
        Ok(animator)
    }

    fn attach(&mut self, container: &HtmlElement, options: ParticleOptions) -> Result<()> {
        let win = window().ok_or(GalleryError::NoGlobal("window"))?;
        let doc = win.document().ok_or(GalleryError::NoGlobal("document"))?;

        let theme = theme_color();
        let color = Rgb::resolve([options.color.as_deref(), theme.as_deref()]);

        let canvas: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into().map_err(JsValue::from)?;
        canvas.set_attribute("style", CANVAS_STYLE)?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| GalleryError::Js("2d context unavailable".into()))?
            .dyn_into()
            .map_err(JsValue::from)?;

        // The absolutely-positioned canvas needs a positioned container.
        let position = win
            .get_computed_style(container)?
            .and_then(|s| s.get_property_value("position").ok());
        if position.as_deref() == Some("static") {
            container.style().set_property("position", "relative")?;
        }
        container.append_child(&canvas)?;
        self.canvas = Some(canvas.clone());

        let mut rng = SmallRng::from_entropy();
        let rect = container.get_bounding_client_rect();
        let bounds = Bounds::new(rect.width(), rect.height());
        let field = ParticleField::new(bounds, options, color, &mut rng);
        let state = Rc::new(RefCell::new(AnimatorState {
            container: container.clone(),
            canvas,
            ctx,
            field,
            rng,
        }));
        state.borrow().fit_canvas();
        log::debug!("particles: {} at {}x{} in {color}", state.borrow().field.particles().len(), bounds.width, bounds.height);

        let frame_state = state.clone();
        self.frame = Some(FrameLoop::start(move |_ts| {
            frame_state.borrow_mut().frame();
        }));

        let resize_state = state;
        let resize = Closure::wrap(Box::new(move || {
            resize_state.borrow_mut().on_resize();
        }) as Box<dyn FnMut()>);
        win.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;
        self.resize = Some(resize);
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.frame.as_ref().is_some_and(FrameLoop::is_running)
    }
}

#[wasm_bindgen]
impl ParticleAnimator {
    /// JS constructor: `new ParticleAnimator(element, optionsJson?)`.
    #[wasm_bindgen(constructor)]
    pub fn from_js(
        container: HtmlElement,
        options_json: Option<String>,
    ) -> std::result::Result<ParticleAnimator, JsValue> {
        let options = ParticleOptions::from_json_or(options_json.as_deref(), ParticleOptions::default());
        Ok(ParticleAnimator::new(&container, options)?)
    }

    /// Stop the loop, drop the resize listener and remove the canvas.
    /// Safe to call more than once.
    pub fn destroy(&mut self) {
        if let Some(frame) = self.frame.take() {
            frame.stop();
        }
        if let Some(resize) = self.resize.take() {
            if let Some(w) = window() {
                let _ = w.remove_event_listener_with_callback("resize", resize.as_ref().unchecked_ref());
            }
        }
        if let Some(canvas) = self.canvas.take() {
            canvas.remove();
        }
    }
}

impl Drop for ParticleAnimator {
    fn drop(&mut self) {
        self.destroy();
    }
}

// --- Section auto-initialization ------------------------------------------------

thread_local! {
    static ANIMATORS: RefCell<Vec<ParticleAnimator>> = const { RefCell::new(Vec::new()) };
}

/// Attach an animator to every element matching `selector` that is not
/// already marked initialized. A failing container is logged and skipped.
/// Returns how many animators were started.
pub fn init_section_particles(selector: &str, options: &ParticleOptions) -> Result<usize> {
    let doc = window()
        .and_then(|w| w.document())
        .ok_or(GalleryError::NoGlobal("document"))?;
    let nodes = doc.query_selector_all(selector)?;
    let mut started = 0;
    for i in 0..nodes.length() {
        let Some(section) = nodes.get(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        if section.has_attribute(INITIALIZED_ATTR) {
            continue;
        }
        match ParticleAnimator::new(&section, options.clone()) {
            Ok(animator) => {
                let _ = section.set_attribute(INITIALIZED_ATTR, "true");
                ANIMATORS.with(|a| a.borrow_mut().push(animator));
                started += 1;
            }
            Err(e) => log::warn!("particles skipped for `{selector}` #{i}: {e}"),
        }
    }
    if started == 0 {
        log::debug!("particles: nothing to initialize for `{selector}`");
    }
    Ok(started)
}

/// Tear down every auto-initialized animator.
pub fn destroy_all() {
    let animators = ANIMATORS.with(|a| std::mem::take(&mut *a.borrow_mut()));
    for mut animator in animators {
        animator.destroy();
    }
}
