// Browser side of the backdrop: a 2D canvas surface, requestAnimationFrame
// scheduling, the window resize listener, the scene viewer element and the
// `Background` class exported to JS

use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::{Rc, Weak};

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, Node, Window};

use crate::color::Paint;
use crate::config::BackgroundConfig;
use crate::error::{describe_js, BackgroundError, HostError, SceneError};
use crate::host::ViewportHost;
use crate::layers::Layer;
use crate::logging::Timer;
use crate::scene::{ExternalScene, SceneLayer};
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::surface::{Bounds, Surface};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;
type WebHost = ViewportHost<CanvasSurface, AnimationFrames>;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    // None when the canvas cannot hand out a 2D context
    pub fn acquire(canvas: &HtmlCanvasElement) -> Option<CanvasSurface> {
        let context = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(CanvasSurface {
            canvas: canvas.clone(),
            context,
        })
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Bounds {
        Bounds::new(self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn resize(&mut self, bounds: Bounds) {
        let (width, height) = bounds.pixels();
        if self.canvas.width() != width || self.canvas.height() != height {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
        }
    }

    fn clear(&mut self) {
        let size = self.size();
        self.context.clear_rect(0.0, 0.0, size.width, size.height);
    }

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, paint: Paint) {
        self.context.begin_path();
        if let Err(err) = self.context.arc(center[0], center[1], radius, 0.0, PI * 2.0) {
            log::warn!("skipping particle at {:?}: {}", center, describe_js(&err));
            return;
        }
        self.context.set_fill_style(&JsValue::from_str(&paint.to_css()));
        self.context.fill();
    }
}

pub struct AnimationFrames {
    window: Window,
    callback: FrameCallback,
}

impl FrameScheduler for AnimationFrames {
    fn request_frame(&mut self) -> Result<FrameHandle, HostError> {
        let slot = self.callback.borrow();
        let callback = slot
            .as_ref()
            .ok_or_else(|| HostError::Schedule("frame callback already released".to_owned()))?;
        let function: &js_sys::Function = callback.as_ref().unchecked_ref();
        let handle = self
            .window
            .request_animation_frame(function)
            .map_err(|err| HostError::Schedule(describe_js(&err)))?;
        Ok(FrameHandle(handle))
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(err) = self.window.cancel_animation_frame(handle.0) {
            log::warn!("failed to cancel frame {}: {}", handle.0, describe_js(&err));
        }
    }
}

/// Hosts the scene in a `<spline-viewer>` element placed just below the
/// particle canvas. The page is expected to load the viewer's script; if
/// it does not, the element stays an empty box.
pub struct SplineViewer {
    document: Document,
    parent: Element,
    before: Option<Element>,
    element: Option<Element>,
}

impl SplineViewer {
    pub fn new(document: Document, parent: Element, before: Option<Element>) -> SplineViewer {
        SplineViewer {
            document,
            parent,
            before,
            element: None,
        }
    }
}

fn attach_error(err: JsValue) -> SceneError {
    SceneError::Attach(describe_js(&err))
}

impl ExternalScene for SplineViewer {
    fn mount(&mut self, url: &str) -> Result<(), SceneError> {
        let element = self
            .document
            .create_element("spline-viewer")
            .map_err(attach_error)?;
        element.set_attribute("url", url).map_err(attach_error)?;
        element
            .set_attribute("style", &Layer::Scene.css())
            .map_err(attach_error)?;
        let before: Option<&Node> = self.before.as_ref().map(|el| el.as_ref());
        self.parent
            .insert_before(&element, before)
            .map_err(attach_error)?;
        self.element = Some(element);
        Ok(())
    }

    fn unmount(&mut self) {
        if let Some(element) = self.element.take() {
            element.remove();
        }
    }
}

fn js_error(err: JsValue) -> BackgroundError {
    BackgroundError::Js(describe_js(&err))
}

fn window_viewport(window: &Window) -> Bounds {
    let dimension = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Bounds::new(dimension(window.inner_width()), dimension(window.inner_height()))
}

fn set_style(element: &Element, css: &str) -> Result<(), BackgroundError> {
    element.set_attribute("style", css).map_err(js_error)
}

// Inline style an element carried before the backdrop restyled it
struct SavedStyle {
    element: Element,
    previous: Option<String>,
}

impl SavedStyle {
    fn apply(element: &Element, css: &str) -> Result<SavedStyle, BackgroundError> {
        let previous = element.get_attribute("style");
        set_style(element, css)?;
        Ok(SavedStyle {
            element: element.clone(),
            previous,
        })
    }

    fn restore(self) {
        let result = match &self.previous {
            Some(css) => self.element.set_attribute("style", css),
            None => self.element.remove_attribute("style"),
        };
        if let Err(err) = result {
            log::warn!("failed to restore inline style: {}", describe_js(&err));
        }
    }
}

// Restyled elements land in `saved` as they change so a partial failure can
// still be undone
fn apply_layer_styles(container: &Element, canvas: &Element, saved: &mut Vec<SavedStyle>) -> Result<(), BackgroundError> {
    saved.push(SavedStyle::apply(container, &Layer::Backdrop.css())?);
    saved.push(SavedStyle::apply(canvas, &Layer::Particles.css())?);
    Ok(())
}

fn frame_loop(host: Weak<RefCell<WebHost>>) -> Closure<dyn FnMut()> {
    Closure::wrap(Box::new(move || {
        let host = match host.upgrade() {
            Some(host) => host,
            None => return,
        };
        let _timer = if cfg!(feature = "frame-timing") {
            Some(Timer::new("particle-backdrop frame"))
        } else {
            None
        };
        let result = host.borrow_mut().tick();
        if let Err(err) = result {
            log::error!("particle animation stopped: {}", err);
        }
    }) as Box<dyn FnMut()>)
}

fn listen_resize(window: &Window, host: &Rc<RefCell<WebHost>>) -> Result<Closure<dyn FnMut()>, BackgroundError> {
    let host = Rc::downgrade(host);
    let target = window.clone();
    let listener = Closure::wrap(Box::new(move || {
        if let Some(host) = host.upgrade() {
            host.borrow_mut().resize(window_viewport(&target));
        }
    }) as Box<dyn FnMut()>);
    window
        .add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())
        .map_err(js_error)?;
    Ok(listener)
}

// Elements land in `elements` as they are attached so a partial failure can
// still be cleaned up
fn attach_decorations(document: &Document, container: &Element, elements: &mut Vec<Element>) -> Result<(), BackgroundError> {
    for decoration in Layer::decorations() {
        let element = document.create_element("div").map_err(js_error)?;
        set_style(&element, &decoration.css())?;
        element.set_attribute("aria-hidden", "true").map_err(js_error)?;
        container.append_child(&element).map_err(js_error)?;
        elements.push(element);
    }
    Ok(())
}

struct Mounted {
    window: Window,
    host: Rc<RefCell<WebHost>>,
    frame_callback: FrameCallback,
    resize_listener: Option<Closure<dyn FnMut()>>,
    scene: SceneLayer<SplineViewer>,
    decorations: Vec<Element>,
    styles: Vec<SavedStyle>,
}

impl Mounted {
    fn start(config: &BackgroundConfig, container: &Element, canvas: &HtmlCanvasElement) -> Result<Mounted, BackgroundError> {
        let window = web_sys::window().ok_or(BackgroundError::NoWindow)?;
        let document = window.document().ok_or(BackgroundError::NoDocument)?;

        let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
        let scheduler = AnimationFrames {
            window: window.clone(),
            callback: frame_callback.clone(),
        };
        let host = Rc::new(RefCell::new(WebHost::new(config.clone(), scheduler)));
        *frame_callback.borrow_mut() = Some(frame_loop(Rc::downgrade(&host)));

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let surface = CanvasSurface::acquire(canvas);
        let running = host
            .borrow_mut()
            .mount(surface, window_viewport(&window), &mut rng);

        let resize_listener = match running {
            Ok(true) => match listen_resize(&window, &host) {
                Ok(listener) => Some(listener),
                Err(err) => {
                    host.borrow_mut().unmount();
                    frame_callback.borrow_mut().take();
                    return Err(err);
                }
            },
            Ok(false) => None,
            Err(err) => {
                frame_callback.borrow_mut().take();
                return Err(err.into());
            }
        };

        let canvas_element: &Element = canvas;
        let mut scene = SceneLayer::new(SplineViewer::new(
            document.clone(),
            container.clone(),
            Some(canvas_element.clone()),
        ));
        scene.activate(config.scene_url.as_deref());

        let mut mounted = Mounted {
            window,
            host,
            frame_callback,
            resize_listener,
            scene,
            decorations: Vec::new(),
            styles: Vec::new(),
        };
        let attached = apply_layer_styles(container, canvas_element, &mut mounted.styles)
            .and_then(|()| attach_decorations(&document, container, &mut mounted.decorations));
        match attached {
            Ok(()) => Ok(mounted),
            Err(err) => {
                mounted.stop();
                Err(err)
            }
        }
    }

    fn stop(mut self) {
        self.host.borrow_mut().unmount();
        if let Some(listener) = self.resize_listener.take() {
            if let Err(err) = self
                .window
                .remove_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())
            {
                log::warn!("failed to remove resize listener: {}", describe_js(&err));
            }
        }
        self.frame_callback.borrow_mut().take();
        self.scene.deactivate();
        for element in self.decorations.drain(..) {
            element.remove();
        }
        for style in self.styles.drain(..).rev() {
            style.restore();
        }
    }
}

/// Animated page backdrop: particle canvas, 3D scene and static overlays.
#[wasm_bindgen]
pub struct Background {
    config: BackgroundConfig,
    mounted: Option<Mounted>,
}

#[wasm_bindgen]
impl Background {
    /// Takes an optional JSON configuration; omitted fields keep their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<Background, JsValue> {
        let config = match config_json {
            Some(json) => BackgroundConfig::from_json(&json).map_err(BackgroundError::from)?,
            None => BackgroundConfig::default(),
        };
        Ok(Background {
            config,
            mounted: None,
        })
    }

    /// Lays out the backdrop inside `container` and starts the animation
    /// on `canvas`, which must already be a child of `container`.
    pub fn mount(&mut self, container: Element, canvas: HtmlCanvasElement) -> Result<(), JsValue> {
        if self.mounted.is_some() {
            return Err(BackgroundError::from(HostError::AlreadyMounted).into());
        }
        self.mounted = Some(Mounted::start(&self.config, &container, &canvas)?);
        Ok(())
    }

    pub fn unmount(&mut self) {
        if let Some(mounted) = self.mounted.take() {
            mounted.stop();
        }
    }

    pub fn is_running(&self) -> bool {
        self.mounted
            .as_ref()
            .map_or(false, |mounted| mounted.host.borrow().is_running())
    }

    pub fn particle_count(&self) -> usize {
        self.mounted
            .as_ref()
            .map_or(0, |mounted| mounted.host.borrow().particles().len())
    }

    pub fn scene_visible(&self) -> bool {
        self.mounted
            .as_ref()
            .map_or(false, |mounted| mounted.scene.is_visible())
    }
}

impl Drop for Background {
    fn drop(&mut self) {
        self.unmount();
    }
}
