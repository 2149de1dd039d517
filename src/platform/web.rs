//! Browser platform
//!
//! - `WebCamera`: getUserMedia stream played into a hidden `<video>`, read back
//!   through a 2D canvas as RGBA pixels
//! - `MediaPipeHands`: bridge to a MediaPipe `HandLandmarker` the page stores
//!   in `window.handLandmarker`
//! - DOM input handlers feeding an `InputEvent` queue
//! - `run`: requestAnimationFrame loop presenting `App` frames through wgpu

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::Clamped;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, ImageData, MediaStream,
    MediaStreamConstraints, MediaStreamTrack, MouseEvent,
};

use super::{Camera, CameraError, Hand, HandTracker, hands_from_flat};
use crate::app::{App, ControlFlow};
use crate::consts::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::frame::Frame;
use crate::input::{InputEvent, map_coordinates};
use crate::limiter::FrameLimiter;
use crate::renderer::FramePresenter;
use crate::settings::Settings;

// JS side of the hand landmarker; the page loads MediaPipe and sets window.handLandmarker
#[wasm_bindgen(inline_js = "
    export function hand_landmarker_ready() {
        return !!window.handLandmarker;
    }

    export function detect_hand_landmarks(image, timestamp) {
        const landmarker = window.handLandmarker;
        if (!landmarker) {
            return new Float32Array(0);
        }
        const result = landmarker.detectForVideo(image, timestamp);
        const out = [];
        for (const hand of result.landmarks || []) {
            for (const point of hand) {
                out.push(point.x, point.y);
            }
        }
        return new Float32Array(out);
    }

    export function close_hand_landmarker() {
        const landmarker = window.handLandmarker;
        if (landmarker) {
            landmarker.close();
            window.handLandmarker = null;
        }
    }
")]
extern "C" {
    fn hand_landmarker_ready() -> bool;
    #[wasm_bindgen(catch)]
    fn detect_hand_landmarks(image: &ImageData, timestamp: f64) -> Result<js_sys::Float32Array, JsValue>;
    fn close_hand_landmarker();
}

/// `HTMLMediaElement.HAVE_CURRENT_DATA`
const HAVE_CURRENT_DATA: u16 = 2;

fn js_error(context: &str, err: impl std::fmt::Debug) -> JsValue {
    JsValue::from_str(&format!("{}: {:?}", context, err))
}

/// Webcam through getUserMedia
pub struct WebCamera {
    stream: MediaStream,
    video: HtmlVideoElement,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    released: bool,
}

impl WebCamera {
    /// Ask for the default camera and start playing it
    pub async fn open() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let constraints = MediaStreamConstraints::new();
        constraints.set_video(&JsValue::TRUE);
        constraints.set_audio(&JsValue::FALSE);
        let promise = window
            .navigator()
            .media_devices()?
            .get_user_media_with_constraints(&constraints)?;
        let stream: MediaStream = JsFuture::from(promise).await?.dyn_into()?;

        let video: HtmlVideoElement = document.create_element("video")?.dyn_into()?;
        video.set_autoplay(true);
        video.set_muted(true);
        video.set_attribute("playsinline", "")?;
        video.set_src_object(Some(&stream));
        JsFuture::from(video.play()?).await?;

        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;

        log::info!(
            "Camera opened ({}x{})",
            video.video_width(),
            video.video_height()
        );

        Ok(Self {
            stream,
            video,
            canvas,
            context,
            released: false,
        })
    }
}

impl Camera for WebCamera {
    fn read(&mut self) -> Result<Frame, CameraError> {
        if self.released {
            return Err(CameraError::Released);
        }
        let (w, h) = (self.video.video_width(), self.video.video_height());
        if self.video.ready_state() < HAVE_CURRENT_DATA || w == 0 || h == 0 {
            return Err(CameraError::NotReady);
        }
        if self.canvas.width() != w || self.canvas.height() != h {
            self.canvas.set_width(w);
            self.canvas.set_height(h);
        }

        self.context
            .draw_image_with_html_video_element(&self.video, 0.0, 0.0)
            .map_err(|e| CameraError::ReadFailed(format!("{:?}", e)))?;
        let image = self
            .context
            .get_image_data(0.0, 0.0, w as f64, h as f64)
            .map_err(|e| CameraError::ReadFailed(format!("{:?}", e)))?;

        Frame::from_rgba(w as usize, h as usize, &image.data())
            .ok_or_else(|| CameraError::ReadFailed("unexpected image size".to_string()))
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
        self.video.set_src_object(None);
        log::info!("Camera stream stopped");
    }
}

/// MediaPipe hand landmarker, called once per frame
#[derive(Debug, Default)]
pub struct MediaPipeHands {
    last_timestamp: f64,
    closed: bool,
}

impl MediaPipeHands {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HandTracker for MediaPipeHands {
    fn detect(&mut self, frame: &Frame) -> Vec<Hand> {
        if self.closed || frame.is_empty() || !hand_landmarker_ready() {
            return Vec::new();
        }
        // detectForVideo needs strictly increasing timestamps
        let timestamp = js_sys::Date::now().max(self.last_timestamp + 1.0);
        self.last_timestamp = timestamp;

        let rgba = frame.to_rgba();
        let image = match ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(&rgba),
            frame.width as u32,
            frame.height as u32,
        ) {
            Ok(image) => image,
            Err(e) => {
                log::warn!("Could not build ImageData: {:?}", e);
                return Vec::new();
            }
        };

        match detect_hand_landmarks(&image, timestamp) {
            Ok(coords) => hands_from_flat(&coords.to_vec()),
            Err(e) => {
                log::debug!("Hand detection failed: {:?}", e);
                Vec::new()
            }
        }
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            close_hand_landmarker();
        }
    }
}

type EventQueue = Rc<RefCell<Vec<InputEvent>>>;

/// Canvas-relative mouse position in logical window units
fn logical_position(canvas: &HtmlCanvasElement, event: &MouseEvent) -> Vec2 {
    map_coordinates(
        Vec2::new(event.offset_x() as f32, event.offset_y() as f32),
        Vec2::new(canvas.client_width() as f32, canvas.client_height() as f32),
        Vec2::new(WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32),
    )
}

fn setup_input_handlers(
    window: &web_sys::Window,
    canvas: &HtmlCanvasElement,
    queue: EventQueue,
) -> Result<(), JsValue> {
    // Mouse click
    {
        let queue = queue.clone();
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let p = logical_position(&canvas_clone, &event);
            queue.borrow_mut().push(InputEvent::Click(p));
        });
        canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Mouse move (menu hover)
    {
        let queue = queue.clone();
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let p = logical_position(&canvas_clone, &event);
            queue.borrow_mut().push(InputEvent::PointerMoved(p));
        });
        canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Keyboard
    {
        let queue = queue.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            if event.key() == "Escape" {
                queue.borrow_mut().push(InputEvent::Escape);
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Tab closed or navigated away
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            queue.borrow_mut().push(InputEvent::Quit);
        });
        window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

/// Everything the animation loop touches
struct WebGame {
    app: App<WebCamera, MediaPipeHands>,
    presenter: FramePresenter,
    limiter: FrameLimiter,
    queue: EventQueue,
}

impl WebGame {
    fn step(&mut self, time: f64) -> ControlFlow {
        let Some(elapsed) = self.limiter.should_run(time) else {
            return ControlFlow::Continue;
        };
        let events: Vec<InputEvent> = self.queue.borrow_mut().drain(..).collect();
        let flow = self.app.frame(&events, elapsed);

        match self.presenter.present(self.app.frame_image()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (w, h) = self.presenter.size;
                self.presenter.resize(w, h);
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
        flow
    }
}

fn request_animation_frame(game: Rc<RefCell<WebGame>>) {
    let Some(window) = web_sys::window() else {
        game.borrow_mut().app.abort("no window to schedule the next frame");
        return;
    };
    let next = Rc::clone(&game);
    let closure = Closure::once(move |time: f64| {
        game_loop(next, time);
    });
    match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
        Ok(_) => closure.forget(),
        Err(e) => {
            log::error!("requestAnimationFrame failed: {:?}", e);
            game.borrow_mut().app.abort("animation frame could not be scheduled");
        }
    }
}

fn game_loop(game: Rc<RefCell<WebGame>>, time: f64) {
    let flow = game.borrow_mut().step(time);
    match flow {
        ControlFlow::Continue => request_animation_frame(game),
        ControlFlow::Exit => {
            log::info!("Finger Breaker stopped");
            if let Some(el) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("goodbye"))
            {
                let _ = el.set_attribute("class", "");
            }
        }
    }
}

/// Browser entry point
pub async fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info)
        .map_err(|e| js_error("logger init failed", e))?;

    log::info!("Finger Breaker starting...");

    let settings = Settings::load();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas: HtmlCanvasElement = document
        .get_element_by_id("canvas")
        .ok_or_else(|| JsValue::from_str("no canvas"))?
        .dyn_into()?;

    // Backing store at device resolution; the frame texture is scaled up
    let dpr = window.device_pixel_ratio();
    let width = (WINDOW_WIDTH as f64 * dpr) as u32;
    let height = (WINDOW_HEIGHT as f64 * dpr) as u32;
    canvas.set_width(width);
    canvas.set_height(height);

    let camera = WebCamera::open().await?;

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
        ..Default::default()
    });
    let surface = instance
        .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
        .map_err(|e| js_error("failed to create surface", e))?;
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .map_err(|e| js_error("failed to get adapter", e))?;

    log::info!("Using adapter: {:?}", adapter.get_info().name);

    let presenter = FramePresenter::new(surface, &adapter, width, height, WINDOW_WIDTH, WINDOW_HEIGHT)
        .await
        .map_err(|e| js_error("failed to get device", e))?;

    if let Some(loading) = document.get_element_by_id("loading") {
        let _ = loading.set_attribute("class", "hidden");
    }

    let queue: EventQueue = Rc::new(RefCell::new(Vec::new()));
    setup_input_handlers(&window, &canvas, queue.clone())?;

    let limiter = FrameLimiter::new(settings.fps());
    let app = App::new(camera, MediaPipeHands::new(), settings);
    let game = Rc::new(RefCell::new(WebGame {
        app,
        presenter,
        limiter,
        queue,
    }));

    request_animation_frame(game);

    log::info!("Finger Breaker running!");
    Ok(())
}
