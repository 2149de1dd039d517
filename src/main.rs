//! Finger Breaker entry point
//!
//! The browser build runs the real game (webcam + MediaPipe). The native build
//! runs a headless demo: a synthetic camera and a sweeping fingertip play
//! through the same `App` state machine under the frame limiter.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = finger_breaker::platform::web::run().await {
        log::error!("Startup failed: {:?}", e);
        web_sys::console::error_1(&e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use finger_breaker::input::InputEvent;
    use finger_breaker::limiter::FrameLimiter;
    use finger_breaker::platform::synthetic::{SweepingHand, SyntheticCamera};
    use finger_breaker::sim::GamePhase;
    use finger_breaker::{App, ControlFlow, Settings};

    env_logger::init();
    log::info!("Finger Breaker (native) starting...");
    log::info!("Native mode is a headless demo - run with `trunk serve` for the webcam game");

    let frames: u64 = match std::env::args().nth(1) {
        Some(arg) => match arg.parse() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("usage: finger-breaker [frames]");
                std::process::exit(2);
            }
        },
        None => 600,
    };

    let settings = Settings::load();
    let mut limiter = FrameLimiter::new(settings.fps());
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let camera = SyntheticCamera::new(640, 480);
    let tracker = SweepingHand::new(seed, 90, 0.03).with_dropouts(25);
    let mut app = App::new(camera, tracker, settings);

    let start_click = InputEvent::Click(app_start_button_centre());
    let mut runs = 0u32;
    let mut best = 0u64;
    let mut elapsed = limiter.frame_duration();

    for n in 0..frames {
        limiter.begin();
        let mut events = Vec::new();
        if app.state().phase == GamePhase::Menu {
            if n > 0 {
                best = best.max(app.last_score());
            }
            runs += 1;
            log::info!("Demo run {} starting", runs);
            events.push(start_click);
        }
        if app.frame(&events, elapsed) == ControlFlow::Exit {
            break;
        }
        elapsed = limiter.wait();
    }

    best = best.max(app.state().score);
    app.frame(&[InputEvent::Quit], elapsed);
    println!(
        "{} frames, {} runs, best score {}, final level {}",
        frames,
        runs,
        best,
        app.state().level
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn app_start_button_centre() -> glam::Vec2 {
    let rect = finger_breaker::menu::Menu::default().start.rect;
    glam::Vec2::new(rect.x + rect.w / 2.0, rect.y + rect.h / 2.0)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
