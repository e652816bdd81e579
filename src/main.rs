//! Spin Wheel entry point
//!
//! On wasm32, mounts a demo wheel into the page's `#wheel` element. Natively,
//! runs a headless spin at 60 fps and logs the events it emits.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use spin_wheel::{ItemConfig, WheelConfig};

fn demo_config() -> WheelConfig {
    let labels = ["Apple", "Banana", "Cherry", "Date", "Elderberry", "Fig", "Grape", "Honeydew"];
    WheelConfig {
        items: labels.iter().map(|l| ItemConfig::new(*l)).collect(),
        item_background_colors: ["#ffc93c", "#66bfbf", "#a2d5f2", "#515070", "#43658b", "#ed6663", "#d54062"]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        item_label_colors: vec!["#fff".into()],
        line_width: 1.0,
        border_width: 4.0,
        ..Default::default()
    }
}

#[cfg(target_arch = "wasm32")]
mod web_demo {
    use std::cell::RefCell;

    use spin_wheel::platform::web::WebWheel;
    use spin_wheel::{Result, WheelError, WheelEvent};

    thread_local! {
        static DEMO: RefCell<Option<WebWheel>> = const { RefCell::new(None) };
    }

    pub fn run() -> Result<()> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
        log::info!("Spin Wheel starting...");

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| WheelError::Surface("no document".into()))?;
        let Some(container) = document.get_element_by_id("wheel") else {
            log::info!("No #wheel element; skipping demo mount");
            return Ok(());
        };

        let wheel = WebWheel::add(&container, super::demo_config())?;
        wheel.set_event_handler(|event| match event {
            WheelEvent::Rest { current_index, .. } => log::info!("Landed on {current_index:?}"),
            WheelEvent::Spin(spin) => log::info!("Spin via {:?} at {:.0}°/s", spin.method, spin.rotation_speed),
            WheelEvent::CurrentIndexChange { .. } => {}
        });
        DEMO.with(|demo| *demo.borrow_mut() = Some(wheel));
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> std::result::Result<(), JsError> {
    web_demo::run()?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use spin_wheel::renderer::{RecordingSurface, render};
    use spin_wheel::{Wheel, WheelEvent, tick};

    env_logger::init();
    log::info!("Spin Wheel (native) starting...");

    let mut wheel = Wheel::new(WheelConfig {
        seed: Some(2024),
        ..demo_config()
    });
    let mut surface = RecordingSurface::new(500.0, 500.0);
    wheel.refresh_layout(500.0, 500.0, 1.0, &mut surface);
    wheel.spin(400.0);

    const FRAME_MS: f64 = 1000.0 / 60.0;
    let mut now = 0.0;
    let mut landed = None;
    while now < 60_000.0 && landed.is_none() {
        tick(&mut wheel, now);
        for event in wheel.drain_events() {
            match event {
                WheelEvent::Rest { current_index, rotation } => {
                    log::info!("Rest at {rotation:.2}° after {:.2}s", now / 1000.0);
                    landed = Some(current_index);
                }
                WheelEvent::CurrentIndexChange { current_index } => log::debug!("Pointer over {current_index:?}"),
                WheelEvent::Spin(_) => {}
            }
        }
        now += FRAME_MS;
    }

    render(&wheel, &mut surface);
    log::info!("Final frame: {} draw calls", surface.ops().len());

    match landed.flatten().and_then(|i| wheel.item(i)) {
        Some(item) => println!("Landed on: {}", item.label()),
        None => println!("Wheel did not come to rest"),
    }
}
