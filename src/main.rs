//! Inventory Seller entry point
//!
//! Web: canvas + WebGPU shapes, DOM overlay for text and item images.
//! Native: headless autoplay session that prints a JSON summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::IVec2;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        Document, HtmlCanvasElement, HtmlElement, HtmlImageElement, MouseEvent, Response, TouchEvent,
    };

    use inventory_seller::assets::{MANIFEST_FILE, ManifestAssets};
    use inventory_seller::renderer::{RenderState, Scene, Visual, build_scene, shapes};
    use inventory_seller::settings::Settings;
    use inventory_seller::sim::{GameState, InputEvent, Rules, TickInput, TickStatus, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        /// Events since the last tick, oldest first
        pending: Vec<InputEvent>,
        pointer: IVec2,
        /// Logical game pixels per CSS pixel
        scale: (f32, f32),
        start_time: f64,
        running: bool,
        /// `<img>` elements reused for item bitmaps
        image_pool: Vec<HtmlImageElement>,
    }

    impl Game {
        fn new(state: GameState, start_time: f64) -> Self {
            Self {
                state,
                render_state: None,
                pending: Vec::new(),
                pointer: IVec2::ZERO,
                scale: (1.0, 1.0),
                start_time,
                running: true,
                image_pool: Vec::new(),
            }
        }

        /// CSS offset position to game coordinates
        fn to_game(&self, x: f32, y: f32) -> IVec2 {
            IVec2::new((x * self.scale.0) as i32, (y * self.scale.1) as i32)
        }

        /// Run one simulation tick with everything queued since the last frame
        fn update(&mut self, time: f64) {
            let input = TickInput {
                events: std::mem::take(&mut self.pending),
                pointer: self.pointer,
                now_ms: (time - self.start_time).max(0.0) as u64,
            };
            let outcome = tick(&mut self.state, &input);
            for event in &outcome.events {
                log::info!("{event:?}");
            }
            if outcome.status == TickStatus::Quit {
                self.running = false;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let scene = build_scene(&self.state, self.pointer);

            if let Some(ref mut render_state) = self.render_state {
                let vertices = shapes::scene_vertices(&scene);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }

            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                self.update_hud(&document, &scene);
                self.update_images(&document, &scene);
            }
        }

        /// Total, recent sales, tooltip
        fn update_hud(&self, document: &Document, scene: &Scene) {
            if let Some(el) = document.get_element_by_id("hud-total") {
                el.set_text_content(Some(&scene.total_text));
            }

            if let Some(el) = document.get_element_by_id("hud-sales") {
                el.set_text_content(Some(&scene.sales_lines.join("\n")));
            }

            if let Some(el) = element::<HtmlElement>(document, "tooltip") {
                match &scene.tooltip {
                    Some(tip) => {
                        el.set_text_content(Some(&tip.text));
                        let style = el.style();
                        let _ = style.set_property("left", &self.css_px_x(tip.anchor.x));
                        let _ = style.set_property("top", &self.css_px_y(tip.anchor.y));
                        let _ = el.set_attribute("class", "");
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }
        }

        /// Position one `<img>` per image sprite, hide the rest
        fn update_images(&mut self, document: &Document, scene: &Scene) {
            let Some(overlay) = document.get_element_by_id("overlay") else {
                return;
            };

            let mut used = 0;
            for sprite in &scene.sprites {
                let Visual::Image { handle, .. } = &sprite.visual else {
                    continue;
                };
                if used == self.image_pool.len() {
                    let Some(img) = document
                        .create_element("img")
                        .ok()
                        .and_then(|e| e.dyn_into::<HtmlImageElement>().ok())
                    else {
                        return;
                    };
                    img.set_alt("");
                    let _ = overlay.append_child(&img);
                    self.image_pool.push(img);
                }

                let img = &self.image_pool[used];
                if img.get_attribute("src").as_deref() != Some(handle.path.as_str()) {
                    img.set_src(&handle.path);
                }
                let style = img.style();
                let _ = style.set_property("display", "block");
                let _ = style.set_property("left", &self.css_px_x(sprite.rect.x));
                let _ = style.set_property("top", &self.css_px_y(sprite.rect.y));
                let _ = style.set_property("width", &self.css_px_x(sprite.rect.w));
                let _ = style.set_property("height", &self.css_px_y(sprite.rect.h));
                // Dragged item above idle ones
                let _ = style.set_property("z-index", if sprite.dragged { "2" } else { "1" });
                used += 1;
            }

            for img in &self.image_pool[used..] {
                let _ = img.style().set_property("display", "none");
            }
        }

        fn css_px_x(&self, x: i32) -> String {
            format!("{}px", x as f32 / self.scale.0)
        }

        fn css_px_y(&self, y: i32) -> String {
            format!("{}px", y as f32 / self.scale.1)
        }
    }

    fn element<T: JsCast>(document: &Document, id: &str) -> Option<T> {
        document.get_element_by_id(id)?.dyn_into::<T>().ok()
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Inventory Seller starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let settings = Settings::from_query(&window.location().search().unwrap_or_default());
        let assets = fetch_manifest(&window, &settings.asset_dir).await;
        let rules = Rules::from_settings(&settings, &assets);

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let start = window.performance().map(|p| p.now()).unwrap_or(0.0);
        let game = Rc::new(RefCell::new(Game::new(GameState::new(rules, seed, 0), start)));
        game.borrow_mut().scale = (
            settings.window_width as f32 / client_w as f32,
            settings.window_height as f32 / client_h as f32,
        );

        log::info!(
            "Game initialized with seed: {} ({} variant)",
            seed,
            settings.variant.as_str()
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let view_size = (settings.window_width as f32, settings.window_height as f32);
        let render_state = RenderState::new(surface, &adapter, width, height, view_size).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_zone_labels(&document, &game.borrow());
        setup_input_handlers(&canvas, game.clone());

        request_animation_frame(game);

        log::info!("Inventory Seller running!");
    }

    /// Images listed in the served manifest; none when it is missing
    async fn fetch_manifest(window: &web_sys::Window, asset_dir: &str) -> ManifestAssets {
        let url = format!("{}/{}", asset_dir.trim_end_matches('/'), MANIFEST_FILE);
        let parsed = match fetch_text(window, &url).await {
            Some(json) => ManifestAssets::from_manifest_json(asset_dir, &json),
            None => {
                log::warn!("No image manifest at {url}, items use flat colors");
                return ManifestAssets::new(asset_dir, std::iter::empty::<String>());
            }
        };
        parsed.unwrap_or_else(|e| {
            log::warn!("{e}; items use flat colors");
            ManifestAssets::new(asset_dir, std::iter::empty::<String>())
        })
    }

    async fn fetch_text(window: &web_sys::Window, url: &str) -> Option<String> {
        let response = JsFuture::from(window.fetch_with_str(url)).await.ok()?;
        let response: Response = response.dyn_into().ok()?;
        if !response.ok() {
            return None;
        }
        let text = JsFuture::from(response.text().ok()?).await.ok()?;
        text.as_string()
    }

    /// Center the zone labels on their zones
    fn setup_zone_labels(document: &Document, game: &Game) {
        let scene = build_scene(&game.state, game.pointer);
        for (id, zone) in [("label-sell", scene.zones.first()), ("label-trash", scene.zones.get(1))] {
            let Some(el) = element::<HtmlElement>(document, id) else {
                continue;
            };
            match zone {
                Some(zone) => {
                    let center = zone.rect.center();
                    let style = el.style();
                    let _ = style.set_property("left", &game.css_px_x(center.x));
                    let _ = style.set_property("top", &game.css_px_y(center.y));
                    let [r, g, b, _] = zone.color.to_rgba();
                    let _ = style.set_property(
                        "color",
                        &format!("rgb({}, {}, {})", r * 255.0, g * 255.0, b * 255.0),
                    );
                    el.set_text_content(Some(zone.label));
                    let _ = el.set_attribute("class", "zone-label");
                }
                None => {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Mouse down - grab
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = g.to_game(event.offset_x() as f32, event.offset_y() as f32);
                g.pointer = pos;
                g.pending.push(InputEvent::PointerDown(pos));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move - pointer sample
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.pointer = g.to_game(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up - on the window so releasing outside the canvas still drops
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().pending.push(InputEvent::PointerUp);
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start - grab
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let mut g = game.borrow_mut();
                    let pos = g.to_game(
                        touch.client_x() as f32 - rect.left() as f32,
                        touch.client_y() as f32 - rect.top() as f32,
                    );
                    g.pointer = pos;
                    g.pending.push(InputEvent::PointerDown(pos));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let mut g = game.borrow_mut();
                    g.pointer = g.to_game(
                        touch.client_x() as f32 - rect.left() as f32,
                        touch.client_y() as f32 - rect.top() as f32,
                    );
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end - drop
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().pending.push(InputEvent::PointerUp);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Page going away ends the session
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().pending.push(InputEvent::Quit);
            });
            let _ = window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            if !g.running {
                log::info!(
                    "Session ended with ${} total",
                    g.state.session.total_money()
                );
                return;
            }
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use inventory_seller::assets::DirAssets;
    use inventory_seller::headless::run_autoplay;
    use inventory_seller::settings::Settings;
    use inventory_seller::sim::{GameState, Rules};

    /// Five simulated minutes at 60 Hz
    const DEFAULT_FRAMES: u64 = 5 * 60 * 60;

    pub fn run() {
        env_logger::init();
        log::info!("Inventory Seller (native, headless) starting...");

        let settings_path = std::env::var_os("INVENTORY_SELLER_SETTINGS").map(PathBuf::from);
        let settings = Settings::load_or_default(settings_path.as_deref());

        let frames = env_parse("INVENTORY_SELLER_FRAMES").unwrap_or(DEFAULT_FRAMES);
        let seed = env_parse("INVENTORY_SELLER_SEED").unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default()
        });

        let assets = DirAssets::new(&settings.asset_dir);
        let rules = Rules::from_settings(&settings, &assets);
        let mut state = GameState::new(rules, seed, 0);

        log::info!(
            "Seed {}, {} variant, {} frames",
            seed,
            settings.variant.as_str(),
            frames
        );

        let summary = run_autoplay(&mut state, frames, 0);
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize summary: {e}"),
        }
    }

    fn env_parse(key: &str) -> Option<u64> {
        let raw = std::env::var(key).ok()?;
        match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring {key}={raw:?} (not a number)");
                None
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
