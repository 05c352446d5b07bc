//! Headless CLI: runs the particle engine and a scripted map session off-screen
//!
//! Run with: cargo run --features cli --bin lab-cli
//!
//! Environment:
//! - `LAB_CONFIG`: path to a JSON site config (defaults when unset)
//! - `LAB_TICKS`: number of particle ticks to run (default 500)
//! - `LAB_FAST`: when set, run ticks back-to-back instead of at ~60 Hz
//! - `RUST_LOG`: tracing filter

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::time::{Duration, Instant};

    use lab_showcase::config::SiteConfig;
    use lab_showcase::core::{Bounds, ParticleField};
    use tracing::info;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,lab_showcase=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let config = match std::env::var("LAB_CONFIG") {
        Ok(path) => {
            let config = SiteConfig::from_file(&path)?;
            info!(path = %path, "Loaded site config");
            config
        }
        Err(_) => SiteConfig::default(),
    };
    let ticks: u64 = match std::env::var("LAB_TICKS") {
        Ok(raw) => raw.parse()?,
        Err(_) => 500,
    };
    let fast = std::env::var_os("LAB_FAST").is_some();

    let catalog = config.catalog()?;
    session::run_map_script(&catalog);

    let mut field = ParticleField::new(
        config.particles.pool_size,
        Bounds::new(1280.0, 720.0),
        config.particles.seed,
    );
    let mut surface = session::CountingSurface::default();
    let mut frame_interval = tokio::time::interval(Duration::from_millis(16));
    let mut stats_interval = tokio::time::interval(Duration::from_secs(5));
    stats_interval.tick().await;

    info!(ticks, fast, pool_size = field.len(), "Running particle field");
    let start = Instant::now();
    let mut links = 0usize;
    let mut respawned = 0usize;

    while field.ticks() < ticks {
        if fast {
            let stats = field.advance_and_render(&mut surface);
            links += stats.links;
            respawned += stats.respawned;
            continue;
        }
        tokio::select! {
            _ = frame_interval.tick() => {
                let stats = field.advance_and_render(&mut surface);
                links += stats.links;
                respawned += stats.respawned;
            }
            _ = stats_interval.tick() => {
                info!(
                    tick = field.ticks(),
                    links,
                    respawned,
                    "stats"
                );
            }
        }
    }

    let elapsed = start.elapsed();
    info!(
        ticks = field.ticks(),
        particles = field.len(),
        links,
        respawned,
        fades = surface.fades,
        circles = surface.circles,
        lines = surface.lines,
        elapsed_ms = elapsed.as_millis() as u64,
        "Particle run finished"
    );
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
mod session {
    use lab_showcase::core::view::Viewport;
    use lab_showcase::core::{Bounds, CountryCatalog, MapState, Point, Rgba, Surface};
    use tracing::{debug, info};

    /// Surface that only counts draw calls
    #[derive(Default, Debug)]
    pub struct CountingSurface {
        pub fades: u64,
        pub circles: u64,
        pub lines: u64,
    }

    impl Surface for CountingSurface {
        fn fade(&mut self, _tint: Rgba, _bounds: Bounds) {
            self.fades += 1;
        }

        fn fill_circle(&mut self, _center: Point, _radius: f32, _color: Rgba) {
            self.circles += 1;
        }

        fn stroke_line(&mut self, _from: Point, _to: Point, _width: f32, _color: Rgba) {
            self.lines += 1;
        }
    }

    /// Drive the map state the way a visitor would and log what happened.
    pub fn run_map_script(catalog: &CountryCatalog) {
        let viewport = Viewport::new(Point::ZERO, Point::new(1000.0, 500.0));
        let mut map = MapState::new();

        for _ in 0..3 {
            map.view.zoom_in();
        }
        map.view.zoom_by_wheel(-100.0);
        debug!(zoom = map.view.zoom(), "Zoomed");

        // drag across open ocean
        let ocean = map
            .view
            .content_to_screen(Point::new(60.0, 380.0), &viewport);
        map.pointer_down(catalog, ocean, &viewport);
        map.pointer_move(catalog, ocean + Point::new(-80.0, 25.0), &viewport);
        map.pointer_up();
        debug!(pan_x = map.view.pan().x, pan_y = map.view.pan().y, "Panned");

        // click every marker in turn; the last one stays selected
        for country in catalog.iter() {
            let screen = map.view.content_to_screen(country.position, &viewport);
            map.pointer_down(catalog, screen, &viewport);
            map.pointer_up();
            map.click(catalog, screen, &viewport);
        }

        info!(
            countries = catalog.len(),
            continents = catalog.continents().len(),
            selected = map.selection().id().unwrap_or("none"),
            zoom_percent = map.view.zoom_percent(),
            "Map session finished"
        );

        map.view.reset_view();
        debug!(zoom = map.view.zoom(), "View reset");
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
