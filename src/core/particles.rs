//! Particle field engine for the hero background
//!
//! A fixed pool of points drifts through a shallow depth volume and is
//! perspective-projected onto a 2D surface. Nearby projected points are
//! joined by faint lines whose opacity fades with distance.
//!
//! The engine is plain data plus free functions (`advance`, `project`,
//! `link_opacity`); drawing goes through the [`Surface`] trait so the same
//! tick runs against a browser 2D context, the headless CLI, or a test
//! recorder.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use super::geometry::{Point, Rgb, Rgba};

/// Particles allocated when no pool size is configured
pub const DEFAULT_POOL_SIZE: usize = 100;
/// Depth of the volume; particles live in [0, MAX_DEPTH)
pub const MAX_DEPTH: f32 = 1000.0;
/// Depth consumed per tick
pub const DEPTH_STEP: f32 = 2.0;
/// Per-axis speed bound, in pixels per tick
pub const MAX_SPEED: f32 = 0.25;
pub const MIN_RADIUS: f32 = 1.0;
pub const MAX_RADIUS: f32 = 3.0;
/// Projected distance under which two particles are linked
pub const LINK_DISTANCE: f32 = 150.0;
/// Link alpha at zero distance
pub const LINK_MAX_ALPHA: f32 = 0.2;
pub const LINK_WIDTH: f32 = 1.0;
/// Dot alpha for a particle at depth 0
pub const DOT_MAX_ALPHA: f32 = 0.6;

pub const PARTICLE_COLOR: Rgb = Rgb::new(59, 130, 246);
/// Partial repaint applied before each tick; leaves motion trails
pub const TRAIL_TINT: Rgba = Rgba { r: 10, g: 25, b: 47, a: 0.1 };

/// Drawing-surface extent in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both extents strictly positive
    pub fn is_drawable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }
}

/// One point of the field. Plain record, mutated only by [`advance`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    /// Depth in [0, MAX_DEPTH); 0 is nearest to the viewer
    pub z: f32,
    pub vx: f32,
    pub vy: f32,
    /// Base radius in [MIN_RADIUS, MAX_RADIUS)
    pub size: f32,
}

impl Particle {
    /// Fresh particle with uniformly random position, depth, velocity and size.
    ///
    /// Non-positive bounds place the particle at the origin instead of
    /// sampling an empty range.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: Bounds) -> Self {
        Self {
            x: rng.gen::<f32>() * bounds.width.max(0.0),
            y: rng.gen::<f32>() * bounds.height.max(0.0),
            z: rng.gen::<f32>() * MAX_DEPTH,
            vx: (rng.gen::<f32>() - 0.5) * 2.0 * MAX_SPEED,
            vy: (rng.gen::<f32>() - 0.5) * 2.0 * MAX_SPEED,
            size: MIN_RADIUS + rng.gen::<f32>() * (MAX_RADIUS - MIN_RADIUS),
        }
    }
}

/// Where and how a particle lands on the surface for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub position: Point,
    pub radius: f32,
    /// 1 at depth 0, approaching 0 at MAX_DEPTH
    pub opacity: f32,
    pub scale: f32,
}

/// A line between two projected particles (indices into the pool)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub distance: f32,
    pub opacity: f32,
}

/// Per-tick counters returned by [`ParticleField::advance_and_render`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub respawned: usize,
    pub circles: usize,
    pub links: usize,
}

/// Drawing target for one tick
pub trait Surface {
    /// Blend the whole surface toward `tint` (alpha is the blend amount).
    fn fade(&mut self, tint: Rgba, bounds: Bounds);
    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba);
    fn stroke_line(&mut self, from: Point, to: Point, width: f32, color: Rgba);
}

/// Velocity after an elastic bounce against [0, extent].
///
/// Outside the range the returned sign always points back inside, also for
/// particles stranded far out after the surface shrank.
#[inline]
pub fn reflect(position: f32, velocity: f32, extent: f32) -> f32 {
    if position < 0.0 {
        velocity.abs()
    } else if position > extent {
        -velocity.abs()
    } else {
        velocity
    }
}

/// Advance one particle by one tick. Returns true if it respawned.
pub fn advance<R: Rng + ?Sized>(p: &mut Particle, bounds: Bounds, rng: &mut R) -> bool {
    p.z -= DEPTH_STEP;
    let respawned = p.z <= 0.0;
    if respawned {
        *p = Particle::spawn(rng, bounds);
    }

    p.x += p.vx;
    p.y += p.vy;
    p.vx = reflect(p.x, p.vx, bounds.width);
    p.vy = reflect(p.y, p.vy, bounds.height);
    respawned
}

/// Perspective projection toward the surface center.
pub fn project(p: &Particle, bounds: Bounds) -> Projection {
    // depth is never negative, so the denominator stays >= MAX_DEPTH
    let depth = p.z.max(0.0);
    let scale = MAX_DEPTH / (MAX_DEPTH + depth);
    let center = bounds.center();
    let raw = Point::new(p.x, p.y);
    Projection {
        position: center + (raw - center) * scale,
        radius: p.size * scale,
        opacity: (1.0 - depth / MAX_DEPTH).clamp(0.0, 1.0),
        scale,
    }
}

/// Link alpha for two particles `distance` apart, or None past the threshold.
#[inline]
pub fn link_opacity(distance: f32) -> Option<f32> {
    if (0.0..LINK_DISTANCE).contains(&distance) {
        Some((1.0 - distance / LINK_DISTANCE) * LINK_MAX_ALPHA)
    } else {
        None
    }
}

/// All unordered pairs closer than [`LINK_DISTANCE`].
///
/// Quadratic in the pool size; pools are small. A spatial index would have
/// to keep the exact threshold and fade.
pub fn proximity_links(projections: &[Projection]) -> Vec<Link> {
    let mut links = Vec::new();
    for (a, pa) in projections.iter().enumerate() {
        for (offset, pb) in projections[a + 1..].iter().enumerate() {
            let distance = pa.position.distance(pb.position);
            if let Some(opacity) = link_opacity(distance) {
                links.push(Link {
                    a,
                    b: a + 1 + offset,
                    distance,
                    opacity,
                });
            }
        }
    }
    links
}

/// The particle pool plus everything needed to run ticks against it
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: Bounds,
    rng: StdRng,
    ticks: u64,
}

impl ParticleField {
    /// Allocate `pool_size` particles inside `bounds`.
    ///
    /// `seed` makes runs reproducible; None draws from OS entropy.
    pub fn new(pool_size: usize, bounds: Bounds, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let particles = (0..pool_size)
            .map(|_| Particle::spawn(&mut rng, bounds))
            .collect();

        debug!(
            pool_size,
            width = bounds.width,
            height = bounds.height,
            seeded = seed.is_some(),
            "Particle field initialized"
        );

        Self {
            particles,
            bounds,
            rng,
            ticks: 0,
        }
    }

    /// Advance every particle one tick without drawing. Returns respawn count.
    pub fn step(&mut self) -> usize {
        let bounds = self.bounds;
        let mut respawned = 0;
        for p in &mut self.particles {
            if advance(p, bounds, &mut self.rng) {
                respawned += 1;
            }
        }
        self.ticks += 1;
        respawned
    }

    /// One full tick: update the whole pool, then fade and draw it.
    pub fn advance_and_render<S: Surface + ?Sized>(&mut self, surface: &mut S) -> FrameStats {
        let respawned = self.step();
        let projections = self.projections();

        surface.fade(TRAIL_TINT, self.bounds);

        let links = proximity_links(&projections);
        for link in &links {
            surface.stroke_line(
                projections[link.a].position,
                projections[link.b].position,
                LINK_WIDTH,
                PARTICLE_COLOR.with_alpha(link.opacity),
            );
        }

        for projection in &projections {
            surface.fill_circle(
                projection.position,
                projection.radius,
                PARTICLE_COLOR.with_alpha(projection.opacity * DOT_MAX_ALPHA),
            );
        }

        trace!(
            tick = self.ticks,
            respawned,
            links = links.len(),
            "Particle tick rendered"
        );

        FrameStats {
            respawned,
            circles: projections.len(),
            links: links.len(),
        }
    }

    /// Update surface bounds. Existing particles keep their trajectories.
    ///
    /// Returns false (and changes nothing) for zero or negative extents.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        let bounds = Bounds::new(width, height);
        if !bounds.is_drawable() {
            debug!(width, height, "Ignoring resize to empty surface");
            return false;
        }
        self.bounds = bounds;
        true
    }

    pub fn projections(&self) -> Vec<Projection> {
        self.particles
            .iter()
            .map(|p| project(p, self.bounds))
            .collect()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Draw call captured by [`RecordingSurface`]
    #[derive(Clone, Debug, PartialEq)]
    enum DrawCall {
        Fade(Rgba),
        Circle { center: Point, radius: f32, color: Rgba },
        Line { from: Point, to: Point, color: Rgba },
    }

    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<DrawCall>,
    }

    impl Surface for RecordingSurface {
        fn fade(&mut self, tint: Rgba, _bounds: Bounds) {
            self.calls.push(DrawCall::Fade(tint));
        }

        fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba) {
            self.calls.push(DrawCall::Circle { center, radius, color });
        }

        fn stroke_line(&mut self, from: Point, to: Point, _width: f32, color: Rgba) {
            self.calls.push(DrawCall::Line { from, to, color });
        }
    }

    fn surface() -> Bounds {
        Bounds::new(800.0, 600.0)
    }

    fn particle(x: f32, y: f32, z: f32) -> Particle {
        Particle {
            x,
            y,
            z,
            vx: 0.1,
            vy: -0.1,
            size: 2.0,
        }
    }

    fn at(x: f32, y: f32) -> Projection {
        Projection {
            position: Point::new(x, y),
            radius: 1.0,
            opacity: 1.0,
            scale: 1.0,
        }
    }

    #[test]
    fn initialize_fills_pool_within_ranges() {
        let field = ParticleField::new(DEFAULT_POOL_SIZE, surface(), Some(7));
        assert_eq!(field.len(), 100);
        for p in field.particles() {
            assert!((0.0..800.0).contains(&p.x));
            assert!((0.0..600.0).contains(&p.y));
            assert!((0.0..MAX_DEPTH).contains(&p.z));
            assert!((-MAX_SPEED..=MAX_SPEED).contains(&p.vx));
            assert!((-MAX_SPEED..=MAX_SPEED).contains(&p.vy));
            assert!((MIN_RADIUS..MAX_RADIUS).contains(&p.size));
        }
    }

    #[test]
    fn initialize_on_empty_surface_does_not_panic() {
        let field = ParticleField::new(10, Bounds::new(0.0, -5.0), Some(1));
        assert_eq!(field.len(), 10);
        for p in field.particles() {
            assert_eq!((p.x, p.y), (0.0, 0.0));
        }
    }

    #[test]
    fn same_seed_same_field() {
        let a = ParticleField::new(20, surface(), Some(42));
        let b = ParticleField::new(20, surface(), Some(42));
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn depth_stays_in_range_over_many_ticks() {
        let mut field = ParticleField::new(DEFAULT_POOL_SIZE, surface(), Some(3));
        for _ in 0..2_000 {
            field.step();
            for p in field.particles() {
                assert!(p.z >= 0.0 && p.z < MAX_DEPTH, "depth {} out of range", p.z);
            }
        }
        assert_eq!(field.ticks(), 2_000);
    }

    #[test]
    fn respawn_fires_exactly_when_depth_runs_out() {
        let mut rng = StdRng::seed_from_u64(5);

        let mut p = particle(100.0, 100.0, 2.5);
        assert!(!advance(&mut p, surface(), &mut rng));
        assert_eq!(p.z, 0.5);

        let mut p = particle(100.0, 100.0, 2.0);
        assert!(advance(&mut p, surface(), &mut rng));
        assert!((0.0..MAX_DEPTH).contains(&p.z));
    }

    #[test]
    fn velocity_reflects_back_inside() {
        assert_eq!(reflect(-0.1, -0.2, 800.0), 0.2);
        assert_eq!(reflect(800.1, 0.2, 800.0), -0.2);
        assert_eq!(reflect(400.0, 0.2, 800.0), 0.2);
        // already heading home: sign kept
        assert_eq!(reflect(900.0, -0.2, 800.0), -0.2);

        let mut rng = StdRng::seed_from_u64(0);
        let mut p = Particle {
            x: 799.95,
            vx: 0.2,
            ..particle(0.0, 300.0, 500.0)
        };
        advance(&mut p, surface(), &mut rng);
        assert!(p.x > 800.0);
        assert_eq!(p.vx, -0.2);
    }

    #[test]
    fn projected_radius_shrinks_with_depth() {
        let bounds = surface();
        for z in [0.5, 1.0, 250.0, 999.0] {
            let proj = project(&particle(10.0, 10.0, z), bounds);
            assert!(proj.radius < 2.0, "radius at depth {z} should shrink");
            assert!(proj.scale < 1.0);
        }
        let proj = project(&particle(10.0, 10.0, 0.0), bounds);
        assert_eq!(proj.radius, 2.0);
        assert_eq!(proj.scale, 1.0);
        assert_eq!(proj.opacity, 1.0);
        assert_eq!(proj.position, Point::new(10.0, 10.0));
    }

    #[test]
    fn projection_pulls_toward_center() {
        let bounds = surface();
        let center = project(&particle(400.0, 300.0, 600.0), bounds);
        assert_eq!(center.position, Point::new(400.0, 300.0));

        let corner = project(&particle(0.0, 0.0, 1000.0 - 1000.0 / 2.0), bounds);
        // depth 500 -> scale 2/3
        assert!((corner.scale - 2.0 / 3.0).abs() < 1e-6);
        assert!((corner.position.x - (400.0 - 400.0 * 2.0 / 3.0)).abs() < 1e-3);
        assert!((corner.opacity - 0.5).abs() < 1e-6);
    }

    #[test]
    fn link_opacity_threshold_and_fade() {
        assert_eq!(link_opacity(0.0), Some(LINK_MAX_ALPHA));
        assert!(link_opacity(149.9).is_some());
        assert_eq!(link_opacity(150.0), None);
        assert_eq!(link_opacity(400.0), None);
        assert_eq!(link_opacity(f32::NAN), None);

        let mut previous = f32::INFINITY;
        for step in 0..150 {
            let alpha = link_opacity(step as f32).unwrap();
            assert!(alpha < previous, "opacity must strictly decrease");
            previous = alpha;
        }
    }

    #[test]
    fn links_only_between_close_pairs() {
        let projections = [at(0.0, 0.0), at(149.0, 0.0), at(0.0, 150.0), at(1000.0, 1000.0)];
        let links = proximity_links(&projections);
        let pairs: Vec<(usize, usize)> = links.iter().map(|l| (l.a, l.b)).collect();
        // (0,1) at 149 linked; (0,2) at exactly 150 not; (1,2) at ~211 not
        assert_eq!(pairs, vec![(0, 1)]);
        assert!((links[0].opacity - (1.0 - 149.0 / 150.0) * LINK_MAX_ALPHA).abs() < 1e-6);
    }

    #[test]
    fn resize_ignores_empty_surfaces_and_keeps_positions() {
        let mut field = ParticleField::new(10, surface(), Some(9));
        let before = field.particles().to_vec();

        assert!(!field.resize(0.0, 300.0));
        assert!(!field.resize(300.0, -1.0));
        assert_eq!(field.bounds(), surface());

        assert!(field.resize(320.0, 240.0));
        assert_eq!(field.bounds(), Bounds::new(320.0, 240.0));
        assert_eq!(field.particles(), before.as_slice());
    }

    #[test]
    fn tick_fades_then_draws_links_and_dots() {
        let mut field = ParticleField::new(30, surface(), Some(11));
        let mut recorder = RecordingSurface::default();
        let stats = field.advance_and_render(&mut recorder);

        assert_eq!(recorder.calls.first(), Some(&DrawCall::Fade(TRAIL_TINT)));
        let circles = recorder
            .calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Circle { .. }))
            .count();
        let lines = recorder
            .calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Line { .. }))
            .count();
        assert_eq!(circles, 30);
        assert_eq!(stats.circles, 30);
        assert_eq!(lines, stats.links);
        assert_eq!(recorder.calls.len(), 1 + circles + lines);

        // the draw pass reads post-update state
        let expected = proximity_links(&field.projections()).len();
        assert_eq!(stats.links, expected);
        for call in &recorder.calls {
            if let DrawCall::Circle { color, .. } = call {
                assert!(color.a <= DOT_MAX_ALPHA);
            }
            if let DrawCall::Line { from, to, color } = call {
                assert!(from.distance(*to) < LINK_DISTANCE);
                assert!(color.a <= LINK_MAX_ALPHA);
            }
        }
    }

    #[test]
    fn five_hundred_ticks_keep_pool_size() {
        let mut field = ParticleField::new(DEFAULT_POOL_SIZE, Bounds::new(1280.0, 720.0), None);
        let mut recorder = RecordingSurface::default();
        let mut respawned = 0;
        for _ in 0..500 {
            recorder.calls.clear();
            respawned += field.advance_and_render(&mut recorder).respawned;
        }
        assert_eq!(field.len(), DEFAULT_POOL_SIZE);
        assert_eq!(field.ticks(), 500);
        // 500 ticks burn 1000 depth units: every particle respawned at least once
        assert!(respawned >= DEFAULT_POOL_SIZE);
    }
}
