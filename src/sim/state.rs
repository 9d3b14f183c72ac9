//! Simulation state: the figures and the window they bounce in
//!
//! Randomness comes from a seeded PCG generator so a run can be replayed.

use glam::IVec2;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::color::{PALETTE, Rgb};
use super::figure::{Figure, ShapeKind};
use super::observer::{FigureView, Frame};
use crate::consts::{FIGURE_SIZE_MAX, FIGURE_SIZE_MIN};
use crate::error::{Error, Result};

/// Seed the RNG was created from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// The model: owns every figure and the current window extents
#[derive(Debug, Clone)]
pub struct Simulation {
    figures: Vec<Figure>,
    extent: IVec2,
    size_range: (i32, i32),
    rng_state: RngState,
    rng: Pcg32,
    time_ticks: u64,
}

impl Simulation {
    /// Create a simulation holding the three starting figures
    pub fn new(seed: u64) -> Self {
        let mut sim = Self::empty(seed);
        sim.figures = vec![
            Figure::new(Rgb::YELLOW, IVec2::new(3, 2), ShapeKind::Circle, 20),
            Figure::new(Rgb::BLUE, IVec2::new(7, 1), ShapeKind::Triangle, 30),
            Figure::new(Rgb::RED, IVec2::new(2, 3), ShapeKind::Plus, 30),
        ];
        sim
    }

    /// Create a simulation with no figures
    pub fn empty(seed: u64) -> Self {
        let rng_state = RngState::new(seed);
        Self {
            figures: Vec::new(),
            extent: IVec2::ZERO,
            size_range: (FIGURE_SIZE_MIN, FIGURE_SIZE_MAX),
            rng: rng_state.to_rng(),
            rng_state,
            time_ticks: 0,
        }
    }

    /// Seed from the thread RNG, for interactive runs
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    /// Override the inclusive size range for added figures
    pub fn with_size_range(mut self, min: i32, max: i32) -> Result<Self> {
        if min <= 0 || max < min {
            return Err(Error::InvalidSizeRange { min, max });
        }
        self.size_range = (min, max);
        Ok(self)
    }

    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    pub fn len(&self) -> usize {
        self.figures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    pub fn extent(&self) -> IVec2 {
        self.extent
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Store new window extents and push them to every figure
    pub fn resize_window(&mut self, width: i32, height: i32) {
        log::debug!("Resize to {}x{} ({} figures)", width, height, self.figures.len());
        self.extent = IVec2::new(width, height);
        for figure in &mut self.figures {
            figure.set_limits(width, height);
        }
    }

    /// Append a figure with a random palette color and random size.
    ///
    /// Returns its index (its place in the z-order).
    pub fn add_figure(&mut self, dx: i32, dy: i32, shape: ShapeKind) -> usize {
        let color = *PALETTE.choose(&mut self.rng).unwrap_or(&Rgb::BLUE);
        let (min, max) = self.size_range;
        let size = self.rng.random_range(min..=max);

        self.push_figure(Figure::new(color, IVec2::new(dx, dy), shape, size))
    }

    /// `add_figure` with the shape given by name
    pub fn add_figure_named(&mut self, dx: i32, dy: i32, shape: &str) -> Result<usize> {
        let shape: ShapeKind = shape.parse()?;
        Ok(self.add_figure(dx, dy, shape))
    }

    /// Append an already built figure, applying the current extents
    pub fn push_figure(&mut self, mut figure: Figure) -> usize {
        figure.set_limits(self.extent.x, self.extent.y);
        log::debug!(
            "Added {} size {} color {} velocity {}",
            figure.shape(),
            figure.size(),
            figure.color().to_hex(),
            figure.velocity()
        );
        self.figures.push(figure);
        self.figures.len() - 1
    }

    /// Give every figure its own random fully saturated hue
    pub fn change_colors(&mut self) {
        for figure in &mut self.figures {
            let hue: f32 = self.rng.random();
            figure.recolor(Rgb::from_hsb(hue, 1.0, 1.0));
        }
    }

    pub fn speed_up(&mut self) {
        for figure in &mut self.figures {
            figure.speed_up();
        }
    }

    pub fn slow_down(&mut self) {
        for figure in &mut self.figures {
            figure.slow_down();
        }
    }

    /// Advance every figure one tick, in z-order
    pub fn step_all(&mut self) {
        for figure in &mut self.figures {
            figure.step();
        }
        self.time_ticks += 1;
    }

    /// Read-only copy of what a renderer needs
    pub fn snapshot(&self) -> Frame {
        Frame {
            tick: self.time_ticks,
            extent: self.extent,
            figures: self.figures.iter().map(FigureView::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_has_three_seed_figures() {
        let sim = Simulation::new(1);
        let shapes: Vec<ShapeKind> = sim.figures().iter().map(|f| f.shape()).collect();
        assert_eq!(
            shapes,
            vec![ShapeKind::Circle, ShapeKind::Triangle, ShapeKind::Plus]
        );
        assert_eq!(sim.figures()[0].color(), Rgb::YELLOW);
        assert_eq!(sim.figures()[1].velocity(), IVec2::new(7, 1));
        assert_eq!(sim.figures()[2].size(), 30);
        assert_eq!(sim.extent(), IVec2::ZERO);
    }

    #[test]
    fn test_resize_empty_is_noop() {
        let mut sim = Simulation::empty(1);
        sim.resize_window(300, 200);
        assert!(sim.is_empty());
        assert_eq!(sim.extent(), IVec2::new(300, 200));
    }

    #[test]
    fn test_resize_is_idempotent() {
        let mut sim = Simulation::new(1);
        sim.resize_window(600, 600);
        for _ in 0..10 {
            sim.step_all();
        }
        sim.resize_window(400, 300);
        let once: Vec<Figure> = sim.figures().to_vec();
        sim.resize_window(400, 300);
        assert_eq!(sim.figures(), &once[..]);
    }

    #[test]
    fn test_add_figure_before_resize() {
        let mut sim = Simulation::empty(1);
        let idx = sim.add_figure(3, 4, ShapeKind::Plus);
        assert_eq!(idx, 0);
        assert_eq!(sim.figures()[0].limits(), IVec2::ZERO);

        sim.resize_window(200, 100);
        let f = &sim.figures()[0];
        assert_eq!(f.limits(), IVec2::new(200 - f.size(), 100 - f.size()));
    }

    #[test]
    fn test_add_figure_uses_palette_and_size_range() {
        let mut sim = Simulation::empty(42);
        sim.resize_window(600, 600);
        for _ in 0..200 {
            let idx = sim.add_figure(3, 4, ShapeKind::Circle);
            let f = &sim.figures()[idx];
            assert!(PALETTE.contains(&f.color()));
            assert!((FIGURE_SIZE_MIN..=FIGURE_SIZE_MAX).contains(&f.size()));
            assert_eq!(f.limits(), IVec2::new(600 - f.size(), 600 - f.size()));
            assert_eq!(f.velocity(), IVec2::new(3, 4));
        }
        assert_eq!(sim.len(), 200);
    }

    #[test]
    fn test_add_figure_named_rejects_unknown_shape() {
        let mut sim = Simulation::new(1);
        assert!(matches!(
            sim.add_figure_named(3, 4, "square"),
            Err(Error::UnknownShape(_))
        ));
        assert_eq!(sim.len(), 3);
        assert_eq!(sim.add_figure_named(3, 4, "triangle").unwrap(), 3);
        assert_eq!(sim.figures()[3].shape(), ShapeKind::Triangle);
    }

    #[test]
    fn test_custom_size_range() {
        let mut sim = Simulation::empty(3).with_size_range(5, 5).unwrap();
        sim.add_figure(1, 1, ShapeKind::Circle);
        assert_eq!(sim.figures()[0].size(), 5);
        assert!(Simulation::empty(3).with_size_range(10, 9).is_err());
        assert!(Simulation::empty(3).with_size_range(0, 9).is_err());
    }

    #[test]
    fn test_change_colors_recolors_everything() {
        let mut sim = Simulation::new(9);
        let before: Vec<Rgb> = sim.figures().iter().map(|f| f.color()).collect();
        sim.change_colors();
        let after: Vec<Rgb> = sim.figures().iter().map(|f| f.color()).collect();
        assert_ne!(before, after);
        for c in after {
            // full saturation and brightness
            assert!(c.r == 255 || c.g == 255 || c.b == 255);
            assert!(c.r == 0 || c.g == 0 || c.b == 0);
        }
    }

    #[test]
    fn test_same_seed_same_figures() {
        let mut a = Simulation::new(1234);
        let mut b = Simulation::new(1234);
        for sim in [&mut a, &mut b] {
            sim.resize_window(500, 400);
            sim.add_figure(3, 4, ShapeKind::Circle);
            sim.add_figure(-2, 5, ShapeKind::Plus);
            sim.change_colors();
            for _ in 0..50 {
                sim.step_all();
            }
        }
        assert_eq!(a.figures(), b.figures());
        assert_eq!(a.seed(), 1234);
    }

    #[test]
    fn test_speed_up_and_slow_down_apply_to_all() {
        let mut sim = Simulation::new(1);
        sim.speed_up();
        let v: Vec<IVec2> = sim.figures().iter().map(|f| f.velocity()).collect();
        assert_eq!(v, vec![IVec2::new(4, 3), IVec2::new(8, 2), IVec2::new(3, 4)]);
        sim.slow_down();
        sim.slow_down();
        let v: Vec<IVec2> = sim.figures().iter().map(|f| f.velocity()).collect();
        assert_eq!(v, vec![IVec2::new(2, 1), IVec2::new(6, 1), IVec2::new(1, 2)]);
    }

    #[test]
    fn test_snapshot_matches_figures() {
        let mut sim = Simulation::new(1);
        sim.resize_window(600, 600);
        sim.step_all();
        let frame = sim.snapshot();
        assert_eq!(frame.tick, 1);
        assert_eq!(frame.extent, IVec2::new(600, 600));
        assert_eq!(frame.figures.len(), 3);
        assert_eq!(frame.figures[0].pos, IVec2::new(3, 2));
        assert_eq!(frame.figures[1].shape, ShapeKind::Triangle);
    }

    #[test]
    fn test_reflection_scenario() {
        // One figure, size 0, velocity (3, 2), extents 100x100
        let mut sim = Simulation::empty(0);
        sim.resize_window(100, 100);
        sim.push_figure(Figure::new(Rgb::RED, IVec2::new(3, 2), ShapeKind::Circle, 0));

        let ticks = (100 + 3 - 1) / 3; // ceil(100 / 3)
        let mut flips = 0;
        let mut last_dx = 3;
        for _ in 0..ticks {
            sim.step_all();
            let f = &sim.figures()[0];
            assert!((0..=100).contains(&f.position().x));
            assert!((0..=100).contains(&f.position().y));
            if f.velocity().x != last_dx {
                flips += 1;
                last_dx = f.velocity().x;
            }
        }
        assert_eq!(flips % 2, 1);
        assert_eq!(last_dx, -3);
    }

    #[test]
    fn test_reflection_when_velocity_divides_gap() {
        // 4 divides 100, so the 25th tick lands exactly on the limit
        let mut sim = Simulation::empty(0);
        sim.resize_window(100, 100);
        sim.push_figure(Figure::new(Rgb::RED, IVec2::new(4, 0), ShapeKind::Circle, 0));

        let ticks = (100 + 4 - 1) / 4;
        assert_eq!(ticks, 25);
        for _ in 0..ticks - 1 {
            sim.step_all();
        }
        let f = &sim.figures()[0];
        assert_eq!((f.position().x, f.velocity().x), (96, 4));

        // Reaching the limit counts as a hit: reverse from 96 instead
        sim.step_all();
        let f = &sim.figures()[0];
        assert_eq!((f.position().x, f.velocity().x), (92, -4));
    }

    proptest! {
        #[test]
        fn prop_resize_sets_every_limit(
            w in -50i32..1000,
            h in -50i32..1000,
            extra in 0usize..10,
            seed in any::<u64>(),
        ) {
            let mut sim = Simulation::new(seed);
            for _ in 0..extra {
                sim.add_figure(3, 4, ShapeKind::Triangle);
            }
            sim.resize_window(w, h);
            for f in sim.figures() {
                prop_assert_eq!(
                    f.limits(),
                    IVec2::new((w - f.size()).max(0), (h - f.size()).max(0))
                );
            }
        }

        #[test]
        fn prop_add_figure_grows_by_one(seed in any::<u64>(), w in 0i32..800, h in 0i32..800) {
            let mut sim = Simulation::new(seed);
            sim.resize_window(w, h);
            let before = sim.len();
            let idx = sim.add_figure(1, 1, ShapeKind::Circle);
            prop_assert_eq!(sim.len(), before + 1);
            let f = &sim.figures()[idx];
            prop_assert_eq!(f.limits(), IVec2::new((w - f.size()).max(0), (h - f.size()).max(0)));
        }
    }
}
