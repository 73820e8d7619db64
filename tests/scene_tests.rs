use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sky_octahedron::core::{debounce, Clock, Viewport};
use sky_octahedron::traits::FrameRenderer;
use sky_octahedron::{RenderContext, Scene, SceneConfig};

/// Records what the scene looked like at every draw
#[derive(Default)]
struct RecordingRenderer {
    frames: Vec<Vec<f32>>,
    resizes: Vec<Viewport>,
    fail: bool,
}

impl FrameRenderer for RecordingRenderer {
    fn render(&mut self, scene: &Scene) -> Result<()> {
        if self.fail {
            return Err(anyhow!("surface lost"));
        }
        self.frames.push(scene.meshes().iter().map(|mesh| mesh.time()).collect());
        Ok(())
    }

    fn resize(&mut self, viewport: Viewport) {
        self.resizes.push(viewport);
    }
}

fn context(start: Instant) -> RenderContext<RecordingRenderer> {
    let scene = Scene::new(
        &SceneConfig::default(),
        Viewport::new(800, 600),
        &mut StdRng::seed_from_u64(11),
    )
    .with_clock(Clock::starting_at(start));
    RenderContext::new(scene, RecordingRenderer::default())
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[cfg(test)]
mod scene_tests {
    use super::*;

    #[test]
    fn test_tick_advances_both_meshes_then_draws() {
        let start = Instant::now();
        let mut ctx = context(start);

        let delta = ctx.tick_at(start + ms(250)).expect("tick");
        assert!((delta - 0.25).abs() < 1e-6);
        ctx.tick_at(start + ms(500)).expect("tick");

        assert_eq!(ctx.renderer.frames.len(), 2);
        let [first, second] = [&ctx.renderer.frames[0], &ctx.renderer.frames[1]];
        assert_eq!(first.len(), 2);
        assert!(first.iter().all(|t| (t - 0.25).abs() < 1e-6));
        assert!(second.iter().all(|t| (t - 0.5).abs() < 1e-6));
    }

    #[test]
    fn test_tick_propagates_render_errors() {
        let start = Instant::now();
        let mut ctx = context(start);
        ctx.renderer.fail = true;

        assert!(ctx.tick_at(start + ms(16)).is_err());
    }

    #[test]
    fn test_resize_updates_camera_and_renderer() {
        let mut ctx = context(Instant::now());

        ctx.resize(Viewport::new(1200, 400));

        assert_eq!(ctx.scene.viewport(), Viewport::new(1200, 400));
        assert_eq!(ctx.scene.camera().aspect, 3.0);
        assert_eq!(ctx.renderer.resizes, vec![Viewport::new(1200, 400)]);
    }

    #[test]
    fn test_minimized_window_is_ignored() {
        let mut ctx = context(Instant::now());

        ctx.resize(Viewport::new(0, 0));
        ctx.resize(Viewport::new(640, 0));

        assert_eq!(ctx.scene.viewport(), Viewport::new(800, 600));
        assert!(ctx.renderer.resizes.is_empty());
    }

    #[test]
    fn test_debounced_resize_applies_last_size_once() {
        let start = Instant::now();
        let mut ctx = context(start);
        let mut resize = debounce(
            RenderContext::<RecordingRenderer>::resize,
            SceneConfig::default().resize_debounce(),
        );

        resize.call_at(Viewport::new(900, 600), start);
        resize.call_at(Viewport::new(1000, 600), start + ms(300));
        resize.call_at(Viewport::new(1100, 550), start + ms(700));

        assert!(!resize.poll(start + ms(1500), &mut ctx));
        assert!(ctx.renderer.resizes.is_empty());
        assert_eq!(resize.deadline(), Some(start + ms(1700)));

        assert!(resize.poll(start + ms(1700), &mut ctx));
        assert!(!resize.poll(start + ms(5000), &mut ctx));

        assert_eq!(ctx.renderer.resizes, vec![Viewport::new(1100, 550)]);
        assert_eq!(ctx.scene.camera().aspect, 2.0);
    }

    #[test]
    fn test_ticks_between_resizes_keep_running() {
        let start = Instant::now();
        let mut ctx = context(start);
        let mut resize = debounce(RenderContext::<RecordingRenderer>::resize, ms(200));

        resize.call_at(Viewport::new(400, 400), start);
        for frame in 1..=5u64 {
            let now = start + ms(frame * 50);
            resize.poll(now, &mut ctx);
            ctx.tick_at(now).expect("tick");
        }

        assert_eq!(ctx.renderer.frames.len(), 5);
        assert_eq!(ctx.renderer.resizes, vec![Viewport::new(400, 400)]);
        assert_eq!(ctx.scene.camera().aspect, 1.0);
    }
}
