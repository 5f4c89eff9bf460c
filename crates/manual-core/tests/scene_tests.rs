// Host-side tests for scene switching, scene motion and placeholder atlases.

use glam::Vec2;
use manual_core::atlas::{make_runner_sheet, make_waterfall_layer, RUNNER_FRAMES};
use manual_core::*;
use std::rc::Rc;

fn small_view() -> Viewport {
    Viewport::new(320, 180, 1.0)
}

fn scenes() -> SceneSet {
    SceneSet::build(&mut PlaceholderAtlases::new(7), small_view())
}

fn wide_open_long_exposure() -> ExposureState {
    let mut e = ExposureState::new();
    e.set_target_shutter(0.5);
    e.set_target_aperture(1.8);
    e.set_target_iso(6400.0);
    e.settle();
    e
}

/// Painter whose image blits always fail, like a canvas that throws.
struct NoImages(Framebuffer);

impl Painter for NoImages {
    fn size(&self) -> (u32, u32) {
        self.0.size()
    }
    fn save(&mut self) {
        self.0.save()
    }
    fn restore(&mut self) {
        self.0.restore()
    }
    fn set_alpha(&mut self, alpha: f32) {
        self.0.set_alpha(alpha)
    }
    fn set_blend(&mut self, mode: BlendMode) {
        self.0.set_blend(mode)
    }
    fn set_blur(&mut self, radius_px: u32) {
        self.0.set_blur(radius_px)
    }
    fn clear(&mut self) {
        self.0.clear()
    }
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.0.fill_rect(rect, color)
    }
    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.0.fill_polygon(points, color)
    }
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.0.fill_circle(center, radius, color)
    }
    fn stroke_segments(&mut self, segments: &[(Vec2, Vec2)], width: f32, color: Color) {
        self.0.stroke_segments(segments, width, color)
    }
    fn draw_image(&mut self, _image: &Bitmap, _src: Rect, _dst: Rect) -> Result<()> {
        Err(CameraError::Paint("image decode failed".into()))
    }
}

/// Painter that logs every image blit with the alpha it was drawn at.
struct Recording {
    fb: Framebuffer,
    blits: Vec<(Rect, f32)>,
}

impl Recording {
    fn new() -> Self {
        Self {
            fb: Framebuffer::new(320, 180),
            blits: Vec::new(),
        }
    }
}

impl Painter for Recording {
    fn size(&self) -> (u32, u32) {
        self.fb.size()
    }
    fn save(&mut self) {
        self.fb.save()
    }
    fn restore(&mut self) {
        self.fb.restore()
    }
    fn set_alpha(&mut self, alpha: f32) {
        self.fb.set_alpha(alpha)
    }
    fn set_blend(&mut self, mode: BlendMode) {
        self.fb.set_blend(mode)
    }
    fn set_blur(&mut self, radius_px: u32) {
        self.fb.set_blur(radius_px)
    }
    fn clear(&mut self) {
        self.fb.clear()
    }
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fb.fill_rect(rect, color)
    }
    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.fb.fill_polygon(points, color)
    }
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.fb.fill_circle(center, radius, color)
    }
    fn stroke_segments(&mut self, segments: &[(Vec2, Vec2)], width: f32, color: Color) {
        self.fb.stroke_segments(segments, width, color)
    }
    fn draw_image(&mut self, image: &Bitmap, src: Rect, dst: Rect) -> Result<()> {
        self.blits.push((dst, self.fb.alpha()));
        self.fb.draw_image(image, src, dst)
    }
}

fn settled_at_shutter(seconds: f64) -> ExposureState {
    let mut e = ExposureState::new();
    e.set_target_shutter(seconds);
    e.settle();
    e
}

fn record(kind: SceneKind, exposure: &ExposureState) -> Vec<(Rect, f32)> {
    let set = scenes();
    let mut painter = Recording::new();
    set.get(kind).unwrap().render(&mut painter, exposure).unwrap();
    assert_state_reset(&painter.fb);
    painter.blits
}

fn assert_state_reset(fb: &Framebuffer) {
    assert_eq!(fb.state_depth(), 0);
    assert_eq!(fb.alpha(), 1.0);
    assert_eq!(fb.blend(), BlendMode::SourceOver);
    assert_eq!(fb.blur(), 0);
}

#[test]
fn build_registers_both_scenes_with_runner_active() {
    let set = scenes();
    assert!(set.contains(SceneKind::Runner));
    assert!(set.contains(SceneKind::Waterfall));
    assert_eq!(set.active(), Some(SceneKind::Runner));
    assert!(set.get(SceneKind::Runner).unwrap().is_playing());
    assert!(!set.get(SceneKind::Waterfall).unwrap().is_playing());
}

#[test]
fn switching_pauses_outgoing_and_preserves_its_clock() {
    let mut set = scenes();
    set.active_scene_mut().unwrap().update(0.25);
    set.select(SceneKind::Waterfall).unwrap();
    assert!(!set.get(SceneKind::Runner).unwrap().is_playing());
    assert!(set.get(SceneKind::Waterfall).unwrap().is_playing());

    set.active_scene_mut().unwrap().update(0.1);
    // a paused scene ignores updates
    set.get_mut(SceneKind::Runner).unwrap().update(5.0);
    assert_eq!(set.get(SceneKind::Runner).unwrap().elapsed(), 0.25);

    set.select(SceneKind::Runner).unwrap();
    assert_eq!(set.get(SceneKind::Runner).unwrap().elapsed(), 0.25);
    assert_eq!(set.get(SceneKind::Waterfall).unwrap().elapsed(), 0.1);
    assert!(!set.get(SceneKind::Waterfall).unwrap().is_playing());
}

#[test]
fn selecting_the_active_scene_changes_nothing() {
    let mut set = scenes();
    set.select(SceneKind::Runner).unwrap();
    assert_eq!(set.active(), Some(SceneKind::Runner));
    assert!(set.get(SceneKind::Runner).unwrap().is_playing());
}

#[test]
fn missing_scene_cannot_be_selected() {
    let mut set = SceneSet::new();
    set.insert_runner(RunnerScene::new(make_runner_sheet(), small_view()).unwrap());
    assert!(matches!(
        set.select(SceneKind::Waterfall),
        Err(CameraError::SceneUnavailable(SceneKind::Waterfall))
    ));
    assert_eq!(set.active(), Some(SceneKind::Runner));
}

struct BrokenWaterfall;

impl AtlasProvider for BrokenWaterfall {
    fn runner_sheet(&mut self) -> Result<SpriteSheet> {
        Ok(make_runner_sheet())
    }
    fn waterfall_layers(&mut self) -> Result<Vec<Rc<Bitmap>>> {
        Err(CameraError::MissingResource("water.png".into()))
    }
}

#[test]
fn scenes_with_missing_assets_are_left_out() {
    let set = SceneSet::build(&mut BrokenWaterfall, small_view());
    assert!(set.contains(SceneKind::Runner));
    assert!(!set.contains(SceneKind::Waterfall));
}

#[test]
fn scene_ids_round_trip() {
    for kind in SceneKind::ALL {
        assert_eq!(SceneKind::from_id(kind.id()), Some(kind));
        assert_eq!(kind.to_string(), kind.id());
    }
    assert_eq!(SceneKind::from_id(" Waterfall "), Some(SceneKind::Waterfall));
    assert_eq!(SceneKind::from_id("beach"), None);
}

#[test]
fn runner_crosses_and_wraps() {
    let mut runner = RunnerScene::new(make_runner_sheet(), small_view()).unwrap();
    let (_, y) = runner.position();
    assert!((y - (180.0 * 0.6 - 64.0 * 2.4)).abs() < 1e-3);

    runner.update(1.0);
    assert!((runner.position().0 - 140.0).abs() < 1e-3);

    runner.update(2.0);
    assert!((runner.position().0 - (-64.0 * 2.4 - 20.0)).abs() < 1e-3);
}

#[test]
fn runner_speed_scales_with_pixel_ratio() {
    let mut runner = RunnerScene::new(make_runner_sheet(), Viewport::new(640, 360, 2.0)).unwrap();
    runner.update(0.5);
    assert!((runner.position().0 - 140.0).abs() < 1e-3);
}

#[test]
fn waterfall_pairs_textures_with_layout() {
    let textures = (0..4).map(|i| Rc::new(Bitmap::new(8, 8 + i))).collect();
    let scene = WaterfallScene::new(textures, small_view()).unwrap();
    assert_eq!(scene.layers().len(), 3);
    assert_eq!(scene.layers()[1].x, 620.0);
    assert_eq!(scene.layers()[1].speed, 220.0);
    assert!(matches!(
        WaterfallScene::new(Vec::new(), small_view()),
        Err(CameraError::MissingResource(_))
    ));
}

#[test]
fn renders_restore_painter_state() {
    let set = scenes();
    let exposure = wide_open_long_exposure();
    for kind in SceneKind::ALL {
        let mut fb = Framebuffer::new(320, 180);
        set.get(kind).unwrap().render(&mut fb, &exposure).unwrap();
        assert_state_reset(&fb);
        assert_eq!(alpha_at_origin(&fb), 255, "{kind} left the frame empty");
    }
}

#[test]
fn failed_renders_still_restore_painter_state() {
    let set = scenes();
    let exposure = wide_open_long_exposure();
    for kind in SceneKind::ALL {
        let mut painter = NoImages(Framebuffer::new(320, 180));
        let result = set.get(kind).unwrap().render(&mut painter, &exposure);
        assert!(matches!(result, Err(CameraError::Paint(_))));
        assert_state_reset(&painter.0);
    }
}

fn alpha_at_origin(fb: &Framebuffer) -> u8 {
    fb.bitmap().pixel(0, 0).map(|c| c.a).unwrap_or(0)
}

#[test]
fn overexposure_lightens_the_runner_background() {
    let set = scenes();
    let runner = set.get(SceneKind::Runner).unwrap();
    let mut dark = Framebuffer::new(320, 180);
    runner.render(&mut dark, &ExposureState::new()).unwrap();
    let mut bright = Framebuffer::new(320, 180);
    runner.render(&mut bright, &wide_open_long_exposure()).unwrap();
    // top-right corner: clear of the runner and the skyline
    let (d, b) = (
        dark.bitmap().pixel(319, 0).unwrap(),
        bright.bitmap().pixel(319, 0).unwrap(),
    );
    assert_eq!(d, Color::hex(0x0c121a));
    assert!(b.r > d.r && b.g > d.g && b.b > d.b);
}

#[test]
fn placeholder_runner_sheet_layout() {
    let sheet = make_runner_sheet();
    assert_eq!(sheet.image.width(), 64 * RUNNER_FRAMES);
    assert_eq!(sheet.image.height(), 64);
    assert_eq!(sheet.grid.frame_count, RUNNER_FRAMES);
    // torso
    assert_eq!(sheet.image.pixel(30, 30), Some(Color::hex(0xd6e6ff)));
    // ground strip
    assert_eq!(sheet.image.pixel(5, 58), Some(Color::hex(0x152433)));
    // alternating background stripes
    assert_eq!(sheet.image.pixel(2, 2), Some(Color::hex(0x0a0f14)));
    assert_eq!(sheet.image.pixel(66, 2), Some(Color::hex(0x081019)));
}

#[test]
fn placeholder_textures_are_deterministic_per_seed() {
    let a = make_waterfall_layer(64, 32, 9);
    let b = make_waterfall_layer(64, 32, 9);
    let c = make_waterfall_layer(64, 32, 10);
    assert_eq!(a.pixels(), b.pixels());
    assert_ne!(a.pixels(), c.pixels());
    assert!(a.pixels().iter().any(|p| p[3] > 0));

    let g = grain_tile(3);
    assert_eq!((g.width(), g.height()), (GRAIN_TILE_SIZE, GRAIN_TILE_SIZE));
    assert!(g.pixels().iter().all(|p| p[3] == 255 && p[0] == p[1] && p[1] == p[2]));
    assert_eq!(g.pixels(), grain_tile(3).pixels());
}

#[test]
fn runner_ghosts_trail_behind_and_fade_out() {
    let blits = record(SceneKind::Runner, &settled_at_shutter(0.5));
    assert_eq!(blits.len(), 18);

    // Oldest copy first, 70px of trail split into 18 steps, newest at the runner.
    let start = RunnerScene::new(make_runner_sheet(), small_view()).unwrap().position();
    assert_eq!(blits[0].0.x, (-70.0f32 * 17.0 / 18.0).trunc());
    assert_eq!(blits[17].0.x, start.0.trunc());
    assert!(blits.windows(2).all(|w| w[0].0.x < w[1].0.x));
    assert!(blits.iter().all(|(dst, _)| dst.y == start.1.trunc()));

    assert!((blits[0].1 - (0.08 + 0.22 / 18.0)).abs() < 1e-4);
    assert!((blits[17].1 - 0.30).abs() < 1e-6);
    assert!(blits.windows(2).all(|w| w[0].1 < w[1].1));
}

#[test]
fn fast_shutter_draws_a_single_solid_runner() {
    let blits = record(SceneKind::Runner, &settled_at_shutter(1.0 / 1000.0));
    assert_eq!(blits.len(), 1);
    assert_eq!(blits[0].0.x, 0.0);
    assert!((blits[0].1 - 0.30).abs() < 1e-6);
}

#[test]
fn waterfall_tiles_every_sample_of_every_strip() {
    let layers = PlaceholderAtlases::new(7).waterfall_layers().unwrap().len();
    assert_eq!(layers, 3);
    let slow = record(SceneKind::Waterfall, &settled_at_shutter(0.5));
    assert_eq!(slow.len(), 24 * 3 * layers);
    let fast = record(SceneKind::Waterfall, &settled_at_shutter(1.0 / 1000.0));
    assert_eq!(fast.len(), 3 * layers);

    for tiles in slow.chunks_exact(3) {
        let (above, mid, below) = (tiles[0].0, tiles[1].0, tiles[2].0);
        assert_eq!(mid.y - above.y, 180.0);
        assert_eq!(below.y - mid.y, 180.0);
        assert!((0.0..180.0).contains(&mid.y), "{mid:?}");
        assert_eq!((above.x, above.w), (mid.x, mid.w));
        assert_eq!((below.x, below.w), (mid.x, mid.w));
        assert_eq!(mid.h, 180.0);
        assert!(tiles.iter().all(|t| t.1 == tiles[0].1));
    }
    // Within a strip the first sample is the strongest.
    let first_strip: Vec<f32> = slow[..72].iter().step_by(3).map(|t| t.1).collect();
    assert!((first_strip[0] - 0.17).abs() < 1e-6);
    assert!(first_strip.windows(2).all(|w| w[0] > w[1]));
}
