use crate::cli::Args;
use crate::files::FileAtlases;
use manual_core::{
    grain_tile, Framebuffer, LoopConfig, PlaceholderAtlases, RenderLoop, SceneSet, Silent,
};
use std::path::Path;

/// Build the engine the arguments describe, run it for the requested number
/// of frames and return the last one.
pub fn shoot(args: &Args) -> anyhow::Result<Framebuffer> {
    let viewport = args.viewport();
    let mut atlases = FileAtlases {
        runner_sheet: args.runner_sheet.clone(),
        frame_width: args.frame_width,
        frame_height: args.frame_height,
        frames: args.frames,
        water: args.water.clone(),
        fallback: PlaceholderAtlases::new(args.seed),
    };
    let scenes = SceneSet::build(&mut atlases, viewport);
    let mut engine = RenderLoop::new(scenes, grain_tile(args.seed), LoopConfig::default());
    engine.set_pixel_ratio(viewport.pixel_ratio);
    engine.select_scene(args.scene)?;

    for note in args.out_of_range() {
        log::warn!("{}, clamping", note);
    }
    let exposure = engine.exposure_mut();
    exposure.set_target_shutter(args.shutter);
    exposure.set_target_aperture(args.aperture);
    exposure.set_target_iso(args.iso);
    if !args.ease {
        exposure.settle();
    }

    let mut fb = Framebuffer::new(viewport.width as u32, viewport.height as u32);
    let frames = args.frame_count();
    let dt = args.frame_dt();
    log::info!(
        "shooting {} for {} frames at {:.4}s",
        args.scene,
        frames,
        dt
    );
    for i in 0..frames {
        if args.flash && i + 1 == frames {
            engine.fire_shutter(&Silent);
        }
        if let Some(stats) = engine.tick(dt, &mut fb) {
            if !stats.scene_rendered {
                log::warn!("frame {} drew no scene", i);
            }
        }
    }
    let e = engine.exposure();
    log::info!(
        "exposure {:.3} (shutter {}, {}, {})",
        e.compute_exposure(),
        manual_core::format_shutter(e.shutter_seconds()),
        manual_core::format_aperture(e.aperture()),
        manual_core::format_iso(e.iso())
    );
    Ok(fb)
}

pub fn save_png(fb: &Framebuffer, path: &Path) -> anyhow::Result<()> {
    let bm = fb.bitmap();
    image::save_buffer(
        path,
        bm.as_bytes(),
        bm.width(),
        bm.height(),
        image::ColorType::Rgba8,
    )?;
    Ok(())
}
