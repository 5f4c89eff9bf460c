//! Platform-free engine of the manual-mode camera simulator.
//!
//! Nothing here touches a browser or a window: scenes draw through the
//! [`Painter`] trait, and the host supplies frame timing and a shutter sound.

pub mod atlas;
pub mod constants;
pub mod dial;
pub mod effects;
pub mod error;
pub mod exposure;
pub mod framebuffer;
pub mod overlay;
pub mod paint;
pub mod render_loop;
pub mod scene;
pub mod sprite;

pub use atlas::{grain_tile, AtlasProvider, PlaceholderAtlases};
pub use constants::*;
pub use dial::*;
pub use effects::{EffectProfile, Effects};
pub use error::{CameraError, Result};
pub use exposure::{ExposureState, SmoothingRates};
pub use framebuffer::Framebuffer;
pub use paint::{Bitmap, BlendMode, Color, Painter, Rect, Viewport};
pub use render_loop::{FrameClock, FrameStats, LoopConfig, RenderLoop, ShutterSound, Silent};
pub use scene::{RunnerScene, Scene, SceneKind, SceneSet, WaterfallScene};
pub use sprite::{AnimatedSprite, FrameGrid, SpriteSheet};
