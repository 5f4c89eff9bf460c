use manual_core::{CameraError, ShutterSound};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub const SHUTTER_SAMPLE_URL: &str = "./assets/shutter.ogg";
const SHUTTER_VOLUME: f64 = 0.35;

const CLICK_FREQ_HZ: f32 = 600.0;
const CLICK_FLOOR_GAIN: f32 = 0.0001;
const CLICK_PEAK_GAIN: f32 = 0.4;
const CLICK_ATTACK_SEC: f64 = 0.01;
const CLICK_DECAY_END_SEC: f64 = 0.09;
const CLICK_STOP_SEC: f64 = 0.1;

fn audio_err(e: JsValue) -> CameraError {
    CameraError::Audio(format!("{:?}", e))
}

/// Shutter click: plays the recorded sample when the browser allows it and
/// falls back to a short synthesised click when playback is refused.
pub struct ShutterAudio {
    sample: Option<web::HtmlAudioElement>,
    ctx: Option<web::AudioContext>,
}

impl ShutterAudio {
    pub fn new() -> Self {
        let sample = web::HtmlAudioElement::new_with_src(SHUTTER_SAMPLE_URL)
            .map_err(|e| log::warn!("shutter sample unavailable: {:?}", e))
            .ok();
        if let Some(el) = &sample {
            el.set_preload("auto");
        }
        let ctx = web::AudioContext::new()
            .map_err(|e| log::warn!("WebAudio unavailable: {:?}", e))
            .ok();
        Self { sample, ctx }
    }
}

impl Default for ShutterAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutterSound for ShutterAudio {
    fn play_click(&self) -> manual_core::Result<()> {
        let Some(sample) = &self.sample else {
            return match &self.ctx {
                Some(ctx) => synth_click(ctx),
                None => Err(CameraError::Audio("no audio output".into())),
            };
        };
        // a fresh clone lets rapid clicks overlap
        let voice = sample
            .clone_node()
            .map_err(audio_err)?
            .dyn_into::<web::HtmlAudioElement>()
            .map_err(|e| audio_err(e.into()))?;
        voice.set_volume(SHUTTER_VOLUME);
        let promise = voice.play().map_err(audio_err)?;
        let fallback = self.ctx.clone();
        spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::debug!("shutter sample refused ({:?}), synthesising", e);
                if let Some(ctx) = fallback {
                    if let Err(e) = synth_click(&ctx) {
                        log::warn!("shutter click failed: {}", e);
                    }
                }
            }
        });
        Ok(())
    }
}

/// Short triangle-wave click with an exponential decay.
pub fn synth_click(ctx: &web::AudioContext) -> manual_core::Result<()> {
    _ = ctx.resume();
    let osc = web::OscillatorNode::new(ctx).map_err(audio_err)?;
    let gain = web::GainNode::new(ctx).map_err(audio_err)?;
    let t = ctx.current_time();
    osc.set_type(web::OscillatorType::Triangle);
    osc.frequency()
        .set_value_at_time(CLICK_FREQ_HZ, t)
        .map_err(audio_err)?;
    let g = gain.gain();
    g.set_value_at_time(CLICK_FLOOR_GAIN, t).map_err(audio_err)?;
    g.exponential_ramp_to_value_at_time(CLICK_PEAK_GAIN, t + CLICK_ATTACK_SEC)
        .map_err(audio_err)?;
    g.exponential_ramp_to_value_at_time(CLICK_FLOOR_GAIN, t + CLICK_DECAY_END_SEC)
        .map_err(audio_err)?;
    osc.connect_with_audio_node(&gain).map_err(audio_err)?;
    gain.connect_with_audio_node(&ctx.destination())
        .map_err(audio_err)?;
    osc.start().map_err(audio_err)?;
    osc.stop_with_when(t + CLICK_STOP_SEC).map_err(audio_err)?;
    Ok(())
}
