use crate::dom::element_by_id;
use crate::keymap::{flash_opacity, play_button_label};
use manual_core::{format_aperture, format_iso, format_shutter, ExposureState, SceneKind};
use web_sys as web;

/// HUD elements updated from the engine: readouts, flash veil, play button
/// and scene tabs.
pub struct Ui {
    flash: web::HtmlElement,
    readout_shutter: web::Element,
    readout_aperture: web::Element,
    iso_out: web::Element,
    btn_play: web::Element,
    tabs: Vec<(SceneKind, web::Element)>,
}

pub fn tab_id(kind: SceneKind) -> String {
    format!("tab-{}", kind.id())
}

impl Ui {
    pub fn from_document(document: &web::Document) -> anyhow::Result<Self> {
        let tabs = SceneKind::ALL
            .iter()
            .filter_map(|&kind| document.get_element_by_id(&tab_id(kind)).map(|el| (kind, el)))
            .collect();
        Ok(Self {
            flash: element_by_id(document, "flash")?,
            readout_shutter: element_by_id(document, "readout-shutter")?,
            readout_aperture: element_by_id(document, "readout-aperture")?,
            iso_out: element_by_id(document, "iso-out")?,
            btn_play: element_by_id(document, "btn-play")?,
            tabs,
        })
    }

    /// Readouts show the targets, so they track the dials without lag.
    pub fn refresh_readouts(&self, exposure: &ExposureState) {
        let shutter = format_shutter(exposure.target_shutter_seconds());
        let aperture = format_aperture(exposure.target_aperture());
        if self.readout_shutter.text_content().as_deref() != Some(shutter.as_str()) {
            self.readout_shutter.set_text_content(Some(&shutter));
        }
        if self.readout_aperture.text_content().as_deref() != Some(aperture.as_str()) {
            self.readout_aperture.set_text_content(Some(&aperture));
        }
    }

    pub fn set_iso(&self, iso: f64) {
        self.iso_out.set_text_content(Some(&format_iso(iso)));
    }

    pub fn set_flash(&self, alpha: f32) {
        _ = self
            .flash
            .style()
            .set_property("opacity", &flash_opacity(alpha));
    }

    pub fn set_running(&self, running: bool) {
        self.btn_play
            .set_text_content(Some(play_button_label(running)));
    }

    pub fn mark_active_tab(&self, active: SceneKind) {
        for (kind, el) in &self.tabs {
            let on = *kind == active;
            _ = el.class_list().toggle_with_force("is-active", on);
            _ = el.set_attribute("aria-selected", if on { "true" } else { "false" });
        }
    }
}
