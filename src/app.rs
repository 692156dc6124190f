use egui::{Color32, ColorImage, Pos2, Rect, RichText, Stroke, pos2};

#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

#[cfg(all(not(target_arch = "wasm32"), not(target_os = "android")))]
use rfd::FileDialog;

use crate::config::TrackerConfig;
use crate::diagram::{DIAGRAM_SIZE, Diagram, Hit, to_logical, to_screen};
use crate::error::{DiagramError, FormError};
use crate::model::Gender;
use crate::submit::HttpSubmitter;
use crate::tracker::Tracker;

const INSTRUCTIONS: &str = "Click on any body part on the diagram to select it, wherever you're \
    injured, describe the injury in detail, choose a gender, and hit submit!";

/// Nothing here outlives the session: closing the window (or reloading the page) starts over.
pub struct TrackerApp {
    tracker: Tracker,
    diagram: Diagram,

    // Reference image under the regions:
    diagram_path: Option<String>,
    texture: Option<egui::TextureHandle>,
    diagram_error: Option<String>,

    show_incomplete_notice: bool,
}

impl TrackerApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: TrackerConfig) -> Self {
        log::info!("reporting injuries to {}", config.endpoint);
        let submitter = HttpSubmitter::new(config.endpoint).with_repaint(cc.egui_ctx.clone());

        #[cfg_attr(target_arch = "wasm32", expect(unused_mut))]
        let mut this = Self {
            tracker: Tracker::new(Box::new(submitter)),
            diagram: Diagram::body(),
            diagram_path: None,
            texture: None,
            diagram_error: None,
            show_incomplete_notice: false,
        };

        #[cfg(not(target_arch = "wasm32"))]
        if let Err(e) = this.load_diagram(&cc.egui_ctx, Path::new(&config.diagram_path)) {
            log::warn!("{e}");
            this.diagram_error = Some(e.to_string());
        }

        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        this
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn load_diagram(&mut self, ctx: &egui::Context, path: &Path) -> Result<(), DiagramError> {
        let bytes = std::fs::read(path).map_err(|source| DiagramError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let image = decode_diagram(&bytes)?;
        self.texture = Some(ctx.load_texture("body_diagram", image, egui::TextureOptions::LINEAR));
        self.diagram_path = Some(path.display().to_string());
        self.diagram_error = None;
        log::info!("loaded diagram image {}", path.display());
        Ok(())
    }

    fn submit(&mut self) {
        match self.tracker.submit() {
            Ok(()) => {}
            Err(FormError::Incomplete) => self.show_incomplete_notice = true,
            Err(FormError::Busy) => log::debug!("submit ignored, one is already in flight"),
        }
    }

    fn form_ui(&mut self, ui: &mut egui::Ui) {
        let form = &mut self.tracker.form;

        let selected = form.selected_part.map_or("None", |p| p.label());
        ui.label(
            RichText::new(format!("Selected Part: {selected}"))
                .size(18.0)
                .strong()
                .color(Color32::LIGHT_BLUE),
        );
        ui.add_space(8.0);

        let mut description = form.description.clone();
        ui.add(
            egui::TextEdit::singleline(&mut description)
                .hint_text("Describe the injury in detail")
                .desired_width(420.0),
        );
        if description != form.description {
            form.set_description(description);
        }

        let mut gender = form.gender;
        egui::ComboBox::from_id_salt("gender")
            .selected_text(gender.map_or("Select Gender", Gender::label))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut gender, None, "Select Gender");
                for g in Gender::ALL {
                    ui.selectable_value(&mut gender, Some(g), g.label());
                }
            });
        if gender != form.gender {
            form.set_gender(gender);
        }

        let submitting = self.tracker.is_submitting();
        let label = if submitting { "Submitting..." } else { "Submit" };
        if ui.add_enabled(!submitting, egui::Button::new(label)).clicked() {
            self.submit();
        }
    }

    fn records_ui(&self, ui: &mut egui::Ui) {
        ui.heading("Tracked Injuries");
        let records = self.tracker.records();
        if records.is_empty() {
            ui.label(RichText::new("No injuries tracked yet.").color(Color32::GRAY));
            return;
        }
        egui::ScrollArea::vertical().show(ui, |ui| {
            for record in records.all() {
                ui.group(|ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(RichText::new("Body Part:").strong());
                        ui.label(record.part.label());
                        ui.label("|");
                        ui.label(RichText::new("Description:").strong());
                        ui.label(&record.description);
                        ui.label("|");
                        ui.label(RichText::new("Gender:").strong());
                        ui.label(record.gender.label());
                    });
                });
            }
        });
    }

    fn diagram_ui(&mut self, ui: &mut egui::Ui) {
        // Fit the 150x420 box into the panel, keeping its aspect ratio.
        let avail = ui.available_size();
        let scale = (avail.x / DIAGRAM_SIZE.x)
            .min(avail.y / DIAGRAM_SIZE.y)
            .clamp(0.5, 4.0);
        let (rect, response) = ui.allocate_exact_size(DIAGRAM_SIZE * scale, egui::Sense::click());
        let painter = ui.painter_at(rect);

        if let Some(tex) = &self.texture {
            let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
            painter.image(tex.id(), rect, uv, Color32::WHITE);
        } else {
            painter.rect_filled(rect, 4.0, ui.visuals().extreme_bg_color);
        }

        let hovered = response
            .hover_pos()
            .map(|p| self.diagram.hit_test(to_logical(p, rect)));
        let selected = self.tracker.form.selected_part;

        for region in self.diagram.regions() {
            let points: Vec<Pos2> = region
                .outline()
                .into_iter()
                .map(|p| to_screen(p, rect))
                .collect();
            let stroke = if selected == Some(region.label) {
                Stroke::new(2.0, Color32::WHITE)
            } else if hovered == Some(Hit::Region(region.label)) {
                Stroke::new(1.0, Color32::LIGHT_GRAY)
            } else {
                Stroke::NONE
            };
            painter.add(egui::Shape::convex_polygon(points, region.color, stroke));
        }

        if response.clicked()
            && let Some(pos) = response.interact_pointer_pos()
        {
            match self.diagram.hit_test(to_logical(pos, rect)) {
                Hit::Region(part) => self.tracker.form.select_body_part(part),
                Hit::Background => self.tracker.form.clear_selection(),
                Hit::Outside => {}
            }
        }

        if let Some(Hit::Region(part)) = hovered {
            response.on_hover_text(part.label());
        }
    }

    fn incomplete_notice(&mut self, ctx: &egui::Context) {
        if !self.show_incomplete_notice {
            return;
        }
        let mut acknowledged = false;
        let modal = egui::Modal::new(egui::Id::new("incomplete_form")).show(ctx, |ui| {
            ui.label(FormError::Incomplete.to_string());
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                acknowledged = true;
            }
        });
        if acknowledged || modal.should_close() {
            self.show_incomplete_notice = false;
        }
    }
}

/// Decodes PNG or JPEG bytes into something egui can upload.
pub fn decode_diagram(bytes: &[u8]) -> Result<ColorImage, DiagramError> {
    let img = image::load_from_memory(bytes)?.to_rgba8();
    let size = [img.width() as usize, img.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, img.as_raw()))
}

impl eframe::App for TrackerApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.tracker.poll();
        if self.tracker.is_submitting() {
            // The submitter also wakes us up; this only covers a missed wake-up.
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                // NOTE: no File->Quit on web pages!
                let is_web = cfg!(target_arch = "wasm32");
                if !is_web {
                    ui.menu_button("File", |ui| {
                        #[cfg(all(not(target_arch = "wasm32"), not(target_os = "android")))]
                        if ui.button("Open diagram...").clicked()
                            && let Some(path) = FileDialog::new()
                                .add_filter("Image", &["png", "jpg", "jpeg"])
                                .pick_file()
                            && let Err(e) = self.load_diagram(ctx, &path)
                        {
                            log::warn!("{e}");
                            self.diagram_error = Some(e.to_string());
                        }
                        if ui.button("Quit").clicked() {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                    ui.add_space(16.0);
                }

                egui::widgets::global_theme_preference_buttons(ui);
            });
        });

        egui::SidePanel::right("diagram_panel")
            .resizable(false)
            .min_width(DIAGRAM_SIZE.x + 40.0)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(8.0);
                    self.diagram_ui(ui);
                    if let Some(err) = &self.diagram_error {
                        ui.colored_label(Color32::YELLOW, err);
                    } else if let Some(path) = &self.diagram_path {
                        ui.small(path.as_str());
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Injury Tracker");
            ui.label(INSTRUCTIONS);
            ui.separator();

            self.form_ui(ui);

            ui.separator();
            self.records_ui(ui);

            ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                egui::warn_if_debug_build(ui);
            });
        });

        self.incomplete_notice(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_decode_png() {
        let img = image::RgbaImage::from_pixel(3, 7, image::Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
            .unwrap();

        let decoded = decode_diagram(&bytes).unwrap();
        assert_eq!(decoded.size, [3, 7]);
        assert_eq!(decoded.pixels[0], Color32::from_rgb(10, 20, 30));
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(
            decode_diagram(b"not an image"),
            Err(DiagramError::Decode(_))
        ));
    }
}
