use {
    crate::{
        data::ChartImage,
        ui::{UI_CONFIG, UI_TEXT, UiStyleExt},
    },
    eframe::egui::{
        Align, Color32, Context, DroppedFile, Image, Layout, Rect, RichText, Sense, Stroke,
        StrokeKind, Ui, Vec2, load::Bytes,
    },
    std::path::PathBuf,
};

#[cfg(debug_assertions)]
use crate::config::DF;

#[cfg(not(target_arch = "wasm32"))]
use {
    crate::data::{ImageError, mime_from_extension, spawn_image_read},
    eframe::egui::{Button, Key, TextEdit},
    std::{path::Path, sync::mpsc::Receiver},
};

/// What the uploader asks of the app this frame.
#[derive(Debug)]
pub(crate) enum UploadEvent {
    /// A new chart was accepted; carries its data URI.
    Submitted(String),
    Cleared,
}

/// How a dropped file should be taken in.
#[derive(Debug)]
pub(crate) enum Intake {
    Ready(ChartImage),
    ReadFromDisk(PathBuf),
    Ignored,
}

/// Browsers hand over bytes; native drops only carry a path.
pub(crate) fn classify_drop(file: &DroppedFile) -> Intake {
    if let Some(bytes) = &file.bytes {
        let name = if file.name.is_empty() {
            file.path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        } else {
            file.name.clone()
        };
        return match ChartImage::accept(name, Some(file.mime.as_str()), bytes.clone()) {
            Some(image) => Intake::Ready(image),
            None => Intake::Ignored,
        };
    }

    #[cfg(not(target_arch = "wasm32"))]
    if let Some(path) = &file.path {
        if mime_from_extension(path).is_some() {
            return Intake::ReadFromDisk(path.clone());
        }
    }
    Intake::Ignored
}

#[derive(Default)]
pub(crate) struct Uploader {
    preview: Option<ChartImage>,
    #[cfg(not(target_arch = "wasm32"))]
    path_input: String,
    #[cfg(not(target_arch = "wasm32"))]
    pending_read: Option<Receiver<Result<ChartImage, ImageError>>>,
}

impl Uploader {
    pub(crate) fn has_preview(&self) -> bool {
        self.preview.is_some()
    }

    /// Show `image` and hand back its data URI for submission. A replaced preview is
    /// evicted from the image loaders.
    pub(crate) fn set_image(&mut self, ctx: &Context, image: ChartImage) -> String {
        let uri = image.data_uri().to_owned();
        if let Some(old) = self.preview.replace(image) {
            ctx.forget_image(&old.texture_uri());
        }
        uri
    }

    fn clear(&mut self, ctx: &Context) {
        if let Some(image) = self.preview.take() {
            ctx.forget_image(&image.texture_uri());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.path_input.clear();
            self.pending_read = None;
        }
    }

    /// Start reading a file in the background. The result is picked up by a later `show`.
    #[cfg(not(target_arch = "wasm32"))]
    pub(crate) fn load_path(&mut self, path: PathBuf, ctx: &Context) {
        self.pending_read = Some(spawn_image_read(path, ctx.clone()));
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn poll_pending_read(&mut self) -> Option<ChartImage> {
        let rx = self.pending_read.as_ref()?;
        let outcome = rx.try_recv().ok()?;
        self.pending_read = None;
        match outcome {
            Ok(image) => Some(image),
            Err(e) => {
                log::warn!("Chart image not loaded: {}", e);
                None
            }
        }
    }

    pub(crate) fn show(&mut self, ui: &mut Ui, loading: bool) -> Option<UploadEvent> {
        let mut event = None;

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(image) = self.poll_pending_read() {
            if !loading {
                event = Some(UploadEvent::Submitted(self.set_image(ui.ctx(), image)));
            }
        }

        // Drops only land on the empty drop zone; a shown chart is replaced via "Upload New".
        if !loading && event.is_none() && !self.has_preview() {
            event = self.take_drop(ui).map(UploadEvent::Submitted);
        }

        if self.has_preview() {
            if self.render_preview(ui, loading) {
                self.clear(ui.ctx());
                event = Some(UploadEvent::Cleared);
            }
        } else {
            ui.add_enabled_ui(!loading, |ui| self.render_drop_zone(ui));
        }

        event
    }

    fn take_drop(&mut self, ui: &mut Ui) -> Option<String> {
        let dropped = ui.ctx().input(|i| i.raw.dropped_files.clone());
        // Only the first file counts.
        let file = dropped.first()?;
        match classify_drop(file) {
            Intake::Ready(image) => Some(self.set_image(ui.ctx(), image)),
            #[cfg(not(target_arch = "wasm32"))]
            Intake::ReadFromDisk(path) => {
                self.load_path(path, ui.ctx());
                None
            }
            #[cfg(target_arch = "wasm32")]
            Intake::ReadFromDisk(_) => None,
            Intake::Ignored => {
                #[cfg(debug_assertions)]
                if DF.log_image_input {
                    log::info!("Dropped file '{}' ignored", file.name);
                }
                None
            }
        }
    }

    /// Returns true when the user asked for a new chart.
    fn render_preview(&self, ui: &mut Ui, loading: bool) -> bool {
        let Some(image) = &self.preview else {
            return false;
        };
        let mut clear = false;

        UI_CONFIG.card_frame().show(ui, |ui| {
            ui.vertical_centered(|ui| {
                let response = ui.add(
                    Image::from_bytes(image.texture_uri(), Bytes::Shared(image.bytes.clone()))
                        .max_height(UI_CONFIG.max_preview_height)
                        .maintain_aspect_ratio(true),
                );

                if loading {
                    let rect = response.rect;
                    ui.painter()
                        .rect_filled(rect, 6.0, Color32::from_black_alpha(150));
                    let overlay = Rect::from_center_size(rect.center(), Vec2::new(220.0, 36.0));
                    ui.painter().rect_filled(overlay, 6.0, UI_CONFIG.colors.card_inset);
                    ui.put(overlay, |ui: &mut Ui| {
                        ui.horizontal_centered(|ui| {
                            ui.add_space(12.0);
                            ui.spinner();
                            ui.label(
                                RichText::new(&UI_TEXT.upload_processing)
                                    .color(UI_CONFIG.colors.text_primary),
                            );
                        })
                        .response
                    });
                } else {
                    ui.add_space(6.0);
                    clear = ui
                        .button(
                            RichText::new(&UI_TEXT.upload_new)
                                .strong()
                                .color(UI_CONFIG.colors.bearish),
                        )
                        .clicked();
                }
                ui.label_subdued(&image.name);
            });
        });
        clear
    }

    fn render_drop_zone(&mut self, ui: &mut Ui) {
        let hovering = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());
        let size = Vec2::new(ui.available_width(), UI_CONFIG.drop_zone_height);
        let (rect, _) = ui.allocate_exact_size(size, Sense::hover());

        let (fill, border) = if hovering {
            (
                UI_CONFIG.colors.accent.gamma_multiply(0.1),
                UI_CONFIG.colors.accent,
            )
        } else {
            (UI_CONFIG.colors.card_inset, UI_CONFIG.colors.border)
        };
        ui.painter().rect(
            rect,
            10.0,
            fill,
            Stroke::new(2.0, border),
            StrokeKind::Inside,
        );

        ui.put(rect, |ui: &mut Ui| {
            ui.with_layout(Layout::top_down(Align::Center), |ui| {
                ui.add_space(UI_CONFIG.drop_zone_height * 0.3);
                ui.label(RichText::new("⬆").size(28.0).color(UI_CONFIG.colors.accent));
                let prompt = if hovering {
                    &UI_TEXT.upload_drop_now
                } else {
                    &UI_TEXT.upload_prompt
                };
                ui.label(
                    RichText::new(prompt)
                        .size(16.0)
                        .color(UI_CONFIG.colors.text_primary),
                );
                ui.label_subdued(&UI_TEXT.upload_formats);
            })
            .response
        });

        #[cfg(not(target_arch = "wasm32"))]
        self.render_path_input(ui);
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn render_path_input(&mut self, ui: &mut Ui) {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let edit = ui.add(
                TextEdit::singleline(&mut self.path_input)
                    .hint_text(UI_TEXT.upload_path_hint.as_str())
                    .desired_width(ui.available_width() - 60.0),
            );
            let submitted =
                edit.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
            let busy = self.pending_read.is_some();
            if (ui
                .add_enabled(!busy, Button::new(UI_TEXT.upload_load.as_str()))
                .clicked()
                || submitted)
                && !self.path_input.trim().is_empty()
            {
                let path = Path::new(self.path_input.trim()).to_path_buf();
                self.load_path(path, ui.ctx());
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn dropped(name: &str, mime: &str, bytes: Option<&[u8]>) -> DroppedFile {
        DroppedFile {
            name: name.to_owned(),
            mime: mime.to_owned(),
            bytes: bytes.map(Arc::from),
            ..Default::default()
        }
    }

    #[test]
    fn browser_drop_with_image_bytes_is_ready() {
        let file = dropped("chart.png", "image/png", Some(&[1, 2, 3]));
        match classify_drop(&file) {
            Intake::Ready(image) => assert_eq!(image.mime, "image/png"),
            other => panic!("expected ready, got {:?}", other),
        }
    }

    #[test]
    fn non_image_drop_is_ignored() {
        let file = dropped("notes.txt", "text/plain", Some(b"hello"));
        assert!(matches!(classify_drop(&file), Intake::Ignored));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_drop_reads_image_paths_only() {
        let image = DroppedFile {
            path: Some(PathBuf::from("/tmp/shot.webp")),
            ..Default::default()
        };
        assert!(matches!(classify_drop(&image), Intake::ReadFromDisk(_)));

        let text = DroppedFile {
            path: Some(PathBuf::from("/tmp/readme.md")),
            ..Default::default()
        };
        assert!(matches!(classify_drop(&text), Intake::Ignored));
    }

    fn chart(name: &str) -> ChartImage {
        ChartImage::accept(name, Some("image/png"), vec![9u8; 4]).unwrap()
    }

    #[test]
    fn set_image_returns_data_uri() {
        let ctx = Context::default();
        let mut uploader = Uploader::default();
        let uri = uploader.set_image(&ctx, chart("a.png"));
        assert!(uri.starts_with("data:image/png;base64,"));
        assert!(uploader.has_preview());
    }

    #[test]
    fn replacing_a_chart_releases_the_old_texture() {
        let ctx = Context::default();
        let mut uploader = Uploader::default();

        let first = chart("first.png");
        let first_uri = first.texture_uri();
        uploader.set_image(&ctx, first.clone());
        ctx.include_bytes(first_uri.clone(), Bytes::Shared(first.bytes.clone()));
        assert!(ctx.try_load_bytes(&first_uri).is_ok());

        let second = chart("second.png");
        let second_uri = second.texture_uri();
        uploader.set_image(&ctx, second.clone());
        ctx.include_bytes(second_uri.clone(), Bytes::Shared(second.bytes.clone()));

        assert!(ctx.try_load_bytes(&first_uri).is_err());
        assert!(ctx.try_load_bytes(&second_uri).is_ok());
    }

    #[test]
    fn clearing_releases_the_texture() {
        let ctx = Context::default();
        let mut uploader = Uploader::default();
        let image = chart("a.png");
        let uri = image.texture_uri();
        uploader.set_image(&ctx, image.clone());
        ctx.include_bytes(uri.clone(), Bytes::Shared(image.bytes.clone()));

        uploader.clear(&ctx);
        assert!(!uploader.has_preview());
        assert!(ctx.try_load_bytes(&uri).is_err());
    }
}
