use {
    eframe::{
        Frame, Storage,
        egui::{
            Align, CentralPanel, Context, Layout, RichText, ScrollArea, TopBottomPanel, Ui,
            Visuals,
        },
    },
    std::sync::{
        Arc,
        mpsc::{Receiver, TryRecvError},
    },
};

use crate::{
    Cli,
    config::{PROVIDER, model_badge},
    data::SettingsStore,
    domain::AnalysisSettings,
    engine::{
        AnalysisError, AnalysisProvider, AnalysisSession, GeminiClient, JobRequest, JobResult,
        SharedProvider, Ticket, spawn_analysis,
    },
    ui::{
        CardView, UI_CONFIG, UI_TEXT, UiStyleExt, UploadEvent, Uploader, render_analysis_card,
        render_empty_state, render_settings_panel,
    },
};

#[cfg(debug_assertions)]
use crate::config::DF;

pub struct App {
    settings: AnalysisSettings,
    session: AnalysisSession,
    uploader: Uploader,
    provider: SharedProvider,
    model_badge: String,
    has_api_key: bool,
    job: Option<PendingJob>,
}

/// The request currently running in the background.
struct PendingJob {
    ticket: Ticket,
    rx: Receiver<JobResult>,
}

impl App {
    pub(crate) fn new(cc: &eframe::CreationContext<'_>, args: Cli) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let settings = cc
            .storage
            .map(|storage| storage.load_settings())
            .unwrap_or_default();

        #[cfg(target_arch = "wasm32")]
        let api_key = args.api_key.clone().or(option_env!("API_KEY").map(String::from));
        #[cfg(not(target_arch = "wasm32"))]
        let api_key = args.api_key.clone();

        let client = GeminiClient::new(api_key).with_model(args.model.clone());
        let has_api_key = client.has_api_key();
        if !has_api_key {
            log::warn!(
                "No API key: set {} or pass --api-key. Requests will fail.",
                PROVIDER.api_key_env
            );
        }

        #[cfg_attr(target_arch = "wasm32", allow(unused_mut))]
        let mut app = Self::from_parts(settings, Arc::new(client), has_api_key);
        #[cfg(not(target_arch = "wasm32"))]
        if let Some(path) = args.image {
            app.uploader.load_path(path, &cc.egui_ctx);
        }
        app
    }

    fn from_parts(settings: AnalysisSettings, provider: SharedProvider, has_api_key: bool) -> Self {
        let badge = format!(
            "{} {}",
            model_badge(provider.model()),
            UI_TEXT.model_active_suffix
        );
        Self {
            settings,
            session: AnalysisSession::new(),
            uploader: Uploader::default(),
            provider,
            model_badge: badge,
            has_api_key,
            job: None,
        }
    }

    fn settings_changed(&mut self, storage: Option<&mut (dyn Storage + 'static)>) {
        #[cfg(debug_assertions)]
        if DF.log_settings_store {
            log::info!("Settings changed: {:?}", self.settings);
        }
        if let Some(storage) = storage {
            storage.save_settings(&self.settings);
        }
    }

    fn handle_upload(&mut self, event: UploadEvent, ctx: &Context) {
        match event {
            UploadEvent::Submitted(uri) => self.submit(uri, ctx),
            // The running request is left alone and may still settle the session.
            UploadEvent::Cleared => self.session.clear(),
        }
    }

    fn submit(&mut self, image_data_uri: String, ctx: &Context) {
        let ticket = self.session.begin();
        let req = JobRequest {
            ticket,
            image_data_uri,
            settings: self.settings,
        };
        let rx = spawn_analysis(self.provider.clone(), req, ctx.clone());
        self.job = Some(PendingJob { ticket, rx });
    }

    fn poll_job(&mut self) {
        let Some(job) = &self.job else {
            return;
        };
        let (ticket, outcome, duration_ms) = match job.rx.try_recv() {
            Ok(done) => (done.ticket, done.result, done.duration_ms),
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                log::error!("Analysis {} worker stopped without a result", job.ticket);
                let lost = AnalysisError::Worker("analysis task ended without a result".into());
                (job.ticket, Err(lost), 0)
            }
        };
        self.job = None;

        if let Err(e) = &outcome {
            log::warn!("Analysis {} failed: {}", ticket, e);
        }
        self.session.resolve(ticket, outcome, duration_ms);
    }

    fn render_header(&self, ctx: &Context) {
        TopBottomPanel::top("header")
            .frame(UI_CONFIG.top_panel_frame())
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(&UI_TEXT.app_title_left)
                            .size(20.0)
                            .strong()
                            .color(UI_CONFIG.colors.heading),
                    );
                    ui.label(
                        RichText::new(&UI_TEXT.app_title_right)
                            .size(20.0)
                            .strong()
                            .color(UI_CONFIG.colors.accent),
                    );
                    ui.label_subdued(&UI_TEXT.app_tagline);

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.badge(format!("⚡ {}", self.model_badge), UI_CONFIG.colors.bullish);
                        if !self.has_api_key {
                            ui.label(
                                RichText::new(&UI_TEXT.missing_api_key)
                                    .small()
                                    .color(UI_CONFIG.colors.bearish),
                            );
                        }
                    });
                });
            });
    }

    fn render_inputs(&mut self, ui: &mut Ui, storage: Option<&mut (dyn Storage + 'static)>) {
        ui.heading(
            RichText::new(&UI_TEXT.page_heading)
                .strong()
                .color(UI_CONFIG.colors.heading),
        );
        ui.label(RichText::new(&UI_TEXT.page_intro).color(UI_CONFIG.colors.label));
        ui.add_space(12.0);

        if render_settings_panel(ui, &mut self.settings) {
            self.settings_changed(storage);
        }
        ui.add_space(12.0);

        let loading = self.session.is_loading();
        if let Some(event) = self.uploader.show(ui, loading) {
            self.handle_upload(event, ui.ctx());
        }

        if let Some(e) = self.session.error() {
            ui.add_space(12.0);
            UI_CONFIG
                .badge_frame(UI_CONFIG.colors.bearish)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal_wrapped(|ui| {
                        ui.label(
                            RichText::new(&UI_TEXT.error_prefix)
                                .strong()
                                .color(UI_CONFIG.colors.bearish),
                        );
                        ui.label(RichText::new(e.user_message()).color(UI_CONFIG.colors.bearish));
                    });
                });
        }

        if matches!(
            CardView::from(self.session.result(), self.session.is_loading()),
            CardView::Empty
        ) {
            render_empty_state(ui);
        }
    }

    fn render_results(&self, ui: &mut Ui) {
        let view = CardView::from(self.session.result(), self.session.is_loading());
        render_analysis_card(ui, view, &self.settings, self.session.completed());
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, frame: &mut Frame) {
        setup_custom_visuals(ctx);
        self.poll_job();
        self.render_header(ctx);

        CentralPanel::default()
            .frame(UI_CONFIG.central_panel_frame())
            .show(ctx, |ui| {
                ScrollArea::vertical().show(ui, |ui| {
                    ui.columns(2, |cols| {
                        let [left, right] = cols else {
                            return;
                        };
                        self.render_inputs(left, frame.storage_mut());
                        self.render_results(right);
                    });
                });
            });

        if self.session.is_loading() {
            // Keep the spinner moving
            ctx.request_repaint();
        }
    }

    fn save(&mut self, storage: &mut dyn Storage) {
        #[cfg(debug_assertions)]
        if DF.log_settings_store {
            log::info!("💾 SAVE [App]: {:?}", self.settings);
        }
        storage.save_settings(&self.settings);
    }
}

fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();
    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.central_panel;
    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.selection.bg_fill = UI_CONFIG.colors.accent;
    ctx.set_visuals(visuals);
    ctx.style_mut(|s| s.interaction.selectable_labels = false);
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::{
        data::MemoryStorage,
        engine::fakes::{FixedProvider, PanickingProvider},
    };
    use std::{
        thread,
        time::{Duration, Instant},
    };

    const CHART_URI: &str = "data:image/png;base64,AAAA";

    fn app_with(provider: SharedProvider) -> App {
        App::from_parts(AnalysisSettings::default(), provider, true)
    }

    fn submit_chart(app: &mut App, ctx: &Context) {
        app.handle_upload(UploadEvent::Submitted(CHART_URI.into()), ctx);
    }

    fn wait_for_job(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.job.is_some() && Instant::now() < deadline {
            app.poll_job();
            thread::sleep(Duration::from_millis(5));
        }
        assert!(app.job.is_none(), "job never finished");
    }

    #[test]
    fn settings_change_is_saved_right_away() {
        let mut app = app_with(Arc::new(FixedProvider::succeeding()));
        let mut store = MemoryStorage::new();

        app.settings.rsi.period = 21;
        app.settings.bollinger.std_dev = 2.5;
        app.settings_changed(Some(&mut store));

        assert_eq!(store.load_settings(), app.settings);
    }

    #[test]
    fn submitted_chart_settles_with_a_result() {
        let ctx = Context::default();
        let mut app = app_with(Arc::new(FixedProvider::succeeding()));

        submit_chart(&mut app, &ctx);
        assert!(app.session.is_loading());

        wait_for_job(&mut app);
        assert!(app.session.result().is_some());
        assert!(app.session.completed().is_some());
    }

    #[test]
    fn clearing_while_loading_does_not_cancel() {
        let ctx = Context::default();
        let mut app = app_with(Arc::new(FixedProvider::succeeding()));

        submit_chart(&mut app, &ctx);
        app.handle_upload(UploadEvent::Cleared, &ctx);
        assert!(!app.session.is_loading());
        assert!(app.job.is_some());

        wait_for_job(&mut app);
        assert!(app.session.result().is_some());
    }

    #[test]
    fn provider_failure_settles_as_error() {
        let ctx = Context::default();
        let mut app = app_with(Arc::new(FixedProvider::failing()));

        submit_chart(&mut app, &ctx);
        wait_for_job(&mut app);

        assert!(matches!(app.session.error(), Some(AnalysisError::EmptyResponse)));
    }

    #[test]
    fn worker_dying_without_a_result_settles_as_error() {
        let ctx = Context::default();
        let mut app = app_with(Arc::new(PanickingProvider));

        submit_chart(&mut app, &ctx);
        wait_for_job(&mut app);

        assert!(!app.session.is_loading());
        assert!(matches!(app.session.error(), Some(AnalysisError::Worker(_))));
    }

    #[test]
    fn badge_names_the_provider_model() {
        let app = app_with(Arc::new(FixedProvider::succeeding()));
        assert_eq!(app.model_badge, format!("FIXED {}", UI_TEXT.model_active_suffix));
    }
}
