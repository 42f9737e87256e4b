use eframe::egui;
use tokio::runtime::Handle;

use crate::config::Config;
use crate::data::loader::ImageSource;
use crate::state::AppState;
use crate::store::{ObserverId, ViewStore};
use crate::ui::{grid, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct BirdGalleryApp<S> {
    pub state: AppState,
    store: ViewStore<S>,
    repaint: ObserverId,
    runtime: Handle,
    config: Config,
}

impl<S: ImageSource> BirdGalleryApp<S> {
    /// Wire the store to the window and start the first fetch.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        store: ViewStore<S>,
        runtime: Handle,
        config: Config,
    ) -> Self {
        let ctx = cc.egui_ctx.clone();
        let repaint = store.subscribe(move |_| ctx.request_repaint());

        let app = Self {
            state: AppState::default(),
            store,
            repaint,
            runtime,
            config,
        };
        app.refresh();
        app
    }

    fn refresh(&self) {
        self.store.spawn_refresh(&self.runtime);
    }
}

impl<S> Drop for BirdGalleryApp<S> {
    fn drop(&mut self) {
        // The window is closing; stop requesting repaints.
        self.store.unsubscribe(self.repaint);
    }
}

impl<S: ImageSource> eframe::App for BirdGalleryApp<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.sync(self.store.observe());

        let mut reload = false;

        // ---- Top panel: title, reload, counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            reload |= panels::top_bar(ui, &self.state);
        });

        // ---- Central panel: tabs + grid ----
        egui::CentralPanel::default().show(ctx, |ui| {
            reload |= grid::gallery(ui, &mut self.state, &self.config);
        });

        if reload {
            self.refresh();
        }
    }
}
