//! Coin Dashboard Main Application
//! Toolbar on top, widget grid in the centre, status line at the bottom.

use crate::config::DashboardSettings;
use crate::data::{DataStore, FetchEvent, HttpMarketSource, MarketSource, Notify, Poller};
use crate::gui::theme::{Palette, ThemeApplier};
use crate::gui::{GridAction, GridView, Toolbar, ToolbarAction};
use crate::layout::{Layouts, LayoutManager, SlotStore, WidgetKind, EXPORT_FILE_NAME};
use crate::view::ViewState;
use crate::widgets;
use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::time::Duration;

/// Main application window.
pub struct DashboardApp {
    store: DataStore,
    events_rx: Receiver<FetchEvent>,
    poller: Option<Poller>,
    poll_interval: Duration,

    layout: LayoutManager<Box<dyn SlotStore>>,
    view_states: HashMap<String, ViewState>,

    toolbar: Toolbar,
    grid: GridView,
    theme: ThemeApplier,
}

impl DashboardApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: DashboardSettings,
        slots: Box<dyn SlotStore>,
    ) -> Self {
        let mut toolbar = Toolbar::new();
        let (events_tx, events_rx) = channel();

        let ctx = cc.egui_ctx.clone();
        let notify: Notify = Arc::new(move || ctx.request_repaint());

        // Polling starts with the window and stops when the app is dropped
        let poller = match HttpMarketSource::new(settings.endpoint.clone()) {
            Ok(source) => {
                tracing::info!(endpoint = %settings.endpoint, "polling market data");
                let source: Arc<dyn MarketSource> = Arc::new(source);
                Some(Poller::start(source, settings.poll_interval, events_tx, notify))
            }
            Err(e) => {
                tracing::error!(error = %e, "market source unavailable");
                toolbar.error(format!("Market data unavailable: {}", e));
                None
            }
        };

        Self {
            store: DataStore::new(),
            events_rx,
            poller,
            poll_interval: settings.poll_interval,
            layout: LayoutManager::load(slots),
            view_states: HashMap::new(),
            toolbar,
            grid: GridView::new(),
            theme: ThemeApplier::default(),
        }
    }

    fn handle_add_widget(&mut self, kind: WidgetKind) {
        if let Err(e) = self.layout.add_widget(kind) {
            tracing::error!(error = %e, "failed to save new widget");
            self.toolbar.error(e.to_string());
        }
    }

    fn handle_delete_widget(&mut self, id: &str) {
        self.view_states.remove(id);
        if let Err(e) = self.layout.delete_widget(id) {
            tracing::error!(error = %e, "failed to save widget removal");
            self.toolbar.error(e.to_string());
        }
    }

    fn handle_toggle_theme(&mut self) {
        if let Err(e) = self.layout.toggle_theme() {
            tracing::error!(error = %e, "failed to save theme");
            self.toolbar.error(e.to_string());
        }
    }

    fn handle_layout_change(&mut self, layouts: Layouts) {
        if let Err(e) = self.layout.update_layout(layouts) {
            tracing::error!(error = %e, "failed to save layout");
            self.toolbar.error(e.to_string());
        }
    }

    /// Handle configuration export - ask for a location and write the document
    fn handle_export(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(EXPORT_FILE_NAME)
            .save_file()
        else {
            return; // User cancelled
        };

        match self.layout.export_to_path(&path) {
            Ok(()) => self
                .toolbar
                .info(format!("Configuration exported to {}", path.display())),
            Err(e) => {
                tracing::warn!(error = %e, "export failed");
                self.toolbar.error(e.to_string());
            }
        }
    }

    /// Handle configuration import - the current config survives a bad file
    fn handle_import(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        else {
            return;
        };

        match self.layout.import_from_path(&path) {
            Ok(()) => {
                let layout = &self.layout;
                self.view_states
                    .retain(|id, _| layout.config().widget(id).is_some());
                self.toolbar.info(format!(
                    "Imported {} widgets from {}",
                    self.layout.widgets().len(),
                    path.display()
                ));
            }
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "import failed");
                self.toolbar.error(e.to_string());
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply fetch results delivered since the last frame
        self.store.pump(&self.events_rx);
        self.theme.apply(ctx, self.layout.theme());

        if self.poller.as_ref().is_some_and(Poller::is_running) {
            ctx.request_repaint_after(self.poll_interval);
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(4.0);
            let action = self.toolbar.show(ui, self.layout.theme());
            ui.add_space(4.0);

            match action {
                ToolbarAction::AddWidget(kind) => self.handle_add_widget(kind),
                ToolbarAction::ToggleTheme => self.handle_toggle_theme(),
                ToolbarAction::Export => self.handle_export(),
                ToolbarAction::Import => self.handle_import(),
                ToolbarAction::None => {}
            }
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            self.toolbar.show_status(ui, &self.store);
        });

        let palette = Palette::for_theme(self.layout.theme());
        let action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if self.layout.widgets().is_empty() {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            egui::RichText::new("No widgets - add one from the toolbar").size(20.0),
                        );
                    });
                    return GridAction::None;
                }

                let Self {
                    grid,
                    layout,
                    store,
                    view_states,
                    ..
                } = &mut *self;
                let records = store.records();

                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        grid.show(ui, layout.config(), &palette, |ui, widget| {
                            let view_state = view_states.entry(widget.id.clone()).or_default();
                            widgets::show_widget(ui, widget, records, view_state, &palette);
                        })
                    })
                    .inner
            })
            .inner;

        match action {
            GridAction::Delete(id) => self.handle_delete_widget(&id),
            GridAction::Layout(layouts) => self.handle_layout_change(layouts),
            GridAction::None => {}
        }
    }
}
