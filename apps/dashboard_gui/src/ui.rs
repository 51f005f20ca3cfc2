//! Root view: renders whichever of the four bootstrap states the snapshot
//! selects.

use bootstrap::{select_view, TreeView, ViewState};
use crossbeam_channel::Receiver;
use eframe::egui;
use shared::layout::ComponentNode;

use crate::backend::ViewSnapshot;

pub struct DashboardApp {
    snapshot_rx: Receiver<ViewSnapshot>,
    latest: Option<ViewSnapshot>,
}

impl DashboardApp {
    pub fn new(snapshot_rx: Receiver<ViewSnapshot>) -> Self {
        Self {
            snapshot_rx,
            latest: None,
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Ok(snapshot) = self.snapshot_rx.try_recv() {
            self.latest = Some(snapshot);
        }

        egui::CentralPanel::default().show(ctx, |ui| match &self.latest {
            None => loading_view(ui),
            Some(snapshot) => match select_view(&snapshot.state, snapshot.error_loading) {
                ViewState::Loading => loading_view(ui),
                ViewState::LayoutError => error_view(ui, "Error loading layout"),
                ViewState::DependenciesError => error_view(ui, "Error loading dependencies"),
                ViewState::Hydrated(tree) => hydrated_view(ui, &tree),
            },
        });
    }
}

fn loading_view(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        ui.spinner();
        ui.label("Loading...");
    });
}

fn error_view(ui: &mut egui::Ui, message: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        ui.colored_label(egui::Color32::from_rgb(200, 60, 60), message);
    });
}

fn hydrated_view(ui: &mut egui::Ui, tree: &TreeView) {
    let render = |ui: &mut egui::Ui| {
        if tree.loading_state.is_loading {
            let target = tree
                .loading_state
                .component_name
                .as_deref()
                .unwrap_or("component");
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(format!("Updating {target}..."));
            });
        }
        egui::ScrollArea::vertical().show(ui, |ui| {
            component_view(ui, &tree.layout);
        });
    };

    if tree.wrap_error_boundary {
        // Global error boundary: a recoverable frame around the whole tree.
        egui::Frame::group(ui.style())
            .stroke(egui::Stroke::new(1.0, egui::Color32::DARK_GRAY))
            .show(ui, render);
    } else {
        render(ui);
    }
}

fn component_view(ui: &mut egui::Ui, node: &ComponentNode) {
    let title = match node.id() {
        Some(id) => format!("{} [{id}]", node.component_type),
        None => node.component_type.clone(),
    };
    ui.group(|ui| {
        ui.strong(title);
        for (prop, value) in &node.props {
            if prop == "id" {
                continue;
            }
            ui.monospace(format!("{prop}: {value}"));
        }
        for child in &node.children {
            component_view(ui, child);
        }
    });
}
