use eframe::egui::{self, Ui};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Simulation");
        ui.separator();
        ui.add_space(4.0);

        ui.add(egui::Slider::new(&mut self.draft.peer_count, 0..=300).text("peers"))
            .on_hover_text("End-user peers; a share of them become storage peers.");
        ui.add(egui::Slider::new(&mut self.draft.validator_count, 0..=20).text("validators"));
        ui.add(
            egui::Slider::new(&mut self.draft.storage_fraction, 0.0..=1.0)
                .text("storage share"),
        );

        ui.separator();

        ui.add(
            egui::Slider::new(&mut self.draft.connection_distance, 50.0..=600.0)
                .text("link distance"),
        )
        .on_hover_text("3D distance under which two nodes are linked.");
        ui.add(egui::Slider::new(&mut self.draft.depth, 0.0..=2000.0).text("depth"));
        ui.add(
            egui::Slider::new(&mut self.draft.perspective, 100.0..=2000.0).text("perspective"),
        );
        ui.add(
            egui::Slider::new(&mut self.draft.influence_radius, 10.0..=600.0)
                .text("pointer radius"),
        );

        ui.separator();

        ui.add(
            egui::Slider::new(&mut self.draft.spawn_probability, 0.0..=0.01)
                .logarithmic(true)
                .text("packet rate"),
        );
        let mut capped = self.draft.max_packets.is_some();
        ui.checkbox(&mut capped, "Cap in-flight packets")
            .on_hover_text("Without a cap, packet count can grow until the next reset.");
        match (capped, self.draft.max_packets) {
            (true, Some(mut ceiling)) => {
                ui.add(egui::Slider::new(&mut ceiling, 16..=4096).text("ceiling"));
                self.draft.max_packets = Some(ceiling);
            }
            (true, None) => self.draft.max_packets = Some(512),
            (false, _) => self.draft.max_packets = None,
        }

        ui.add_space(8.0);
        let valid = self.draft.validate();
        if let Err(err) = &valid {
            ui.colored_label(egui::Color32::from_rgb(248, 113, 113), err.to_string());
        }

        ui.horizontal(|ui| {
            let dirty = self.draft != self.config;
            if ui
                .add_enabled(dirty && valid.is_ok(), egui::Button::new("Apply"))
                .clicked()
            {
                self.config = self.draft.clone();
                self.restart_graph();
            }
            if ui.add_enabled(dirty, egui::Button::new("Revert")).clicked() {
                self.draft = self.config.clone();
            }
        });
    }
}
