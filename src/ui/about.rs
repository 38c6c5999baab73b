// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Static help page.

const GESTURES: &[(&str, &str)] = &[
    ("Click", "Add a dot at the pointer; it takes the next number"),
    ("Drag a dot", "Move it; its number stays the same"),
    ("Drag empty canvas", "Pan the view"),
    ("Right-click a dot", "Delete it; later dots are renumbered"),
    ("Mouse wheel", "Zoom in or out"),
];

pub fn show(ui: &mut egui::Ui) {
    ui.heading("About Dot Sketch");
    ui.add_space(8.0);
    ui.label(
        "Place numbered dots on the canvas, connect them in order, \
         and export the result as JSON, SVG or PNG.",
    );
    ui.add_space(12.0);

    ui.strong("Canvas gestures");
    egui::Grid::new("gestures").num_columns(2).striped(true).show(ui, |ui| {
        for (gesture, effect) in GESTURES {
            ui.label(*gesture);
            ui.label(*effect);
            ui.end_row();
        }
    });

    ui.add_space(12.0);
    ui.strong("Storage");
    ui.label("Projects are saved automatically after every change.");
    ui.add_space(8.0);
    ui.strong("Upload");
    ui.label(
        "Uploads use the endpoint from the configuration file. A token, if \
         required, is read from the environment variable named there.",
    );
}
