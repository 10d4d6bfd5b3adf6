//! Minimal graphical front-end for the organizer.
//!
//! A folder picker, Preview and Organize buttons, and a scrolling log pane.
//! All business logic lives in [`crate::organizer`]; this window only calls
//! `organize` in the two modes and renders the report as log lines.

use crate::organizer::FileOrganizer;
use eframe::egui;

pub struct OrganizerApp {
    folder: String,
    log: Vec<String>,
}

impl OrganizerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            folder: String::new(),
            log: vec!["Select a folder to begin.".to_string()],
        }
    }

    fn log(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
    }

    fn run_organize(&mut self, dry_run: bool) {
        if self.folder.trim().is_empty() {
            self.log("Please select a folder first.");
            return;
        }

        let folder = self.folder.clone();
        let organizer = match FileOrganizer::new(&folder) {
            Ok(organizer) => organizer,
            Err(e) => {
                self.log(format!("Error: {}", e));
                return;
            }
        };

        match organizer.organize(dry_run) {
            Ok(report) => {
                if dry_run {
                    self.log("--- Preview (no changes were made) ---");
                } else {
                    self.log("--- Result ---");
                }
                for (category, records) in report.iter() {
                    if records.is_empty() {
                        continue;
                    }
                    self.log(format!(
                        "{} ({} files):",
                        category.dir_name().to_uppercase(),
                        records.len()
                    ));
                    for record in records {
                        self.log(format!(
                            "  - {} -> {}/{}",
                            record.file_name,
                            category.dir_name(),
                            record.new_name
                        ));
                    }
                }
                for failure in report.failures() {
                    self.log(format!("  ! {}: {}", failure.file_name, failure.error));
                }
                self.log(format!("Total: {} files.", report.total()));
            }
            Err(e) => self.log(format!("Error: {}", e)),
        }
    }
}

impl eframe::App for OrganizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("tidydesk file organizer");
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label("Folder:");
                ui.text_edit_singleline(&mut self.folder);
                if ui.button("Browse…").clicked() {
                    if let Some(folder) = rfd::FileDialog::new().pick_folder() {
                        self.folder = folder.display().to_string();
                        let line = format!("Selected folder: {}", self.folder);
                        self.log(line);
                    }
                }
            });

            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.button("Preview changes").clicked() {
                    self.run_organize(true);
                }
                if ui.button("Organize files").clicked() {
                    self.run_organize(false);
                }
            });

            ui.separator();
            egui::ScrollArea::vertical()
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for line in &self.log {
                        ui.monospace(line);
                    }
                });
        });
    }
}

/// Opens the organizer window and blocks until it is closed.
pub fn run() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([620.0, 440.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        "tidydesk",
        options,
        Box::new(|cc| Box::new(OrganizerApp::new(cc))),
    )
}
