fn main() -> Result<(), eframe::Error> {
    tidydesk::gui::run()
}
