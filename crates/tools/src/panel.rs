/// Debug control panel drawn as an egui window in the top-right corner.
///
/// No controls are registered; the panel only shows its title bar and an
/// empty body.
#[derive(Debug, Clone)]
pub struct DebugPanel {
    title: String,
    open: bool,
    destroyed: bool,
}

impl DebugPanel {
    pub fn new(title: impl Into<String>, open: bool) -> Self {
        let title = title.into();
        tracing::debug!(%title, "debug panel created");
        Self {
            title,
            open,
            destroyed: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Expanded (true) or collapsed to its title bar.
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Draw the panel. A destroyed panel draws nothing.
    pub fn show(&mut self, ctx: &egui::Context) {
        if self.destroyed {
            return;
        }
        egui::Window::new(self.title.as_str())
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-15.0, 0.0))
            .default_open(self.open)
            .resizable(false)
            .default_width(245.0)
            .show(ctx, |_ui| {});
    }

    /// Remove the panel for good.
    pub fn destroy(&mut self) {
        self.destroyed = true;
        tracing::debug!(title = %self.title, "debug panel destroyed");
    }
}

impl Default for DebugPanel {
    fn default() -> Self {
        Self::new("Controls", true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Windows are measured invisibly on their first frame, so draw two.
    fn run_frame(panel: &mut DebugPanel) -> egui::FullOutput {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| panel.show(ctx));
        ctx.run(egui::RawInput::default(), |ctx| panel.show(ctx))
    }

    #[test]
    fn default_panel_is_open_and_titled() {
        let panel = DebugPanel::default();
        assert_eq!(panel.title(), "Controls");
        assert!(panel.is_open());
        assert!(!panel.is_destroyed());
    }

    #[test]
    fn shows_a_window() {
        let mut panel = DebugPanel::default();
        let output = run_frame(&mut panel);
        assert!(!output.shapes.is_empty());
    }

    #[test]
    fn destroyed_panel_draws_nothing() {
        let mut panel = DebugPanel::default();
        panel.destroy();
        let output = run_frame(&mut panel);
        assert!(output.shapes.is_empty());
    }
}
