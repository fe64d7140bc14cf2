use console::style;

/// Status lines for CLI commands
pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    /// Indented `label: value` line under a status line
    pub fn detail(&self, label: &str, value: &str) {
        println!("  {:<9}{}", format!("{}:", label), value);
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
