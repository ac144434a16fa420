//! Terminal progress bar fed by recovery progress callbacks

use indicatif::{ProgressBar, ProgressStyle};

const STEPS: u64 = 100;

pub struct Progress {
    bar: Option<ProgressBar>,
}

impl Progress {
    /// A bar showing `message`, or a no-op when disabled
    #[must_use]
    pub fn bar(enabled: bool, message: &str) -> Self {
        if !enabled {
            return Self { bar: None };
        }

        let bar = ProgressBar::new(STEPS);
        bar.set_style(
            ProgressStyle::with_template("{msg:>12} {bar:40.cyan/blue} {percent:>3}% {prefix}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    /// Show the item about to be processed and how far along the pass is
    pub fn update(&self, item: &str, fraction: f32) {
        if let Some(bar) = &self.bar {
            bar.set_prefix(item.to_string());
            bar.set_position((fraction.clamp(0.0, 1.0) * STEPS as f32).round() as u64);
        }
    }

    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_bar_is_noop() {
        let progress = Progress::bar(false, "recovering");
        progress.update("Hand", 0.5);
        progress.finish();
        assert!(progress.bar.is_none());
    }

    #[test]
    fn test_update_sets_position() {
        let progress = Progress::bar(true, "recovering");
        progress.update("Hand", 0.25);
        assert_eq!(progress.bar.as_ref().unwrap().position(), 25);
        progress.update("Hand", 3.0);
        assert_eq!(progress.bar.as_ref().unwrap().position(), STEPS);
        progress.finish();
    }
}
