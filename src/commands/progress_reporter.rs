use crate::probe::ProbeReading;
use crate::tracking::{LimitExceededError, Phase, Progress, Task};
use core::fmt::{Debug, Formatter};
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const BAR_TEMPLATE: &str = "{prefix:>12.bold.cyan} [{bar:25}] {msg}";
const BAR_TEMPLATE_NO_COLOR: &str = "{prefix:>12} [{bar:25}] {msg}";

/// Bars count whole percent.
const BAR_LENGTH: u64 = 100;

/// Shows one progress bar per task on stderr, prefixed by the current phase.
pub struct ProgressReporter {
    multi: MultiProgress,
    bars: Mutex<HashMap<Arc<str>, ProgressBar>>,
    phase: Mutex<Phase>,
    style: ProgressStyle,
}

impl ProgressReporter {
    /// Create a reporter that draws to stderr.
    ///
    /// When `use_colors` is false, progress bar chrome is rendered without ANSI styling.
    #[must_use]
    pub fn new(use_colors: bool) -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr(), use_colors)
    }

    fn with_draw_target(target: ProgressDrawTarget, use_colors: bool) -> Self {
        let template = if use_colors { BAR_TEMPLATE } else { BAR_TEMPLATE_NO_COLOR };

        Self {
            multi: MultiProgress::with_draw_target(target),
            bars: Mutex::new(HashMap::new()),
            phase: Mutex::new(Phase::Discovery),
            style: ProgressStyle::default_bar()
                .template(template)
                .expect("could not create progress bar style")
                .progress_chars("=> "),
        }
    }

    /// Run `f` against the task's bar, creating the bar on first use.
    fn with_bar(&self, task: &Task, f: impl FnOnce(&ProgressBar)) {
        let mut bars = self.bars.lock().expect("lock poisoned");
        let bar = bars.entry(Arc::clone(task.name_arc())).or_insert_with(|| {
            let bar = self.multi.add(ProgressBar::new(BAR_LENGTH));
            bar.set_style(self.style.clone());
            bar.set_prefix(self.phase.lock().expect("lock poisoned").label());
            bar.set_message(task.name().to_string());
            bar
        });

        f(bar);
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the percentage is clamped to the bar range first"
)]
fn bar_position(percentage: f64) -> u64 {
    percentage.clamp(0.0, 100.0).round() as u64
}

impl Progress for ProgressReporter {
    fn set_phase(&self, phase: Phase) {
        *self.phase.lock().expect("lock poisoned") = phase;

        for bar in self.bars.lock().expect("lock poisoned").values() {
            if !bar.is_finished() {
                bar.set_prefix(phase.label());
            }
        }
    }

    fn size_discovered(&self, task: &Task, total: u64) {
        self.with_bar(task, |bar| bar.set_message(format!("{task}: total of {total}")));
    }

    fn update(&self, task: &Task, reading: ProbeReading, total: u64) {
        let percentage = reading.percentage_of(total);

        self.with_bar(task, |bar| {
            bar.set_position(bar_position(percentage));
            if reading.actual() >= total {
                bar.finish_with_message(format!("{task}: done"));
            } else {
                bar.set_message(format!("{task}: {}/{total} ({percentage:.2}%)", reading.actual()));
            }
        });
    }

    fn abandoned(&self, task: &Task, error: &LimitExceededError) {
        self.with_bar(task, |bar| bar.abandon_with_message(format!("{task}: gave up, {}", error.last_error().kind())));
    }

    fn done(&self) {
        for bar in self.bars.lock().expect("lock poisoned").values() {
            if !bar.is_finished() {
                bar.abandon();
            }
        }
    }
}

impl Debug for ProgressReporter {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("bars", &self.bars.lock().map(|bars| bars.len()).unwrap_or_default())
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
