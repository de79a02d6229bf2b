#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Terminal helpers for the `crime_stats` binary.
//!
//! Generation and aggregation report through [`ProgressCallback`];
//! [`IndicatifProgress`] draws those reports, and [`init_logger`] makes
//! `log` output share the terminal with the bars.

use std::sync::Arc;
use std::time::Duration;

use crime_stats_models::progress::ProgressCallback;
use indicatif::{ProgressBar, ProgressStyle};

pub use indicatif::MultiProgress;

const SPINNER_TEMPLATE: &str = "{spinner:.blue} {msg} ({elapsed})";
const RECORDS_TEMPLATE: &str =
    "  {msg:<22} [{bar:40.blue/dim}] {human_pos:>6}/{human_len:6} {per_sec:>12} eta {eta}";
const STAGES_TEMPLATE: &str = "{prefix:.bold} stage {pos}/{len} [{bar:12.green/dim}] {msg}";

/// A [`ProgressCallback`] drawn as an `indicatif` bar.
pub struct IndicatifProgress {
    bar: ProgressBar,
    /// Style swapped in when the unit count becomes known.
    sized_style: ProgressStyle,
}

impl IndicatifProgress {
    /// Counts records (or states) through one batch pass. Shows a spinner
    /// with elapsed time until the pass reports its size.
    #[must_use]
    pub fn records_bar(multi: &MultiProgress, message: &str) -> Arc<dyn ProgressCallback> {
        let bar = multi.add(ProgressBar::new_spinner());
        bar.enable_steady_tick(Duration::from_millis(120));
        bar.set_style(
            ProgressStyle::with_template(SPINNER_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());

        let sized_style = ProgressStyle::with_template(RECORDS_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");

        Arc::new(Self { bar, sized_style })
    }

    /// Tracks the stages of a multi-stage command. `label` is shown in
    /// bold ahead of the stage counter.
    #[must_use]
    pub fn stages_bar(
        multi: &MultiProgress,
        label: &str,
        stages: u64,
    ) -> Arc<dyn ProgressCallback> {
        let sized_style = ProgressStyle::with_template(STAGES_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#-");

        let bar = multi.add(ProgressBar::new(stages));
        bar.set_style(sized_style.clone());
        bar.set_prefix(label.to_string());

        Arc::new(Self { bar, sized_style })
    }
}

impl ProgressCallback for IndicatifProgress {
    fn set_total(&self, total: u64) {
        self.bar.set_length(total);
        self.bar.reset();
        self.bar.set_style(self.sized_style.clone());
    }

    fn inc(&self, delta: u64) {
        self.bar.inc(delta);
    }

    fn set_message(&self, msg: String) {
        self.bar.set_message(msg);
    }

    fn finish(&self, msg: String) {
        self.bar.finish_with_message(msg);
    }
}

/// Installs `pretty_env_logger` (filtered by `RUST_LOG`) behind an
/// `indicatif-log-bridge` wrapper so log lines print above active bars.
///
/// Every bar must be added to the returned [`MultiProgress`].
#[must_use]
pub fn init_logger() -> MultiProgress {
    let multi = MultiProgress::new();

    let logger = pretty_env_logger::formatted_builder()
        .parse_env("RUST_LOG")
        .build();
    let level = logger.filter();

    // Already installed when several tests call this.
    indicatif_log_bridge::LogWrapper::new(multi.clone(), logger)
        .try_init()
        .ok();

    log::set_max_level(level);

    multi
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_parse() {
        for template in [SPINNER_TEMPLATE, RECORDS_TEMPLATE, STAGES_TEMPLATE] {
            assert!(ProgressStyle::with_template(template).is_ok(), "{template}");
        }
    }

    #[test]
    fn records_bar_switches_to_sized_bar() {
        let multi = MultiProgress::with_draw_target(indicatif::ProgressDrawTarget::hidden());
        let progress = IndicatifProgress::records_bar(&multi, "Aggregating");
        progress.set_total(51);
        progress.inc(51);
        progress.finish("done".to_string());
    }
}
