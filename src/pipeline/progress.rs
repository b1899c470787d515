// file: src/pipeline/progress.rs
// description: progress tracking and statistics reporting for document uploads
// reference: uses indicatif for progress bars and tracks upload metrics

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadStats {
    pub documents_uploaded: usize,
    pub duration_secs: f64,
}

impl UploadStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn documents_per_second(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            return 0.0;
        }
        self.documents_uploaded as f64 / self.duration_secs
    }
}

pub struct ProgressTracker {
    bar: ProgressBar,
    documents_uploaded: usize,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn with_color(total_documents: usize, colored: bool) -> Self {
        Self::from_bar(create_progress_bar(total_documents as u64, colored))
    }

    /// Tracker that counts without drawing anything.
    pub fn hidden(total_documents: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(total_documents as u64);
        Self::from_bar(bar)
    }

    fn from_bar(bar: ProgressBar) -> Self {
        Self {
            bar,
            documents_uploaded: 0,
            start_time: Instant::now(),
        }
    }

    pub fn inc_uploaded(&mut self, doc_id: &str) {
        self.documents_uploaded += 1;
        self.bar.inc(1);
        self.bar.set_message(format!("doc {}", doc_id));
    }

    pub fn abandon(&self, message: String) {
        self.bar.abandon_with_message(message);
    }

    pub fn finish(&self) {
        if !self.bar.is_finished() {
            self.bar.finish_with_message("Upload complete");
        }
    }

    pub fn get_stats(&self) -> UploadStats {
        UploadStats {
            documents_uploaded: self.documents_uploaded,
            duration_secs: self.start_time.elapsed().as_secs_f64(),
        }
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(total: u64, colored: bool) -> ProgressBar {
    let bar = ProgressBar::new(total);
    let template = if colored {
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}"
    } else {
        "{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({eta}) {msg}"
    };

    // fall back to the default style if the template is rejected
    if let Ok(style) = ProgressStyle::default_bar().template(template) {
        let chars = if colored { "█▓▒░" } else { "=>-" };
        bar.set_style(style.progress_chars(chars));
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_stats_rate() {
        let stats = UploadStats {
            documents_uploaded: 100,
            duration_secs: 4.0,
        };
        assert_eq!(stats.documents_per_second(), 25.0);
    }

    #[test]
    fn test_upload_stats_zero_duration() {
        let stats = UploadStats::new();
        assert_eq!(stats.documents_per_second(), 0.0);
    }

    #[test]
    fn test_progress_tracker_counts() {
        let mut tracker = ProgressTracker::hidden(3);
        tracker.inc_uploaded("1");
        tracker.inc_uploaded("2");

        assert_eq!(tracker.get_stats().documents_uploaded, 2);
        tracker.finish();
    }
}
