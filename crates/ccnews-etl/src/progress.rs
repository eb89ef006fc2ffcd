//! Slot-keyed download progress for terminals.
//!
//! One indicatif bar per worker slot, created up front inside a
//! [`MultiProgress`]. A bar is reset when its slot picks up a new file.

use indicatif::{HumanBytes, MultiProgress, ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};

use ccnews_core::DownloadProgressPort;

const MAX_LABEL: usize = 36;

/// Terminal progress display with one line per worker slot.
pub struct SlotProgress {
    multi: MultiProgress,
    bars: Vec<ProgressBar>,
}

impl SlotProgress {
    /// Draw `slots` bars on stderr.
    #[must_use]
    pub fn new(slots: usize) -> Self {
        Self::with_multi(MultiProgress::new(), slots)
    }

    /// Track progress without drawing anything.
    #[must_use]
    pub fn hidden(slots: usize) -> Self {
        Self::with_multi(MultiProgress::with_draw_target(ProgressDrawTarget::hidden()), slots)
    }

    /// Add `slots` bars to an existing display.
    #[must_use]
    pub fn with_multi(multi: MultiProgress, slots: usize) -> Self {
        let bars = (0..slots)
            .map(|slot| {
                let bar = multi.add(ProgressBar::new(0));
                bar.set_style(idle_style());
                bar.set_prefix(format!("[{slot}]"));
                bar.set_message("idle");
                bar
            })
            .collect();
        Self { multi, bars }
    }

    /// The underlying [`MultiProgress`], for suspending while logging.
    #[must_use]
    pub const fn multi(&self) -> &MultiProgress {
        &self.multi
    }

    pub fn slots(&self) -> usize {
        self.bars.len()
    }

    /// Bytes recorded so far on `slot`.
    pub fn position(&self, slot: usize) -> Option<u64> {
        self.bars.get(slot).map(ProgressBar::position)
    }

    /// Remove every bar from the display.
    pub fn clear(&self) {
        for bar in &self.bars {
            bar.finish_and_clear();
            self.multi.remove(bar);
        }
    }
}

impl DownloadProgressPort for SlotProgress {
    fn begin(&self, slot: usize, file_id: &str, total: u64) {
        let Some(bar) = self.bars.get(slot) else {
            return;
        };
        bar.reset();
        bar.set_style(if total > 0 { bar_style() } else { spinner_style() });
        bar.set_length(total);
        bar.set_message(format_label(file_id));
    }

    fn advance(&self, slot: usize, bytes: u64) {
        if let Some(bar) = self.bars.get(slot) {
            bar.inc(bytes);
        }
    }

    fn finish(&self, slot: usize) {
        if let Some(bar) = self.bars.get(slot) {
            bar.set_style(idle_style());
            bar.set_message("idle");
        }
    }
}

fn idle_style() -> ProgressStyle {
    ProgressStyle::with_template("{prefix} {msg}").unwrap_or_else(|_| ProgressStyle::default_bar())
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{prefix} {msg} {spinner} {human_bytes:>9}")
        .map(with_byte_keys)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{prefix} {msg} {bar:28.cyan/blue} {human_bytes:>9} / {human_total:>9} ({percent:>3}%) @ {binary_bytes_per_sec}",
    )
    .map(with_byte_keys)
    .unwrap_or_else(|_| ProgressStyle::default_bar())
}

fn with_byte_keys(style: ProgressStyle) -> ProgressStyle {
    style
        .with_key("human_bytes", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let _ = write!(w, "{}", HumanBytes(state.pos()));
        })
        .with_key("human_total", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let value = state
                .len()
                .map_or_else(|| "?".to_string(), |len| HumanBytes(len).to_string());
            let _ = write!(w, "{value}");
        })
}

fn format_label(raw: &str) -> String {
    if raw.chars().count() <= MAX_LABEL {
        return raw.to_string();
    }
    let mut buf: String = raw.chars().take(MAX_LABEL - 1).collect();
    buf.push('…');
    buf
}
