//! Zero-padded sequence labels for output filenames.

/// Minimum label width, so short lists still sort as `01`, `02`, ...
const MIN_WIDTH: usize = 2;

/// Hands out `01`, `02`, ... in call order.
///
/// Owned by the producer that builds jobs; labels follow input order no matter
/// which worker finishes first.
#[derive(Debug, Clone)]
pub struct Sequencer {
    next: u64,
    width: usize,
    enabled: bool,
}

impl Sequencer {
    /// `start <= 0` disables labelling. `total` is the number of jobs and sets the padding.
    pub fn new(start: i64, total: usize) -> Self {
        Self {
            next: start.max(0) as u64,
            width: label_width(total),
            enabled: start > 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current label, then advance. Empty string when disabled.
    pub fn next_label(&mut self) -> String {
        if !self.enabled {
            return String::new();
        }
        let label = format!("{:0width$}", self.next, width = self.width);
        self.next += 1;
        label
    }
}

/// `max(2, number of decimal digits in total)`.
pub fn label_width(total: usize) -> usize {
    total.to_string().len().max(MIN_WIDTH)
}
