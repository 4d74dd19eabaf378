/// Statistics produced by a single training epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EpochStats {
    epoch: usize,
    right_recognized: usize,
    samples: usize,
}

impl EpochStats {
    /// Creates a new `EpochStats`.
    ///
    /// # Arguments
    /// * `epoch` - The epoch number, starting at 1.
    /// * `right_recognized` - Examples whose predicted class matched their label.
    /// * `samples` - Examples seen during the epoch.
    pub fn new(epoch: usize, right_recognized: usize, samples: usize) -> Self {
        Self {
            epoch,
            right_recognized,
            samples,
        }
    }

    pub fn epoch(&self) -> usize {
        self.epoch
    }

    /// Returns the amount of examples recognized before their own weight update.
    pub fn right_recognized(&self) -> usize {
        self.right_recognized
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Returns the percentage of right recognized examples, or 0 if there were none.
    pub fn accuracy(&self) -> f32 {
        if self.samples == 0 {
            return 0.;
        }

        self.right_recognized as f32 * 100. / self.samples as f32
    }
}
