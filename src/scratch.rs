use crate::model::{ProcessId, ResourceVector, Units};

/// Check-scoped scratch state for one safety search.
///
/// Created fresh per check from a copy of the available vector and dropped
/// when the check returns; it never borrows caller-owned inputs mutably.
#[derive(Debug, Clone)]
pub(crate) struct CheckScratch {
    work: Vec<Units>,
    finished: Vec<bool>,
    sequence: Vec<ProcessId>,
}

impl CheckScratch {
    pub(crate) fn new(available: &ResourceVector, processes: usize) -> Self {
        Self {
            work: available.as_slice().to_vec(),
            finished: vec![false; processes],
            sequence: Vec::with_capacity(processes),
        }
    }

    pub(crate) fn work(&self) -> &[Units] {
        &self.work
    }

    pub(crate) fn is_finished(&self, process: usize) -> bool {
        self.finished.get(process).copied().unwrap_or(false)
    }

    /// True if every entry of `need` fits in the current work vector.
    pub(crate) fn can_run(&self, need: &[Units]) -> bool {
        need.len() == self.work.len() && need.iter().zip(&self.work).all(|(n, w)| n <= w)
    }

    /// Marks `process` finished and returns its allocation to the work pool.
    pub(crate) fn release(&mut self, process: usize, allocation: &[Units]) {
        for (work, held) in self.work.iter_mut().zip(allocation) {
            *work = work.saturating_add(*held);
        }
        if let Some(done) = self.finished.get_mut(process) {
            *done = true;
        }
        self.sequence.push(ProcessId(process));
    }

    pub(crate) fn finished_count(&self) -> usize {
        self.sequence.len()
    }

    pub(crate) fn all_finished(&self) -> bool {
        self.finished.iter().all(|done| *done)
    }

    pub(crate) fn unfinished(&self) -> Vec<ProcessId> {
        self.finished
            .iter()
            .enumerate()
            .filter(|(_, done)| !**done)
            .map(|(process, _)| ProcessId(process))
            .collect()
    }

    pub(crate) fn into_sequence(self) -> Vec<ProcessId> {
        self.sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_grows_work_without_touching_available() {
        let available = ResourceVector::from([1, 0, 2]);
        let mut scratch = CheckScratch::new(&available, 2);

        assert!(scratch.can_run(&[1, 0, 1]));
        assert!(!scratch.can_run(&[0, 1, 0]));

        scratch.release(0, &[2, 3, 0]);
        assert_eq!(scratch.work(), &[3, 3, 2]);
        assert_eq!(available.as_slice(), &[1, 0, 2]);
        assert!(scratch.is_finished(0));
        assert_eq!(scratch.unfinished(), vec![ProcessId(1)]);
        assert!(!scratch.all_finished());
    }

    #[test]
    fn work_saturates_instead_of_wrapping() {
        let available = ResourceVector::from([Units::MAX - 1]);
        let mut scratch = CheckScratch::new(&available, 1);
        scratch.release(0, &[5]);
        assert_eq!(scratch.work(), &[Units::MAX]);
        assert_eq!(scratch.into_sequence(), vec![ProcessId(0)]);
    }
}
