use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{BankerError, Result};
use crate::model::{Matrix, ProcessId, ResourceVector};
use crate::scratch::CheckScratch;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafetyVerdict {
    /// Every process can finish; `sequence` is one valid completion order.
    Safe { sequence: Vec<ProcessId> },
    /// The search stalled. `blocked` lists the processes that never finished.
    Unsafe { blocked: Vec<ProcessId> },
}

impl SafetyVerdict {
    pub fn is_safe(&self) -> bool {
        matches!(self, Self::Safe { .. })
    }

    pub fn sequence(&self) -> Option<&[ProcessId]> {
        match self {
            Self::Safe { sequence } => Some(sequence),
            Self::Unsafe { .. } => None,
        }
    }
}

fn check_shapes(allocation: &Matrix, need: &Matrix, available: &ResourceVector) -> Result<()> {
    if allocation.shape() != need.shape() {
        return Err(BankerError::shape("need", allocation.shape(), need.shape()));
    }
    if available.len() != allocation.resources() {
        return Err(BankerError::VectorLength {
            expected: allocation.resources(),
            found: available.len(),
        });
    }
    Ok(())
}

/// Searches for an order in which every process can run to completion.
///
/// Each pass scans unfinished processes in index order and finishes every one
/// whose need fits in the current work vector, returning its allocation to
/// work immediately so later processes in the same pass can use it. The
/// search stops after P passes or the first pass that finishes nobody.
pub fn is_safe(
    allocation: &Matrix,
    need: &Matrix,
    available: &ResourceVector,
) -> Result<SafetyVerdict> {
    check_shapes(allocation, need, available)?;

    let processes = allocation.processes();
    let mut scratch = CheckScratch::new(available, processes);

    for pass in 0..processes {
        let mut progressed = false;

        for (process, (need_row, held_row)) in need.rows().zip(allocation.rows()).enumerate() {
            if scratch.is_finished(process) || !scratch.can_run(need_row) {
                continue;
            }
            scratch.release(process, held_row);
            progressed = true;
            trace!(pass, process = %ProcessId(process), work = ?scratch.work(), "process finished");
        }

        if !progressed {
            debug!(
                pass,
                finished = scratch.finished_count(),
                processes,
                "no process could finish; stopping search"
            );
            break;
        }
    }

    if scratch.all_finished() {
        Ok(SafetyVerdict::Safe {
            sequence: scratch.into_sequence(),
        })
    } else {
        Ok(SafetyVerdict::Unsafe {
            blocked: scratch.unfinished(),
        })
    }
}

/// Replays `sequence` from `available` and reports whether it is a valid
/// completion order: a permutation of all processes where each step's need
/// fits in the work accumulated so far.
pub fn replay_sequence(
    allocation: &Matrix,
    need: &Matrix,
    available: &ResourceVector,
    sequence: &[ProcessId],
) -> Result<bool> {
    check_shapes(allocation, need, available)?;

    let processes = allocation.processes();
    if sequence.len() != processes {
        return Ok(false);
    }

    let mut scratch = CheckScratch::new(available, processes);
    for &ProcessId(process) in sequence {
        let (Some(need_row), Some(held_row)) = (need.row(process), allocation.row(process)) else {
            return Ok(false);
        };
        if scratch.is_finished(process) || !scratch.can_run(need_row) {
            return Ok(false);
        }
        scratch.release(process, held_row);
    }

    Ok(scratch.all_finished())
}
