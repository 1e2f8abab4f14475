use crate::error::{BankerError, Result};
use crate::model::{Matrix, ProcessId};

/// Derives `need = maximum - allocation` entry by entry.
///
/// Fails on mismatched shapes or when any process holds more of a resource
/// than it declared; the first offending entry in row-major order is reported.
pub fn compute_need(maximum: &Matrix, allocation: &Matrix) -> Result<Matrix> {
    if maximum.shape() != allocation.shape() {
        return Err(BankerError::shape(
            "allocation",
            maximum.shape(),
            allocation.shape(),
        ));
    }

    let (processes, resources) = maximum.shape();
    let mut need = Matrix::zeros(processes, resources);

    for ((process, max_row), held_row) in maximum.rows().enumerate().zip(allocation.rows()) {
        let Some(need_row) = need.row_mut(process) else {
            continue;
        };
        for (resource, ((slot, max), held)) in
            need_row.iter_mut().zip(max_row).zip(held_row).enumerate()
        {
            *slot = max.checked_sub(*held).ok_or(BankerError::NegativeNeed {
                process: ProcessId(process),
                resource,
                maximum: *max,
                allocation: *held,
            })?;
        }
    }

    Ok(need)
}
