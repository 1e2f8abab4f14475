use std::fmt::{self, Write};

use crate::model::{Matrix, ResourceVector};
use crate::safety::SafetyVerdict;
use crate::scenario::{ScenarioRunner, Trial};

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for (idx, units) in row.iter().enumerate() {
                if idx > 0 {
                    f.write_char(' ')?;
                }
                write!(f, "{units}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for ResourceVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('{')?;
        for (idx, units) in self.as_slice().iter().enumerate() {
            if idx > 0 {
                f.write_char(',')?;
            }
            write!(f, "{units}")?;
        }
        f.write_char('}')
    }
}

impl fmt::Display for SafetyVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe { sequence } => {
                f.write_str("SAFE. Safe sequence: ")?;
                for (idx, process) in sequence.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(" -> ")?;
                    }
                    write!(f, "{process}")?;
                }
                Ok(())
            }
            Self::Unsafe { .. } => f.write_str("UNSAFE"),
        }
    }
}

/// One line per trial: `Testing Available = {..} ... <verdict>`.
pub fn render_trial(trial: &Trial) -> String {
    match &trial.outcome {
        Ok(verdict) => format!("Testing Available = {} ... {verdict}", trial.available),
        Err(err) => format!("Testing Available = {} ... INVALID: {err}", trial.available),
    }
}

/// Matrices of the prepared scenario followed by every trial line.
pub fn render_report(runner: &ScenarioRunner, trials: &[Trial]) -> String {
    let mut out = String::new();
    let sections = [
        ("allocation", runner.allocation()),
        ("max", runner.maximum()),
        ("need", runner.need()),
    ];
    for (title, matrix) in sections {
        out.push_str(&format!("{title}:\n{matrix}\n"));
    }
    for trial in trials {
        out.push_str(&render_trial(trial));
        out.push('\n');
    }
    out
}
