//! Metric to imperial height conversion

use std::fmt;

const CM_PER_INCH: f64 = 2.54;

/// A height in centimetres with its imperial reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Height {
    pub cm: u32,
}

impl Height {
    pub fn from_cm(cm: u32) -> Self {
        Self { cm }
    }

    /// Exact height in inches
    pub fn total_inches(&self) -> f64 {
        self.cm as f64 / CM_PER_INCH
    }

    /// Feet and inches, inches rounded up and rolled into the next foot at 12
    pub fn feet_inches(&self) -> (u32, u32) {
        let total = self.total_inches();
        let feet = (total / 12.0).floor() as u32;
        let inches = (total % 12.0).ceil() as u32;
        if inches == 12 {
            (feet + 1, 0)
        } else {
            (feet, inches)
        }
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cm == 0 {
            return Ok(());
        }
        let (feet, inches) = self.feet_inches();
        write!(f, "{feet}' {inches}\"")
    }
}

/// "190cm / 6' 3\"", or "Not available" for a missing height
pub fn format_height(cm: u32) -> String {
    if cm == 0 {
        return "Not available".to_string();
    }
    format!("{cm}cm / {}", Height::from_cm(cm))
}
