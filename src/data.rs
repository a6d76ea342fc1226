//! Illustrative groundwater dataset.
//!
//! The dashboard does not consume a live data feed; every figure here is a
//! deterministic placeholder derived from the location name, so the same
//! request always renders the same picture.

use crate::state::ChartKind;

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const STATE_NAMES: &[&str] = &[
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Delhi",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
];

/// Coarse condition scale used by every map layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

/// Per-state condition for each map layer.
#[derive(Debug, Clone, Copy)]
pub struct StateFigures {
    pub name: &'static str,
    pub groundwater: Severity,
    pub rainfall: Severity,
    pub stress: Severity,
}

/// Case-insensitive lookup; the assistant sometimes echoes locations with
/// different capitalization than ours.
pub fn figures_for(name: &str) -> Option<StateFigures> {
    STATE_NAMES
        .iter()
        .find(|state| state.eq_ignore_ascii_case(name.trim()))
        .map(|state| figures(state))
}

pub fn all_figures() -> Vec<StateFigures> {
    STATE_NAMES.iter().map(|state| figures(state)).collect()
}

fn figures(name: &'static str) -> StateFigures {
    StateFigures {
        name,
        groundwater: severity(name, 1),
        rainfall: severity(name, 2),
        stress: severity(name, 3),
    }
}

fn severity(name: &str, layer_offset: u32) -> Severity {
    let factor = pseudo_random(name_seed(name) + layer_offset);
    match (factor * 3.0) as u32 {
        0 => Severity::Normal,
        1 => Severity::Warning,
        _ => Severity::Critical,
    }
}

/// Twelve monthly values for one chart. Bar charts show rainfall in mm,
/// line charts show water-table depth in metres (negative, declining).
pub fn monthly_series(location: &str, kind: ChartKind) -> Vec<(&'static str, f64)> {
    let seed = name_seed(location);
    MONTHS
        .iter()
        .enumerate()
        .map(|(i, month)| {
            let factor = pseudo_random(seed + i as u32);
            let value = match kind {
                ChartKind::Bar => (factor * 200.0 + 50.0).floor(),
                ChartKind::Line => round1(-1.0 - factor * 2.5),
            };
            (*month, value)
        })
        .collect()
}

pub fn series_unit(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::Bar => "Rainfall (mm)",
        ChartKind::Line => "Water Level (m)",
    }
}

fn name_seed(name: &str) -> u32 {
    name.chars().fold(0u32, |acc, c| acc.wrapping_add(c as u32))
}

fn pseudo_random(seed: u32) -> f64 {
    ((seed as f64).sin() + 1.0) / 2.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub struct QuickStat {
    pub label: &'static str,
    pub value: &'static str,
}

pub const QUICK_STATS: &[QuickStat] = &[
    QuickStat { label: "Critical Districts", value: "142" },
    QuickStat { label: "Water Table (Avg)", value: "-2.3m" },
    QuickStat { label: "Monsoon Progress", value: "78%" },
    QuickStat { label: "Active Monitoring", value: "12.5K" },
];

pub struct Alert {
    pub location: &'static str,
    pub severity: Severity,
    pub message: &'static str,
    pub time: &'static str,
}

pub const RECENT_ALERTS: &[Alert] = &[
    Alert {
        location: "Dharmapuri, Tamil Nadu",
        severity: Severity::Critical,
        message: "Water table dropped 15% below normal levels",
        time: "2 hours ago",
    },
    Alert {
        location: "Marathwada, Maharashtra",
        severity: Severity::Warning,
        message: "Declining trend observed in 8 monitoring wells",
        time: "4 hours ago",
    },
    Alert {
        location: "Bundelkhand, Uttar Pradesh",
        severity: Severity::Normal,
        message: "Monsoon recharge improving gradually",
        time: "1 day ago",
    },
];

pub const SUGGESTIONS: &[&str] = &[
    "Show me groundwater trends for Tamil Nadu this year",
    "Which districts in Maharashtra need immediate attention?",
    "தமிழ்நாட்டில் நிலத்தடி நீர் நிலை என்ன?",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_is_deterministic() {
        let a = monthly_series("Kerala", ChartKind::Bar);
        let b = monthly_series("Kerala", ChartKind::Bar);
        assert_eq!(a, b);
        assert_eq!(a.len(), 12);
    }

    #[test]
    fn test_series_varies_by_location() {
        let kerala = monthly_series("Kerala", ChartKind::Bar);
        let punjab = monthly_series("Punjab", ChartKind::Bar);
        assert_ne!(kerala, punjab);
    }

    #[test]
    fn test_bar_values_in_range() {
        for (_, value) in monthly_series("Rajasthan", ChartKind::Bar) {
            assert!((50.0..=250.0).contains(&value));
        }
    }

    #[test]
    fn test_line_values_are_negative_depths() {
        for (_, value) in monthly_series("Assam", ChartKind::Line) {
            assert!((-3.5..=-1.0).contains(&value));
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert!(figures_for("tamil nadu").is_some());
        assert!(figures_for("  Kerala ").is_some());
        assert!(figures_for("Atlantis").is_none());
    }

    #[test]
    fn test_every_state_has_figures() {
        assert_eq!(all_figures().len(), STATE_NAMES.len());
    }
}
