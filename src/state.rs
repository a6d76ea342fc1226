//! UI-agnostic dashboard state types
//!
//! These structures are produced by the action dispatcher and consumed by the
//! view rendering code; they carry no rendering logic of their own.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// The three dashboard views the assistant can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Chat,
    Map,
    Analytics,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Chat => "AI Assistant",
            Tab::Map => "Interactive Map",
            Tab::Analytics => "Data Analytics",
        }
    }

    pub fn next(&self) -> Tab {
        match self {
            Tab::Chat => Tab::Map,
            Tab::Map => Tab::Analytics,
            Tab::Analytics => Tab::Chat,
        }
    }

    pub fn all() -> [Tab; 3] {
        [Tab::Chat, Tab::Map, Tab::Analytics]
    }
}

/// Data overlay shown on the map view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapLayer {
    None,
    Groundwater,
    Rainfall,
    Stress,
}

impl MapLayer {
    pub fn label(&self) -> &'static str {
        match self {
            MapLayer::None => "no layer",
            MapLayer::Groundwater => "groundwater",
            MapLayer::Rainfall => "rainfall",
            MapLayer::Stress => "water stress",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
}

/// A pin placed on the map by the assistant.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub lat: f64,
    pub lng: f64,
    pub popup: String,
}

/// Layer, highlight and markers driving the map view.
#[derive(Debug, Clone)]
pub struct MapViewState {
    pub active_layer: MapLayer,
    pub highlighted_location: Option<String>,
    pub markers: Vec<Marker>,
}

impl Default for MapViewState {
    fn default() -> Self {
        Self {
            active_layer: MapLayer::None,
            highlighted_location: None,
            markers: Vec::new(),
        }
    }
}

/// One chart requested through the assistant. Charts accumulate for the
/// lifetime of the session and are never deduplicated or removed.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub id: String,
    pub kind: ChartKind,
    pub location: String,
    pub title: String,
}

/// A chat transcript entry.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: u64,
    pub role: ChatRole,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

/// Everything the assistant is allowed to mutate: the active tab, the map
/// configuration and the chart list. Only the dispatcher writes to it.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub active_tab: Tab,
    pub map: MapViewState,
    pub charts: Vec<ChartSpec>,
    chart_seq: u64,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            active_tab: Tab::Chat,
            map: MapViewState::default(),
            charts: Vec::new(),
            chart_seq: 0,
        }
    }
}

impl DashboardState {
    /// Fresh chart identity: wall-clock millis plus a session-local sequence
    /// number, so two charts created in the same millisecond still differ.
    pub fn next_chart_id(&mut self) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let seq = self.chart_seq;
        self.chart_seq += 1;
        format!("{}-{}", millis, seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_ids_are_distinct() {
        let mut state = DashboardState::default();
        let a = state.next_chart_id();
        let b = state.next_chart_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_tab_cycle_visits_all() {
        let mut tab = Tab::Chat;
        for _ in 0..3 {
            tab = tab.next();
        }
        assert_eq!(tab, Tab::Chat);
    }
}
