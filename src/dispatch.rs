//! Maps a validated assistant action onto the dashboard state.
//!
//! This is the only writer of [`DashboardState`]. An action whose required
//! fields are missing degrades to a message-only outcome, except that
//! `create_chart` and `add_marker` still switch to their target tab so the
//! user sees where the content would have landed.

use tracing::debug;

use crate::action::{ActionDescriptor, UiAction};
use crate::state::{ChartSpec, DashboardState, MapLayer, Marker, Tab};

pub fn apply_action(state: &mut DashboardState, action: &ActionDescriptor) {
    debug!(action = ?action.action, "dispatching assistant action");

    match action.action {
        UiAction::Navigate => {
            if let Some(tab) = action.tab {
                state.active_tab = tab;
            }
        }
        UiAction::ShowOnMap => {
            state.map.active_layer = action.layer.unwrap_or(MapLayer::Stress);
            state.map.highlighted_location = action.location.clone();
            state.active_tab = Tab::Map;
        }
        UiAction::CreateChart => {
            if let (Some(title), Some(kind), Some(location)) =
                (&action.title, action.chart_type, &action.location)
            {
                let id = state.next_chart_id();
                state.charts.push(ChartSpec {
                    id,
                    kind,
                    location: location.clone(),
                    title: title.clone(),
                });
            }
            state.active_tab = Tab::Analytics;
        }
        UiAction::AddMarker => {
            if let (Some(lat), Some(lng), Some(popup)) = (action.lat, action.lng, &action.popup) {
                state.map.markers.push(Marker {
                    lat,
                    lng,
                    popup: popup.clone(),
                });
            }
            state.active_tab = Tab::Map;
        }
        UiAction::TextOnly | UiAction::Unknown => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ChartKind;

    fn descriptor(action: UiAction) -> ActionDescriptor {
        let mut d = ActionDescriptor::text_only("ok");
        d.action = action;
        d
    }

    #[test]
    fn test_navigate_sets_tab_and_touches_nothing_else() {
        let mut state = DashboardState::default();
        state.map.markers.push(Marker {
            lat: 1.0,
            lng: 2.0,
            popup: "existing".to_string(),
        });

        let mut action = descriptor(UiAction::Navigate);
        action.tab = Some(Tab::Analytics);
        apply_action(&mut state, &action);

        assert_eq!(state.active_tab, Tab::Analytics);
        assert_eq!(state.map.markers.len(), 1);
        assert!(state.charts.is_empty());
    }

    #[test]
    fn test_navigate_without_tab_is_noop() {
        let mut state = DashboardState::default();
        apply_action(&mut state, &descriptor(UiAction::Navigate));
        assert_eq!(state.active_tab, Tab::Chat);
    }

    #[test]
    fn test_show_on_map_sets_layer_and_highlight() {
        let mut state = DashboardState::default();
        let mut action = descriptor(UiAction::ShowOnMap);
        action.layer = Some(MapLayer::Groundwater);
        action.location = Some("Tamil Nadu".to_string());
        apply_action(&mut state, &action);

        assert_eq!(state.active_tab, Tab::Map);
        assert_eq!(state.map.active_layer, MapLayer::Groundwater);
        assert_eq!(state.map.highlighted_location.as_deref(), Some("Tamil Nadu"));
    }

    #[test]
    fn test_show_on_map_defaults_to_stress_and_clears_highlight() {
        let mut state = DashboardState::default();
        state.map.highlighted_location = Some("Kerala".to_string());
        apply_action(&mut state, &descriptor(UiAction::ShowOnMap));

        assert_eq!(state.map.active_layer, MapLayer::Stress);
        assert_eq!(state.map.highlighted_location, None);
    }

    #[test]
    fn test_show_on_map_preserves_markers() {
        let mut state = DashboardState::default();
        state.map.markers.push(Marker {
            lat: 13.0827,
            lng: 80.2707,
            popup: "Chennai City".to_string(),
        });
        let before = state.map.markers.clone();

        let mut action = descriptor(UiAction::ShowOnMap);
        action.layer = Some(MapLayer::Rainfall);
        apply_action(&mut state, &action);

        assert_eq!(state.map.markers, before);
    }

    #[test]
    fn test_create_chart_appends_with_fresh_identity() {
        let mut state = DashboardState::default();
        let mut action = descriptor(UiAction::CreateChart);
        action.chart_type = Some(ChartKind::Bar);
        action.location = Some("Kerala".to_string());
        action.title = Some("Annual Rainfall in Kerala".to_string());

        apply_action(&mut state, &action);
        apply_action(&mut state, &action);

        assert_eq!(state.charts.len(), 2);
        assert_eq!(state.charts[0].kind, ChartKind::Bar);
        assert_eq!(state.charts[0].location, "Kerala");
        assert_eq!(state.charts[0].title, "Annual Rainfall in Kerala");
        // Same descriptor twice still yields distinct chart identities.
        assert_ne!(state.charts[0].id, state.charts[1].id);
        assert_eq!(state.active_tab, Tab::Analytics);
    }

    #[test]
    fn test_create_chart_missing_field_switches_tab_only() {
        let mut state = DashboardState::default();
        let mut action = descriptor(UiAction::CreateChart);
        action.chart_type = Some(ChartKind::Line);
        action.location = Some("Punjab".to_string());
        // title absent
        apply_action(&mut state, &action);

        assert!(state.charts.is_empty());
        assert_eq!(state.active_tab, Tab::Analytics);
    }

    #[test]
    fn test_add_marker_appends_without_dedup() {
        let mut state = DashboardState::default();
        let mut action = descriptor(UiAction::AddMarker);
        action.lat = Some(13.0827);
        action.lng = Some(80.2707);
        action.popup = Some("Chennai City".to_string());

        apply_action(&mut state, &action);
        apply_action(&mut state, &action);

        assert_eq!(state.map.markers.len(), 2);
        assert_eq!(state.map.markers[0], state.map.markers[1]);
        assert_eq!(state.active_tab, Tab::Map);
    }

    #[test]
    fn test_add_marker_missing_popup_switches_tab_only() {
        let mut state = DashboardState::default();
        let mut action = descriptor(UiAction::AddMarker);
        action.lat = Some(13.0827);
        action.lng = Some(80.2707);
        apply_action(&mut state, &action);

        assert!(state.map.markers.is_empty());
        assert_eq!(state.active_tab, Tab::Map);
    }

    #[test]
    fn test_zero_coordinates_are_still_present() {
        // A marker on the equator/prime meridian is unusual but valid;
        // presence, not truthiness, is what counts.
        let mut state = DashboardState::default();
        let mut action = descriptor(UiAction::AddMarker);
        action.lat = Some(0.0);
        action.lng = Some(0.0);
        action.popup = Some("origin".to_string());
        apply_action(&mut state, &action);

        assert_eq!(state.map.markers.len(), 1);
    }

    #[test]
    fn test_navigate_reply_end_to_end() {
        let raw = r#"{"action":"navigate","tab":"map","responseText":"Navigating to the interactive map."}"#;
        let descriptor: ActionDescriptor = serde_json::from_str(raw).unwrap();
        let mut state = DashboardState::default();
        apply_action(&mut state, &descriptor);

        assert_eq!(state.active_tab, Tab::Map);
        assert!(state.charts.is_empty());
        assert!(state.map.markers.is_empty());
    }

    #[test]
    fn test_chart_reply_end_to_end() {
        let raw = r#"{"action":"create_chart","chartType":"bar","location":"Kerala","title":"Annual Rainfall in Kerala","responseText":"I've created a bar chart for Kerala."}"#;
        let descriptor: ActionDescriptor = serde_json::from_str(raw).unwrap();
        let mut state = DashboardState::default();
        apply_action(&mut state, &descriptor);

        assert_eq!(state.charts.len(), 1);
        assert_eq!(state.charts[0].kind, ChartKind::Bar);
        assert_eq!(state.charts[0].location, "Kerala");
        assert_eq!(state.charts[0].title, "Annual Rainfall in Kerala");
        assert_eq!(state.active_tab, Tab::Analytics);
    }

    #[test]
    fn test_text_only_and_unknown_change_nothing() {
        for kind in [UiAction::TextOnly, UiAction::Unknown] {
            let mut state = DashboardState::default();
            state.active_tab = Tab::Map;
            apply_action(&mut state, &descriptor(kind));
            assert_eq!(state.active_tab, Tab::Map);
            assert!(state.charts.is_empty());
            assert!(state.map.markers.is_empty());
        }
    }
}
