//! The contract between the assistant and the UI.
//!
//! The remote model is constrained at session creation to reply with a JSON
//! object matching [`response_schema`]; [`ActionDescriptor`] is the parsed
//! form of such a reply. Fields that do not belong to the chosen action are
//! carried but ignored by the dispatcher.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::state::{ChartKind, MapLayer, Tab};

/// The closed vocabulary of UI actions the assistant may request.
///
/// The schema keeps the model inside this set, but a non-compliant reply with
/// an out-of-vocabulary action string still parses: it degrades to
/// [`UiAction::Unknown`], which the dispatcher treats as message-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiAction {
    Navigate,
    ShowOnMap,
    CreateChart,
    AddMarker,
    TextOnly,
    #[serde(other)]
    Unknown,
}

/// The structured result of one assistant turn.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDescriptor {
    pub action: UiAction,
    pub response_text: String,
    #[serde(default)]
    pub tab: Option<Tab>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub layer: Option<MapLayer>,
    #[serde(default)]
    pub chart_type: Option<ChartKind>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub popup: Option<String>,
}

impl ActionDescriptor {
    /// A plain conversational reply carrying no UI action.
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            action: UiAction::TextOnly,
            response_text: text.into(),
            tab: None,
            location: None,
            layer: None,
            chart_type: None,
            title: None,
            lat: None,
            lng: None,
            popup: None,
        }
    }
}

/// Structured-output schema sent with every session so the model emits JSON
/// already shaped like an [`ActionDescriptor`].
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "action": {
                "type": "STRING",
                "enum": ["navigate", "show_on_map", "create_chart", "add_marker", "text_only"],
                "description": "The action to perform in the UI. Use 'text_only' for general conversation.",
            },
            "tab": {
                "type": "STRING",
                "enum": ["chat", "map", "analytics"],
                "description": "The tab to navigate to. Used with 'navigate'.",
            },
            "location": {
                "type": "STRING",
                "description": "The Indian state or major city. Used with 'show_on_map' or 'create_chart'.",
            },
            "layer": {
                "type": "STRING",
                "enum": ["groundwater", "rainfall", "stress"],
                "description": "The data layer to display on the map. Used with 'show_on_map'.",
            },
            "chartType": {
                "type": "STRING",
                "enum": ["bar", "line"],
                "description": "The type of chart to create. Used with 'create_chart'.",
            },
            "title": {
                "type": "STRING",
                "description": "A descriptive title for the chart. Used with 'create_chart'.",
            },
            "lat": { "type": "NUMBER", "description": "Latitude for the marker. Used with 'add_marker'." },
            "lng": { "type": "NUMBER", "description": "Longitude for the marker. Used with 'add_marker'." },
            "popup": { "type": "STRING", "description": "Popup text for the marker. Used with 'add_marker'." },
            "responseText": {
                "type": "STRING",
                "description": "A friendly, conversational reply shown to the user in the chat. Always present.",
            },
        },
        "required": ["action", "responseText"],
    })
}

/// Persona, language policy and action vocabulary, fixed for the lifetime of
/// a session.
pub const SYSTEM_INSTRUCTION: &str = r#"You are "Springwell", an expert AI assistant for analyzing groundwater data in India.
Your purpose is to provide clear, concise, and actionable insights to farmers, policymakers, and researchers.
You are an expert in all major Indian languages including English, Hindi, Tamil, Telugu, Kannada, Malayalam, Bengali, Marathi, Gujarati, and Punjabi.
When a user asks a question, you MUST detect their language and respond in the EXACT SAME language in the 'responseText'.

You have special capabilities to control the application's UI. When a user's request implies an action, you must format your response as a JSON object matching the provided schema.

Available actions:
1.  'text_only': For general conversation, questions, and greetings.
2.  'navigate': When the user wants to go to a specific section ('map' or 'analytics').
3.  'show_on_map': When the user asks to visualize data on the map. You must identify the location (an Indian state) and the data layer ('groundwater', 'rainfall', 'stress').
4.  'create_chart': When the user wants a new chart. You must identify the location, the chart type ('bar' or 'line'), and create a descriptive title.
5.  'add_marker': When the user wants to add a marker on the map. You must provide lat, lng coordinates and popup text.

Always provide a friendly 'responseText' confirming the action or answering the question.

Example user queries and your JSON responses:
- User: "Hello there" -> {"action": "text_only", "responseText": "Hello! How can I help you with India's groundwater data today?"}
- User: "Take me to the map" -> {"action": "navigate", "tab": "map", "responseText": "Navigating to the interactive map."}
- User: "Show me groundwater levels in Tamil Nadu" -> {"action": "show_on_map", "location": "Tamil Nadu", "layer": "groundwater", "responseText": "Certainly! Displaying groundwater levels for Tamil Nadu on the map."}
- User: "Generate a bar chart for rainfall in Kerala" -> {"action": "create_chart", "chartType": "bar", "location": "Kerala", "title": "Annual Rainfall in Kerala", "responseText": "I've created a bar chart showing rainfall data for Kerala on the analytics page."}
- User: "Mark the location at 13.0827, 80.2707 with 'Chennai City'" -> {"action": "add_marker", "lat": 13.0827, "lng": 80.2707, "popup": "Chennai City", "responseText": "I've added a marker for Chennai City on the map."}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigate() {
        let raw = r#"{"action":"navigate","tab":"map","responseText":"Navigating to the interactive map."}"#;
        let descriptor: ActionDescriptor = serde_json::from_str(raw).unwrap();
        assert_eq!(descriptor.action, UiAction::Navigate);
        assert_eq!(descriptor.tab, Some(Tab::Map));
        assert_eq!(descriptor.response_text, "Navigating to the interactive map.");
    }

    #[test]
    fn test_parse_create_chart() {
        let raw = r#"{"action":"create_chart","chartType":"bar","location":"Kerala","title":"Annual Rainfall in Kerala","responseText":"Done."}"#;
        let descriptor: ActionDescriptor = serde_json::from_str(raw).unwrap();
        assert_eq!(descriptor.action, UiAction::CreateChart);
        assert_eq!(descriptor.chart_type, Some(ChartKind::Bar));
        assert_eq!(descriptor.location.as_deref(), Some("Kerala"));
        assert_eq!(descriptor.title.as_deref(), Some("Annual Rainfall in Kerala"));
    }

    #[test]
    fn test_parse_add_marker() {
        let raw = r#"{"action":"add_marker","lat":13.0827,"lng":80.2707,"popup":"Chennai City","responseText":"Marked."}"#;
        let descriptor: ActionDescriptor = serde_json::from_str(raw).unwrap();
        assert_eq!(descriptor.action, UiAction::AddMarker);
        assert_eq!(descriptor.lat, Some(13.0827));
        assert_eq!(descriptor.lng, Some(80.2707));
        assert_eq!(descriptor.popup.as_deref(), Some("Chennai City"));
    }

    #[test]
    fn test_parse_tolerates_irrelevant_fields() {
        // Fields outside the chosen action are carried but harmless.
        let raw = r#"{"action":"navigate","tab":"analytics","layer":"rainfall","responseText":"Off we go."}"#;
        let descriptor: ActionDescriptor = serde_json::from_str(raw).unwrap();
        assert_eq!(descriptor.action, UiAction::Navigate);
        assert_eq!(descriptor.layer, Some(MapLayer::Rainfall));
    }

    #[test]
    fn test_parse_unknown_action_degrades() {
        let raw = r#"{"action":"reboot_satellite","responseText":"Hmm."}"#;
        let descriptor: ActionDescriptor = serde_json::from_str(raw).unwrap();
        assert_eq!(descriptor.action, UiAction::Unknown);
    }

    #[test]
    fn test_parse_rejects_missing_mandatory_fields() {
        assert!(serde_json::from_str::<ActionDescriptor>(r#"{"action":"text_only"}"#).is_err());
        assert!(serde_json::from_str::<ActionDescriptor>(r#"{"responseText":"hi"}"#).is_err());
    }

    #[test]
    fn test_schema_declares_mandatory_fields() {
        let schema = response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(required, vec!["action", "responseText"]);
        let actions = schema["properties"]["action"]["enum"].as_array().unwrap();
        assert_eq!(actions.len(), 5);
    }
}
