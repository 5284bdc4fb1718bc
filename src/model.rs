use serde::{Deserialize, Serialize};

/// Program shown on first launch, before anything has been persisted.
pub const DEFAULT_PROGRAM: &str = "DISPLAY(\"Hello, World!\")";

/// Placeholder shown in the output slot while a run is in flight.
pub const RUNNING_PLACEHOLDER: &str = "Running code...";

/// Persisted user preferences.
///
/// Both fields always carry a defined value: missing or unreadable stored
/// settings decode to [`Settings::default`], never to a partial record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub debug_mode: bool,
    pub dark_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_mode: false,
            dark_mode: true,
        }
    }
}

impl Settings {
    /// Merge a partial update, leaving unset fields unchanged.
    pub fn apply(self, patch: SettingsPatch) -> Self {
        Self {
            debug_mode: patch.debug_mode.unwrap_or(self.debug_mode),
            dark_mode: patch.dark_mode.unwrap_or(self.dark_mode),
        }
    }
}

/// Partial settings update as emitted by UI toggles.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsPatch {
    pub debug_mode: Option<bool>,
    pub dark_mode: Option<bool>,
}

/// Run lifecycle of one editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// A single execution submission. Value type, constructed fresh per run.
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    pub source_text: String,
    pub debug_mode: bool,
}

/// Observable session state handed to presentation layers.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub source_text: String,
    pub status: RunStatus,
    pub output_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_default_is_debug_off_dark_on() {
        let s = Settings::default();
        assert!(!s.debug_mode);
        assert!(s.dark_mode);
    }

    #[test]
    fn patch_merges_only_set_fields() {
        let s = Settings::default().apply(SettingsPatch {
            debug_mode: Some(true),
            dark_mode: None,
        });
        assert!(s.debug_mode);
        assert!(s.dark_mode);
    }

    #[test]
    fn partial_stored_settings_fill_from_defaults() {
        let s: Settings = serde_json::from_str(r#"{"debugMode":true}"#).unwrap();
        assert!(s.debug_mode);
        assert!(s.dark_mode);
    }
}
