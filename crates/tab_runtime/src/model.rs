//! Canonical settings record, defaults, and patch-merge semantics.

use serde::{Deserialize, Serialize};

/// Debounce window for durable settings writes, in milliseconds.
pub const SETTINGS_WRITE_DEBOUNCE_MS: u32 = 500;

/// Fonts the clock can render in, as `(label, font family)` pairs.
pub const CLOCK_FONTS: [(&str, &str); 7] = [
    ("Outfit", "Outfit"),
    ("Modern", "Space Grotesk"),
    ("Condensed", "Oswald"),
    ("Tech", "JetBrains Mono"),
    ("Artistic", "Syne"),
    ("Retro", "Righteous"),
    ("Classic", "Inter"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
/// Chrome theme of the settings panel itself.
pub enum SettingsTheme {
    /// Dark panel chrome.
    #[default]
    Dark,
    /// Light panel chrome.
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
/// Hour-cycle preference for the clock face.
pub enum ClockFormat {
    /// 12-hour cycle with an AM/PM marker.
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
    /// 24-hour cycle with zero-padded hours.
    #[serde(rename = "24h")]
    TwentyFourHour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
/// Arrangement of the hour and minute groups.
pub enum ClockLayout {
    /// Hours and minutes side by side.
    #[default]
    Horizontal,
    /// Hours stacked above minutes.
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Clock anchor point in viewport percentages.
pub struct ClockPosition {
    /// Horizontal anchor, 0–100.
    pub x: f64,
    /// Vertical anchor, 0–100.
    pub y: f64,
}

impl Default for ClockPosition {
    fn default() -> Self {
        Self { x: 50.0, y: 50.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Canonical mapping of every user preference.
///
/// Deserialization completes records missing newer fields from the defaults
/// (merge-over-defaults); a persisted value always wins per field.
pub struct SettingsRecord {
    /// Wallpaper blur intensity in pixels, 0–50.
    pub blur_level: u32,
    /// Suppresses the wallpaper in favor of a solid theme color.
    pub focus_mode: bool,
    /// Settings-panel chrome theme.
    pub settings_theme: SettingsTheme,
    /// Clock visibility (positioning mode forces it visible).
    pub clock_show: bool,
    /// Hour-cycle preference.
    pub clock_format: ClockFormat,
    /// Date line visibility.
    pub date_show: bool,
    /// Base color for hours and, absent an override, minutes.
    pub clock_color: String,
    /// Minute-color override; `None` inherits [`Self::clock_color`].
    pub clock_color_minutes: Option<String>,
    /// Clock font size in pixels, 50–400.
    pub clock_size: u32,
    /// Clock anchor point in viewport percentages.
    pub clock_position: ClockPosition,
    /// Arrangement of the hour and minute groups.
    pub clock_layout: ClockLayout,
    /// Clock font family, from [`CLOCK_FONTS`].
    pub clock_font: String,
    /// Hour-group opacity, 0.0–1.0.
    pub hours_opacity: f64,
    /// Minute-group opacity, 0.0–1.0.
    pub minutes_opacity: f64,
}

impl Default for SettingsRecord {
    fn default() -> Self {
        Self {
            blur_level: 20,
            focus_mode: true,
            settings_theme: SettingsTheme::Dark,
            clock_show: true,
            clock_format: ClockFormat::TwelveHour,
            date_show: true,
            clock_color: "#ffffff".to_string(),
            clock_color_minutes: None,
            clock_size: 150,
            clock_position: ClockPosition::default(),
            clock_layout: ClockLayout::Horizontal,
            clock_font: "Outfit".to_string(),
            hours_opacity: 1.0,
            minutes_opacity: 1.0,
        }
    }
}

impl SettingsRecord {
    /// Parses a persisted record, completing missing fields from defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when `raw_json` is not a JSON object of the expected
    /// shape; callers fall back to full defaults.
    pub fn from_persisted_json(raw_json: &str) -> Result<Self, String> {
        let record: Self = serde_json::from_str(raw_json).map_err(|e| e.to_string())?;
        Ok(record.normalized())
    }

    /// Clamps every range-bounded field to its documented interval.
    pub fn normalized(mut self) -> Self {
        self.blur_level = self.blur_level.min(50);
        self.clock_size = self.clock_size.clamp(50, 400);
        self.clock_position.x = self.clock_position.x.clamp(0.0, 100.0);
        self.clock_position.y = self.clock_position.y.clamp(0.0, 100.0);
        self.hours_opacity = self.hours_opacity.clamp(0.0, 1.0);
        self.minutes_opacity = self.minutes_opacity.clamp(0.0, 1.0);
        self
    }

    /// Applies a partial update, field by field; untouched fields survive.
    pub fn apply(&self, patch: SettingsPatch) -> Self {
        let mut next = self.clone();
        if let Some(blur_level) = patch.blur_level {
            next.blur_level = blur_level;
        }
        if let Some(focus_mode) = patch.focus_mode {
            next.focus_mode = focus_mode;
        }
        if let Some(settings_theme) = patch.settings_theme {
            next.settings_theme = settings_theme;
        }
        if let Some(clock_show) = patch.clock_show {
            next.clock_show = clock_show;
        }
        if let Some(clock_format) = patch.clock_format {
            next.clock_format = clock_format;
        }
        if let Some(date_show) = patch.date_show {
            next.date_show = date_show;
        }
        if let Some(clock_color) = patch.clock_color {
            next.clock_color = clock_color;
        }
        if let Some(clock_color_minutes) = patch.clock_color_minutes {
            next.clock_color_minutes = clock_color_minutes;
        }
        if let Some(clock_size) = patch.clock_size {
            next.clock_size = clock_size;
        }
        if let Some(clock_position) = patch.clock_position {
            next.clock_position = clock_position;
        }
        if let Some(clock_layout) = patch.clock_layout {
            next.clock_layout = clock_layout;
        }
        if let Some(clock_font) = patch.clock_font {
            next.clock_font = clock_font;
        }
        if let Some(hours_opacity) = patch.hours_opacity {
            next.hours_opacity = hours_opacity;
        }
        if let Some(minutes_opacity) = patch.minutes_opacity {
            next.minutes_opacity = minutes_opacity;
        }
        next.normalized()
    }

    /// Resolves the minute color, honoring the override when one is set.
    pub fn effective_minutes_color(&self) -> &str {
        self.clock_color_minutes
            .as_deref()
            .unwrap_or(&self.clock_color)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
/// Per-field optional overlay applied by [`SettingsRecord::apply`].
///
/// `clock_color_minutes` is doubly optional: `None` leaves the override
/// untouched while `Some(None)` explicitly clears it back to inheritance.
pub struct SettingsPatch {
    /// New blur level when present.
    pub blur_level: Option<u32>,
    /// New focus-mode flag when present.
    pub focus_mode: Option<bool>,
    /// New panel theme when present.
    pub settings_theme: Option<SettingsTheme>,
    /// New clock visibility when present.
    pub clock_show: Option<bool>,
    /// New hour-cycle preference when present.
    pub clock_format: Option<ClockFormat>,
    /// New date visibility when present.
    pub date_show: Option<bool>,
    /// New base clock color when present.
    pub clock_color: Option<String>,
    /// Minute-color override update when present.
    pub clock_color_minutes: Option<Option<String>>,
    /// New clock size when present.
    pub clock_size: Option<u32>,
    /// New clock anchor when present.
    pub clock_position: Option<ClockPosition>,
    /// New layout when present.
    pub clock_layout: Option<ClockLayout>,
    /// New clock font when present.
    pub clock_font: Option<String>,
    /// New hour-group opacity when present.
    pub hours_opacity: Option<f64>,
    /// New minute-group opacity when present.
    pub minutes_opacity: Option<f64>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn persisted_wire_shape_is_camel_case() {
        let value = serde_json::to_value(SettingsRecord::default()).expect("serialize");
        let object = value.as_object().expect("object");

        assert_eq!(object.get("blurLevel"), Some(&json!(20)));
        assert_eq!(object.get("focusMode"), Some(&json!(true)));
        assert_eq!(object.get("settingsTheme"), Some(&json!("dark")));
        assert_eq!(object.get("clockFormat"), Some(&json!("12h")));
        assert_eq!(object.get("clockColor"), Some(&json!("#ffffff")));
        assert_eq!(object.get("clockColorMinutes"), Some(&json!(null)));
        assert_eq!(object.get("clockPosition"), Some(&json!({"x": 50.0, "y": 50.0})));
        assert_eq!(object.get("clockLayout"), Some(&json!("horizontal")));
        assert_eq!(object.get("clockFont"), Some(&json!("Outfit")));
        assert!(!object.contains_key("blur_level"));
    }

    #[test]
    fn partial_persisted_record_merges_over_defaults() {
        let raw = r##"{"blurLevel": 5, "clockFormat": "24h", "clockColor": "#123456"}"##;
        let record = SettingsRecord::from_persisted_json(raw).expect("parse");

        assert_eq!(record.blur_level, 5);
        assert_eq!(record.clock_format, ClockFormat::TwentyFourHour);
        assert_eq!(record.clock_color, "#123456");
        // Absent fields keep their defaults.
        assert_eq!(record.clock_size, 150);
        assert_eq!(record.clock_layout, ClockLayout::Horizontal);
        assert!(record.focus_mode);
        assert_eq!(record.clock_color_minutes, None);
    }

    #[test]
    fn corrupt_persisted_record_is_an_error() {
        assert!(SettingsRecord::from_persisted_json("{oops").is_err());
        assert!(SettingsRecord::from_persisted_json("[1, 2]").is_err());
    }

    #[test]
    fn normalization_clamps_out_of_range_fields() {
        let raw = r#"{"blurLevel": 900, "clockSize": 12, "clockPosition": {"x": -3.0, "y": 140.0}, "hoursOpacity": 7.5}"#;
        let record = SettingsRecord::from_persisted_json(raw).expect("parse");

        assert_eq!(record.blur_level, 50);
        assert_eq!(record.clock_size, 50);
        assert_eq!(record.clock_position, ClockPosition { x: 0.0, y: 100.0 });
        assert_eq!(record.hours_opacity, 1.0);
    }

    #[test]
    fn patch_apply_is_a_shallow_per_field_merge() {
        let base = SettingsRecord::default();
        let patched = base.apply(SettingsPatch {
            blur_level: Some(35),
            focus_mode: Some(false),
            ..SettingsPatch::default()
        });

        assert_eq!(patched.blur_level, 35);
        assert!(!patched.focus_mode);
        assert_eq!(patched.clock_color, base.clock_color);
        assert_eq!(patched.clock_size, base.clock_size);
    }

    #[test]
    fn minutes_override_survives_base_color_changes() {
        let record = SettingsRecord::default()
            .apply(SettingsPatch {
                clock_color_minutes: Some(Some("#ff0000".to_string())),
                ..SettingsPatch::default()
            })
            .apply(SettingsPatch {
                clock_color: Some("#00ff00".to_string()),
                ..SettingsPatch::default()
            });

        assert_eq!(record.clock_color, "#00ff00");
        assert_eq!(record.effective_minutes_color(), "#ff0000");
    }

    #[test]
    fn clearing_the_minutes_override_restores_inheritance() {
        let record = SettingsRecord::default()
            .apply(SettingsPatch {
                clock_color_minutes: Some(Some("hsla(10, 50%, 50%, 1)".to_string())),
                ..SettingsPatch::default()
            })
            .apply(SettingsPatch {
                clock_color: Some("#123456".to_string()),
                clock_color_minutes: Some(None),
                ..SettingsPatch::default()
            });

        assert_eq!(record.clock_color_minutes, None);
        assert_eq!(record.effective_minutes_color(), "#123456");
    }

    #[test]
    fn untouched_override_field_is_left_alone() {
        let with_override = SettingsRecord {
            clock_color_minutes: Some("#ff0000".to_string()),
            ..SettingsRecord::default()
        };
        let patched = with_override.apply(SettingsPatch {
            date_show: Some(false),
            ..SettingsPatch::default()
        });

        assert_eq!(patched.clock_color_minutes, Some("#ff0000".to_string()));
    }
}
