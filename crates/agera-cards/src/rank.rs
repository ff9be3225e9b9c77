//! Rank resolution: raw rank field → display label and color.

use image::Rgba;
use serde_json::Value;

use crate::sanitize::sanitize;
use crate::theme::rgb;

/// Color for ranks missing from [`RANK_COLORS`].
pub const FALLBACK_COLOR: Rgba<u8> = rgb(255, 255, 255);

/// "You" half of the YouTube badge.
pub const YOUTUBE_RED: Rgba<u8> = rgb(255, 0, 0);

/// "Tube" half of the YouTube badge, and the nickname after it.
pub const YOUTUBE_WHITE: Rgba<u8> = rgb(255, 255, 255);

const YOUTUBE: &str = "YOUTUBE";
const AX_TEAM: &str = "AX_TEAM";
const DEFAULT: &str = "DEFAULT";

/// Rank key (uppercase) → color. `None` marks the two-color YouTube badge.
const RANK_COLORS: &[(&str, Option<Rgba<u8>>)] = &[
    (DEFAULT, Some(rgb(128, 128, 128))),
    ("IRON", Some(rgb(144, 238, 144))),
    ("GOLD", Some(rgb(255, 165, 0))),
    ("DELUXE", Some(rgb(173, 216, 230))),
    ("MASTER", Some(rgb(255, 0, 0))),
    ("RUBIUM", Some(rgb(139, 0, 0))),
    ("ULTRA", Some(rgb(255, 192, 203))),
    ("SPONSOR", Some(rgb(0, 100, 0))),
    (YOUTUBE, None),
    ("BETA", Some(rgb(128, 128, 128))),
    ("BUILD", Some(rgb(0, 128, 0))),
    ("HELPER", Some(rgb(128, 128, 128))),
    ("MODERATOR", Some(rgb(128, 128, 128))),
    ("SR_MODER", Some(rgb(0, 0, 139))),
    ("HEAD_MODERATOR", Some(rgb(0, 0, 139))),
    (AX_TEAM, Some(rgb(128, 0, 128))),
    ("ADMINISTRATOR", Some(rgb(255, 0, 0))),
    ("DEVELOPER", Some(rgb(255, 255, 255))),
    ("OWNER", Some(rgb(139, 0, 0))),
];

/// How a rank label is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankColor {
    Solid(Rgba<u8>),
    /// "You" in red followed by "Tube" in white.
    YouTube,
}

/// A resolved rank, ready to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankDisplay {
    /// Sanitized, uppercased lookup key (`AX_TEAM`).
    pub key: String,
    /// Text to draw (`TEAM`).
    pub label: String,
    pub color: RankColor,
}

impl RankDisplay {
    /// Resolve a raw label. Returns `None` if nothing is left after
    /// stripping formatting codes.
    pub fn parse(raw: &str) -> Option<Self> {
        let clean = sanitize(raw);
        let clean = clean.trim();
        if clean.is_empty() {
            return None;
        }

        let key = clean.to_uppercase();
        let label = if key == AX_TEAM {
            "TEAM".to_string()
        } else {
            clean.to_string()
        };
        let color = RANK_COLORS
            .iter()
            .find(|(known, _)| *known == key)
            .map_or(RankColor::Solid(FALLBACK_COLOR), |(_, color)| {
                color.map_or(RankColor::YouTube, RankColor::Solid)
            });

        Some(Self { key, label, color })
    }

    pub fn is_default(&self) -> bool {
        self.key == DEFAULT
    }

    pub fn is_youtube(&self) -> bool {
        self.color == RankColor::YouTube
    }

    /// Single color for the label; the YouTube badge reports its red half.
    pub fn solid_color(&self) -> Rgba<u8> {
        match self.color {
            RankColor::Solid(color) => color,
            RankColor::YouTube => YOUTUBE_RED,
        }
    }
}

/// A rank entry as the API ships it: a bare label or a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankSource {
    Label(String),
    Record {
        name: Option<String>,
        display_name: Option<String>,
    },
}

impl RankSource {
    /// Decode one rank entry, or the first element of a rank list.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(label) => Some(Self::Label(label.clone())),
            Value::Object(map) => {
                let field = |name: &str| {
                    map.get(name)
                        .and_then(Value::as_str)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                };
                Some(Self::Record {
                    name: field("name"),
                    display_name: field("displayName"),
                })
            }
            Value::Array(items) => items.first().and_then(Self::from_value),
            _ => None,
        }
    }

    /// The label to resolve: `name` wins over `displayName`.
    pub fn raw_label(&self) -> Option<&str> {
        match self {
            Self::Label(label) => Some(label),
            Self::Record { name, display_name } => name.as_deref().or(display_name.as_deref()),
        }
    }
}

/// Resolve an optional rank source to its display form.
pub fn resolve(source: Option<&RankSource>) -> Option<RankDisplay> {
    source
        .and_then(RankSource::raw_label)
        .and_then(RankDisplay::parse)
}

/// Resolve the first rank of a profile's `ranks` value.
pub fn resolve_value(ranks: &Value) -> Option<RankDisplay> {
    resolve(RankSource::from_value(ranks).as_ref())
}
