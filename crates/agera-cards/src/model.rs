//! Typed views over the JSON payloads the game API returns.
//!
//! Each payload gets a `from_value` parse step that decides its shape once,
//! so renderers match on variants instead of probing JSON while drawing.

use serde_json::{Map, Value};

use crate::format::display_value;
use crate::labels::label;
use crate::rank::RankSource;

// ── Stats ───────────────────────────────────────────────────────────

/// Wrapper keys that may hold the flat stat mapping, probed in order.
pub const CONTAINER_KEYS: &[&str] = &["data", "stats", "values", "statistics", "playerStats"];

/// Keys that are never displayed as stats.
pub const EXCLUDED_KEYS: &[&str] = &["success", "message", "name", "mode", "player", "playerName", "day"];

/// Keys shown first, in this order, when present.
pub const PRIORITY_KEYS: &[&str] = &[
    "wins",
    "kills",
    "deaths",
    "losses",
    "games",
    "winstreak",
    "best_winstreak",
    "kd",
    "wl",
    "final_kills",
    "final_deaths",
    "beds_broken",
    "beds_lost",
    "beds",
    "level",
    "exp",
    "experience",
    "coins",
    "playtime",
    "winrate",
    "top_gold",
    "blocks_placed",
    "top_iron",
    "bow_hits",
    "bow_shots",
    "blocks_traveled",
    "blocks_broken",
];

/// One labelled row on the stats card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatEntry {
    pub label: String,
    pub value: String,
}

impl StatEntry {
    fn new(key: &str, value: &Value) -> Self {
        Self {
            label: label(key).into_owned(),
            value: display_value(value),
        }
    }
}

/// Player stats response.
#[derive(Debug, Clone, PartialEq)]
pub enum StatsPayload {
    /// The stat mapping, already unwrapped from its container key.
    Flat(Map<String, Value>),
    /// Not an object at all.
    Invalid,
}

impl StatsPayload {
    pub fn from_value(value: &Value) -> Self {
        let Some(root) = value.as_object() else {
            return Self::Invalid;
        };
        let data = CONTAINER_KEYS
            .iter()
            .find_map(|key| root.get(*key).and_then(Value::as_object))
            .unwrap_or(root);
        Self::Flat(data.clone())
    }

    /// Rows to draw: priority keys first, then the rest in payload order,
    /// with one level of nested objects flattened.
    pub fn display_entries(&self) -> Vec<StatEntry> {
        let Self::Flat(data) = self else {
            return Vec::new();
        };

        let mut entries = Vec::new();
        let mut added: Vec<&str> = Vec::new();

        for &key in PRIORITY_KEYS {
            if let Some(value) = data.get(key).filter(|v| is_scalar(v)) {
                entries.push(StatEntry::new(key, value));
                added.push(key);
            }
        }

        for (key, value) in data {
            if is_excluded(key) || added.contains(&key.as_str()) || value.is_null() {
                continue;
            }
            match value {
                Value::Object(nested) => {
                    entries.extend(
                        nested
                            .iter()
                            .filter(|(k, v)| !is_excluded(k) && is_scalar(v))
                            .map(|(k, v)| StatEntry::new(k, v)),
                    );
                }
                Value::Array(_) => {}
                scalar => entries.push(StatEntry::new(key, scalar)),
            }
        }
        entries
    }
}

fn is_excluded(key: &str) -> bool {
    EXCLUDED_KEYS.contains(&key)
}

/// Non-null, non-container value.
fn is_scalar(value: &Value) -> bool {
    !(value.is_null() || value.is_object() || value.is_array())
}

// ── Profile ─────────────────────────────────────────────────────────

/// Player profile fields used by the profile card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub username: Option<String>,
    pub display_name: Option<String>,
    /// Text form of `userId`, whatever its JSON type.
    pub user_id: Option<String>,
    /// Only non-empty values are kept.
    pub language: Option<String>,
    pub current_server: Option<String>,
    pub online: bool,
    /// Raw `lastLogin`; formatted at draw time with the configured timezone.
    pub last_login: Option<Value>,
    /// First entry of `ranks`.
    pub rank: Option<RankSource>,
}

/// Player profile response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfilePayload {
    Profile(Profile),
    Invalid,
}

impl ProfilePayload {
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::Invalid;
        };
        let string = |key: &str| map.get(key).and_then(Value::as_str).map(String::from);
        let present = |key: &str| map.get(key).filter(|v| !v.is_null());

        Self::Profile(Profile {
            username: string("username"),
            display_name: string("displayName"),
            user_id: present("userId").map(display_value),
            language: string("language").filter(|s| !s.is_empty()),
            current_server: present("currentServer").map(display_value),
            online: map.get("online").and_then(Value::as_bool).unwrap_or(false),
            last_login: present("lastLogin").cloned(),
            rank: map.get("ranks").and_then(RankSource::from_value),
        })
    }

    pub fn profile(&self) -> Option<&Profile> {
        match self {
            Self::Profile(profile) => Some(profile),
            Self::Invalid => None,
        }
    }
}

// ── Staff ───────────────────────────────────────────────────────────

pub const UNKNOWN_NAME: &str = "Неизвестно";
pub const UNKNOWN_ID: &str = "N/A";

/// One online staff member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffEntry {
    /// Raw display name; formatting codes are stripped when drawn.
    pub display_name: String,
    pub user_id: String,
}

impl StaffEntry {
    fn from_value(value: &Value) -> Self {
        let field = |key: &str| value.get(key).filter(|v| !v.is_null());
        Self {
            display_name: field("displayName").map_or_else(|| UNKNOWN_NAME.to_string(), display_value),
            user_id: field("userId").map_or_else(|| UNKNOWN_ID.to_string(), display_value),
        }
    }
}

/// Online staff response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaffRoster {
    /// Members in API order. A response without `players` is an empty roster.
    Players(Vec<StaffEntry>),
    Invalid,
}

impl StaffRoster {
    pub fn from_value(value: &Value) -> Self {
        let players = match value {
            Value::Object(map) => match map.get("players") {
                None | Some(Value::Null) => return Self::Players(Vec::new()),
                Some(Value::Array(items)) => items,
                Some(_) => return Self::Invalid,
            },
            Value::Array(items) => items,
            _ => return Self::Invalid,
        };
        Self::Players(players.iter().map(StaffEntry::from_value).collect())
    }

    pub fn entries(&self) -> &[StaffEntry] {
        match self {
            Self::Players(entries) => entries,
            Self::Invalid => &[],
        }
    }
}

// ── Punishments ─────────────────────────────────────────────────────

/// Staff punishment tallies; missing fields are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PunishmentStats {
    pub total_bans: i64,
    pub total_mutes: i64,
    pub total_active_bans: i64,
    pub total_active_mutes: i64,
    pub total_week_bans: i64,
    pub total_week_mutes: i64,
}

impl PunishmentStats {
    pub fn from_value(value: &Value) -> Self {
        let count = |key: &str| value.get(key).and_then(as_count).unwrap_or(0);
        Self {
            total_bans: count("totalBans"),
            total_mutes: count("totalMutes"),
            total_active_bans: count("totalActiveBans"),
            total_active_mutes: count("totalActiveMutes"),
            total_week_bans: count("totalWeekBans"),
            total_week_mutes: count("totalWeekMutes"),
        }
    }

    /// `(label, value)` rows in card order.
    pub fn rows(&self) -> [(&'static str, i64); 6] {
        [
            ("Всего банов", self.total_bans),
            ("Всего мутов", self.total_mutes),
            ("Активных банов", self.total_active_bans),
            ("Активных мутов", self.total_active_mutes),
            ("Банов за неделю", self.total_week_bans),
            ("Мутов за неделю", self.total_week_mutes),
        ]
    }
}

// ── Online ──────────────────────────────────────────────────────────

/// Total players online.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OnlineCount(pub i64);

impl OnlineCount {
    /// Read `online`, then `count`; anything else is zero.
    pub fn from_value(value: &Value) -> Self {
        Self(
            ["online", "count"]
                .iter()
                .find_map(|key| value.get(*key).and_then(as_count))
                .unwrap_or(0),
        )
    }
}

/// Integer from a JSON number or numeric string.
#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
fn as_count(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn labels(entries: &[StatEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.label.as_str()).collect()
    }

    #[test]
    fn stats_container_is_unwrapped() {
        let payload = StatsPayload::from_value(&json!({
            "success": true,
            "stats": { "kills": 5 },
            "data": { "wins": 10 }
        }));
        assert_eq!(
            payload.display_entries(),
            vec![StatEntry {
                label: "Побед".into(),
                value: "10".into()
            }]
        );
    }

    #[test]
    fn stats_priority_then_payload_order() {
        let payload = StatsPayload::from_value(&json!({
            "custom_metric": 7,
            "name": "Steve",
            "kills": 5,
            "day": 3,
            "wins": 10,
            "history": [1, 2],
            "skipped": null,
            "bedwars": { "beds": 2, "mode": "BW", "nested": { "x": 1 }, "solo_wins": 4 },
            "ratio": 1.5
        }));
        assert_eq!(
            labels(&payload.display_entries()),
            vec!["Побед", "Убийств", "Custom Metric", "Кроватей", "Solo Wins", "Ratio"]
        );
    }

    #[test]
    fn stats_priority_skips_containers_and_nulls() {
        let payload = StatsPayload::from_value(&json!({
            "wins": { "solo": 1 },
            "kills": null,
            "deaths": "3"
        }));
        let entries = payload.display_entries();
        assert_eq!(labels(&entries), vec!["Смертей", "Solo"]);
        assert_eq!(entries[0].value, "3");
    }

    #[test]
    fn stats_booleans_are_capitalized() {
        let payload = StatsPayload::from_value(&json!({ "flag": true, "hidden": false }));
        let values: Vec<_> = payload
            .display_entries()
            .into_iter()
            .map(|e| (e.label, e.value))
            .collect();
        assert_eq!(
            values,
            vec![
                ("Flag".to_string(), "True".to_string()),
                ("Hidden".to_string(), "False".to_string()),
            ]
        );
    }

    #[test]
    fn stats_non_object_is_invalid() {
        assert_eq!(StatsPayload::from_value(&json!([1, 2])), StatsPayload::Invalid);
        assert_eq!(StatsPayload::from_value(&json!("oops")), StatsPayload::Invalid);
        assert!(StatsPayload::Invalid.display_entries().is_empty());
    }

    #[test]
    fn profile_fields() {
        let payload = ProfilePayload::from_value(&json!({
            "username": "Steve",
            "displayName": "§aSteve",
            "userId": 42,
            "language": "",
            "currentServer": "lobby-1",
            "online": true,
            "lastLogin": 1_700_000_000,
            "ranks": [{ "name": "GOLD" }]
        }));
        let profile = payload.profile().unwrap();
        assert_eq!(profile.username.as_deref(), Some("Steve"));
        assert_eq!(profile.user_id.as_deref(), Some("42"));
        assert_eq!(profile.language, None);
        assert_eq!(profile.current_server.as_deref(), Some("lobby-1"));
        assert!(profile.online);
        assert_eq!(profile.last_login, Some(json!(1_700_000_000)));
        assert_eq!(profile.rank.as_ref().and_then(RankSource::raw_label), Some("GOLD"));
    }

    #[test]
    fn profile_defaults() {
        let profile = ProfilePayload::from_value(&json!({})).profile().cloned().unwrap();
        assert_eq!(profile, Profile::default());
        assert_eq!(ProfilePayload::from_value(&json!(null)), ProfilePayload::Invalid);
    }

    #[test]
    fn staff_roster_shapes() {
        let roster = StaffRoster::from_value(&json!({
            "players": [{ "displayName": "§cAdmin", "userId": 1 }, {}]
        }));
        assert_eq!(
            roster.entries(),
            &[
                StaffEntry {
                    display_name: "§cAdmin".into(),
                    user_id: "1".into()
                },
                StaffEntry {
                    display_name: UNKNOWN_NAME.into(),
                    user_id: UNKNOWN_ID.into()
                },
            ]
        );
        assert_eq!(StaffRoster::from_value(&json!({})), StaffRoster::Players(vec![]));
        assert_eq!(StaffRoster::from_value(&json!([{ "userId": "7" }])).entries().len(), 1);
        assert_eq!(StaffRoster::from_value(&json!({ "players": 3 })), StaffRoster::Invalid);
    }

    #[test]
    fn punishments_default_to_zero() {
        let stats = PunishmentStats::from_value(&json!({ "totalBans": 12, "totalMutes": "4" }));
        assert_eq!(stats.total_bans, 12);
        assert_eq!(stats.total_mutes, 4);
        assert_eq!(stats.total_week_mutes, 0);
        assert_eq!(stats.rows()[0], ("Всего банов", 12));
    }

    #[test]
    fn online_count_sources() {
        assert_eq!(OnlineCount::from_value(&json!({ "online": 42 })), OnlineCount(42));
        assert_eq!(OnlineCount::from_value(&json!({ "count": 7 })), OnlineCount(7));
        assert_eq!(OnlineCount::from_value(&json!({ "players": [] })), OnlineCount(0));
        assert_eq!(OnlineCount::from_value(&json!(5)), OnlineCount(0));
    }
}
