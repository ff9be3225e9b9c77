//! Human-readable labels for stat keys and game modes.

use std::borrow::Cow;

/// Known stat keys and their Russian labels. Lookup is case-insensitive.
const STAT_LABELS: &[(&str, &str)] = &[
    ("wins", "Побед"),
    ("losses", "Поражений"),
    ("kills", "Убийств"),
    ("deaths", "Смертей"),
    ("games", "Игр"),
    ("winstreak", "Серия побед"),
    ("best_winstreak", "Лучшая серия"),
    ("kd", "K/D"),
    ("wl", "W/L"),
    ("level", "Уровень"),
    ("exp", "Опыт"),
    ("experience", "Опыт"),
    ("coins", "Монеты"),
    ("final_kills", "Финальных убийств"),
    ("final_deaths", "Финальных смертей"),
    ("beds_broken", "Разрушенных кроватей"),
    ("beds_lost", "Потерянных кроватей"),
    ("beds", "Кроватей"),
    ("playtime", "Время игры"),
    ("winrate", "Процент побед"),
    ("top_gold", "Топ золота"),
    ("blocks_placed", "Блоков поставлено"),
    ("top_iron", "Топ железа"),
    ("bow_hits", "Попаданий из лука"),
    ("bow_shots", "Выстрелов из лука"),
    ("blocks_traveled", "Блоков пройдено"),
    ("day", "День"),
    ("blocks_broken", "Блоков разрушено"),
];

/// Display names for game mode codes (matched uppercased).
const MODE_NAMES: &[(&str, &str)] = &[("BW", "BedWars"), ("DUELS", "Duels")];

/// Label for a stat key.
///
/// Unknown keys become title-cased words: `custom_metric` → `Custom Metric`.
pub fn label(key: &str) -> Cow<'static, str> {
    STAT_LABELS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(key))
        .map_or_else(|| Cow::Owned(title_case(key)), |(_, label)| Cow::Borrowed(*label))
}

/// Display name for a game mode; unknown modes are shown uppercased.
pub fn mode_name(mode: &str) -> String {
    let upper = mode.to_uppercase();
    MODE_NAMES
        .iter()
        .find(|(code, _)| *code == upper)
        .map_or(upper, |(_, name)| (*name).to_string())
}

/// Underscores to spaces, then each alphabetic run capitalized.
fn title_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut at_word_start = true;
    for c in key.replace('_', " ").chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys() {
        assert_eq!(label("wins"), "Побед");
        assert_eq!(label("WINS"), "Побед");
        assert_eq!(label("best_winstreak"), "Лучшая серия");
        assert_eq!(label("experience"), label("exp"));
    }

    #[test]
    fn unknown_keys_are_title_cased() {
        assert_eq!(label("custom_metric"), "Custom Metric");
        assert_eq!(label("KILLS_PER_game"), "Kills Per Game");
        assert_eq!(label("top3place"), "Top3Place");
        assert_eq!(label("winsToday"), "Winstoday");
    }

    #[test]
    fn mode_names() {
        assert_eq!(mode_name("bw"), "BedWars");
        assert_eq!(mode_name("Duels"), "Duels");
        assert_eq!(mode_name("skywars"), "SKYWARS");
    }
}
