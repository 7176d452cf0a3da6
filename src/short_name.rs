static CSMT_LONG_FORM: &str = "SHIVAJI MAH T";
static CSMT: &str = "CSMT";
static TERMINUS: &str = "TERMINUS";
static TERMINUS_SUFFIX: &str = "T";

/// Compact label for a station's English name, as used in the route list.
///
/// Lookup plus heuristic; only known to be right for the bundled names.
pub fn short_name(name: &str) -> String {
    if name.contains(CSMT_LONG_FORM) {
        return CSMT.to_string();
    }

    let words: Vec<&str> = name.split(' ').collect();
    if name.contains(TERMINUS) {
        return format!("{} {}", words[0], TERMINUS_SUFFIX);
    }

    // Already in terminus form, e.g. "KALYAN T".
    if words.len() == 2 && words[1] == TERMINUS_SUFFIX {
        return name.to_string();
    }

    // Leading initials belong to the name ("C SHIVAJI").
    if words.len() > 1 && words[0].chars().count() <= 2 {
        return format!("{} {}", words[0], words[1]);
    }

    words[0].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names() {
        assert_eq!(short_name("PANVEL"), "PANVEL");
        assert_eq!(short_name("C SHIVAJI MAH T"), "CSMT");
        assert_eq!(short_name("KALYAN TERMINUS"), "KALYAN T");
        assert_eq!(short_name("NAVADE ROAD"), "NAVADE");
        assert_eq!(short_name("LOKMANYA TILAK TERMINUS"), "LOKMANYA T");
        assert_eq!(short_name("C B D BELAPUR"), "C B");
    }

    #[test]
    fn single_short_word_is_kept() {
        assert_eq!(short_name("KU"), "KU");
        assert_eq!(short_name(""), "");
    }

    #[test]
    fn idempotent() {
        for name in [
            "PANVEL",
            "C SHIVAJI MAH T",
            "KALYAN TERMINUS",
            "NAVADE ROAD",
            "C B D BELAPUR",
            "VASHI",
            "KU",
        ] {
            let once = short_name(name);
            assert_eq!(short_name(&once), once, "{name}");
        }
    }
}
