use regex::Regex;

use crate::sentinel;

/// Extracts a normalized "song - artist" line from a raw window title.
///
/// Patterns are tried in order, first match wins:
/// 1. `song - artist - <known player suffix>`
/// 2. `song - artist`
/// 3. `song — artist` (em dash)
///
/// A title matching none of them is passed through unchanged; an empty
/// or absent title yields the "no song" sentinel.
#[derive(Debug, Clone)]
pub struct TitleParser {
    patterns: Vec<Regex>,
}

impl TitleParser {
    /// Build a parser for the given player title suffixes.
    pub fn new<S: AsRef<str>>(suffixes: &[S]) -> Self {
        let mut patterns = Vec::with_capacity(3);

        if !suffixes.is_empty() {
            let alternation = suffixes
                .iter()
                .map(|s| regex::escape(s.as_ref()))
                .collect::<Vec<_>>()
                .join("|");
            if let Ok(re) = Regex::new(&format!("^(.*?) - (.*?) - (?:{alternation})$")) {
                patterns.push(re);
            }
        }

        for pattern in [r"^(.*?) - (.*?)$", r"^(.*?) — (.*?)$"] {
            if let Ok(re) = Regex::new(pattern) {
                patterns.push(re);
            }
        }

        Self { patterns }
    }

    /// Parse a raw window title. `None` or empty means nothing is playing.
    pub fn parse(&self, title: Option<&str>) -> String {
        let title = match title {
            Some(t) if !t.is_empty() => t,
            _ => return sentinel::NO_SONG.to_string(),
        };

        for re in &self.patterns {
            if let Some(caps) = re.captures(title) {
                let song = caps.get(1).map_or("", |m| m.as_str()).trim();
                let artist = caps.get(2).map_or("", |m| m.as_str()).trim();
                return format!("{song} - {artist}");
            }
        }

        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> TitleParser {
        TitleParser::new(&["网易云音乐", "QQ音乐"])
    }

    #[test]
    fn test_strips_known_player_suffix() {
        let parsed = parser().parse(Some("Shape of You - Ed Sheeran - 网易云音乐"));
        assert_eq!(parsed, "Shape of You - Ed Sheeran");

        let parsed = parser().parse(Some("晴天 - 周杰伦 - QQ音乐"));
        assert_eq!(parsed, "晴天 - 周杰伦");
    }

    #[test]
    fn test_plain_song_artist() {
        let parsed = parser().parse(Some("Shape of You - Ed Sheeran"));
        assert_eq!(parsed, "Shape of You - Ed Sheeran");
    }

    #[test]
    fn test_em_dash_variant() {
        let parsed = parser().parse(Some("Lemon — Kenshi Yonezu"));
        assert_eq!(parsed, "Lemon - Kenshi Yonezu");
    }

    #[test]
    fn test_trims_whitespace_around_parts() {
        let parsed = parser().parse(Some("Shape of You  -  Ed Sheeran - 网易云音乐"));
        assert_eq!(parsed, "Shape of You - Ed Sheeran");
    }

    #[test]
    fn test_unknown_suffix_kept_as_artist_tail() {
        // Only known suffixes are stripped; anything else falls through
        // to the plain pattern and stays part of the artist.
        let parsed = parser().parse(Some("Song - Artist - Some Player"));
        assert_eq!(parsed, "Song - Artist - Some Player");
    }

    #[test]
    fn test_no_pattern_returns_title_unchanged() {
        let parsed = parser().parse(Some("网易云音乐"));
        assert_eq!(parsed, "网易云音乐");
    }

    #[test]
    fn test_empty_and_absent_title_yield_sentinel() {
        assert_eq!(parser().parse(Some("")), sentinel::NO_SONG);
        assert_eq!(parser().parse(None), sentinel::NO_SONG);
    }

    #[test]
    fn test_no_suffixes_still_parses_plain_titles() {
        let parser = TitleParser::new::<&str>(&[]);
        assert_eq!(parser.parse(Some("A - B")), "A - B");
    }
}
