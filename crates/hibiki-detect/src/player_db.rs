use serde::{Deserialize, Serialize};

/// Embedded player database.
const EMBEDDED_DB: &str = include_str!("../data/players.toml");

/// Definition of a media player and how to find it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerDef {
    /// Display name (e.g., "NetEase Cloud Music").
    pub name: String,
    /// Executable names to match against process names.
    #[serde(default)]
    pub executables: Vec<String>,
    /// Suffixes the player appends to its window title after the
    /// "song - artist" part (e.g., "网易云音乐").
    #[serde(default)]
    pub title_suffixes: Vec<String>,
    /// Whether this player is polled.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

/// Wrapper for TOML deserialization.
#[derive(Debug, Deserialize)]
struct PlayerDbFile {
    #[serde(rename = "player")]
    players: Vec<PlayerDef>,
}

/// Database of known media players.
#[derive(Debug, Clone)]
pub struct PlayerDatabase {
    pub players: Vec<PlayerDef>,
}

impl PlayerDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
        }
    }

    /// Load the embedded player database.
    pub fn embedded() -> Self {
        let db: PlayerDbFile =
            toml::from_str(EMBEDDED_DB).expect("embedded players.toml should be valid");
        Self {
            players: db.players,
        }
    }

    /// Load a player database from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let db: PlayerDbFile = toml::from_str(toml_str)?;
        Ok(Self {
            players: db.players,
        })
    }

    /// Merge a user database into this one.
    /// Players with matching names are replaced; new players are appended.
    pub fn merge_user(&mut self, user_db: &PlayerDatabase) {
        for user_player in &user_db.players {
            if let Some(existing) = self.players.iter_mut().find(|p| p.name == user_player.name) {
                *existing = user_player.clone();
            } else {
                self.players.push(user_player.clone());
            }
        }
    }

    /// Get all enabled players.
    pub fn enabled_players(&self) -> impl Iterator<Item = &PlayerDef> {
        self.players.iter().filter(|p| p.enabled)
    }

    /// Title suffixes of all enabled players, for the title parser.
    pub fn title_suffixes(&self) -> Vec<String> {
        self.enabled_players()
            .flat_map(|p| p.title_suffixes.iter().cloned())
            .collect()
    }
}

impl Default for PlayerDatabase {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_loads() {
        let db = PlayerDatabase::embedded();
        assert_eq!(db.players.len(), 2);
        assert!(db.players.iter().all(|p| p.enabled));
    }

    #[test]
    fn test_embedded_executables() {
        let db = PlayerDatabase::embedded();
        let exes: Vec<&str> = db
            .enabled_players()
            .flat_map(|p| p.executables.iter().map(String::as_str))
            .collect();
        assert!(exes.contains(&"cloudmusic.exe"));
        assert!(exes.contains(&"qqmusic.exe"));
    }

    #[test]
    fn test_title_suffixes() {
        let db = PlayerDatabase::embedded();
        let suffixes = db.title_suffixes();
        assert!(suffixes.iter().any(|s| s == "网易云音乐"));
        assert!(suffixes.iter().any(|s| s == "QQ音乐"));
    }

    #[test]
    fn test_merge_user() {
        let mut db = PlayerDatabase::embedded();
        let original_count = db.players.len();

        let user_toml = r#"
            [[player]]
            name = "QQ Music"
            executables = ["qqmusic.exe"]
            title_suffixes = ["QQ音乐"]
            enabled = false

            [[player]]
            name = "Foobar2000"
            executables = ["foobar2000.exe"]
            title_suffixes = []
        "#;
        let user_db = PlayerDatabase::from_toml(user_toml).unwrap();
        db.merge_user(&user_db);

        // QQ Music replaced in place and now disabled.
        assert_eq!(db.players.len(), original_count + 1);
        assert!(!db.enabled_players().any(|p| p.name == "QQ Music"));

        // Foobar2000 appended and enabled by default.
        assert!(db.enabled_players().any(|p| p.name == "Foobar2000"));
    }

    #[test]
    fn test_disabled_player_excluded_from_suffixes() {
        let toml = r#"
            [[player]]
            name = "Disabled"
            executables = ["disabled.exe"]
            title_suffixes = ["Disabled Player"]
            enabled = false
        "#;
        let db = PlayerDatabase::from_toml(toml).unwrap();
        assert!(db.title_suffixes().is_empty());
    }
}
