use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub min_players_to_start: usize,
    pub podium_size: usize,
    /// Optional path to a JSON word list; absent means the builtin
    /// dictionary.
    pub words_file: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("Invalid PORT"),
            min_players_to_start: env::var("MIN_PLAYERS_TO_START")
                .unwrap_or_else(|_| "2".to_string())
                .parse()
                .expect("Invalid MIN_PLAYERS_TO_START"),
            podium_size: env::var("PODIUM_SIZE")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .expect("Invalid PODIUM_SIZE"),
            words_file: env::var("WORDS_FILE").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
