use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use rand::seq::SliceRandom;

use fictionary_types::Word;

/// Supplies a word and its canonical definition on request. Stateless and
/// pluggable: the built-in list, a file on disk, or anything else that can
/// hand out `Word` values.
pub trait WordSource: Send + Sync {
    fn fetch_random_word(&self) -> Result<Word>;
}

/// In-memory word list with uniform random draws.
pub struct WordList {
    entries: Vec<Word>,
}

impl WordList {
    pub fn new(entries: Vec<Word>) -> Result<Self> {
        if entries.is_empty() {
            return Err(anyhow!("word list must contain at least one entry"));
        }
        Ok(Self { entries })
    }

    /// Load a JSON array of `{word, definition}` objects.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read word list {}", path.display()))?;
        let entries: Vec<Word> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse word list {}", path.display()))?;
        Self::new(entries)
    }

    /// The stock networking dictionary shipped with the game.
    pub fn builtin() -> Self {
        let entries = [
            (
                "socket",
                "A socket is one endpoint of a two-way communication link between two programs running on the network. A socket is bound to a port number so that the TCP layer can identify the application that data is destined to.",
            ),
            (
                "server",
                "A server is a computer program or a device that provides functionality for other programs or devices, called clients. This architecture is called the client-server model.",
            ),
            (
                "client",
                "A client is a piece of computer hardware or software that accesses a service made available by a server as part of the client-server model of computer networks.",
            ),
            (
                "router",
                "A router is a networking device that forwards data packets between computer networks. Routers perform the traffic directing functions on the Internet.",
            ),
            (
                "firewall",
                "A firewall is a network security system that monitors and controls incoming and outgoing network traffic based on predetermined security rules.",
            ),
            (
                "protocol",
                "A protocol is a set of rules that allows data exchange between devices. It defines the rules for data transmission on a network.",
            ),
            (
                "bandwidth",
                "Bandwidth is the maximum rate of data transfer across a network path. It is a key factor in determining the speed of an internet connection.",
            ),
            (
                "latency",
                "Latency is the time it takes for data to travel from its source to its destination. It is a key factor in determining the responsiveness of a network.",
            ),
            (
                "encryption",
                "Encryption is the process of converting data into a code to prevent unauthorized access. It is used to secure data transmitted over a network.",
            ),
            (
                "decryption",
                "Decryption is the process of converting encrypted data back into its original form. It is used to read encrypted data that has been received.",
            ),
        ];

        Self {
            entries: entries
                .into_iter()
                .map(|(word, definition)| Word {
                    word: word.to_string(),
                    definition: definition.to_string(),
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl WordSource for WordList {
    fn fetch_random_word(&self) -> Result<Word> {
        self.entries
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| anyhow!("word list is empty"))
    }
}
