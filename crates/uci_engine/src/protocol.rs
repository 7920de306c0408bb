//! Parsing of the engine-to-GUI side of the UCI protocol
//!
//! Only the lines the match runner cares about are understood:
//! `id name`, `option ... type spin` and `bestmove`.

/// A numeric option advertised by the engine during the handshake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinOption {
    pub name: String,
    pub default: i64,
    pub min: i64,
    pub max: i64,
}

impl SpinOption {
    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }
}

/// Move token of a `bestmove <move> [ponder <move>]` line
pub fn parse_bestmove(line: &str) -> Option<&str> {
    let mut parts = line.split_whitespace();
    if parts.next()? != "bestmove" {
        return None;
    }
    parts.next()
}

/// Engine name from an `id name <name>` line
pub fn parse_id_name(line: &str) -> Option<&str> {
    let rest = line.trim().strip_prefix("id name ")?.trim();
    (!rest.is_empty()).then_some(rest)
}

/// `option name <name> type spin default <n> min <n> max <n>`
///
/// Option names may contain spaces, e.g. `Skill Level`.
pub fn parse_spin_option(line: &str) -> Option<SpinOption> {
    let rest = line.trim().strip_prefix("option name ")?;
    let (name, decl) = rest.split_once(" type ")?;
    let tokens: Vec<&str> = decl.split_whitespace().collect();
    if tokens.first() != Some(&"spin") {
        return None;
    }

    let value_of = |key: &str| -> Option<i64> {
        let idx = tokens.iter().position(|&t| t == key)?;
        tokens.get(idx + 1)?.parse().ok()
    };

    Some(SpinOption {
        name: name.trim().to_string(),
        default: value_of("default")?,
        min: value_of("min")?,
        max: value_of("max")?,
    })
}

/// `setoption` command for `name` = `value`
pub fn set_option(name: &str, value: impl std::fmt::Display) -> String {
    format!("setoption name {name} value {value}")
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod protocol_tests;
