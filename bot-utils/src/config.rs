//! Access to the TOML config file. Every lookup that fails is logged, replaced
//! with its default and written into the map, so the file that gets saved
//! back on startup lists every setting in use.

use std::convert::TryInto;
pub use toml::{map::Map, Value};

pub fn integer_or<T>(config: &mut Map<String, Value>, key: &str, default: T) -> T
where
    T: Copy + Into<i64>,
    i64: TryInto<T>,
{
    match config
        .get(key)
        .and_then(|v| v.as_integer())
        .and_then(|i| i.try_into().ok())
    {
        Some(i) => i,
        None => {
            let value: i64 = default.into();
            log::warn!("unable to read {}, overwriting with {}", key, value);
            config.insert(key.to_string(), Value::Integer(value));
            default
        }
    }
}

pub fn string_or(config: &mut Map<String, Value>, key: &str, default: &str) -> String {
    match config
        .get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
    {
        Some(s) => s.to_owned(),
        None => {
            log::warn!("unable to read {}, overwriting with {:?}", key, default);
            config.insert(key.to_string(), Value::from(default));
            default.to_owned()
        }
    }
}

/// The sub table `name`, created if missing or not a table.
pub fn section<'c>(config: &'c mut Map<String, Value>, name: &str) -> &'c mut Map<String, Value> {
    if !config.get(name).map_or(false, |v| v.is_table()) {
        log::warn!("missing {} section in config", name);
        config.insert(name.to_string(), Value::from(Map::new()));
    }
    match config.get_mut(name) {
        Some(Value::Table(table)) => table,
        _ => unreachable!("{} was just inserted as a table", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Map<String, Value> {
        toml::from_str(text).unwrap()
    }

    #[test]
    fn test_integer_or() {
        let mut config = parse("rng_workers = 8\nroll_timeout_ms = -5");
        assert_eq!(integer_or::<u32>(&mut config, "rng_workers", 4), 8);
        assert_eq!(integer_or::<u32>(&mut config, "roll_timeout_ms", 2000), 2000);
        assert_eq!(config.get("roll_timeout_ms"), Some(&Value::Integer(2000)));
        assert_eq!(integer_or::<u32>(&mut config, "rng_reseed_s", 300), 300);
        assert_eq!(config.get("rng_reseed_s"), Some(&Value::Integer(300)));
    }

    #[test]
    fn test_string_or() {
        let mut config = parse("command_prefix = \"?\"\nempty = \"\"");
        assert_eq!(string_or(&mut config, "command_prefix", "!"), "?");
        assert_eq!(string_or(&mut config, "empty", "!"), "!");
        assert_eq!(string_or(&mut config, "missing", "!"), "!");
        assert_eq!(
            config.get("missing"),
            Some(&Value::String("!".to_string()))
        );
    }

    #[test]
    fn test_section() {
        let mut config = parse("discord = 3\n[other]\nkey = 1");
        section(&mut config, "discord").insert("invite_url".to_string(), Value::from("x"));
        assert_eq!(
            config
                .get("discord")
                .and_then(|d| d.get("invite_url"))
                .and_then(|u| u.as_str()),
            Some("x")
        );
        assert_eq!(
            section(&mut config, "other").get("key"),
            Some(&Value::Integer(1))
        );
        section(&mut config, "new");
        assert!(config.get("new").map_or(false, |v| v.is_table()));
    }
}
