use std::collections::HashMap;

use super::*;

fn config_from(pairs: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    Config::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_when_unset() {
    let config = config_from(&[]);
    assert_eq!(config, Config::default());
    assert_eq!(config.db_max_connections, 5);
    assert_eq!(config.save_as_new_suffix, " (Edited)");
    assert_eq!(config.database_url, None);
}

#[test]
fn reads_all_keys() {
    let user = Uuid::new_v4();
    let user_str = user.to_string();
    let config = config_from(&[
        ("DATABASE_URL", "postgres://localhost/rooms"),
        ("DB_MAX_CONNECTIONS", "12"),
        ("SAVE_AS_NEW_SUFFIX", " copy"),
        ("ROOMPLAN_USER_ID", &user_str),
    ]);
    assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/rooms"));
    assert_eq!(config.db_max_connections, 12);
    assert_eq!(config.save_as_new_suffix, " copy");
    assert_eq!(config.user_id, Some(user));
}

#[test]
fn bad_values_fall_back() {
    let config = config_from(&[("DB_MAX_CONNECTIONS", "lots"), ("ROOMPLAN_USER_ID", "nobody"), ("DATABASE_URL", "")]);
    assert_eq!(config.db_max_connections, 5);
    assert_eq!(config.user_id, None);
    assert_eq!(config.database_url, None);
}
