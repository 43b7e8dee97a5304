//! End-to-end tests for the connection layer against the scripted driver.

#[cfg(test)]
mod connection_tests {
    use std::collections::BTreeMap;
    use uniobjects::config::Config;
    use uniobjects::test_utils::MockDriver;
    use uniobjects::{Connection, Connector, Field, FieldDefinition, UniError};

    fn init_logging() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    const CONFIG: &str = r##"
[connection]
host = "unidata.example.edu"
account = "/datatel/live"
username = "reader"
password = "secret"

[format]
field_separator = "^"
row_separator = "#"
select_only = true
"##;

    #[test]
    fn test_full_session_from_config() {
        init_logging();
        let config = Config::from_toml_str(CONFIG).unwrap();
        let driver = MockDriver::new().with_response("0001^Lovelace^#0002^Hopper^#");
        let mut conn = Connection::from_config(driver.clone(), &config.connection);
        conn.connect().unwrap();

        let mut definition = FieldDefinition::new("PERSON");
        definition.set_fields([Field::named("ID"), Field::aliased("LAST.NAME", "surname")]);
        definition.apply_format(config.format.as_ref().unwrap());

        let rows = conn.get_fields(&definition).unwrap().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get_field_by_name("id").unwrap().data(), Some("0001"));
        assert_eq!(rows[1].get_field_by_friendly_name("SURNAME").unwrap().data(), Some("Hopper"));

        let command = driver.state().commands[0].clone();
        insta::assert_snapshot!(
            command,
            @r##"LIST PERSON EVAL"ID:'^':LAST.NAME:'^':'#'" FMT "300L" ID.SUP HDR.SUP COL.SUP NO.PAGE COUNT.SUP SELECT.ONLY"##
        );

        conn.disconnect().unwrap();
        assert!(!conn.is_active().unwrap());
    }

    #[test]
    fn test_query_after_disconnect_is_not_connected() {
        init_logging();
        let driver = MockDriver::new().with_response("x");
        let mut conn = Connection::new(driver.clone(), "u", "p", "h", "a");
        conn.connect().unwrap();
        conn.disconnect().unwrap();

        assert!(matches!(conn.query("LIST VOC"), Err(UniError::NotConnected)));
        assert!(driver.state().commands.is_empty());
    }

    #[test]
    fn test_get_fields_conveniences_agree() {
        init_logging();
        let raw = "1|Ada|~2|Grace|~";
        let driver = MockDriver::new().with_response(raw);
        let mut conn = Connection::new(driver.clone(), "u", "p", "h", "a");
        conn.connect().unwrap();

        let by_name = conn.get_fields_by_name("STUDENTS", ["ID", "NAME"]).unwrap();
        let from_fields = conn
            .get_fields_from("STUDENTS", vec![Field::named("ID"), Field::named("NAME")])
            .unwrap();
        assert_eq!(by_name, from_fields);

        let mut pairs = BTreeMap::new();
        pairs.insert("ID", "key");
        pairs.insert("NAME", "name");
        let aliased = conn.get_fields_with_friendly_names("STUDENTS", pairs).unwrap().unwrap();
        assert_eq!(aliased[0].data("key"), Some("1"));
        assert_eq!(aliased[1].to_json(), serde_json::json!({"key": "2", "name": "Grace"}));

        let state = driver.state();
        assert_eq!(state.commands.len(), 3);
        assert_eq!(state.commands[0], state.commands[1]);
        assert_eq!(state.commands[1], state.commands[2]);
    }

    #[test]
    fn test_responses_are_consumed_in_order() {
        init_logging();
        let driver = MockDriver::new().with_responses(["1|~", ""]);
        let mut conn = Connection::new(driver, "u", "p", "h", "a");
        Connector::connect(&mut conn).unwrap();

        let definition = FieldDefinition::with_fields("STUDENTS", [Field::named("ID")]);
        assert_eq!(conn.get_fields(&definition).unwrap().map(|rows| rows.len()), Some(1));
        assert!(conn.get_fields(&definition).unwrap().is_none());
    }
}
