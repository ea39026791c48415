//! Integration tests for types

#[cfg(test)]
mod tests {
    use hostsetup_types::*;

    #[test]
    fn test_fingerprints_append_major_version() {
        let info = OsInfo {
            family: "redhat".into(),
            os_type: "centos".into(),
            version: "7".into(),
        };
        assert_eq!(info.family_fingerprint(), "redhat7");
        assert_eq!(info.type_fingerprint(), "centos7");
    }

    #[test]
    fn test_jdbc_options_need_both_halves() {
        let mut options = SetupOptions {
            jdbc_driver: Some("/tmp/postgresql.jar".into()),
            ..SetupOptions::default()
        };
        assert!(!options.jdbc_options_present());
        options.jdbc_db = Some("postgres".into());
        assert!(options.jdbc_options_present());
    }

    #[test]
    fn test_selected_database_follows_menu_order() {
        let options = SetupOptions {
            database_index: Some(2),
            ..SetupOptions::default()
        };
        assert_eq!(options.selected_database(), Some(DatabaseKind::Mysql));
        let out_of_range = SetupOptions {
            database_index: Some(42),
            ..SetupOptions::default()
        };
        assert_eq!(out_of_range.selected_database(), None);
    }

    #[test]
    fn test_release_serializes_with_field_names() {
        let release = RuntimeRelease::new(
            "jdk1.8",
            "Oracle JDK 1.8",
            "https://example.com/jdk.tar.gz",
            "jdk.tar.gz",
            "https://example.com/jce.zip",
            "jce.zip",
            "/usr/jdk64",
            "(jdk.*)/jre",
        );
        let json = serde_json::to_value(&release).unwrap();
        assert_eq!(json["archive_file"], "jdk.tar.gz");
        assert_eq!(release.to_string(), "Oracle JDK 1.8 (jdk1.8)");
    }
}
