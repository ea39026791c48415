//! Fixed locations and property keys
//!
//! Paths here are defaults only; every one of them can be overridden in
//! `config.toml`. Property keys are the contract with the server that reads
//! the same properties file.

pub const DEFAULT_CONFIG_FILE: &str = "/etc/hostsetup/config.toml";

pub const CONF_DIR: &str = "/etc/hostsetup/conf";
pub const PROPERTIES_FILE: &str = "/etc/hostsetup/conf/server.properties";
pub const LIB_DIR: &str = "/usr/lib/hostsetup/lib";
pub const LOGS_DIR: &str = "/var/log/hostsetup";
pub const PID_FILE: &str = "/var/run/hostsetup/server.pid";
pub const KEYS_DIR: &str = "/var/lib/hostsetup/keys";
pub const RESOURCES_DIR: &str = "/var/lib/hostsetup/resources";
pub const VIEWS_DIR: &str = "/var/lib/hostsetup/resources/views";

/// Property keys read and written by the setup steps
pub mod keys {
    pub const RESOURCES_DIR: &str = "resources.dir";
    pub const VIEWS_DIR: &str = "views.dir";

    pub const JDK_RELEASES: &str = "jdk.releases";
    pub const JAVA_HOME: &str = "java.home";
    pub const JDK_NAME: &str = "jdk.name";
    pub const JCE_NAME: &str = "jce.name";

    pub const OS_FAMILY: &str = "server.os_family";
    pub const OS_TYPE: &str = "server.os_type";

    pub const SERVER_USER: &str = "ambari-server.user";

    pub const PASSWORD_ENCRYPTION_ENABLED: &str = "security.passwords.encryption.enabled";
    pub const MASTER_KEY_LOCATION: &str = "security.master.key.location";

    pub const PERSISTENCE_TYPE: &str = "server.persistence.type";
    pub const JDBC_DATABASE: &str = "server.jdbc.database";
    pub const JDBC_DATABASE_NAME: &str = "server.jdbc.database_name";
    pub const JDBC_SCHEMA: &str = "server.jdbc.schema";
    pub const JDBC_HOSTNAME: &str = "server.jdbc.hostname";
    pub const JDBC_PORT: &str = "server.jdbc.port";
    pub const JDBC_URL: &str = "server.jdbc.url";
    pub const JDBC_RCA_URL: &str = "server.jdbc.rca.url";
    pub const JDBC_DRIVER: &str = "server.jdbc.driver";
    pub const JDBC_RCA_DRIVER: &str = "server.jdbc.rca.driver";
    pub const JDBC_USER_NAME: &str = "server.jdbc.user.name";
    pub const JDBC_USER_PASSWD: &str = "server.jdbc.user.passwd";
    pub const JDBC_RCA_USER_NAME: &str = "server.jdbc.rca.user.name";
    pub const JDBC_RCA_USER_PASSWD: &str = "server.jdbc.rca.user.passwd";

    /// Sub-key suffixes of a catalogue entry, as in `<id>.url`
    pub mod release {
        pub const DESCRIPTION: &str = "desc";
        pub const URL: &str = "url";
        pub const ARCHIVE_FILE: &str = "dest-file";
        pub const POLICY_URL: &str = "jcpol-url";
        pub const POLICY_FILE: &str = "jcpol-file";
        pub const INSTALL_DIR: &str = "home";
        pub const VERSION_PATTERN: &str = "re";
    }
}
