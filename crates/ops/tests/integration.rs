//! Integration tests for ops crate

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use hostsetup_config::{keys, Config, Properties};
    use hostsetup_errors::{ConfigError, DatabaseError, Error, NetworkError, SetupError};
    use hostsetup_events::{channel, AppEvent, EventReceiver, GeneralEvent, SetupEvent};
    use hostsetup_net::Downloader;
    use hostsetup_ops::*;
    use hostsetup_platform::testing::MockProcessOperations;
    use hostsetup_platform::{CommandOutput, PlatformPolicy, UserResolution};
    use hostsetup_prompt::{Answer, Prompter, ScriptedPrompter, UnattendedPrompter};
    use hostsetup_runtime::RuntimeInstaller;
    use hostsetup_types::{OsFamily, OsInfo, RuntimeRelease, SetupOptions};
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    const UNSET_VAR: &str = "HOSTSETUP_TEST_OPS_JDK_HOME_NEVER_SET";
    const POLICY_URL: &str = "http://example.test/jce_policy-8.zip";

    #[derive(Default)]
    struct FakeDownloader {
        failing: Vec<String>,
        fetched: Mutex<Vec<String>>,
    }

    impl FakeDownloader {
        fn without_policy() -> Self {
            Self {
                failing: vec![POLICY_URL.to_string()],
                fetched: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Downloader for FakeDownloader {
        async fn download(&self, url: &str, dest: &Path) -> Result<u64, Error> {
            self.fetched.lock().unwrap().push(url.to_string());
            if self.failing.iter().any(|u| u == url) {
                return Err(NetworkError::HttpError {
                    url: url.to_string(),
                    status: 404,
                }
                .into());
            }
            tokio::fs::write(dest, b"archive").await.unwrap();
            Ok(7)
        }
    }

    /// Lays out a JDK with a java binary and a security directory
    struct FakeInstaller;

    #[async_trait]
    impl RuntimeInstaller for FakeInstaller {
        async fn install(&self, _archive: &Path, release: &RuntimeRelease) -> Result<PathBuf, Error> {
            let home = release.install_dir.join("jdk1.8.0_112");
            std::fs::create_dir_all(home.join("bin")).unwrap();
            std::fs::create_dir_all(home.join("jre/lib/security")).unwrap();
            std::fs::write(home.join("bin/java"), b"#!/bin/sh\n").unwrap();
            Ok(home)
        }
    }

    /// Resolves to a fixed account and leaves the environment alone
    struct StaticPolicy {
        user: &'static str,
    }

    #[async_trait]
    impl PlatformPolicy for StaticPolicy {
        fn family(&self) -> OsFamily {
            OsFamily::Posix
        }

        fn default_user(&self) -> &'static str {
            "root"
        }

        async fn create_privileged_user(
            &self,
            _existing: Option<&str>,
            _prompter: &dyn Prompter,
        ) -> Result<UserResolution, Error> {
            Ok(UserResolution {
                user: self.user.to_string(),
                created: false,
            })
        }

        async fn ensure_runtime_env_var(&self, _var: &str, _path: &Path) -> Result<(), Error> {
            Ok(())
        }
    }

    struct Fixture {
        temp: TempDir,
        config: Config,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = tempfile::tempdir().unwrap();
            let root = temp.path();
            for dir in ["conf", "keys", "log", "run", "lib", "resources", "views"] {
                std::fs::create_dir_all(root.join(dir)).unwrap();
            }

            let mut config = Config::default();
            config.paths.properties_file = Some(root.join("conf/server.properties"));
            config.paths.conf_dir = Some(root.join("conf"));
            config.paths.keys_dir = Some(root.join("keys"));
            config.paths.log_dir = Some(root.join("log"));
            config.paths.lib_dir = Some(root.join("lib"));
            config.paths.pid_file = Some(root.join("run/server.pid"));
            config.runtime.home_var = UNSET_VAR.to_string();

            let fx = Self { temp, config };
            let mut props = Properties::new(fx.properties_file());
            props.set(keys::RESOURCES_DIR, fx.resources().display().to_string());
            props.set(keys::VIEWS_DIR, fx.path("views").display().to_string());
            props.set(keys::JDK_RELEASES, "jdk1.8");
            props.set("jdk1.8.desc", "Oracle JDK 1.8");
            props.set("jdk1.8.url", "http://example.test/jdk-8u112-linux-x64.tar.gz");
            props.set("jdk1.8.dest-file", "jdk-8u112-linux-x64.tar.gz");
            props.set("jdk1.8.jcpol-url", POLICY_URL);
            props.set("jdk1.8.jcpol-file", "jce_policy-8.zip");
            props.set("jdk1.8.home", fx.path("jdk64").display().to_string());
            props.set("jdk1.8.re", "(jdk.*)/jre");
            fx.write(&props);
            fx
        }

        fn path(&self, rel: &str) -> PathBuf {
            self.temp.path().join(rel)
        }

        fn resources(&self) -> PathBuf {
            self.path("resources")
        }

        fn properties_file(&self) -> PathBuf {
            self.path("conf/server.properties")
        }

        fn java(&self) -> String {
            self.path("jdk64/jdk1.8.0_112/bin/java")
                .display()
                .to_string()
        }

        fn write(&self, props: &Properties) {
            std::fs::write(self.properties_file(), props.render()).unwrap();
        }

        fn props(&self) -> Properties {
            let contents = std::fs::read_to_string(self.properties_file()).unwrap();
            Properties::parse(self.properties_file(), &contents).unwrap()
        }

        fn ctx(
            &self,
            ops: Arc<MockProcessOperations>,
            prompter: Box<dyn Prompter>,
            downloader: FakeDownloader,
        ) -> (OpsCtx, EventReceiver) {
            let (tx, rx) = channel();
            let ctx = OpsContextBuilder::new()
                .with_config(self.config.clone())
                .with_family(OsFamily::Posix)
                .with_process_ops(ops)
                .with_policy(Box::new(StaticPolicy { user: "svc" }))
                .with_downloader(Box::new(downloader))
                .with_installer(Box::new(FakeInstaller))
                .with_prompter(prompter)
                .with_event_sender(tx)
                .with_os_info(OsInfo {
                    family: "redhat".to_string(),
                    os_type: "centos".to_string(),
                    version: "7".to_string(),
                })
                .build()
                .unwrap();
            (ctx, rx)
        }
    }

    fn root_host() -> MockProcessOperations {
        MockProcessOperations::new()
            .always("id", CommandOutput::ok("0\n"))
            .always("chown", CommandOutput::ok(""))
            .always("chmod", CommandOutput::ok(""))
    }

    /// Host for a full setup: the embedded database already exists and the
    /// two view archives extract with and without error.
    fn full_host(fx: &Fixture) -> MockProcessOperations {
        root_host()
            .always("su", CommandOutput::ok("1\n"))
            .on(&fx.java(), CommandOutput::ok(""))
            .on(&fx.java(), CommandOutput::failed(2, "bad archive"))
    }

    fn add_views(fx: &Fixture) {
        std::fs::write(fx.path("views/a-view.jar"), b"a").unwrap();
        std::fs::write(fx.path("views/b-view.jar"), b"b").unwrap();
    }

    fn setup_events(rx: &mut EventReceiver) -> Vec<SetupEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let AppEvent::Setup(e) = event {
                events.push(e);
            }
        }
        events
    }

    fn warnings(rx: &mut EventReceiver) -> Vec<String> {
        let mut messages = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let AppEvent::General(GeneralEvent::Warning { message, .. }) = event {
                messages.push(message);
            }
        }
        messages
    }

    async fn run_silent_setup(fx: &Fixture) -> SetupReport {
        let mock = Arc::new(full_host(fx));
        let (ctx, _rx) = fx.ctx(
            mock,
            Box::new(UnattendedPrompter),
            FakeDownloader::without_policy(),
        );
        setup(&ctx, SetupOptions::default()).await.unwrap()
    }

    #[tokio::test]
    async fn test_builder_requires_process_ops() {
        let (tx, _rx) = channel();
        let result = OpsContextBuilder::new()
            .with_prompter(Box::new(UnattendedPrompter))
            .with_downloader(Box::new(FakeDownloader::default()))
            .with_event_sender(tx)
            .build();
        assert!(matches!(
            result.err(),
            Some(Error::Setup(SetupError::MissingComponent { component })) if component == "process_ops"
        ));
    }

    #[tokio::test]
    async fn test_non_root_setup_exits_with_four() {
        let fx = Fixture::new();
        let mock = Arc::new(MockProcessOperations::new().always("id", CommandOutput::ok("1000\n")));
        let (ctx, _rx) = fx.ctx(
            mock.clone(),
            Box::new(UnattendedPrompter),
            FakeDownloader::default(),
        );

        let err = setup(&ctx, SetupOptions::default()).await.unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert!(matches!(
            err.root(),
            Error::Setup(SetupError::NotPrivileged { command }) if command == "setup"
        ));
        assert_eq!(mock.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_silent_setup_needs_persisted_master_key() {
        let fx = Fixture::new();
        let mut props = fx.props();
        props.set(keys::PASSWORD_ENCRYPTION_ENABLED, "true");
        fx.write(&props);

        let (ctx, _rx) = fx.ctx(
            Arc::new(root_host()),
            Box::new(UnattendedPrompter),
            FakeDownloader::default(),
        );
        let err = setup(&ctx, SetupOptions::default()).await.unwrap_err();
        assert!(matches!(
            err.root(),
            Error::Setup(SetupError::SilentSetupNotAllowed)
        ));

        // A persisted key lets the same run past the check
        std::fs::write(fx.path("keys/master"), b"key").unwrap();
        let props = fx.props();
        let (ctx, _rx) = fx.ctx(
            Arc::new(full_host(&fx)),
            Box::new(UnattendedPrompter),
            FakeDownloader::without_policy(),
        );
        verify_setup_allowed(&ctx, &props).unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_jdbc_only_setup_registers_driver_and_stops() {
        let fx = Fixture::new();
        let driver = fx.path("mysql-connector-java.jar");
        std::fs::write(&driver, b"jar").unwrap();
        let mock = Arc::new(root_host());
        let (ctx, _rx) = fx.ctx(
            mock.clone(),
            Box::new(UnattendedPrompter),
            FakeDownloader::default(),
        );

        let options = SetupOptions {
            jdbc_driver: Some(driver),
            jdbc_db: Some("mysql".to_string()),
            ..SetupOptions::default()
        };
        let report = setup(&ctx, options).await.unwrap();

        assert!(report.driver_only);
        let symlink = fx.resources().join("mysql-jdbc-driver.jar");
        assert_eq!(report.jdbc_driver, Some(symlink.clone()));
        assert!(std::fs::symlink_metadata(&symlink).unwrap().file_type().is_symlink());
        assert!(report.java_home.is_none());
        assert!(!fx.props().contains_key(keys::JAVA_HOME));
        assert_eq!(fx.props().get(keys::SERVER_USER), Some("svc"));
    }

    #[tokio::test]
    async fn test_silent_setup_records_everything() {
        let fx = Fixture::new();
        add_views(&fx);
        let mock = Arc::new(full_host(&fx));
        let (ctx, mut rx) = fx.ctx(
            mock.clone(),
            Box::new(UnattendedPrompter),
            FakeDownloader::without_policy(),
        );

        let report = setup(&ctx, SetupOptions::default()).await.unwrap();

        let java_home = fx.path("jdk64/jdk1.8.0_112");
        assert_eq!(report.java_home, Some(java_home.clone()));
        assert!(!report.custom_runtime);
        assert_eq!(report.server_user.as_deref(), Some("svc"));
        assert_eq!(report.os_type.as_deref(), Some("centos7"));
        assert_eq!(report.database.as_deref(), Some("PostgreSQL / Embedded"));
        assert_eq!(report.views.len(), 2);
        assert!(!report.views[0].failed());
        assert!(report.views[1].failed());

        let props = fx.props();
        assert_eq!(props.get_path(keys::JAVA_HOME), Some(java_home));
        assert_eq!(props.get(keys::OS_FAMILY), Some("redhat7"));
        assert_eq!(props.get(keys::OS_TYPE), Some("centos7"));
        assert_eq!(props.get(keys::SERVER_USER), Some("svc"));
        assert!(props
            .get(keys::JDBC_URL)
            .is_some_and(|url| url.starts_with("jdbc:postgresql://")));
        assert!(!props.contains_key(keys::JCE_NAME));

        let extracts = mock.calls_to(&fx.java());
        assert_eq!(extracts.len(), 2);
        assert!(extracts[0].contains("ViewRegistry extract"));
        assert!(extracts[0].ends_with("a-view.jar"));
        assert!(!mock.calls_to("chown").is_empty());

        let events = setup_events(&mut rx);
        assert!(events.iter().any(|e| matches!(
            e,
            SetupEvent::StepSkipped { step, .. } if step == "Installing JCE policy"
        )));
        assert!(events
            .iter()
            .all(|e| !matches!(e, SetupEvent::StepFailed { .. })));
    }

    #[tokio::test]
    async fn test_blank_os_type_is_detected_again() {
        let fx = Fixture::new();
        let mut props = fx.props();
        props.set(keys::OS_TYPE, "");
        fx.write(&props);

        let report = run_silent_setup(&fx).await;

        assert_eq!(report.os_type.as_deref(), Some("centos7"));
        let props = fx.props();
        assert_eq!(props.get(keys::OS_TYPE), Some("centos7"));
        assert_eq!(props.get(keys::OS_FAMILY), Some("redhat7"));
    }

    #[tokio::test]
    async fn test_missing_properties_fail_their_own_step() {
        let fx = Fixture::new();
        std::fs::remove_file(fx.properties_file()).unwrap();

        let (ctx, mut rx) = fx.ctx(
            Arc::new(root_host()),
            Box::new(UnattendedPrompter),
            FakeDownloader::default(),
        );
        let err = setup(&ctx, SetupOptions::default()).await.unwrap_err();
        assert!(matches!(
            &err,
            Error::Step { step, .. } if step == "Reading server properties"
        ));
        assert!(matches!(
            err.root(),
            Error::Config(ConfigError::LoadFailed { .. })
        ));
        assert!(setup_events(&mut rx).iter().any(|e| matches!(
            e,
            SetupEvent::StepFailed { step, .. } if step == "Reading server properties"
        )));

        let (ctx, _rx) = fx.ctx(
            Arc::new(root_host()),
            Box::new(UnattendedPrompter),
            FakeDownloader::default(),
        );
        let err = reset(&ctx).await.unwrap_err();
        assert!(matches!(
            &err,
            Error::Step { step, .. } if step == "Reading server properties"
        ));
    }

    #[tokio::test]
    async fn test_second_silent_setup_converges() {
        let fx = Fixture::new();
        add_views(&fx);
        run_silent_setup(&fx).await;
        let first = std::fs::read_to_string(fx.properties_file()).unwrap();

        let mock = Arc::new(full_host(&fx));
        let downloader = FakeDownloader::without_policy();
        let (ctx, _rx) = fx.ctx(mock, Box::new(UnattendedPrompter), downloader);
        let report = setup(&ctx, SetupOptions::default()).await.unwrap();

        // The recorded JDK came without a policy bundle, so it is kept as is
        assert!(report.custom_runtime);
        assert_eq!(std::fs::read_to_string(fx.properties_file()).unwrap(), first);
    }

    #[tokio::test]
    async fn test_enforcing_selinux_is_relaxed() {
        let fx = Fixture::new();
        let driver = fx.path("ojdbc.jar");
        std::fs::write(&driver, b"jar").unwrap();
        let mock = Arc::new(
            root_host()
                .on(
                    "sestatus",
                    CommandOutput::ok("SELinux status: enabled\nCurrent mode: enforcing\n"),
                )
                .on("setenforce", CommandOutput::ok("")),
        );
        let prompter = Arc::new(ScriptedPrompter::new([Answer::Yes]));
        let (ctx, _rx) = fx.ctx(
            mock.clone(),
            Box::new(SharedPrompter(prompter.clone())),
            FakeDownloader::default(),
        );

        let options = SetupOptions {
            jdbc_driver: Some(driver),
            jdbc_db: Some("oracle".to_string()),
            ..SetupOptions::default()
        };
        setup(&ctx, options).await.unwrap();

        assert_eq!(mock.calls_to("setenforce"), vec!["setenforce 0".to_string()]);
        assert_eq!(prompter.asked(), vec!["OK to continue".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_setenforce_only_warns() {
        let fx = Fixture::new();
        let driver = fx.path("ojdbc.jar");
        std::fs::write(&driver, b"jar").unwrap();
        let mock = Arc::new(root_host().on(
            "sestatus",
            CommandOutput::ok("SELinux status: enabled\nCurrent mode: enforcing\n"),
        ));
        let (ctx, mut rx) = fx.ctx(
            mock.clone(),
            Box::new(ScriptedPrompter::new([Answer::Yes])),
            FakeDownloader::default(),
        );

        let options = SetupOptions {
            jdbc_driver: Some(driver),
            jdbc_db: Some("oracle".to_string()),
            ..SetupOptions::default()
        };
        setup(&ctx, options).await.unwrap();

        assert_eq!(mock.calls_to("setenforce"), vec!["setenforce 0".to_string()]);
        assert!(warnings(&mut rx)
            .iter()
            .any(|w| w == "Could not run setenforce: OK"));
    }

    #[tokio::test]
    async fn test_unknown_selinux_mode_is_fatal() {
        let fx = Fixture::new();
        let mock = Arc::new(root_host().on("sestatus", CommandOutput::ok("SELinux status: enabled\n")));
        let (ctx, mut rx) = fx.ctx(mock, Box::new(UnattendedPrompter), FakeDownloader::default());

        let err = setup(&ctx, SetupOptions::default()).await.unwrap_err();
        assert!(matches!(
            &err,
            Error::Step { step, .. } if step == "Relaxing security enhancements"
        ));
        assert!(matches!(
            err.root(),
            Error::Setup(SetupError::SecurityEnhancement { .. })
        ));
        assert!(setup_events(&mut rx).iter().any(|e| matches!(
            e,
            SetupEvent::StepFailed { step, .. } if step == "Relaxing security enhancements"
        )));
    }

    #[tokio::test]
    async fn test_declined_firewall_warning_cancels() {
        let fx = Fixture::new();
        let mock = Arc::new(root_host().always("systemctl", CommandOutput::ok("active\n")));
        let (ctx, _rx) = fx.ctx(
            mock,
            Box::new(ScriptedPrompter::new([Answer::No])),
            FakeDownloader::default(),
        );

        let err = setup(&ctx, SetupOptions::default()).await.unwrap_err();
        assert!(matches!(
            &err,
            Error::Step { step, .. } if step == "Checking firewall"
        ));
        assert!(matches!(err.root(), Error::Setup(SetupError::Cancelled { .. })));
    }

    #[tokio::test]
    async fn test_reset_refused_while_server_runs() {
        let fx = Fixture::new();
        std::fs::write(fx.path("run/server.pid"), "4242\n").unwrap();
        let mock = Arc::new(root_host().always("kill", CommandOutput::ok("")));
        let (ctx, _rx) = fx.ctx(
            mock.clone(),
            Box::new(UnattendedPrompter),
            FakeDownloader::default(),
        );

        let err = reset(&ctx).await.unwrap_err();
        assert!(matches!(
            err.root(),
            Error::Setup(SetupError::ServerRunning { pid: 4242, .. })
        ));
        assert_eq!(mock.calls_to("kill"), vec!["kill -0 4242".to_string()]);
    }

    #[tokio::test]
    async fn test_reset_without_database_configuration() {
        let fx = Fixture::new();
        let (ctx, _rx) = fx.ctx(
            Arc::new(root_host()),
            Box::new(UnattendedPrompter),
            FakeDownloader::default(),
        );

        let err = reset(&ctx).await.unwrap_err();
        assert!(matches!(
            err.root(),
            Error::Database(DatabaseError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn test_silent_reset_runs_drop_then_create() {
        let fx = Fixture::new();
        run_silent_setup(&fx).await;
        let create = fx.resources().join("Ambari-DDL-Postgres-EMBEDDED-CREATE.sql");
        let drop = fx.resources().join("Ambari-DDL-Postgres-EMBEDDED-DROP.sql");
        std::fs::write(&create, "CREATE;").unwrap();
        std::fs::write(&drop, "DROP;").unwrap();

        let mock = Arc::new(root_host().always("su", CommandOutput::ok("")));
        let (ctx, _rx) = fx.ctx(
            mock.clone(),
            Box::new(UnattendedPrompter),
            FakeDownloader::default(),
        );

        let label = reset(&ctx).await.unwrap();
        assert_eq!(label, "PostgreSQL / Embedded");
        let scripts = mock.calls_to("su");
        assert_eq!(scripts.len(), 2);
        assert!(scripts[0].contains(&drop.display().to_string()));
        assert!(scripts[1].contains(&create.display().to_string()));
    }

    #[tokio::test]
    async fn test_interactive_reset_defaults_to_no() {
        let fx = Fixture::new();
        run_silent_setup(&fx).await;
        let mock = Arc::new(root_host().always("su", CommandOutput::ok("")));
        let (ctx, _rx) = fx.ctx(
            mock.clone(),
            Box::new(ScriptedPrompter::new([Answer::Default])),
            FakeDownloader::default(),
        );

        let err = reset(&ctx).await.unwrap_err();
        assert!(matches!(err.root(), Error::Setup(SetupError::Cancelled { .. })));
        assert!(mock.calls_to("su").is_empty());
    }

    fn write_bundle(path: &Path) {
        let file = std::fs::File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        zip.add_directory("UnlimitedJCEPolicyJDK8/", options).unwrap();
        zip.start_file("UnlimitedJCEPolicyJDK8/local_policy.jar", options)
            .unwrap();
        zip.write_all(b"local").unwrap();
        zip.finish().unwrap();
    }

    #[tokio::test]
    async fn test_setup_policy_copies_and_unpacks_bundle() {
        let fx = Fixture::new();
        let java_home = fx.path("jdk64/jdk1.8.0_112");
        std::fs::create_dir_all(java_home.join("jre/lib/security")).unwrap();
        let mut props = fx.props();
        props.set(keys::JAVA_HOME, java_home.display().to_string());
        fx.write(&props);

        let bundle = fx.path("jce_policy-8.zip");
        write_bundle(&bundle);
        let (ctx, _rx) = fx.ctx(
            Arc::new(root_host()),
            Box::new(UnattendedPrompter),
            FakeDownloader::default(),
        );

        let security = setup_policy(&ctx, &bundle).await.unwrap();
        assert_eq!(security, java_home.join("jre/lib/security"));
        assert!(fx.resources().join("jce_policy-8.zip").is_file());
        assert_eq!(
            std::fs::read(security.join("local_policy.jar")).unwrap(),
            b"local"
        );
        assert_eq!(fx.props().get(keys::JCE_NAME), Some("jce_policy-8.zip"));
    }

    #[tokio::test]
    async fn test_setup_policy_rejects_missing_bundle() {
        let fx = Fixture::new();
        let (ctx, _rx) = fx.ctx(
            Arc::new(root_host()),
            Box::new(UnattendedPrompter),
            FakeDownloader::default(),
        );

        let err = setup_policy(&ctx, &fx.path("absent.zip")).await.unwrap_err();
        assert!(matches!(err, Error::Runtime(_)));
        assert!(!fx.props().contains_key(keys::JCE_NAME));
    }

    /// Lets a test keep a handle on the prompter it hands to the context
    struct SharedPrompter(Arc<ScriptedPrompter>);

    #[async_trait]
    impl Prompter for SharedPrompter {
        async fn confirm(&self, question: &str, default: bool) -> Result<bool, Error> {
            self.0.confirm(question, default).await
        }

        async fn ask(
            &self,
            question: &str,
            default: &str,
            validation: Option<&hostsetup_prompt::Validation>,
        ) -> Result<String, Error> {
            self.0.ask(question, default, validation).await
        }

        async fn password(&self, question: &str, default: &str) -> Result<String, Error> {
            self.0.password(question, default).await
        }
    }
}
