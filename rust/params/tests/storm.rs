use ambari_service_params::{
    services::storm::{Daemon, DaemonCommands, StormSettings},
    ConfigDocument, EnvironmentFacts, Error, Service,
};
use rstest::rstest;

fn load(fixture: &str) -> ConfigDocument {
    let raw = match fixture {
        "default" => include_str!("resources/storm_default.json"),
        "secured" => include_str!("resources/storm_secured.json"),
        "nimbus_versioned" => include_str!("resources/storm_nimbus_versioned.json"),
        other => panic!("no storm fixture {other}"),
    };
    serde_json::from_str(raw).unwrap()
}

fn commands(fixture: &str, daemon: Daemon) -> DaemonCommands {
    let document = load(fixture);
    let facts = EnvironmentFacts::from_document(&document).unwrap();
    let settings = StormSettings::from_document(&document, &facts).unwrap();
    DaemonCommands::for_daemon(daemon, &settings)
}

#[rstest]
#[case("default")]
#[case("secured")]
fn supervisor_start_and_stop(#[case] fixture: &str) {
    let supervisor = commands(fixture, Daemon::Supervisor);
    let running = "ls /var/run/storm/supervisor.pid >/dev/null 2>&1 && ps -p `cat /var/run/storm/supervisor.pid` >/dev/null 2>&1";

    assert_eq!("storm", supervisor.user);
    assert_eq!("/usr/bin", supervisor.path);
    assert_eq!("/var/run/storm/supervisor.pid", supervisor.pid_file);
    assert_eq!(
        "env JAVA_HOME=/usr/jdk64/jdk1.7.0_45 PATH=$PATH:/usr/jdk64/jdk1.7.0_45/bin storm supervisor > /var/log/storm/supervisor.out 2>&1",
        supervisor.start.command
    );
    assert_eq!(running, supervisor.start.not_if);
    assert_eq!(
        "/usr/jdk64/jdk1.7.0_45/bin/jps -l  | grep storm.daemon.supervisor$ && /usr/jdk64/jdk1.7.0_45/bin/jps -l  | grep storm.daemon.supervisor$ | awk {'print $1'} > /var/run/storm/supervisor.pid",
        supervisor.capture_pid.command
    );
    assert_eq!(6, supervisor.capture_pid.tries);
    assert_eq!(10, supervisor.capture_pid.try_sleep_seconds);

    assert_eq!("sudo kill `cat /var/run/storm/supervisor.pid`", supervisor.stop.command);
    assert_eq!(format!("! ({running})"), supervisor.stop.not_if);
    assert!(!supervisor.stop.ignore_failures);
    assert_eq!(
        "sudo kill -9 `cat /var/run/storm/supervisor.pid`",
        supervisor.force_stop.command
    );
    assert_eq!(
        format!("sleep 2; ! ({running}) || sleep 20; ! ({running})"),
        supervisor.force_stop.not_if
    );
    assert!(supervisor.force_stop.ignore_failures);
}

#[test]
fn logviewer_start_and_stop() {
    let logviewer = commands("default", Daemon::Logviewer);
    assert_eq!("/usr/bin", logviewer.path);
    assert_eq!("storm", logviewer.user);
    let running = "ls /var/run/storm/logviewer.pid >/dev/null 2>&1 && ps -p `cat /var/run/storm/logviewer.pid` >/dev/null 2>&1";

    assert_eq!(
        "env JAVA_HOME=/usr/jdk64/jdk1.7.0_45 PATH=$PATH:/usr/jdk64/jdk1.7.0_45/bin storm logviewer > /var/log/storm/logviewer.out 2>&1",
        logviewer.start.command
    );
    assert_eq!(running, logviewer.start.not_if);
    assert_eq!(
        "/usr/jdk64/jdk1.7.0_45/bin/jps -l  | grep storm.daemon.logviewer$ && /usr/jdk64/jdk1.7.0_45/bin/jps -l  | grep storm.daemon.logviewer$ | awk {'print $1'} > /var/run/storm/logviewer.pid",
        logviewer.capture_pid.command
    );
    assert_eq!(12, logviewer.capture_pid.tries);
    assert_eq!("sudo kill `cat /var/run/storm/logviewer.pid`", logviewer.stop.command);
    assert_eq!(
        "sudo kill -9 `cat /var/run/storm/logviewer.pid`",
        logviewer.force_stop.command
    );
}

#[test]
fn legacy_stack_runs_from_usr_bin() {
    let params = Service::Storm.resolve(&load("default"), &facts("default")).unwrap();

    assert_eq!(Some("/usr/bin"), params.get_str("storm_bin_dir"));
    assert_eq!(Some("/usr/lib/storm"), params.get_str("storm_component_home"));
    assert_eq!(Some("2.1.0.0"), params.get_str("hdp_stack_version"));
    assert_eq!(Some(false), params.get_bool("security_enabled"));
    assert!(params.is_absent("storm_keytab"));
    assert_eq!(Some(12), params.get_int("logviewer_pid_capture_tries"));
    assert_eq!(
        commands("default", Daemon::Supervisor).start.command,
        params.get_str("supervisor_start_command").unwrap()
    );
}

#[test]
fn pre_rolling_restart_selects_target_version() {
    let params = Service::Storm.resolve(&load("default"), &facts("default")).unwrap();

    assert_eq!(
        Some("hdp-select set storm-supervisor 2.2.1.0-2067"),
        params.get_str("stack_select_command")
    );
}

#[test]
fn secured_supervisor_reads_kerberos_identity() {
    let params = Service::Storm.resolve(&load("secured"), &facts("secured")).unwrap();

    assert_eq!(Some("/usr/bin"), params.get_str("storm_bin_dir"));
    assert_eq!(Some(true), params.get_bool("security_enabled"));
    assert_eq!(
        Some("/etc/security/keytabs/storm.service.keytab"),
        params.get_str("storm_keytab")
    );
    assert_eq!(Some("storm@EXAMPLE.COM"), params.get_str("storm_principal_name"));
    assert!(params.is_absent("stack_select_command"));
}

#[test]
fn versioned_nimbus_runs_from_component_tree() {
    let fixture = "nimbus_versioned";
    let params = Service::Storm.resolve(&load(fixture), &facts(fixture)).unwrap();

    assert_eq!(
        Some("/usr/hdp/current/storm-nimbus/bin"),
        params.get_str("storm_bin_dir")
    );
    assert_eq!(
        Some("/usr/hdp/current/storm-nimbus"),
        params.get_str("storm_component_home")
    );
    assert_eq!(
        Some("/var/run/storm/nimbus.pid"),
        params.get_str("nimbus_pid_file")
    );
    assert_eq!(
        "/usr/hdp/current/storm-nimbus/bin",
        commands(fixture, Daemon::Nimbus).path
    );
}

fn facts(fixture: &str) -> EnvironmentFacts {
    EnvironmentFacts::from_document(&load(fixture)).unwrap()
}

#[test]
fn stack_version_is_required() {
    let mut root = load("default").as_value().clone();
    root["hostLevelParams"]
        .as_object_mut()
        .unwrap()
        .remove("stack_version");
    let document = ConfigDocument::new(root);
    let err = Service::Storm
        .resolve(&document, &EnvironmentFacts::from_document(&document).unwrap())
        .unwrap_err();

    let expected = "/hostLevelParams/stack_version";
    assert!(matches!(err, Error::MissingKey { ref path } if path == expected));
}
