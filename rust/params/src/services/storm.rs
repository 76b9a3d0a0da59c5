use serde::Serialize;
use snafu::OptionExt;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::{
    constants::*,
    document::ConfigDocument,
    error::{Result, UnknownDaemonSnafu},
    facts::EnvironmentFacts,
    layout::{select_path_set, stack_select_command, RoleDirectories},
    params::ResolvedParams,
    services::{Service, ServiceParams},
};

pub struct StormParams;

pub fn role_directories() -> RoleDirectories {
    RoleDirectories::new(
        [
            ("NIMBUS", "storm-nimbus"),
            ("SUPERVISOR", "storm-supervisor"),
            ("STORM_UI_SERVER", "storm-client"),
            ("DRPC_SERVER", "storm-client"),
            (STORM_SERVICE_CHECK_ROLE, "storm-client"),
        ],
        STORM_SERVICE_CHECK_ROLE,
    )
}

#[derive(Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, Hash, PartialEq, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Daemon {
    Nimbus,
    Supervisor,
    Logviewer,
    Ui,
    Drpc,
}

impl Daemon {
    /// Main class as listed by `jps -l`.
    pub fn main_class(&self) -> &'static str {
        match self {
            Daemon::Nimbus => "storm.daemon.nimbus",
            Daemon::Supervisor => "storm.daemon.supervisor",
            Daemon::Logviewer => "storm.daemon.logviewer",
            Daemon::Ui => "backtype.storm.ui.core",
            Daemon::Drpc => "storm.daemon.drpc",
        }
    }

    /// The logviewer comes up noticeably slower than the other daemons.
    pub fn pid_capture_tries(&self) -> u32 {
        match self {
            Daemon::Logviewer => STORM_LOGVIEWER_PID_CAPTURE_TRIES,
            _ => STORM_DEFAULT_PID_CAPTURE_TRIES,
        }
    }
}

/// The subset of Storm parameters the daemon commands are built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StormSettings {
    pub storm_user: String,
    pub java64_home: String,
    pub log_dir: String,
    pub pid_dir: String,
    pub storm_bin_dir: String,
}

impl StormSettings {
    pub fn from_document(document: &ConfigDocument, facts: &EnvironmentFacts) -> Result<Self> {
        let layout = select_path_set(
            facts.stack_version.as_ref(),
            &facts.command_role,
            &role_directories(),
        );
        Ok(StormSettings {
            storm_user: document.required_str(&format!("{STORM_ENV}/storm_user"))?,
            java64_home: document.required_str(JAVA_HOME_PATH)?,
            log_dir: document.required_str(&format!("{STORM_ENV}/storm_log_dir"))?,
            pid_dir: document.required_str(&format!("{STORM_ENV}/storm_pid_dir"))?,
            storm_bin_dir: layout.path_or("bin", STORM_LEGACY_BIN_DIR),
        })
    }
}

/// A command that is skipped when its `not_if` check succeeds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GuardedCommand {
    pub command: String,
    pub not_if: String,
    pub ignore_failures: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PidCapture {
    pub command: String,
    pub tries: u32,
    pub try_sleep_seconds: u32,
}

/// Start and stop command lines for one Storm daemon.
///
/// Start and pid capture run as `user` with `path` on the search path; the kills run
/// through sudo. After a stop the caller deletes `pid_file`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DaemonCommands {
    pub daemon: Daemon,
    pub user: String,
    pub path: String,
    pub pid_file: String,
    pub process_running: String,
    pub start: GuardedCommand,
    pub capture_pid: PidCapture,
    pub stop: GuardedCommand,
    pub force_stop: GuardedCommand,
}

impl DaemonCommands {
    pub fn for_daemon(daemon: Daemon, settings: &StormSettings) -> Self {
        let StormSettings {
            storm_user,
            java64_home,
            log_dir,
            pid_dir,
            storm_bin_dir,
        } = settings;
        let pid_file = format!("{pid_dir}/{daemon}.pid");
        let process_running =
            format!("ls {pid_file} >/dev/null 2>&1 && ps -p `cat {pid_file}` >/dev/null 2>&1");
        let jps = format!("{java64_home}/bin/jps -l  | grep {}$", daemon.main_class());

        DaemonCommands {
            daemon,
            user: storm_user.clone(),
            path: storm_bin_dir.clone(),
            start: GuardedCommand {
                command: format!(
                    "env JAVA_HOME={java64_home} PATH=$PATH:{java64_home}/bin storm {daemon} > {log_dir}/{daemon}.out 2>&1"
                ),
                not_if: process_running.clone(),
                ignore_failures: false,
            },
            capture_pid: PidCapture {
                command: format!("{jps} && {jps} | awk {{'print $1'}} > {pid_file}"),
                tries: daemon.pid_capture_tries(),
                try_sleep_seconds: STORM_PID_CAPTURE_TRY_SLEEP_SECONDS,
            },
            stop: GuardedCommand {
                command: format!("sudo kill `cat {pid_file}`"),
                not_if: format!("! ({process_running})"),
                ignore_failures: false,
            },
            force_stop: GuardedCommand {
                command: format!("sudo kill -9 `cat {pid_file}`"),
                not_if: format!(
                    "sleep 2; ! ({process_running}) || sleep 20; ! ({process_running})"
                ),
                ignore_failures: true,
            },
            pid_file,
            process_running,
        }
    }

    pub fn for_name(name: &str, settings: &StormSettings) -> Result<Self> {
        let daemon = name
            .parse::<Daemon>()
            .ok()
            .context(UnknownDaemonSnafu { daemon: name })?;
        Ok(Self::for_daemon(daemon, settings))
    }

    fn insert_into(&self, params: &mut ResolvedParams) {
        let daemon = self.daemon;
        params
            .insert(format!("{daemon}_pid_file"), &self.pid_file)
            .insert(format!("{daemon}_process_running"), &self.process_running)
            .insert(format!("{daemon}_start_command"), &self.start.command)
            .insert(format!("{daemon}_pid_capture_command"), &self.capture_pid.command)
            .insert(format!("{daemon}_pid_capture_tries"), self.capture_pid.tries)
            .insert(format!("{daemon}_stop_command"), &self.stop.command)
            .insert(format!("{daemon}_force_stop_command"), &self.force_stop.command);
    }
}

impl ServiceParams for StormParams {
    fn service(&self) -> Service {
        Service::Storm
    }

    fn resolve(
        &self,
        document: &ConfigDocument,
        facts: &EnvironmentFacts,
    ) -> Result<ResolvedParams> {
        // Required here, optional for KNOX.
        document.required_str(STACK_VERSION_PATH)?;
        let directories = role_directories();
        let layout = select_path_set(
            facts.stack_version.as_ref(),
            &facts.command_role,
            &directories,
        );
        let settings = StormSettings::from_document(document, facts)?;

        let mut params = ResolvedParams::new();
        params
            .insert("stack_version_unformatted", &facts.stack_version_unformatted)
            .insert("hdp_stack_version", facts.formatted_stack_version())
            .insert("version", facts.upgrade_version.clone())
            .insert(
                "stack_select_command",
                stack_select_command(directories.directory(&facts.command_role), facts),
            )
            .insert("storm_component_home", layout.path_or("", STORM_LEGACY_HOME))
            .insert("storm_bin_dir", &settings.storm_bin_dir)
            .insert("conf_dir", STORM_CONF_DIR)
            .insert("storm_user", &settings.storm_user)
            .insert("log_dir", &settings.log_dir)
            .insert("pid_dir", &settings.pid_dir)
            .insert("java64_home", &settings.java64_home)
            .insert("user_group", document.required_str(USER_GROUP_PATH)?)
            .insert(
                "security_enabled",
                document.required_bool(SECURITY_ENABLED_PATH)?,
            )
            .insert("hostname", document.required_str(HOSTNAME_PATH)?)
            .insert(
                "storm_keytab",
                document.optional_str(&format!("{STORM_ENV}/storm_keytab"))?,
            )
            .insert(
                "storm_principal_name",
                document.optional_str(&format!("{STORM_ENV}/storm_principal_name"))?,
            )
            .insert("kinit_path_local", crate::security::kinit_path_local(facts));

        for daemon in Daemon::iter() {
            DaemonCommands::for_daemon(daemon, &settings).insert_into(&mut params);
        }

        Ok(params)
    }
}
