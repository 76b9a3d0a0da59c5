use snafu::OptionExt;

use crate::{
    constants::*,
    document::ConfigDocument,
    error::{InvalidTypeSnafu, Result},
    facts::EnvironmentFacts,
    layout::{select_path_set, stack_select_command, RoleDirectories},
    params::{ParamValue, ResolvedParams},
    security::kinit_path_local,
    services::{Service, ServiceParams},
};

pub struct FalconParams;

/// Server actions use the server binaries, smoke tests the client binaries.
pub fn role_directories() -> RoleDirectories {
    RoleDirectories::new(
        [
            (FALCON_SERVER_ROLE, "falcon-server"),
            (FALCON_SERVICE_CHECK_ROLE, "falcon-client"),
        ],
        FALCON_SERVICE_CHECK_ROLE,
    )
}

impl ServiceParams for FalconParams {
    fn service(&self) -> Service {
        Service::Falcon
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
        let hadoop_bin_dir = if layout.is_versioned() {
            HADOOP_VERSIONED_BIN_DIR
        } else {
            HADOOP_LEGACY_BIN_DIR
        };
        let falcon_pid_dir = document.required_str(&format!("{FALCON_ENV}/falcon_pid_dir"))?;

        let mut params = ResolvedParams::new();
        params
            .insert("stack_name", document.optional_str(STACK_NAME_PATH)?)
            .insert("version", facts.upgrade_version.clone())
            .insert(
                "stack_version_unformatted",
                &facts.stack_version_unformatted,
            )
            .insert("hdp_stack_version", facts.formatted_stack_version())
            .insert(
                "command_role",
                directories.effective_role(&facts.command_role),
            )
            .insert(
                "stack_select_command",
                stack_select_command(directories.directory(&facts.command_role), facts),
            )
            .insert("hadoop_bin_dir", hadoop_bin_dir)
            .insert("hadoop_conf_dir", HADOOP_CONF_DIR)
            .insert("falcon_home", layout.path_or("", FALCON_LEGACY_HOME))
            .insert(
                "falcon_webapp_dir",
                layout.path_or("webapp", FALCON_LEGACY_WEBAPP_DIR),
            )
            .insert("falcon_conf_dir_prefix", FALCON_CONF_DIR_PREFIX)
            .insert("falcon_conf_dir", FALCON_CONF_DIR)
            .insert("falcon_apps_dir", FALCON_APPS_DIR)
            .insert("server_pid_file", format!("{falcon_pid_dir}/falcon.pid"))
            .insert("falcon_pid_dir", falcon_pid_dir)
            .insert(
                "oozie_user",
                document.required_str("/configurations/oozie-env/oozie_user")?,
            )
            .insert(
                "falcon_user",
                document.required_str(&format!("{FALCON_ENV}/falcon_user"))?,
            )
            .insert("smoke_user", document.required_str(SMOKE_USER_PATH)?)
            .insert("user_group", document.required_str(USER_GROUP_PATH)?)
            .insert(
                "proxyuser_group",
                document.required_str(&format!("{HADOOP_ENV}/proxyuser_group"))?,
            )
            .insert("java_home", document.required_str(JAVA_HOME_PATH)?)
            .insert(
                "falcon_local_dir",
                document.required_str(&format!("{FALCON_ENV}/falcon_local_dir"))?,
            )
            .insert(
                "falcon_log_dir",
                document.required_str(&format!("{FALCON_ENV}/falcon_log_dir"))?,
            )
            .insert(
                "store_uri",
                document.required_str(&format!("{FALCON_STARTUP_PROPERTIES}/*.config.store.uri"))?,
            )
            // Only set explicitly from HDP 2.2 on; the directories are created when present.
            .insert(
                "falcon_graph_storage_directory",
                document.optional_str(&format!(
                    "{FALCON_STARTUP_PROPERTIES}/*.falcon.graph.storage.directory"
                ))?,
            )
            .insert(
                "falcon_graph_serialize_path",
                document.optional_str(&format!(
                    "{FALCON_STARTUP_PROPERTIES}/*.falcon.graph.serialize.path"
                ))?,
            )
            .insert(
                "falcon_embeddedmq_data",
                document.required_str(&format!("{FALCON_ENV}/falcon.embeddedmq.data"))?,
            )
            .insert(
                "falcon_embeddedmq_enabled",
                document.required_str(&format!("{FALCON_ENV}/falcon.embeddedmq"))?,
            )
            // The key is misspelled in falcon-env.
            .insert(
                "falcon_embeddedmq_port",
                document.required_str(&format!("{FALCON_ENV}/falcon.emeddedmq.port"))?,
            )
            .insert(
                "falcon_host",
                document.required_first("/clusterHostInfo/falcon_server_hosts")?,
            )
            .insert(
                "falcon_port",
                document.required_str(&format!("{FALCON_ENV}/falcon_port"))?,
            )
            .insert(
                "smokeuser_keytab",
                document.required_str(SMOKE_USER_KEYTAB_PATH)?,
            )
            .insert(
                "falcon_env_sh_template",
                document.required_str(&format!("{FALCON_ENV}/content"))?,
            )
            .insert(
                "security_enabled",
                document.required_bool(SECURITY_ENABLED_PATH)?,
            )
            .insert("hostname", document.required_str(HOSTNAME_PATH)?)
            .insert(
                "hdfs_user_keytab",
                document.required_str(&format!("{HADOOP_ENV}/hdfs_user_keytab"))?,
            )
            .insert(
                "hdfs_user",
                document.required_str(&format!("{HADOOP_ENV}/hdfs_user"))?,
            )
            .insert(
                "hdfs_principal_name",
                document.required_str(&format!("{HADOOP_ENV}/hdfs_principal_name"))?,
            )
            .insert("kinit_path_local", kinit_path_local(facts));

        flatten_section(&mut params, document, FALCON_RUNTIME_PROPERTIES)?;
        flatten_section(&mut params, document, FALCON_STARTUP_PROPERTIES)?;

        Ok(params)
    }
}

/// Adds every property of a `configurations/<file>` section as `<file>/<property>`.
fn flatten_section(
    params: &mut ResolvedParams,
    document: &ConfigDocument,
    section_path: &str,
) -> Result<()> {
    let file_name = section_path.rsplit('/').next().unwrap_or(section_path);
    for (property, value) in document.required_section(section_path)? {
        let path = format!("{section_path}/{property}");
        let value = ParamValue::from_scalar(value).context(InvalidTypeSnafu {
            path: path.as_str(),
            expected: "a scalar",
        })?;
        params.insert(format!("{file_name}/{property}"), value);
    }
    Ok(())
}
