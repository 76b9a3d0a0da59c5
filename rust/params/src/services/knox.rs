use tracing::debug;

use crate::{
    address::{parse_port, resolve_port},
    constants::*,
    document::{resolve_host, ConfigDocument},
    error::Result,
    facts::EnvironmentFacts,
    params::ResolvedParams,
    services::{Service, ServiceParams},
};

pub struct KnoxParams;

/// A service the gateway proxies to, located through `clusterHostInfo`.
struct Peer {
    host: Option<String>,
}

impl Peer {
    fn locate(document: &ConfigDocument, host_path: &str) -> Result<Self> {
        Ok(Peer {
            host: resolve_host(document.host(host_path)?),
        })
    }

    fn is_present(&self) -> bool {
        self.host.is_some()
    }

    /// Port from a `host:port` or URL setting; only consulted when the peer exists.
    fn port(&self, document: &ConfigDocument, address_path: &str, fallback: u16) -> Result<u16> {
        if !self.is_present() {
            return Ok(fallback);
        }
        resolve_port(document.optional_str(address_path)?.as_deref(), fallback)
    }
}

fn port_setting(document: &ConfigDocument, path: &str, fallback: u16) -> Result<u16> {
    match document.optional_str(path)? {
        Some(port) => parse_port(path, &port),
        None => Ok(fallback),
    }
}

impl ServiceParams for KnoxParams {
    fn service(&self) -> Service {
        Service::Knox
    }

    fn resolve(
        &self,
        document: &ConfigDocument,
        facts: &EnvironmentFacts,
    ) -> Result<ResolvedParams> {
        let mut params = ResolvedParams::new();

        // Knox switches layouts on the rpm version, not on the stack version.
        if facts.rpm_version.is_some() {
            debug!("rpm version present, using versioned knox layout");
            params
                .insert("knox_bin", format!("{KNOX_VERSIONED_BIN_DIR}/gateway.sh"))
                .insert("ldap_bin", format!("{KNOX_VERSIONED_BIN_DIR}/ldap.sh"))
                .insert(
                    "knox_client_bin",
                    format!("{KNOX_VERSIONED_BIN_DIR}/knoxcli.sh"),
                );
        } else {
            params
                .insert("knox_bin", KNOX_LEGACY_GATEWAY_BIN)
                .insert("ldap_bin", format!("{KNOX_LEGACY_BIN_DIR}/ldap.sh"))
                .insert("knox_client_bin", format!("{KNOX_LEGACY_BIN_DIR}/knoxcli.sh"));
        }
        params.insert("rpm_version", facts.rpm_version.clone());

        let namenode = Peer::locate(document, "/clusterHostInfo/namenode_host")?;
        params
            .insert(
                "namenode_http_port",
                namenode.port(
                    document,
                    &format!("/configurations/hdfs-site/{DFS_NAMENODE_HTTP_ADDRESS}"),
                    DEFAULT_NAME_NODE_HTTP_PORT,
                )?,
            )
            .insert(
                "namenode_rpc_port",
                namenode.port(
                    document,
                    &format!("/configurations/hdfs-site/{DFS_NAMENODE_RPC_ADDRESS}"),
                    DEFAULT_NAME_NODE_RPC_PORT,
                )?,
            )
            .insert("has_namenode", namenode.is_present())
            .insert("namenode_host", namenode.host);

        let resource_manager = Peer::locate(document, "/clusterHostInfo/rm_host")?;
        params
            .insert(
                "jt_rpc_port",
                resource_manager.port(
                    document,
                    &format!("/configurations/yarn-site/{YARN_RESOURCEMANAGER_ADDRESS}"),
                    DEFAULT_RESOURCE_MANAGER_RPC_PORT,
                )?,
            )
            .insert(
                "rm_port",
                resource_manager.port(
                    document,
                    &format!("/configurations/yarn-site/{YARN_RESOURCEMANAGER_WEBAPP_ADDRESS}"),
                    DEFAULT_RESOURCE_MANAGER_WEBAPP_PORT,
                )?,
            )
            .insert("has_rm", resource_manager.is_present())
            .insert("rm_host", resource_manager.host);

        let oozie = Peer::locate(document, "/clusterHostInfo/oozie_server")?;
        params
            .insert(
                "oozie_server_port",
                oozie.port(
                    document,
                    &format!("/configurations/oozie-site/{OOZIE_BASE_URL}"),
                    DEFAULT_OOZIE_SERVER_PORT,
                )?,
            )
            .insert("has_oozie", oozie.is_present())
            .insert("oozie_server_host", oozie.host);

        params
            .insert(
                "hive_http_port",
                port_setting(
                    document,
                    "/configurations/hive-site/hive.server2.thrift.http.port",
                    DEFAULT_HIVE_HTTP_PORT,
                )?,
            )
            .insert(
                "hive_http_path",
                document.default_str(
                    "/configurations/hive-site/hive.server2.thrift.http.path",
                    DEFAULT_HIVE_HTTP_PATH,
                )?,
            )
            .insert(
                "hive_server_host",
                Peer::locate(document, "/clusterHostInfo/hive_server_host")?.host,
            )
            .insert(
                "templeton_port",
                port_setting(
                    document,
                    "/configurations/webhcat-site/templeton.port",
                    DEFAULT_TEMPLETON_PORT,
                )?,
            )
            .insert(
                "webhcat_server_host",
                Peer::locate(document, "/clusterHostInfo/webhcat_server_host")?.host,
            )
            .insert(
                "hbase_master_port",
                port_setting(
                    document,
                    "/configurations/hbase-site/hbase.rest.port",
                    DEFAULT_HBASE_REST_PORT,
                )?,
            )
            .insert(
                "hbase_master_host",
                Peer::locate(document, "/clusterHostInfo/hbase_master_hosts")?.host,
            );

        let knox_pid_dir = document.required_str(&format!("{KNOX_ENV}/knox_pid_dir"))?;
        params
            .insert("knox_conf_dir", KNOX_CONF_DIR)
            .insert(
                "knox_user",
                document.default_str(&format!("{KNOX_ENV}/knox_user"), KNOX_DEFAULT_USER)?,
            )
            .insert(
                "knox_group",
                document.default_str(&format!("{KNOX_ENV}/knox_group"), KNOX_DEFAULT_GROUP)?,
            )
            .insert("knox_pid_file", format!("{knox_pid_dir}/gateway.pid"))
            .insert("ldap_pid_file", format!("{knox_pid_dir}/ldap.pid"))
            .insert("knox_pid_dir", knox_pid_dir)
            .insert(
                "knox_master_secret",
                document.required_str(&format!("{KNOX_ENV}/knox_master_secret"))?,
            )
            .insert(
                "knox_host_name",
                document.required_first("/clusterHostInfo/knox_gateway_hosts")?,
            )
            .insert(
                "knox_host_port",
                document.required_str("/configurations/gateway-site/gateway.port")?,
            )
            .insert(
                "topology_template",
                document.required_str("/configurations/ambari-topology/content")?,
            )
            .insert(
                "gateway_log4j",
                document.required_str("/configurations/gateway-log4j/content")?,
            )
            .insert(
                "ldap_log4j",
                document.required_str("/configurations/ldap-log4j/content")?,
            )
            .insert(
                "users_ldif",
                document.required_str("/configurations/users-ldif/content")?,
            );

        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rstest::rstest;
    use serde_json::{json, Value};

    fn knox_document(cluster_host_info: Value, configurations: Value) -> ConfigDocument {
        let mut root = json!({
            "hostLevelParams": {"stack_version": "2.2"},
            "clusterHostInfo": {"knox_gateway_hosts": ["c6403.ambari.apache.org"]},
            "configurations": {
                "knox-env": {"knox_pid_dir": "/var/run/knox", "knox_master_secret": "sekret"},
                "gateway-site": {"gateway.port": "8443"},
                "ambari-topology": {"content": "<topology/>"},
                "gateway-log4j": {"content": "log4j.rootLogger=ERROR"},
                "ldap-log4j": {"content": "log4j.rootLogger=INFO"},
                "users-ldif": {"content": "dn: dc=hadoop"}
            }
        });
        for (key, value) in cluster_host_info.as_object().into_iter().flatten() {
            root["clusterHostInfo"][key] = value.clone();
        }
        for (key, value) in configurations.as_object().into_iter().flatten() {
            root["configurations"][key] = value.clone();
        }
        ConfigDocument::new(root)
    }

    fn resolve(document: &ConfigDocument) -> Result<ResolvedParams> {
        KnoxParams.resolve(document, &EnvironmentFacts::from_document(document)?)
    }

    #[test]
    fn absent_peers_keep_default_ports() {
        let params = resolve(&knox_document(json!({}), json!({}))).unwrap();

        assert_eq!(Some(false), params.get_bool("has_namenode"));
        assert!(params.is_absent("namenode_host"));
        assert_eq!(Some(50070), params.get_int("namenode_http_port"));
        assert_eq!(Some(8020), params.get_int("namenode_rpc_port"));
        assert_eq!(Some(false), params.get_bool("has_rm"));
        assert_eq!(Some(8050), params.get_int("jt_rpc_port"));
        assert_eq!(Some(8080), params.get_int("rm_port"));
        assert_eq!(Some(false), params.get_bool("has_oozie"));
        assert_eq!(Some(11000), params.get_int("oozie_server_port"));
        assert_eq!(Some(10001), params.get_int("hive_http_port"));
        assert_eq!(Some("cliservice"), params.get_str("hive_http_path"));
        assert_eq!(Some(50111), params.get_int("templeton_port"));
        assert_eq!(Some(8080), params.get_int("hbase_master_port"));
        assert_eq!(Some("knox"), params.get_str("knox_user"));
        assert_eq!(Some("knox"), params.get_str("knox_group"));
    }

    #[test]
    fn present_peers_read_their_ports() {
        let params = resolve(&knox_document(
            json!({
                "namenode_host": ["c6401.ambari.apache.org"],
                "rm_host": "c6402.ambari.apache.org",
                "oozie_server": ["c6402.ambari.apache.org"]
            }),
            json!({
                "hdfs-site": {
                    "dfs.namenode.http-address": "c6401.ambari.apache.org:50071",
                    "dfs.namenode.rpc-address": "c6401.ambari.apache.org:8021"
                },
                "yarn-site": {
                    "yarn.resourcemanager.address": "c6402.ambari.apache.org:8051",
                    "yarn.resourcemanager.webapp.address": "c6402.ambari.apache.org:8088"
                },
                "oozie-site": {"oozie.base.url": "http://c6402.ambari.apache.org:11001/oozie"}
            }),
        ))
        .unwrap();

        assert_eq!(Some("c6401.ambari.apache.org"), params.get_str("namenode_host"));
        assert_eq!(Some(true), params.get_bool("has_namenode"));
        assert_eq!(Some(50071), params.get_int("namenode_http_port"));
        assert_eq!(Some(8021), params.get_int("namenode_rpc_port"));
        assert_eq!(Some("c6402.ambari.apache.org"), params.get_str("rm_host"));
        assert_eq!(Some(8051), params.get_int("jt_rpc_port"));
        assert_eq!(Some(8088), params.get_int("rm_port"));
        assert_eq!(Some(11001), params.get_int("oozie_server_port"));
    }

    #[test]
    fn port_settings_of_absent_peers_are_ignored() {
        let params = resolve(&knox_document(
            json!({}),
            json!({"hdfs-site": {"dfs.namenode.http-address": "broken"}}),
        ))
        .unwrap();
        assert_eq!(Some(50070), params.get_int("namenode_http_port"));
    }

    #[test]
    fn malformed_peer_address_fails_fast() {
        let err = resolve(&knox_document(
            json!({"namenode_host": "c6401.ambari.apache.org"}),
            json!({"hdfs-site": {"dfs.namenode.http-address": "c6401.ambari.apache.org"}}),
        ))
        .unwrap_err();
        assert!(matches!(err, Error::MissingPort { .. }));
    }

    #[rstest]
    #[case(None, "/usr/bin/gateway", "/usr/lib/knox/bin/ldap.sh", "/usr/lib/knox/bin/knoxcli.sh")]
    #[case(
        Some("2.2.0.0"),
        "/usr/hdp/current/knox-server/bin/gateway.sh",
        "/usr/hdp/current/knox-server/bin/ldap.sh",
        "/usr/hdp/current/knox-server/bin/knoxcli.sh"
    )]
    fn rpm_version_selects_layout(
        #[case] rpm_version: Option<&str>,
        #[case] knox_bin: &str,
        #[case] ldap_bin: &str,
        #[case] knox_client_bin: &str,
    ) {
        let configurations = match rpm_version {
            Some(rpm_version) => json!({"cluster-env": {"rpm_version": rpm_version}}),
            None => json!({}),
        };
        let params = resolve(&knox_document(json!({}), configurations)).unwrap();

        assert_eq!(Some(knox_bin), params.get_str("knox_bin"));
        assert_eq!(Some(ldap_bin), params.get_str("ldap_bin"));
        assert_eq!(Some(knox_client_bin), params.get_str("knox_client_bin"));
    }

    #[test]
    fn resolves_gateway_settings() {
        let params = resolve(&knox_document(
            json!({}),
            json!({"knox-env": {
                "knox_pid_dir": "/var/run/knox",
                "knox_master_secret": "sekret",
                "knox_user": "gateway"
            }}),
        ))
        .unwrap();

        assert_eq!(Some("gateway"), params.get_str("knox_user"));
        assert_eq!(Some("/var/run/knox/gateway.pid"), params.get_str("knox_pid_file"));
        assert_eq!(Some("/var/run/knox/ldap.pid"), params.get_str("ldap_pid_file"));
        assert_eq!(Some("c6403.ambari.apache.org"), params.get_str("knox_host_name"));
        assert_eq!(Some("8443"), params.get_str("knox_host_port"));
    }

    #[test]
    fn master_secret_is_required() {
        let err = resolve(&knox_document(
            json!({}),
            json!({"knox-env": {"knox_pid_dir": "/var/run/knox"}}),
        ))
        .unwrap_err();
        let expected = "/configurations/knox-env/knox_master_secret";
        assert!(matches!(err, Error::MissingKey { ref path } if path == expected));
    }

    #[test]
    fn invalid_port_settings_fail() {
        let err = resolve(&knox_document(
            json!({}),
            json!({"webhcat-site": {"templeton.port": "fifty"}}),
        ))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidPort { .. }));
    }
}
