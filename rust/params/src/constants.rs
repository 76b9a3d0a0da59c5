use const_format::concatcp;

pub const APP_NAME: &str = "ambari-params";

// Layout gates
pub const VERSIONED_LAYOUT_THRESHOLD: &str = "2.2";
pub const HDP_CURRENT_ROOT: &str = "/usr/hdp/current";
pub const STACK_SELECT_BIN: &str = "hdp-select";

// Command document sections
pub const STACK_VERSION_PATH: &str = "/hostLevelParams/stack_version";
pub const STACK_NAME_PATH: &str = "/hostLevelParams/stack_name";
pub const JAVA_HOME_PATH: &str = "/hostLevelParams/java_home";
pub const COMMAND_ROLE_PATH: &str = "/role";
pub const UPGRADE_VERSION_PATH: &str = "/commandParams/version";
pub const RPM_VERSION_PATH: &str = "/configurations/cluster-env/rpm_version";
pub const HOSTNAME_PATH: &str = "/hostname";

// cluster-env
pub const CLUSTER_ENV: &str = "/configurations/cluster-env";
pub const SECURITY_ENABLED_PATH: &str = concatcp!(CLUSTER_ENV, "/security_enabled");
pub const SMOKE_USER_PATH: &str = concatcp!(CLUSTER_ENV, "/smokeuser");
pub const SMOKE_USER_KEYTAB_PATH: &str = concatcp!(CLUSTER_ENV, "/smokeuser_keytab");
pub const USER_GROUP_PATH: &str = concatcp!(CLUSTER_ENV, "/user_group");

// hadoop-env
pub const HADOOP_ENV: &str = "/configurations/hadoop-env";
pub const HADOOP_CONF_DIR: &str = "/etc/hadoop/conf";
pub const HADOOP_LEGACY_BIN_DIR: &str = "/usr/bin";
pub const HADOOP_VERSIONED_BIN_DIR: &str = concatcp!(HDP_CURRENT_ROOT, "/hadoop-client/bin");

// hdfs-site.xml
pub const DFS_NAMENODE_RPC_ADDRESS: &str = "dfs.namenode.rpc-address";
pub const DFS_NAMENODE_HTTP_ADDRESS: &str = "dfs.namenode.http-address";

// yarn-site.xml
pub const YARN_RESOURCEMANAGER_ADDRESS: &str = "yarn.resourcemanager.address";
pub const YARN_RESOURCEMANAGER_WEBAPP_ADDRESS: &str = "yarn.resourcemanager.webapp.address";

// oozie-site.xml
pub const OOZIE_BASE_URL: &str = "oozie.base.url";

pub const DEFAULT_NAME_NODE_HTTP_PORT: u16 = 50070;
pub const DEFAULT_NAME_NODE_RPC_PORT: u16 = 8020;
pub const DEFAULT_RESOURCE_MANAGER_RPC_PORT: u16 = 8050;
pub const DEFAULT_RESOURCE_MANAGER_WEBAPP_PORT: u16 = 8080;
pub const DEFAULT_OOZIE_SERVER_PORT: u16 = 11000;
pub const DEFAULT_HIVE_HTTP_PORT: u16 = 10001;
pub const DEFAULT_HIVE_HTTP_PATH: &str = "cliservice";
pub const DEFAULT_TEMPLETON_PORT: u16 = 50111;
pub const DEFAULT_HBASE_REST_PORT: u16 = 8080;

// kerberos
pub const KINIT_SEARCH_DIRS: [&str; 3] = ["/usr/bin", "/usr/kerberos/bin", "/usr/sbin"];
pub const KINIT_BINARY: &str = "kinit";
pub const DEFAULT_KINIT_PATH: &str = "/usr/bin/kinit";

// falcon
pub const FALCON_ENV: &str = "/configurations/falcon-env";
pub const FALCON_STARTUP_PROPERTIES: &str = "/configurations/falcon-startup.properties";
pub const FALCON_RUNTIME_PROPERTIES: &str = "/configurations/falcon-runtime.properties";
pub const FALCON_CONF_DIR_PREFIX: &str = "/etc/falcon";
pub const FALCON_CONF_DIR: &str = concatcp!(FALCON_CONF_DIR_PREFIX, "/conf");
pub const FALCON_APPS_DIR: &str = "/apps/falcon";
pub const FALCON_LEGACY_HOME: &str = "/usr/lib/falcon";
pub const FALCON_LEGACY_WEBAPP_DIR: &str = "/var/lib/falcon/webapp";
pub const FALCON_SERVER_ROLE: &str = "FALCON_SERVER";
pub const FALCON_SERVICE_CHECK_ROLE: &str = "FALCON_SERVICE_CHECK";

// knox
pub const KNOX_ENV: &str = "/configurations/knox-env";
pub const KNOX_CONF_DIR: &str = "/etc/knox/conf";
pub const KNOX_DEFAULT_USER: &str = "knox";
pub const KNOX_DEFAULT_GROUP: &str = "knox";
pub const KNOX_VERSIONED_BIN_DIR: &str = concatcp!(HDP_CURRENT_ROOT, "/knox-server/bin");
pub const KNOX_LEGACY_GATEWAY_BIN: &str = "/usr/bin/gateway";
pub const KNOX_LEGACY_BIN_DIR: &str = "/usr/lib/knox/bin";

// storm
pub const STORM_ENV: &str = "/configurations/storm-env";
pub const STORM_CONF_DIR: &str = "/etc/storm/conf";
pub const STORM_LEGACY_BIN_DIR: &str = "/usr/bin";
pub const STORM_LEGACY_HOME: &str = "/usr/lib/storm";
pub const STORM_SERVICE_CHECK_ROLE: &str = "STORM_SERVICE_CHECK";
pub const STORM_PID_CAPTURE_TRY_SLEEP_SECONDS: u32 = 10;
pub const STORM_LOGVIEWER_PID_CAPTURE_TRIES: u32 = 12;
pub const STORM_DEFAULT_PID_CAPTURE_TRIES: u32 = 6;
