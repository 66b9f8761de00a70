use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::path::PathBuf;

use foldserve::config::Config;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.server.host, Ipv4Addr::UNSPECIFIED);
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.server.backlog, 10);
    assert_eq!(cfg.server.lookup_dir, PathBuf::from("."));
    assert_eq!(cfg.server.max_response_bytes, 104_857_600);
    assert_eq!(cfg.server.read_timeout_ms, None);
    assert_eq!(cfg.server.name_index_ttl_ms, None);
    assert_eq!(cfg.logging.level, "debug");
    assert!(!cfg.logging.persist);
}

#[test]
fn test_config_root_defaults_to_executable_dir() {
    let cfg = Config::default();
    let exe = std::env::current_exe().unwrap();

    assert_eq!(cfg.server.root_dir, exe.parent().unwrap());
}

#[test]
fn test_config_from_yaml_partial() {
    let cfg = Config::from_yaml(
        "server:\n  port: 9000\n  root_dir: /srv/www\n  name_index_ttl_ms: 500\nlogging:\n  persist: true\n",
    )
    .unwrap();

    assert_eq!(cfg.server.port, 9000);
    assert_eq!(cfg.server.root_dir, PathBuf::from("/srv/www"));
    assert_eq!(cfg.server.name_index_ttl_ms, Some(500));
    assert_eq!(cfg.server.backlog, 10);
    assert!(cfg.logging.persist);
    assert_eq!(cfg.logging.file, PathBuf::from("foldserve_log.txt"));
}

#[test]
fn test_config_from_yaml_host() {
    let cfg = Config::from_yaml("server:\n  host: 127.0.0.1\n").unwrap();
    assert_eq!(cfg.server.host, Ipv4Addr::LOCALHOST);
}

#[test]
fn test_config_rejects_invalid_yaml() {
    assert!(Config::from_yaml("server:\n  port: not-a-port\n").is_err());
}

#[test]
fn test_config_from_missing_file() {
    assert!(Config::from_file(std::path::Path::new("/nonexistent/foldserve.yaml")).is_err());
}

#[test]
fn test_config_env_overrides() {
    let mut cfg = Config::default();
    cfg.apply_overrides(env(&[
        ("FOLDSERVE_PORT", "3000"),
        ("FOLDSERVE_ROOT", "/var/www"),
        ("FOLDSERVE_LOOKUP_DIR", "/var/www"),
        ("FOLDSERVE_LOG_LEVEL", "info"),
    ]))
    .unwrap();

    assert_eq!(cfg.server.port, 3000);
    assert_eq!(cfg.server.root_dir, PathBuf::from("/var/www"));
    assert_eq!(cfg.server.lookup_dir, PathBuf::from("/var/www"));
    assert_eq!(cfg.logging.level, "info");
}

#[test]
fn test_config_no_overrides_keeps_values() {
    let mut cfg = Config::from_yaml("server:\n  port: 9000\n").unwrap();
    cfg.apply_overrides(env(&[])).unwrap();
    assert_eq!(cfg.server.port, 9000);
}

#[test]
fn test_config_bad_port_override() {
    let mut cfg = Config::default();
    assert!(cfg.apply_overrides(env(&[("FOLDSERVE_PORT", "99999")])).is_err());
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::default();
    let cfg2 = cfg1.clone();
    assert_eq!(cfg1.server.port, cfg2.server.port);
}
