#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use hmpi_gateway::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:8000"
  max_upload_byte: 4096 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:8000");
    assert_eq!(cfg.server.cors_origins.len(), 4);
    assert_eq!(cfg.server.max_upload_bytes, 10 * 1024 * 1024);
    assert!(cfg.reference.is_none());
    assert_eq!(cfg.reference_tables().unwrap().metals().count(), 11);
}

#[test]
fn unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn listen_must_be_socket_addr() {
    let bad = "version: 1\nserver:\n  listen: \"localhost\"\n";
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("server.listen"));
}

#[test]
fn upload_limit_range() {
    let bad = "version: 1\nserver:\n  max_upload_bytes: 10\n";
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("max_upload_bytes"));
}

#[test]
fn custom_reference_tables() {
    let ok = r##"
version: 1
server:
  cors_origins: []
reference:
  standard_limits: { "Lead (Pb)": 0.01, "Uranium (U)": 0.03 }
  unit_weights: { "Lead (Pb)": 0.5, "Uranium (U)": 0.5 }
  risk_bands:
    - { name: "Low", min: 0, max: 100, color: "#22c55e" }
    - { name: "High", min: 100, color: "#dc2626", description: "Above limits" }
"##;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert!(cfg.server.cors_origins.is_empty());

    let tables = cfg.reference_tables().unwrap();
    assert!(tables.is_known("Uranium (U)"));
    assert!(!tables.is_known("Zinc (Zn)"));
    assert_eq!(tables.classify(150.0).description, "Above limits");
}

#[test]
fn custom_reference_defaults_to_builtin_bands() {
    let ok = r#"
version: 1
reference:
  standard_limits: { "Lead (Pb)": 0.01 }
  unit_weights: { "Lead (Pb)": 1.0 }
"#;
    let tables = config::load_from_str(ok).unwrap().reference_tables().unwrap();
    assert_eq!(tables.bands().len(), 5);
    assert_eq!(tables.classify(30.0).category, "Moderate");
}

#[test]
fn reference_key_mismatch_is_rejected() {
    let bad = r#"
version: 1
reference:
  standard_limits: { "Lead (Pb)": 0.01 }
  unit_weights: { "Zinc (Zn)": 0.05 }
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "INVALID_REFERENCE");
}

#[test]
fn missing_file_uses_defaults() {
    let cfg = config::load_or_default("definitely/not/here/hmpi.yaml").unwrap();
    assert_eq!(cfg.version, 1);
}
