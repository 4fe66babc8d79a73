//! Integration tests for the GeoComm CLI
//!
//! These tests exercise the binary end-to-end with assert_cmd, pointing
//! the store at a throwaway data directory per test.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get a geocomm command bound to a temp data dir
fn geocomm(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("geocomm").unwrap();
    cmd.env("GEOCOMM_DATA_DIR", tmp.path());
    cmd
}

const SAMPLE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<EnterpriseContactDirectory exported="2026-08-01T00:00:00.000Z" version="1.0">
  <Contact id="c014-fire-station" platform="site">
    <Name>Fire Station 7</Name>
    <Location>Downtown</Location>
    <Department>Emergency Services</Department>
    <Notes>Staffed around the clock</Notes>
    <VoIP>
      <IP>10.1.2.3</IP>
      <Port>5060</Port>
    </VoIP>
  </Contact>
  <Contact id="c015-patrol-12" platform="mobile">
    <Name>Patrol 12</Name>
  </Contact>
</EnterpriseContactDirectory>
"#;

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    let tmp = TempDir::new().unwrap();
    geocomm(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("communications tracking"));
}

#[test]
fn test_version_displays() {
    let tmp = TempDir::new().unwrap();
    geocomm(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("geocomm"));
}

#[test]
fn test_unknown_command_fails() {
    let tmp = TempDir::new().unwrap();
    geocomm(&tmp).arg("unknown-command").assert().failure();
}

// ============================================================================
// Seeded Store Tests
// ============================================================================

#[test]
fn test_asset_list_shows_seed_data() {
    let tmp = TempDir::new().unwrap();
    geocomm(&tmp)
        .args(["asset", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ALPHA-HQ"))
        .stdout(predicate::str::contains("asset-010"))
        .stdout(predicate::str::contains("10 asset(s) found."));
}

#[test]
fn test_asset_list_filters_by_platform() {
    let tmp = TempDir::new().unwrap();
    geocomm(&tmp)
        .args(["asset", "list", "--platform", "aircraft"])
        .assert()
        .success()
        .stdout(predicate::str::contains("EAGLE-1"))
        .stdout(predicate::str::contains("ALPHA-HQ").not());
}

#[test]
fn test_asset_show_outputs_json() {
    let tmp = TempDir::new().unwrap();
    geocomm(&tmp)
        .args(["asset", "show", "asset-001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"callsign\": \"ALPHA-HQ\""));
}

#[test]
fn test_asset_show_unknown_fails() {
    let tmp = TempDir::new().unwrap();
    geocomm(&tmp)
        .args(["asset", "show", "asset-nope"])
        .assert()
        .failure();
}

#[test]
fn test_status_dashboard() {
    let tmp = TempDir::new().unwrap();
    geocomm(&tmp)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total assets"))
        .stdout(predicate::str::contains("10"))
        .stdout(predicate::str::contains("Links by Type"));
}

#[test]
fn test_sat_and_freq_lists() {
    let tmp = TempDir::new().unwrap();
    geocomm(&tmp)
        .args(["sat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MUOS-5"))
        .stdout(predicate::str::contains("4 satellite(s) found."));

    geocomm(&tmp)
        .args(["freq", "--band", "UHF"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Guard Emergency"))
        .stdout(predicate::str::contains("HF Net Primary").not());
}

// ============================================================================
// Mutation & Persistence Tests
// ============================================================================

#[test]
fn test_remove_asset_cascades_and_persists() {
    let tmp = TempDir::new().unwrap();

    geocomm(&tmp)
        .args(["asset", "rm", "asset-005"])
        .assert()
        .success()
        .stdout(predicate::str::contains("removed dependent link link-001"));

    // a separate invocation sees the cascade through persistence
    geocomm(&tmp)
        .args(["asset", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BRAVO-6").not());

    geocomm(&tmp)
        .args(["link", "list", "--format", "id"])
        .assert()
        .success()
        .stdout(predicate::str::contains("link-001").not())
        .stdout(predicate::str::contains("link-003"));
}

#[test]
fn test_link_add_and_show() {
    let tmp = TempDir::new().unwrap();

    let output = geocomm(&tmp)
        .args([
            "link", "add", "--quiet", "--name", "Test Net", "--type", "voip", "--between",
            "asset-001", "asset-004",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let id = String::from_utf8_lossy(&output.stdout).trim().to_string();
    assert!(id.starts_with("link-"), "unexpected id output: {}", id);

    geocomm(&tmp)
        .args(["link", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Test Net"));

    // the endpoint assets picked up the membership
    geocomm(&tmp)
        .args(["asset", "show", "asset-004"])
        .assert()
        .success()
        .stdout(predicate::str::contains(&id));
}

#[test]
fn test_link_add_rejects_unknown_endpoint() {
    let tmp = TempDir::new().unwrap();
    geocomm(&tmp)
        .args([
            "link", "add", "--name", "Bad Net", "--type", "voip", "--between", "asset-001",
            "asset-ghost",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("asset-ghost"));
}

#[test]
fn test_reset_restores_seed() {
    let tmp = TempDir::new().unwrap();

    geocomm(&tmp)
        .args(["asset", "rm", "asset-001"])
        .assert()
        .success();
    geocomm(&tmp)
        .args(["reset", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored seed data"));

    geocomm(&tmp)
        .args(["asset", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ALPHA-HQ"))
        .stdout(predicate::str::contains("10 asset(s) found."));
}

// ============================================================================
// XML Interchange Tests
// ============================================================================

#[test]
fn test_import_adds_assets() {
    let tmp = TempDir::new().unwrap();
    let xml_path = tmp.path().join("directory.xml");
    fs::write(&xml_path, SAMPLE_XML).unwrap();

    geocomm(&tmp)
        .args(["import", xml_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 asset(s)"));

    geocomm(&tmp)
        .args(["asset", "list", "--search", "fire"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fire Station 7"))
        .stdout(predicate::str::contains("FIRE-STATI"));
}

#[test]
fn test_import_dry_run_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let xml_path = tmp.path().join("directory.xml");
    fs::write(&xml_path, SAMPLE_XML).unwrap();

    geocomm(&tmp)
        .args(["import", "--dry-run", xml_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("dry run"));

    geocomm(&tmp)
        .args(["asset", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fire Station 7").not());
}

#[test]
fn test_import_rejects_malformed_xml() {
    let tmp = TempDir::new().unwrap();
    let xml_path = tmp.path().join("broken.xml");
    fs::write(&xml_path, "<EnterpriseContactDirectory><Contact>").unwrap();

    geocomm(&tmp)
        .args(["import", xml_path.to_str().unwrap()])
        .assert()
        .failure();
}

#[test]
fn test_export_writes_contact_directory() {
    let tmp = TempDir::new().unwrap();
    let out_dir = tmp.path().join("exports");

    geocomm(&tmp)
        .args(["export", "-o", out_dir.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 10 contact(s)"));

    let exported: Vec<_> = fs::read_dir(&out_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .collect();
    assert_eq!(exported.len(), 1);

    let filename = exported[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(filename.starts_with("enterprise-contact-directory_"));
    assert!(filename.ends_with("_10-contacts.xml"));

    let content = fs::read_to_string(&exported[0]).unwrap();
    assert!(content.contains("<EnterpriseContactDirectory"));
    assert!(content.contains("<Contact id=\"c001-ops-center-alpha\" platform=\"site\">"));
}

// ============================================================================
// Report Tests
// ============================================================================

#[test]
fn test_report_node_status() {
    let tmp = TempDir::new().unwrap();
    geocomm(&tmp)
        .args(["report", "node-status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Node Status Report"))
        .stdout(predicate::str::contains("ALPHA-HQ"));
}

#[test]
fn test_report_availability_csv() {
    let tmp = TempDir::new().unwrap();
    geocomm(&tmp)
        .args(["report", "availability", "--csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "id,name,type,subtype,status,scheduled_hours,available_hours,unavailable_hours,uptime_percent",
        ))
        .stdout(predicate::str::contains("link-003"))
        .stdout(predicate::str::contains("70.0"));
}

#[test]
fn test_report_satellite_to_file() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("sat-report.md");

    geocomm(&tmp)
        .args(["report", "satellite", "-o", out.to_str().unwrap()])
        .assert()
        .success();

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.contains("# Satellite Usage Report"));
    assert!(content.contains("MUOS-5"));
}

#[test]
fn test_report_frequency_lists_bands() {
    let tmp = TempDir::new().unwrap();
    geocomm(&tmp)
        .args(["report", "frequency"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Frequency Allocation Report"))
        .stdout(predicate::str::contains("No frequency conflicts detected."));
}

#[test]
fn test_completions_generate() {
    let tmp = TempDir::new().unwrap();
    geocomm(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("geocomm"));
}
