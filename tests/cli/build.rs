use anyhow::Result;
use serde_json::Value;

use crate::{CliTest, stdout};

const OVERLAY_CONFIG: &str = r#"{
  "packages": {
    "impmal": {
      "repo": "moo-man/ImpMal-FoundryVTT",
      "patch": ["scripts"],
      "overlay": {
        "reorder": [
          { "table": "actions", "order": ["run", "aim"], "rest": "drop" },
          { "table": "skills", "order": ["melee"] }
        ],
        "labels": {
          "meleeTypes.power": "IMPMAL.PowerWeapon",
          "vehicleActions.ram.name": "Taranowanie"
        },
        "templates": [
          { "path": "item/weapon", "patches": [{ "from": "Damage", "to": "Obrażenia" }] }
        ]
      }
    }
  }
}"#;

#[test]
fn test_build_writes_overlay_and_manifest() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".patchsetrc.json", OVERLAY_CONFIG)?;
    test.write_file("src/module.json", r#"{"id": "impmal-pl"}"#)?;

    let output = test.subcommand("build").output()?;

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("impmal: overlay.json"));
    assert!(out.contains("✓ Built 1 package into dist"));

    assert_eq!(test.read_file("dist/module.json")?, r#"{"id": "impmal-pl"}"#);
    let overlay: Value = serde_json::from_str(&test.read_file("dist/impmal/overlay.json")?)?;
    assert_eq!(overlay["labels"]["meleeTypes.power"], "IMPMAL.PowerWeapon");
    assert_eq!(overlay["reorder"][0]["table"], "actions");

    Ok(())
}

#[test]
fn test_build_without_manifest_warns() -> Result<()> {
    let test = CliTest::with_config()?;

    let output = test.subcommand("build").output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("warning: module manifest not found"));
    assert!(test.root().join("dist/impmal/overlay.json").exists());

    Ok(())
}

#[test]
fn test_build_applies_overlay_to_host_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".patchsetrc.json", OVERLAY_CONFIG)?;
    test.write_file(
        "host.json",
        r#"{
  "actions": { "aim": {}, "charge": {}, "run": {} },
  "skills": { "athletics": {}, "melee": {} },
  "meleeTypes": { "power": "Power" }
}"#,
    )?;

    let output = test
        .subcommand("build")
        .args(["--host-config", "host.json"])
        .output()?;

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("config.json (2 tables reordered, 1 label set)"));
    assert!(out.contains("warning: 'vehicleActions' does not exist  overlay"));
    assert!(out.contains("= target: vehicleActions.ram.name"));

    let config: Value = serde_json::from_str(&test.read_file("dist/impmal/config.json")?)?;
    let actions: Vec<&String> = config["actions"].as_object().unwrap().keys().collect();
    assert_eq!(actions, vec!["run", "aim"]);
    let skills: Vec<&String> = config["skills"].as_object().unwrap().keys().collect();
    assert_eq!(skills, vec!["melee", "athletics"]);
    assert_eq!(config["meleeTypes"]["power"], "IMPMAL.PowerWeapon");

    Ok(())
}

#[test]
fn test_build_patches_templates() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".patchsetrc.json", OVERLAY_CONFIG)?;
    test.write_file(
        "system/systems/impmal/templates/item/weapon.hbs",
        "<label>Damage</label>",
    )?;

    let output = test
        .subcommand("build")
        .args(["--templates-dir", "system"])
        .output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("impmal: overlay.json, 1 template"));
    assert_eq!(
        test.read_file("dist/impmal/templates/item/weapon.hbs")?,
        "<label>Obrażenia</label>"
    );

    Ok(())
}

#[test]
fn test_build_assigns_tables_and_array_labels() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".patchsetrc.json",
        r#"{
  "packages": {
    "impmal": {
      "repo": "moo-man/ImpMal-FoundryVTT",
      "overlay": {
        "tables": { "vehicleCategory": { "wheeled": "Kołowy", "walker": "Kroczący" } },
        "labels": {
          "vehicleActions.evasiveManeuvers.effect.system.scriptData.0.label": "Test Pilota",
          "vehicleActions.evasiveManeuvers.effect.system.scriptData.3.label": "Brak"
        }
      }
    }
  }
}"#,
    )?;
    test.write_file(
        "host.json",
        r#"{
  "vehicleActions": {
    "evasiveManeuvers": {
      "effect": { "system": { "scriptData": [{ "label": "Piloting Test" }] } }
    }
  }
}"#,
    )?;

    let output = test
        .subcommand("build")
        .args(["--host-config", "host.json"])
        .output()?;

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("config.json (1 table replaced, 0 tables reordered, 1 label set)"));
    assert!(out.contains(
        "warning: 'vehicleActions.evasiveManeuvers.effect.system.scriptData.3' does not exist  overlay"
    ));

    let config: Value = serde_json::from_str(&test.read_file("dist/impmal/config.json")?)?;
    assert_eq!(config["vehicleCategory"]["wheeled"], "Kołowy");
    let data = &config["vehicleActions"]["evasiveManeuvers"]["effect"]["system"]["scriptData"];
    assert_eq!(data[0]["label"], "Test Pilota");
    assert_eq!(data.as_array().map(Vec::len), Some(1));

    Ok(())
}
