use std::{
    io::{BufRead, BufReader, Write},
    net::TcpListener,
    thread,
};

use anyhow::Result;

use crate::{CliTest, stdout};

const LOCAL: &str = r#"{
  "IMPMAL": {
    "Skill": { "Athletics": "Atletyka", "Awareness": "Czujność" },
    "Local": "Tylko lokalnie"
  }
}"#;

const REMOTE: &str = r#"{"IMPMAL":{"Skill":{"Athletics":"Atletyka (Zr)","Awareness":"Czujność"},"Extra":"Nowy"}}"#;

/// Answer a single HTTP request with `body` and return the document URL.
fn serve_json(body: &'static str) -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let url = format!("http://{}/pl.json", listener.local_addr()?);

    thread::spawn(move || {
        let Ok((stream, _)) = listener.accept() else {
            return;
        };
        let mut reader = BufReader::new(&stream);
        let mut line = String::new();
        while reader.read_line(&mut line).is_ok_and(|n| n > 0) && line != "\r\n" {
            line.clear();
        }
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        let _ = (&stream).write_all(response.as_bytes());
    });

    Ok(url)
}

#[test]
fn test_sync_writes_merged_translations() -> Result<()> {
    let url = serve_json(REMOTE)?;
    let test = CliTest::new()?;
    test.write_file(
        ".patchsetrc.json",
        &format!(
            r#"{{ "translations": {{ "localFile": "lang/pl.json", "remoteUrl": "{}" }} }}"#,
            url
        ),
    )?;
    test.write_file("lang/pl.json", LOCAL)?;

    let output = test.subcommand("sync-translations").output()?;

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("IMPMAL.Skill.Athletics\n  Old: Atletyka\n  New: Atletyka (Zr)"));
    assert!(!out.contains("Awareness"));
    assert!(out.contains("Updated 1 translation in"));
    assert!(out.contains("lang/pl.json"));

    assert_eq!(
        test.read_file("lang/pl.json")?,
        r#"{
  "IMPMAL": {
    "Skill": {
      "Athletics": "Atletyka (Zr)",
      "Awareness": "Czujność"
    },
    "Local": "Tylko lokalnie"
  }
}"#
    );

    Ok(())
}

#[test]
fn test_sync_dry_run_leaves_file_unchanged() -> Result<()> {
    let url = serve_json(REMOTE)?;
    let test = CliTest::with_config()?;
    test.write_file("pl.json", LOCAL)?;

    let output = test
        .subcommand("sync-translations")
        .args(["--dry-run", "--local-file", "pl.json", "--remote-url", &url])
        .output()?;

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("IMPMAL.Skill.Athletics\n  Old: Atletyka\n  New: Atletyka (Zr)"));
    assert!(out.contains("Would update 1 translation in pl.json"));
    assert!(out.contains("Run without --dry-run to write them."));
    assert_eq!(test.read_file("pl.json")?, LOCAL);

    Ok(())
}

#[test]
fn test_sync_up_to_date() -> Result<()> {
    let url = serve_json(r#"{"IMPMAL":{"Skill":{"Athletics":"Atletyka"}}}"#)?;
    let test = CliTest::with_config()?;
    test.write_file("pl.json", LOCAL)?;

    let output = test
        .subcommand("sync-translations")
        .args(["--local-file", "pl.json", "--remote-url", &url])
        .output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains(&format!("pl.json is up to date with {}", url)));
    assert_eq!(test.read_file("pl.json")?, LOCAL);

    Ok(())
}
