//! Whole-document scenarios, through the library and through the binary.

use std::collections::BTreeSet;
use std::process::Command;

use camino::Utf8PathBuf;
use fontprune::{FontStyle, FontTriplet, PruneOptions, prune_document, triplet_rows, workspace};

const NEWSLETTER: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<style type="text/css">
@font-face {
  font-family: 'Montserrat';
  font-weight: 400;
  src: url(https://fonts.example/montserrat-400.woff2) format('woff2');
}

@font-face {
  font-family: 'Montserrat';
  font-weight: 700;
  src: url(https://fonts.example/montserrat-700.woff2) format('woff2');
}

@font-face {
  font-family: 'Montserrat';
  font-weight: 400;
  font-style: italic;
  src: url(https://fonts.example/montserrat-400i.woff2) format('woff2');
}



@font-face {
  font-family: 'Lobster';
  src: url(https://fonts.example/lobster.woff2) format('woff2');
}
</style>
<style>
.headline { font-family: "Playfair Display", Georgia, serif; font-weight: 900; }
.footer { font-family: sans-serif; }
@font-face {
  font-family: "Playfair Display";
  font-weight: 900;
  src: url(https://fonts.example/playfair-900.woff2) format('woff2');
}
@font-face {
  font-family: "Playfair Display";
  font-weight: 400;
  src: url(https://fonts.example/playfair-400.woff2) format('woff2');
}
</style>
</head>
<body>
<table><tr>
<td style="font-family: Montserrat, Arial, sans-serif; color: #333">
  <p>Hello <span style="font-weight:700">there</span></p>
</td>
</tr></table>
<h1 class="headline">News</h1>
<p class="footer">Bye</p>
</body>
</html>
"#;

fn t(family: &str, weight: u16, style: FontStyle) -> FontTriplet {
    FontTriplet::new(family, weight, style)
}

#[test_log::test]
fn test_newsletter_keeps_only_rendered_variants() {
    let outcome = prune_document(NEWSLETTER, &PruneOptions::default());

    assert_eq!(
        outcome.kept,
        BTreeSet::from([
            t("Montserrat", 400, FontStyle::Normal),
            t("Montserrat", 700, FontStyle::Normal),
            t("Playfair Display", 900, FontStyle::Normal),
        ])
    );
    assert_eq!(
        outcome.removed,
        BTreeSet::from([
            t("Lobster", 400, FontStyle::Normal),
            t("Montserrat", 400, FontStyle::Italic),
            t("Playfair Display", 400, FontStyle::Normal),
        ])
    );
    assert_eq!(outcome.regions, 2);
    assert_eq!(outcome.blocks_removed, 3);

    assert!(!outcome.html.contains("lobster.woff2"));
    assert!(!outcome.html.contains("montserrat-400i.woff2"));
    assert!(!outcome.html.contains("playfair-400.woff2"));
    assert_eq!(outcome.html.matches("mso-font-alt: 'Arial';").count(), 3);
    assert!(!outcome.html.contains("\n\n\n"));
}

#[test_log::test]
fn test_newsletter_body_is_byte_identical() {
    let outcome = prune_document(NEWSLETTER, &PruneOptions::default());

    let body_start = NEWSLETTER.find("</head>").unwrap();
    let new_body_start = outcome.html.find("</head>").unwrap();
    assert_eq!(&outcome.html[new_body_start..], &NEWSLETTER[body_start..]);

    let head_end = NEWSLETTER.find("<style").unwrap();
    assert_eq!(&outcome.html[..head_end], &NEWSLETTER[..head_end]);
}

#[test_log::test]
fn test_newsletter_second_run_is_stable() {
    let first = prune_document(NEWSLETTER, &PruneOptions::default());
    let second = prune_document(&first.html, &PruneOptions::default());

    assert_eq!(second.html, first.html);
    assert!(second.removed.is_empty());
    assert_eq!(second.kept, first.kept);
}

#[test_log::test]
fn test_report_rows() {
    let outcome = prune_document(NEWSLETTER, &PruneOptions::default());
    assert_eq!(
        triplet_rows(&outcome.kept),
        vec![
            "Montserrat | 400 | normal",
            "Montserrat | 700 | normal",
            "Playfair Display | 900 | normal",
        ]
    );
}

fn temp_workspace() -> (tempfile::TempDir, Utf8PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
    (dir, root)
}

#[test_log::test]
fn test_binary_writes_processed_file_and_log() {
    let (_dir, root) = temp_workspace();
    std::fs::write(root.join("Newsletter.HTML"), NEWSLETTER).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_fontprune"))
        .arg(root.as_str())
        .arg("--log")
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Montserrat | 700 | normal"));
    assert!(stdout.contains("Newsletter.processed.HTML"));

    let processed = std::fs::read_to_string(root.join("Newsletter.processed.HTML")).unwrap();
    assert_eq!(processed, prune_document(NEWSLETTER, &PruneOptions::default()).html);

    let log = std::fs::read_to_string(root.join("Newsletter.fonts.log")).unwrap();
    assert!(log.starts_with("=== RUN "));
    assert!(log.contains("HTML file: Newsletter.HTML"));
    assert!(log.contains("  - Lobster | 400 | normal"));

    // the original is untouched
    assert_eq!(std::fs::read_to_string(root.join("Newsletter.HTML")).unwrap(), NEWSLETTER);
}

#[test_log::test]
fn test_binary_skip_processed_ignores_previous_output() {
    let (_dir, root) = temp_workspace();
    std::fs::write(root.join("mail.html"), NEWSLETTER).unwrap();

    for _ in 0..2 {
        let status = Command::new(env!("CARGO_BIN_EXE_fontprune"))
            .args([root.as_str(), "--skip-processed"])
            .status()
            .unwrap();
        assert!(status.success());
    }

    let entries: Vec<String> = std::fs::read_dir(&root)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries.len(), 2, "{entries:?}");
    assert!(!root.join("mail.processed.processed.html").exists());
}

#[test_log::test]
fn test_binary_processes_a_lone_processed_file() {
    let (_dir, root) = temp_workspace();
    std::fs::write(root.join("mail.processed.html"), NEWSLETTER).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_fontprune"))
        .arg(root.as_str())
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");
    assert!(!String::from_utf8_lossy(&output.stdout).contains("No .html file found"));

    let processed =
        std::fs::read_to_string(root.join("mail.processed.processed.html")).unwrap();
    assert_eq!(processed, prune_document(NEWSLETTER, &PruneOptions::default()).html);
}

#[test_log::test]
fn test_binary_reports_none_when_every_face_is_unused() {
    let (_dir, root) = temp_workspace();
    std::fs::write(
        root.join("mail.html"),
        "<style>@font-face{font-family:Lobster;}</style><p>plain</p>",
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_fontprune"))
        .arg(root.as_str())
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("(none)"), "{stdout}");
    assert!(stdout.contains("Lobster | 400 | normal"));

    let processed = std::fs::read_to_string(root.join("mail.processed.html")).unwrap();
    assert_eq!(processed, "<style></style><p>plain</p>");
}

#[test_log::test]
fn test_binary_without_html_is_informational() {
    let (_dir, root) = temp_workspace();
    std::fs::write(root.join("readme.txt"), "nothing here").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_fontprune"))
        .arg(root.as_str())
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No .html file found"));
    assert_eq!(std::fs::read_dir(&root).unwrap().count(), 1);
}

#[test_log::test]
fn test_binary_dry_run_writes_nothing() {
    let (_dir, root) = temp_workspace();
    std::fs::write(root.join("mail.html"), NEWSLETTER).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_fontprune"))
        .args([root.as_str(), "--dry-run", "--log"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{output:?}");
    assert!(!root.join("mail.processed.html").exists());
    assert!(!root.join("mail.fonts.log").exists());
}

#[test_log::test]
fn test_binary_reads_fallback_from_config() {
    let (_dir, root) = temp_workspace();
    std::fs::create_dir_all(root.join(".config")).unwrap();
    std::fs::write(root.join(".config/fontprune.yaml"), "fallback_font: Verdana\n").unwrap();
    std::fs::write(root.join("mail.html"), NEWSLETTER).unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_fontprune"))
        .arg(root.as_str())
        .status()
        .unwrap();
    assert!(status.success());

    let processed = std::fs::read_to_string(root.join("mail.processed.html")).unwrap();
    assert_eq!(processed.matches("mso-font-alt: 'Verdana';").count(), 3);
}

#[test_log::test]
fn test_workspace_helpers_round_trip_a_document() {
    let (_dir, root) = temp_workspace();
    let input = root.join("mail.html");
    std::fs::write(&input, NEWSLETTER).unwrap();

    let found = workspace::find_first_html(&root, false).unwrap().unwrap();
    assert_eq!(found, input);

    let html = workspace::read_document(&found).unwrap();
    let outcome = prune_document(&html, &PruneOptions::default());
    let output = workspace::processed_path(&found);
    workspace::write_atomic(&output, &outcome.html).unwrap();

    assert_eq!(output, root.join("mail.processed.html"));
    assert_eq!(std::fs::read_to_string(&output).unwrap(), outcome.html);
}
