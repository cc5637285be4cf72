use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("barcode-labels").unwrap();
    cmd.env_remove("BARCODE_LABELS_OUTPUT_DIR").env_remove("RUST_LOG");
    cmd
}

#[test]
fn single_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .args(["single", "123", "--symbology", "code128", "-o"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Código gerado com sucesso"));
    assert!(dir.path().join("00000123.png").exists());
}

#[test]
fn single_reads_stdin() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .args(["single", "--symbology", "interleaved2of5", "-o"])
        .arg(dir.path())
        .write_stdin("4\n5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Código gerado com sucesso"));
    assert!(dir.path().join("00000004.png").exists());
    assert!(dir.path().join("00000005.png").exists());
}

#[test]
fn batch_writes_pdf() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .args(["batch", "--text", "1\n2\n3\n4\n5", "-o"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("barcodes-"));
    let pdfs: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("barcodes-") && name.ends_with(".pdf"))
        .collect();
    assert_eq!(pdfs.len(), 1);
}

#[test]
fn batch_json_report() {
    let dir = tempfile::tempdir().unwrap();
    let output = cmd()
        .args(["batch", "--text", "7\n8", "--json", "-o"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["kind"], "pdf");
    assert_eq!(report["symbology"], "code128");
    assert_eq!(report["codes"], serde_json::json!(["00000007", "00000008"]));
    assert_eq!(report["pages"], 1);
}

#[test]
fn single_code_batch_uses_batch_message() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .args(["batch", "--text", "5", "-o"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Códigos gerados com sucesso"));
}

#[test]
fn odd_interleaved_single_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .args(["single", "-s", "interleaved2of5", "-o"])
        .arg(dir.path())
        .write_stdin("12\n123456789\n")
        .assert()
        .failure();
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn output_dir_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .env("BARCODE_LABELS_OUTPUT_DIR", dir.path())
        .args(["single", "9"])
        .assert()
        .success();
    assert!(dir.path().join("00000009.png").exists());
}

#[test]
fn empty_input_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .args(["batch", "--text", "", "-o"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("O campo códigos está vazio!"));
}

#[test]
fn missing_destination_is_reported() {
    cmd()
        .args(["single", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Por favor, selecione onde você deseja salvar o arquivo!",
        ));
}

#[test]
fn invalid_code_aborts_batch() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .args(["batch", "--text", "1\n2x\n3", "-o"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Código inválido"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn lenient_splits_on_separators() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .args(["single", "1,2", "--lenient", "-o"])
        .arg(dir.path())
        .assert()
        .success();
    assert!(dir.path().join("00000001.png").exists());
    assert!(dir.path().join("00000002.png").exists());
}

#[test]
fn odd_interleaved_batch_is_render_failure() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .args(["batch", "--text", "123456789", "-s", "interleaved2of5", "-o"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Ocorreu um erro ao gerar os códigos de barras!",
        ));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
