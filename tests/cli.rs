use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use rust_xlsxwriter::Workbook;
use tempfile::tempdir;

fn cartera_stats(args: &[&str], input: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cartera-stats"))
        .args(args)
        .arg("--input")
        .arg(input)
        .env_remove("RUST_LOG")
        .output()
        .expect("binary runs")
}

fn write_listing(path: &Path) {
    let rows = [
        ["NIF", "Producto", "Mot.Anulación"],
        ["A1", "Auto", "Impago"],
        ["A1", "Vida", "Impago"],
        ["B2", "Auto", "Error"],
    ];
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (row_idx, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col as u16, *value)
                .expect("cell written");
        }
    }
    workbook.save(path).expect("listing saved");
}

fn assert_failed_cleanly(output: &Output) {
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "stdout: {:?}", output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("error: "), "stderr: {stderr}");
}

#[test]
fn missing_input_exits_with_error_and_no_report() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("no-existe.xlsx");

    let output = cartera_stats(&["report"], &path);

    assert_failed_cleanly(&output);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("input file not found"), "stderr: {stderr}");
}

#[test]
fn non_workbook_input_exits_with_error_and_no_report() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("cartera.xlsx");
    fs::write(&path, "NIF;Producto\nA1;Auto\n").expect("text file written");

    let output = cartera_stats(&["report"], &path);

    assert_failed_cleanly(&output);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Excel read error"), "stderr: {stderr}");
}

#[test]
fn report_prints_motives_and_cross_selling() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("cartera.xlsx");
    write_listing(&path);

    let output = cartera_stats(&["report"], &path);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    let expected = "{\n  \"Error\": 1,\n  \"Impago\": 2\n}\n\
                    Clientes mono-producto: 1\n\
                    Clientes multi-producto: 1\n\
                    Total clientes: 2\n\
                    Ratio Multi-producto: 50.00%\n";
    assert_eq!(stdout, expected);
}

#[test]
fn columns_lists_first_sheet_headers() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("cartera.xlsx");
    write_listing(&path);

    let output = cartera_stats(&["columns"], &path);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    assert_eq!(stdout, "NIF\nProducto\nMot.Anulación\n");
}
