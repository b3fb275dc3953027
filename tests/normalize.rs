use std::fs;

use libreg_tools::ToolError;
use libreg_tools::normalize::normalize_file;
use tempfile::tempdir;

#[test]
fn csv_file_is_converted_with_line_endings_intact() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("knihovny.csv");
    let output = temp_dir.path().join("knihovny-ascii.csv");
    fs::write(
        &input,
        "Název;Obec;Poznámka\r\n\
         Knihovna Jiřího Mahena;Brno;\u{201E}hlavní\u{201C} pobočka\r\n\
         Místní knihovna;Dolní\u{00A0}Lhota;otevřeno 9\u{2013}17 \u{2026}\r\n",
    )
    .unwrap();

    let stats = normalize_file(&input, &output).expect("conversion succeeds");

    let written = fs::read(&output).unwrap();
    assert!(written.is_ascii());
    assert_eq!(
        String::from_utf8(written).unwrap(),
        "Nazev;Obec;Poznamka\r\n\
         Knihovna Jiriho Mahena;Brno;\"hlavni\" pobocka\r\n\
         Mistni knihovna;Dolni Lhota;otevreno 9-17 ...\r\n"
    );
    assert_eq!(stats.lines, 3);
    assert_eq!(stats.changed_lines, 3);
}

#[test]
fn existing_output_is_truncated() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("in.txt");
    let output = temp_dir.path().join("out.txt");
    fs::write(&input, "krátký\n").unwrap();
    fs::write(&output, "a much longer previous output\n").unwrap();

    normalize_file(&input, &output).expect("conversion succeeds");

    assert_eq!(fs::read_to_string(&output).unwrap(), "kratky\n");
}

#[test]
fn invalid_utf8_input_is_an_encoding_error() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("latin2.txt");
    let output = temp_dir.path().join("out.txt");
    fs::write(&input, b"Brno\nP\xf8\xedbram\n").unwrap();

    let err = normalize_file(&input, &output).unwrap_err();

    assert!(matches!(err, ToolError::Encoding { line: 2, .. }));
}
