use std::path::Path;

use csv::WriterBuilder;
use tracing::debug;

use crate::libreg::tools::error::Result;
use crate::libreg::tools::model::SheetTable;

/// Writes every row of `table` as one CSV record, header row included.
pub fn write_csv(path: &Path, table: &SheetTable) -> Result<()> {
    let mut writer = WriterBuilder::new().flexible(true).from_path(path)?;

    for row in &table.rows {
        writer.write_record(row)?;
    }

    writer.flush()?;
    debug!(rows = table.rows.len(), path = %path.display(), "CSV written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn quotes_fields_that_need_it() {
        let table = SheetTable {
            sheet_name: "List1".into(),
            rows: vec![
                vec!["Název".into(), "Adresa".into()],
                vec!["Knihovna, Brno".into(), "Kobližná 4".into()],
                vec!["Řekl \"ano\"".into(), String::new()],
            ],
        };
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        write_csv(&path, &table).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "Název,Adresa\n\"Knihovna, Brno\",Kobližná 4\n\"Řekl \"\"ano\"\"\",\n"
        );
    }
}
