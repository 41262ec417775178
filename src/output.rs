use std::path::{Path, PathBuf};
use std::str::FromStr;

use eyre::{Result, WrapErr, bail, eyre};
use log::{debug, info, warn};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use rust_xlsxwriter::Workbook;

use crate::{CaptionRecord, Field};

/// Longest string a spreadsheet cell accepts
const MAX_CELL_CHARS: usize = 32_767;

const EMPTY_HTML: &str = "<html><body><p>No records.</p></body></html>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Excel,
    Xml,
    Html,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::Json,
        ExportFormat::Csv,
        ExportFormat::Excel,
        ExportFormat::Xml,
        ExportFormat::Html,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "excel",
            ExportFormat::Xml => "xml",
            ExportFormat::Html => "html",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Excel => "xlsx",
            other => other.name(),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ExportFormat {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| eyre!("unsupported export format: {s}"))
    }
}

/// Split a comma-separated format list, dropping empty entries
pub fn split_formats(list: &str) -> Vec<String> {
    list.split(',')
        .map(|f| f.trim().to_lowercase())
        .filter(|f| !f.is_empty())
        .collect()
}

/// Resolve requested format names, dropping unknown ones and duplicates
pub fn parse_formats<S: AsRef<str>>(names: &[S]) -> Result<Vec<ExportFormat>> {
    if names.is_empty() {
        debug!("No export formats requested, defaulting to json");
        return Ok(vec![ExportFormat::Json]);
    }

    let mut formats = Vec::new();
    for name in names {
        match name.as_ref().parse::<ExportFormat>() {
            Ok(format) if !formats.contains(&format) => formats.push(format),
            Ok(_) => {}
            Err(_) => warn!("Ignoring unsupported format: {}", name.as_ref()),
        }
    }

    if formats.is_empty() {
        bail!("no valid export formats specified");
    }
    Ok(formats)
}

/// Write one `{base_name}.{ext}` file per valid format, returning the paths written
pub fn export<S: AsRef<str>>(
    records: &[CaptionRecord],
    output_dir: &Path,
    base_name: &str,
    formats: &[S],
) -> Result<Vec<PathBuf>> {
    let formats = parse_formats(formats)?;
    write_exports(records, output_dir, base_name, &formats)
}

/// Write already-resolved formats; creates `output_dir` if needed
pub fn write_exports(
    records: &[CaptionRecord],
    output_dir: &Path,
    base_name: &str,
    formats: &[ExportFormat],
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)
        .wrap_err_with(|| format!("failed to create output directory {}", output_dir.display()))?;

    let mut written = Vec::with_capacity(formats.len());
    for &format in formats {
        let path = output_dir.join(format!("{base_name}.{}", format.extension()));
        let contents = match format {
            ExportFormat::Json => render_json(records)?.into_bytes(),
            ExportFormat::Csv => render_csv(records)?,
            ExportFormat::Excel => render_excel(records)?,
            ExportFormat::Xml => render_xml(records)?.into_bytes(),
            ExportFormat::Html => render_html(records).into_bytes(),
        };

        std::fs::write(&path, contents).wrap_err_with(|| format!("failed to write {}", path.display()))?;
        if records.is_empty() {
            warn!("No records to write; created empty {format} export at {}", path.display());
        } else {
            info!("Wrote {format} to {}", path.display());
        }
        written.push(path);
    }

    Ok(written)
}

/// Pretty-printed JSON array; keywords stay a list
pub fn render_json(records: &[CaptionRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Header of sorted column names then one row per record; nothing at all when empty
pub fn render_csv(records: &[CaptionRecord]) -> Result<Vec<u8>> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CaptionRecord::COLUMNS.map(Field::name))?;
    for record in records {
        writer.write_record(CaptionRecord::COLUMNS.map(|c| record.cell(c)))?;
    }

    writer
        .into_inner()
        .map_err(|e| eyre!("failed to flush CSV output: {}", e.error()))
}

/// Single worksheet, header row then one row per record; blank sheet when empty
pub fn render_excel(records: &[CaptionRecord]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    if !records.is_empty() {
        for (col, field) in CaptionRecord::FIELDS.into_iter().enumerate() {
            worksheet.write_string(0, col as u16, field.name())?;
        }
        for (row, record) in records.iter().enumerate() {
            for (col, field) in CaptionRecord::FIELDS.into_iter().enumerate() {
                worksheet.write_string(row as u32 + 1, col as u16, truncate_cell(record.cell(field)))?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn truncate_cell(mut value: String) -> String {
    if let Some((idx, _)) = value.char_indices().nth(MAX_CELL_CHARS) {
        debug!("Truncating spreadsheet cell of {} bytes", value.len());
        value.truncate(idx);
    }
    value
}

/// `<videos>` root with one `<record>` per record, one child per field
pub fn render_xml(records: &[CaptionRecord]) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.get_mut().push(b'\n');

    if records.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new("videos")))?;
    } else {
        writer.write_event(Event::Start(BytesStart::new("videos")))?;
        for record in records {
            writer.write_event(Event::Start(BytesStart::new("record")))?;
            for field in CaptionRecord::FIELDS {
                let value = record.cell(field);
                writer.write_event(Event::Start(BytesStart::new(field.name())))?;
                writer.write_event(Event::Text(BytesText::new(&value)))?;
                writer.write_event(Event::End(BytesEnd::new(field.name())))?;
            }
            writer.write_event(Event::End(BytesEnd::new("record")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("videos")))?;
    }

    Ok(String::from_utf8(writer.into_inner())?)
}

/// Standalone HTML page with one table row per record
pub fn render_html(records: &[CaptionRecord]) -> String {
    if records.is_empty() {
        return EMPTY_HTML.to_string();
    }

    let mut rows = Vec::with_capacity(records.len() + 1);
    let header_cells: String = CaptionRecord::COLUMNS
        .iter()
        .map(|c| format!("<th>{c}</th>"))
        .collect();
    rows.push(format!("<tr>{header_cells}</tr>"));

    for record in records {
        let cells: String = CaptionRecord::COLUMNS
            .iter()
            .map(|&c| format!("<td>{}</td>", html_escape::encode_text(&record.cell(c))))
            .collect();
        rows.push(format!("<tr>{cells}</tr>"));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>YouTube Subtitles Export</title>
</head>
<body>
  <h1>YouTube Subtitles Export</h1>
  <table border='1' cellspacing='0' cellpadding='4'>
{}
</table>
</body>
</html>
"#,
        rows.join("\n")
    )
}
