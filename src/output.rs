use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::WriterBuilder;

use crate::parser::extract::ProviderRecord;

/// `<file-stem>_<category>.csv`, with spaces and hyphens replaced by underscores.
pub fn job_csv_path(output_dir: &Path, file: &Path, category: &str) -> PathBuf {
    output_dir.join(format!(
        "{}_{}.csv",
        sanitize(&file_stem(file)),
        sanitize(category)
    ))
}

pub fn dump_path(output_dir: &Path, file: &Path) -> PathBuf {
    output_dir.join(format!("combined_text_{}.txt", file_stem(file)))
}

fn file_stem(file: &Path) -> String {
    file.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn sanitize(name: &str) -> String {
    name.replace([' ', '-'], "_")
}

/// Write records as CSV. The header comes from the record's serde names; null fields
/// are empty cells.
pub fn write_csv(path: &Path, records: &[ProviderRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = WriterBuilder::new().from_writer(file);

    for r in records {
        writer.serialize(r)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::extract::{parse_unit, ParseDefaults};

    #[test]
    fn csv_file_names_follow_directory_convention() {
        let out = Path::new("output");
        let file = Path::new("input/NY-EP-Provider-Directory-Bronx 1.pdf");
        assert_eq!(
            job_csv_path(out, file, "Mental Health"),
            PathBuf::from("output/NY_EP_Provider_Directory_Bronx_1_Mental_Health.csv")
        );
        assert_eq!(
            dump_path(out, file),
            PathBuf::from("output/combined_text_NY-EP-Provider-Directory-Bronx 1.txt")
        );
    }

    const HEADER: [&str; 26] = [
        "Provider_Category",
        "Provider_Specialty",
        "Provider_FIRST_Name",
        "PROVIDER_MIDDLE_NAME",
        "PROVIDER_LAST_Name",
        "Degree",
        "Gender",
        "Organization",
        "Group_Name",
        "Provider_ID",
        "NPI",
        "License_Number",
        "Address_Line",
        "City",
        "State",
        "County",
        "ZIP",
        "Phone",
        "Languages",
        "ADA_Features",
        "Days_Hours",
        "Accepting_New_Patients",
        "Hospital_Affiliations",
        "Age_Group",
        "Areas_of_Expertise",
        "Web_Address",
    ];

    #[test]
    fn header_follows_directory_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.csv");
        write_csv(&path, &[ProviderRecord::default(), ProviderRecord::default()]).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, HEADER);
        let rows: Vec<_> = reader.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), HEADER.len());
        assert_eq!(&rows[0][18], "[]");
    }

    #[test]
    fn writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.csv");
        let record = parse_unit(
            "Doe, John, DO, (M) W B Languages Spoken: Provider: English, Spanish",
            &ParseDefaults::new("PCP", "NY"),
        )
        .unwrap();
        write_csv(&path, &[record]).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), HEADER.len());
        let row = reader.records().next().unwrap().unwrap();
        let get = |name: &str| {
            let idx = headers.iter().position(|h| h == name).unwrap();
            row[idx].to_string()
        };
        assert_eq!(get("PROVIDER_LAST_Name"), "Doe");
        assert_eq!(get("PROVIDER_MIDDLE_NAME"), "");
        assert_eq!(get("Languages"), r#"["English","Spanish"]"#);
        assert_eq!(get("ADA_Features"), r#"["Board Certified","Wheelchair"]"#);
        assert_eq!(get("Accepting_New_Patients"), "false");
        assert_eq!(get("State"), "NY");
    }

    #[test]
    fn save_text_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("dump.txt");
        save_text(&path, "unit one\n\nunit two").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "unit one\n\nunit two");
    }
}
