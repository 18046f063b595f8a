//! Passenger manifest CSV ingestion
//!
//! The manifest has a header row; only `PassengerId`, `Survived`, `Pclass`,
//! `Sex` and `Age` are read and any other column is ignored. Empty cells
//! become missing values, which [`PassengerRow::into_record`] then accepts
//! for `Age` and rejects for everything else.

use std::{fs::File, io, path::Path};

use anyhow::Context;
use lifeboat_analysis::passenger::{self, PassengerRecord, PassengerRow, class_name_from_code};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ManifestRow {
    #[serde(rename = "PassengerId")]
    passenger_id: Option<u32>,
    #[serde(rename = "Survived")]
    survived: Option<i64>,
    #[serde(rename = "Pclass")]
    class_code: Option<i64>,
    #[serde(rename = "Sex")]
    sex: Option<String>,
    #[serde(rename = "Age")]
    age: Option<f64>,
}

impl ManifestRow {
    fn into_passenger_row(self) -> PassengerRow {
        if let Some(code) = self.class_code.filter(|code| !(1..=3).contains(code)) {
            tracing::warn!(
                passenger_id = ?self.passenger_id,
                code,
                "unknown passenger class code, keeping it as its own class"
            );
        }
        PassengerRow {
            passenger_id: self.passenger_id,
            class_name: self.class_code.map(class_name_from_code),
            sex: self.sex,
            age: self.age,
            survived: self.survived,
        }
    }
}

pub(crate) fn read_manifest_file<P>(path: P) -> anyhow::Result<Vec<PassengerRecord>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open manifest file: {}", path.display()))?;
    let passengers = read_manifest(io::BufReader::new(file))
        .with_context(|| format!("Failed to load manifest: {}", path.display()))?;
    tracing::info!(
        manifest = %path.display(),
        passengers = passengers.len(),
        "loaded passenger manifest"
    );
    Ok(passengers)
}

/// Parses and validates a manifest.
///
/// Rows are numbered from 1, counting data rows only.
pub(crate) fn read_manifest<R>(reader: R) -> anyhow::Result<Vec<PassengerRecord>>
where
    R: io::Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut passengers = Vec::new();
    for (i, result) in reader.deserialize::<ManifestRow>().enumerate() {
        let row = i + 1;
        let manifest_row = result.with_context(|| format!("Failed to parse manifest row {row}"))?;
        let record = manifest_row.into_passenger_row().into_record(row)?;
        passengers.push(record);
    }

    passenger::validate_manifest(&passengers)?;
    Ok(passengers)
}

#[cfg(test)]
mod tests {
    use lifeboat_analysis::{age_group::AgeGroup, passenger::ValidationError};

    use super::*;

    const MANIFEST: &str = "\
PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked
1,0,3,\"Braund, Mr. Owen Harris\",male,22,1,0,A/5 21171,7.25,,S
2,1,1,\"Cumings, Mrs. John Bradley (Florence Briggs Thayer)\",female,38,1,0,PC 17599,71.2833,C85,C
3,1,3,\"Heikkinen, Miss. Laina\",female,26,0,0,STON/O2. 3101282,7.925,,S
6,0,3,\"Moran, Mr. James\",male,,0,0,330877,8.4583,,Q
8,0,3,\"Palsson, Master. Gosta Leonard\",male,2,3,1,349909,21.075,,S
10,1,2,\"Nasser, Mrs. Nicholas (Adele Achem)\",female,14,1,0,237736,30.0708,,C
79,1,2,\"Caldwell, Master. Alden Gates\",male,0.83,0,2,248738,29,,S
";

    #[test]
    fn test_reads_manifest_columns() {
        let passengers = read_manifest(MANIFEST.as_bytes()).unwrap();
        assert_eq!(passengers.len(), 7);

        let first = &passengers[0];
        assert_eq!(first.passenger_id, 1);
        assert_eq!(first.class_name, "Third");
        assert_eq!(first.sex, "male");
        assert_eq!(first.age, Some(22.0));
        assert_eq!(first.survived, 0);

        assert_eq!(passengers[1].class_name, "First");
        assert_eq!(passengers[5].class_name, "Second");
        assert_eq!(passengers[6].age, Some(0.83));
        assert_eq!(passengers[6].age_group(), AgeGroup::Child);
    }

    #[test]
    fn test_empty_age_is_missing() {
        let passengers = read_manifest(MANIFEST.as_bytes()).unwrap();
        let moran = passengers.iter().find(|p| p.passenger_id == 6).unwrap();
        assert_eq!(moran.age, None);
        assert_eq!(moran.age_group(), AgeGroup::Unknown);
    }

    #[test]
    fn test_missing_required_field_names_row() {
        let input = "PassengerId,Survived,Pclass,Sex,Age\n1,0,3,male,22\n2,1,1,,38\n";
        let err = read_manifest(input.as_bytes()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::MissingField {
                row: 2,
                field: "sex"
            })
        );
    }

    #[test]
    fn test_missing_column_is_missing_field() {
        let input = "PassengerId,Pclass,Sex,Age\n1,3,male,22\n";
        let err = read_manifest(input.as_bytes()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::MissingField {
                row: 1,
                field: "survived"
            })
        );
    }

    #[test]
    fn test_unknown_class_code_is_kept() {
        let input = "PassengerId,Survived,Pclass,Sex,Age\n1,1,4,female,30\n";
        let passengers = read_manifest(input.as_bytes()).unwrap();
        assert_eq!(passengers[0].class_name, "Class 4");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let input = "PassengerId,Survived,Pclass,Sex,Age\n1,2,3,male,22\n";
        let err = read_manifest(input.as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ValidationError>(),
            Some(ValidationError::InvalidSurvived { value: 2, .. })
        ));

        let input = "PassengerId,Survived,Pclass,Sex,Age\n1,0,3,male,-4\n";
        let err = read_manifest(input.as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ValidationError>(),
            Some(ValidationError::InvalidAge { .. })
        ));

        let input = "PassengerId,Survived,Pclass,Sex,Age\n1,0,3,male,abc\n";
        assert!(read_manifest(input.as_bytes()).is_err());
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let input = "PassengerId,Survived,Pclass,Sex,Age\n1,0,3,male,22\n1,1,1,female,38\n";
        let err = read_manifest(input.as_bytes()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::DuplicatePassengerId { passenger_id: 1 })
        );
    }
}
