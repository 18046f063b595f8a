use std::{
    fs::File,
    io::{self, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;

/// A buffered report file.
#[derive(Debug)]
pub struct Output {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl Output {
    pub fn save_json<T>(value: &T, path: &Path) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::open(path)?;
        output.write_json(value)?;
        tracing::info!(output = %output.display_path(), "wrote JSON report");
        Ok(())
    }

    /// Writes `header` followed by one CSV record per row.
    ///
    /// The header is written even when `rows` is empty.
    pub fn save_csv<I, T>(path: &Path, header: &[&str], rows: I) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = T>,
        T: serde::Serialize,
    {
        let mut output = Output::open(path)?;
        let count = write_csv(&mut output, header, rows)
            .with_context(|| format!("Failed to write CSV to {}", output.display_path()))?;
        tracing::info!(output = %output.display_path(), rows = count, "wrote CSV export");
        Ok(())
    }

    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output {
            writer: BufWriter::new(file),
            path: path.to_owned(),
        })
    }

    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Writes an explicit header and serialized rows, returning the row count.
///
/// Rows are written without serde-derived headers, so `header` must list the
/// row fields in declaration order.
pub fn write_csv<W, I, T>(writer: W, header: &[&str], rows: I) -> csv::Result<usize>
where
    W: io::Write,
    I: IntoIterator<Item = T>,
    T: serde::Serialize,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(header)?;
    let mut count = 0;
    for row in rows {
        writer.serialize(row)?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

/// Formats a rate in `[0, 1]` as a percentage.
pub fn percent(rate: f64) -> String {
    format!("{:.1}%", 100.0 * rate)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use lifeboat_analysis::{
        passenger::PassengerRecord,
        scorer::{AdvantageRanking, ScoredPassenger},
    };

    use super::*;

    fn ranking() -> AdvantageRanking {
        let passengers = [
            (1, "Third", "male", Some(20.0), 1),
            (2, "Third", "male", Some(22.0), 1),
            (3, "Third", "male", Some(25.0), 1),
            (4, "Third", "male", Some(60.0), 0),
            (5, "Third", "male", Some(65.0), 0),
        ]
        .into_iter()
        .map(|(id, class, sex, age, survived)| {
            PassengerRecord::new(id, class, sex, age, survived).unwrap()
        })
        .collect::<Vec<_>>();
        AdvantageRanking::from_passengers(&passengers).unwrap()
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("lifeboat-{}-{name}", std::process::id()))
    }

    fn header_of(path: &Path) -> Vec<String> {
        let mut reader = csv::Reader::from_path(path).unwrap();
        reader.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn test_field_names_match_serde_header() {
        let ranking = ranking();
        let mut writer = csv::Writer::from_writer(vec![]);
        writer.serialize(&ranking.passengers[0]).unwrap();
        let data = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let header = data.lines().next().unwrap();
        assert_eq!(header, ScoredPassenger::FIELD_NAMES.join(","));
    }

    #[test]
    fn test_csv_export_round_trips() {
        let ranking = ranking();
        let path = temp_path("scored.csv");
        Output::save_csv(&path, &ScoredPassenger::FIELD_NAMES, &ranking.passengers).unwrap();

        assert_eq!(header_of(&path), ScoredPassenger::FIELD_NAMES);
        let rows = csv::Reader::from_path(&path)
            .unwrap()
            .deserialize::<ScoredPassenger>()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        let ranks = rows.iter().map(|p| p.advantage_rank).collect::<Vec<_>>();
        assert_eq!(ranks, vec![1, 1, 1, 4, 4]);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_empty_csv_export_keeps_header() {
        let path = temp_path("empty.csv");
        Output::save_csv(
            &path,
            &ScoredPassenger::FIELD_NAMES,
            std::iter::empty::<&ScoredPassenger>(),
        )
        .unwrap();

        let data = fs::read_to_string(&path).unwrap();
        assert_eq!(data.lines().count(), 1);
        assert_eq!(header_of(&path), ScoredPassenger::FIELD_NAMES);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_csv_counts_rows() {
        let ranking = ranking();
        let mut buf = vec![];
        let count = write_csv(
            &mut buf,
            &ScoredPassenger::FIELD_NAMES,
            ranking.passengers.iter().take(2),
        )
        .unwrap();
        assert_eq!(count, 2);
        assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 3);
    }

    #[test]
    fn test_json_report_is_written() {
        let ranking = ranking();
        let path = temp_path("ranking.json");
        Output::save_json(&ranking, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["passengers"].as_array().unwrap().len(), 5);
        assert_eq!(value["excluded_without_age"], 0);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.5), "50.0%");
        assert_eq!(percent(0.3838), "38.4%");
    }
}
