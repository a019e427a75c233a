//! Export helpers for CSV and JSON artifacts.

pub mod telemetry {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    const HEADER: &str = "time_s,drag_acceleration_km_s2,speed_km_s,apogee_km,perigee_km";

    /// Create a writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
        if path == Path::new("-") {
            return Ok(Box::new(BufWriter::new(io::stdout())));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    /// Write the telemetry CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// CSV row emitted per accepted integration step.
    #[derive(Debug, Clone, Copy)]
    pub struct Record {
        pub time_s: f64,
        pub drag_acceleration_km_s2: f64,
        pub speed_km_s: f64,
        pub apogee_km: f64,
        pub perigee_km: f64,
    }

    impl Record {
        /// Serialize the record to CSV, matching the header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{:.3},{:.6e},{:.6},{:.3},{:.3}",
                self.time_s,
                self.drag_acceleration_km_s2,
                self.speed_km_s,
                self.apogee_km,
                self.perigee_km,
            )
        }
    }

    /// Write a header followed by every record.
    pub fn write_all<'a, I>(writer: &mut dyn Write, records: I) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        write_header(writer)?;
        for record in records {
            record.write_to(writer)?;
        }
        writer.flush()
    }
}

pub mod summary {
    use decay_core::constants::SECONDS_PER_DAY;
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::fs::{self, File};
    use std::io;
    use std::path::{Path, PathBuf};

    /// Compact per-step sample kept in the JSON summary.
    #[derive(Debug, Clone, Copy, Serialize)]
    pub struct Sample {
        pub time_s: f64,
        pub apogee_km: f64,
        pub perigee_km: f64,
        pub speed_km_s: f64,
    }

    /// Run-level description of a decay simulation.
    #[derive(Debug, Serialize)]
    pub struct Summary<'a> {
        pub scenario: &'a str,
        pub spacecraft: &'a str,
        pub terminal_state: &'a str,
        pub initial_apogee_km: f64,
        pub initial_perigee_km: f64,
        pub inclination_deg: f64,
        pub mass_kg: f64,
        pub drag_coefficient: f64,
        pub area_m2: f64,
        pub time_step_s: f64,
        pub initial_period_s: f64,
        pub elapsed_s: f64,
        pub elapsed_days: f64,
        pub steps: u64,
        pub entry_interface_s: Option<f64>,
        pub telemetry_available: bool,
    }

    #[derive(Serialize)]
    struct SummarySidecar<'a> {
        #[serde(flatten)]
        summary: &'a Summary<'a>,
        daily: Vec<DailyAggregate>,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Serialize)]
    pub struct DailyAggregate {
        pub day_index: usize,
        pub time_s: f64,
        pub apogee_km: f64,
        pub perigee_km: f64,
        pub speed_km_s: f64,
    }

    /// Write `<stem>_summary.json` next to `output`, returning the path written.
    ///
    /// Runs longer than a day also carry one aggregate per elapsed day.
    pub fn write_sidecar(
        output: &Path,
        summary: &Summary<'_>,
        samples: &[Sample],
    ) -> io::Result<PathBuf> {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("decay");
        let path = parent.join(format!("{}_summary.json", stem));

        let daily = if summary.elapsed_s >= SECONDS_PER_DAY {
            aggregate_daily(samples)
        } else {
            Vec::new()
        };
        let sidecar = SummarySidecar { summary, daily };
        to_writer_pretty(File::create(&path)?, &sidecar)?;
        Ok(path)
    }

    /// Keep the last sample of each elapsed day.
    pub fn aggregate_daily(samples: &[Sample]) -> Vec<DailyAggregate> {
        let mut daily: Vec<DailyAggregate> = Vec::new();
        for sample in samples {
            let day_index = (sample.time_s / SECONDS_PER_DAY).floor() as usize;
            let aggregate = DailyAggregate {
                day_index,
                time_s: sample.time_s,
                apogee_km: sample.apogee_km,
                perigee_km: sample.perigee_km,
                speed_km_s: sample.speed_km_s,
            };
            match daily.last_mut() {
                Some(last) if last.day_index == day_index => *last = aggregate,
                _ => daily.push(aggregate),
            }
        }
        daily
    }
}

#[cfg(test)]
mod tests {
    use super::summary::{Sample, aggregate_daily};
    use super::telemetry::{Record, write_all};

    fn sample(time_s: f64, apogee_km: f64) -> Sample {
        Sample {
            time_s,
            apogee_km,
            perigee_km: apogee_km - 10.0,
            speed_km_s: 7.8,
        }
    }

    #[test]
    fn daily_aggregate_keeps_last_sample_per_day() {
        let samples = [
            sample(0.0, 400.0),
            sample(43_200.0, 399.0),
            sample(86_400.0, 398.0),
            sample(172_000.0, 396.0),
        ];
        let daily = aggregate_daily(&samples);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].day_index, 0);
        assert_eq!(daily[0].apogee_km, 399.0);
        assert_eq!(daily[1].day_index, 1);
        assert_eq!(daily[1].time_s, 172_000.0);
    }

    #[test]
    fn telemetry_rows_follow_header() {
        let record = Record {
            time_s: 60.0,
            drag_acceleration_km_s2: 1.5e-8,
            speed_km_s: 7.8,
            apogee_km: 149.5,
            perigee_km: 149.5,
        };
        let mut buffer = Vec::new();
        write_all(&mut buffer, [&record]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("time_s,drag_acceleration_km_s2,speed_km_s,apogee_km,perigee_km")
        );
        assert_eq!(lines.next(), Some("60.000,1.500000e-8,7.800000,149.500,149.500"));
    }
}
