use crate::fetch::{AcquiredFrom, TargetReport};

#[derive(Debug, Default, PartialEq)]
pub struct Metrics {
    pub count: usize,
    pub skipped: usize,
    pub downloaded: usize,
    pub placeholders: usize,
    pub exhausted: usize,
}

impl Metrics {
    pub fn from_reports(reports: &[TargetReport]) -> Self {
        let mut m = Metrics::default();
        for report in reports {
            m.count += 1;
            match report.from {
                AcquiredFrom::Existing => m.skipped += 1,
                AcquiredFrom::Placeholder => m.placeholders += 1,
                AcquiredFrom::Exhausted => m.exhausted += 1,
                _ => m.downloaded += 1,
            }
        }
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn report(from: AcquiredFrom) -> TargetReport {
        TargetReport {
            name: "x".to_owned(),
            path: PathBuf::from("x.svg"),
            from,
        }
    }

    #[test]
    fn test_from_reports() {
        let reports = vec![
            report(AcquiredFrom::Existing),
            report(AcquiredFrom::Override),
            report(AcquiredFrom::Monochrome),
            report(AcquiredFrom::Placeholder),
            report(AcquiredFrom::Exhausted),
        ];
        assert_eq!(
            Metrics {
                count: 5,
                skipped: 1,
                downloaded: 2,
                placeholders: 1,
                exhausted: 1,
            },
            Metrics::from_reports(&reports)
        );
    }
}
