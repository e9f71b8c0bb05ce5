#![no_main]

use libfuzzer_sys::fuzz_target;
use sickday::config::ReportConfig;
use sickday::dataset::AbsenceDataset;
use sickday::report::build_report;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must either parse or fail with a DatasetError
    if let Ok(dataset) = AbsenceDataset::from_reader(data) {
        // Whatever parses has to go through both comparisons without panicking
        let _ = build_report(&dataset, &ReportConfig::default());
    }
});
