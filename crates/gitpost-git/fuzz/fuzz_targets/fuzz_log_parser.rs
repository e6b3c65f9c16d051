#![no_main]

use gitpost_git::{parse_log, parse_numstat_line};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        let commits = parse_log(raw, true);
        for commit in &commits {
            let files = commit.files.as_ref().map_or(0, Vec::len);
            assert!(files <= raw.lines().count());
        }
        for line in raw.lines() {
            let _ = parse_numstat_line(line);
        }
    }
});
