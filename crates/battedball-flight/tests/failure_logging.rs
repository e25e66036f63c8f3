// Failed runs are reported through the `log` facade at warn level.
// Kept in its own test binary: the capturing logger is process-global.

use std::sync::Mutex;

use battedball_flight::{compute_trajectory, Handedness, LaunchParameters, SimulationConfig};
use log::{Level, LevelFilter, Log, Metadata, Record};

struct Capture {
    warnings: Mutex<Vec<String>>,
}

impl Log for Capture {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.warnings.lock().unwrap().push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture { warnings: Mutex::new(Vec::new()) };

fn warnings_during(f: impl FnOnce()) -> Vec<String> {
    CAPTURE.warnings.lock().unwrap().clear();
    f();
    std::mem::take(&mut *CAPTURE.warnings.lock().unwrap())
}

#[test]
fn rejected_and_failed_runs_warn() {
    log::set_logger(&CAPTURE).unwrap();
    log::set_max_level(LevelFilter::Warn);
    let config = SimulationConfig::default();

    let stopped = LaunchParameters::new(0.0, 25.0, 0.0, Handedness::Right);
    let warnings = warnings_during(|| {
        assert!(compute_trajectory(&config, &stopped).is_err());
    });
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert!(warnings[0].contains("exit speed"), "{warnings:?}");

    let mut broken = config;
    broken.integration.dt = -0.01;
    let launch = LaunchParameters::new(95.0, 25.0, 0.0, Handedness::Right);
    let warnings = warnings_during(|| {
        assert!(compute_trajectory(&broken, &launch).is_err());
    });
    assert_eq!(warnings.len(), 1, "{warnings:?}");

    let mut short = config;
    short.integration.max_steps = 10;
    let warnings = warnings_during(|| {
        assert!(compute_trajectory(&short, &launch).is_err());
    });
    assert_eq!(warnings.len(), 1, "{warnings:?}");

    let warnings = warnings_during(|| {
        assert!(compute_trajectory(&config, &launch).is_ok());
    });
    assert!(warnings.is_empty(), "{warnings:?}");
}
