#[cfg(test)]
mod tests {
    use {
        crate::{
            classifier::{classify, classify_amplitude, classify_label, DerivedState},
            sample::{Reading, Sample},
            session::Session,
        },
        chrono::Utc,
    };

    /// Label and amplitude classification agree for service-shaped readings
    #[test]
    fn test_classifier_paths_agree_on_service_readings() {
        let readings = [
            (12.4, "Patient is relaxed(Theta wave dominant)"),
            (40.0, "Patient is relaxed(Theta wave dominant)"),
            (52.1, "Patient is engaged(Aplha wave dominant)"),
            (60.0, "Patient is engaged(Aplha wave dominant)"),
            (77.7, "Seizure detected(When a immedidate spike is there more than 60 amplitude)"),
        ];

        for (i, (amplitude, feedback)) in readings.iter().enumerate() {
            let sample = Sample::from_reading(
                i as u64,
                Reading {
                    amplitude: *amplitude,
                    feedback: feedback.to_string(),
                },
                Utc::now(),
            );
            assert_eq!(classify(&sample), classify_label(&sample.feedback_label));
        }
    }

    /// Window, results and export stay consistent across a long session
    #[test]
    fn test_stores_stay_consistent_over_long_session() {
        let mut session = Session::new();
        let gen = session.begin_run();
        let amplitudes: Vec<f64> = (0..100).map(|i| ((i * 37) % 100) as f64).collect();

        for &amplitude in &amplitudes {
            let ticket = session.issue_ticket(gen).unwrap();
            session.apply(
                ticket,
                Reading {
                    amplitude,
                    feedback: String::new(),
                },
                Utc::now(),
            );
        }

        assert_eq!(session.window().values(), amplitudes[70..].to_vec());

        let newest_first: Vec<f64> = session.results().entries().map(|s| s.amplitude).collect();
        let expected: Vec<f64> = amplitudes[90..].iter().rev().copied().collect();
        assert_eq!(newest_first, expected);

        let csv = session.export().export().unwrap();
        assert_eq!(csv.lines().count(), 101);

        // Stats come from the window only, never the export log
        let stats = session.stats();
        assert_eq!(stats.count, 30);
        let seizure = amplitudes[70..]
            .iter()
            .filter(|a| classify_amplitude(**a) == DerivedState::Seizure)
            .count() as u64;
        assert_eq!(stats.states.seizure, seizure);
        // Blank labels were filled with the canonical wording
        assert!(session
            .results()
            .entries()
            .all(|s| classify_label(&s.feedback_label) == s.state()));
    }
}
