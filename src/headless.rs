//! Headless runner: poll, log, and export without a terminal UI

use {
    crate::{
        classifier::classify_amplitude,
        config::Config,
        poller::Controller,
        session::Session,
    },
    chrono::Utc,
    tokio::time::interval,
};

/// Run until Ctrl-C or until a fetch failure stops the controller, then
/// write the CSV export (if anything was collected).
pub async fn run_headless(
    controller: Controller,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = controller.session();
    controller.start().await;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut timer = interval(config.poll_interval);
    let mut cursor = 0;

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                log::info!("🛑 Ctrl-C received, stopping");
                break;
            }
            _ = timer.tick() => {
                let session = session.read().await;
                for line in new_sample_lines(&session, &mut cursor) {
                    log::info!("{}", line);
                }

                if !session.is_running() {
                    if let Some(error) = session.last_error() {
                        log::error!("❌ {}", error);
                    }
                    break;
                }
            }
        }
    }

    controller.stop().await;
    controller.settle().await;

    let session = session.read().await;
    match session
        .export()
        .write_csv(&config.export_dir, Utc::now().date_naive())?
    {
        Some(path) => log::info!("💾 Session written to {}", path.display()),
        None => log::info!("No samples collected, nothing exported"),
    }

    Ok(())
}

/// Log lines for samples accepted since `cursor`, followed by window stats
fn new_sample_lines(session: &Session, cursor: &mut usize) -> Vec<String> {
    let records = session.export().records();
    if *cursor >= records.len() {
        return Vec::new();
    }

    let mut lines: Vec<String> = records[*cursor..]
        .iter()
        .map(|record| {
            format!(
                "📈 {} amplitude={:.2} state={} feedback={}",
                record.human_time,
                record.amplitude,
                classify_amplitude(record.amplitude).label(),
                record.feedback
            )
        })
        .collect();
    *cursor = records.len();

    let stats = session.stats();
    lines.push(format!(
        "📊 window n={} mean={:.2} min={:.2} max={:.2} relaxed={} engaged={} seizure={}",
        stats.count,
        stats.mean,
        stats.min,
        stats.max,
        stats.states.relaxed,
        stats.states.engaged,
        stats.states.seizure
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::Reading;

    #[test]
    fn test_new_sample_lines_advance_cursor() {
        let mut session = Session::new();
        let mut cursor = 0;
        assert!(new_sample_lines(&session, &mut cursor).is_empty());

        let gen = session.begin_run();
        for amplitude in [35.0, 72.5] {
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

        let lines = new_sample_lines(&session, &mut cursor);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("state=Seizure"));
        assert!(lines[2].contains("n=2"));
        assert_eq!(cursor, 2);

        assert!(new_sample_lines(&session, &mut cursor).is_empty());
    }
}
