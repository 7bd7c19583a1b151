use indicatif::{ProgressBar, ProgressStyle};
use std::{future::Future, time::Duration};

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}...")
            .expect("incorrect progress bar format string")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Awaits `fut` while a spinner runs on stderr.
pub async fn waiting<F: Future>(message: &'static str, fut: F) -> F::Output {
    let pb = spinner(message);
    let output = fut.await;
    pb.finish_and_clear();
    output
}
