use std::sync::OnceLock;
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

const TICK_INTERVAL: Duration = Duration::from_millis(100);

pub struct SpinnerHandle {
    pub spinner: ProgressBar,
    tx: Sender<String>,
}

impl SpinnerHandle {
    pub fn send_to_queue(&self, message: String) {
        let _ = self.tx.send(message);
    }

    pub fn finish_and_clear(&self) {
        self.spinner.finish_and_clear();
    }
}

pub(crate) static SPINNER: OnceLock<SpinnerHandle> = OnceLock::new();

pub fn get_spinner() -> &'static SpinnerHandle {
    SPINNER.get_or_init(init_spinner)
}

fn init_spinner() -> SpinnerHandle {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]));
    }
    pb.enable_steady_tick(TICK_INTERVAL);

    let (tx, rx) = mpsc::channel::<String>();
    let pb_clone = pb.clone();

    // Completions can arrive far faster than a terminal redraws, so only the
    // newest queued message is shown.
    thread::spawn(move || {
        while let Ok(mut msg) = rx.recv() {
            if pb_clone.is_finished() {
                break;
            }
            while let Ok(newer_msg) = rx.try_recv() {
                msg = newer_msg;
            }
            pb_clone.set_message(msg);
        }
    });

    SpinnerHandle { spinner: pb, tx }
}

pub fn report_progress(done: usize, total: usize) {
    get_spinner().send_to_queue(format!(
        "Grabbed {} of {} targets...",
        done.to_string().green().bold(),
        total.to_string().bold()
    ));
}

pub fn finish() {
    if let Some(handle) = SPINNER.get() {
        handle.finish_and_clear();
    }
}

/// Routes log lines around the spinner so they do not tear its line.
pub struct SpinnerWriter;

impl std::io::Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let msg = String::from_utf8_lossy(buf);
        let msg = msg.trim_end();
        match SPINNER.get() {
            Some(handle) => handle.spinner.suspend(|| eprintln!("{msg}")),
            None => eprintln!("{msg}"),
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
