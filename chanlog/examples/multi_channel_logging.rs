use std::sync::{Arc, mpsc::channel};

use chanlog::{
    FileBackend, Severity, StdoutBackend, context_config, log_info, log_warn, logf_debug,
};

fn main() {
    let context = context_config()
        .with_global_level(Severity::Debug)
        .build();

    // main channel logs to stdout
    let main = context.get_logger::<StdoutBackend>("main");
    log_info!(main, "Hello, world!");

    // worker channels log to their own files
    let (handles, senders): (Vec<_>, Vec<_>) = (0..5)
        .map(|i| {
            let (sender, receiver) = channel::<&'static str>();
            let context = Arc::clone(&context);
            let handle = std::thread::spawn(move || {
                let worker = context.get_logger_with(&format!("worker{i}"), |_| {
                    FileBackend::file(std::env::temp_dir().join(format!("chanlog_worker_{i}.log")))
                        .expect("Unable to create log file")
                });
                for message in receiver {
                    log_warn!(worker, "MESSAGE RECEIVED: ", message);
                    logf_debug!(worker, "hidden once the channel is raised: {message}");
                }
                worker.backend().flush();
            });
            (handle, sender)
        })
        .unzip();

    context.set_channel_level("worker0", Severity::Warning);
    for sender in senders {
        sender.send("Hello, world!").unwrap();
    }
    for handle in handles {
        handle.join().unwrap();
    }

    for i in 0..5 {
        let path = std::env::temp_dir().join(format!("chanlog_worker_{i}.log"));
        let content = std::fs::read_to_string(path).unwrap();
        let last = content.trim_end().lines().last().unwrap_or("");
        log_info!(main, "last line of worker", i, " is:\n\t", last);
    }
    log_info!(main, "channels: ", context.channels().join(", "));
}
