use std::io::Write;

use chanlog_lite::{CapacityPolicy, Severity, lite_config, logf_crit, logf_error, logf_info};

fn main() {
    let manager = lite_config()
        .with_policy(CapacityPolicy::Fixed(2))
        .with_global_level(Severity::Info)
        .with_root_channel("Root")
        .init(|_, args| {
            let _ = writeln!(std::io::stdout().lock(), "{args}");
        })
        .expect("fixed table of two channels");

    let root = manager
        .root_logger()
        .expect("root channel registered at init");
    logf_info!(
        root,
        "table holds {} of {} channels",
        manager.len(),
        manager.capacity()
    );

    let network = manager
        .get_logger("network")
        .expect("second slot is free");
    manager.set_logger_level("network", Severity::Error);
    logf_info!(network, "filtered out by the channel level");
    logf_error!(network, "connection reset after {} retries", 3);

    if manager.get_logger("storage").is_none() {
        logf_crit!(root, "no room left for channel {:?}", "storage");
    }
    manager.deinit();
}
