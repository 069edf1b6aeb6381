use std::process::Command;

const KILLALL: &str = "/usr/bin/killall";
const DOCK_PROCESS: &str = "Dock";

pub trait ProcessTerminator {
    /// Terminates every process called `process_name` and blocks until that is done.
    fn terminate(&self, process_name: &str);
}

/// Terminates processes through `killall`.
pub struct Killall;

impl ProcessTerminator for Killall {
    fn terminate(&self, process_name: &str) {
        info!("Running {} {}", KILLALL, process_name);
        match Command::new(KILLALL).arg(process_name).status() {
            Ok(status) if status.success() => {}
            Ok(status) => warn!("{} {} exited with {}", KILLALL, process_name, status),
            Err(err) => warn!("Could not run {}: {}", KILLALL, err),
        }
    }
}

/// Kills the Dock so launchd restarts it and it rereads desktoppicture.db.
pub fn restart(terminator: &dyn ProcessTerminator) {
    terminator.terminate(DOCK_PROCESS);
}
