#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::Instant;
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

/// Per-phase process statistics for long fetch runs. Disabled unless the
/// operator asks for it.
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    system: Mutex<System>,
    pid: Pid,
    start_time: Instant,
    peak_memory_mb: Mutex<u64>,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let mut system = System::new_with_specifics(RefreshKind::everything());
        let pid = sysinfo::get_current_pid().expect("Failed to get current PID");
        system.refresh_all();

        Self {
            system: Mutex::new(system),
            pid,
            start_time: Instant::now(),
            peak_memory_mb: Mutex::new(0),
            enabled,
        }
    }

    pub fn log_stats(&self, phase: &str) {
        if !self.enabled {
            return;
        }

        let Ok(mut system) = self.system.lock() else {
            return;
        };
        system.refresh_all();

        let Some(process) = system.process(self.pid) else {
            return;
        };
        let memory_mb = process.memory() / 1024 / 1024;
        let cpu_usage = process.cpu_usage();

        let peak = {
            let Ok(mut peak) = self.peak_memory_mb.lock() else {
                return;
            };
            if memory_mb > *peak {
                *peak = memory_mb;
            }
            *peak
        };

        tracing::info!(
            "📊 {} - CPU: {:.1}%, Memory: {}MB, Peak: {}MB, Time: {:?}",
            phase,
            cpu_usage,
            memory_mb,
            peak,
            self.start_time.elapsed()
        );
    }

    pub fn log_final_stats(&self) {
        if !self.enabled {
            return;
        }

        let peak = self.peak_memory_mb.lock().map(|p| *p).unwrap_or(0);
        tracing::info!(
            "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
            self.start_time.elapsed(),
            peak
        );
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(feature = "cli")]
impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// No-op monitor when built without the CLI feature
#[cfg(not(feature = "cli"))]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_stats(&self, _phase: &str) {}

    pub fn log_final_stats(&self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
