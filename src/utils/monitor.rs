use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessesToUpdate, System};

#[derive(Debug, Clone)]
pub struct FrameStats {
    pub frames: u64,
    pub active_frames: u64,
    pub frames_per_second: f64,
    pub elapsed_time: Duration,
    pub process: Option<ProcessStats>,
}

#[derive(Debug, Clone, Copy)]
pub struct ProcessStats {
    pub cpu_usage: f32,
    pub memory_usage_mb: u64,
    pub peak_memory_mb: u64,
}

/// Counts processed frames and, when enabled, samples the process's CPU and memory.
pub struct FrameMonitor {
    start_time: Instant,
    frames: u64,
    active_frames: u64,
    log_every: u64,
    #[cfg(feature = "cli")]
    system: Option<(System, Pid)>,
    peak_memory_mb: u64,
}

impl FrameMonitor {
    pub fn new(enabled: bool) -> Self {
        #[cfg(not(feature = "cli"))]
        if enabled {
            tracing::warn!("Process monitoring requires the `cli` feature; only frame counts are tracked");
        }

        Self {
            start_time: Instant::now(),
            frames: 0,
            active_frames: 0,
            log_every: 300,
            #[cfg(feature = "cli")]
            system: if enabled {
                sysinfo::get_current_pid().ok().map(|pid| (System::new(), pid))
            } else {
                None
            },
            peak_memory_mb: 0,
        }
    }

    pub fn with_log_interval(mut self, frames: u64) -> Self {
        self.log_every = frames.max(1);
        self
    }

    pub fn record_frame(&mut self, active: bool) {
        self.frames += 1;
        if active {
            self.active_frames += 1;
        }
        if self.frames % self.log_every == 0 {
            self.log_stats("Progress");
        }
    }

    pub fn is_enabled(&self) -> bool {
        #[cfg(feature = "cli")]
        {
            self.system.is_some()
        }
        #[cfg(not(feature = "cli"))]
        {
            false
        }
    }

    #[cfg(feature = "cli")]
    fn sample_process(&mut self) -> Option<ProcessStats> {
        let (system, pid) = self.system.as_mut()?;
        system.refresh_processes(ProcessesToUpdate::Some(&[*pid]), true);
        let process = system.process(*pid)?;
        let memory_mb = process.memory() / 1024 / 1024;
        self.peak_memory_mb = self.peak_memory_mb.max(memory_mb);
        Some(ProcessStats {
            cpu_usage: process.cpu_usage(),
            memory_usage_mb: memory_mb,
            peak_memory_mb: self.peak_memory_mb,
        })
    }

    #[cfg(not(feature = "cli"))]
    fn sample_process(&mut self) -> Option<ProcessStats> {
        None
    }

    pub fn get_stats(&mut self) -> FrameStats {
        let elapsed_time = self.start_time.elapsed();
        let secs = elapsed_time.as_secs_f64();
        FrameStats {
            frames: self.frames,
            active_frames: self.active_frames,
            frames_per_second: if secs > 0.0 { self.frames as f64 / secs } else { 0.0 },
            elapsed_time,
            process: self.sample_process(),
        }
    }

    pub fn log_stats(&mut self, phase: &str) {
        let stats = self.get_stats();
        match stats.process {
            Some(process) => tracing::info!(
                "📊 {} - Frames: {} ({} active), {:.1} fps, CPU: {:.1}%, Memory: {}MB, Peak: {}MB",
                phase,
                stats.frames,
                stats.active_frames,
                stats.frames_per_second,
                process.cpu_usage,
                process.memory_usage_mb,
                process.peak_memory_mb
            ),
            None => tracing::debug!(
                "📊 {} - Frames: {} ({} active), {:.1} fps",
                phase,
                stats.frames,
                stats.active_frames,
                stats.frames_per_second
            ),
        }
    }

    pub fn log_final_stats(&mut self) {
        let stats = self.get_stats();
        tracing::info!(
            "📊 Final Stats - Frames: {} ({} active), Total Time: {:?}, Peak Memory: {}MB",
            stats.frames,
            stats.active_frames,
            stats.elapsed_time,
            self.peak_memory_mb
        );
    }
}

impl Default for FrameMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}
