/*!
 * Simulator Configuration
 *
 * Sizing for the scheduler and memory engines plus the request server address.
 * Defaults come from `core::limits`; `from_env` layers `SIM_*` overrides on top.
 */

use super::errors::KernelError;
use super::limits::{
    DEFAULT_LISTEN_ADDR, DEFAULT_MAX_PROCESSES, DEFAULT_OS_MEMORY, DEFAULT_PROCESSOR_COUNT,
    DEFAULT_TOTAL_MEMORY,
};
use super::types::{KernelResult, Size};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const ENV_PROCESSORS: &str = "SIM_PROCESSORS";
pub const ENV_MAX_PROCESSES: &str = "SIM_MAX_PROCESSES";
pub const ENV_TOTAL_MEMORY: &str = "SIM_TOTAL_MEMORY";
pub const ENV_OS_MEMORY: &str = "SIM_OS_MEMORY";
pub const ENV_LISTEN_ADDR: &str = "SIM_LISTEN_ADDR";

/// Simulator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulatorConfig {
    pub processor_count: usize,
    pub max_processes: usize,
    pub total_memory: Size,
    pub os_reserved: Size,
    pub listen_addr: String,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            processor_count: DEFAULT_PROCESSOR_COUNT,
            max_processes: DEFAULT_MAX_PROCESSES,
            total_memory: DEFAULT_TOTAL_MEMORY,
            os_reserved: DEFAULT_OS_MEMORY,
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
        }
    }
}

impl SimulatorConfig {
    /// Defaults overridden by any `SIM_*` variables present in the environment
    pub fn from_env() -> KernelResult<Self> {
        let mut config = Self::default();

        if let Some(v) = env_parse(ENV_PROCESSORS)? {
            config.processor_count = v;
        }
        if let Some(v) = env_parse(ENV_MAX_PROCESSES)? {
            config.max_processes = v;
        }
        if let Some(v) = env_parse(ENV_TOTAL_MEMORY)? {
            config.total_memory = v;
        }
        if let Some(v) = env_parse(ENV_OS_MEMORY)? {
            config.os_reserved = v;
        }
        if let Ok(addr) = std::env::var(ENV_LISTEN_ADDR) {
            config.listen_addr = addr;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_processors(mut self, processor_count: usize) -> Self {
        self.processor_count = processor_count;
        self
    }

    pub fn with_max_processes(mut self, max_processes: usize) -> Self {
        self.max_processes = max_processes;
        self
    }

    pub fn with_memory(mut self, total_memory: Size, os_reserved: Size) -> Self {
        self.total_memory = total_memory;
        self.os_reserved = os_reserved;
        self
    }

    /// Reject sizings the engines cannot run with
    pub fn validate(&self) -> KernelResult<()> {
        if self.processor_count == 0 {
            return Err(KernelError::Configuration(
                "processor count must be at least 1".to_string(),
            ));
        }
        if self.max_processes == 0 {
            return Err(KernelError::Configuration(
                "max processes must be at least 1".to_string(),
            ));
        }
        if self.os_reserved >= self.total_memory {
            return Err(KernelError::Configuration(format!(
                "reserved OS memory ({}) leaves nothing allocatable out of {} bytes",
                self.os_reserved, self.total_memory
            )));
        }
        Ok(())
    }
}

fn env_parse<T: FromStr>(key: &str) -> KernelResult<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| {
                KernelError::Configuration(format!("{}={:?}: {}", key, raw, e))
            }),
        Err(_) => Ok(None),
    }
}
