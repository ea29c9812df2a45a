//! Process environment scoping for configuration tests.

use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, PoisonError};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Holds the environment lock and the values to put back on drop.
pub struct ScopedEnv {
    saved: Vec<(&'static str, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl ScopedEnv {
    /// Applies `changes`, where `None` unsets the variable.
    pub fn apply(changes: &[(&'static str, Option<&str>)]) -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let saved = changes
            .iter()
            .map(|&(key, value)| {
                let before = env::var_os(key);
                write_var(key, value.map(OsString::from));
                (key, before)
            })
            .collect();
        Self { saved, _lock: lock }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        while let Some((key, value)) = self.saved.pop() {
            write_var(key, value);
        }
    }
}

fn write_var(key: &str, value: Option<OsString>) {
    // SAFETY: every mutation happens while `ENV_LOCK` is held.
    unsafe {
        match value {
            Some(text) => env::set_var(key, text),
            None => env::remove_var(key),
        }
    }
}
