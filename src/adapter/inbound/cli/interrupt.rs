//! Ctrl-C handling.
//!
//! Terminal prompts block the thread that asked, so SIGINT is watched from
//! a runtime task instead. An interrupt while a prompt is open is the user
//! cancelling: the terminal is put back the way the prompt found it,
//! "Cancelled by user" is printed and the process exits 0. Anywhere else
//! the process exits 130.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use dialoguer::console::Term;
use tracing::debug;

use super::output;

/// Conventional status for a process stopped by SIGINT.
const INTERRUPTED_EXIT: i32 = 130;

static OPEN_PROMPTS: AtomicUsize = AtomicUsize::new(0);
static SAVED_TERMINAL: Mutex<Option<terminal::Saved>> = Mutex::new(None);

/// What a Ctrl-C means at the moment it arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    /// A prompt is waiting for input.
    CancelPrompt,
    /// Work is in progress.
    Abort,
}

impl Interrupt {
    #[must_use]
    pub fn current() -> Self {
        if OPEN_PROMPTS.load(Ordering::SeqCst) > 0 {
            Self::CancelPrompt
        } else {
            Self::Abort
        }
    }

    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::CancelPrompt => 0,
            Self::Abort => INTERRUPTED_EXIT,
        }
    }
}

/// Marks a prompt as open until dropped.
///
/// The first scope to open records the terminal attributes so they can be
/// restored if the prompt is interrupted with echo switched off.
pub struct PromptScope {
    _private: (),
}

impl PromptScope {
    pub fn enter() -> Self {
        if OPEN_PROMPTS.fetch_add(1, Ordering::SeqCst) == 0 {
            if let Ok(mut saved) = SAVED_TERMINAL.lock() {
                *saved = terminal::save();
            }
        }
        Self { _private: () }
    }
}

impl Drop for PromptScope {
    fn drop(&mut self) {
        if OPEN_PROMPTS.fetch_sub(1, Ordering::SeqCst) == 1 {
            if let Ok(mut saved) = SAVED_TERMINAL.lock() {
                *saved = None;
            }
        }
    }
}

/// Handle Ctrl-C for the rest of the process.
///
/// Must be called from within the runtime. On Unix the handler is in
/// place before this returns.
pub fn watch() {
    #[cfg(unix)]
    let mut sigint = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())
    {
        Ok(sigint) => sigint,
        Err(e) => {
            debug!(error = %e, "cannot listen for Ctrl-C");
            return;
        }
    };

    tokio::spawn(async move {
        #[cfg(unix)]
        let received = sigint.recv().await.is_some();
        #[cfg(not(unix))]
        let received = tokio::signal::ctrl_c().await.is_ok();
        if !received {
            return;
        }

        let interrupt = Interrupt::current();
        debug!(?interrupt, "interrupted");
        leave(interrupt);
        std::process::exit(interrupt.exit_code());
    });
}

fn leave(interrupt: Interrupt) {
    let _ = Term::stderr().show_cursor();
    if interrupt == Interrupt::CancelPrompt {
        if let Ok(saved) = SAVED_TERMINAL.lock() {
            if let Some(saved) = saved.as_ref() {
                terminal::restore(saved);
            }
        }
        eprintln!();
        output::warning("Cancelled by user");
    }
}

#[cfg(unix)]
mod terminal {
    /// Attributes of the terminal on stdin.
    pub struct Saved(libc::termios);

    pub fn save() -> Option<Saved> {
        // SAFETY: tcgetattr only writes into the zeroed struct we own.
        unsafe {
            let mut attrs: libc::termios = std::mem::zeroed();
            (libc::tcgetattr(libc::STDIN_FILENO, &mut attrs) == 0).then_some(Saved(attrs))
        }
    }

    pub fn restore(saved: &Saved) {
        // SAFETY: the attributes came from tcgetattr on the same descriptor.
        unsafe {
            libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &saved.0);
        }
    }
}

#[cfg(not(unix))]
mod terminal {
    pub struct Saved;

    pub fn save() -> Option<Saved> {
        None
    }

    pub fn restore(_saved: &Saved) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test owns the process-wide prompt counter.
    #[test]
    fn interrupts_cancel_only_while_a_prompt_is_open() {
        assert_eq!(Interrupt::current(), Interrupt::Abort);
        assert_eq!(Interrupt::current().exit_code(), 130);

        let outer = PromptScope::enter();
        assert_eq!(Interrupt::current(), Interrupt::CancelPrompt);
        assert_eq!(Interrupt::current().exit_code(), 0);

        let inner = PromptScope::enter();
        drop(inner);
        assert_eq!(Interrupt::current(), Interrupt::CancelPrompt);

        drop(outer);
        assert_eq!(Interrupt::current(), Interrupt::Abort);
    }
}
