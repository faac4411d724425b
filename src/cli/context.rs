//! CLI context for storing global options during command execution

use std::cell::RefCell;

thread_local! {
    static CLI_CONTEXT: RefCell<Option<CliContext>> = const { RefCell::new(None) };
}

/// Context containing global CLI options
#[derive(Debug, Clone, Default)]
pub struct CliContext {
    pub verbose: bool,
    pub quiet: bool,
    pub chunk_size: Option<usize>,
}

impl CliContext {
    /// Set the global CLI context for the current thread
    pub fn set(context: CliContext) {
        CLI_CONTEXT.with(|c| {
            *c.borrow_mut() = Some(context);
        });
    }

    /// Get the current CLI context
    pub fn get() -> Option<CliContext> {
        CLI_CONTEXT.with(|c| c.borrow().clone())
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose() -> bool {
        Self::get().map(|ctx| ctx.verbose).unwrap_or(false)
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet() -> bool {
        Self::get().map(|ctx| ctx.quiet).unwrap_or(false)
    }

    /// Chunk size given on the command line or via environment
    pub fn chunk_size() -> Option<usize> {
        Self::get().and_then(|ctx| ctx.chunk_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_defaults_when_unset() {
        std::thread::spawn(|| {
            assert!(!CliContext::is_verbose());
            assert!(!CliContext::is_quiet());
            assert_eq!(CliContext::chunk_size(), None);
        })
        .join()
        .unwrap();
    }

    #[test]
    fn test_context_set() {
        std::thread::spawn(|| {
            CliContext::set(CliContext {
                verbose: true,
                quiet: false,
                chunk_size: Some(8),
            });
            assert!(CliContext::is_verbose());
            assert_eq!(CliContext::chunk_size(), Some(8));
        })
        .join()
        .unwrap();
    }
}
