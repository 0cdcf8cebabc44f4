use scriptree_core::Notifier;
use tracing::info;

/// Routes user notices to the terminal: informational toasts become log
/// lines, errors go to stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn info(&self, message: &str) {
        info!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("error: {message}");
    }
}
