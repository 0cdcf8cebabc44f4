/// Non-blocking user notices surfaced by the host UI.
pub trait Notifier {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}
