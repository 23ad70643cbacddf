/// Status sink for the controller. Every status message goes through here
/// exactly once; the visual label and the speech output receive the
/// identical string.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Prints statuses to stdout. Stands in for the speech sink on the CLI.
pub struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// Discards statuses, for shells that consume the returned status string
/// directly.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&mut self, _message: &str) {}
}
